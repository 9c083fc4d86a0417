pub mod locale;

pub use locale::{ActiveLocale, AvailableLocale, LocaleInfoResponse};
