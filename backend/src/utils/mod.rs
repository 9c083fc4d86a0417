pub mod error;
pub mod i18n;
pub mod scheduled_executor;

pub use error::{ApiError, ApiResult};
pub use i18n::{DEFAULT_LOCALE, LOCALE_SESSION_KEY, translate};
pub use scheduled_executor::{ScheduledExecutor, ScheduledTask};
