pub mod home;
pub mod language;
pub mod locale_api;
