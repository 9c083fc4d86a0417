use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::models::AvailableLocale;
use crate::utils::i18n::{DEFAULT_LOCALE, is_well_formed};

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub session: SessionConfig,
    pub locale: LocaleConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie_name: String,
    /// Idle lifetime of a session in seconds (accepts "120m", "2h")
    #[serde(deserialize_with = "deserialize_duration_secs")]
    pub lifetime: u64,
    /// How often expired sessions are swept, in seconds
    #[serde(deserialize_with = "deserialize_duration_secs")]
    pub purge_interval: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    pub default: String,
    /// Reject identifiers outside `available` before they reach the session
    pub validate: bool,
    pub available: Vec<AvailableLocale>,
}

impl Config {
    /// Load configuration with environment variable override support
    ///
    /// Loading order:
    /// 1. Load from the given path, or from the first config.toml found
    /// 2. Override with environment variables (prefixed with APP_)
    /// 3. Validate the final configuration
    pub fn load(path: Option<&str>) -> Result<Self, anyhow::Error> {
        let mut config = match path {
            Some(path) => Self::from_toml(path)?,
            None => match Self::find_config_file() {
                Some(config_path) => Self::from_toml(&config_path)?,
                None => {
                    tracing::warn!("Configuration file not found, using defaults");
                    Config::default()
                },
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - APP_SERVER_HOST: Server host (default: 0.0.0.0)
    /// - APP_SERVER_PORT: Server port (default: 8080)
    /// - APP_LOG_LEVEL: Logging level (e.g., "info,locale_switch=debug")
    /// - APP_LOG_FILE: Log file path
    /// - APP_SESSION_COOKIE: Session cookie name
    /// - APP_SESSION_LIFETIME: Session lifetime (accepts "30s", "5m", "1h")
    /// - APP_LOCALE_DEFAULT: Default locale identifier
    /// - APP_LOCALE_VALIDATE: Validate switched locales (true/false)
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("APP_SERVER_HOST") {
            self.server.host = host;
            tracing::info!("Override server.host from env: {}", self.server.host);
        }

        if let Ok(port) = std::env::var("APP_SERVER_PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
            tracing::info!("Override server.port from env: {}", self.server.port);
        }

        if let Ok(level) = std::env::var("APP_LOG_LEVEL") {
            self.logging.level = level;
            tracing::info!("Override logging.level from env: {}", self.logging.level);
        }

        if let Ok(file) = std::env::var("APP_LOG_FILE") {
            self.logging.file = if file.is_empty() { None } else { Some(file) };
            tracing::info!("Override logging.file from env: {:?}", self.logging.file);
        }

        if let Ok(name) = std::env::var("APP_SESSION_COOKIE") {
            self.session.cookie_name = name;
            tracing::info!("Override session.cookie_name from env: {}", self.session.cookie_name);
        }

        if let Ok(lifetime) = std::env::var("APP_SESSION_LIFETIME") {
            match parse_duration_to_secs(&lifetime) {
                Ok(val) => {
                    self.session.lifetime = val;
                    tracing::info!("Override session.lifetime from env: {}", self.session.lifetime);
                },
                Err(e) => tracing::warn!(
                    "Invalid APP_SESSION_LIFETIME '{}': {} (keep {})",
                    lifetime,
                    e,
                    self.session.lifetime
                ),
            }
        }

        if let Ok(locale) = std::env::var("APP_LOCALE_DEFAULT") {
            self.locale.default = locale;
            tracing::info!("Override locale.default from env: {}", self.locale.default);
        }

        if let Ok(validate) = std::env::var("APP_LOCALE_VALIDATE")
            && let Ok(val) = validate.parse()
        {
            self.locale.validate = val;
            tracing::info!("Override locale.validate from env: {}", self.locale.validate);
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        let cookie = &self.session.cookie_name;
        if cookie.is_empty()
            || !cookie.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            anyhow::bail!("session.cookie_name '{}' is not a valid cookie name", cookie);
        }
        if self.session.lifetime == 0 {
            anyhow::bail!("session.lifetime must be > 0");
        }
        if self.session.purge_interval == 0 {
            anyhow::bail!("session.purge_interval must be > 0");
        }

        if self.locale.available.is_empty() {
            anyhow::bail!("locale.available cannot be empty");
        }
        for entry in &self.locale.available {
            if !is_well_formed(&entry.id) {
                anyhow::bail!("locale.available has malformed identifier '{}'", entry.id);
            }
            if entry.label.trim().is_empty() {
                anyhow::bail!("locale.available entry '{}' has an empty label", entry.id);
            }
        }
        if !self.locale.available.iter().any(|l| l.id == self.locale.default) {
            anyhow::bail!(
                "locale.default '{}' is not listed in locale.available",
                self.locale.default
            );
        }

        Ok(())
    }

    fn find_config_file() -> Option<String> {
        let possible_paths =
            ["conf/config.toml", "config.toml", "./conf/config.toml", "./config.toml"];

        for path in &possible_paths {
            if Path::new(path).exists() {
                return Some(path.to_string());
            }
        }
        None
    }

    fn from_toml(path: &str) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, anyhow::Error> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,locale_switch=debug".to_string(),
            file: Some("logs/locale-switch.log".to_string()),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "locale_switch_session".to_string(),
            lifetime: 120 * 60,
            purge_interval: 5 * 60,
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            default: DEFAULT_LOCALE.to_string(),
            validate: true,
            available: vec![
                AvailableLocale::new("English", "en"),
                AvailableLocale::new("Türkçe", "tr"),
            ],
        }
    }
}

// =========================
// Helpers for parsing values
// =========================

fn parse_duration_to_secs(input: &str) -> Result<u64, String> {
    // Accept plain numbers (treated as seconds)
    if let Ok(val) = input.parse::<u64>() {
        return Ok(val);
    }

    let s = input.trim().to_lowercase();
    let (num_str, unit) = s.split_at(s.chars().take_while(|c| c.is_ascii_digit()).count());
    if num_str.is_empty() || unit.is_empty() {
        return Err("missing number or unit".into());
    }
    let n: u64 = num_str.parse().map_err(|_| "invalid number".to_string())?;
    match unit {
        "s" | "sec" | "secs" | "second" | "seconds" => Ok(n),
        "m" | "min" | "mins" | "minute" | "minutes" => Ok(n * 60),
        "h" | "hr" | "hour" | "hours" => Ok(n * 60 * 60),
        "d" | "day" | "days" => Ok(n * 60 * 60 * 24),
        _ => Err(format!("unsupported unit: {}", unit)),
    }
}

// Accepts either a number of seconds or a human-friendly string
fn deserialize_duration_secs<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct Visitor;
    impl<'de> serde::de::Visitor<'de> for Visitor {
        type Value = u64;
        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a number of seconds or a string like '30s', '5m', '1h'")
        }
        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v)
        }
        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            if v >= 0 { Ok(v as u64) } else { Err(E::custom("negative not allowed")) }
        }
        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            parse_duration_to_secs(v).map_err(E::custom)
        }
    }
    deserializer.deserialize_any(Visitor)
}
