use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BOOKING_HORIZON_DAYS: u32 = 365;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub session_file: PathBuf,
    pub booking_horizon_days: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            session_file: default_session_file(),
            booking_horizon_days: DEFAULT_BOOKING_HORIZON_DAYS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            api_url: env::var("TABIB_API_URL")
                .or_else(|_| env::var("VITE_API_URL"))
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| {
                    warn!("TABIB_API_URL not set, using {}", DEFAULT_API_URL);
                    DEFAULT_API_URL.to_string()
                }),
            request_timeout_secs: parse_var(
                "TABIB_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            ),
            session_file: env::var("TABIB_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_session_file()),
            booking_horizon_days: parse_var(
                "TABIB_BOOKING_HORIZON_DAYS",
                DEFAULT_BOOKING_HORIZON_DAYS,
            ),
        };

        if !config.is_configured() {
            warn!("Client not fully configured - API URL is empty");
        }

        config
    }

    /// Config pointing at an explicit backend, everything else defaulted.
    pub fn for_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_url.is_empty()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_var<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value {:?}, using default {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}

fn default_session_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(env::temp_dir)
        .join("tabib")
        .join("session.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.booking_horizon_days, 365);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.session_file.ends_with("tabib/session.json"));
        assert!(config.is_configured());
    }

    #[test]
    fn test_for_api_url() {
        let config = AppConfig::for_api_url("http://localhost:9999");
        assert_eq!(config.api_url, "http://localhost:9999");
        assert_eq!(config.booking_horizon_days, DEFAULT_BOOKING_HORIZON_DAYS);
    }

    #[test]
    fn test_empty_url_is_not_configured() {
        let config = AppConfig::for_api_url("");
        assert!(!config.is_configured());
    }
}
