//! Remote API location and timeouts, read from the environment.

use std::env;
use std::time::Duration;

use crate::error::ClientError;

pub const DEFAULT_PROTOCOL: &str = "http";
pub const DEFAULT_HOSTNAME: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    timeout: Duration,
}

impl ApiConfig {
    /// Config pointing straight at `base_url`, as used against a mock server.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Build from `API_PROTOCOL`, `API_HOSTNAME`, `API_PORT` and `API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ClientError> {
        let protocol = var_or("API_PROTOCOL", DEFAULT_PROTOCOL);
        if protocol != "http" && protocol != "https" {
            return Err(ClientError::config(format!(
                "API_PROTOCOL must be http or https, got '{protocol}'"
            )));
        }
        let hostname = var_or("API_HOSTNAME", DEFAULT_HOSTNAME);
        if hostname.contains(['/', ':', ' ']) {
            return Err(ClientError::config(format!(
                "API_HOSTNAME '{hostname}' is not a bare host name"
            )));
        }
        let port = parse_var("API_PORT", DEFAULT_PORT)?;
        let timeout = parse_var("API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;

        Ok(Self {
            base_url: format!("{protocol}://{hostname}:{port}"),
            timeout: Duration::from_secs(timeout),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Absolute URL for an API path such as `/tournaments`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ClientError> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| ClientError::config(format!("{name} has invalid value '{raw}'"))),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;

    use super::*;

    const VARS: [&str; 4] = ["API_PROTOCOL", "API_HOSTNAME", "API_PORT", "API_TIMEOUT_SECS"];

    fn clear_env() {
        for name in VARS {
            env::remove_var(name);
        }
    }

    #[test]
    #[serial]
    fn defaults_point_at_local_api() {
        clear_env();
        let config = ApiConfig::from_env().unwrap();
        assert_eq!(config.base_url(), "http://localhost:5000");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    #[serial]
    fn env_overrides_each_part() {
        clear_env();
        env::set_var("API_PROTOCOL", "https");
        env::set_var("API_HOSTNAME", "api.bowl.example");
        env::set_var("API_PORT", "8443");
        env::set_var("API_TIMEOUT_SECS", "5");
        let config = ApiConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.base_url(), "https://api.bowl.example:8443");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(
            config.url("/tournaments"),
            "https://api.bowl.example:8443/tournaments"
        );
    }

    #[test]
    #[serial]
    fn invalid_port_is_config_error() {
        clear_env();
        env::set_var("API_PORT", "lots");
        let result = ApiConfig::from_env();
        clear_env();
        assert!(matches!(result, Err(ClientError::Config { .. })));
    }

    #[test]
    #[serial]
    fn unknown_protocol_is_config_error() {
        clear_env();
        env::set_var("API_PROTOCOL", "ftp");
        let result = ApiConfig::from_env();
        clear_env();
        assert!(matches!(result, Err(ClientError::Config { .. })));
    }

    #[test]
    fn new_strips_trailing_slash() {
        let config = ApiConfig::new("http://127.0.0.1:9999/");
        assert_eq!(config.url("teams/abc"), "http://127.0.0.1:9999/teams/abc");
    }
}
