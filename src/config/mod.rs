#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use toml_config::TomlConfig;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_IP_ENDPOINT: &str = "https://api.ipify.org?format=json";
pub const DEFAULT_GEOLOCATION_ENDPOINT: &str = "https://ipwho.is/";
pub const DEFAULT_FLYOVER_ENDPOINT: &str = "https://iss-flyover.herokuapp.com/json/";
pub const DEFAULT_USER_AGENT: &str = concat!("iss-spotter/", env!("CARGO_PKG_VERSION"));

pub const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Effective settings after defaults, the TOML file and CLI flags are layered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotterSettings {
    pub ip_endpoint: String,
    pub geolocation_endpoint: String,
    pub flyover_endpoint: String,
    /// `None` leaves reqwest's own default in place.
    pub timeout_seconds: Option<u64>,
    pub user_agent: String,
}

impl Default for SpotterSettings {
    fn default() -> Self {
        Self {
            ip_endpoint: DEFAULT_IP_ENDPOINT.to_string(),
            geolocation_endpoint: DEFAULT_GEOLOCATION_ENDPOINT.to_string(),
            flyover_endpoint: DEFAULT_FLYOVER_ENDPOINT.to_string(),
            timeout_seconds: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl SpotterSettings {
    /// Overlays every value the TOML file sets.
    pub fn merge_toml(mut self, toml: &TomlConfig) -> Self {
        if let Some(endpoints) = &toml.endpoints {
            if let Some(ip) = &endpoints.ip {
                self.ip_endpoint = ip.clone();
            }
            if let Some(geolocation) = &endpoints.geolocation {
                self.geolocation_endpoint = geolocation.clone();
            }
            if let Some(flyover) = &endpoints.flyover {
                self.flyover_endpoint = flyover.clone();
            }
        }

        if let Some(http) = &toml.http {
            if http.timeout_seconds.is_some() {
                self.timeout_seconds = http.timeout_seconds;
            }
            if let Some(user_agent) = &http.user_agent {
                self.user_agent = user_agent.clone();
            }
        }

        self
    }
}

impl ConfigProvider for SpotterSettings {
    fn ip_endpoint(&self) -> &str {
        &self.ip_endpoint
    }

    fn geolocation_endpoint(&self) -> &str {
        &self.geolocation_endpoint
    }

    fn flyover_endpoint(&self) -> &str {
        &self.flyover_endpoint
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Validate for SpotterSettings {
    fn validate(&self) -> Result<()> {
        validate_url("endpoints.ip", &self.ip_endpoint)?;
        validate_url("endpoints.geolocation", &self.geolocation_endpoint)?;
        validate_url("endpoints.flyover", &self.flyover_endpoint)?;

        if let Some(timeout) = self.timeout_seconds {
            validate_range("http.timeout_seconds", timeout, 1, MAX_TIMEOUT_SECONDS)?;
        }

        validate_non_empty_string("http.user_agent", &self.user_agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = SpotterSettings::default();

        assert!(settings.validate().is_ok());
        assert_eq!(settings.request_timeout(), None);
        assert!(settings.user_agent().starts_with("iss-spotter/"));
    }

    #[test]
    fn test_merge_toml_only_overrides_present_values() {
        let toml = TomlConfig::from_toml_str(
            r#"
[endpoints]
flyover = "http://localhost:9000/json/"

[http]
timeout_seconds = 15
"#,
        )
        .unwrap();

        let settings = SpotterSettings::default().merge_toml(&toml);

        assert_eq!(settings.ip_endpoint, DEFAULT_IP_ENDPOINT);
        assert_eq!(settings.geolocation_endpoint, DEFAULT_GEOLOCATION_ENDPOINT);
        assert_eq!(settings.flyover_endpoint, "http://localhost:9000/json/");
        assert_eq!(settings.request_timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_out_of_range_timeout_is_rejected() {
        let settings = SpotterSettings {
            timeout_seconds: Some(0),
            ..SpotterSettings::default()
        };

        assert!(settings.validate().is_err());
    }
}
