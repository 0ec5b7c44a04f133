use crate::config::SpotterSettings;
use crate::utils::error::{Result, SpotterError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub endpoints: Option<EndpointsConfig>,
    pub http: Option<HttpConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointsConfig {
    pub ip: Option<String>,
    pub geolocation: Option<String>,
    pub flyover: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SpotterError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ISS_FLYOVER_URL})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SpotterError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.http.as_ref().and_then(|h| h.timeout_seconds)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        SpotterSettings::default().merge_toml(self).validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[endpoints]
ip = "https://api.ipify.org?format=json"
geolocation = "https://ipwho.is/"
flyover = "https://iss-flyover.herokuapp.com/json/"

[http]
timeout_seconds = 10
user_agent = "spotter-test"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let endpoints = config.endpoints.as_ref().unwrap();

        assert_eq!(endpoints.geolocation.as_deref(), Some("https://ipwho.is/"));
        assert_eq!(config.timeout_seconds(), Some(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_is_allowed() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert!(config.endpoints.is_none());
        assert!(config.http.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ISS_SPOTTER_TEST_FLYOVER", "http://flyover.test/json/");

        let toml_content = r#"
[endpoints]
flyover = "${ISS_SPOTTER_TEST_FLYOVER}"
geolocation = "${ISS_SPOTTER_TEST_UNSET_VARIABLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let endpoints = config.endpoints.unwrap();

        assert_eq!(endpoints.flyover.as_deref(), Some("http://flyover.test/json/"));
        assert_eq!(
            endpoints.geolocation.as_deref(),
            Some("${ISS_SPOTTER_TEST_UNSET_VARIABLE}")
        );
    }

    #[test]
    fn test_invalid_endpoint_fails_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[endpoints]
ip = "ftp://example.com/ip"
"#,
        )
        .unwrap();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("endpoints.ip"));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let result = TomlConfig::from_toml_str("[endpoints\nip = ");

        assert!(matches!(result, Err(SpotterError::ConfigError { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[http]\ntimeout_seconds = 42").unwrap();

        let config = TomlConfig::from_file(file.path()).unwrap();

        assert_eq!(config.timeout_seconds(), Some(42));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = TomlConfig::from_file("/definitely/not/here/iss-spotter.toml");

        assert!(matches!(result, Err(SpotterError::IoError(_))));
    }
}
