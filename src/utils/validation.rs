use crate::utils::error::{Result, SpotterError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Parses an endpoint and rejects anything that is not plain http(s).
pub fn validate_url(field_name: &str, url_str: &str) -> Result<Url> {
    if url_str.trim().is_empty() {
        return Err(SpotterError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    let url = Url::parse(url_str).map_err(|e| SpotterError::InvalidConfigValue {
        field: field_name.to_string(),
        value: url_str.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(SpotterError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Unsupported URL scheme: {}", scheme),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SpotterError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(SpotterError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("endpoints.ip", "https://api.ipify.org?format=json").is_ok());
        assert!(validate_url("endpoints.ip", "http://127.0.0.1:8080/ip").is_ok());
        assert!(validate_url("endpoints.ip", "").is_err());
        assert!(validate_url("endpoints.ip", "not a url").is_err());
        assert!(validate_url("endpoints.ip", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("http.timeout_seconds", 10u64, 1, 300).is_ok());
        assert!(validate_range("http.timeout_seconds", 0u64, 1, 300).is_err());
        assert!(validate_range("http.timeout_seconds", 301u64, 1, 300).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("http.user_agent", "iss-spotter").is_ok());
        assert!(validate_non_empty_string("http.user_agent", "   ").is_err());
    }
}
