use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpotterError {
    #[error("A {kind} error occurred while trying to connect to the following api ({host}): {source}")]
    Transport {
        host: String,
        kind: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Status Code {status} when fetching {lookup}. Response: {body}")]
    HttpStatus {
        status: u16,
        lookup: &'static str,
        body: String,
    },

    #[error("The url ({url}) did not return {expected}: {reason}")]
    MissingPayload {
        url: String,
        expected: &'static str,
        reason: String,
    },

    #[error("Geolocation lookup failed for IP {ip}: {message}")]
    InvalidAddress { ip: String, message: String },

    #[error("Flyover service reported '{message}' for coordinates ({latitude}, {longitude})")]
    FlyoverStatus {
        message: String,
        latitude: f64,
        longitude: f64,
    },

    #[error("Invalid endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 無法連線到上游服務
    Network,
    /// 上游回應了錯誤狀態或非預期內容
    Upstream,
    Configuration,
}

impl SpotterError {
    pub(crate) fn transport(host: impl Into<String>, source: reqwest::Error) -> Self {
        let kind = if source.is_timeout() {
            "timeout"
        } else if source.is_connect() {
            "connection"
        } else if source.is_body() || source.is_decode() {
            "response body"
        } else if source.is_request() {
            "request"
        } else {
            "transport"
        };

        SpotterError::Transport {
            host: host.into(),
            kind,
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SpotterError::Transport { .. } => ErrorCategory::Network,
            SpotterError::HttpStatus { .. }
            | SpotterError::MissingPayload { .. }
            | SpotterError::InvalidAddress { .. }
            | SpotterError::FlyoverStatus { .. } => ErrorCategory::Upstream,
            SpotterError::InvalidEndpoint { .. }
            | SpotterError::InvalidConfigValue { .. }
            | SpotterError::ConfigError { .. }
            | SpotterError::IoError(_) => ErrorCategory::Configuration,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach a lookup service. {}", self),
            ErrorCategory::Upstream => format!("A lookup service returned an unusable answer. {}", self),
            ErrorCategory::Configuration => format!("The configuration is not valid. {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SpotterError::Transport { .. } => {
                "Check your network connection, or raise --timeout-seconds if the service is slow"
            }
            SpotterError::HttpStatus { .. } => {
                "The service may be down; try again later or point to another endpoint"
            }
            SpotterError::MissingPayload { .. } => {
                "Make sure the configured endpoint speaks the expected JSON format"
            }
            SpotterError::InvalidAddress { .. } => {
                "The geolocation service could not place this IP; try `coords` with a different address"
            }
            SpotterError::FlyoverStatus { .. } => {
                "Check that latitude is within -90..90 and longitude within -180..180"
            }
            SpotterError::InvalidEndpoint { .. } | SpotterError::InvalidConfigValue { .. } => {
                "Fix the offending value in the config file or on the command line"
            }
            SpotterError::ConfigError { .. } | SpotterError::IoError(_) => {
                "Make sure the config file exists and is valid TOML"
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 1,
            ErrorCategory::Network | ErrorCategory::Upstream => 2,
        }
    }
}

pub type Result<T> = std::result::Result<T, SpotterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_carries_code_and_body() {
        let err = SpotterError::HttpStatus {
            status: 503,
            lookup: "IP",
            body: "service unavailable".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Status Code 503 when fetching IP. Response: service unavailable"
        );
        assert_eq!(err.category(), ErrorCategory::Upstream);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_config_errors_exit_with_one() {
        let err = SpotterError::InvalidConfigValue {
            field: "http.timeout_seconds".to_string(),
            value: "0".to_string(),
            reason: "Value must be between 1 and 300".to_string(),
        };

        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_friendly_message().contains("http.timeout_seconds"));
    }
}
