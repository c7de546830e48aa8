//! Error types for gluesync

use thiserror::Error;

/// Result type alias for gluesync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed. Check your credentials with `gluesync init`.")]
    Unauthorized,

    #[error("Access denied. You don't have permission to access this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Every attempt of a request failed. `last_status` is `None` when the
    /// final attempt never produced a response.
    #[error("{method} {url} failed after {attempts} attempts (last status: {})", status_label(.last_status))]
    RetriesExhausted {
        method: String,
        url: String,
        attempts: u32,
        last_status: Option<u16>,
    },
}

fn status_label(status: &Option<u16>) -> String {
    status
        .map(|s| s.to_string())
        .unwrap_or_else(|| "NO RESP".to_string())
}

impl ApiError {
    /// Map a non-success HTTP status and its body to an error.
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        match status {
            reqwest::StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            reqwest::StatusCode::FORBIDDEN => ApiError::Forbidden,
            reqwest::StatusCode::NOT_FOUND => ApiError::NotFound(body),
            reqwest::StatusCode::BAD_REQUEST | reqwest::StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::BadRequest(body)
            }
            s if s.is_server_error() => ApiError::ServerError(body),
            s => ApiError::InvalidResponse(format!("Unexpected status code {}: {}", s, body)),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `gluesync init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("IT Glue API key not configured. Run `gluesync init` or set GLUESYNC_API_KEY.")]
    MissingDirectoryKey,

    #[error("Autotask credentials incomplete: missing {0}. Run `gluesync init`.")]
    MissingTicketingCredentials(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_unauthorized_message() {
        let err = ApiError::Unauthorized;
        assert!(err.to_string().contains("gluesync init"));
    }

    #[test]
    fn test_retries_exhausted_with_status() {
        let err = ApiError::RetriesExhausted {
            method: "GET".to_string(),
            url: "https://example.test/organizations".to_string(),
            attempts: 5,
            last_status: Some(503),
        };
        let msg = err.to_string();
        assert!(msg.contains("5 attempts"));
        assert!(msg.contains("503"));
    }

    #[test]
    fn test_retries_exhausted_without_response() {
        let err = ApiError::RetriesExhausted {
            method: "POST".to_string(),
            url: "https://example.test/Contacts".to_string(),
            attempts: 3,
            last_status: None,
        };
        assert!(err.to_string().contains("NO RESP"));
    }

    #[test]
    fn test_from_status_mapping() {
        use reqwest::StatusCode;

        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, String::new()),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, "org 9".to_string()),
            ApiError::NotFound(body) if body == "org 9"
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, String::new()),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, String::new()),
            ApiError::ServerError(_)
        ));
    }

    #[test]
    fn test_reqwest_builder_error_is_network() {
        let err = reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();

        assert!(matches!(ApiError::from(err), ApiError::Network(_)));
    }

    #[test]
    fn test_config_error_missing_ticketing() {
        let err = ConfigError::MissingTicketingCredentials("secret".to_string());
        assert!(err.to_string().contains("secret"));
    }

    #[test]
    fn test_error_from_api_error() {
        let err: Error = ApiError::Forbidden.into();

        match err {
            Error::Api(ApiError::Forbidden) => (),
            _ => panic!("Expected Error::Api(ApiError::Forbidden)"),
        }
    }

    #[test]
    fn test_config_error_from_yaml_error() {
        let yaml_str = "invalid: [yaml: content";
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let config_err: ConfigError = yaml_err.into();

        match config_err {
            ConfigError::ParseError(_) => (),
            _ => panic!("Expected ConfigError::ParseError"),
        }
    }
}
