use thiserror::Error;

/// 抓取失敗時顯示在容器中的通用訊息
pub const GENERIC_FETCH_ERROR: &str = "Error loading bands. Please refresh the page.";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Band list request returned status {status}")]
    BadStatus { status: u16 },

    #[error("Band list could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// Diagnostic bucket for a failed band fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailureKind {
    Network,
    BadStatus,
    Parse,
    Other,
}

impl ClientError {
    pub fn kind(&self) -> FetchFailureKind {
        match self {
            ClientError::Http(e) if e.is_decode() => FetchFailureKind::Parse,
            ClientError::Http(_) => FetchFailureKind::Network,
            ClientError::BadStatus { .. } => FetchFailureKind::BadStatus,
            ClientError::Parse(_) => FetchFailureKind::Parse,
            _ => FetchFailureKind::Other,
        }
    }

    /// Every fetch failure collapses to one message for the user.
    pub fn user_friendly_message(&self) -> String {
        match self {
            ClientError::ConfigError { message } => format!("Configuration problem: {}", message),
            ClientError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration problem in {}: {}", field, reason)
            }
            _ => GENERIC_FETCH_ERROR.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failures_share_one_message() {
        let status = ClientError::BadStatus { status: 503 };
        let parse = ClientError::Parse(serde_json::from_str::<Vec<u8>>("{").unwrap_err());

        assert_eq!(status.kind(), FetchFailureKind::BadStatus);
        assert_eq!(parse.kind(), FetchFailureKind::Parse);
        assert_eq!(status.user_friendly_message(), GENERIC_FETCH_ERROR);
        assert_eq!(parse.user_friendly_message(), GENERIC_FETCH_ERROR);
    }

    #[test]
    fn test_config_errors_keep_their_detail() {
        let err = ClientError::ConfigError {
            message: "missing [source]".to_string(),
        };
        assert_eq!(err.kind(), FetchFailureKind::Other);
        assert!(err.user_friendly_message().contains("missing [source]"));
    }
}
