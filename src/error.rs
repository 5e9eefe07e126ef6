use serde_json::Value;
use thiserror::Error;

use crate::types::Param;

/// SDK-specific errors
#[derive(Error, Debug)]
pub enum TradeError {
    #[error("HTTP {status}: {reason}")]
    Transport { status: u16, reason: String },

    #[error("No JSON object is returned: {body}")]
    MalformedResponse { body: String },

    #[error("Response id {actual:?} does not match request id {expected}")]
    IdentityMismatch {
        expected: String,
        actual: Option<String>,
    },

    #[error("Remote error from {method}: {response} (params: {params:?})")]
    Remote {
        method: String,
        response: Value,
        params: Vec<Param>,
    },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid param: {0}")]
    InvalidParam(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TradeError {
    /// Check if the error is worth retrying at the caller's discretion.
    ///
    /// The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            TradeError::Transport { status, .. } => *status >= 500,
            TradeError::Http(err) => err.is_connect() || err.is_timeout(),
            _ => false,
        }
    }

    /// Check if the server rejected the credentials or the signature.
    ///
    /// A signature mismatch surfaces at the HTTP layer, not as a remote error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, TradeError::Transport { status: 401 | 403, .. })
    }

    /// The `error` payload of a remote error, if any.
    pub fn remote_error(&self) -> Option<&Value> {
        match self {
            TradeError::Remote { response, .. } => response.get("error"),
            _ => None,
        }
    }

    /// `error.code` of a remote error.
    pub fn remote_code(&self) -> Option<i64> {
        self.remote_error()?.get("code")?.as_i64()
    }

    /// `error.message` of a remote error, or the error itself when it is a bare string.
    pub fn remote_message(&self) -> Option<&str> {
        let error = self.remote_error()?;
        match error {
            Value::String(message) => Some(message),
            _ => error.get("message")?.as_str(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TradeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn remote(error: Value) -> TradeError {
        TradeError::Remote {
            method: "getAccountInfo".to_string(),
            response: json!({ "id": "1", "error": error }),
            params: vec![],
        }
    }

    #[test]
    fn test_remote_code_and_message() {
        let err = remote(json!({ "code": -32003, "message": "Insufficient CNY balance" }));
        assert_eq!(err.remote_code(), Some(-32003));
        assert_eq!(err.remote_message(), Some("Insufficient CNY balance"));

        let err = remote(json!("bad"));
        assert_eq!(err.remote_code(), None);
        assert_eq!(err.remote_message(), Some("bad"));
    }

    #[test]
    fn test_error_retryable() {
        let err = TradeError::Transport {
            status: 502,
            reason: "Bad Gateway".to_string(),
        };
        assert!(err.is_retryable());

        let err = TradeError::Transport {
            status: 401,
            reason: "Unauthorized".to_string(),
        };
        assert!(!err.is_retryable());
        assert!(err.is_auth_error());

        let err = TradeError::MalformedResponse {
            body: "not json".to_string(),
        };
        assert!(!err.is_retryable());
        assert!(!err.is_auth_error());
    }

    #[test]
    fn test_remote_display_carries_params() {
        let err = TradeError::Remote {
            method: "cancelOrder".to_string(),
            response: json!({ "id": 5, "error": "bad" }),
            params: vec![Param::Int(42)],
        };
        let text = err.to_string();
        assert!(text.contains("cancelOrder"));
        assert!(text.contains("\"bad\""));
        assert!(text.contains("42"));
    }
}
