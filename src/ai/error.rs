use serde_json::Error as JsonError;
use std::fmt;

/// Shown for every transport, provider and decode failure.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to analyze code. Please try again.";

#[derive(Debug)]
pub enum AIError {
    ValidationError(String),
    ConfigurationError(String),
    NetworkError(String),
    APIError(String),
    EmptyResponse(String),
    ParseError(String),
}

impl AIError {
    /// Message surfaced to the user. Provider-side causes are collapsed,
    /// the detailed text only goes to the log.
    pub fn user_message(&self) -> String {
        match self {
            Self::ValidationError(msg) | Self::ConfigurationError(msg) => msg.clone(),
            Self::NetworkError(_)
            | Self::APIError(_)
            | Self::EmptyResponse(_)
            | Self::ParseError(_) => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    /// True for failures detected before any request was issued.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::ConfigurationError(_))
    }
}

impl fmt::Display for AIError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            Self::NetworkError(msg) => write!(f, "Network error: {}", msg),
            Self::APIError(msg) => write!(f, "API error: {}", msg),
            Self::EmptyResponse(msg) => write!(f, "Empty response: {}", msg),
            Self::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for AIError {}

impl From<JsonError> for AIError {
    fn from(error: JsonError) -> Self {
        AIError::ParseError(format!("JSON decoding error: {}", error))
    }
}

impl From<reqwest::Error> for AIError {
    fn from(error: reqwest::Error) -> Self {
        AIError::NetworkError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_failures_collapse_to_generic_message() {
        let errors = [
            AIError::NetworkError("connection refused".into()),
            AIError::APIError("HTTP 500".into()),
            AIError::EmptyResponse("no candidates".into()),
            AIError::ParseError("expected value".into()),
        ];
        for error in errors {
            assert_eq!(error.user_message(), GENERIC_FAILURE_MESSAGE);
            assert!(!error.is_local());
        }
    }

    #[test]
    fn test_local_failures_keep_their_message() {
        let error = AIError::ConfigurationError("API key is not configured.".into());
        assert_eq!(error.user_message(), "API key is not configured.");
        assert!(error.is_local());
        assert!(error.to_string().starts_with("Configuration error"));
    }
}
