//! Error handling for domain-suggest

use thiserror::Error;

/// Main error type for domain-suggest
#[derive(Error, Debug, Clone)]
pub enum DomainSuggestError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("LLM provider error ({provider}): {message}")]
    LlmProvider {
        provider: String,
        message: String,
        code: Option<String>,
    },

    #[error("Domain checking error for '{domain}': {message}")]
    DomainCheck {
        domain: String,
        message: String,
        method: Option<String>,
    },

    #[error("Network error: {message}")]
    Network {
        message: String,
        status_code: Option<u16>,
        url: Option<String>,
    },

    #[error("Authentication error: {message}")]
    Authentication { message: String },

    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        message: String,
        retry_after: Option<u64>,
    },

    #[error("Timeout error: {operation} timed out after {timeout_secs}s")]
    Timeout {
        operation: String,
        timeout_secs: u64,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        content: Option<String>,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("IO error: {message}")]
    Io { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainSuggestError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an LLM provider error
    pub fn llm_provider(
        provider: impl Into<String>,
        message: impl Into<String>,
        code: Option<String>,
    ) -> Self {
        Self::LlmProvider {
            provider: provider.into(),
            message: message.into(),
            code,
        }
    }

    /// Create a domain checking error
    pub fn domain_check(
        domain: impl Into<String>,
        message: impl Into<String>,
        method: Option<String>,
    ) -> Self {
        Self::DomainCheck {
            domain: domain.into(),
            message: message.into(),
            method,
        }
    }

    /// Create a network error
    pub fn network(
        message: impl Into<String>,
        status_code: Option<u16>,
        url: Option<String>,
    ) -> Self {
        Self::Network {
            message: message.into(),
            status_code,
            url,
        }
    }

    /// Create an authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create a rate limit error
    pub fn rate_limit(message: impl Into<String>, retry_after: Option<u64>) -> Self {
        Self::RateLimit {
            message: message.into(),
            retry_after,
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, timeout_secs: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_secs,
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>, content: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            content,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// True when the fault sits with an external collaborator rather than
    /// with the caller or with this service.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::LlmProvider { .. }
                | Self::Network { .. }
                | Self::Authentication { .. }
                | Self::RateLimit { .. }
                | Self::Parse { .. }
        )
    }

    /// Message for a terminal user, with a hint where one helps.
    pub fn user_message(&self) -> String {
        let hint = match self {
            Self::Config { .. } => Some("set the missing variables in the environment or in .env"),
            Self::Authentication { .. } => Some("OPENAI_API_KEY was rejected by the provider"),
            Self::RateLimit { .. } => Some("wait a moment before asking again"),
            Self::Timeout { .. } => Some("raise REQUEST_DEADLINE_SECS or LOOKUP_TIMEOUT_SECS"),
            Self::Internal { .. } => Some("this is a bug, please report it"),
            _ => None,
        };

        match hint {
            Some(hint) => format!("{}\nhint: {}", self, hint),
            None => self.to_string(),
        }
    }
}

impl From<std::io::Error> for DomainSuggestError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DomainSuggestError>;

/// Helper macros for common error patterns
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::DomainSuggestError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::DomainSuggestError::config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! validation_error {
    ($msg:expr) => {
        $crate::error::DomainSuggestError::validation($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::DomainSuggestError::validation(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! internal_error {
    ($msg:expr) => {
        $crate::error::DomainSuggestError::internal($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::DomainSuggestError::internal(format!($fmt, $($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = DomainSuggestError::validation("prompt too short");
        assert!(error.to_string().contains("prompt too short"));

        let error = DomainSuggestError::timeout("pipeline", 60);
        assert_eq!(error.to_string(), "Timeout error: pipeline timed out after 60s");
    }

    #[test]
    fn test_upstream_classification() {
        assert!(DomainSuggestError::llm_provider("openai", "boom", None).is_upstream());
        assert!(DomainSuggestError::network("down", Some(503), None).is_upstream());
        assert!(!DomainSuggestError::validation("bad").is_upstream());
        assert!(!DomainSuggestError::internal("bug").is_upstream());
        assert!(!DomainSuggestError::timeout("lookup", 10).is_upstream());
    }

    #[test]
    fn test_user_message_hints() {
        let message = DomainSuggestError::config("OPENAI_API_KEY is not set").user_message();
        assert!(message.starts_with("Configuration error: OPENAI_API_KEY is not set"));
        assert!(message.contains("hint:"));

        let message = DomainSuggestError::validation("Prompt too short").user_message();
        assert_eq!(message, "Validation error: Prompt too short");
    }

    #[test]
    fn test_io_conversion() {
        let error: DomainSuggestError =
            std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use").into();
        assert!(matches!(error, DomainSuggestError::Io { .. }));
    }

    #[test]
    fn test_macros() {
        let error = validation_error!("tld '{}' is malformed", "com");
        assert!(matches!(error, DomainSuggestError::Validation { .. }));
        assert!(error.to_string().contains("'com'"));

        let error = config_error!("missing key");
        assert!(matches!(error, DomainSuggestError::Config { .. }));

        let error = internal_error!("unexpected {}", 1);
        assert!(error.to_string().contains("unexpected 1"));
    }
}
