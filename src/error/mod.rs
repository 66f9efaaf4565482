//! Error handling module.
//!
//! `AppError` is what every public operation returns. `ProviderError` is the
//! narrower transport error produced behind the remote provider seam.

pub mod codes;

pub use codes::{ErrorCategory, ErrorCode};

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Bounds are contradictory or too narrow for the uniqueness constraint.
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Remote provider returned a non-success status or a malformed body.
    #[error("Remote source error: {0}")]
    RemoteSource(String),

    /// Transport timeout or unique-draw time budget exhausted.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Remote provider reports insufficient remaining capacity.
    #[error(
        "Quota exceeded trying to generate {requested_bytes} bytes with only {remaining_bytes} bytes remaining"
    )]
    QuotaExceeded {
        /// Bytes the caller asked for.
        requested_bytes: u64,
        /// Bytes the provider still allows.
        remaining_bytes: i64,
    },

    /// No choices to draw from.
    #[error("choices can't be empty")]
    EmptyChoices,

    /// Invalid argument value.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Choice values must be primitive scalars.
    #[error("Unsupported value type: {0}")]
    UnsupportedValueType(String),

    /// Requested string length is outside `[1, max)`.
    #[error("length must be between 1 and {max}, got {length}")]
    LengthOutOfRange {
        /// Requested length.
        length: usize,
        /// Exclusive upper limit.
        max: usize,
    },

    /// Not enough distinct characters for a unique string.
    #[error(
        "length {length} must be less than or equal to the number of distinct valid characters {available}"
    )]
    InsufficientAlphabet {
        /// Requested length.
        length: usize,
        /// Distinct characters available.
        available: usize,
    },

    /// Range notation mixed with comparison operators.
    #[error(
        "Range notation '-' cannot be combined with comparison operators '<', '<=', '>', '>=' unless the expression has an exclusion '~'"
    )]
    MixedSyntax,

    /// Malformed range expression term or modifier.
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidRange(_) => ErrorCode::INVALID_RANGE,
            Self::RemoteSource(_) => ErrorCode::REMOTE_SOURCE,
            Self::Timeout(_) => ErrorCode::TIMEOUT,
            Self::QuotaExceeded { .. } => ErrorCode::QUOTA_EXCEEDED,
            Self::EmptyChoices => ErrorCode::EMPTY_CHOICES,
            Self::InvalidArgument(_) => ErrorCode::INVALID_ARGUMENT,
            Self::UnsupportedValueType(_) => ErrorCode::UNSUPPORTED_VALUE_TYPE,
            Self::LengthOutOfRange { .. } => ErrorCode::LENGTH_OUT_OF_RANGE,
            Self::InsufficientAlphabet { .. } => ErrorCode::INSUFFICIENT_ALPHABET,
            Self::MixedSyntax => ErrorCode::MIXED_SYNTAX,
            Self::InvalidExpression(_) => ErrorCode::INVALID_EXPRESSION,
            Self::Config(_) => ErrorCode::CONFIG_ERROR,
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Timeout(_) => Self::Timeout(err.to_string()),
            _ => Self::RemoteSource(err.to_string()),
        }
    }
}

/// Remote provider transport error type.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Connection could not be established or the request failed in flight.
    #[error("Request to random provider failed: {0}")]
    Connection(String),

    /// Provider answered with a non-success HTTP status.
    #[error("Request to random provider failed with status code {0}")]
    Status(u16),

    /// Request did not complete within the timeout.
    #[error("Request to random provider timed out: {0}")]
    Timeout(String),

    /// Response body could not be interpreted.
    #[error("Malformed provider response: {0}")]
    Malformed(String),

    /// Backend does not talk to a remote provider.
    #[error("Random provider unavailable")]
    Unavailable,
}

impl ProviderError {
    /// Whether this error is a transport failure (as opposed to a bad body).
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        !matches!(self, Self::Malformed(_))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Connection(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias using `ProviderError`.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::InvalidRange("test".to_string()).error_code(),
            ErrorCode::INVALID_RANGE
        );
        assert_eq!(AppError::MixedSyntax.error_code(), ErrorCode::MIXED_SYNTAX);
        assert_eq!(
            AppError::QuotaExceeded {
                requested_bytes: 1,
                remaining_bytes: 0
            }
            .error_code(),
            ErrorCode::QUOTA_EXCEEDED
        );
    }

    #[test]
    fn test_quota_exceeded_message() {
        let err = AppError::QuotaExceeded {
            requested_bytes: 1000,
            remaining_bytes: 62,
        };
        assert_eq!(
            err.to_string(),
            "Quota exceeded trying to generate 1000 bytes with only 62 bytes remaining"
        );
    }

    #[test]
    fn test_provider_error_conversion() {
        let err: AppError = ProviderError::Timeout("10s".to_string()).into();
        assert!(matches!(err, AppError::Timeout(_)));

        let err: AppError = ProviderError::Status(503).into();
        assert!(matches!(err, AppError::RemoteSource(_)));
        assert!(err.to_string().contains("503"));

        let err: AppError = ProviderError::Malformed("bad".to_string()).into();
        assert_eq!(err.error_code(), ErrorCode::REMOTE_SOURCE);
    }

    #[test]
    fn test_transport_classification() {
        assert!(ProviderError::Status(500).is_transport());
        assert!(ProviderError::Unavailable.is_transport());
        assert!(!ProviderError::Malformed(String::new()).is_transport());
    }
}
