//! Error code constants.
//!
//! Error codes are organized by category:
//! - 1xxx: Validation errors
//! - 2xxx: Range expression errors
//! - 3xxx: Remote source errors
//! - 4xxx: Quota and timeout errors
//! - 5xxx: Internal/System errors

/// Error code type with semantic categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(i32);

impl ErrorCode {
    // ===== Validation Errors (1xxx) =====

    /// Numeric bounds are contradictory or too narrow for a unique draw.
    pub const INVALID_RANGE: Self = Self(1001);

    /// No choices to draw from.
    pub const EMPTY_CHOICES: Self = Self(1002);

    /// Invalid argument value.
    pub const INVALID_ARGUMENT: Self = Self(1003);

    /// Choice value is not a primitive scalar.
    pub const UNSUPPORTED_VALUE_TYPE: Self = Self(1004);

    /// Requested string length is out of range.
    pub const LENGTH_OUT_OF_RANGE: Self = Self(1005);

    /// Alphabet too small for a unique string.
    pub const INSUFFICIENT_ALPHABET: Self = Self(1006);

    // ===== Range Expression Errors (2xxx) =====

    /// Range notation mixed with comparison operators.
    pub const MIXED_SYNTAX: Self = Self(2001);

    /// Unparsable term or modifier.
    pub const INVALID_EXPRESSION: Self = Self(2002);

    // ===== Remote Source Errors (3xxx) =====

    /// Remote provider failed or answered with a malformed body.
    pub const REMOTE_SOURCE: Self = Self(3001);

    // ===== Quota/Timeout Errors (4xxx) =====

    /// Remote quota too small for the request.
    pub const QUOTA_EXCEEDED: Self = Self(4001);

    /// Transport or unique-draw timeout.
    pub const TIMEOUT: Self = Self(4002);

    // ===== Internal/System Errors (5xxx) =====

    /// Invalid configuration.
    pub const CONFIG_ERROR: Self = Self(5001);

    /// Get the error code as an i32.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Get the category of this error code.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self.0 {
            1000..=1999 => ErrorCategory::Validation,
            2000..=2999 => ErrorCategory::Expression,
            3000..=3999 => ErrorCategory::Remote,
            4000..=4999 => ErrorCategory::Exhausted,
            5000..=5999 => ErrorCategory::Internal,
            _ => ErrorCategory::Unknown,
        }
    }

    /// Process exit code used by the command line for this error.
    ///
    /// Follows the BSD `sysexits.h` conventions.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::Expression => 64,
            ErrorCategory::Remote => 69,
            ErrorCategory::Exhausted => 75,
            ErrorCategory::Internal => 78,
            ErrorCategory::Unknown => 1,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code.0
    }
}

/// Error category based on error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller input errors (1xxx).
    Validation,
    /// Range expression errors (2xxx).
    Expression,
    /// Remote provider errors (3xxx).
    Remote,
    /// Quota or time budget exhausted (4xxx).
    Exhausted,
    /// Internal/system errors (5xxx).
    Internal,
    /// Unknown category.
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::Expression => write!(f, "expression"),
            Self::Remote => write!(f, "remote"),
            Self::Exhausted => write!(f, "exhausted"),
            Self::Internal => write!(f, "internal"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::INVALID_RANGE.as_i32(), 1001);
        assert_eq!(ErrorCode::MIXED_SYNTAX.as_i32(), 2001);
        assert_eq!(ErrorCode::REMOTE_SOURCE.as_i32(), 3001);
        assert_eq!(ErrorCode::QUOTA_EXCEEDED.as_i32(), 4001);
        assert_eq!(ErrorCode::CONFIG_ERROR.as_i32(), 5001);
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            ErrorCode::INSUFFICIENT_ALPHABET.category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            ErrorCode::INVALID_EXPRESSION.category(),
            ErrorCategory::Expression
        );
        assert_eq!(ErrorCode::REMOTE_SOURCE.category(), ErrorCategory::Remote);
        assert_eq!(ErrorCode::TIMEOUT.category(), ErrorCategory::Exhausted);
        assert_eq!(ErrorCode(42).category(), ErrorCategory::Unknown);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ErrorCode::EMPTY_CHOICES.exit_code(), 64);
        assert_eq!(ErrorCode::MIXED_SYNTAX.exit_code(), 64);
        assert_eq!(ErrorCode::REMOTE_SOURCE.exit_code(), 69);
        assert_eq!(ErrorCode::QUOTA_EXCEEDED.exit_code(), 75);
        assert_eq!(ErrorCode::CONFIG_ERROR.exit_code(), 78);
    }
}
