//! Error code constants.
//!
//! Codes are attached to structured log lines, never to response bodies.
//! They are organized by category:
//! - 3xxx: Validation errors
//! - 4xxx: Resource errors
//! - 5xxx: Internal/System errors

/// Error code type with semantic categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(i32);

impl ErrorCode {
    // ===== Validation Errors (3xxx) =====

    /// Request body could not be parsed or converted.
    pub const MALFORMED_BODY: Self = Self(3001);

    /// A field value failed validation.
    pub const INVALID_FIELD: Self = Self(3002);

    /// A referenced entity does not exist.
    pub const INVALID_REFERENCE: Self = Self(3003);

    // ===== Resource Errors (4xxx) =====

    /// Entity not found.
    pub const NOT_FOUND: Self = Self(4001);

    // ===== Internal/System Errors (5xxx) =====

    /// Database error.
    pub const STORAGE_ERROR: Self = Self(5001);

    /// Internal server error.
    pub const INTERNAL_ERROR: Self = Self(5002);

    /// Get the error code as an i32.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Get the category of this error code.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self.0 {
            3000..=3999 => ErrorCategory::Validation,
            4000..=4999 => ErrorCategory::Resource,
            5000..=5999 => ErrorCategory::Internal,
            _ => ErrorCategory::Unknown,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error category based on error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Validation errors (3xxx).
    Validation,
    /// Resource errors (4xxx).
    Resource,
    /// Internal/system errors (5xxx).
    Internal,
    /// Unknown category.
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::Resource => write!(f, "resource"),
            Self::Internal => write!(f, "internal"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(
            ErrorCode::MALFORMED_BODY.category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            ErrorCode::INVALID_REFERENCE.category(),
            ErrorCategory::Validation
        );
        assert_eq!(ErrorCode::NOT_FOUND.category(), ErrorCategory::Resource);
        assert_eq!(
            ErrorCode::STORAGE_ERROR.category(),
            ErrorCategory::Internal
        );
        assert_eq!(ErrorCode(42).category(), ErrorCategory::Unknown);
        assert_eq!(ErrorCategory::Validation.to_string(), "validation");
    }
}
