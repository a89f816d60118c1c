//! Error types for the shim boundary

/// Result type for shim operations
pub type ShimResult<T> = Result<T, ShimError>;

/// Errors raised by boxed values, conversions and member enumeration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShimError {
    /// Array-aliasing box constructed with an index outside the backing array
    #[error("Index {index} out of range for array of length {len}")]
    IndexOutOfRange {
        /// Requested element index
        index: usize,
        /// Length of the backing array
        len: usize,
    },

    /// Operation not defined for this value's native width
    #[error("Not supported: {0}")]
    NotSupported(String),

    /// Caller passed an invalid or incompatible argument
    #[error("Argument error: {0}")]
    Argument(String),

    /// Request the host platform cannot express
    #[error("Platform not supported: {0}")]
    PlatformNotSupported(String),

    /// Conversion the origin type system never allows
    #[error("Invalid cast: {0}")]
    InvalidCast(String),

    /// Conversion result does not fit the target type
    #[error("Overflow: {0}")]
    Overflow(String),

    /// Bad numeric format string
    #[error("Format error: {0}")]
    Format(String),
}

impl ShimError {
    /// Unsupported-width error for `operation` on a value of type `type_name`
    pub fn not_supported(operation: &str, type_name: &str) -> Self {
        ShimError::NotSupported(format!("{} on {}", operation, type_name))
    }

    /// Overflow error for a conversion into `target`
    pub fn overflow(target: &str) -> Self {
        ShimError::Overflow(format!("Value was either too large or too small for {}", target))
    }

    /// Invalid cast from `from` into `to`
    pub fn invalid_cast(from: &str, to: &str) -> Self {
        ShimError::InvalidCast(format!("Invalid cast from '{}' to '{}'", from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_out_of_range_message() {
        let err = ShimError::IndexOutOfRange { index: 7, len: 3 };
        assert_eq!(err.to_string(), "Index 7 out of range for array of length 3");
    }

    #[test]
    fn test_helper_constructors() {
        assert_eq!(
            ShimError::not_supported("volatile read", "SByte"),
            ShimError::NotSupported("volatile read on SByte".to_string())
        );
        assert!(matches!(ShimError::overflow("Byte"), ShimError::Overflow(_)));
        assert_eq!(
            ShimError::invalid_cast("Single", "DateTime").to_string(),
            "Invalid cast: Invalid cast from 'Single' to 'DateTime'"
        );
    }
}
