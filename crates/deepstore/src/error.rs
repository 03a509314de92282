//! Error types for deepstore

use std::fmt;

/// Result type alias for deepstore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for strict store operations
///
/// The lenient path primitives never fail; these are only produced by the
/// `try_*` variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A path segment holds a value where a nested map was needed
    NotAMap {
        /// Path prefix that ends on the leaf value
        path: String,
    },

    /// Key is empty
    EmptyKey,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotAMap { path } => write!(f, "Not a map: '{}' holds a value", path),
            Error::EmptyKey => write!(f, "Key is empty"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::NotAMap { path: "a.b".to_string() };
        assert_eq!(err.to_string(), "Not a map: 'a.b' holds a value");
        assert_eq!(Error::EmptyKey.to_string(), "Key is empty");
    }
}
