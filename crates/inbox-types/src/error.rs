//! Error types shared across inbox indexing crates.

use thiserror::Error;

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum TypesError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TypesError::Config("index_version must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: index_version must be > 0"
        );
    }
}
