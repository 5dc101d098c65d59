//! Catalog error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or querying the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Category not found: {id}")]
    NotFound { id: String },

    #[error("Failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog entry from {origin}")]
    Parse {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid catalog filename: {path}")]
    InvalidFilename { path: PathBuf },

    #[error("Catalog validation failed with {count} error(s), first: {first}")]
    Invalid { count: usize, first: String },
}

impl CatalogError {
    /// Check if this is a lookup miss rather than a load failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = CatalogError::NotFound {
            id: "nonexistent-category".to_string(),
        };
        assert!(err.is_not_found());
        assert!(err.to_string().contains("nonexistent-category"));
    }

    #[test]
    fn test_invalid_is_not_lookup_miss() {
        let err = CatalogError::Invalid {
            count: 2,
            first: "writing: template references unknown field [mood]".to_string(),
        };
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("2 error(s)"));
    }
}
