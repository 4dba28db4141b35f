//! Error types for the moving-penetration test manifest
//!
//! This module defines the error types for manifest construction, lookup,
//! loading and configuration. Errors are designed to be actionable: a caller
//! either fixes the manifest or fails fast before any simulation runs.

use std::path::PathBuf;
use thiserror::Error;

/// Manifest construction, lookup and loading errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Two records share the same test name
    #[error("Duplicate test case name in manifest: {name}")]
    DuplicateKey { name: String },

    /// Lookup of a name that is not declared
    #[error("Test case not found: {name}")]
    NotFound { name: String },

    /// Record is missing its input file or has no expected outputs
    #[error("Malformed test case record '{name}': {reason}")]
    MalformedRecord { name: String, reason: String },

    /// Syntax error in a legacy spec file
    #[error("Invalid manifest syntax at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// Manifest file not found
    #[error("Manifest file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Format could not be inferred from the file name
    #[error("Cannot infer manifest format for {path}. Use --format to choose one")]
    UnknownFormat { path: PathBuf },

    /// TOML parsing error
    #[error("TOML parsing error in manifest")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON parsing or serialization error
    #[error("JSON error in manifest")]
    Json(#[from] serde_json::Error),

    /// I/O error reading or writing a manifest
    #[error("I/O error reading manifest")]
    Io(#[from] std::io::Error),
}

impl ManifestError {
    /// Build a malformed-record error for the given case name
    pub fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// Could not read the configuration file
    #[error("Failed to read configuration file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest error
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Manifest(ManifestError::NotFound { .. }) => "lookup",
            AppError::Manifest(_) => "manifest",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Manifest result type alias
pub type ManifestResult<T> = std::result::Result<T, ManifestError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let lookup = AppError::from(ManifestError::NotFound {
            name: "pl_test9".to_string(),
        });
        assert_eq!(lookup.category(), "lookup");

        let dup = AppError::from(ManifestError::DuplicateKey {
            name: "dup".to_string(),
        });
        assert_eq!(dup.category(), "manifest");

        assert_eq!(AppError::generic("boom").category(), "generic");
    }

    #[test]
    fn test_error_messages_name_the_case() {
        let err = ManifestError::malformed("pl_test2", "expected_outputs is empty");
        let message = err.to_string();
        assert!(message.contains("pl_test2"));
        assert!(message.contains("expected_outputs is empty"));
    }
}
