//! Moving-penetration regression test manifest
//!
//! A Rust library describing the 2D moving-penetration regression tests of a
//! finite-element simulation harness: for each test, the simulation input deck
//! and the EXODIFF reference outputs its results are compared against.
//! The manifest is immutable once built and can be shared freely between readers.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use app::{moving_penetration, TestCase, TestManifest};
pub use errors::{AppError, ManifestError, Result};

#[cfg(test)]
mod tests {
    use super::*;
    use constants::*;

    #[test]
    fn test_constants_accessible() {
        assert_eq!(env::MANIFEST_FILE, "PL_MANIFEST_FILE");
        assert_eq!(naming::EXODIFF_SUFFIX, "_out.e");
        assert_eq!(suite::BASE_CASE_COUNT, 5);
    }

    #[test]
    fn test_error_types() {
        let app_error = AppError::from(ManifestError::DuplicateKey {
            name: "dup".to_string(),
        });
        assert_eq!(app_error.category(), "manifest");
    }
}
