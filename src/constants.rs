//! Application constants for the moving-penetration manifest
//!
//! This module centralizes the constants used throughout the crate,
//! organized by functional domain.

/// Environment variable names
pub mod env {
    /// Overrides the manifest file to load instead of the built-in suite
    pub const MANIFEST_FILE: &str = "PL_MANIFEST_FILE";

    /// Overrides the configured log level
    pub const LOG_LEVEL: &str = "PL_MANIFEST_LOG";
}

/// Naming conventions shared by the harness and the suite
pub mod naming {
    /// Prefix of every case in the moving-penetration suite
    pub const CASE_PREFIX: &str = "pl_test";

    /// Extension of simulation input decks
    pub const INPUT_EXTENSION: &str = ".i";

    /// Suffix appended to a case name for its Exodus reference output
    pub const EXODIFF_SUFFIX: &str = "_out.e";

    /// Suffix marking a nonzero tangential tolerance variant
    pub const TANGENTIAL_TOLERANCE_SUFFIX: &str = "tt";

    /// Suffix marking a quadratic (quad8) element variant
    pub const QUADRATIC_SUFFIX: &str = "q";

    /// Directory under a test directory holding reference outputs
    pub const GOLD_DIR: &str = "gold";
}

/// Legacy harness spec file keys
pub mod legacy {
    /// Key naming the simulation input file
    pub const INPUT_KEY: &str = "INPUT";

    /// Key naming the reference output list
    pub const EXODIFF_KEY: &str = "EXODIFF";
}

/// Configuration file locations
pub mod config {
    /// Project-local config file name
    pub const LOCAL_FILE: &str = "pl-manifest.toml";

    /// Generic project-local config file name
    pub const FALLBACK_FILE: &str = "config.toml";

    /// Directory name under the user config directory
    pub const APP_DIR: &str = "pl-manifest";
}

/// Built-in suite shape
pub mod suite {
    /// Number of base cases in the moving-penetration suite
    pub const BASE_CASE_COUNT: u32 = 5;

    /// Variant suffixes in declaration order
    pub const VARIANT_SUFFIXES: [&str; 4] = ["", "tt", "q", "qtt"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suite_shape() {
        assert_eq!(
            suite::BASE_CASE_COUNT as usize * suite::VARIANT_SUFFIXES.len(),
            20
        );
        assert_eq!(
            format!(
                "{}{}",
                naming::QUADRATIC_SUFFIX,
                naming::TANGENTIAL_TOLERANCE_SUFFIX
            ),
            suite::VARIANT_SUFFIXES[3]
        );
    }
}
