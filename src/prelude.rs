//! Prelude module for the manifest library
//!
//! Re-exports the items needed for typical usage with a single
//! `use pl_manifest::prelude::*;` statement.
//!
//! # Usage
//!
//! ```rust
//! use pl_manifest::prelude::*;
//!
//! fn main() -> std::result::Result<(), ManifestError> {
//!     let manifest = moving_penetration()?;
//!     let case = manifest.get_case("pl_test1")?;
//!     assert_eq!(case.input_file, "pl_test1.i");
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, ManifestError, ManifestResult, Result};

pub use crate::app::{
    // Data types
    CaseVariant,
    TestCase,
    TestManifest,
    VariantKind,

    // Loading and configuration
    load_configured,
    load_manifest,
    moving_penetration,
    ManifestConfig,
    ManifestFormat,

    // Analysis
    filter_cases,
    summarize,
    CaseFilter,
    ManifestStats,
    ResolvedCase,
};
