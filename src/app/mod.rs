//! Core application logic for the moving-penetration manifest
//!
//! This module contains the test case data model and the manifest registry
//! with its loaders and analysis helpers.
//!
//! # Examples
//!
//! ```rust
//! use pl_manifest::app::{moving_penetration, CaseFilter, filter_cases};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manifest = moving_penetration()?;
//!
//! let quadratic = CaseFilter {
//!     quadratic: Some(true),
//!     ..Default::default()
//! };
//! for case in filter_cases(&manifest, &quadratic) {
//!     println!("{} -> {:?}", case.input_file, case.expected_outputs);
//! }
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod manifest;
pub mod models;

// Re-export main public API
pub use manifest::suite::{moving_penetration, SUITE_NAME};
pub use manifest::{
    filter_cases, load_configured, load_manifest, parse_manifest, resolve_all, save_manifest,
    summarize, CaseFilter, ManifestConfig, ManifestFormat, ManifestStats, ResolvedCase,
    TestManifest,
};
pub use models::{CaseVariant, TestCase, VariantKind};
