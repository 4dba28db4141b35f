//! Test manifest registry, loaders and analysis
//!
//! This module holds the immutable registry of simulation regression tests
//! consumed by the external harness: each test names an input deck and the
//! EXODIFF reference outputs its results are compared against.
//!
//! # Module Organization
//!
//! - [`registry`] - The immutable, name-indexed [`TestManifest`]
//! - [`suite`] - The built-in 2D moving-penetration suite
//! - [`types`] - Formats, document schema, configuration and statistics
//! - [`loader`] - Reading and writing TOML, JSON and legacy spec files
//! - [`legacy`] - Parser for legacy harness spec files
//! - [`analysis`] - Variant summaries, filtering and path resolution
//!
//! # Examples
//!
//! ```rust
//! use pl_manifest::app::manifest::suite;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manifest = suite::moving_penetration()?;
//! let case = manifest.get_case("pl_test3qtt")?;
//! assert_eq!(case.input_file, "pl_test3qtt.i");
//! assert_eq!(case.expected_outputs, vec!["pl_test3qtt_out.e".to_string()]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Loading a manifest file
//!
//! ```rust,no_run
//! use pl_manifest::app::manifest::load_manifest;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manifest = load_manifest("tests/2d_moving_penetration_tests/tests.toml", None).await?;
//! for case in manifest.list_cases() {
//!     println!("{} -> {:?}", case.input_file, case.expected_outputs);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod legacy;
pub mod loader;
pub mod registry;
pub mod suite;
pub mod types;

#[cfg(test)]
pub mod tests;

pub use analysis::{filter_cases, resolve_all, summarize, CaseFilter, ResolvedCase};
pub use legacy::{parse_legacy_cases, parse_legacy_manifest};
pub use loader::{
    load_configured, load_manifest, parse_manifest, render_manifest, save_manifest, to_json,
    to_toml,
};
pub use registry::TestManifest;
pub use types::{ManifestConfig, ManifestDocument, ManifestFormat, ManifestStats, RawCase};
