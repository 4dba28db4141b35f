//! Core types for manifest processing
//!
//! This module contains the data structures shared by the loaders and
//! the analysis helpers: file formats, the on-disk document schema,
//! runtime configuration and summary statistics.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::app::models::{TestCase, VariantKind};
use crate::constants::naming;
use crate::errors::{ManifestError, ManifestResult};

/// On-disk manifest formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestFormat {
    /// `[[case]]` tables
    Toml,
    /// `{"case": [...]}` document
    Json,
    /// Harness spec file of `name = { INPUT : ..., EXODIFF : [...] }` records
    Legacy,
}

impl ManifestFormat {
    /// Infer the format from a file extension
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::UnknownFormat` for unrecognized extensions
    pub fn from_path(path: &Path) -> ManifestResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            Some("py") => Ok(Self::Legacy),
            _ => Err(ManifestError::UnknownFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

impl fmt::Display for ManifestFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Toml => "toml",
            Self::Json => "json",
            Self::Legacy => "legacy",
        };
        f.write_str(name)
    }
}

impl FromStr for ManifestFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "legacy" | "py" => Ok(Self::Legacy),
            other => Err(format!(
                "unknown manifest format '{}'. Expected toml, json or legacy",
                other
            )),
        }
    }
}

/// One record as written in a TOML or JSON manifest
///
/// Fields are optional so that a missing field surfaces as a malformed
/// record naming the case rather than a bare deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawCase {
    pub name: Option<String>,
    pub input: Option<String>,
    #[serde(default)]
    pub exodiff: Vec<String>,
}

impl RawCase {
    /// Convert into a test case, checking required fields
    pub fn into_case(self, position: usize) -> ManifestResult<TestCase> {
        let name = self
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| ManifestError::malformed(format!("#{}", position + 1), "missing name"))?;
        let input = self
            .input
            .ok_or_else(|| ManifestError::malformed(&name, "missing input file"))?;

        let case = TestCase::new(name, input, self.exodiff);
        case.validate()?;
        Ok(case)
    }
}

impl From<&TestCase> for RawCase {
    fn from(case: &TestCase) -> Self {
        Self {
            name: Some(case.name.clone()),
            input: Some(case.input_file.clone()),
            exodiff: case.expected_outputs.clone(),
        }
    }
}

/// Serialized manifest document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestDocument {
    /// Records in declaration order
    #[serde(rename = "case", default)]
    pub cases: Vec<RawCase>,
}

/// Runtime configuration for loading and resolving a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestConfig {
    /// Manifest file to load; `None` selects the built-in suite
    pub source: Option<PathBuf>,
    /// Explicit format; `None` infers from the file extension
    pub format: Option<ManifestFormat>,
    /// Subdirectory holding reference outputs
    pub gold_dir: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            source: None,
            format: None,
            gold_dir: naming::GOLD_DIR.to_string(),
        }
    }
}

/// Summary statistics about a manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManifestStats {
    /// Number of test cases
    pub total_cases: usize,
    /// Number of reference outputs across all cases
    pub total_expected_outputs: usize,
    /// Cases per decoded variant
    pub by_variant: BTreeMap<VariantKind, usize>,
    /// Base test numbers seen
    pub base_numbers: BTreeSet<u32>,
    /// Cases whose names do not follow the naming convention
    pub unconventional: usize,
}

impl ManifestStats {
    /// Number of cases of one variant
    pub fn variant_count(&self, kind: VariantKind) -> usize {
        self.by_variant.get(&kind).copied().unwrap_or(0)
    }

    /// Whether every base number has all four variants
    pub fn is_complete_matrix(&self) -> bool {
        self.unconventional == 0
            && VariantKind::all()
                .iter()
                .all(|kind| self.variant_count(*kind) == self.base_numbers.len())
    }
}
