//! Manifest analysis and filtering
//!
//! Summaries and filters over the naming convention, plus path resolution
//! against a test directory for harness consumers. Nothing here reads the
//! filesystem.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use super::registry::TestManifest;
use super::types::ManifestStats;
use crate::app::models::TestCase;

/// Summarize a manifest by decoded variant
pub fn summarize(manifest: &TestManifest) -> ManifestStats {
    let mut stats = ManifestStats {
        total_cases: manifest.len(),
        ..Default::default()
    };

    for case in manifest {
        stats.total_expected_outputs += case.expected_outputs.len();
        match case.variant() {
            Some(variant) => {
                *stats.by_variant.entry(variant.kind).or_insert(0) += 1;
                stats.base_numbers.insert(variant.base);
            }
            None => stats.unconventional += 1,
        }
    }

    stats
}

/// Selection criteria for test cases
///
/// Unset fields match everything. Convention-based criteria never match
/// cases whose names do not decode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseFilter {
    /// Base test number
    pub base: Option<u32>,
    /// Quadratic (`true`) or linear (`false`) elements
    pub quadratic: Option<bool>,
    /// Nonzero (`true`) or zero (`false`) tangential tolerance
    pub tangential_tolerance: Option<bool>,
    /// Substring of the case name
    pub name_contains: Option<String>,
}

impl CaseFilter {
    /// Whether any criterion is set
    pub fn is_active(&self) -> bool {
        self.base.is_some()
            || self.quadratic.is_some()
            || self.tangential_tolerance.is_some()
            || self.name_contains.is_some()
    }

    /// Whether a case satisfies every set criterion
    pub fn matches(&self, case: &TestCase) -> bool {
        if let Some(fragment) = &self.name_contains {
            if !case.name.contains(fragment.as_str()) {
                return false;
            }
        }

        let needs_variant =
            self.base.is_some() || self.quadratic.is_some() || self.tangential_tolerance.is_some();
        if !needs_variant {
            return true;
        }

        let Some(variant) = case.variant() else {
            return false;
        };
        self.base.map_or(true, |base| variant.base == base)
            && self.quadratic.map_or(true, |q| variant.quadratic() == q)
            && self
                .tangential_tolerance
                .map_or(true, |tt| variant.tangential_tolerance() == tt)
    }
}

/// Cases matching a filter, in declaration order
pub fn filter_cases<'a>(manifest: &'a TestManifest, filter: &CaseFilter) -> Vec<&'a TestCase> {
    let selected: Vec<&TestCase> = manifest.iter().filter(|case| filter.matches(case)).collect();
    debug!(
        "Filter selected {} of {} test cases",
        selected.len(),
        manifest.len()
    );
    selected
}

/// A test case with its files placed under a test directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCase {
    /// Test name
    pub name: String,
    /// Input deck path
    pub input_path: PathBuf,
    /// Reference output paths, in declaration order
    pub reference_paths: Vec<PathBuf>,
}

impl ResolvedCase {
    /// Place a case's files under `test_dir`, with references in `gold_dir`
    ///
    /// An empty `gold_dir` keeps references alongside the input.
    pub fn resolve(case: &TestCase, test_dir: &Path, gold_dir: &str) -> Self {
        let reference_root = if gold_dir.is_empty() {
            test_dir.to_path_buf()
        } else {
            test_dir.join(gold_dir)
        };

        Self {
            name: case.name.clone(),
            input_path: test_dir.join(&case.input_file),
            reference_paths: case
                .expected_outputs
                .iter()
                .map(|output| reference_root.join(output))
                .collect(),
        }
    }
}

/// Resolve every case of a manifest
pub fn resolve_all(manifest: &TestManifest, test_dir: &Path, gold_dir: &str) -> Vec<ResolvedCase> {
    manifest
        .iter()
        .map(|case| ResolvedCase::resolve(case, test_dir, gold_dir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::manifest::suite::moving_penetration;
    use crate::app::models::VariantKind;

    #[test]
    fn test_summary_of_builtin_suite() {
        let stats = summarize(&moving_penetration().unwrap());
        assert_eq!(stats.total_cases, 20);
        assert_eq!(stats.total_expected_outputs, 20);
        assert_eq!(stats.base_numbers.len(), 5);
        assert_eq!(stats.unconventional, 0);
        for kind in VariantKind::all() {
            assert_eq!(stats.variant_count(kind), 5);
        }
        assert!(stats.is_complete_matrix());
    }

    #[test]
    fn test_summary_counts_unconventional_names() {
        let manifest = TestManifest::new(vec![
            TestCase::conventional("pl_test1"),
            TestCase::conventional("sliding_block"),
        ])
        .unwrap();
        let stats = summarize(&manifest);
        assert_eq!(stats.unconventional, 1);
        assert_eq!(stats.variant_count(VariantKind::Linear), 1);
        assert!(!stats.is_complete_matrix());
    }

    #[test]
    fn test_filter_by_variant_flags() {
        let manifest = moving_penetration().unwrap();

        let quadratic_tt = CaseFilter {
            quadratic: Some(true),
            tangential_tolerance: Some(true),
            ..Default::default()
        };
        let names: Vec<&str> = filter_cases(&manifest, &quadratic_tt)
            .iter()
            .map(|case| case.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["pl_test1qtt", "pl_test2qtt", "pl_test3qtt", "pl_test4qtt", "pl_test5qtt"]
        );

        let base_two = CaseFilter {
            base: Some(2),
            ..Default::default()
        };
        assert_eq!(filter_cases(&manifest, &base_two).len(), 4);
    }

    #[test]
    fn test_filter_by_name_fragment() {
        let manifest = TestManifest::new(vec![
            TestCase::conventional("pl_test1"),
            TestCase::conventional("sliding_block"),
        ])
        .unwrap();

        let filter = CaseFilter {
            name_contains: Some("block".to_string()),
            ..Default::default()
        };
        assert!(filter.is_active());
        assert_eq!(filter_cases(&manifest, &filter).len(), 1);

        let linear = CaseFilter {
            quadratic: Some(false),
            ..Default::default()
        };
        let selected = filter_cases(&manifest, &linear);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "pl_test1");
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let manifest = moving_penetration().unwrap();
        let filter = CaseFilter::default();
        assert!(!filter.is_active());
        assert_eq!(filter_cases(&manifest, &filter).len(), manifest.len());
    }

    #[test]
    fn test_resolve_paths() {
        let case = TestCase::conventional("pl_test4q");
        let dir = Path::new("tests/2d_moving_penetration_tests");

        let resolved = ResolvedCase::resolve(&case, dir, "gold");
        assert_eq!(resolved.input_path, dir.join("pl_test4q.i"));
        assert_eq!(
            resolved.reference_paths,
            vec![dir.join("gold").join("pl_test4q_out.e")]
        );

        let flat = ResolvedCase::resolve(&case, dir, "");
        assert_eq!(flat.reference_paths, vec![dir.join("pl_test4q_out.e")]);
    }

    #[test]
    fn test_resolve_all_keeps_order() {
        let manifest = moving_penetration().unwrap();
        let resolved = resolve_all(&manifest, Path::new("."), "gold");
        assert_eq!(resolved.len(), 20);
        assert_eq!(resolved[0].name, "pl_test1");
        assert_eq!(resolved[19].name, "pl_test5qtt");
    }
}
