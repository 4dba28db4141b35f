//! Data models for the moving-penetration manifest
//!
//! This module defines the core records of the manifest: one [`TestCase`]
//! per simulation regression test, plus the descriptive [`CaseVariant`]
//! decoding of the suite's naming convention.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::naming;
use crate::errors::{ManifestError, ManifestResult};

/// One simulation regression test
///
/// The external harness runs the simulation on `input_file` and diffs each
/// produced artifact against the matching entry of `expected_outputs`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TestCase {
    /// Unique test name (e.g., "pl_test1qtt")
    pub name: String,
    /// Simulation input deck (e.g., "pl_test1qtt.i")
    #[serde(rename = "input")]
    pub input_file: String,
    /// Reference outputs compared by EXODIFF, in order
    #[serde(rename = "exodiff")]
    pub expected_outputs: Vec<String>,
}

impl TestCase {
    /// Create a test case from its parts
    pub fn new<I, S>(name: impl Into<String>, input_file: impl Into<String>, outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            input_file: input_file.into(),
            expected_outputs: outputs.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a test case following the `<name>.i` / `<name>_out.e` convention
    pub fn conventional(name: &str) -> Self {
        Self::new(
            name,
            format!("{}{}", name, naming::INPUT_EXTENSION),
            [format!("{}{}", name, naming::EXODIFF_SUFFIX)],
        )
    }

    /// Check that the record carries everything the harness needs
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::MalformedRecord` if the name or input file is
    /// blank, or if there are no expected outputs.
    pub fn validate(&self) -> ManifestResult<()> {
        if self.name.trim().is_empty() {
            return Err(ManifestError::malformed(&self.name, "name is empty"));
        }
        if self.input_file.trim().is_empty() {
            return Err(ManifestError::malformed(&self.name, "input_file is empty"));
        }
        if self.expected_outputs.is_empty() {
            return Err(ManifestError::malformed(
                &self.name,
                "expected_outputs is empty",
            ));
        }
        if self.expected_outputs.iter().any(|o| o.trim().is_empty()) {
            return Err(ManifestError::malformed(
                &self.name,
                "expected_outputs contains an empty file name",
            ));
        }
        Ok(())
    }

    /// Decode the naming convention, if the name follows it
    pub fn variant(&self) -> Option<CaseVariant> {
        CaseVariant::from_name(&self.name)
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} -> {})",
            self.name,
            self.input_file,
            self.expected_outputs.join(", ")
        )
    }
}

/// The four variants exercised by each base case
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
    /// Linear quad4 elements, zero tangential tolerance
    Linear,
    /// Linear quad4 elements, nonzero tangential tolerance
    LinearTt,
    /// Quadratic quad8 elements, zero tangential tolerance
    Quadratic,
    /// Quadratic quad8 elements, nonzero tangential tolerance
    QuadraticTt,
}

impl VariantKind {
    /// All variants in suite declaration order
    pub fn all() -> [VariantKind; 4] {
        [
            Self::Linear,
            Self::LinearTt,
            Self::Quadratic,
            Self::QuadraticTt,
        ]
    }

    /// Build from the two convention flags
    pub fn from_flags(quadratic: bool, tangential_tolerance: bool) -> Self {
        match (quadratic, tangential_tolerance) {
            (false, false) => Self::Linear,
            (false, true) => Self::LinearTt,
            (true, false) => Self::Quadratic,
            (true, true) => Self::QuadraticTt,
        }
    }

    /// Name suffix for this variant (e.g., "qtt")
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Linear => "",
            Self::LinearTt => "tt",
            Self::Quadratic => "q",
            Self::QuadraticTt => "qtt",
        }
    }

    /// Parse a name suffix
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::all().into_iter().find(|kind| kind.suffix() == suffix)
    }

    /// Whether this variant uses quadratic elements
    pub fn is_quadratic(&self) -> bool {
        matches!(self, Self::Quadratic | Self::QuadraticTt)
    }

    /// Whether this variant uses a nonzero tangential tolerance
    pub fn has_tangential_tolerance(&self) -> bool {
        matches!(self, Self::LinearTt | Self::QuadraticTt)
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Linear => "linear",
            Self::LinearTt => "linear+tt",
            Self::Quadratic => "quadratic",
            Self::QuadraticTt => "quadratic+tt",
        };
        f.write_str(label)
    }
}

/// Descriptive decoding of a `pl_test<N>[q][tt]` name
///
/// This is documentation of the convention only. Names that do not follow
/// it are still valid test cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseVariant {
    /// Base test number (1-5 in the built-in suite)
    pub base: u32,
    /// Variant kind decoded from the suffix
    pub kind: VariantKind,
}

impl CaseVariant {
    /// Decode a test name
    ///
    /// # Example
    ///
    /// ```
    /// use pl_manifest::app::models::{CaseVariant, VariantKind};
    ///
    /// let variant = CaseVariant::from_name("pl_test3qtt").unwrap();
    /// assert_eq!(variant.base, 3);
    /// assert_eq!(variant.kind, VariantKind::QuadraticTt);
    /// assert!(CaseVariant::from_name("contact_patch").is_none());
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        let rest = name.strip_prefix(naming::CASE_PREFIX)?;
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits_end == 0 {
            return None;
        }

        let base = rest[..digits_end].parse().ok()?;
        let kind = VariantKind::from_suffix(&rest[digits_end..])?;
        Some(Self { base, kind })
    }

    /// Rebuild the conventional case name
    pub fn case_name(&self) -> String {
        format!("{}{}{}", naming::CASE_PREFIX, self.base, self.kind.suffix())
    }

    /// Whether the variant uses quadratic elements
    pub fn quadratic(&self) -> bool {
        self.kind.is_quadratic()
    }

    /// Whether the variant uses a nonzero tangential tolerance
    pub fn tangential_tolerance(&self) -> bool {
        self.kind.has_tangential_tolerance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conventional_case() {
        let case = TestCase::conventional("pl_test1");
        assert_eq!(case.input_file, "pl_test1.i");
        assert_eq!(case.expected_outputs, vec!["pl_test1_out.e".to_string()]);
        assert!(case.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_parts() {
        let no_input = TestCase::new("a", "", ["a_out.e"]);
        assert!(matches!(
            no_input.validate(),
            Err(ManifestError::MalformedRecord { .. })
        ));

        let no_outputs = TestCase::new("b", "b.i", Vec::<String>::new());
        assert!(matches!(
            no_outputs.validate(),
            Err(ManifestError::MalformedRecord { .. })
        ));

        let blank_output = TestCase::new("c", "c.i", [" "]);
        assert!(blank_output.validate().is_err());

        let unnamed = TestCase::new("  ", "x.i", ["x_out.e"]);
        assert!(unnamed.validate().is_err());
    }

    #[test]
    fn test_variant_decoding() {
        let cases = [
            ("pl_test1", 1, VariantKind::Linear),
            ("pl_test2tt", 2, VariantKind::LinearTt),
            ("pl_test4q", 4, VariantKind::Quadratic),
            ("pl_test5qtt", 5, VariantKind::QuadraticTt),
        ];

        for (name, base, kind) in cases {
            let variant = CaseVariant::from_name(name).unwrap();
            assert_eq!(variant.base, base, "{}", name);
            assert_eq!(variant.kind, kind, "{}", name);
            assert_eq!(variant.case_name(), name);
        }
    }

    #[test]
    fn test_variant_decoding_rejects_other_names() {
        assert!(CaseVariant::from_name("pl_test").is_none());
        assert!(CaseVariant::from_name("pl_testq").is_none());
        assert!(CaseVariant::from_name("pl_test1ttq").is_none());
        assert!(CaseVariant::from_name("dup").is_none());
    }

    #[test]
    fn test_variant_flags() {
        for kind in VariantKind::all() {
            assert_eq!(
                VariantKind::from_flags(kind.is_quadratic(), kind.has_tangential_tolerance()),
                kind
            );
        }
        assert_eq!(VariantKind::from_suffix("qtt"), Some(VariantKind::QuadraticTt));
        assert_eq!(VariantKind::from_suffix("x"), None);
    }

    #[test]
    fn test_case_serializes_with_harness_keys() {
        let case = TestCase::conventional("pl_test1tt");
        let json = serde_json::to_value(&case).unwrap();
        assert_eq!(json["input"], "pl_test1tt.i");
        assert_eq!(json["exodiff"][0], "pl_test1tt_out.e");
    }
}
