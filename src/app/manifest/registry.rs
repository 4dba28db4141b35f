//! The immutable test manifest
//!
//! A [`TestManifest`] is built once from a list of records and never
//! mutated afterwards. Construction checks record well-formedness and name
//! uniqueness; everything else is plain data.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::app::models::TestCase;
use crate::errors::{ManifestError, ManifestResult};

/// Ordered, name-indexed set of test cases
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestManifest {
    /// Cases in declaration order
    cases: Vec<TestCase>,
    /// Case name -> position in `cases`
    index: HashMap<String, usize>,
}

impl TestManifest {
    /// Build a manifest from records in declaration order
    ///
    /// # Errors
    ///
    /// - `ManifestError::MalformedRecord` if a record has no name, no input
    ///   file, or no expected outputs
    /// - `ManifestError::DuplicateKey` if two records share a name
    pub fn new(cases: Vec<TestCase>) -> ManifestResult<Self> {
        let mut index = HashMap::with_capacity(cases.len());

        for (position, case) in cases.iter().enumerate() {
            case.validate()?;
            if index.insert(case.name.clone(), position).is_some() {
                return Err(ManifestError::DuplicateKey {
                    name: case.name.clone(),
                });
            }
        }

        debug!("Built manifest with {} test cases", cases.len());
        Ok(Self { cases, index })
    }

    /// All test cases in declaration order
    pub fn list_cases(&self) -> &[TestCase] {
        &self.cases
    }

    /// Look up a test case by name
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::NotFound` if no case has this name
    pub fn get_case(&self, name: &str) -> ManifestResult<&TestCase> {
        trace!("Looking up test case {}", name);
        self.index
            .get(name)
            .map(|&position| &self.cases[position])
            .ok_or_else(|| ManifestError::NotFound {
                name: name.to_string(),
            })
    }

    /// Whether a case with this name is declared
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of test cases
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Whether the manifest declares no cases
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Case names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cases.iter().map(|case| case.name.as_str())
    }

    /// Iterate over cases in declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, TestCase> {
        self.cases.iter()
    }

    /// Consume the manifest, returning its records
    pub fn into_cases(self) -> Vec<TestCase> {
        self.cases
    }
}

impl<'a> IntoIterator for &'a TestManifest {
    type Item = &'a TestCase;
    type IntoIter = std::slice::Iter<'a, TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TryFrom<Vec<TestCase>> for TestManifest {
    type Error = ManifestError;

    fn try_from(cases: Vec<TestCase>) -> ManifestResult<Self> {
        Self::new(cases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn sample() -> TestManifest {
        TestManifest::new(vec![
            TestCase::conventional("pl_test1"),
            TestCase::conventional("pl_test1tt"),
            TestCase::new("contact", "contact.i", ["contact_out.e", "contact_out.csv"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_lookup_by_name() {
        let manifest = sample();
        let case = manifest.get_case("contact").unwrap();
        assert_eq!(case.input_file, "contact.i");
        assert_eq!(case.expected_outputs.len(), 2);
        assert!(manifest.contains("pl_test1tt"));
    }

    #[test]
    fn test_lookup_missing_name() {
        let manifest = sample();
        match manifest.get_case("nonexistent") {
            Err(ManifestError::NotFound { name }) => assert_eq!(name, "nonexistent"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = TestManifest::new(vec![
            TestCase::new("dup", "a.i", ["a_out.e"]),
            TestCase::new("dup", "b.i", ["b_out.e"]),
        ]);
        match result {
            Err(ManifestError::DuplicateKey { name }) => assert_eq!(name, "dup"),
            other => panic!("expected DuplicateKey, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_record_rejected() {
        let result = TestManifest::new(vec![
            TestCase::conventional("ok"),
            TestCase::new("empty", "empty.i", Vec::<String>::new()),
        ]);
        assert!(matches!(result, Err(ManifestError::MalformedRecord { .. })));
    }

    #[test]
    fn test_declaration_order_is_stable() {
        let manifest = sample();
        let first: Vec<&str> = manifest.names().collect();
        let second: Vec<&str> = manifest.names().collect();
        assert_eq!(first, vec!["pl_test1", "pl_test1tt", "contact"]);
        assert_eq!(first, second);
        assert_eq!(manifest.list_cases(), manifest.list_cases());
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = TestManifest::new(Vec::new()).unwrap();
        assert!(manifest.is_empty());
        assert_eq!(manifest.len(), 0);
        assert!(manifest.get_case("pl_test1").is_err());
    }

    #[test]
    fn test_shared_readers() {
        let manifest = Arc::new(sample());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let manifest = Arc::clone(&manifest);
                std::thread::spawn(move || manifest.get_case("pl_test1").unwrap().input_file.clone())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "pl_test1.i");
        }
    }
}
