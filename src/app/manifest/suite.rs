//! Built-in moving-penetration suite
//!
//! Five basic tests of the penetration locator on a moving mesh. The
//! baseline cases use linear quad4 elements; `q` variants use quadratic
//! quad8 elements and `tt` variants use a nonzero tangential tolerance.

use crate::app::manifest::registry::TestManifest;
use crate::app::models::TestCase;
use crate::errors::ManifestResult;

/// Directory name of the suite in the harness test tree
pub const SUITE_NAME: &str = "2d_moving_penetration_tests";

/// Declared records as (name, input, reference outputs)
const CASES: [(&str, &str, &[&str]); 20] = [
    ("pl_test1", "pl_test1.i", &["pl_test1_out.e"]),
    ("pl_test1tt", "pl_test1tt.i", &["pl_test1tt_out.e"]),
    ("pl_test1q", "pl_test1q.i", &["pl_test1q_out.e"]),
    ("pl_test1qtt", "pl_test1qtt.i", &["pl_test1qtt_out.e"]),
    ("pl_test2", "pl_test2.i", &["pl_test2_out.e"]),
    ("pl_test2tt", "pl_test2tt.i", &["pl_test2tt_out.e"]),
    ("pl_test2q", "pl_test2q.i", &["pl_test2q_out.e"]),
    ("pl_test2qtt", "pl_test2qtt.i", &["pl_test2qtt_out.e"]),
    ("pl_test3", "pl_test3.i", &["pl_test3_out.e"]),
    ("pl_test3tt", "pl_test3tt.i", &["pl_test3tt_out.e"]),
    ("pl_test3q", "pl_test3q.i", &["pl_test3q_out.e"]),
    ("pl_test3qtt", "pl_test3qtt.i", &["pl_test3qtt_out.e"]),
    ("pl_test4", "pl_test4.i", &["pl_test4_out.e"]),
    ("pl_test4tt", "pl_test4tt.i", &["pl_test4tt_out.e"]),
    ("pl_test4q", "pl_test4q.i", &["pl_test4q_out.e"]),
    ("pl_test4qtt", "pl_test4qtt.i", &["pl_test4qtt_out.e"]),
    ("pl_test5", "pl_test5.i", &["pl_test5_out.e"]),
    ("pl_test5tt", "pl_test5tt.i", &["pl_test5tt_out.e"]),
    ("pl_test5q", "pl_test5q.i", &["pl_test5q_out.e"]),
    ("pl_test5qtt", "pl_test5qtt.i", &["pl_test5qtt_out.e"]),
];

/// Records of the built-in suite in declaration order
pub fn moving_penetration_cases() -> Vec<TestCase> {
    CASES
        .iter()
        .map(|(name, input, outputs)| TestCase::new(*name, *input, outputs.iter().copied()))
        .collect()
}

/// The built-in suite as a validated manifest
pub fn moving_penetration() -> ManifestResult<TestManifest> {
    TestManifest::new(moving_penetration_cases())
}
