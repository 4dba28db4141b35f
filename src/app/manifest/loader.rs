//! Loading and saving manifest files
//!
//! The registry itself never touches the filesystem; this module is the
//! only place where manifests are read from or written to disk.

use std::path::Path;

use tracing::{debug, info};

use super::legacy::{is_identifier, parse_legacy_manifest, quote_string};
use super::registry::TestManifest;
use super::suite;
use super::types::{ManifestConfig, ManifestDocument, ManifestFormat, RawCase};
use crate::errors::{ManifestError, ManifestResult};

/// Parse manifest text in the given format
pub fn parse_manifest(content: &str, format: ManifestFormat) -> ManifestResult<TestManifest> {
    let document: ManifestDocument = match format {
        ManifestFormat::Legacy => return parse_legacy_manifest(content),
        ManifestFormat::Toml => toml::from_str(content)?,
        ManifestFormat::Json => serde_json::from_str(content)?,
    };

    let cases = document
        .cases
        .into_iter()
        .enumerate()
        .map(|(position, raw)| raw.into_case(position))
        .collect::<ManifestResult<Vec<_>>>()?;

    TestManifest::new(cases)
}

/// Load a manifest file
///
/// The format is taken from `format` when given, otherwise inferred from
/// the file extension.
///
/// # Errors
///
/// - `ManifestError::FileNotFound` if the file does not exist
/// - `ManifestError::UnknownFormat` if no format was given and none can be inferred
/// - Parse and validation errors from the chosen format
pub async fn load_manifest<P: AsRef<Path>>(
    path: P,
    format: Option<ManifestFormat>,
) -> ManifestResult<TestManifest> {
    let path = path.as_ref();
    let format = match format {
        Some(format) => format,
        None => ManifestFormat::from_path(path)?,
    };

    if !tokio::fs::try_exists(path).await? {
        return Err(ManifestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    debug!("Loading {} manifest from {}", format, path.display());
    let content = tokio::fs::read_to_string(path).await?;
    let manifest = parse_manifest(&content, format)?;

    info!(
        "Loaded {} test cases from {}",
        manifest.len(),
        path.display()
    );
    Ok(manifest)
}

/// Resolve the manifest selected by a configuration
///
/// Uses the configured file when there is one, otherwise the built-in
/// moving-penetration suite.
pub async fn load_configured(config: &ManifestConfig) -> ManifestResult<TestManifest> {
    match &config.source {
        Some(path) => load_manifest(path, config.format).await,
        None => {
            debug!("Using built-in {} suite", suite::SUITE_NAME);
            suite::moving_penetration()
        }
    }
}

/// Build the serializable document for a manifest
pub fn to_document(manifest: &TestManifest) -> ManifestDocument {
    ManifestDocument {
        cases: manifest.iter().map(RawCase::from).collect(),
    }
}

/// Serialize a manifest as TOML `[[case]]` tables
pub fn to_toml(manifest: &TestManifest) -> ManifestResult<String> {
    Ok(toml::to_string_pretty(&to_document(manifest))?)
}

/// Serialize a manifest as pretty JSON
pub fn to_json(manifest: &TestManifest) -> ManifestResult<String> {
    Ok(serde_json::to_string_pretty(&to_document(manifest))?)
}

/// Serialize a manifest in the given format
pub fn render_manifest(manifest: &TestManifest, format: ManifestFormat) -> ManifestResult<String> {
    match format {
        ManifestFormat::Toml => to_toml(manifest),
        ManifestFormat::Json => to_json(manifest),
        ManifestFormat::Legacy => to_legacy(manifest),
    }
}

/// Serialize a manifest as a legacy harness spec file
///
/// Fails with `MalformedRecord` if a name cannot be written as a legacy
/// identifier.
pub fn to_legacy(manifest: &TestManifest) -> ManifestResult<String> {
    let mut out = String::from("from options import *\n");
    for case in manifest {
        if !is_identifier(&case.name) {
            return Err(ManifestError::malformed(
                &case.name,
                "name is not a valid legacy identifier",
            ));
        }
        let outputs = case
            .expected_outputs
            .iter()
            .map(|output| quote_string(output))
            .collect::<Vec<_>>()
            .join(", ");
        let indent = " ".repeat(case.name.len() + 5);
        out.push_str(&format!(
            "\n{} = {{ INPUT : {},\n{}EXODIFF : [{}] }}\n",
            case.name,
            quote_string(&case.input_file),
            indent,
            outputs
        ));
    }
    Ok(out)
}

/// Write a manifest file in the given format
pub async fn save_manifest<P: AsRef<Path>>(
    manifest: &TestManifest,
    path: P,
    format: ManifestFormat,
) -> ManifestResult<()> {
    let path = path.as_ref();
    let content = render_manifest(manifest, format)?;
    tokio::fs::write(path, content).await?;
    info!(
        "Wrote {} test cases to {} ({})",
        manifest.len(),
        path.display(),
        format
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::TestCase;
    use tempfile::TempDir;

    #[test]
    fn test_parse_toml_document() {
        let content = r#"
[[case]]
name = "pl_test1"
input = "pl_test1.i"
exodiff = ["pl_test1_out.e"]

[[case]]
name = "pl_test1tt"
input = "pl_test1tt.i"
exodiff = ["pl_test1tt_out.e"]
"#;
        let manifest = parse_manifest(content, ManifestFormat::Toml).unwrap();
        let names: Vec<&str> = manifest.names().collect();
        assert_eq!(names, vec!["pl_test1", "pl_test1tt"]);
    }

    #[test]
    fn test_parse_json_missing_exodiff_is_malformed() {
        let content = r#"{"case": [{"name": "a", "input": "a.i"}]}"#;
        assert!(matches!(
            parse_manifest(content, ManifestFormat::Json),
            Err(ManifestError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_parse_toml_duplicate_is_rejected() {
        let content = r#"
[[case]]
name = "dup"
input = "a.i"
exodiff = ["a_out.e"]

[[case]]
name = "dup"
input = "b.i"
exodiff = ["b_out.e"]
"#;
        assert!(matches!(
            parse_manifest(content, ManifestFormat::Toml),
            Err(ManifestError::DuplicateKey { .. })
        ));
    }

    #[test]
    fn test_parse_invalid_toml() {
        assert!(matches!(
            parse_manifest("[[case]\nname = ", ManifestFormat::Toml),
            Err(ManifestError::Toml(_))
        ));
    }

    #[test]
    fn test_rendered_formats_reparse() {
        let manifest = suite::moving_penetration().unwrap();
        for format in [
            ManifestFormat::Toml,
            ManifestFormat::Json,
            ManifestFormat::Legacy,
        ] {
            let text = render_manifest(&manifest, format).unwrap();
            let reparsed = parse_manifest(&text, format).unwrap();
            assert_eq!(reparsed, manifest, "format {}", format);
        }
    }

    #[test]
    fn test_legacy_render_escapes_quotes() {
        let manifest = TestManifest::new(vec![TestCase::new(
            "quoted",
            "it's.i",
            ["it's_out.e", "back\\slash_out.e"],
        )])
        .unwrap();
        let text = render_manifest(&manifest, ManifestFormat::Legacy).unwrap();
        let reparsed = parse_manifest(&text, ManifestFormat::Legacy).unwrap();
        assert_eq!(reparsed, manifest);
    }

    #[test]
    fn test_legacy_render_rejects_non_identifier_name() {
        let manifest = TestManifest::new(vec![TestCase::new(
            "contact-patch",
            "contact-patch.i",
            ["contact-patch_out.e"],
        )])
        .unwrap();
        assert!(matches!(
            render_manifest(&manifest, ManifestFormat::Legacy),
            Err(ManifestError::MalformedRecord { name, .. }) if name == "contact-patch"
        ));
        // The other formats carry any name
        let text = render_manifest(&manifest, ManifestFormat::Toml).unwrap();
        assert_eq!(parse_manifest(&text, ManifestFormat::Toml).unwrap(), manifest);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let toml_content = r#"
[[case]]
name = "a"
input = "a.i"
exodiff = ["a_out.e"]
csvdiff = ["a_out.csv"]
"#;
        assert!(matches!(
            parse_manifest(toml_content, ManifestFormat::Toml),
            Err(ManifestError::Toml(_))
        ));

        let json_content =
            r#"{"case": [{"name": "a", "input": "a.i", "exodiff": ["a_out.e"], "csvdiff": ["a_out.csv"]}]}"#;
        assert!(matches!(
            parse_manifest(json_content, ManifestFormat::Json),
            Err(ManifestError::Json(_))
        ));

        let top_level = "suite = \"x\"\n[[case]]\nname = \"a\"\ninput = \"a.i\"\nexodiff = [\"a_out.e\"]\n";
        assert!(matches!(
            parse_manifest(top_level, ManifestFormat::Toml),
            Err(ManifestError::Toml(_))
        ));
    }

    #[tokio::test]
    async fn test_load_directory_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cases.toml");
        tokio::fs::create_dir(&path).await.unwrap();
        assert!(matches!(
            load_manifest(&path, None).await,
            Err(ManifestError::Io(_))
        ));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.toml");
        assert!(matches!(
            load_manifest(&path, None).await,
            Err(ManifestError::FileNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("suite.json");
        let manifest = suite::moving_penetration().unwrap();

        save_manifest(&manifest, &path, ManifestFormat::Json)
            .await
            .unwrap();
        let loaded = load_manifest(&path, None).await.unwrap();
        assert_eq!(loaded.list_cases(), manifest.list_cases());
    }

    #[tokio::test]
    async fn test_load_configured_defaults_to_builtin_suite() {
        let manifest = load_configured(&ManifestConfig::default()).await.unwrap();
        assert_eq!(manifest.len(), 20);
    }
}
