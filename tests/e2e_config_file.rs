/// End-to-end tests for config file loading and CLI option merging.
///
/// These tests exercise the full flow from config file on disk through CLI invocation
/// to correct output, using `assert_cmd` and `tempfile` for isolated test environments.
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

/// Create a minimal sbom-project.toml with one documented dependency.
fn write_descriptor(dir: &Path) {
    let descriptor = r#"[project]
group_id = "org.example"
artifact_id = "test-project"
version = "0.1.0"
name = "Test Project"

[[project.licenses]]
name = "MIT License"
url = "https://opensource.org/licenses/MIT"

[[dependencies]]
group_id = "org.example"
artifact_id = "helper"
version = "1.0.0"
scope = "compile"

[[metadata]]
group_id = "org.example"
artifact_id = "helper"
version = "1.0.0"
name = "Helper"

  [[metadata.licenses]]
  name = "MIT License"
  url = "https://opensource.org/licenses/MIT"
"#;
    fs::write(dir.join("sbom-project.toml"), descriptor).unwrap();
}

/// Create a test project directory with a descriptor and two source files.
fn create_test_project(dir: &Path) {
    write_descriptor(dir);
    fs::create_dir_all(dir.join("src/generated")).unwrap();
    fs::write(
        dir.join("src/lib.rs"),
        "// SPDX-License-Identifier: MIT\npub mod generated;\n",
    )
    .unwrap();
    fs::write(dir.join("src/generated/mod.rs"), "pub const VALUE: u8 = 1;\n").unwrap();
}

/// Add `alt/lib.rs`, which clashes with `src/lib.rs` when both sets share an output directory.
fn write_clashing_file(dir: &Path) {
    fs::create_dir_all(dir.join("alt")).unwrap();
    fs::write(dir.join("alt/lib.rs"), "pub fn other() {}\n").unwrap();
}

/// Write a config file at the specified path.
fn write_config(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Run the CLI offline against `dir` and parse the JSON written to stdout.
fn run_json(dir: &Path, extra: &[&str]) -> serde_json::Value {
    let mut args = vec!["-p", dir.to_str().unwrap(), "--offline"];
    args.extend_from_slice(extra);
    let output = cargo_bin_cmd!("spdx-sbom").args(&args).output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn package<'a>(document: &'a serde_json::Value, name: &str) -> &'a serde_json::Value {
    document["packages"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["name"] == name)
        .unwrap_or_else(|| panic!("no package named {}", name))
}

fn file<'a>(document: &'a serde_json::Value, name: &str) -> &'a serde_json::Value {
    document["files"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["fileName"] == name)
        .unwrap_or_else(|| panic!("no file named {}", name))
}

// ============================================================================
// Config File Auto-Discovery Tests
// ============================================================================

mod auto_discovery_tests {
    use super::*;

    #[test]
    fn test_auto_discovery_applies_document_settings() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(
            &dir.path().join("spdx-sbom.config.yml"),
            r#"
document_namespace: https://example.org/spdx/test-project
document_comment: Built by the release pipeline
creators:
  - "Organization: Example Org"
"#,
        );

        let document = run_json(dir.path(), &[]);

        assert_eq!(document["documentNamespace"], "https://example.org/spdx/test-project");
        assert_eq!(document["comment"], "Built by the release pipeline");
        let creators = document["creationInfo"]["creators"].as_array().unwrap();
        assert!(creators.iter().any(|c| c == "Organization: Example Org"));
        assert!(creators
            .iter()
            .any(|c| c.as_str().unwrap().starts_with("Tool: spdx-sbom-")));
    }

    #[test]
    fn test_no_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());

        let document = run_json(dir.path(), &[]);

        assert!(document["documentNamespace"]
            .as_str()
            .unwrap()
            .starts_with("https://spdx.org/spdxdocs/test-project-0.1.0-"));
        assert_eq!(package(&document, "Test Project")["licenseDeclared"], "MIT");
        assert_eq!(package(&document, "Test Project")["copyrightText"], "UNSPECIFIED");
    }

    #[test]
    fn test_unknown_field_warns_but_succeeds() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(
            &dir.path().join("spdx-sbom.config.yml"),
            "format_version: 7\n",
        );

        cargo_bin_cmd!("spdx-sbom")
            .args(["-p", dir.path().to_str().unwrap(), "--offline"])
            .assert()
            .code(0)
            .stderr(predicate::str::contains(
                "Unknown config field 'format_version' will be ignored",
            ));
    }
}

// ============================================================================
// Explicit Config Path and CLI Merging Tests
// ============================================================================

mod merge_tests {
    use super::*;

    #[test]
    fn test_explicit_config_path() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        let config_dir = TempDir::new().unwrap();
        let config_path = config_dir.path().join("release.yml");
        write_config(&config_path, "copyright_text: Copyright 2026 Example Org\n");

        let document = run_json(dir.path(), &["-c", config_path.to_str().unwrap()]);

        assert_eq!(
            package(&document, "Test Project")["copyrightText"],
            "Copyright 2026 Example Org"
        );
    }

    #[test]
    fn test_cli_namespace_overrides_config() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(
            &dir.path().join("spdx-sbom.config.yml"),
            "document_namespace: https://example.org/spdx/from-config\n",
        );

        let document = run_json(
            dir.path(),
            &["--namespace", "https://example.org/spdx/from-flag"],
        );

        assert_eq!(document["documentNamespace"], "https://example.org/spdx/from-flag");
    }

    #[test]
    fn test_config_spec_version_selects_json_ld() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(&dir.path().join("spdx-sbom.config.yml"), "spec_version: \"3\"\n");

        let document = run_json(dir.path(), &[]);

        assert!(document["@context"].as_str().unwrap().contains("3.0.1"));
    }

    #[test]
    fn test_cli_spec_version_overrides_config() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(&dir.path().join("spdx-sbom.config.yml"), "spec_version: \"3\"\n");

        let document = run_json(dir.path(), &["-s", "2"]);

        assert_eq!(document["spdxVersion"], "SPDX-2.3");
    }

    #[test]
    fn test_config_output_is_relative_to_project() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        fs::create_dir_all(dir.path().join("target")).unwrap();
        write_config(
            &dir.path().join("spdx-sbom.config.yml"),
            "output: target/test-project.spdx.json\n",
        );

        cargo_bin_cmd!("spdx-sbom")
            .args(["-p", dir.path().to_str().unwrap(), "--offline"])
            .assert()
            .code(0);

        let written = fs::read_to_string(dir.path().join("target/test-project.spdx.json")).unwrap();
        let document: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(document["spdxVersion"], "SPDX-2.3");
    }
}

// ============================================================================
// Content Settings Tests
// ============================================================================

mod content_tests {
    use super::*;

    #[test]
    fn test_non_standard_license_and_overwrite() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(
            &dir.path().join("spdx-sbom.config.yml"),
            r#"
license_declared: LicenseRef-Example OR MIT
non_standard_licenses:
  - license_id: LicenseRef-Example
    extracted_text: Example license text
    name: Example License
license_overwrites:
  - group_id: org.example
    artifact_id: helper
    license: Apache-2.0
"#,
        );

        let document = run_json(dir.path(), &[]);

        assert_eq!(
            package(&document, "Test Project")["licenseDeclared"],
            "(LicenseRef-Example OR MIT)"
        );
        let extracted = document["hasExtractedLicensingInfos"].as_array().unwrap();
        assert_eq!(extracted[0]["licenseId"], "LicenseRef-Example");
        assert_eq!(extracted[0]["extractedText"], "Example license text");

        let helper = package(&document, "Helper");
        assert_eq!(helper["licenseDeclared"], "Apache-2.0");
        assert!(helper["licenseComments"]
            .as_str()
            .unwrap()
            .contains("Declared license has been overwritten, original value: MIT"));
    }

    #[test]
    fn test_file_defaults_and_path_specific_info() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(
            &dir.path().join("spdx-sbom.config.yml"),
            r#"
checksum_algorithms: [SHA256]
default_file:
  copyright: Copyright Example Org
path_specific_info:
  - path: ./src/generated/
    copyright: NOASSERTION
    comment: Generated code
"#,
        );

        let document = run_json(dir.path(), &[]);

        let lib = file(&document, "./src/lib.rs");
        assert_eq!(lib["copyrightText"], "Copyright Example Org");
        let algorithms: Vec<&str> = lib["checksums"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["algorithm"].as_str().unwrap())
            .collect();
        assert!(algorithms.contains(&"SHA1"));
        assert!(algorithms.contains(&"SHA256"));

        let generated = file(&document, "./src/generated/mod.rs");
        assert_eq!(generated["copyrightText"], "NOASSERTION");
        assert_eq!(generated["comment"], "Generated code");
    }

    #[test]
    fn test_metadata_repository_supplies_dependency_metadata() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        let descriptor = r#"[project]
group_id = "org.example"
artifact_id = "test-project"
version = "0.1.0"

[[dependencies]]
group_id = "org.example"
artifact_id = "external"
version = "3.1.0"
scope = "runtime"
"#;
        fs::write(dir.path().join("sbom-project.toml"), descriptor).unwrap();

        let entry = dir.path().join("repo/org/example/external/3.1.0");
        fs::create_dir_all(&entry).unwrap();
        fs::write(
            entry.join("sbom-project.toml"),
            r#"[project]
group_id = "org.example"
artifact_id = "external"
version = "3.1.0"
name = "External Library"
"#,
        )
        .unwrap();
        write_config(
            &dir.path().join("spdx-sbom.config.yml"),
            "metadata_repository: repo\ngenerate_purls: true\n",
        );

        let document = run_json(dir.path(), &[]);

        let external = package(&document, "External Library");
        assert_eq!(
            external["externalRefs"][0]["referenceLocator"],
            "pkg:maven/org.example/external@3.1.0"
        );
    }
}

// ============================================================================
// Verification and Invalid Config Tests
// ============================================================================

mod failure_tests {
    use super::*;

    #[test]
    fn test_strict_verification_exits_with_code_1() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_clashing_file(dir.path());
        write_config(
            &dir.path().join("spdx-sbom.config.yml"),
            r#"
strict_verification: true
file_sets:
  - directory: src
    output_directory: ./pkg
  - directory: alt
    output_directory: ./pkg
"#,
        );

        cargo_bin_cmd!("spdx-sbom")
            .args(["-p", dir.path().to_str().unwrap(), "--offline"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Document verification failed"))
            .stderr(predicate::str::contains("File ./pkg/lib.rs appears 2 times"));
    }

    #[test]
    fn test_verification_problems_without_strict_mode_still_succeed() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_clashing_file(dir.path());
        write_config(
            &dir.path().join("spdx-sbom.config.yml"),
            r#"
file_sets:
  - directory: src
    output_directory: ./pkg
  - directory: alt
    output_directory: ./pkg
"#,
        );

        cargo_bin_cmd!("spdx-sbom")
            .args(["-p", dir.path().to_str().unwrap(), "--offline"])
            .assert()
            .code(0)
            .stderr(predicate::str::contains("Document verification found"));
    }

    #[test]
    fn test_invalid_yaml_exits_with_code_3() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(
            &dir.path().join("spdx-sbom.config.yml"),
            "creators: [unclosed\n",
        );

        cargo_bin_cmd!("spdx-sbom")
            .args(["-p", dir.path().to_str().unwrap(), "--offline"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failed to parse config file"));
    }

    #[test]
    fn test_creator_without_type_is_rejected() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(
            &dir.path().join("spdx-sbom.config.yml"),
            "creators:\n  - Example Org\n",
        );

        cargo_bin_cmd!("spdx-sbom")
            .args(["-p", dir.path().to_str().unwrap(), "--offline"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("has no creator type"));
    }

    #[test]
    fn test_missing_explicit_config_exits_with_code_3() {
        let missing = fixtures_path().join("no-such-config.yml");

        cargo_bin_cmd!("spdx-sbom")
            .args([
                "-p",
                fixtures_path().join("sample-project").to_str().unwrap(),
                "--offline",
                "-c",
                missing.to_str().unwrap(),
            ])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failed to read config file"));
    }
}
