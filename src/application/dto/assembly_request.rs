use super::OutputFormat;
use crate::sbom_generation::domain::{
    Annotation, ChecksumAlgorithm, CustomLicense, DefaultFileInfo, ExternalRef, FileSet,
    SchemaVersion,
};
use crate::sbom_generation::policies::LicenseOverwrite;
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

/// Creator every generated document names.
pub fn tool_creator() -> String {
    format!("Tool: spdx-sbom-{}", env!("CARGO_PKG_VERSION"))
}

/// Values for the project package that override what the project
/// descriptor provides.
#[derive(Debug, Clone, Default)]
pub struct PackageSettings {
    /// License expression text; the descriptor's licenses are used when absent
    pub license_declared: Option<String>,
    /// License expression text; defaults to the declared license
    pub license_concluded: Option<String>,
    pub license_comments: Option<String>,
    pub copyright_text: Option<String>,
    pub originator: Option<String>,
    pub supplier: Option<String>,
    pub source_info: Option<String>,
    pub download_url: Option<String>,
    pub external_refs: Vec<ExternalRef>,
    pub annotations: Vec<Annotation>,
}

/// AssemblyRequest - Internal request DTO for the SBOM assembly use case
///
/// Built by the CLI from configuration file values and flags.
#[derive(Debug, Clone)]
pub struct AssemblyRequest {
    /// Directory containing `sbom-project.toml`
    pub project_path: PathBuf,
    pub schema_version: SchemaVersion,
    pub output_format: OutputFormat,
    /// Derived from the project identity when absent
    pub document_namespace: Option<String>,
    pub document_comment: Option<String>,
    /// Validated creators; the tool creator is always added
    pub creators: Vec<String>,
    pub creator_comment: Option<String>,
    pub document_annotations: Vec<Annotation>,
    /// File sets to collect; `<project>/src` when empty
    pub file_sets: Vec<FileSet>,
    pub default_file: DefaultFileInfo,
    /// Keyed by relative path (file or directory)
    pub path_overrides: HashMap<String, DefaultFileInfo>,
    pub checksum_algorithms: BTreeSet<ChecksumAlgorithm>,
    /// File names left out of the verification code, usually the output file
    pub excluded_file_names: Vec<String>,
    pub custom_licenses: Vec<CustomLicense>,
    pub license_overwrites: Vec<LicenseOverwrite>,
    pub package: PackageSettings,
    pub match_cross_reference_urls: bool,
    pub include_transitive: bool,
    pub create_external_refs: bool,
    pub generate_purls: bool,
    pub use_artifact_id: bool,
    /// Verification problems fail the run instead of being reported
    pub strict_verification: bool,
}

impl AssemblyRequest {
    pub fn new(project_path: PathBuf, schema_version: SchemaVersion) -> Self {
        Self {
            project_path,
            schema_version,
            output_format: OutputFormat::default_for(schema_version),
            document_namespace: None,
            document_comment: None,
            creators: Vec::new(),
            creator_comment: None,
            document_annotations: Vec::new(),
            file_sets: Vec::new(),
            default_file: DefaultFileInfo::default(),
            path_overrides: HashMap::new(),
            checksum_algorithms: BTreeSet::from([ChecksumAlgorithm::Sha1]),
            excluded_file_names: Vec::new(),
            custom_licenses: Vec::new(),
            license_overwrites: Vec::new(),
            package: PackageSettings::default(),
            match_cross_reference_urls: true,
            include_transitive: true,
            create_external_refs: true,
            generate_purls: false,
            use_artifact_id: false,
            strict_verification: false,
        }
    }

    /// Creators written to the document: configured ones, then the tool.
    pub fn all_creators(&self) -> Vec<String> {
        let tool = tool_creator();
        let mut creators: Vec<String> = self
            .creators
            .iter()
            .filter(|c| **c != tool)
            .cloned()
            .collect();
        creators.push(tool);
        creators
    }
}
