//! Configuration file support for spdx-sbom.
//!
//! Provides YAML-based configuration through `spdx-sbom.config.yml` files,
//! including data structures, file loading, validation, and the mapping of
//! the loaded values onto an [`AssemblyRequest`].

use anyhow::{anyhow, bail, Context};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use crate::application::dto::{tool_creator, AssemblyRequest, OutputFormat, PackageSettings};
use crate::sbom_generation::domain::{
    Annotation, AnnotationType, ChecksumAlgorithm, CustomLicense, DefaultFileInfo, ExternalRef,
    FileSet, LicenseExpression, SchemaVersion, SnippetInfo, SnippetRange,
};
use crate::sbom_generation::policies::{LicenseOverwrite, OverwriteTarget};
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "spdx-sbom.config.yml";

const CREATOR_PREFIXES: [&str; 3] = ["Tool:", "Person:", "Organization:"];

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub output: Option<String>,
    pub spec_version: Option<String>,
    pub output_format: Option<String>,
    pub document_namespace: Option<String>,
    pub document_comment: Option<String>,
    pub creators: Option<Vec<String>>,
    pub creator_comment: Option<String>,
    pub file_sets: Option<Vec<FileSetConfig>>,
    pub default_file: Option<FileInfoConfig>,
    pub path_specific_info: Option<Vec<PathSpecificConfig>>,
    pub non_standard_licenses: Option<Vec<NonStandardLicense>>,
    pub license_overwrites: Option<Vec<LicenseOverwriteConfig>>,
    pub license_declared: Option<String>,
    pub license_concluded: Option<String>,
    pub license_comments: Option<String>,
    pub copyright_text: Option<String>,
    pub originator: Option<String>,
    pub supplier: Option<String>,
    pub source_info: Option<String>,
    pub download_url: Option<String>,
    pub checksum_algorithms: Option<Vec<String>>,
    pub external_references: Option<Vec<ExternalReferenceConfig>>,
    pub document_annotations: Option<Vec<AnnotationConfig>>,
    pub package_annotations: Option<Vec<AnnotationConfig>>,
    pub match_licenses_on_cross_reference_urls: Option<bool>,
    pub only_use_local_licenses: Option<bool>,
    pub create_external_refs: Option<bool>,
    pub include_transitive_dependencies: Option<bool>,
    pub generate_purls: Option<bool>,
    pub use_artifact_id: Option<bool>,
    pub strict_verification: Option<bool>,
    pub metadata_repository: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

#[derive(Debug, Deserialize)]
pub struct FileSetConfig {
    pub directory: String,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub excludes: Vec<String>,
    pub output_directory: Option<String>,
}

/// File information fields; unset fields keep the built-in defaults.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct FileInfoConfig {
    pub comment: Option<String>,
    pub contributors: Option<Vec<String>>,
    pub copyright: Option<String>,
    pub license_comment: Option<String>,
    pub notice: Option<String>,
    pub concluded_license: Option<String>,
    pub declared_license: Option<String>,
    pub snippets: Option<Vec<SnippetConfig>>,
}

impl FileInfoConfig {
    fn apply_to(&self, base: &DefaultFileInfo) -> DefaultFileInfo {
        let mut info = base.clone();
        if let Some(comment) = &self.comment {
            info.comment = comment.clone();
        }
        if let Some(contributors) = &self.contributors {
            info.contributors = contributors.clone();
        }
        if let Some(copyright) = &self.copyright {
            info.copyright = copyright.clone();
        }
        if let Some(license_comment) = &self.license_comment {
            info.license_comment = license_comment.clone();
        }
        if let Some(notice) = &self.notice {
            info.notice = notice.clone();
        }
        if let Some(concluded) = &self.concluded_license {
            info.concluded_license = concluded.clone();
        }
        if let Some(declared) = &self.declared_license {
            info.declared_license = declared.clone();
        }
        if let Some(snippets) = &self.snippets {
            info.snippets = snippets.iter().map(SnippetConfig::to_snippet_info).collect();
        }
        info
    }
}

/// A snippet of every file the surrounding file information applies to.
#[derive(Debug, Deserialize, Clone)]
pub struct SnippetConfig {
    pub name: Option<String>,
    pub comment: Option<String>,
    pub byte_range: String,
    pub line_range: Option<String>,
    pub concluded_license: Option<String>,
    pub license_info: Option<String>,
    pub license_comment: Option<String>,
    pub copyright: Option<String>,
}

impl SnippetConfig {
    fn to_snippet_info(&self) -> SnippetInfo {
        let defaults = SnippetInfo::default();
        SnippetInfo {
            name: self.name.clone().unwrap_or(defaults.name),
            comment: self.comment.clone().unwrap_or(defaults.comment),
            byte_range: self.byte_range.clone(),
            line_range: self.line_range.clone(),
            concluded_license: self
                .concluded_license
                .clone()
                .unwrap_or(defaults.concluded_license),
            license_info: self.license_info.clone().unwrap_or(defaults.license_info),
            license_comment: self.license_comment.clone().unwrap_or(defaults.license_comment),
            copyright: self.copyright.clone().unwrap_or(defaults.copyright),
        }
    }

    fn validate(&self, location: &str) -> Result<()> {
        let ranges = [
            ("byte_range", Some(&self.byte_range)),
            ("line_range", self.line_range.as_ref()),
        ];
        for (field, range) in ranges {
            let Some(range) = range else { continue };
            range.parse::<SnippetRange>().map_err(|e| {
                anyhow!(
                    "Invalid config: {}.{}: {}\n\n\
                     💡 Hint: Write ranges as <start>:<end>, 1-based and inclusive (e.g., \"1:120\").",
                    location,
                    field,
                    e
                )
            })?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct PathSpecificConfig {
    pub path: String,
    #[serde(flatten)]
    pub info: FileInfoConfig,
}

#[derive(Debug, Deserialize)]
pub struct NonStandardLicense {
    pub license_id: String,
    pub extracted_text: String,
    pub name: Option<String>,
    pub comment: Option<String>,
    #[serde(default)]
    pub cross_references: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct LicenseOverwriteConfig {
    #[serde(default = "default_overwrite_target")]
    pub target: String,
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    pub license: String,
}

fn default_overwrite_target() -> String {
    "both".to_string()
}

#[derive(Debug, Deserialize)]
pub struct ExternalReferenceConfig {
    pub category: String,
    #[serde(rename = "type")]
    pub reference_type: String,
    pub locator: String,
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnnotationConfig {
    /// Defaults to the tool creator
    pub annotator: Option<String>,
    /// Defaults to the time of the run
    pub date: Option<String>,
    /// `REVIEW` or `OTHER` (default)
    pub annotation_type: Option<String>,
    pub comment: String,
}

impl AnnotationConfig {
    fn to_annotation(&self, now: &str) -> Annotation {
        Annotation {
            annotator: self.annotator.clone().unwrap_or_else(tool_creator),
            date: self.date.clone().unwrap_or_else(|| now.to_string()),
            annotation_type: self
                .annotation_type
                .as_deref()
                .map(AnnotationType::from_name)
                .unwrap_or(AnnotationType::Other),
            comment: self.comment.clone(),
        }
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);
    tracing::debug!("Loaded configuration from {}", path.display());

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    config.schema_version()?;
    config.output_format()?;

    for (i, creator) in config.creators.iter().flatten().enumerate() {
        if !CREATOR_PREFIXES.iter().any(|prefix| creator.starts_with(prefix)) {
            bail!(
                "Invalid config: creators[{}] '{}' has no creator type.\n\n\
                 💡 Hint: Start each creator with 'Tool:', 'Person:' or 'Organization:'.",
                i,
                creator
            );
        }
    }

    config.checksum_algorithms()?;

    for (i, file_set) in config.file_sets.iter().flatten().enumerate() {
        if file_set.directory.trim().is_empty() {
            bail!(
                "Invalid config: file_sets[{}].directory must not be empty.\n\n\
                 💡 Hint: Give the directory to collect, relative to the project directory.",
                i
            );
        }
    }

    for (i, entry) in config.path_specific_info.iter().flatten().enumerate() {
        if entry.path.trim().is_empty() {
            bail!(
                "Invalid config: path_specific_info[{}].path must not be empty.\n\n\
                 💡 Hint: Give a file or directory path relative to the project directory.",
                i
            );
        }
        for (j, snippet) in entry.info.snippets.iter().flatten().enumerate() {
            snippet.validate(&format!("path_specific_info[{}].snippets[{}]", i, j))?;
        }
    }
    if let Some(default_file) = &config.default_file {
        for (j, snippet) in default_file.snippets.iter().flatten().enumerate() {
            snippet.validate(&format!("default_file.snippets[{}]", j))?;
        }
    }

    for (i, license) in config.non_standard_licenses.iter().flatten().enumerate() {
        if !license.license_id.starts_with("LicenseRef-") {
            bail!(
                "Invalid config: non_standard_licenses[{}].license_id '{}' is not a custom license ID.\n\n\
                 💡 Hint: Custom license IDs start with 'LicenseRef-' (e.g., \"LicenseRef-Acme\").",
                i,
                license.license_id
            );
        }
    }

    config.license_overwrites()?;
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

impl ConfigFile {
    pub fn schema_version(&self) -> Result<Option<SchemaVersion>> {
        self.spec_version
            .as_deref()
            .map(|value| {
                value.parse().map_err(|e: String| {
                    anyhow!("Invalid config: spec_version: {}\n\n💡 Hint: Use \"2\" or \"3\".", e)
                })
            })
            .transpose()
    }

    pub fn output_format(&self) -> Result<Option<OutputFormat>> {
        self.output_format
            .as_deref()
            .map(|value| {
                value.parse().map_err(|e: String| {
                    anyhow!(
                        "Invalid config: output_format: {}\n\n💡 Hint: Use json, rdf-xml or json-ld.",
                        e
                    )
                })
            })
            .transpose()
    }

    fn checksum_algorithms(&self) -> Result<Option<BTreeSet<ChecksumAlgorithm>>> {
        let Some(names) = &self.checksum_algorithms else {
            return Ok(None);
        };
        let algorithms = names
            .iter()
            .map(|name| {
                name.parse::<ChecksumAlgorithm>().map_err(|e| {
                    anyhow!(
                        "Invalid config: checksum_algorithms: {}\n\n💡 Hint: Use SHA1, SHA256, SHA512 or MD5.",
                        e
                    )
                })
            })
            .collect::<Result<BTreeSet<_>>>()?;
        Ok(Some(algorithms))
    }

    fn license_overwrites(&self) -> Result<Vec<LicenseOverwrite>> {
        self.license_overwrites
            .iter()
            .flatten()
            .enumerate()
            .map(|(i, entry)| -> Result<LicenseOverwrite> {
                let target: OverwriteTarget = entry
                    .target
                    .parse()
                    .map_err(|e| anyhow!("Invalid config: license_overwrites[{}]: {}", i, e))?;
                let license = LicenseExpression::parse(&entry.license)
                    .map_err(|e| anyhow!("Invalid config: license_overwrites[{}]: {}", i, e))?;
                Ok(LicenseOverwrite {
                    target,
                    group_id: entry.group_id.clone(),
                    artifact_id: entry.artifact_id.clone(),
                    version: entry.version.clone(),
                    license,
                })
            })
            .collect()
    }

    /// Directory of dependency descriptors, relative paths taken from `project_dir`.
    pub fn metadata_repository(&self, project_dir: &Path) -> Option<PathBuf> {
        self.metadata_repository
            .as_deref()
            .map(|path| project_dir.join(path))
    }

    /// Copies every configured value onto `request`. Relative directories
    /// are resolved against `project_dir`.
    pub fn apply_to(&self, request: &mut AssemblyRequest, project_dir: &Path) -> Result<()> {
        let now = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

        if let Some(format) = self.output_format()? {
            request.output_format = format;
        }
        if self.document_namespace.is_some() {
            request.document_namespace = self.document_namespace.clone();
        }
        if self.document_comment.is_some() {
            request.document_comment = self.document_comment.clone();
        }
        if let Some(creators) = &self.creators {
            request.creators = creators.clone();
        }
        if self.creator_comment.is_some() {
            request.creator_comment = self.creator_comment.clone();
        }
        if let Some(annotations) = &self.document_annotations {
            request.document_annotations = annotations.iter().map(|a| a.to_annotation(&now)).collect();
        }

        if let Some(file_sets) = &self.file_sets {
            request.file_sets = file_sets
                .iter()
                .map(|entry| FileSet {
                    directory: project_dir.join(&entry.directory),
                    includes: entry.includes.clone(),
                    excludes: entry.excludes.clone(),
                    output_directory: entry.output_directory.clone(),
                })
                .collect();
        }
        if let Some(default_file) = &self.default_file {
            request.default_file = default_file.apply_to(&request.default_file);
        }
        if let Some(entries) = &self.path_specific_info {
            for entry in entries {
                let key = entry.path.trim_start_matches("./").trim_end_matches('/').to_string();
                let info = entry.info.apply_to(&request.default_file);
                request.path_overrides.insert(key, info);
            }
        }
        if let Some(algorithms) = self.checksum_algorithms()? {
            request.checksum_algorithms = algorithms;
        }

        if let Some(licenses) = &self.non_standard_licenses {
            request.custom_licenses = licenses
                .iter()
                .map(|entry| {
                    let mut license = CustomLicense::new(entry.license_id.as_str(), entry.extracted_text.as_str())
                        .with_cross_refs(entry.cross_references.clone());
                    if let Some(name) = &entry.name {
                        license = license.with_name(name.as_str());
                    }
                    if let Some(comment) = &entry.comment {
                        license = license.with_comment(comment.as_str());
                    }
                    license
                })
                .collect();
        }
        request.license_overwrites = self.license_overwrites()?;
        request.package = self.package_settings(&now);

        if let Some(value) = self.match_licenses_on_cross_reference_urls {
            request.match_cross_reference_urls = value;
        }
        if let Some(value) = self.include_transitive_dependencies {
            request.include_transitive = value;
        }
        if let Some(value) = self.create_external_refs {
            request.create_external_refs = value;
        }
        if let Some(value) = self.generate_purls {
            request.generate_purls = value;
        }
        if let Some(value) = self.use_artifact_id {
            request.use_artifact_id = value;
        }
        if let Some(value) = self.strict_verification {
            request.strict_verification = value;
        }
        Ok(())
    }

    fn package_settings(&self, now: &str) -> PackageSettings {
        PackageSettings {
            license_declared: self.license_declared.clone(),
            license_concluded: self.license_concluded.clone(),
            license_comments: self.license_comments.clone(),
            copyright_text: self.copyright_text.clone(),
            originator: self.originator.clone(),
            supplier: self.supplier.clone(),
            source_info: self.source_info.clone(),
            download_url: self.download_url.clone(),
            external_refs: self
                .external_references
                .iter()
                .flatten()
                .map(|entry| ExternalRef {
                    category: entry.category.clone(),
                    reference_type: entry.reference_type.clone(),
                    locator: entry.locator.clone(),
                    comment: entry.comment.clone(),
                })
                .collect(),
            annotations: self
                .package_annotations
                .iter()
                .flatten()
                .map(|a| a.to_annotation(now))
                .collect(),
        }
    }
}
