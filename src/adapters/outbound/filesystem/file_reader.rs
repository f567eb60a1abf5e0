use crate::ports::outbound::{ProjectDescriptor, ProjectMetadataReader};
use crate::sbom_generation::domain::{
    Artifact, ArtifactCoordinates, DeclaredLicense, DependencyNode, ProjectMetadata,
};
use crate::shared::error::SbomError;
use crate::shared::security::read_checked_text;
use crate::shared::{AssemblyError, ErrorKind, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name of the project descriptor looked up in the project directory.
pub const DESCRIPTOR_FILE_NAME: &str = "sbom-project.toml";

#[derive(Debug, Deserialize)]
struct DescriptorFile {
    project: Option<ProjectSection>,
    #[serde(default)]
    dependencies: Vec<DependencySection>,
    #[serde(default)]
    metadata: Vec<ProjectSection>,
}

#[derive(Debug, Default, Deserialize)]
struct ProjectSection {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    name: Option<String>,
    description: Option<String>,
    organization: Option<String>,
    url: Option<String>,
    packaging: Option<String>,
    download_url: Option<String>,
    file: Option<PathBuf>,
    #[serde(default)]
    licenses: Vec<LicenseSection>,
}

#[derive(Debug, Deserialize)]
struct LicenseSection {
    name: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DependencySection {
    group_id: String,
    artifact_id: String,
    version: String,
    scope: Option<String>,
    #[serde(default)]
    optional: bool,
    file: Option<PathBuf>,
    #[serde(default)]
    dependencies: Vec<DependencySection>,
}

impl ProjectSection {
    fn into_metadata(
        self,
        context: &str,
        project_dir: &Path,
    ) -> std::result::Result<ProjectMetadata, AssemblyError> {
        let missing: Vec<&str> = [
            ("group_id", &self.group_id),
            ("artifact_id", &self.artifact_id),
            ("version", &self.version),
        ]
        .iter()
        .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
        .map(|(key, _)| *key)
        .collect();
        if !missing.is_empty() {
            return Err(AssemblyError::new(
                ErrorKind::MissingProjectIdentity,
                format!("{} is missing {}", context, missing.join(", ")),
            ));
        }

        let mut metadata = ProjectMetadata::new(ArtifactCoordinates::new(
            self.group_id.unwrap_or_default(),
            self.artifact_id.unwrap_or_default(),
            self.version.unwrap_or_default(),
        ));
        metadata.name = self.name;
        metadata.description = self.description;
        metadata.organization = self.organization;
        metadata.url = self.url;
        metadata.packaging = self.packaging;
        metadata.download_url = self.download_url;
        metadata.file = self.file.map(|file| project_dir.join(file));
        metadata.licenses = self
            .licenses
            .into_iter()
            .map(|l| DeclaredLicense {
                name: l.name,
                url: l.url,
            })
            .collect();
        Ok(metadata)
    }
}

impl DependencySection {
    fn into_node(self, project_dir: &Path) -> DependencyNode {
        let mut artifact = Artifact::new(ArtifactCoordinates::new(
            self.group_id,
            self.artifact_id,
            self.version,
        ))
        .optional(self.optional);
        if let Some(scope) = &self.scope {
            artifact = artifact.with_scope(scope);
        }
        if let Some(file) = self.file {
            artifact = artifact.with_file(project_dir.join(file));
        }
        let children = self
            .dependencies
            .into_iter()
            .map(|d| d.into_node(project_dir))
            .collect();
        DependencyNode::new(artifact).with_children(children)
    }
}

/// Parses descriptor text; relative artifact files resolve against `project_dir`.
///
/// # Errors
/// Returns an error if the TOML is malformed, or `MissingProjectIdentity`
/// if the project or a metadata entry lacks group, artifact or version
pub fn parse_descriptor(content: &str, project_dir: &Path) -> Result<ProjectDescriptor> {
    let file: DescriptorFile = toml::from_str(content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", DESCRIPTOR_FILE_NAME, e))?;

    let metadata = file
        .project
        .unwrap_or_default()
        .into_metadata("[project]", project_dir)?;
    let children = file
        .dependencies
        .into_iter()
        .map(|d| d.into_node(project_dir))
        .collect();
    let dependency_tree =
        DependencyNode::new(Artifact::new(metadata.coordinates.clone())).with_children(children);
    let dependency_metadata = file
        .metadata
        .into_iter()
        .enumerate()
        .map(|(i, section)| section.into_metadata(&format!("[[metadata]] entry {}", i + 1), project_dir))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(ProjectDescriptor {
        metadata,
        dependency_tree,
        dependency_metadata,
    })
}

/// FileSystemReader adapter for reading project descriptors
///
/// Implements the ProjectMetadataReader port for `sbom-project.toml`,
/// reading through the shared symlink and size checks.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectMetadataReader for FileSystemReader {
    fn read_project(&self, project_dir: &Path) -> Result<ProjectDescriptor> {
        let descriptor_path = project_dir.join(DESCRIPTOR_FILE_NAME);

        if !descriptor_path.exists() {
            return Err(SbomError::ProjectDescriptorNotFound {
                path: descriptor_path,
                suggestion: format!(
                    "{} does not exist in project directory \"{}\".\n   \
                     Please run in the root directory of the project, or specify the correct path with the --path option.",
                    DESCRIPTOR_FILE_NAME,
                    project_dir.display()
                ),
            }
            .into());
        }

        let content = read_checked_text(&descriptor_path, "project descriptor").map_err(|e| {
            SbomError::FileReadError {
                path: descriptor_path.clone(),
                details: e.to_string(),
            }
        })?;
        tracing::debug!("Read project descriptor {}", descriptor_path.display());
        parse_descriptor(&content, project_dir)
    }
}
