use super::file_reader::{parse_descriptor, DESCRIPTOR_FILE_NAME};
use crate::ports::outbound::DependencyMetadataResolver;
use crate::sbom_generation::domain::{ArtifactCoordinates, ProjectMetadata};
use crate::shared::security::read_checked_text;
use crate::shared::{AssemblyError, AssemblyResult, ErrorKind};
use std::path::{Path, PathBuf};

/// LocalMetadataResolver adapter for dependency metadata
///
/// Looks up dependency descriptors in a local repository laid out as
/// `<repository>/<group path>/<artifact>/<version>/sbom-project.toml`.
/// Without a repository every lookup answers "unknown".
pub struct LocalMetadataResolver {
    repository: Option<PathBuf>,
}

impl LocalMetadataResolver {
    pub fn new(repository: Option<PathBuf>) -> Self {
        Self { repository }
    }

    fn repository_descriptor(&self, coordinates: &ArtifactCoordinates) -> Option<PathBuf> {
        let repository = self.repository.as_ref()?;
        let mut dir = repository.clone();
        for segment in coordinates.group_id.split('.') {
            dir.push(segment);
        }
        dir.push(&coordinates.artifact_id);
        dir.push(&coordinates.version);
        let descriptor = dir.join(DESCRIPTOR_FILE_NAME);
        descriptor.is_file().then_some(descriptor)
    }
}

fn load(path: &Path) -> AssemblyResult<ProjectMetadata> {
    let project_dir = path.parent().unwrap_or_else(|| Path::new("."));
    read_checked_text(path, "dependency descriptor")
        .and_then(|content| parse_descriptor(&content, project_dir))
        .map(|descriptor| descriptor.metadata)
        .map_err(|e| match e.downcast::<AssemblyError>() {
            Ok(assembly) => assembly,
            Err(other) => AssemblyError::new(
                ErrorKind::ReadError,
                format!("{}: {}", path.display(), other),
            ),
        })
}

impl DependencyMetadataResolver for LocalMetadataResolver {
    fn resolve_metadata(
        &self,
        coordinates: &ArtifactCoordinates,
    ) -> AssemblyResult<Option<ProjectMetadata>> {
        match self.repository_descriptor(coordinates) {
            Some(path) => {
                tracing::debug!("Loading metadata for {} from {}", coordinates, path.display());
                load(&path).map(Some)
            }
            None => Ok(None),
        }
    }
}
