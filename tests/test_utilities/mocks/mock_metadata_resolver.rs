use spdx_sbom::prelude::*;
use std::collections::HashMap;

/// Mock DependencyMetadataResolver backed by an in-memory map
#[derive(Default)]
pub struct MockMetadataResolver {
    metadata: HashMap<String, ProjectMetadata>,
    failing: Vec<String>,
}

impl MockMetadataResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metadata(mut self, metadata: ProjectMetadata) -> Self {
        self.metadata
            .insert(metadata.coordinates.to_string(), metadata);
        self
    }

    /// Makes lookups of `coordinates` fail with a read error
    pub fn with_failure(mut self, coordinates: &ArtifactCoordinates) -> Self {
        self.failing.push(coordinates.to_string());
        self
    }
}

impl DependencyMetadataResolver for MockMetadataResolver {
    fn resolve_metadata(
        &self,
        coordinates: &ArtifactCoordinates,
    ) -> AssemblyResult<Option<ProjectMetadata>> {
        let key = coordinates.to_string();
        if self.failing.contains(&key) {
            return Err(AssemblyError::new(
                ErrorKind::ReadError,
                format!("cannot read metadata of {}", key),
            ));
        }
        Ok(self.metadata.get(&key).cloned())
    }
}
