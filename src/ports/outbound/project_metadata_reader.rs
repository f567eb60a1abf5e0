use crate::sbom_generation::domain::{DependencyNode, ProjectMetadata};
use crate::shared::Result;
use std::path::Path;

/// Everything read from a project descriptor.
#[derive(Debug, Clone)]
pub struct ProjectDescriptor {
    pub metadata: ProjectMetadata,
    /// Root node (the project itself) of the resolved dependency tree.
    pub dependency_tree: DependencyNode,
    /// Metadata available for dependencies, keyed by their coordinates.
    pub dependency_metadata: Vec<ProjectMetadata>,
}

/// ProjectMetadataReader port for reading project descriptor files.
///
/// The engine only ever consumes the returned read-only view.
pub trait ProjectMetadataReader {
    /// Reads the project descriptor found in `project_dir`.
    ///
    /// # Errors
    /// Returns an error if the descriptor is missing, unreadable or malformed
    fn read_project(&self, project_dir: &Path) -> Result<ProjectDescriptor>;
}
