use crate::sbom_generation::domain::{ArtifactCoordinates, ProjectMetadata};
use crate::shared::AssemblyResult;

/// DependencyMetadataResolver port for looking up full metadata of a dependency.
pub trait DependencyMetadataResolver {
    /// Returns `Ok(None)` when no metadata is known for `coordinates`.
    ///
    /// # Errors
    /// Returns an error if metadata exists but cannot be loaded
    fn resolve_metadata(
        &self,
        coordinates: &ArtifactCoordinates,
    ) -> AssemblyResult<Option<ProjectMetadata>>;
}
