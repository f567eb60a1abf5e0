use spdx_sbom::prelude::*;
use std::path::Path;

/// Mock ProjectMetadataReader serving a fixed descriptor
pub struct MockProjectReader {
    descriptor: ProjectDescriptor,
}

impl MockProjectReader {
    pub fn new(metadata: ProjectMetadata, dependencies: Vec<DependencyNode>) -> Self {
        let root = DependencyNode::new(Artifact::new(metadata.coordinates.clone()))
            .with_children(dependencies);
        Self {
            descriptor: ProjectDescriptor {
                metadata,
                dependency_tree: root,
                dependency_metadata: Vec::new(),
            },
        }
    }
}

impl ProjectMetadataReader for MockProjectReader {
    fn read_project(&self, _project_dir: &Path) -> Result<ProjectDescriptor> {
        Ok(self.descriptor.clone())
    }
}
