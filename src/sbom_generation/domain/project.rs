use std::fmt;
use std::path::PathBuf;

/// Maven-style artifact coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactCoordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl ArtifactCoordinates {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for ArtifactCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// A license as declared by project metadata: a display name and a URL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeclaredLicense {
    pub name: Option<String>,
    pub url: Option<String>,
}

impl DeclaredLicense {
    pub fn new(name: Option<&str>, url: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_string),
            url: url.map(str::to_string),
        }
    }
}

/// Read-only view of a project's (or a dependency's) metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMetadata {
    pub coordinates: ArtifactCoordinates,
    pub name: Option<String>,
    pub description: Option<String>,
    pub organization: Option<String>,
    pub url: Option<String>,
    pub packaging: Option<String>,
    pub download_url: Option<String>,
    pub licenses: Vec<DeclaredLicense>,
    /// Built artifact of the project, digested into the package checksums.
    pub file: Option<PathBuf>,
}

impl ProjectMetadata {
    pub fn new(coordinates: ArtifactCoordinates) -> Self {
        Self {
            coordinates,
            name: None,
            description: None,
            organization: None,
            url: None,
            packaging: None,
            download_url: None,
            licenses: Vec::new(),
            file: None,
        }
    }
}

/// A resolved dependency edge target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub coordinates: ArtifactCoordinates,
    pub scope: Option<String>,
    pub optional: bool,
    /// Resolved binary artifact on disk, if any.
    pub file: Option<PathBuf>,
}

impl Artifact {
    pub fn new(coordinates: ArtifactCoordinates) -> Self {
        Self {
            coordinates,
            scope: None,
            optional: false,
            file: None,
        }
    }

    pub fn with_scope(mut self, scope: &str) -> Self {
        self.scope = Some(scope.to_string());
        self
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn with_file(mut self, file: PathBuf) -> Self {
        self.file = Some(file);
        self
    }
}

/// A node of the resolved dependency tree. The root node is the project itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyNode {
    pub artifact: Artifact,
    pub children: Vec<DependencyNode>,
}

impl DependencyNode {
    pub fn new(artifact: Artifact) -> Self {
        Self {
            artifact,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<DependencyNode>) -> Self {
        self.children = children;
        self
    }

    /// Number of nodes below this one.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }
}
