use super::element::ElementRef;
use std::fmt;

/// Closed set of relationship types the engine records.
///
/// Names follow the attribute-centric vocabulary; the relationship-centric
/// adapter translates them (see `SchemaVersionAdapter`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RelationshipType {
    Describes,
    Contains,
    Generates,
    DynamicLink,
    DependsOn,
    TestDependencyOf,
    OptionalComponentOf,
    HasDeclaredLicense,
    HasConcludedLicense,
    Other,
}

impl RelationshipType {
    pub fn spdx_name(self) -> &'static str {
        match self {
            RelationshipType::Describes => "DESCRIBES",
            RelationshipType::Contains => "CONTAINS",
            RelationshipType::Generates => "GENERATES",
            RelationshipType::DynamicLink => "DYNAMIC_LINK",
            RelationshipType::DependsOn => "DEPENDS_ON",
            RelationshipType::TestDependencyOf => "TEST_DEPENDENCY_OF",
            RelationshipType::OptionalComponentOf => "OPTIONAL_COMPONENT_OF",
            RelationshipType::HasDeclaredLicense => "HAS_DECLARED_LICENSE",
            RelationshipType::HasConcludedLicense => "HAS_CONCLUDED_LICENSE",
            RelationshipType::Other => "OTHER",
        }
    }

    pub fn from_spdx_name(name: &str) -> Option<Self> {
        let found = match name {
            "DESCRIBES" => RelationshipType::Describes,
            "CONTAINS" => RelationshipType::Contains,
            "GENERATES" => RelationshipType::Generates,
            "DYNAMIC_LINK" => RelationshipType::DynamicLink,
            "DEPENDS_ON" => RelationshipType::DependsOn,
            "TEST_DEPENDENCY_OF" => RelationshipType::TestDependencyOf,
            "OPTIONAL_COMPONENT_OF" => RelationshipType::OptionalComponentOf,
            "HAS_DECLARED_LICENSE" => RelationshipType::HasDeclaredLicense,
            "HAS_CONCLUDED_LICENSE" => RelationshipType::HasConcludedLicense,
            "OTHER" => RelationshipType::Other,
            _ => return None,
        };
        Some(found)
    }

    /// "X-of" types point from the dependency to its parent.
    pub fn points_to_parent(self) -> bool {
        self.spdx_name().ends_with("_OF")
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spdx_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Completeness {
    Complete,
    Incomplete,
    NoAssertion,
}

impl Completeness {
    pub fn vocabulary_name(self) -> &'static str {
        match self {
            Completeness::Complete => "complete",
            Completeness::Incomplete => "incomplete",
            Completeness::NoAssertion => "noAssertion",
        }
    }

    pub fn from_vocabulary_name(name: &str) -> Option<Self> {
        match name {
            "complete" => Some(Completeness::Complete),
            "incomplete" => Some(Completeness::Incomplete),
            "noAssertion" => Some(Completeness::NoAssertion),
            _ => None,
        }
    }
}

/// Build lifecycle phase a dependency relationship applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleScope {
    Runtime,
    Test,
    Other,
}

impl LifecycleScope {
    pub fn vocabulary_name(self) -> &'static str {
        match self {
            LifecycleScope::Runtime => "runtime",
            LifecycleScope::Test => "test",
            LifecycleScope::Other => "other",
        }
    }

    pub fn from_vocabulary_name(name: &str) -> Option<Self> {
        match name {
            "runtime" => Some(LifecycleScope::Runtime),
            "test" => Some(LifecycleScope::Test),
            "other" => Some(LifecycleScope::Other),
            _ => None,
        }
    }
}

/// A directed, immutable edge between two elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relationship {
    pub from: ElementRef,
    pub relationship_type: RelationshipType,
    pub to: ElementRef,
    pub completeness: Option<Completeness>,
    pub scope: Option<LifecycleScope>,
    pub comment: Option<String>,
}

impl Relationship {
    pub fn new(from: ElementRef, relationship_type: RelationshipType, to: ElementRef) -> Self {
        Self {
            from,
            relationship_type,
            to,
            completeness: None,
            scope: None,
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_completeness(mut self, completeness: Completeness) -> Self {
        self.completeness = Some(completeness);
        self
    }

    pub fn with_scope(mut self, scope: LifecycleScope) -> Self {
        self.scope = Some(scope);
        self
    }
}
