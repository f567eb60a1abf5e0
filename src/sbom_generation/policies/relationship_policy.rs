use crate::sbom_generation::domain::{LifecycleScope, RelationshipType};

/// RelationshipPolicy encodes how a dependency edge is classified.
///
/// Precedence:
/// 1. optional dependency => OPTIONAL_COMPONENT_OF (regardless of scope)
/// 2. `compile` / `runtime` scope => DYNAMIC_LINK
/// 3. `test` scope => TEST_DEPENDENCY_OF
/// 4. anything else => OTHER
pub struct RelationshipPolicy;

/// Outcome of classifying one dependency edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyClassification {
    pub relationship_type: RelationshipType,
    pub lifecycle_scope: LifecycleScope,
    /// False when the scope string was not recognized.
    pub recognized: bool,
}

impl RelationshipPolicy {
    /// Classifies a dependency by its Maven-style scope and optional flag.
    ///
    /// # Arguments
    /// * `scope` - Dependency scope (`compile`, `runtime`, `test`, ...), if known
    /// * `optional` - Whether the dependency is declared optional
    pub fn classify(scope: Option<&str>, optional: bool) -> DependencyClassification {
        let lifecycle_scope = Self::lifecycle_scope(scope);
        if optional {
            return DependencyClassification {
                relationship_type: RelationshipType::OptionalComponentOf,
                lifecycle_scope,
                recognized: true,
            };
        }
        let relationship_type = match scope.map(str::trim) {
            Some("compile") | Some("runtime") => RelationshipType::DynamicLink,
            Some("test") => RelationshipType::TestDependencyOf,
            _ => RelationshipType::Other,
        };
        DependencyClassification {
            relationship_type,
            lifecycle_scope,
            recognized: relationship_type != RelationshipType::Other,
        }
    }

    /// Lifecycle scope used by the relationship-centric schema.
    pub fn lifecycle_scope(scope: Option<&str>) -> LifecycleScope {
        match scope.map(str::trim) {
            Some("compile") | Some("runtime") => LifecycleScope::Runtime,
            Some("test") => LifecycleScope::Test,
            _ => LifecycleScope::Other,
        }
    }
}
