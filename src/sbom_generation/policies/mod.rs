mod license_overwrite_policy;
mod relationship_policy;

pub use license_overwrite_policy::{
    LicenseField, LicenseOverwrite, LicenseOverwritePolicy, OverwriteTarget,
};
pub use relationship_policy::{DependencyClassification, RelationshipPolicy};
