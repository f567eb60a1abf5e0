use crate::sbom_generation::domain::{ArtifactCoordinates, LicenseExpression};
use crate::shared::{AssemblyError, AssemblyResult, ErrorKind};
use std::str::FromStr;

/// Which license field of a synthesized dependency package an overwrite replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteTarget {
    Both,
    Concluded,
    Declared,
}

impl OverwriteTarget {
    fn covers(self, field: LicenseField) -> bool {
        match self {
            OverwriteTarget::Both => true,
            OverwriteTarget::Concluded => field == LicenseField::Concluded,
            OverwriteTarget::Declared => field == LicenseField::Declared,
        }
    }
}

impl FromStr for OverwriteTarget {
    type Err = AssemblyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "both" => Ok(OverwriteTarget::Both),
            "concluded" => Ok(OverwriteTarget::Concluded),
            "declared" => Ok(OverwriteTarget::Declared),
            other => Err(AssemblyError::new(
                ErrorKind::InvalidConfiguration,
                format!(
                    "license overwrite target '{}' is none of: both, concluded, declared",
                    other
                ),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseField {
    Concluded,
    Declared,
}

/// A user-configured replacement license for one dependency.
#[derive(Debug, Clone, PartialEq)]
pub struct LicenseOverwrite {
    pub target: OverwriteTarget,
    pub group_id: String,
    pub artifact_id: String,
    /// Matches every version when absent.
    pub version: Option<String>,
    pub license: LicenseExpression,
}

impl LicenseOverwrite {
    fn applies_to(&self, coordinates: &ArtifactCoordinates, field: LicenseField) -> bool {
        self.group_id == coordinates.group_id
            && self.artifact_id == coordinates.artifact_id
            && self
                .version
                .as_deref()
                .is_none_or(|version| version == coordinates.version)
            && self.target.covers(field)
    }
}

/// LicenseOverwritePolicy selects the overwrite that applies to a dependency.
///
/// At most one overwrite may match a given artifact and field; several
/// matches are a configuration error.
#[derive(Debug, Clone, Default)]
pub struct LicenseOverwritePolicy {
    overwrites: Vec<LicenseOverwrite>,
}

impl LicenseOverwritePolicy {
    pub fn new(overwrites: Vec<LicenseOverwrite>) -> Self {
        Self { overwrites }
    }

    pub fn is_empty(&self) -> bool {
        self.overwrites.is_empty()
    }

    /// Returns the replacement license for `field`, if one is configured.
    pub fn apply(
        &self,
        coordinates: &ArtifactCoordinates,
        field: LicenseField,
    ) -> AssemblyResult<Option<&LicenseExpression>> {
        let mut matching = self
            .overwrites
            .iter()
            .filter(|overwrite| overwrite.applies_to(coordinates, field));
        let first = matching.next();
        if let (Some(a), Some(b)) = (first, matching.next()) {
            return Err(AssemblyError::new(
                ErrorKind::InvalidConfiguration,
                format!(
                    "multiple matching license overwrites for {}: '{}' vs. '{}'",
                    coordinates, a.license, b.license
                ),
            ));
        }
        Ok(first.map(|overwrite| &overwrite.license))
    }
}
