//! Finished document object graphs, one per target schema.
//!
//! The attribute-centric graph ([`spdx2`]) records licenses as fields of
//! packages and files; the relationship-centric graph ([`spdx3`]) records
//! them as relationship elements pointing at license elements.

pub mod spdx2;
pub mod spdx3;

use std::fmt;
use std::str::FromStr;

/// Data license every generated document is released under.
pub const DATA_LICENSE: &str = "CC0-1.0";

/// Target schema of one assembly run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaVersion {
    /// SPDX 2.3, attribute-centric.
    V2,
    /// SPDX 3.0.1, relationship-centric.
    V3,
}

impl SchemaVersion {
    pub fn spec_version(self) -> &'static str {
        match self {
            SchemaVersion::V2 => "SPDX-2.3",
            SchemaVersion::V3 => "3.0.1",
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaVersion::V2 => write!(f, "2"),
            SchemaVersion::V3 => write!(f, "3"),
        }
    }
}

impl FromStr for SchemaVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().trim_start_matches("spdx-") {
            "2" | "2.3" | "v2" => Ok(SchemaVersion::V2),
            "3" | "3.0" | "3.0.1" | "v3" => Ok(SchemaVersion::V3),
            _ => Err(format!(
                "Invalid spec version: {}. Please specify '2' or '3'",
                s
            )),
        }
    }
}

/// Document-level information supplied when the document is finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    pub name: String,
    pub namespace: String,
    pub creators: Vec<String>,
    pub creator_comment: Option<String>,
    /// RFC 3339 creation timestamp (UTC, second precision).
    pub created: String,
    pub comment: Option<String>,
    pub license_list_version: Option<String>,
}

/// A finished document, ready for serialization.
#[derive(Debug, Clone, PartialEq)]
pub enum SbomDocument {
    AttributeCentric(spdx2::SpdxV2Document),
    RelationshipCentric(spdx3::SpdxV3Document),
}

impl SbomDocument {
    pub fn schema_version(&self) -> SchemaVersion {
        match self {
            SbomDocument::AttributeCentric(_) => SchemaVersion::V2,
            SbomDocument::RelationshipCentric(_) => SchemaVersion::V3,
        }
    }
}
