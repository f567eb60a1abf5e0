use super::schema_mismatch;
use crate::ports::outbound::SbomSerializer;
use crate::sbom_generation::domain::SbomDocument;
use crate::shared::Result;

/// JsonLdSerializer adapter for the SPDX 3.0.1 JSON-LD format
pub struct JsonLdSerializer;

impl JsonLdSerializer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonLdSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomSerializer for JsonLdSerializer {
    fn serialize(&self, document: &SbomDocument) -> Result<String> {
        match document {
            SbomDocument::RelationshipCentric(document) => {
                let mut json = serde_json::to_string_pretty(document)?;
                json.push('\n');
                Ok(json)
            }
            other => Err(schema_mismatch("JSON-LD", other.schema_version())),
        }
    }
}
