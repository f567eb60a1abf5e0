use super::schema_mismatch;
use crate::ports::outbound::SbomSerializer;
use crate::sbom_generation::domain::SbomDocument;
use crate::shared::Result;

/// SpdxJsonSerializer adapter for the SPDX 2.3 JSON format
///
/// This adapter implements the SbomSerializer port for attribute-centric
/// documents. Output is pretty-printed.
pub struct SpdxJsonSerializer;

impl SpdxJsonSerializer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SpdxJsonSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomSerializer for SpdxJsonSerializer {
    fn serialize(&self, document: &SbomDocument) -> Result<String> {
        match document {
            SbomDocument::AttributeCentric(document) => {
                let mut json = serde_json::to_string_pretty(document)?;
                json.push('\n');
                Ok(json)
            }
            other => Err(schema_mismatch("JSON", other.schema_version())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_generation::domain::document::spdx2::{self, SpdxV2Document};
    use crate::sbom_generation::domain::document::spdx3::{SpdxV3Document, CONTEXT_URL};
    use crate::shared::{AssemblyError, ErrorKind};

    fn document() -> SpdxV2Document {
        SpdxV2Document {
            spdx_id: "SPDXRef-DOCUMENT".into(),
            spdx_version: "SPDX-2.3".into(),
            data_license: "CC0-1.0".into(),
            name: "demo".into(),
            document_namespace: "https://example.org/demo".into(),
            creation_info: spdx2::CreationInfo {
                created: "2024-01-01T00:00:00Z".into(),
                creators: vec!["Tool: spdx-sbom".into()],
                ..Default::default()
            },
            packages: vec![spdx2::Package {
                spdx_id: "SPDXRef-Package-1".into(),
                name: "demo".into(),
                download_location: "NOASSERTION".into(),
                license_concluded: "NOASSERTION".into(),
                license_declared: "MIT".into(),
                copyright_text: "NOASSERTION".into(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_serializes_attribute_centric_document() {
        let json = SpdxJsonSerializer::new()
            .serialize(&SbomDocument::AttributeCentric(document()))
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["SPDXID"], "SPDXRef-DOCUMENT");
        assert_eq!(value["spdxVersion"], "SPDX-2.3");
        assert_eq!(value["packages"][0]["licenseDeclared"], "MIT");
        assert!(value.get("files").is_none());
        let back: SpdxV2Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, document());
    }

    #[test]
    fn test_rejects_relationship_centric_document() {
        let document = SbomDocument::RelationshipCentric(SpdxV3Document {
            context: CONTEXT_URL.into(),
            graph: Vec::new(),
        });

        let err = SpdxJsonSerializer::new().serialize(&document).unwrap_err();
        assert_eq!(
            err.downcast_ref::<AssemblyError>().unwrap().kind(),
            ErrorKind::SchemaFormatMismatch
        );
    }
}
