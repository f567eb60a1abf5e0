use super::checksum::Checksum;

/// Prefix of every external document reference ID.
pub const DOCUMENT_REF_PREFIX: &str = "DocumentRef-";

/// Pointer to another, independently owned SBOM document.
///
/// Identified only by namespace and checksum; one reference exists per
/// distinct namespace within a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalDocumentReference {
    pub id: String,
    pub namespace: String,
    pub checksum: Checksum,
}

impl ExternalDocumentReference {
    pub fn new(id: impl Into<String>, namespace: impl Into<String>, checksum: Checksum) -> Self {
        Self {
            id: id.into(),
            namespace: namespace.into(),
            checksum,
        }
    }
}

/// Builds a `DocumentRef-` ID from artifact coordinates, replacing every
/// character outside `[A-Za-z0-9.-]` with `-`.
pub fn document_ref_id(group_id: &str, artifact_id: &str, version: &str) -> String {
    let raw = format!("{}-{}-{}", group_id, artifact_id, version);
    let sanitized: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect();
    format!("{}{}", DOCUMENT_REF_PREFIX, sanitized)
}
