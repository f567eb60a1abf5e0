use crate::sbom_generation::domain::SbomDocument;

/// AssemblyResponse - Internal response DTO from the SBOM assembly use case
///
/// Carries the finished document; serialization and presentation are left
/// to the caller.
#[derive(Debug, Clone)]
pub struct AssemblyResponse {
    pub document: SbomDocument,
    /// Recoverable problems raised during assembly, in the order they occurred
    pub warnings: Vec<String>,
    /// Problems found by the final document verification
    pub verification_problems: Vec<String>,
    pub file_count: usize,
    pub dependency_count: usize,
    pub external_document_count: usize,
}

impl AssemblyResponse {
    pub fn is_verified(&self) -> bool {
        self.verification_problems.is_empty()
    }
}
