use crate::sbom_generation::domain::{CustomLicense, PackageInfo, SchemaVersion};
use crate::shared::AssemblyResult;
use std::path::Path;

/// A package described by a previously generated SBOM.
#[derive(Debug, Clone)]
pub struct ExternalPackage {
    /// Element ID inside the external document.
    pub element_id: String,
    /// Descriptive fields only; relationships are never carried over.
    pub info: PackageInfo,
    pub declared_license: Option<String>,
    pub concluded_license: Option<String>,
    /// Custom licenses of the external document referenced by this package.
    pub custom_licenses: Vec<CustomLicense>,
}

/// Schema-neutral summary of a dependency's sidecar SBOM.
#[derive(Debug, Clone)]
pub struct ExternalSbom {
    pub namespace: String,
    pub schema_version: SchemaVersion,
    pub described_packages: Vec<ExternalPackage>,
}

/// SbomDocumentReader port for reading dependency sidecar documents.
pub trait SbomDocumentReader {
    /// Reads and summarizes the document at `path`.
    ///
    /// # Errors
    /// Returns `ExternalDocumentUnreadable` if the file cannot be read or
    /// its format is not supported
    fn read_document(&self, path: &Path) -> AssemblyResult<ExternalSbom>;
}
