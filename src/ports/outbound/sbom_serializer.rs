use crate::sbom_generation::domain::SbomDocument;
use crate::shared::Result;

/// SbomSerializer port for encoding a finished document.
///
/// Each implementation supports one concrete format and refuses documents
/// of a schema it cannot express.
pub trait SbomSerializer {
    /// Encodes `document` into its textual form.
    ///
    /// # Errors
    /// Returns an error if the document's schema is not supported by this
    /// format or if encoding fails
    fn serialize(&self, document: &SbomDocument) -> Result<String>;
}
