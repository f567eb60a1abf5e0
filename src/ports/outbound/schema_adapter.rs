use crate::sbom_generation::domain::{
    Annotation, CustomLicense, DocumentInfo, ElementId, ExternalDocumentReference, FileRecord,
    LicenseExpression, PackageInfo, Relationship, SbomDocument, SchemaVersion, SnippetRecord,
    VerificationCode,
};

/// Which license statement is being made about a package or file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LicenseAssertionKind {
    Declared,
    Concluded,
    /// One of the licenses found in the files of a package. Additive.
    InfoFromFiles,
}

/// SchemaVersionAdapter port: one strategy per target schema.
///
/// The collector, the dependency transformer and the document assembler
/// only talk to this trait. An adapter owns the document being built
/// (every element, relationship and license it creates) and issues the
/// local IDs for it.
pub trait SchemaVersionAdapter {
    fn schema_version(&self) -> SchemaVersion;

    /// Creates a package element and returns its local ID.
    fn materialize_package(&mut self, package: PackageInfo) -> ElementId;

    /// Creates a file element and returns its local ID.
    fn materialize_file(&mut self, file: &FileRecord) -> ElementId;

    /// Creates a snippet of an existing file element and returns its local ID.
    /// The snippet's concluded license and license info are asserted with it.
    fn materialize_snippet(&mut self, file: &ElementId, snippet: &SnippetRecord) -> ElementId;

    /// Records a license statement about a package or file.
    fn materialize_license_assertion(
        &mut self,
        subject: &ElementId,
        kind: LicenseAssertionKind,
        license: &LicenseExpression,
    );

    fn materialize_relationship(&mut self, relationship: Relationship);

    fn register_custom_license(&mut self, license: &CustomLicense);

    fn add_external_document_ref(&mut self, reference: &ExternalDocumentReference);

    fn set_verification_code(&mut self, package: &ElementId, code: &VerificationCode);

    /// Annotates an element; `ElementId::document()` annotates the document.
    fn add_annotation(&mut self, subject: &ElementId, annotation: &Annotation);

    /// The license currently asserted about `subject`, read back from the
    /// schema's own representation. `InfoFromFiles` returns the conjunction
    /// of every asserted license.
    fn asserted_license(
        &self,
        subject: &ElementId,
        kind: LicenseAssertionKind,
    ) -> Option<LicenseExpression>;

    /// All element-to-element relationships, in the schema-neutral vocabulary.
    fn relationships(&self) -> Vec<Relationship>;

    /// Local IDs of every package, file and snippet created so far.
    fn element_ids(&self) -> Vec<ElementId>;

    /// File names of every file element, in creation order.
    fn file_names(&self) -> Vec<String>;

    /// Every custom license ID referenced by an assertion.
    fn referenced_custom_license_ids(&self) -> Vec<String>;

    /// Every custom license ID registered with the document.
    fn registered_custom_license_ids(&self) -> Vec<String>;

    /// Consumes the adapter and produces the finished document.
    fn finish(self: Box<Self>, info: &DocumentInfo) -> SbomDocument;
}
