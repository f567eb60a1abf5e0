use super::license_resolver::LicenseResolver;
use crate::ports::outbound::SchemaVersionAdapter;
use crate::sbom_generation::domain::{
    CustomLicense, DocumentInfo, ExternalDocumentReference, SbomDocument, SchemaVersion,
};
use crate::shared::AssemblyResult;
use std::collections::HashMap;

/// State owned by exactly one assembly run.
///
/// Owns the schema adapter (and through it every element of the document),
/// the license resolver with its custom licenses, the external document
/// references deduplicated by namespace, and the warnings raised so far.
pub struct AssemblySession {
    adapter: Box<dyn SchemaVersionAdapter>,
    resolver: LicenseResolver,
    external_documents: HashMap<String, ExternalDocumentReference>,
    warnings: Vec<String>,
}

impl AssemblySession {
    pub fn new(adapter: Box<dyn SchemaVersionAdapter>, resolver: LicenseResolver) -> Self {
        Self {
            adapter,
            resolver,
            external_documents: HashMap::new(),
            warnings: Vec::new(),
        }
    }

    pub fn schema_version(&self) -> SchemaVersion {
        self.adapter.schema_version()
    }

    pub fn adapter(&self) -> &dyn SchemaVersionAdapter {
        self.adapter.as_ref()
    }

    pub fn adapter_mut(&mut self) -> &mut dyn SchemaVersionAdapter {
        self.adapter.as_mut()
    }

    pub fn resolver(&self) -> &LicenseResolver {
        &self.resolver
    }

    /// Records a recoverable problem.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.warnings.push(message);
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Registers a custom license with both the resolver and the document.
    ///
    /// # Errors
    /// Returns `InvalidLicenseExpression` if the ID is not a `LicenseRef-` ID
    pub fn register_custom_license(&mut self, license: CustomLicense) -> AssemblyResult<()> {
        self.resolver.register_custom(license.clone())?;
        self.adapter.register_custom_license(&license);
        self.collect_resolver_warnings();
        Ok(())
    }

    /// Returns the reference already recorded for this namespace, or records
    /// `candidate`. A candidate whose ID is taken by another namespace gets a
    /// numeric suffix.
    pub fn external_document(
        &mut self,
        candidate: ExternalDocumentReference,
    ) -> ExternalDocumentReference {
        if let Some(existing) = self.external_documents.get(&candidate.namespace) {
            return existing.clone();
        }

        let mut reference = candidate;
        let base_id = reference.id.clone();
        let mut suffix = 1;
        while self
            .external_documents
            .values()
            .any(|r| r.id == reference.id)
        {
            suffix += 1;
            reference.id = format!("{}-{}", base_id, suffix);
        }

        self.adapter.add_external_document_ref(&reference);
        self.external_documents
            .insert(reference.namespace.clone(), reference.clone());
        reference
    }

    pub fn external_document_count(&self) -> usize {
        self.external_documents.len()
    }

    /// IDs of every external document reference recorded in this run.
    pub fn external_document_ids(&self) -> Vec<String> {
        self.external_documents.values().map(|r| r.id.clone()).collect()
    }

    /// Registers placeholders for referenced but unregistered custom licenses.
    pub fn register_missing_custom_licenses(&mut self) {
        let referenced = self.adapter.referenced_custom_license_ids();
        let placeholders = self
            .resolver
            .register_placeholders(referenced.iter().map(String::as_str));
        for placeholder in &placeholders {
            self.adapter.register_custom_license(placeholder);
        }
        self.collect_resolver_warnings();
    }

    fn collect_resolver_warnings(&mut self) {
        self.warnings.extend(self.resolver.take_warnings());
    }

    /// Finalizes the document and hands back the warnings of the run.
    pub fn finish(mut self, info: &DocumentInfo) -> (SbomDocument, Vec<String>) {
        self.register_missing_custom_licenses();
        let document = self.adapter.finish(info);
        (document, self.warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::schema::AttributeCentricAdapter;
    use crate::ports::outbound::{LicenseAssertionKind, LicenseCatalogSource};
    use crate::sbom_generation::domain::{
        Checksum, ChecksumAlgorithm, LicenseExpression, PackageInfo,
    };
    use crate::sbom_generation::services::LicenseCatalog;
    use std::sync::Arc;

    struct EmptySource;

    impl LicenseCatalogSource for EmptySource {
        fn describe(&self) -> &str {
            "empty"
        }

        fn fetch_license_list(&self) -> crate::shared::Result<String> {
            Ok(r#"{"licenses": []}"#.to_string())
        }
    }

    fn session() -> AssemblySession {
        let catalog = Arc::new(LicenseCatalog::new(None, Box::new(EmptySource)));
        AssemblySession::new(
            Box::new(AttributeCentricAdapter::new()),
            LicenseResolver::new(catalog, true),
        )
    }

    fn reference(id: &str, namespace: &str) -> ExternalDocumentReference {
        ExternalDocumentReference::new(
            id,
            namespace,
            Checksum::new(ChecksumAlgorithm::Sha1, "dd".repeat(20)),
        )
    }

    fn info() -> DocumentInfo {
        DocumentInfo {
            name: "demo".into(),
            namespace: "https://example.org/demo".into(),
            creators: vec!["Tool: spdx-sbom".into()],
            creator_comment: None,
            created: "2024-01-01T00:00:00Z".into(),
            comment: None,
            license_list_version: None,
        }
    }

    #[test]
    fn test_external_documents_are_deduplicated_by_namespace() {
        let mut session = session();
        let first = session.external_document(reference("DocumentRef-a", "https://x/doc"));
        let second = session.external_document(reference("DocumentRef-b", "https://x/doc"));
        let third = session.external_document(reference("DocumentRef-c", "https://x/doc"));

        assert_eq!(first, second);
        assert_eq!(second, third);
        assert_eq!(session.external_document_count(), 1);

        let (document, _) = session.finish(&info());
        let SbomDocument::AttributeCentric(doc) = document else {
            panic!("expected attribute-centric document");
        };
        assert_eq!(doc.external_document_refs.len(), 1);
        assert_eq!(doc.external_document_refs[0].external_document_id, "DocumentRef-a");
    }

    #[test]
    fn test_colliding_reference_ids_get_a_suffix() {
        let mut session = session();
        session.external_document(reference("DocumentRef-a", "https://x/one"));
        let second = session.external_document(reference("DocumentRef-a", "https://x/two"));
        assert_eq!(second.id, "DocumentRef-a-2");
    }

    #[test]
    fn test_finish_registers_placeholders() {
        let mut session = session();
        let package = session
            .adapter_mut()
            .materialize_package(PackageInfo::new("demo"));
        session.adapter_mut().materialize_license_assertion(
            &package,
            LicenseAssertionKind::Declared,
            &LicenseExpression::Custom("LicenseRef-Unknown".into()),
        );

        let (document, warnings) = session.finish(&info());
        let SbomDocument::AttributeCentric(doc) = document else {
            panic!("expected attribute-centric document");
        };
        assert_eq!(doc.has_extracted_licensing_infos.len(), 1);
        assert_eq!(doc.has_extracted_licensing_infos[0].license_id, "LicenseRef-Unknown");
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_register_custom_license_reaches_document() {
        let mut session = session();
        session
            .register_custom_license(CustomLicense::new("LicenseRef-Acme", "Acme terms"))
            .unwrap();
        assert_eq!(
            session.adapter().registered_custom_license_ids(),
            vec!["LicenseRef-Acme"]
        );
        assert!(session.resolver().custom_license("LicenseRef-Acme").is_some());
    }
}
