//! Relationship-centric (SPDX 3.0.1) document builder.
//!
//! Every element gets an IRI `<namespace>#<local id>`. Licenses are separate
//! elements; packages and files point at them through `hasDeclaredLicense`
//! and `hasConcludedLicense` relationships.

use crate::ports::outbound::{LicenseAssertionKind, SchemaVersionAdapter};
use crate::sbom_generation::domain::document::spdx3::{
    self, AgentElement, AnnotationElement, CustomLicenseElement, ExternalMap, ExternalRefEntry,
    FileElement, GraphElement, Hash, LicenseExpressionElement, NamespaceMap, PackageElement,
    PositiveIntegerRange, RelationshipElement, SnippetElement, SpdxDocumentElement,
    CREATION_INFO_ID, NONE_LICENSE, NO_ASSERTION_LICENSE, SPDX_ORGANIZATION,
};
use crate::sbom_generation::domain::document::DATA_LICENSE;
use crate::sbom_generation::domain::{
    Annotation, AnnotationType, Checksum, Completeness, CustomLicense, DocumentInfo, ElementId,
    ElementRef, ExternalDocumentReference, FileRecord, IdAllocator, LicenseExpression,
    LifecycleScope, PackageInfo, Relationship, RelationshipType, SbomDocument, SchemaVersion,
    SnippetRange, SnippetRecord, VerificationCode,
};
use std::collections::{BTreeSet, HashMap};

const HAS_DECLARED_LICENSE: &str = "hasDeclaredLicense";
const HAS_CONCLUDED_LICENSE: &str = "hasConcludedLicense";

/// Builds an [`spdx3::SpdxV3Document`].
pub struct RelationshipCentricAdapter {
    namespace: String,
    ids: IdAllocator,
    agents: Vec<GraphElement>,
    packages: Vec<PackageElement>,
    files: Vec<FileElement>,
    snippets: Vec<SnippetElement>,
    licenses: Vec<LicenseExpressionElement>,
    license_iris: HashMap<String, String>,
    custom_licenses: Vec<CustomLicenseElement>,
    relationships: Vec<(bool, RelationshipElement)>,
    annotations: Vec<AnnotationElement>,
    imports: Vec<ExternalMap>,
    namespace_maps: Vec<NamespaceMap>,
    external_documents: HashMap<String, ExternalDocumentReference>,
    external_iris: HashMap<String, ElementRef>,
    referenced_custom_ids: BTreeSet<String>,
}

impl RelationshipCentricAdapter {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into().trim_end_matches('#').to_string(),
            ids: IdAllocator::new(),
            agents: Vec::new(),
            packages: Vec::new(),
            files: Vec::new(),
            snippets: Vec::new(),
            licenses: Vec::new(),
            license_iris: HashMap::new(),
            custom_licenses: Vec::new(),
            relationships: Vec::new(),
            annotations: Vec::new(),
            imports: Vec::new(),
            namespace_maps: Vec::new(),
            external_documents: HashMap::new(),
            external_iris: HashMap::new(),
            referenced_custom_ids: BTreeSet::new(),
        }
    }

    fn iri(&self, id: &str) -> String {
        format!("{}#{}", self.namespace, id)
    }

    fn local_id<'a>(&self, iri: &'a str) -> Option<&'a str> {
        iri.strip_prefix(self.namespace.as_str())?.strip_prefix('#')
    }

    fn element_iri(&mut self, element: &ElementRef) -> String {
        match element {
            ElementRef::Local(id) => self.iri(id.as_str()),
            ElementRef::External {
                document_ref,
                element_id,
            } => {
                let Some(reference) = self.external_documents.get(document_ref) else {
                    tracing::warn!("element {} refers to an unknown external document", element);
                    return element.to_string();
                };
                let iri = format!("{}#{}", reference.namespace.trim_end_matches('#'), element_id);
                if !self.imports.iter().any(|m| m.external_spdx_id == iri) {
                    self.imports.push(ExternalMap {
                        map_type: "ExternalMap".to_string(),
                        external_spdx_id: iri.clone(),
                        verified_using: vec![hash(&reference.checksum)],
                        location_hint: None,
                    });
                }
                self.external_iris.insert(iri.clone(), element.clone());
                iri
            }
        }
    }

    fn element_ref(&self, iri: &str) -> ElementRef {
        if let Some(external) = self.external_iris.get(iri) {
            return external.clone();
        }
        match self.local_id(iri) {
            Some(id) => ElementRef::Local(ElementId::from_raw(id)),
            None => ElementRef::Local(ElementId::from_raw(iri)),
        }
    }

    /// IRI of an agent element for `Tool: x`, `Person: x` or `Organization: x`,
    /// created on first use.
    fn agent_iri(&mut self, agent: &str) -> Option<String> {
        let (kind, name) = agent.split_once(':')?;
        let name = name.trim().to_string();
        if name.is_empty() {
            return None;
        }
        let existing = self.agents.iter().find_map(|element| match element {
            GraphElement::Organization(a) | GraphElement::Person(a) | GraphElement::Tool(a)
                if a.name == name =>
            {
                Some(a.spdx_id.clone())
            }
            _ => None,
        });
        if existing.is_some() {
            return existing;
        }
        let kind = kind.trim();
        let id = self.ids.allocate(kind);
        let element = AgentElement {
            spdx_id: self.iri(id.as_str()),
            creation_info: CREATION_INFO_ID.to_string(),
            name,
        };
        let iri = element.spdx_id.clone();
        match kind {
            "Tool" => self.agents.push(GraphElement::Tool(element)),
            "Person" => self.agents.push(GraphElement::Person(element)),
            "Organization" => self.agents.push(GraphElement::Organization(element)),
            _ => return None,
        }
        Some(iri)
    }

    fn license_iri(&mut self, license: &LicenseExpression) -> String {
        match license {
            LicenseExpression::NoAssertion => NO_ASSERTION_LICENSE.to_string(),
            LicenseExpression::None => NONE_LICENSE.to_string(),
            LicenseExpression::Custom(id) if !id.contains(':') => self.iri(id),
            other => {
                let text = other.to_string();
                if let Some(iri) = self.license_iris.get(&text) {
                    return iri.clone();
                }
                let id = self.ids.allocate("License");
                let iri = self.iri(id.as_str());
                self.licenses.push(LicenseExpressionElement {
                    spdx_id: iri.clone(),
                    creation_info: CREATION_INFO_ID.to_string(),
                    license_expression: text.clone(),
                });
                self.license_iris.insert(text, iri.clone());
                iri
            }
        }
    }

    fn license_for_iri(&self, iri: &str) -> Option<LicenseExpression> {
        if iri == NO_ASSERTION_LICENSE {
            return Some(LicenseExpression::NoAssertion);
        }
        if iri == NONE_LICENSE {
            return Some(LicenseExpression::None);
        }
        if let Some(license) = self.licenses.iter().find(|l| l.spdx_id == iri) {
            return LicenseExpression::parse(&license.license_expression).ok();
        }
        self.local_id(iri)
            .filter(|id| id.starts_with("LicenseRef-"))
            .map(|id| LicenseExpression::Custom(id.to_string()))
    }

    fn push_relationship(
        &mut self,
        from: String,
        relationship_type: &str,
        to: String,
        completeness: Option<Completeness>,
        scope: Option<LifecycleScope>,
        comment: Option<String>,
    ) {
        let id = self.ids.allocate("Relationship");
        let element = RelationshipElement {
            spdx_id: self.iri(id.as_str()),
            creation_info: CREATION_INFO_ID.to_string(),
            from,
            to: vec![to],
            relationship_type: relationship_type.to_string(),
            completeness: completeness.map(|c| c.vocabulary_name().to_string()),
            scope: scope.map(|s| s.vocabulary_name().to_string()),
            comment,
        };
        self.relationships.push((scope.is_some(), element));
    }

    /// Files and snippets carry their own declared license; packages derive
    /// theirs from the files they contain.
    fn is_file_like(&self, iri: &str) -> bool {
        self.files.iter().any(|f| f.spdx_id == iri) || self.snippets.iter().any(|s| s.spdx_id == iri)
    }

    fn license_relationship_type(subject_is_file: bool, kind: LicenseAssertionKind) -> Option<&'static str> {
        match kind {
            LicenseAssertionKind::Declared => Some(HAS_DECLARED_LICENSE),
            LicenseAssertionKind::Concluded => Some(HAS_CONCLUDED_LICENSE),
            LicenseAssertionKind::InfoFromFiles if subject_is_file => Some(HAS_DECLARED_LICENSE),
            // Derived from the contained files' declared licenses.
            LicenseAssertionKind::InfoFromFiles => None,
        }
    }

    fn set_license(&mut self, subject_iri: String, relationship_type: &str, license: &LicenseExpression) {
        self.relationships.retain(|(_, r)| {
            !(r.from == subject_iri && r.relationship_type == relationship_type)
        });
        let license_iri = self.license_iri(license);
        self.push_relationship(
            subject_iri,
            relationship_type,
            license_iri,
            Some(Completeness::Complete),
            None,
            None,
        );
    }

    fn license_target(&self, subject_iri: &str, relationship_type: &str) -> Option<LicenseExpression> {
        self.relationships
            .iter()
            .find(|(_, r)| r.from == subject_iri && r.relationship_type == relationship_type)
            .and_then(|(_, r)| r.to.first())
            .and_then(|iri| self.license_for_iri(iri))
    }
}

fn hash(checksum: &Checksum) -> Hash {
    Hash {
        hash_type: "Hash".to_string(),
        algorithm: checksum.algorithm.hash_vocabulary_name().to_string(),
        hash_value: checksum.value.clone(),
        excluded_files: Vec::new(),
    }
}

fn integer_range(range: SnippetRange) -> PositiveIntegerRange {
    PositiveIntegerRange::new(range.start, range.end)
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Relationship-centric spelling of an engine relationship, with the
/// direction flipped for the `_OF` types.
fn outbound_type(relationship_type: RelationshipType) -> (&'static str, bool, Option<LifecycleScope>) {
    match relationship_type {
        RelationshipType::Describes => ("describes", false, None),
        RelationshipType::Contains => ("contains", false, None),
        RelationshipType::Generates => ("generates", false, None),
        RelationshipType::DynamicLink => ("hasDynamicLink", false, None),
        RelationshipType::DependsOn => ("dependsOn", false, None),
        RelationshipType::TestDependencyOf => ("dependsOn", true, Some(LifecycleScope::Test)),
        RelationshipType::OptionalComponentOf => ("hasOptionalComponent", true, None),
        RelationshipType::HasDeclaredLicense => (HAS_DECLARED_LICENSE, false, None),
        RelationshipType::HasConcludedLicense => (HAS_CONCLUDED_LICENSE, false, None),
        RelationshipType::Other => ("other", false, None),
    }
}

fn inbound_type(name: &str, scope: Option<LifecycleScope>) -> Option<(RelationshipType, bool)> {
    Some(match name {
        "describes" => (RelationshipType::Describes, false),
        "contains" => (RelationshipType::Contains, false),
        "generates" => (RelationshipType::Generates, false),
        "hasDynamicLink" => (RelationshipType::DynamicLink, false),
        "dependsOn" if scope == Some(LifecycleScope::Test) => {
            (RelationshipType::TestDependencyOf, true)
        }
        "dependsOn" => (RelationshipType::DependsOn, false),
        "hasOptionalComponent" => (RelationshipType::OptionalComponentOf, true),
        "other" => (RelationshipType::Other, false),
        _ => return None,
    })
}

impl SchemaVersionAdapter for RelationshipCentricAdapter {
    fn schema_version(&self) -> SchemaVersion {
        SchemaVersion::V3
    }

    fn materialize_package(&mut self, package: PackageInfo) -> ElementId {
        let id = self.ids.allocate("Package");
        let supplied_by = package.supplier.as_deref().and_then(|s| self.agent_iri(s));
        let originated_by = package
            .originator
            .as_deref()
            .and_then(|o| self.agent_iri(o))
            .into_iter()
            .collect();
        let package_url = package
            .external_refs
            .iter()
            .find(|r| r.reference_type == "purl")
            .map(|r| r.locator.clone());
        let external_ref = package
            .external_refs
            .iter()
            .filter(|r| r.reference_type != "purl")
            .map(|r| ExternalRefEntry {
                ref_type_tag: "ExternalRef".to_string(),
                external_ref_type: r.reference_type.clone(),
                locator: vec![r.locator.clone()],
                comment: r.comment.clone(),
            })
            .collect();
        let iri = self.iri(id.as_str());

        for annotation in &package.annotations {
            self.push_annotation(iri.clone(), annotation);
        }

        self.packages.push(PackageElement {
            spdx_id: iri,
            creation_info: CREATION_INFO_ID.to_string(),
            name: package.name,
            package_version: package.version,
            download_location: Some(package.download_location),
            home_page: package.homepage,
            package_url,
            source_info: package.source_info,
            primary_purpose: package
                .primary_purpose
                .map(|p| p.software_purpose().to_string()),
            copyright_text: Some(package.copyright),
            summary: package.summary,
            description: package.description,
            comment: package.comment,
            supplied_by,
            originated_by,
            verified_using: package.checksums.iter().map(hash).collect(),
            external_ref,
            built_time: package.built_date,
            release_time: package.release_date,
            valid_until_time: package.valid_until_date,
        });
        id
    }

    fn materialize_file(&mut self, file: &FileRecord) -> ElementId {
        let id = self.ids.allocate("File");
        let iri = self.iri(id.as_str());
        self.files.push(FileElement {
            spdx_id: iri.clone(),
            creation_info: CREATION_INFO_ID.to_string(),
            name: file.path.clone(),
            verified_using: file.checksum_list().iter().map(hash).collect(),
            primary_purpose: Some(file.kind.software_purpose().to_string()),
            copyright_text: Some(file.copyright.clone()),
            attribution_text: non_empty(&file.notice).into_iter().collect(),
            comment: non_empty(&file.comment),
        });
        for license in [&file.concluded_license, &file.declared_license] {
            for custom in license.custom_ids() {
                self.referenced_custom_ids.insert(custom.to_string());
            }
        }
        self.set_license(iri.clone(), HAS_CONCLUDED_LICENSE, &file.concluded_license);
        self.set_license(iri, HAS_DECLARED_LICENSE, &file.declared_license);
        id
    }

    fn materialize_snippet(&mut self, file: &ElementId, snippet: &SnippetRecord) -> ElementId {
        let id = self.ids.allocate("Snippet");
        let iri = self.iri(id.as_str());
        let file_iri = self.iri(file.as_str());
        self.snippets.push(SnippetElement {
            spdx_id: iri.clone(),
            creation_info: CREATION_INFO_ID.to_string(),
            name: non_empty(&snippet.name),
            snippet_from_file: file_iri,
            byte_range: Some(integer_range(snippet.byte_range)),
            line_range: snippet.line_range.map(integer_range),
            copyright_text: Some(snippet.copyright.clone()),
            comment: non_empty(&snippet.comment),
        });
        for license in [&snippet.concluded_license, &snippet.license_info] {
            for custom in license.custom_ids() {
                self.referenced_custom_ids.insert(custom.to_string());
            }
        }
        self.set_license(iri.clone(), HAS_CONCLUDED_LICENSE, &snippet.concluded_license);
        self.set_license(iri, HAS_DECLARED_LICENSE, &snippet.license_info);
        id
    }

    fn materialize_license_assertion(
        &mut self,
        subject: &ElementId,
        kind: LicenseAssertionKind,
        license: &LicenseExpression,
    ) {
        for custom in license.custom_ids() {
            self.referenced_custom_ids.insert(custom.to_string());
        }
        let subject_iri = self.iri(subject.as_str());
        let is_file = self.is_file_like(&subject_iri);
        if let Some(relationship_type) = Self::license_relationship_type(is_file, kind) {
            self.set_license(subject_iri, relationship_type, license);
        }
    }

    fn materialize_relationship(&mut self, relationship: Relationship) {
        let (name, reversed, implied_scope) = outbound_type(relationship.relationship_type);
        let from = self.element_iri(&relationship.from);
        let to = self.element_iri(&relationship.to);
        let (from, to) = if reversed { (to, from) } else { (from, to) };
        self.push_relationship(
            from,
            name,
            to,
            relationship.completeness,
            relationship.scope.or(implied_scope),
            relationship.comment,
        );
    }

    fn register_custom_license(&mut self, license: &CustomLicense) {
        let iri = self.iri(&license.id);
        if let Some(existing) = self.custom_licenses.iter_mut().find(|l| l.spdx_id == iri) {
            existing.license_text = license.extracted_text.clone();
            return;
        }
        self.custom_licenses.push(CustomLicenseElement {
            spdx_id: iri,
            creation_info: CREATION_INFO_ID.to_string(),
            name: license.name.clone(),
            license_text: license.extracted_text.clone(),
            comment: license.comment.clone(),
            see_also: license.cross_refs.clone(),
        });
    }

    fn add_external_document_ref(&mut self, reference: &ExternalDocumentReference) {
        if self.external_documents.contains_key(&reference.id) {
            return;
        }
        self.namespace_maps.push(NamespaceMap {
            map_type: "NamespaceMap".to_string(),
            prefix: reference.id.clone(),
            namespace: format!("{}#", reference.namespace.trim_end_matches('#')),
        });
        self.external_documents
            .insert(reference.id.clone(), reference.clone());
    }

    fn set_verification_code(&mut self, package: &ElementId, code: &VerificationCode) {
        let iri = self.iri(package.as_str());
        if let Some(package) = self.packages.iter_mut().find(|p| p.spdx_id == iri) {
            package.verified_using.push(Hash {
                hash_type: "PackageVerificationCode".to_string(),
                algorithm: "sha1".to_string(),
                hash_value: code.value.clone(),
                excluded_files: code.excluded_files.clone(),
            });
        }
    }

    fn add_annotation(&mut self, subject: &ElementId, annotation: &Annotation) {
        let subject_iri = self.iri(subject.as_str());
        self.push_annotation(subject_iri, annotation);
    }

    fn asserted_license(
        &self,
        subject: &ElementId,
        kind: LicenseAssertionKind,
    ) -> Option<LicenseExpression> {
        let subject_iri = self.iri(subject.as_str());
        let is_file = self.is_file_like(&subject_iri);
        if !is_file && !self.packages.iter().any(|p| p.spdx_id == subject_iri) {
            return None;
        }
        match Self::license_relationship_type(is_file, kind) {
            Some(relationship_type) => self
                .license_target(&subject_iri, relationship_type)
                .or(Some(LicenseExpression::NoAssertion)),
            None => {
                let members: Vec<LicenseExpression> = self
                    .relationships
                    .iter()
                    .filter(|(_, r)| r.from == subject_iri && r.relationship_type == "contains")
                    .flat_map(|(_, r)| r.to.iter())
                    .filter_map(|file| self.license_target(file, HAS_DECLARED_LICENSE))
                    .filter(|l| !matches!(l, LicenseExpression::NoAssertion | LicenseExpression::None))
                    .collect();
                if members.is_empty() {
                    None
                } else {
                    Some(LicenseExpression::conjunction(members))
                }
            }
        }
    }

    fn relationships(&self) -> Vec<Relationship> {
        let mut result = Vec::new();
        for (_, element) in &self.relationships {
            let scope = element
                .scope
                .as_deref()
                .and_then(LifecycleScope::from_vocabulary_name);
            let Some((relationship_type, reversed)) =
                inbound_type(&element.relationship_type, scope)
            else {
                continue;
            };
            for to in &element.to {
                let (from, to) = if reversed {
                    (self.element_ref(to), self.element_ref(&element.from))
                } else {
                    (self.element_ref(&element.from), self.element_ref(to))
                };
                let mut relationship = Relationship::new(from, relationship_type, to);
                relationship.completeness = element
                    .completeness
                    .as_deref()
                    .and_then(Completeness::from_vocabulary_name);
                relationship.scope = scope;
                relationship.comment = element.comment.clone();
                result.push(relationship);
            }
        }
        result
    }

    fn element_ids(&self) -> Vec<ElementId> {
        self.packages
            .iter()
            .map(|p| p.spdx_id.as_str())
            .chain(self.files.iter().map(|f| f.spdx_id.as_str()))
            .chain(self.snippets.iter().map(|s| s.spdx_id.as_str()))
            .filter_map(|iri| self.local_id(iri))
            .map(ElementId::from_raw)
            .collect()
    }

    fn file_names(&self) -> Vec<String> {
        self.files.iter().map(|f| f.name.clone()).collect()
    }

    fn referenced_custom_license_ids(&self) -> Vec<String> {
        self.referenced_custom_ids.iter().cloned().collect()
    }

    fn registered_custom_license_ids(&self) -> Vec<String> {
        self.custom_licenses
            .iter()
            .filter_map(|l| self.local_id(&l.spdx_id))
            .map(str::to_string)
            .collect()
    }

    fn finish(self: Box<Self>, info: &DocumentInfo) -> SbomDocument {
        let mut adapter = *self;

        let mut created_by = Vec::new();
        let mut created_using = Vec::new();
        for creator in &info.creators {
            let is_tool = creator.trim_start().starts_with("Tool:");
            if let Some(iri) = adapter.agent_iri(creator) {
                if is_tool {
                    created_using.push(iri);
                } else {
                    created_by.push(iri);
                }
            }
        }
        if created_by.is_empty() {
            created_by.push(SPDX_ORGANIZATION.to_string());
        }

        let data_license = adapter.license_iri(&LicenseExpression::Listed(DATA_LICENSE.to_string()));
        let document_iri = adapter.iri(ElementId::document().as_str());
        let root_element: Vec<String> = adapter
            .relationships
            .iter()
            .filter(|(_, r)| r.relationship_type == "describes" && r.from == document_iri)
            .flat_map(|(_, r)| r.to.iter().cloned())
            .collect();

        let mut elements: Vec<GraphElement> = Vec::new();
        elements.extend(adapter.agents);
        elements.extend(adapter.packages.into_iter().map(GraphElement::Package));
        elements.extend(adapter.files.into_iter().map(GraphElement::File));
        elements.extend(adapter.snippets.into_iter().map(GraphElement::Snippet));
        elements.extend(adapter.licenses.into_iter().map(GraphElement::LicenseExpression));
        elements.extend(adapter.custom_licenses.into_iter().map(GraphElement::CustomLicense));
        elements.extend(adapter.relationships.into_iter().map(|(scoped, r)| {
            if scoped {
                GraphElement::LifecycleScopedRelationship(r)
            } else {
                GraphElement::Relationship(r)
            }
        }));
        elements.extend(adapter.annotations.into_iter().map(GraphElement::Annotation));

        let element_iris = elements.iter().filter_map(element_iri).collect();

        let mut graph = vec![
            GraphElement::CreationInfo(spdx3::CreationInfoElement {
                id: CREATION_INFO_ID.to_string(),
                spec_version: SchemaVersion::V3.spec_version().to_string(),
                created: info.created.clone(),
                created_by,
                created_using,
                comment: info.creator_comment.clone(),
            }),
            GraphElement::SpdxDocument(SpdxDocumentElement {
                spdx_id: document_iri,
                creation_info: CREATION_INFO_ID.to_string(),
                name: info.name.clone(),
                comment: info.comment.clone(),
                data_license: Some(data_license),
                root_element,
                element: element_iris,
                import: adapter.imports,
                namespace_map: adapter.namespace_maps,
            }),
        ];
        graph.extend(elements);

        SbomDocument::RelationshipCentric(spdx3::SpdxV3Document {
            context: spdx3::CONTEXT_URL.to_string(),
            graph,
        })
    }
}

impl RelationshipCentricAdapter {
    fn push_annotation(&mut self, subject_iri: String, annotation: &Annotation) {
        let id = self.ids.allocate("Annotation");
        let annotation_type = match annotation.annotation_type {
            AnnotationType::Review => "review",
            AnnotationType::Other => "other",
        };
        self.annotations.push(AnnotationElement {
            spdx_id: self.iri(id.as_str()),
            creation_info: CREATION_INFO_ID.to_string(),
            annotation_type: annotation_type.to_string(),
            subject: subject_iri,
            statement: Some(annotation.comment.clone()),
        });
    }
}

fn element_iri(element: &GraphElement) -> Option<String> {
    match element {
        GraphElement::Organization(a) | GraphElement::Person(a) | GraphElement::Tool(a) => {
            Some(a.spdx_id.clone())
        }
        GraphElement::Package(p) => Some(p.spdx_id.clone()),
        GraphElement::File(f) => Some(f.spdx_id.clone()),
        GraphElement::Snippet(s) => Some(s.spdx_id.clone()),
        GraphElement::LicenseExpression(l) => Some(l.spdx_id.clone()),
        GraphElement::CustomLicense(l) => Some(l.spdx_id.clone()),
        GraphElement::Relationship(r) | GraphElement::LifecycleScopedRelationship(r) => {
            Some(r.spdx_id.clone())
        }
        GraphElement::Annotation(a) => Some(a.spdx_id.clone()),
        _ => None,
    }
}
