//! Attribute-centric (SPDX 2.3) document builder.
//!
//! Licenses are stored as expression strings on packages and files; package
//! membership of files is the package's `hasFiles` list.

use crate::ports::outbound::{LicenseAssertionKind, SchemaVersionAdapter};
use crate::sbom_generation::domain::document::{spdx2, DATA_LICENSE};
use crate::sbom_generation::domain::{
    Annotation, Checksum, CustomLicense, DocumentInfo, ElementId, ElementRef,
    ExternalDocumentReference, FileRecord, IdAllocator, LicenseExpression, PackageInfo,
    Relationship, RelationshipType, SbomDocument, SchemaVersion, SnippetRange, SnippetRecord,
    VerificationCode,
};
use std::collections::BTreeSet;

/// Builds an [`spdx2::SpdxV2Document`].
#[derive(Debug, Default)]
pub struct AttributeCentricAdapter {
    ids: IdAllocator,
    packages: Vec<spdx2::Package>,
    files: Vec<spdx2::File>,
    snippets: Vec<spdx2::Snippet>,
    relationships: Vec<spdx2::Relationship>,
    extracted_licenses: Vec<spdx2::ExtractedLicensingInfo>,
    external_documents: Vec<spdx2::ExternalDocumentRef>,
    document_annotations: Vec<spdx2::Annotation>,
    referenced_custom_ids: BTreeSet<String>,
}

impl AttributeCentricAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn package_mut(&mut self, id: &ElementId) -> Option<&mut spdx2::Package> {
        self.packages.iter_mut().find(|p| p.spdx_id == id.as_str())
    }

    fn file_mut(&mut self, id: &ElementId) -> Option<&mut spdx2::File> {
        self.files.iter_mut().find(|f| f.spdx_id == id.as_str())
    }

    fn snippet_mut(&mut self, id: &ElementId) -> Option<&mut spdx2::Snippet> {
        self.snippets.iter_mut().find(|s| s.spdx_id == id.as_str())
    }

    fn remember_custom_ids(&mut self, license: &LicenseExpression) {
        for id in license.custom_ids() {
            self.referenced_custom_ids.insert(id.to_string());
        }
    }
}

fn checksum(value: &Checksum) -> spdx2::Checksum {
    spdx2::Checksum {
        algorithm: value.algorithm.spdx_name().to_string(),
        checksum_value: value.value.clone(),
    }
}

fn annotation(value: &Annotation) -> spdx2::Annotation {
    spdx2::Annotation {
        annotator: value.annotator.clone(),
        annotation_date: value.date.clone(),
        annotation_type: value.annotation_type.spdx_name().to_string(),
        comment: value.comment.clone(),
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Members of a conjunction as separate strings, for list-valued fields.
fn conjunction_members(license: &LicenseExpression) -> Vec<String> {
    match license {
        LicenseExpression::And(members) => members.iter().map(ToString::to_string).collect(),
        other => vec![other.to_string()],
    }
}

fn parse_license(text: &str) -> Option<LicenseExpression> {
    match LicenseExpression::parse(text) {
        Ok(expression) => Some(expression),
        Err(e) => {
            tracing::debug!("stored license '{}' does not parse: {}", text, e);
            None
        }
    }
}

fn parse_license_list(items: &[String]) -> Option<LicenseExpression> {
    if items.is_empty() {
        return None;
    }
    let parsed: Vec<LicenseExpression> = items
        .iter()
        .filter_map(|item| parse_license(item))
        .filter(|e| !matches!(e, LicenseExpression::NoAssertion | LicenseExpression::None))
        .collect();
    Some(LicenseExpression::conjunction(parsed))
}

fn snippet_range(file: &ElementId, range: SnippetRange, by_line: bool) -> spdx2::Range {
    let pointer = |position: u64| spdx2::Pointer {
        reference: file.to_string(),
        offset: (!by_line).then_some(position),
        line_number: by_line.then_some(position),
    };
    spdx2::Range {
        start_pointer: pointer(range.start),
        end_pointer: pointer(range.end),
    }
}

/// `DocumentRef-x:SPDXRef-y` or a local ID.
pub(crate) fn parse_element_ref(value: &str) -> ElementRef {
    match value.split_once(':') {
        Some((document_ref, element_id)) if document_ref.starts_with("DocumentRef-") => {
            ElementRef::External {
                document_ref: document_ref.to_string(),
                element_id: element_id.to_string(),
            }
        }
        _ => ElementRef::Local(ElementId::from_raw(value)),
    }
}

impl SchemaVersionAdapter for AttributeCentricAdapter {
    fn schema_version(&self) -> SchemaVersion {
        SchemaVersion::V2
    }

    fn materialize_package(&mut self, package: PackageInfo) -> ElementId {
        let id = self.ids.allocate("Package");
        self.packages.push(spdx2::Package {
            spdx_id: id.to_string(),
            name: package.name,
            version_info: package.version,
            package_file_name: package.package_file_name,
            supplier: package.supplier,
            originator: package.originator,
            download_location: package.download_location,
            files_analyzed: package.files_analyzed,
            checksums: package.checksums.iter().map(checksum).collect(),
            license_concluded: LicenseExpression::NoAssertion.to_string(),
            license_declared: LicenseExpression::NoAssertion.to_string(),
            homepage: package.homepage,
            source_info: package.source_info,
            license_comments: package.license_comment,
            copyright_text: package.copyright,
            summary: package.summary,
            description: package.description,
            comment: package.comment,
            external_refs: package
                .external_refs
                .into_iter()
                .map(|r| spdx2::ExternalRef {
                    reference_category: r.category,
                    reference_type: r.reference_type,
                    reference_locator: r.locator,
                    comment: r.comment,
                })
                .collect(),
            primary_package_purpose: package
                .primary_purpose
                .map(|p| p.spdx_name().to_string()),
            annotations: package.annotations.iter().map(annotation).collect(),
            built_date: package.built_date,
            release_date: package.release_date,
            valid_until_date: package.valid_until_date,
            ..Default::default()
        });
        id
    }

    fn materialize_file(&mut self, file: &FileRecord) -> ElementId {
        let id = self.ids.allocate("File");
        self.remember_custom_ids(&file.concluded_license);
        self.remember_custom_ids(&file.declared_license);
        self.files.push(spdx2::File {
            spdx_id: id.to_string(),
            file_name: file.path.clone(),
            file_types: vec![file.kind.spdx_file_type().to_string()],
            checksums: file.checksum_list().iter().map(checksum).collect(),
            license_concluded: file.concluded_license.to_string(),
            license_info_in_files: conjunction_members(&file.declared_license),
            license_comments: non_empty(&file.license_comment),
            copyright_text: file.copyright.clone(),
            notice_text: non_empty(&file.notice),
            file_contributors: file.contributors.clone(),
            comment: non_empty(&file.comment),
            annotations: Vec::new(),
        });
        id
    }

    fn materialize_snippet(&mut self, file: &ElementId, snippet: &SnippetRecord) -> ElementId {
        let id = self.ids.allocate("Snippet");
        self.remember_custom_ids(&snippet.concluded_license);
        self.remember_custom_ids(&snippet.license_info);
        let mut ranges = vec![snippet_range(file, snippet.byte_range, false)];
        if let Some(lines) = snippet.line_range {
            ranges.push(snippet_range(file, lines, true));
        }
        self.snippets.push(spdx2::Snippet {
            spdx_id: id.to_string(),
            name: non_empty(&snippet.name),
            snippet_from_file: file.to_string(),
            ranges,
            license_concluded: snippet.concluded_license.to_string(),
            license_info_in_snippets: conjunction_members(&snippet.license_info),
            license_comments: non_empty(&snippet.license_comment),
            copyright_text: snippet.copyright.clone(),
            comment: non_empty(&snippet.comment),
        });
        id
    }

    fn materialize_license_assertion(
        &mut self,
        subject: &ElementId,
        kind: LicenseAssertionKind,
        license: &LicenseExpression,
    ) {
        self.remember_custom_ids(license);
        let text = license.to_string();
        if let Some(package) = self.package_mut(subject) {
            match kind {
                LicenseAssertionKind::Declared => package.license_declared = text,
                LicenseAssertionKind::Concluded => package.license_concluded = text,
                LicenseAssertionKind::InfoFromFiles => {
                    for member in conjunction_members(license) {
                        if !package.license_info_from_files.contains(&member) {
                            package.license_info_from_files.push(member);
                        }
                    }
                }
            }
        } else if let Some(file) = self.file_mut(subject) {
            match kind {
                LicenseAssertionKind::Concluded => file.license_concluded = text,
                LicenseAssertionKind::Declared | LicenseAssertionKind::InfoFromFiles => {
                    file.license_info_in_files = conjunction_members(license)
                }
            }
        } else if let Some(snippet) = self.snippet_mut(subject) {
            match kind {
                LicenseAssertionKind::Concluded => snippet.license_concluded = text,
                LicenseAssertionKind::Declared | LicenseAssertionKind::InfoFromFiles => {
                    snippet.license_info_in_snippets = conjunction_members(license)
                }
            }
        } else {
            tracing::warn!("license assertion for unknown element {}", subject);
        }
    }

    fn materialize_relationship(&mut self, relationship: Relationship) {
        if relationship.relationship_type == RelationshipType::Contains {
            if let (Some(from), Some(to)) = (relationship.from.local(), relationship.to.local()) {
                if self.files.iter().any(|f| f.spdx_id == to.as_str()) {
                    if let Some(package) = self.package_mut(from) {
                        package.has_files.push(to.to_string());
                        return;
                    }
                }
            }
        }
        self.relationships.push(spdx2::Relationship {
            spdx_element_id: relationship.from.to_string(),
            relationship_type: relationship.relationship_type.spdx_name().to_string(),
            related_spdx_element: relationship.to.to_string(),
            comment: relationship.comment,
        });
    }

    fn register_custom_license(&mut self, license: &CustomLicense) {
        if let Some(existing) = self
            .extracted_licenses
            .iter_mut()
            .find(|l| l.license_id == license.id)
        {
            existing.extracted_text = license.extracted_text.clone();
            return;
        }
        self.extracted_licenses.push(spdx2::ExtractedLicensingInfo {
            license_id: license.id.clone(),
            extracted_text: license.extracted_text.clone(),
            name: license.name.clone(),
            comment: license.comment.clone(),
            see_alsos: license.cross_refs.clone(),
        });
    }

    fn add_external_document_ref(&mut self, reference: &ExternalDocumentReference) {
        if self
            .external_documents
            .iter()
            .any(|r| r.spdx_document == reference.namespace)
        {
            return;
        }
        self.external_documents.push(spdx2::ExternalDocumentRef {
            external_document_id: reference.id.clone(),
            spdx_document: reference.namespace.clone(),
            checksum: checksum(&reference.checksum),
        });
    }

    fn set_verification_code(&mut self, package: &ElementId, code: &VerificationCode) {
        if let Some(package) = self.package_mut(package) {
            package.files_analyzed = true;
            package.package_verification_code = Some(spdx2::PackageVerificationCode {
                package_verification_code_value: code.value.clone(),
                package_verification_code_excluded_files: code.excluded_files.clone(),
            });
        }
    }

    fn add_annotation(&mut self, subject: &ElementId, value: &Annotation) {
        if *subject == ElementId::document() {
            self.document_annotations.push(annotation(value));
        } else if let Some(package) = self.package_mut(subject) {
            package.annotations.push(annotation(value));
        } else if let Some(file) = self.file_mut(subject) {
            file.annotations.push(annotation(value));
        }
    }

    fn asserted_license(
        &self,
        subject: &ElementId,
        kind: LicenseAssertionKind,
    ) -> Option<LicenseExpression> {
        if let Some(package) = self.packages.iter().find(|p| p.spdx_id == subject.as_str()) {
            return match kind {
                LicenseAssertionKind::Declared => parse_license(&package.license_declared),
                LicenseAssertionKind::Concluded => parse_license(&package.license_concluded),
                LicenseAssertionKind::InfoFromFiles => {
                    parse_license_list(&package.license_info_from_files)
                }
            };
        }
        let (concluded, info) = if let Some(file) =
            self.files.iter().find(|f| f.spdx_id == subject.as_str())
        {
            (&file.license_concluded, &file.license_info_in_files)
        } else {
            let snippet = self.snippets.iter().find(|s| s.spdx_id == subject.as_str())?;
            (&snippet.license_concluded, &snippet.license_info_in_snippets)
        };
        match kind {
            LicenseAssertionKind::Concluded => parse_license(concluded),
            LicenseAssertionKind::Declared | LicenseAssertionKind::InfoFromFiles => {
                let parsed: Vec<LicenseExpression> =
                    info.iter().filter_map(|item| parse_license(item)).collect();
                Some(LicenseExpression::conjunction(parsed))
            }
        }
    }

    fn relationships(&self) -> Vec<Relationship> {
        let membership = self.packages.iter().flat_map(|package| {
            package.has_files.iter().map(move |file| {
                Relationship::new(
                    ElementRef::Local(ElementId::from_raw(package.spdx_id.as_str())),
                    RelationshipType::Contains,
                    ElementRef::Local(ElementId::from_raw(file.as_str())),
                )
            })
        });
        let explicit = self.relationships.iter().filter_map(|r| {
            let relationship_type = RelationshipType::from_spdx_name(&r.relationship_type)?;
            let mut relationship = Relationship::new(
                parse_element_ref(&r.spdx_element_id),
                relationship_type,
                parse_element_ref(&r.related_spdx_element),
            );
            relationship.comment = r.comment.clone();
            Some(relationship)
        });
        explicit.chain(membership).collect()
    }

    fn element_ids(&self) -> Vec<ElementId> {
        self.packages
            .iter()
            .map(|p| p.spdx_id.as_str())
            .chain(self.files.iter().map(|f| f.spdx_id.as_str()))
            .chain(self.snippets.iter().map(|s| s.spdx_id.as_str()))
            .map(ElementId::from_raw)
            .collect()
    }

    fn file_names(&self) -> Vec<String> {
        self.files.iter().map(|f| f.file_name.clone()).collect()
    }

    fn referenced_custom_license_ids(&self) -> Vec<String> {
        self.referenced_custom_ids.iter().cloned().collect()
    }

    fn registered_custom_license_ids(&self) -> Vec<String> {
        self.extracted_licenses
            .iter()
            .map(|l| l.license_id.clone())
            .collect()
    }

    fn finish(self: Box<Self>, info: &DocumentInfo) -> SbomDocument {
        let adapter = *self;
        let document_describes = adapter
            .relationships
            .iter()
            .filter(|r| {
                r.relationship_type == RelationshipType::Describes.spdx_name()
                    && r.spdx_element_id == ElementId::document().as_str()
            })
            .map(|r| r.related_spdx_element.clone())
            .collect();

        SbomDocument::AttributeCentric(spdx2::SpdxV2Document {
            spdx_id: ElementId::document().to_string(),
            spdx_version: SchemaVersion::V2.spec_version().to_string(),
            data_license: DATA_LICENSE.to_string(),
            name: info.name.clone(),
            document_namespace: info.namespace.clone(),
            creation_info: spdx2::CreationInfo {
                created: info.created.clone(),
                creators: info.creators.clone(),
                comment: info.creator_comment.clone(),
                license_list_version: info.license_list_version.clone(),
            },
            comment: info.comment.clone(),
            external_document_refs: adapter.external_documents,
            has_extracted_licensing_infos: adapter.extracted_licenses,
            annotations: adapter.document_annotations,
            document_describes,
            packages: adapter.packages,
            files: adapter.files,
            snippets: adapter.snippets,
            relationships: adapter.relationships,
        })
    }
}
