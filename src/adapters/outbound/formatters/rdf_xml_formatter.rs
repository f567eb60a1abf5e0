use super::schema_mismatch;
use crate::ports::outbound::SbomSerializer;
use crate::sbom_generation::domain::document::spdx2::{self, SpdxV2Document};
use crate::sbom_generation::domain::{LicenseExpression, SbomDocument};
use crate::shared::Result;

const SPDX_TERMS: &str = "http://spdx.org/rdf/terms#";
const LICENSE_NAMESPACE: &str = "http://spdx.org/licenses/";

/// RdfXmlSerializer adapter for the SPDX 2.3 RDF/XML format
///
/// Writes the document with the `spdx:` vocabulary. Relationships are
/// nested under the element they start from, license expressions become
/// conjunctive/disjunctive license sets.
pub struct RdfXmlSerializer;

impl RdfXmlSerializer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RdfXmlSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomSerializer for RdfXmlSerializer {
    fn serialize(&self, document: &SbomDocument) -> Result<String> {
        match document {
            SbomDocument::AttributeCentric(document) => Ok(RdfWriter::new(document).write()),
            other => Err(schema_mismatch("RDF/XML", other.schema_version())),
        }
    }
}

/// Escapes text for element content and attribute values
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn checksum_algorithm_term(algorithm: &str) -> String {
    format!(
        "{}checksumAlgorithm_{}",
        SPDX_TERMS,
        algorithm.to_ascii_lowercase().replace('-', "")
    )
}

fn relationship_type_term(relationship_type: &str) -> String {
    format!("{}relationshipType_{}", SPDX_TERMS, relationship_type.to_ascii_lowercase())
}

struct RdfWriter<'a> {
    document: &'a SpdxV2Document,
    output: String,
    indent: usize,
}

impl<'a> RdfWriter<'a> {
    fn new(document: &'a SpdxV2Document) -> Self {
        Self {
            document,
            output: String::new(),
            indent: 0,
        }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.output.push_str("  ");
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn open(&mut self, tag: &str) {
        self.line(&format!("<{}>", tag));
        self.indent += 1;
    }

    fn open_about(&mut self, tag: &str, about: &str) {
        self.line(&format!("<{} rdf:about=\"{}\">", tag, escape(about)));
        self.indent += 1;
    }

    fn close(&mut self, tag: &str) {
        self.indent = self.indent.saturating_sub(1);
        self.line(&format!("</{}>", tag));
    }

    fn text(&mut self, tag: &str, value: &str) {
        self.line(&format!("<{}>{}</{}>", tag, escape(value), tag));
    }

    fn optional_text(&mut self, tag: &str, value: Option<&String>) {
        if let Some(value) = value {
            self.text(tag, value);
        }
    }

    fn resource(&mut self, tag: &str, iri: &str) {
        self.line(&format!("<{} rdf:resource=\"{}\"/>", tag, escape(iri)));
    }

    /// Absolute IRI of a document-local or `DocumentRef-x:` element ID.
    fn element_iri(&self, id: &str) -> String {
        match id.split_once(':') {
            Some((document_ref, element)) if document_ref.starts_with("DocumentRef-") => {
                let namespace = self
                    .document
                    .external_document_refs
                    .iter()
                    .find(|r| r.external_document_id == document_ref)
                    .map(|r| r.spdx_document.as_str())
                    .unwrap_or(document_ref);
                format!("{}#{}", namespace, element)
            }
            _ => format!("{}#{}", self.document.document_namespace, id),
        }
    }

    fn simple_license_iri(&self, id: &str) -> String {
        if id.starts_with("LicenseRef-") || id.starts_with("DocumentRef-") {
            self.element_iri(id)
        } else {
            format!("{}{}", LICENSE_NAMESPACE, id)
        }
    }

    fn license(&mut self, tag: &str, text: &str) {
        match LicenseExpression::parse(text) {
            Ok(expression) => {
                self.open(tag);
                self.license_node(&expression);
                self.close(tag);
            }
            Err(e) => {
                tracing::debug!("Writing unparseable license '{}' as NOASSERTION: {}", text, e);
                self.resource(tag, &format!("{}noassertion", SPDX_TERMS));
            }
        }
    }

    fn license_node(&mut self, expression: &LicenseExpression) {
        match expression {
            LicenseExpression::NoAssertion => {
                self.line(&format!("<spdx:License rdf:about=\"{}noassertion\"/>", SPDX_TERMS))
            }
            LicenseExpression::None => {
                self.line(&format!("<spdx:License rdf:about=\"{}none\"/>", SPDX_TERMS))
            }
            LicenseExpression::Listed(id) => {
                let iri = self.simple_license_iri(id);
                self.line(&format!("<spdx:ListedLicense rdf:about=\"{}\"/>", escape(&iri)));
            }
            LicenseExpression::Custom(id) => {
                let iri = self.simple_license_iri(id);
                self.line(&format!(
                    "<spdx:ExtractedLicensingInfo rdf:about=\"{}\"/>",
                    escape(&iri)
                ));
            }
            LicenseExpression::OrLater(id) => {
                self.open("spdx:OrLaterOperator");
                self.open("spdx:member");
                self.license_node(&LicenseExpression::Listed(id.clone()));
                self.close("spdx:member");
                self.close("spdx:OrLaterOperator");
            }
            LicenseExpression::WithException { license, exception } => {
                self.open("spdx:WithExceptionOperator");
                self.open("spdx:member");
                self.license_node(license);
                self.close("spdx:member");
                self.open("spdx:licenseException");
                self.open("spdx:ListedLicenseException");
                self.text("spdx:licenseExceptionId", exception);
                self.close("spdx:ListedLicenseException");
                self.close("spdx:licenseException");
                self.close("spdx:WithExceptionOperator");
            }
            LicenseExpression::And(members) | LicenseExpression::Or(members) => {
                let set = if matches!(expression, LicenseExpression::And(_)) {
                    "spdx:ConjunctiveLicenseSet"
                } else {
                    "spdx:DisjunctiveLicenseSet"
                };
                self.open(set);
                for member in members {
                    self.open("spdx:member");
                    self.license_node(member);
                    self.close("spdx:member");
                }
                self.close(set);
            }
        }
    }

    fn checksums(&mut self, checksums: &[spdx2::Checksum]) {
        for checksum in checksums {
            self.open("spdx:checksum");
            self.open("spdx:Checksum");
            self.resource("spdx:algorithm", &checksum_algorithm_term(&checksum.algorithm));
            self.text("spdx:checksumValue", &checksum.checksum_value);
            self.close("spdx:Checksum");
            self.close("spdx:checksum");
        }
    }

    fn annotations(&mut self, annotations: &[spdx2::Annotation]) {
        for annotation in annotations {
            self.open("spdx:annotation");
            self.open("spdx:Annotation");
            self.text("spdx:annotator", &annotation.annotator);
            self.text("spdx:annotationDate", &annotation.annotation_date);
            self.resource(
                "spdx:annotationType",
                &format!(
                    "{}annotationType_{}",
                    SPDX_TERMS,
                    annotation.annotation_type.to_ascii_lowercase()
                ),
            );
            self.text("rdfs:comment", &annotation.comment);
            self.close("spdx:Annotation");
            self.close("spdx:annotation");
        }
    }

    fn relationships_from(&mut self, element_id: &str) {
        let document = self.document;
        let relationships: Vec<&spdx2::Relationship> = document
            .relationships
            .iter()
            .filter(|r| r.spdx_element_id == element_id)
            .collect();
        for relationship in relationships {
            self.open("spdx:relationship");
            self.open("spdx:Relationship");
            self.resource(
                "spdx:relationshipType",
                &relationship_type_term(&relationship.relationship_type),
            );
            let related = match relationship.related_spdx_element.as_str() {
                "NOASSERTION" => format!("{}noassertion", SPDX_TERMS),
                "NONE" => format!("{}none", SPDX_TERMS),
                other => self.element_iri(other),
            };
            self.resource("spdx:relatedSpdxElement", &related);
            self.optional_text("rdfs:comment", relationship.comment.as_ref());
            self.close("spdx:Relationship");
            self.close("spdx:relationship");
        }
    }

    fn package(&mut self, package: &spdx2::Package) {
        let iri = self.element_iri(&package.spdx_id);
        self.open_about("spdx:Package", &iri);
        self.text("spdx:name", &package.name);
        self.optional_text("spdx:versionInfo", package.version_info.as_ref());
        self.optional_text("spdx:packageFileName", package.package_file_name.as_ref());
        self.optional_text("spdx:supplier", package.supplier.as_ref());
        self.optional_text("spdx:originator", package.originator.as_ref());
        self.text("spdx:downloadLocation", &package.download_location);
        self.text("spdx:filesAnalyzed", if package.files_analyzed { "true" } else { "false" });
        if let Some(code) = &package.package_verification_code {
            self.open("spdx:packageVerificationCode");
            self.open("spdx:PackageVerificationCode");
            self.text(
                "spdx:packageVerificationCodeValue",
                &code.package_verification_code_value,
            );
            for excluded in &code.package_verification_code_excluded_files {
                self.text("spdx:packageVerificationCodeExcludedFile", excluded);
            }
            self.close("spdx:PackageVerificationCode");
            self.close("spdx:packageVerificationCode");
        }
        self.checksums(&package.checksums);
        self.optional_text("doap:homepage", package.homepage.as_ref());
        self.optional_text("spdx:sourceInfo", package.source_info.as_ref());
        self.license("spdx:licenseConcluded", &package.license_concluded);
        self.license("spdx:licenseDeclared", &package.license_declared);
        for info in &package.license_info_from_files {
            self.license("spdx:licenseInfoFromFiles", info);
        }
        self.optional_text("spdx:licenseComments", package.license_comments.as_ref());
        self.text("spdx:copyrightText", &package.copyright_text);
        self.optional_text("spdx:summary", package.summary.as_ref());
        self.optional_text("spdx:description", package.description.as_ref());
        self.optional_text("rdfs:comment", package.comment.as_ref());
        for external_ref in &package.external_refs {
            self.open("spdx:externalRef");
            self.open("spdx:ExternalRef");
            self.resource(
                "spdx:referenceCategory",
                &format!(
                    "{}referenceCategory_{}",
                    SPDX_TERMS,
                    external_ref.reference_category.to_ascii_lowercase().replace('-', "")
                ),
            );
            self.text("spdx:referenceType", &external_ref.reference_type);
            self.text("spdx:referenceLocator", &external_ref.reference_locator);
            self.optional_text("rdfs:comment", external_ref.comment.as_ref());
            self.close("spdx:ExternalRef");
            self.close("spdx:externalRef");
        }
        if let Some(purpose) = &package.primary_package_purpose {
            self.resource(
                "spdx:primaryPackagePurpose",
                &format!(
                    "{}purpose_{}",
                    SPDX_TERMS,
                    purpose.to_ascii_lowercase().replace('-', "")
                ),
            );
        }
        self.optional_text("spdx:builtDate", package.built_date.as_ref());
        self.optional_text("spdx:releaseDate", package.release_date.as_ref());
        self.optional_text("spdx:validUntilDate", package.valid_until_date.as_ref());
        self.annotations(&package.annotations);
        for file_id in &package.has_files {
            let file_iri = self.element_iri(file_id);
            self.resource("spdx:hasFile", &file_iri);
        }
        self.relationships_from(&package.spdx_id);
        self.close("spdx:Package");
    }

    fn file(&mut self, file: &spdx2::File) {
        let iri = self.element_iri(&file.spdx_id);
        self.open_about("spdx:File", &iri);
        self.text("spdx:fileName", &file.file_name);
        for file_type in &file.file_types {
            self.resource(
                "spdx:fileType",
                &format!("{}fileType_{}", SPDX_TERMS, file_type.to_ascii_lowercase()),
            );
        }
        self.checksums(&file.checksums);
        self.license("spdx:licenseConcluded", &file.license_concluded);
        for info in &file.license_info_in_files {
            self.license("spdx:licenseInfoInFile", info);
        }
        self.optional_text("spdx:licenseComments", file.license_comments.as_ref());
        self.text("spdx:copyrightText", &file.copyright_text);
        self.optional_text("spdx:noticeText", file.notice_text.as_ref());
        for contributor in &file.file_contributors {
            self.text("spdx:fileContributor", contributor);
        }
        self.optional_text("rdfs:comment", file.comment.as_ref());
        self.annotations(&file.annotations);
        self.relationships_from(&file.spdx_id);
        self.close("spdx:File");
    }

    fn pointer(&mut self, tag: &str, pointer: &spdx2::Pointer) {
        self.open(tag);
        let kind = if pointer.line_number.is_some() {
            "ptr:LineCharPointer"
        } else {
            "ptr:ByteOffsetPointer"
        };
        self.open(kind);
        let reference = self.element_iri(&pointer.reference);
        self.resource("ptr:reference", &reference);
        if let Some(offset) = pointer.offset {
            self.text("ptr:offset", &offset.to_string());
        }
        if let Some(line) = pointer.line_number {
            self.text("ptr:lineNumber", &line.to_string());
        }
        self.close(kind);
        self.close(tag);
    }

    fn snippet(&mut self, snippet: &spdx2::Snippet) {
        let iri = self.element_iri(&snippet.spdx_id);
        self.open_about("spdx:Snippet", &iri);
        let file_iri = self.element_iri(&snippet.snippet_from_file);
        self.resource("spdx:snippetFromFile", &file_iri);
        for range in &snippet.ranges {
            self.open("spdx:range");
            self.open("ptr:StartEndPointer");
            self.pointer("ptr:startPointer", &range.start_pointer);
            self.pointer("ptr:endPointer", &range.end_pointer);
            self.close("ptr:StartEndPointer");
            self.close("spdx:range");
        }
        self.optional_text("spdx:name", snippet.name.as_ref());
        self.license("spdx:licenseConcluded", &snippet.license_concluded);
        for info in &snippet.license_info_in_snippets {
            self.license("spdx:licenseInfoInSnippet", info);
        }
        self.optional_text("spdx:licenseComments", snippet.license_comments.as_ref());
        self.text("spdx:copyrightText", &snippet.copyright_text);
        self.optional_text("rdfs:comment", snippet.comment.as_ref());
        self.relationships_from(&snippet.spdx_id);
        self.close("spdx:Snippet");
    }

    fn write(mut self) -> String {
        let document = self.document;
        self.line("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
        self.open(
            "rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\" \
             xmlns:rdfs=\"http://www.w3.org/2000/01/rdf-schema#\" \
             xmlns:doap=\"http://usefulinc.com/ns/doap#\" \
             xmlns:ptr=\"http://www.w3.org/2009/pointers#\" \
             xmlns:spdx=\"http://spdx.org/rdf/terms#\"",
        );
        let document_iri = self.element_iri(&document.spdx_id);
        self.open_about("spdx:SpdxDocument", &document_iri);
        self.text("spdx:specVersion", &document.spdx_version);
        self.resource(
            "spdx:dataLicense",
            &format!("{}{}", LICENSE_NAMESPACE, document.data_license),
        );
        self.text("spdx:name", &document.name);
        self.optional_text("rdfs:comment", document.comment.as_ref());

        self.open("spdx:creationInfo");
        self.open("spdx:CreationInfo");
        self.text("spdx:created", &document.creation_info.created);
        for creator in &document.creation_info.creators {
            self.text("spdx:creator", creator);
        }
        self.optional_text("rdfs:comment", document.creation_info.comment.as_ref());
        self.optional_text(
            "spdx:licenseListVersion",
            document.creation_info.license_list_version.as_ref(),
        );
        self.close("spdx:CreationInfo");
        self.close("spdx:creationInfo");

        for reference in &document.external_document_refs {
            self.open("spdx:externalDocumentRef");
            self.open("spdx:ExternalDocumentRef");
            self.text("spdx:externalDocumentId", &reference.external_document_id);
            self.resource("spdx:spdxDocument", &reference.spdx_document);
            self.checksums(std::slice::from_ref(&reference.checksum));
            self.close("spdx:ExternalDocumentRef");
            self.close("spdx:externalDocumentRef");
        }

        for info in &document.has_extracted_licensing_infos {
            self.open("spdx:hasExtractedLicensingInfo");
            let iri = self.element_iri(&info.license_id);
            self.open_about("spdx:ExtractedLicensingInfo", &iri);
            self.text("spdx:licenseId", &info.license_id);
            self.text("spdx:extractedText", &info.extracted_text);
            self.optional_text("spdx:name", info.name.as_ref());
            self.optional_text("rdfs:comment", info.comment.as_ref());
            for see_also in &info.see_alsos {
                self.text("rdfs:seeAlso", see_also);
            }
            self.close("spdx:ExtractedLicensingInfo");
            self.close("spdx:hasExtractedLicensingInfo");
        }

        self.annotations(&document.annotations);
        self.relationships_from(&document.spdx_id);
        self.close("spdx:SpdxDocument");

        for package in &document.packages {
            self.package(package);
        }
        for file in &document.files {
            self.file(file);
        }
        for snippet in &document.snippets {
            self.snippet(snippet);
        }
        self.close("rdf:RDF");
        self.output
    }
}
