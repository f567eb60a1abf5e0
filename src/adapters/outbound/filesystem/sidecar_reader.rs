use crate::ports::outbound::{ExternalPackage, ExternalSbom, SbomDocumentReader};
use crate::sbom_generation::domain::document::spdx2::{self, SpdxV2Document};
use crate::sbom_generation::domain::document::spdx3::{GraphElement, SpdxV3Document};
use crate::sbom_generation::domain::{
    Annotation, AnnotationType, Checksum, ChecksumAlgorithm, CustomLicense, ElementId,
    ExternalRef, LicenseExpression, PackageInfo, PrimaryPurpose, SchemaVersion,
};
use crate::shared::security::read_checked_text;
use crate::shared::{AssemblyError, AssemblyResult, ErrorKind};
use std::collections::HashSet;
use std::path::Path;

/// SpdxDocumentReader adapter for dependency sidecar SBOMs
///
/// Reads SPDX 2.3 JSON (`.spdx.json`) and SPDX 3.0.1 JSON-LD
/// (`.spdx.json-ld.json`, `.jsonld`). Only the packages the document
/// describes are returned; their relationships are left behind.
pub struct SpdxDocumentReader;

impl SpdxDocumentReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SpdxDocumentReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomDocumentReader for SpdxDocumentReader {
    fn read_document(&self, path: &Path) -> AssemblyResult<ExternalSbom> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        let version = if file_name.ends_with(".json-ld.json") || file_name.ends_with(".jsonld") {
            SchemaVersion::V3
        } else if file_name.ends_with(".json") {
            SchemaVersion::V2
        } else {
            return Err(unreadable(path, "only JSON and JSON-LD documents can be read"));
        };

        let content = read_checked_text(path, "SBOM sidecar")
            .map_err(|e| unreadable(path, &e.to_string()))?;
        let sbom = match version {
            SchemaVersion::V2 => {
                let document: SpdxV2Document = serde_json::from_str(&content)
                    .map_err(|e| unreadable(path, &format!("not an SPDX 2 JSON document: {}", e)))?;
                from_attribute_centric(document)
            }
            SchemaVersion::V3 => {
                let document: SpdxV3Document = serde_json::from_str(&content).map_err(|e| {
                    unreadable(path, &format!("not an SPDX 3 JSON-LD document: {}", e))
                })?;
                from_relationship_centric(&document)
                    .ok_or_else(|| unreadable(path, "the graph has no SpdxDocument element"))?
            }
        };
        tracing::debug!(
            "Read {} with {} described package(s)",
            path.display(),
            sbom.described_packages.len()
        );
        Ok(sbom)
    }
}

fn unreadable(path: &Path, reason: &str) -> AssemblyError {
    AssemblyError::new(
        ErrorKind::ExternalDocumentUnreadable,
        format!("{}: {}", path.display(), reason),
    )
}

/// Custom IDs referenced by license expression texts.
fn referenced_custom_ids<'a>(texts: impl IntoIterator<Item = &'a str>) -> HashSet<String> {
    texts
        .into_iter()
        .filter_map(|text| LicenseExpression::parse(text).ok())
        .flat_map(|license| {
            license
                .custom_ids()
                .into_iter()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

fn parse_checksum(algorithm: &str, value: &str) -> Option<Checksum> {
    algorithm
        .parse::<ChecksumAlgorithm>()
        .ok()
        .map(|algorithm| Checksum::new(algorithm, value))
}

fn from_attribute_centric(document: SpdxV2Document) -> ExternalSbom {
    let document_id = ElementId::document();
    let mut described: Vec<String> = document.document_describes.clone();
    for relationship in &document.relationships {
        if relationship.spdx_element_id == document_id.as_str()
            && relationship.relationship_type == "DESCRIBES"
            && !described.contains(&relationship.related_spdx_element)
        {
            described.push(relationship.related_spdx_element.clone());
        }
    }

    let described_packages = described
        .iter()
        .filter_map(|id| document.packages.iter().find(|p| &p.spdx_id == id))
        .map(|package| {
            let referenced = referenced_custom_ids([
                package.license_declared.as_str(),
                package.license_concluded.as_str(),
            ]);
            let custom_licenses = document
                .has_extracted_licensing_infos
                .iter()
                .filter(|info| referenced.contains(&info.license_id))
                .map(|info| {
                    let mut license = CustomLicense::new(&info.license_id, &info.extracted_text)
                        .with_cross_refs(info.see_alsos.clone());
                    license.name = info.name.clone();
                    license.comment = info.comment.clone();
                    license
                })
                .collect();
            ExternalPackage {
                element_id: package.spdx_id.clone(),
                info: package_info_v2(package),
                declared_license: Some(package.license_declared.clone()),
                concluded_license: Some(package.license_concluded.clone()),
                custom_licenses,
            }
        })
        .collect();

    ExternalSbom {
        namespace: document.document_namespace,
        schema_version: SchemaVersion::V2,
        described_packages,
    }
}

fn package_info_v2(package: &spdx2::Package) -> PackageInfo {
    let mut info = PackageInfo::new(package.name.as_str());
    info.version = package.version_info.clone();
    info.package_file_name = package.package_file_name.clone();
    info.supplier = package.supplier.clone();
    info.originator = package.originator.clone();
    info.download_location = package.download_location.clone();
    info.homepage = package.homepage.clone();
    info.source_info = package.source_info.clone();
    info.license_comment = package.license_comments.clone();
    info.copyright = package.copyright_text.clone();
    info.summary = package.summary.clone();
    info.description = package.description.clone();
    info.comment = package.comment.clone();
    info.primary_purpose = package
        .primary_package_purpose
        .as_deref()
        .and_then(PrimaryPurpose::from_spdx_name);
    info.checksums = package
        .checksums
        .iter()
        .filter_map(|c| parse_checksum(&c.algorithm, &c.checksum_value))
        .collect();
    info.external_refs = package
        .external_refs
        .iter()
        .map(|r| ExternalRef {
            category: r.reference_category.clone(),
            reference_type: r.reference_type.clone(),
            locator: r.reference_locator.clone(),
            comment: r.comment.clone(),
        })
        .collect();
    info.annotations = package
        .annotations
        .iter()
        .map(|a| Annotation {
            annotator: a.annotator.clone(),
            date: a.annotation_date.clone(),
            annotation_type: AnnotationType::from_name(&a.annotation_type),
            comment: a.comment.clone(),
        })
        .collect();
    info.built_date = package.built_date.clone();
    info.release_date = package.release_date.clone();
    info.valid_until_date = package.valid_until_date.clone();
    info
}

fn local_part(iri: &str) -> &str {
    iri.rsplit_once('#').map(|(_, id)| id).unwrap_or(iri)
}

fn from_relationship_centric(document: &SpdxV3Document) -> Option<ExternalSbom> {
    let spdx_document = document.document_element()?;
    let namespace = spdx_document
        .spdx_id
        .rsplit_once('#')
        .map(|(namespace, _)| namespace.to_string())
        .unwrap_or_else(|| spdx_document.spdx_id.clone());

    let mut described: Vec<&str> = spdx_document.root_element.iter().map(String::as_str).collect();
    for relationship in document.relationships() {
        if relationship.from == spdx_document.spdx_id && relationship.relationship_type == "describes" {
            for to in &relationship.to {
                if !described.contains(&to.as_str()) {
                    described.push(to);
                }
            }
        }
    }

    let license_of = |package_iri: &str, relationship_type: &str| {
        document
            .relationships()
            .filter(|r| r.from == package_iri && r.relationship_type == relationship_type)
            .filter_map(|r| r.to.first())
            .filter_map(|license_iri| document.license_text(license_iri))
            .last()
    };

    let described_packages = described
        .into_iter()
        .filter_map(|iri| document.packages().find(|p| p.spdx_id == iri))
        .map(|package| {
            let declared = license_of(&package.spdx_id, "hasDeclaredLicense");
            let concluded = license_of(&package.spdx_id, "hasConcludedLicense");
            let referenced =
                referenced_custom_ids(declared.iter().chain(concluded.iter()).map(String::as_str));
            let custom_licenses = document
                .graph
                .iter()
                .filter_map(|element| match element {
                    GraphElement::CustomLicense(license) => Some(license),
                    _ => None,
                })
                .filter(|license| referenced.contains(local_part(&license.spdx_id)))
                .map(|license| {
                    let mut custom =
                        CustomLicense::new(local_part(&license.spdx_id), &license.license_text)
                            .with_cross_refs(license.see_also.clone());
                    custom.name = license.name.clone();
                    custom.comment = license.comment.clone();
                    custom
                })
                .collect();

            let mut info = PackageInfo::new(package.name.as_str());
            info.version = package.package_version.clone();
            if let Some(location) = &package.download_location {
                info.download_location = location.clone();
            }
            info.homepage = package.home_page.clone();
            info.source_info = package.source_info.clone();
            if let Some(copyright) = &package.copyright_text {
                info.copyright = copyright.clone();
            }
            info.summary = package.summary.clone();
            info.description = package.description.clone();
            info.comment = package.comment.clone();
            info.primary_purpose = package
                .primary_purpose
                .as_deref()
                .and_then(PrimaryPurpose::from_software_purpose);
            info.supplier = package
                .supplied_by
                .as_deref()
                .and_then(|agent| agent_label(document, agent));
            info.originator = package
                .originated_by
                .first()
                .and_then(|agent| agent_label(document, agent));
            info.checksums = package
                .verified_using
                .iter()
                .filter_map(|hash| parse_checksum(&hash.algorithm, &hash.hash_value))
                .collect();
            if let Some(purl) = &package.package_url {
                info.external_refs.push(ExternalRef {
                    category: "PACKAGE-MANAGER".to_string(),
                    reference_type: "purl".to_string(),
                    locator: purl.clone(),
                    comment: None,
                });
            }
            info.built_date = package.built_time.clone();
            info.release_date = package.release_time.clone();
            info.valid_until_date = package.valid_until_time.clone();

            ExternalPackage {
                element_id: local_part(&package.spdx_id).to_string(),
                info,
                declared_license: declared,
                concluded_license: concluded,
                custom_licenses,
            }
        })
        .collect();

    Some(ExternalSbom {
        namespace,
        schema_version: SchemaVersion::V3,
        described_packages,
    })
}

/// `Organization: name` style label of an agent element.
fn agent_label(document: &SpdxV3Document, agent_iri: &str) -> Option<String> {
    document.graph.iter().find_map(|element| match element {
        GraphElement::Organization(agent) if agent.spdx_id == agent_iri => {
            Some(format!("Organization: {}", agent.name))
        }
        GraphElement::Person(agent) if agent.spdx_id == agent_iri => {
            Some(format!("Person: {}", agent.name))
        }
        GraphElement::Tool(agent) if agent.spdx_id == agent_iri => {
            Some(format!("Tool: {}", agent.name))
        }
        _ => None,
    })
}
