//! SPDX 3.0.1 document model in its JSON-LD shape.
//!
//! The graph is a flat list of typed elements. Licenses are separate
//! elements linked to packages and files through relationships.

use serde::{Deserialize, Serialize};

pub const CONTEXT_URL: &str = "https://spdx.org/rdf/3.0.1/spdx-context.jsonld";
pub const CREATION_INFO_ID: &str = "_:creationinfo";
pub const NO_ASSERTION_LICENSE: &str = "https://spdx.org/rdf/3.0.1/terms/Expanded/NoAssertionLicense";
pub const NONE_LICENSE: &str = "https://spdx.org/rdf/3.0.1/terms/Expanded/NoneLicense";
pub const SPDX_ORGANIZATION: &str = "https://spdx.org/rdf/3.0.1/terms/Core/SpdxOrganization";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpdxV3Document {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@graph")]
    pub graph: Vec<GraphElement>,
}

impl SpdxV3Document {
    /// The single `SpdxDocument` element of the graph, if present.
    pub fn document_element(&self) -> Option<&SpdxDocumentElement> {
        self.graph.iter().find_map(|element| match element {
            GraphElement::SpdxDocument(document) => Some(document),
            _ => None,
        })
    }

    pub fn packages(&self) -> impl Iterator<Item = &PackageElement> {
        self.graph.iter().filter_map(|element| match element {
            GraphElement::Package(package) => Some(package),
            _ => None,
        })
    }

    pub fn relationships(&self) -> impl Iterator<Item = &RelationshipElement> {
        self.graph.iter().filter_map(|element| match element {
            GraphElement::Relationship(rel) | GraphElement::LifecycleScopedRelationship(rel) => {
                Some(rel)
            }
            _ => None,
        })
    }

    /// License expression text of a license element, or the sentinel text
    /// for the two individual license IRIs.
    pub fn license_text(&self, license_id: &str) -> Option<String> {
        if license_id == NO_ASSERTION_LICENSE {
            return Some("NOASSERTION".to_string());
        }
        if license_id == NONE_LICENSE {
            return Some("NONE".to_string());
        }
        self.graph.iter().find_map(|element| match element {
            GraphElement::LicenseExpression(license) if license.spdx_id == license_id => {
                Some(license.license_expression.clone())
            }
            GraphElement::CustomLicense(license) if license.spdx_id == license_id => {
                license.spdx_id.rsplit('#').next().map(str::to_string)
            }
            _ => None,
        })
    }

    /// Name of an agent element.
    pub fn agent_name(&self, agent_id: &str) -> Option<&str> {
        self.graph.iter().find_map(|element| match element {
            GraphElement::Organization(agent)
            | GraphElement::Person(agent)
            | GraphElement::Tool(agent)
                if agent.spdx_id == agent_id =>
            {
                Some(agent.name.as_str())
            }
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GraphElement {
    CreationInfo(CreationInfoElement),
    SpdxDocument(SpdxDocumentElement),
    Organization(AgentElement),
    Person(AgentElement),
    Tool(AgentElement),
    #[serde(rename = "software_Package")]
    Package(PackageElement),
    #[serde(rename = "software_File")]
    File(FileElement),
    #[serde(rename = "software_Snippet")]
    Snippet(SnippetElement),
    Relationship(RelationshipElement),
    LifecycleScopedRelationship(RelationshipElement),
    #[serde(rename = "simplelicensing_LicenseExpression")]
    LicenseExpression(LicenseExpressionElement),
    #[serde(rename = "expandedlicensing_CustomLicense")]
    CustomLicense(CustomLicenseElement),
    Annotation(AnnotationElement),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationInfoElement {
    #[serde(rename = "@id")]
    pub id: String,
    pub spec_version: String,
    pub created: String,
    #[serde(default)]
    pub created_by: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub created_using: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hash {
    #[serde(rename = "type")]
    pub hash_type: String,
    pub algorithm: String,
    pub hash_value: String,
    #[serde(
        default,
        rename = "packageVerificationCodeExcludedFile",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub excluded_files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalMap {
    #[serde(rename = "type")]
    pub map_type: String,
    pub external_spdx_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub verified_using: Vec<Hash>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceMap {
    #[serde(rename = "type")]
    pub map_type: String,
    pub prefix: String,
    pub namespace: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpdxDocumentElement {
    pub spdx_id: String,
    pub creation_info: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_license: Option<String>,
    #[serde(default)]
    pub root_element: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub element: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub import: Vec<ExternalMap>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub namespace_map: Vec<NamespaceMap>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentElement {
    pub spdx_id: String,
    pub creation_info: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalRefEntry {
    #[serde(rename = "type")]
    pub ref_type_tag: String,
    pub external_ref_type: String,
    #[serde(default)]
    pub locator: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PackageElement {
    #[serde(rename = "spdxId")]
    pub spdx_id: String,
    #[serde(rename = "creationInfo")]
    pub creation_info: String,
    pub name: String,
    #[serde(rename = "software_packageVersion", default, skip_serializing_if = "Option::is_none")]
    pub package_version: Option<String>,
    #[serde(rename = "software_downloadLocation", default, skip_serializing_if = "Option::is_none")]
    pub download_location: Option<String>,
    #[serde(rename = "software_homePage", default, skip_serializing_if = "Option::is_none")]
    pub home_page: Option<String>,
    #[serde(rename = "software_packageUrl", default, skip_serializing_if = "Option::is_none")]
    pub package_url: Option<String>,
    #[serde(rename = "software_sourceInfo", default, skip_serializing_if = "Option::is_none")]
    pub source_info: Option<String>,
    #[serde(rename = "software_primaryPurpose", default, skip_serializing_if = "Option::is_none")]
    pub primary_purpose: Option<String>,
    #[serde(rename = "software_copyrightText", default, skip_serializing_if = "Option::is_none")]
    pub copyright_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "suppliedBy", default, skip_serializing_if = "Option::is_none")]
    pub supplied_by: Option<String>,
    #[serde(rename = "originatedBy", default, skip_serializing_if = "Vec::is_empty")]
    pub originated_by: Vec<String>,
    #[serde(rename = "verifiedUsing", default, skip_serializing_if = "Vec::is_empty")]
    pub verified_using: Vec<Hash>,
    #[serde(rename = "externalRef", default, skip_serializing_if = "Vec::is_empty")]
    pub external_ref: Vec<ExternalRefEntry>,
    #[serde(rename = "builtTime", default, skip_serializing_if = "Option::is_none")]
    pub built_time: Option<String>,
    #[serde(rename = "releaseTime", default, skip_serializing_if = "Option::is_none")]
    pub release_time: Option<String>,
    #[serde(rename = "validUntilTime", default, skip_serializing_if = "Option::is_none")]
    pub valid_until_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileElement {
    #[serde(rename = "spdxId")]
    pub spdx_id: String,
    #[serde(rename = "creationInfo")]
    pub creation_info: String,
    pub name: String,
    #[serde(rename = "verifiedUsing", default, skip_serializing_if = "Vec::is_empty")]
    pub verified_using: Vec<Hash>,
    #[serde(rename = "software_primaryPurpose", default, skip_serializing_if = "Option::is_none")]
    pub primary_purpose: Option<String>,
    #[serde(rename = "software_copyrightText", default, skip_serializing_if = "Option::is_none")]
    pub copyright_text: Option<String>,
    #[serde(rename = "software_attributionText", default, skip_serializing_if = "Vec::is_empty")]
    pub attribution_text: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositiveIntegerRange {
    #[serde(rename = "type")]
    pub range_type: String,
    pub begin_integer_range: u64,
    pub end_integer_range: u64,
}

impl PositiveIntegerRange {
    pub fn new(begin: u64, end: u64) -> Self {
        Self {
            range_type: "PositiveIntegerRange".to_string(),
            begin_integer_range: begin,
            end_integer_range: end,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SnippetElement {
    #[serde(rename = "spdxId")]
    pub spdx_id: String,
    #[serde(rename = "creationInfo")]
    pub creation_info: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "software_snippetFromFile")]
    pub snippet_from_file: String,
    #[serde(rename = "software_byteRange", default, skip_serializing_if = "Option::is_none")]
    pub byte_range: Option<PositiveIntegerRange>,
    #[serde(rename = "software_lineRange", default, skip_serializing_if = "Option::is_none")]
    pub line_range: Option<PositiveIntegerRange>,
    #[serde(rename = "software_copyrightText", default, skip_serializing_if = "Option::is_none")]
    pub copyright_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipElement {
    pub spdx_id: String,
    pub creation_info: String,
    pub from: String,
    pub to: Vec<String>,
    pub relationship_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completeness: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LicenseExpressionElement {
    #[serde(rename = "spdxId")]
    pub spdx_id: String,
    #[serde(rename = "creationInfo")]
    pub creation_info: String,
    #[serde(rename = "simplelicensing_licenseExpression")]
    pub license_expression: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomLicenseElement {
    #[serde(rename = "spdxId")]
    pub spdx_id: String,
    #[serde(rename = "creationInfo")]
    pub creation_info: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "simplelicensing_licenseText")]
    pub license_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "expandedlicensing_seeAlso", default, skip_serializing_if = "Vec::is_empty")]
    pub see_also: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationElement {
    pub spdx_id: String,
    pub creation_info: String,
    pub annotation_type: String,
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
}
