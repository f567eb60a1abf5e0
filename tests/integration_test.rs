/// Integration tests for the application layer
mod test_utilities;

use spdx_sbom::adapters::outbound::filesystem::SpdxDocumentReader;
use spdx_sbom::sbom_generation::domain::document::spdx2::SpdxV2Document;
use spdx_sbom::sbom_generation::domain::PackageInfo;
use spdx_sbom::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use test_utilities::mocks::*;

const MIT_URL: &str = "https://opensource.org/licenses/MIT";
const APACHE_URL: &str = "https://www.apache.org/licenses/LICENSE-2.0";
const GPL_URL: &str = "https://www.gnu.org/licenses/old-licenses/gpl-2.0-standalone.html";

fn catalog() -> Arc<LicenseCatalog> {
    let list = MockLicenseList::new(&[
        ("MIT", &[MIT_URL]),
        ("Apache-2.0", &[APACHE_URL]),
        ("GPL-2.0-only", &[GPL_URL]),
        ("GPL-2.0-or-later", &[GPL_URL]),
    ]);
    Arc::new(LicenseCatalog::new(None, Box::new(list)))
}

fn coordinates(artifact: &str) -> ArtifactCoordinates {
    ArtifactCoordinates::new("org.acme", artifact, "1.0")
}

fn project(license_url: &str) -> ProjectMetadata {
    let mut metadata = ProjectMetadata::new(coordinates("core"));
    metadata.name = Some("Acme Core".into());
    metadata.organization = Some("Acme".into());
    metadata.licenses = vec![DeclaredLicense::new(Some("License"), Some(license_url))];
    metadata
}

fn project_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(
        dir.path().join("src/lib.rs"),
        "// SPDX-License-Identifier: MIT\npub fn answer() -> u32 { 42 }\n",
    )
    .unwrap();
    dir
}

fn dependency(artifact: &str, scope: &str) -> DependencyNode {
    DependencyNode::new(Artifact::new(coordinates(artifact)).with_scope(scope))
}

fn v2(response: &AssemblyResponse) -> &SpdxV2Document {
    match &response.document {
        SbomDocument::AttributeCentric(document) => document,
        SbomDocument::RelationshipCentric(_) => panic!("expected an SPDX 2.3 document"),
    }
}

#[test]
fn test_assemble_sbom_happy_path() {
    let dir = project_dir();
    let mut util = ProjectMetadata::new(coordinates("util"));
    util.name = Some("Acme Util".into());
    util.licenses = vec![DeclaredLicense::new(Some("Apache"), Some(APACHE_URL))];

    let optional = DependencyNode::new(Artifact::new(coordinates("extras")).optional(true));
    let progress_reporter = MockProgressReporter::new();
    let use_case = AssembleSbomUseCase::new(
        MockProjectReader::new(
            project(MIT_URL),
            vec![dependency("util", "compile"), dependency("junit", "test"), optional],
        ),
        MockMetadataResolver::new().with_metadata(util),
        MockDocumentReader::new(),
        progress_reporter.clone(),
        catalog(),
    );

    let response = use_case
        .execute(AssemblyRequest::new(dir.path().to_path_buf(), SchemaVersion::V2))
        .unwrap();
    let document = v2(&response);

    assert_eq!(document.packages.len(), 4);
    assert_eq!(response.file_count, 1);
    assert_eq!(response.dependency_count, 3);
    assert_eq!(document.packages[0].license_declared, "MIT");
    assert_eq!(document.files[0].file_name, "./src/lib.rs");
    assert_eq!(document.files[0].license_info_in_files, vec!["MIT".to_string()]);

    let util = document.packages.iter().find(|p| p.name == "Acme Util").unwrap();
    assert_eq!(util.license_declared, "Apache-2.0");
    assert_eq!(util.license_concluded, "NOASSERTION");
    assert!(!util.files_analyzed);

    let junit = document.packages.iter().find(|p| p.name == "junit").unwrap();
    assert!(junit
        .comment
        .as_deref()
        .unwrap()
        .contains("No SPDX or license information"));

    let types: Vec<&str> = document
        .relationships
        .iter()
        .map(|r| r.relationship_type.as_str())
        .collect();
    for expected in ["DESCRIBES", "DYNAMIC_LINK", "TEST_DEPENDENCY_OF", "OPTIONAL_COMPONENT_OF"] {
        assert!(types.contains(&expected), "missing {}", expected);
    }

    let messages = progress_reporter.get_messages();
    assert!(messages.iter().any(|m| m.starts_with("Completed: ✅ Assembled SPDX SPDX-2.3 document")));
}

fn shared_document(artifacts: &[&str]) -> ExternalSbom {
    ExternalSbom {
        namespace: "https://example.org/spdx/shared".into(),
        schema_version: SchemaVersion::V2,
        described_packages: artifacts
            .iter()
            .map(|artifact| ExternalPackage {
                element_id: format!("SPDXRef-{}", artifact),
                info: PackageInfo::new(*artifact).with_version("1.0"),
                declared_license: Some("MIT".into()),
                concluded_license: None,
                custom_licenses: Vec::new(),
            })
            .collect(),
    }
}

/// Writes `<artifact>-1.0.jar` and its sidecar, returning the dependency node.
fn dependency_with_sidecar(
    libs: &Path,
    artifact: &str,
    reader: MockDocumentReader,
    document: &ExternalSbom,
) -> (DependencyNode, MockDocumentReader) {
    let jar = libs.join(format!("{}-1.0.jar", artifact));
    let sidecar = libs.join(format!("{}-1.0.spdx.json", artifact));
    fs::write(&jar, artifact).unwrap();
    fs::write(&sidecar, "{}").unwrap();
    let node = DependencyNode::new(
        Artifact::new(coordinates(artifact))
            .with_scope("compile")
            .with_file(jar),
    );
    (node, reader.with_document(sidecar, document.clone()))
}

fn assemble_with_sidecars(dir: &TempDir, create_external_refs: bool) -> AssemblyResponse {
    let libs = dir.path().join("libs");
    fs::create_dir_all(&libs).unwrap();
    let document = shared_document(&["a", "b", "c"]);

    let mut reader = MockDocumentReader::new();
    let mut dependencies = Vec::new();
    for artifact in ["a", "b", "c"] {
        let (node, next) = dependency_with_sidecar(&libs, artifact, reader, &document);
        reader = next;
        dependencies.push(node);
    }

    let use_case = AssembleSbomUseCase::new(
        MockProjectReader::new(project(MIT_URL), dependencies),
        MockMetadataResolver::new(),
        reader,
        MockProgressReporter::new(),
        catalog(),
    );
    let mut request = AssemblyRequest::new(dir.path().to_path_buf(), SchemaVersion::V2);
    request.create_external_refs = create_external_refs;

    use_case.execute(request).unwrap()
}

#[test]
fn test_sidecars_sharing_a_namespace_produce_one_external_reference() {
    let dir = project_dir();
    let response = assemble_with_sidecars(&dir, true);
    let document = v2(&response);

    assert_eq!(response.external_document_count, 1);
    assert_eq!(document.external_document_refs.len(), 1);
    let reference = &document.external_document_refs[0];
    assert_eq!(reference.spdx_document, "https://example.org/spdx/shared");
    assert_eq!(reference.checksum.algorithm, "SHA1");

    let external: Vec<&str> = document
        .relationships
        .iter()
        .map(|r| r.related_spdx_element.as_str())
        .filter(|element| element.starts_with("DocumentRef-"))
        .collect();
    assert_eq!(external.len(), 3);
    assert!(external.contains(&format!("{}:SPDXRef-b", reference.external_document_id).as_str()));

    // Only the project package is local
    assert_eq!(document.packages.len(), 1);
    assert_eq!(document.annotations.len(), 1);
    assert!(document.annotations[0].comment.contains("org.acme:a:1.0"));
    assert!(response.is_verified());
}

#[test]
fn test_copy_mode_copies_described_packages() {
    let dir = project_dir();
    let response = assemble_with_sidecars(&dir, false);
    let document = v2(&response);

    assert_eq!(document.packages.len(), 4);
    assert!(document.external_document_refs.is_empty());
    let copied = document.packages.iter().find(|p| p.name == "b").unwrap();
    assert_eq!(copied.license_declared, "MIT");
    assert!(!copied.files_analyzed);
}

#[test]
fn test_metadata_failure_falls_back_to_minimal_package() {
    let dir = project_dir();
    let use_case = AssembleSbomUseCase::new(
        MockProjectReader::new(project(MIT_URL), vec![dependency("broken", "runtime")]),
        MockMetadataResolver::new().with_failure(&coordinates("broken")),
        MockDocumentReader::new(),
        MockProgressReporter::new(),
        catalog(),
    );

    let response = use_case
        .execute(AssemblyRequest::new(dir.path().to_path_buf(), SchemaVersion::V2))
        .unwrap();

    let broken = v2(&response).packages.iter().find(|p| p.name == "broken").unwrap();
    assert_eq!(broken.license_declared, "NOASSERTION");
    assert!(response
        .warnings
        .iter()
        .any(|w| w.contains("Error reading metadata of dependency org.acme:broken:1.0")));
}

#[test]
fn test_dependency_cycle_is_cut() {
    let dir = project_dir();
    let back_to_root = DependencyNode::new(Artifact::new(coordinates("core")).with_scope("compile"));
    let a = dependency("a", "compile").with_children(vec![back_to_root]);
    let use_case = AssembleSbomUseCase::new(
        MockProjectReader::new(project(MIT_URL), vec![a]),
        MockMetadataResolver::new(),
        MockDocumentReader::new(),
        MockProgressReporter::new(),
        catalog(),
    );

    let response = use_case
        .execute(AssemblyRequest::new(dir.path().to_path_buf(), SchemaVersion::V2))
        .unwrap();

    assert_eq!(response.dependency_count, 1);
    assert!(response.warnings.iter().any(|w| w.contains("cycle")));
}

#[test]
fn test_ambiguous_license_url_is_not_resolved() {
    let dir = project_dir();
    let use_case = AssembleSbomUseCase::new(
        MockProjectReader::new(project(GPL_URL), Vec::new()),
        MockMetadataResolver::new(),
        MockDocumentReader::new(),
        MockProgressReporter::new(),
        catalog(),
    );

    let response = use_case
        .execute(AssemblyRequest::new(dir.path().to_path_buf(), SchemaVersion::V2))
        .unwrap();

    assert_eq!(v2(&response).packages[0].license_declared, "NOASSERTION");
    assert!(response
        .warnings
        .iter()
        .any(|w| w.contains("more than one listed license")));
}

#[test]
fn test_relationship_centric_document_serializes_as_json_ld() {
    let dir = project_dir();
    let use_case = AssembleSbomUseCase::new(
        MockProjectReader::new(project(MIT_URL), vec![dependency("util", "test")]),
        MockMetadataResolver::new(),
        MockDocumentReader::new(),
        MockProgressReporter::new(),
        catalog(),
    );

    let response = use_case
        .execute(AssemblyRequest::new(dir.path().to_path_buf(), SchemaVersion::V3))
        .unwrap();
    let json = JsonLdSerializer::new().serialize(&response.document).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value["@context"].as_str().unwrap().contains("3.0.1"));
    let graph = value["@graph"].as_array().unwrap();
    assert!(graph.iter().any(|e| e["type"] == "software_Package"));
    assert!(graph
        .iter()
        .any(|e| e["type"] == "LifecycleScopedRelationship"
            && e["relationshipType"] == "dependsOn"
            && e["scope"] == "test"));
    assert!(SpdxJsonSerializer::new().serialize(&response.document).is_err());
}

#[test]
fn test_generated_document_is_readable_as_a_sidecar() {
    // Assemble the dependency's own SBOM first
    let util_dir = project_dir();
    let mut util = ProjectMetadata::new(coordinates("util"));
    util.name = Some("util".into());
    util.licenses = vec![DeclaredLicense::new(Some("Apache"), Some(APACHE_URL))];
    let util_use_case = AssembleSbomUseCase::new(
        MockProjectReader::new(util, Vec::new()),
        MockMetadataResolver::new(),
        MockDocumentReader::new(),
        MockProgressReporter::new(),
        catalog(),
    );
    let mut request = AssemblyRequest::new(util_dir.path().to_path_buf(), SchemaVersion::V2);
    request.document_namespace = Some("https://example.org/spdx/util-1.0".into());
    let util_response = util_use_case.execute(request).unwrap();

    let libs = util_dir.path().join("target");
    fs::create_dir_all(&libs).unwrap();
    let jar = libs.join("util-1.0.jar");
    fs::write(&jar, "jar").unwrap();
    fs::write(
        libs.join("util-1.0.spdx.json"),
        SpdxJsonSerializer::new().serialize(&util_response.document).unwrap(),
    )
    .unwrap();

    // Then reference it from the project
    let dir = project_dir();
    let node = DependencyNode::new(
        Artifact::new(coordinates("util"))
            .with_scope("compile")
            .with_file(jar),
    );
    let use_case = AssembleSbomUseCase::new(
        MockProjectReader::new(project(MIT_URL), vec![node]),
        MockMetadataResolver::new(),
        SpdxDocumentReader::new(),
        MockProgressReporter::new(),
        catalog(),
    );
    let response = use_case
        .execute(AssemblyRequest::new(dir.path().to_path_buf(), SchemaVersion::V2))
        .unwrap();

    let document = v2(&response);
    assert_eq!(document.external_document_refs.len(), 1);
    assert_eq!(
        document.external_document_refs[0].spdx_document,
        "https://example.org/spdx/util-1.0"
    );
    assert!(response.is_verified());
}

#[test]
fn test_sbom_assembly_port_delegates_to_use_case() {
    let dir = project_dir();
    let port: Box<dyn SbomAssemblyPort> = Box::new(AssembleSbomUseCase::new(
        MockProjectReader::new(project(MIT_URL), Vec::new()),
        MockMetadataResolver::new(),
        MockDocumentReader::new(),
        MockProgressReporter::new(),
        catalog(),
    ));

    let response = port
        .assemble(AssemblyRequest::new(PathBuf::from(dir.path()), SchemaVersion::V2))
        .unwrap();
    assert_eq!(v2(&response).packages.len(), 1);
}
