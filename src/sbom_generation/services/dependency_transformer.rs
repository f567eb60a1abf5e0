use super::assembly_session::AssemblySession;
use super::checksum_engine::ChecksumEngine;
use crate::ports::outbound::{
    DependencyMetadataResolver, ExternalPackage, ExternalSbom, LicenseAssertionKind,
    SbomDocumentReader,
};
use crate::sbom_generation::domain::package::{NOASSERTION, UNSPECIFIED};
use crate::sbom_generation::domain::{
    document_ref_id, Annotation, AnnotationType, Artifact, ArtifactCoordinates, Checksum,
    ChecksumAlgorithm, Completeness, DependencyNode, ElementId, ElementRef,
    ExternalDocumentReference, ExternalRef, LicenseExpression, PackageInfo, ProjectMetadata,
    Relationship, RelationshipType, SchemaVersion,
};
use crate::sbom_generation::policies::{
    DependencyClassification, LicenseField, LicenseOverwritePolicy, RelationshipPolicy,
};
use crate::shared::{AssemblyError, AssemblyResult, ErrorKind};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Maximum depth of the dependency tree that is expanded.
pub const MAX_DEPENDENCY_DEPTH: usize = 100;

const MINIMAL_PACKAGE_COMMENT: &str = "This package was created for a Maven dependency.  No SPDX or license information could be found in the Maven POM file.";
const CHILD_RELATIONSHIP_COMMENT: &str = "Relationship created based on Maven POM information";
const PARENT_RELATIONSHIP_COMMENT: &str = "Relationship based on Maven POM file dependency information";

/// Sidecar SBOM formats, in lookup priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SidecarFormat {
    JsonLd,
    Json,
    RdfXml,
}

impl SidecarFormat {
    const ALL: [SidecarFormat; 3] = [SidecarFormat::JsonLd, SidecarFormat::Json, SidecarFormat::RdfXml];

    fn extension(self) -> &'static str {
        match self {
            SidecarFormat::JsonLd => ".spdx.json-ld.json",
            SidecarFormat::Json => ".spdx.json",
            SidecarFormat::RdfXml => ".spdx.rdf.xml",
        }
    }

    fn schema_version(self) -> SchemaVersion {
        match self {
            SidecarFormat::JsonLd => SchemaVersion::V3,
            SidecarFormat::Json | SidecarFormat::RdfXml => SchemaVersion::V2,
        }
    }
}

/// Returns the first existing sidecar SBOM next to `artifact_file` whose
/// schema matches `version`.
pub fn find_sidecar(artifact_file: &Path, version: SchemaVersion) -> Option<PathBuf> {
    sidecar_candidates(artifact_file, version)
        .into_iter()
        .map(|(path, _)| path)
        .find(|path| path.is_file())
}

fn sidecar_candidates(artifact_file: &Path, version: SchemaVersion) -> Vec<(PathBuf, SidecarFormat)> {
    let Some(stem) = artifact_file.file_stem() else {
        return Vec::new();
    };
    let stem = stem.to_string_lossy();
    SidecarFormat::ALL
        .iter()
        .filter(|format| format.schema_version() == version)
        .map(|format| {
            (
                artifact_file.with_file_name(format!("{}{}", stem, format.extension())),
                *format,
            )
        })
        .collect()
}

/// Switches for one transformation run.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    pub include_transitive: bool,
    /// Reference sidecar documents instead of copying their package.
    pub create_external_refs: bool,
    pub generate_purls: bool,
    /// Name synthesized packages `group:artifact` even when a name is known.
    pub use_artifact_id: bool,
    /// Annotator of the annotations recorded for external references.
    pub annotator: String,
    pub annotation_date: String,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            include_transitive: true,
            create_external_refs: true,
            generate_purls: false,
            use_artifact_id: false,
            annotator: format!("Tool: spdx-sbom-{}", env!("CARGO_PKG_VERSION")),
            annotation_date: chrono::Utc::now()
                .format("%Y-%m-%dT%H:%M:%SZ")
                .to_string(),
        }
    }
}

/// DependencyGraphTransformer service
///
/// Converts a dependency tree into package relationships. Each dependency is
/// resolved by the first strategy that succeeds:
/// 1. a sidecar SBOM next to the artifact file, referenced or copied
/// 2. dependency metadata, synthesized into a package
/// 3. a minimal package built from the coordinates alone
///
/// Failures of one strategy are logged and fall through to the next.
pub struct DependencyGraphTransformer<'a> {
    metadata_resolver: &'a dyn DependencyMetadataResolver,
    document_reader: &'a dyn SbomDocumentReader,
    overwrites: &'a LicenseOverwritePolicy,
    options: TransformOptions,
}

impl<'a> DependencyGraphTransformer<'a> {
    pub fn new(
        metadata_resolver: &'a dyn DependencyMetadataResolver,
        document_reader: &'a dyn SbomDocumentReader,
        overwrites: &'a LicenseOverwritePolicy,
        options: TransformOptions,
    ) -> Self {
        Self {
            metadata_resolver,
            document_reader,
            overwrites,
            options,
        }
    }

    /// Relates every dependency below `root` to its parent package, `parent`
    /// being the package of `root` itself.
    ///
    /// Returns the number of dependency edges recorded.
    pub fn transform(
        &self,
        session: &mut AssemblySession,
        root: &DependencyNode,
        parent: &ElementId,
    ) -> usize {
        let mut path = vec![root.artifact.coordinates.clone()];
        let mut recorded = 0;
        self.walk(session, root, parent, &mut path, &mut recorded);
        tracing::info!(dependencies = recorded, "dependency graph transformed");
        recorded
    }

    fn walk(
        &self,
        session: &mut AssemblySession,
        node: &DependencyNode,
        parent: &ElementId,
        path: &mut Vec<ArtifactCoordinates>,
        recorded: &mut usize,
    ) {
        if path.len() > MAX_DEPENDENCY_DEPTH {
            session.warn(format!(
                "Dependency tree deeper than {} levels below {}; not descending further",
                MAX_DEPENDENCY_DEPTH, node.artifact.coordinates
            ));
            return;
        }

        for child in &node.children {
            let artifact = &child.artifact;
            let coordinates = &artifact.coordinates;
            if path.contains(coordinates) {
                session.warn(format!(
                    "Dependency cycle at {}; it already appears on the path from the project",
                    coordinates
                ));
                continue;
            }

            let classification =
                RelationshipPolicy::classify(artifact.scope.as_deref(), artifact.optional);
            if !classification.recognized {
                session.warn(format!(
                    "Could not determine relationship type for dependency {} with scope {}",
                    coordinates,
                    artifact.scope.as_deref().unwrap_or("<none>")
                ));
            }

            let dependency = self.resolve_package(session, artifact);
            let relationship = Self::relationship(parent, &dependency, classification);
            tracing::debug!(
                "Added relationship of type {} for {}",
                relationship.relationship_type,
                coordinates
            );
            session.adapter_mut().materialize_relationship(relationship);
            *recorded += 1;

            if !self.options.include_transitive || child.children.is_empty() {
                continue;
            }
            match dependency.local() {
                Some(local) => {
                    let local = local.clone();
                    path.push(coordinates.clone());
                    self.walk(session, child, &local, path, recorded);
                    path.pop();
                }
                None => tracing::debug!(
                    "{} is described by an external document; its dependencies stay there",
                    coordinates
                ),
            }
        }
    }

    fn relationship(
        parent: &ElementId,
        dependency: &ElementRef,
        classification: DependencyClassification,
    ) -> Relationship {
        let relationship_type = classification.relationship_type;
        let parent_ref = ElementRef::Local(parent.clone());
        let relationship = if !relationship_type.points_to_parent() {
            Relationship::new(parent_ref, relationship_type, dependency.clone())
                .with_comment(PARENT_RELATIONSHIP_COMMENT)
        } else if dependency.local().is_some() {
            Relationship::new(dependency.clone(), relationship_type, parent_ref)
                .with_comment(CHILD_RELATIONSHIP_COMMENT)
        } else {
            // An element of another document cannot own a relationship here.
            Relationship::new(parent_ref, RelationshipType::Other, dependency.clone()).with_comment(
                format!(
                    "This relationship is the inverse of {} to an external document reference.",
                    relationship_type
                ),
            )
        };
        relationship
            .with_scope(classification.lifecycle_scope)
            .with_completeness(Completeness::Complete)
    }

    fn resolve_package(&self, session: &mut AssemblySession, artifact: &Artifact) -> ElementRef {
        let coordinates = &artifact.coordinates;
        tracing::debug!("Creating package for dependency {}", coordinates);

        if let Some(file) = &artifact.file {
            match self.from_sidecar(session, coordinates, file) {
                Ok(Some(resolved)) => return resolved,
                Ok(None) => tracing::debug!("No SBOM found next to {}", file.display()),
                Err(e) => session.warn(format!(
                    "Unable to use the SBOM of dependency {}, using project metadata instead: {}",
                    coordinates, e
                )),
            }
        }

        match self.metadata_resolver.resolve_metadata(coordinates) {
            Ok(Some(metadata)) => match self.synthesize(session, &metadata) {
                Ok(id) => return id.into(),
                Err(e) => session.warn(format!(
                    "Error creating package for dependency {}: {}",
                    coordinates, e
                )),
            },
            Ok(None) => tracing::debug!("No metadata known for {}", coordinates),
            Err(e) => session.warn(format!(
                "Error reading metadata of dependency {}: {}",
                coordinates, e
            )),
        }

        tracing::warn!(
            "A minimal package will be created for dependency {}",
            coordinates
        );
        self.minimal_package(session, coordinates).into()
    }

    fn from_sidecar(
        &self,
        session: &mut AssemblySession,
        coordinates: &ArtifactCoordinates,
        artifact_file: &Path,
    ) -> AssemblyResult<Option<ElementRef>> {
        let version = session.schema_version();
        let Some((sidecar, format)) = sidecar_candidates(artifact_file, version)
            .into_iter()
            .find(|(path, _)| path.is_file())
        else {
            return Ok(None);
        };
        if format == SidecarFormat::RdfXml {
            return Err(AssemblyError::new(
                ErrorKind::ExternalDocumentUnreadable,
                format!("{} is an RDF/XML document, which cannot be read", sidecar.display()),
            ));
        }

        tracing::debug!("Dependency information collected from {}", sidecar.display());
        let document = self.document_reader.read_document(&sidecar)?;
        if document.schema_version != version {
            return Err(AssemblyError::new(
                ErrorKind::ExternalDocumentUnreadable,
                format!(
                    "{} is an SPDX {} document, expected SPDX {}",
                    sidecar.display(),
                    document.schema_version.spec_version(),
                    version.spec_version()
                ),
            ));
        }
        let described = match_described_package(session, &document, &coordinates.artifact_id)?;

        if self.options.create_external_refs {
            let reference = self.import_reference(session, coordinates, &document, &sidecar)?;
            Ok(Some(ElementRef::External {
                document_ref: reference.id,
                element_id: described.element_id,
            }))
        } else {
            self.copy_package(session, &described).map(|id| Some(id.into()))
        }
    }

    fn import_reference(
        &self,
        session: &mut AssemblySession,
        coordinates: &ArtifactCoordinates,
        document: &ExternalSbom,
        sidecar: &Path,
    ) -> AssemblyResult<ExternalDocumentReference> {
        let digests =
            ChecksumEngine::digest(sidecar, &BTreeSet::from([ChecksumAlgorithm::Sha1]))?;
        let sha1 = digests.get(&ChecksumAlgorithm::Sha1).cloned().unwrap_or_default();
        let candidate = ExternalDocumentReference::new(
            document_ref_id(&coordinates.group_id, &coordinates.artifact_id, &coordinates.version),
            document.namespace.as_str(),
            Checksum::new(ChecksumAlgorithm::Sha1, sha1),
        );

        let known = session.external_document_count();
        let reference = session.external_document(candidate);
        if session.external_document_count() > known {
            tracing::debug!("Created external document ref {}", reference.id);
            session.adapter_mut().add_annotation(
                &ElementId::document(),
                &Annotation {
                    annotator: self.options.annotator.clone(),
                    date: self.options.annotation_date.clone(),
                    annotation_type: AnnotationType::Other,
                    comment: format!(
                        "External document ref '{}' created for artifact {}",
                        reference.id, coordinates
                    ),
                },
            );
        }
        Ok(reference)
    }

    /// Copies descriptive fields only; relationships of the other document
    /// are never carried over.
    fn copy_package(
        &self,
        session: &mut AssemblySession,
        source: &ExternalPackage,
    ) -> AssemblyResult<ElementId> {
        for custom in &source.custom_licenses {
            if session.resolver().custom_license(&custom.id).is_none() {
                session.register_custom_license(custom.clone())?;
            }
        }
        let declared = external_license(session, source.declared_license.as_deref());
        let concluded = external_license(session, source.concluded_license.as_deref());

        let mut info = source.info.clone();
        info.files_analyzed = false;
        let adapter = session.adapter_mut();
        let id = adapter.materialize_package(info);
        adapter.materialize_license_assertion(&id, LicenseAssertionKind::Declared, &declared);
        adapter.materialize_license_assertion(&id, LicenseAssertionKind::Concluded, &concluded);
        Ok(id)
    }

    /// Builds a package from the metadata of a dependency.
    fn synthesize(
        &self,
        session: &mut AssemblySession,
        metadata: &ProjectMetadata,
    ) -> AssemblyResult<ElementId> {
        let coordinates = &metadata.coordinates;
        let declared_overwrite = self
            .overwrites
            .apply(coordinates, LicenseField::Declared)?
            .cloned();
        let concluded_overwrite = self
            .overwrites
            .apply(coordinates, LicenseField::Concluded)?
            .cloned();

        let original_declared = match session.resolver().resolve_declared_strict(&metadata.licenses) {
            Ok(license) => license,
            Err(strict_error) => {
                tracing::debug!("Strict license mapping failed for {}: {}", coordinates, strict_error);
                let (license, errors) = session.resolver().resolve_declared(&metadata.licenses);
                for error in errors {
                    session.warn(format!("License of dependency {}: {}", coordinates, error));
                }
                license
            }
        };

        let mut comments = Vec::new();
        if declared_overwrite.is_some() {
            comments.push(format!(
                "Declared license has been overwritten, original value: {}",
                original_declared
            ));
        }
        if concluded_overwrite.is_some() {
            comments.push(format!(
                "Concluded license has been overwritten, original value: {}",
                LicenseExpression::NoAssertion
            ));
        }
        let declared = declared_overwrite.unwrap_or(original_declared);
        let concluded = concluded_overwrite.unwrap_or(LicenseExpression::NoAssertion);

        let name = match metadata.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() && !self.options.use_artifact_id => name.to_string(),
            _ => format!("{}:{}", coordinates.group_id, coordinates.artifact_id),
        };
        let mut info = PackageInfo::new(name);
        if !coordinates.version.is_empty() {
            info.version = Some(coordinates.version.clone());
        }
        info.copyright = UNSPECIFIED.to_string();
        info.download_location = NOASSERTION.to_string();
        info.files_analyzed = false;
        info.description = metadata.description.clone();
        info.summary = metadata.description.clone();
        info.originator = metadata
            .organization
            .as_ref()
            .map(|organization| format!("Organization: {}", organization));
        info.homepage = metadata.url.clone();
        if !comments.is_empty() {
            info.license_comment = Some(comments.join("\n"));
        }
        if self.options.generate_purls {
            info.external_refs.push(purl(coordinates));
        }

        let adapter = session.adapter_mut();
        let id = adapter.materialize_package(info);
        adapter.materialize_license_assertion(&id, LicenseAssertionKind::Declared, &declared);
        adapter.materialize_license_assertion(&id, LicenseAssertionKind::Concluded, &concluded);
        Ok(id)
    }

    fn minimal_package(
        &self,
        session: &mut AssemblySession,
        coordinates: &ArtifactCoordinates,
    ) -> ElementId {
        let mut info = PackageInfo::new(coordinates.artifact_id.as_str());
        if !coordinates.version.is_empty() {
            info.version = Some(coordinates.version.clone());
        }
        info.comment = Some(MINIMAL_PACKAGE_COMMENT.to_string());
        info.files_analyzed = false;
        if self.options.generate_purls {
            info.external_refs.push(purl(coordinates));
        }

        let adapter = session.adapter_mut();
        let id = adapter.materialize_package(info);
        for kind in [LicenseAssertionKind::Declared, LicenseAssertionKind::Concluded] {
            adapter.materialize_license_assertion(&id, kind, &LicenseExpression::NoAssertion);
        }
        id
    }
}

fn purl(coordinates: &ArtifactCoordinates) -> ExternalRef {
    ExternalRef::maven_purl(
        &coordinates.group_id,
        &coordinates.artifact_id,
        &coordinates.version,
    )
}

/// The described package named after the artifact, else the first one.
fn match_described_package(
    session: &mut AssemblySession,
    document: &ExternalSbom,
    artifact_id: &str,
) -> AssemblyResult<ExternalPackage> {
    if let Some(package) = document
        .described_packages
        .iter()
        .find(|p| p.info.name == artifact_id)
    {
        return Ok(package.clone());
    }
    match document.described_packages.first() {
        Some(package) => {
            session.warn(format!(
                "No described package named {} in {}; using {}",
                artifact_id, document.namespace, package.info.name
            ));
            Ok(package.clone())
        }
        None => Err(AssemblyError::new(
            ErrorKind::NoDescribedPackageFound,
            format!("{} describes no package", document.namespace),
        )),
    }
}

fn external_license(session: &mut AssemblySession, text: Option<&str>) -> LicenseExpression {
    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        return LicenseExpression::NoAssertion;
    };
    match session.resolver().parse_expression(text) {
        Ok(license) => license,
        Err(e) => {
            session.warn(format!("Ignoring license {} of an external package: {}", text, e));
            LicenseExpression::NoAssertion
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::schema::{AttributeCentricAdapter, RelationshipCentricAdapter};
    use crate::ports::outbound::{LicenseCatalogSource, SchemaVersionAdapter};
    use crate::sbom_generation::domain::{
        CustomLicense, DeclaredLicense, DocumentInfo, LifecycleScope, SbomDocument,
    };
    use crate::sbom_generation::policies::{LicenseOverwrite, OverwriteTarget};
    use crate::sbom_generation::services::{LicenseCatalog, LicenseResolver};
    use std::collections::HashMap;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    struct ListSource;

    impl LicenseCatalogSource for ListSource {
        fn describe(&self) -> &str {
            "test list"
        }

        fn fetch_license_list(&self) -> crate::shared::Result<String> {
            Ok(r#"{"licenses": [
                {"licenseId": "MIT", "seeAlso": ["https://opensource.org/licenses/MIT"]},
                {"licenseId": "Apache-2.0", "seeAlso": ["https://www.apache.org/licenses/LICENSE-2.0"]}
            ]}"#
            .to_string())
        }
    }

    #[derive(Default)]
    struct MapResolver {
        metadata: HashMap<ArtifactCoordinates, ProjectMetadata>,
    }

    impl MapResolver {
        fn with(mut self, metadata: ProjectMetadata) -> Self {
            self.metadata.insert(metadata.coordinates.clone(), metadata);
            self
        }
    }

    impl DependencyMetadataResolver for MapResolver {
        fn resolve_metadata(
            &self,
            coordinates: &ArtifactCoordinates,
        ) -> AssemblyResult<Option<ProjectMetadata>> {
            Ok(self.metadata.get(coordinates).cloned())
        }
    }

    /// Every sidecar reads as the same document.
    struct FixedReader {
        document: ExternalSbom,
    }

    impl SbomDocumentReader for FixedReader {
        fn read_document(&self, _path: &Path) -> AssemblyResult<ExternalSbom> {
            Ok(self.document.clone())
        }
    }

    struct UnreadableReader;

    impl SbomDocumentReader for UnreadableReader {
        fn read_document(&self, path: &Path) -> AssemblyResult<ExternalSbom> {
            Err(AssemblyError::new(
                ErrorKind::ExternalDocumentUnreadable,
                format!("cannot read {}", path.display()),
            ))
        }
    }

    fn session_with(adapter: Box<dyn SchemaVersionAdapter>) -> AssemblySession {
        let catalog = Arc::new(LicenseCatalog::new(None, Box::new(ListSource)));
        AssemblySession::new(adapter, LicenseResolver::new(catalog, true))
    }

    fn v2_session() -> AssemblySession {
        session_with(Box::new(AttributeCentricAdapter::new()))
    }

    fn coords(artifact: &str) -> ArtifactCoordinates {
        ArtifactCoordinates::new("org.acme", artifact, "1.0")
    }

    fn node(artifact: Artifact, children: Vec<DependencyNode>) -> DependencyNode {
        DependencyNode::new(artifact).with_children(children)
    }

    fn leaf(artifact: &str, scope: &str) -> DependencyNode {
        DependencyNode::new(Artifact::new(coords(artifact)).with_scope(scope))
    }

    fn root(children: Vec<DependencyNode>) -> DependencyNode {
        node(Artifact::new(coords("app")), children)
    }

    fn external_sbom(namespace: &str, packages: &[&str]) -> ExternalSbom {
        ExternalSbom {
            namespace: namespace.to_string(),
            schema_version: SchemaVersion::V2,
            described_packages: packages
                .iter()
                .enumerate()
                .map(|(i, name)| ExternalPackage {
                    element_id: format!("SPDXRef-Package-{}", i + 1),
                    info: PackageInfo::new(*name).with_version("1.0"),
                    declared_license: Some("MIT".into()),
                    concluded_license: Some("LicenseRef-Vendor".into()),
                    custom_licenses: vec![CustomLicense::new("LicenseRef-Vendor", "vendor terms")],
                })
                .collect(),
        }
    }

    fn run(
        session: &mut AssemblySession,
        tree: &DependencyNode,
        resolver: &dyn DependencyMetadataResolver,
        reader: &dyn SbomDocumentReader,
        options: TransformOptions,
    ) -> (ElementId, usize) {
        let overwrites = LicenseOverwritePolicy::default();
        let parent = session.adapter_mut().materialize_package(PackageInfo::new("app"));
        let transformer = DependencyGraphTransformer::new(resolver, reader, &overwrites, options);
        let count = transformer.transform(session, tree, &parent);
        (parent, count)
    }

    fn info() -> DocumentInfo {
        DocumentInfo {
            name: "app".into(),
            namespace: "https://example.org/app".into(),
            creators: vec!["Tool: spdx-sbom".into()],
            creator_comment: None,
            created: "2024-01-01T00:00:00Z".into(),
            comment: None,
            license_list_version: None,
        }
    }

    #[test]
    fn test_relationship_type_and_direction_by_scope() {
        let mut session = v2_session();
        let tree = root(vec![
            leaf("compiled", "compile"),
            leaf("tested", "test"),
            node(Artifact::new(coords("maybe")).with_scope("compile").optional(true), vec![]),
            leaf("odd", "foo"),
        ]);

        let (parent, count) = run(&mut session, &tree, &MapResolver::default(), &UnreadableReader, TransformOptions::default());
        assert_eq!(count, 4);

        let relationships = session.adapter().relationships();
        let of_type = |t: RelationshipType| {
            relationships
                .iter()
                .filter(|r| r.relationship_type == t)
                .collect::<Vec<_>>()
        };

        let dynamic = of_type(RelationshipType::DynamicLink);
        assert_eq!(dynamic.len(), 1);
        assert_eq!(dynamic[0].from.local(), Some(&parent));

        let test = of_type(RelationshipType::TestDependencyOf);
        assert_eq!(test.len(), 1);
        assert_eq!(test[0].to.local(), Some(&parent));
        assert_ne!(test[0].from.local(), Some(&parent));

        let optional = of_type(RelationshipType::OptionalComponentOf);
        assert_eq!(optional.len(), 1);
        assert_eq!(optional[0].to.local(), Some(&parent));

        let other = of_type(RelationshipType::Other);
        assert_eq!(other.len(), 1);
        assert!(session
            .warnings()
            .iter()
            .any(|w| w.contains("Could not determine relationship type") && w.contains("odd")));
    }

    #[test]
    fn test_minimal_package_when_nothing_is_known() {
        let mut session = v2_session();
        let tree = root(vec![leaf("mystery", "compile")]);
        let options = TransformOptions {
            generate_purls: true,
            ..TransformOptions::default()
        };
        run(&mut session, &tree, &MapResolver::default(), &UnreadableReader, options);

        let (document, _) = session.finish(&info());
        let SbomDocument::AttributeCentric(doc) = document else {
            panic!("expected attribute-centric document");
        };
        let package = doc.packages.iter().find(|p| p.name == "mystery").unwrap();
        assert_eq!(package.comment.as_deref(), Some(MINIMAL_PACKAGE_COMMENT));
        assert_eq!(package.version_info.as_deref(), Some("1.0"));
        assert_eq!(package.license_declared, "NOASSERTION");
        assert_eq!(
            package.external_refs[0].reference_locator,
            "pkg:maven/org.acme/mystery@1.0"
        );
    }

    #[test]
    fn test_metadata_synthesis() {
        let mut metadata = ProjectMetadata::new(coords("core"));
        metadata.name = Some("Acme Core".into());
        metadata.description = Some("Core library".into());
        metadata.organization = Some("Acme".into());
        metadata.url = Some("https://acme.example".into());
        metadata.licenses = vec![DeclaredLicense::new(Some("MIT"), Some("https://opensource.org/licenses/MIT"))];
        let resolver = MapResolver::default().with(metadata);

        let mut session = v2_session();
        let tree = root(vec![leaf("core", "runtime")]);
        run(&mut session, &tree, &resolver, &UnreadableReader, TransformOptions::default());

        let (document, _) = session.finish(&info());
        let SbomDocument::AttributeCentric(doc) = document else {
            panic!("expected attribute-centric document");
        };
        let package = doc.packages.iter().find(|p| p.name == "Acme Core").unwrap();
        assert_eq!(package.license_declared, "MIT");
        assert_eq!(package.license_concluded, "NOASSERTION");
        assert_eq!(package.copyright_text, "UNSPECIFIED");
        assert_eq!(package.originator.as_deref(), Some("Organization: Acme"));
        assert_eq!(package.homepage.as_deref(), Some("https://acme.example"));
        assert_eq!(package.summary.as_deref(), Some("Core library"));
        assert!(!package.files_analyzed);
        assert!(package.external_refs.is_empty());
    }

    #[test]
    fn test_use_artifact_id_and_unmapped_license() {
        let mut metadata = ProjectMetadata::new(coords("core"));
        metadata.name = Some("Acme Core".into());
        metadata.licenses = vec![DeclaredLicense::new(Some("Custom"), Some("https://acme.example/license"))];
        let resolver = MapResolver::default().with(metadata);

        let mut session = v2_session();
        let tree = root(vec![leaf("core", "compile")]);
        let options = TransformOptions {
            use_artifact_id: true,
            ..TransformOptions::default()
        };
        run(&mut session, &tree, &resolver, &UnreadableReader, options);
        assert!(!session.warnings().is_empty());

        let (document, _) = session.finish(&info());
        let SbomDocument::AttributeCentric(doc) = document else {
            panic!("expected attribute-centric document");
        };
        let package = doc.packages.iter().find(|p| p.name == "org.acme:core").unwrap();
        assert_eq!(package.license_declared, "NOASSERTION");
    }

    #[test]
    fn test_license_overwrite_is_noted() {
        let mut metadata = ProjectMetadata::new(coords("core"));
        metadata.licenses = vec![DeclaredLicense::new(Some("MIT"), Some("https://opensource.org/licenses/MIT"))];
        let resolver = MapResolver::default().with(metadata);
        let overwrites = LicenseOverwritePolicy::new(vec![LicenseOverwrite {
            target: OverwriteTarget::Declared,
            group_id: "org.acme".into(),
            artifact_id: "core".into(),
            version: None,
            license: LicenseExpression::Listed("Apache-2.0".into()),
        }]);

        let mut session = v2_session();
        let parent = session.adapter_mut().materialize_package(PackageInfo::new("app"));
        let transformer = DependencyGraphTransformer::new(
            &resolver,
            &UnreadableReader,
            &overwrites,
            TransformOptions::default(),
        );
        transformer.transform(&mut session, &root(vec![leaf("core", "compile")]), &parent);

        let (document, _) = session.finish(&info());
        let SbomDocument::AttributeCentric(doc) = document else {
            panic!("expected attribute-centric document");
        };
        let package = doc.packages.iter().find(|p| p.name == "org.acme:core").unwrap();
        assert_eq!(package.license_declared, "Apache-2.0");
        assert_eq!(
            package.license_comments.as_deref(),
            Some("Declared license has been overwritten, original value: MIT")
        );
    }

    fn artifact_with_sidecar(dir: &TempDir, artifact: &str, scope: &str) -> DependencyNode {
        let jar = dir.path().join(format!("{}-1.0.jar", artifact));
        fs::write(&jar, b"jar").unwrap();
        fs::write(dir.path().join(format!("{}-1.0.spdx.json", artifact)), b"{}").unwrap();
        DependencyNode::new(Artifact::new(coords(artifact)).with_scope(scope).with_file(jar))
    }

    #[test]
    fn test_external_references_are_deduplicated_by_namespace() {
        let dir = TempDir::new().unwrap();
        let tree = root(vec![
            artifact_with_sidecar(&dir, "one", "compile"),
            artifact_with_sidecar(&dir, "two", "compile"),
            artifact_with_sidecar(&dir, "three", "compile"),
        ]);
        let reader = FixedReader {
            document: external_sbom("https://acme.example/shared", &["one", "two", "three"]),
        };

        let mut session = v2_session();
        let (parent, _) = run(&mut session, &tree, &MapResolver::default(), &reader, TransformOptions::default());

        assert_eq!(session.external_document_count(), 1);
        let external: Vec<_> = session
            .adapter()
            .relationships()
            .into_iter()
            .filter(|r| r.relationship_type == RelationshipType::DynamicLink)
            .collect();
        assert_eq!(external.len(), 3);
        assert!(external.iter().all(|r| r.from.local() == Some(&parent)));
        assert_eq!(
            external[1].to,
            ElementRef::External {
                document_ref: "DocumentRef-org.acme-one-1.0".into(),
                element_id: "SPDXRef-Package-2".into(),
            }
        );

        let (document, _) = session.finish(&info());
        let SbomDocument::AttributeCentric(doc) = document else {
            panic!("expected attribute-centric document");
        };
        assert_eq!(doc.external_document_refs.len(), 1);
        assert_eq!(doc.annotations.len(), 1);
        assert_eq!(
            doc.annotations[0].comment,
            "External document ref 'DocumentRef-org.acme-one-1.0' created for artifact org.acme:one:1.0"
        );
    }

    #[test]
    fn test_test_scope_to_external_element_is_inverted() {
        let dir = TempDir::new().unwrap();
        let tree = root(vec![artifact_with_sidecar(&dir, "one", "test")]);
        let reader = FixedReader {
            document: external_sbom("https://acme.example/one", &["one"]),
        };

        let mut session = v2_session();
        let (parent, _) = run(&mut session, &tree, &MapResolver::default(), &reader, TransformOptions::default());

        let relationships = session.adapter().relationships();
        let relationship = relationships
            .iter()
            .find(|r| r.relationship_type == RelationshipType::Other)
            .unwrap();
        assert_eq!(relationship.from.local(), Some(&parent));
        assert!(relationship
            .comment
            .as_deref()
            .unwrap()
            .contains("inverse of TEST_DEPENDENCY_OF"));
    }

    #[test]
    fn test_copy_mode_copies_described_package() {
        let dir = TempDir::new().unwrap();
        let tree = root(vec![artifact_with_sidecar(&dir, "two", "compile")]);
        let reader = FixedReader {
            document: external_sbom("https://acme.example/shared", &["one", "two"]),
        };
        let options = TransformOptions {
            create_external_refs: false,
            ..TransformOptions::default()
        };

        let mut session = v2_session();
        run(&mut session, &tree, &MapResolver::default(), &reader, options);
        assert_eq!(session.external_document_count(), 0);

        let (document, _) = session.finish(&info());
        let SbomDocument::AttributeCentric(doc) = document else {
            panic!("expected attribute-centric document");
        };
        let copied = doc.packages.iter().find(|p| p.name == "two").unwrap();
        assert_eq!(copied.license_declared, "MIT");
        assert_eq!(copied.license_concluded, "LicenseRef-Vendor");
        assert_eq!(doc.has_extracted_licensing_infos.len(), 1);
        assert_eq!(doc.has_extracted_licensing_infos[0].extracted_text, "vendor terms");
        assert!(doc.packages.iter().all(|p| p.name != "one"));
    }

    #[test]
    fn test_no_described_package_falls_back_to_metadata() {
        let dir = TempDir::new().unwrap();
        let tree = root(vec![artifact_with_sidecar(&dir, "one", "compile")]);
        let reader = FixedReader {
            document: external_sbom("https://acme.example/empty", &[]),
        };
        let mut metadata = ProjectMetadata::new(coords("one"));
        metadata.name = Some("One".into());
        let resolver = MapResolver::default().with(metadata);

        let mut session = v2_session();
        run(&mut session, &tree, &resolver, &reader, TransformOptions::default());

        assert_eq!(session.external_document_count(), 0);
        assert!(session.warnings().iter().any(|w| w.contains("describes no package")));
    }

    #[test]
    fn test_rdf_sidecar_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let jar = dir.path().join("one-1.0.jar");
        fs::write(&jar, b"jar").unwrap();
        fs::write(dir.path().join("one-1.0.spdx.rdf.xml"), b"<rdf/>").unwrap();
        let tree = root(vec![DependencyNode::new(
            Artifact::new(coords("one")).with_scope("compile").with_file(jar),
        )]);

        let mut session = v2_session();
        run(&mut session, &tree, &MapResolver::default(), &UnreadableReader, TransformOptions::default());

        assert_eq!(session.external_document_count(), 0);
        assert!(session.warnings().iter().any(|w| w.contains("RDF/XML")));
    }

    #[test]
    fn test_sidecar_lookup_follows_schema_version() {
        let dir = TempDir::new().unwrap();
        let jar = dir.path().join("lib-2.0.jar");
        fs::write(dir.path().join("lib-2.0.spdx.json"), b"{}").unwrap();

        assert_eq!(
            find_sidecar(&jar, SchemaVersion::V2),
            Some(dir.path().join("lib-2.0.spdx.json"))
        );
        assert_eq!(find_sidecar(&jar, SchemaVersion::V3), None);

        fs::write(dir.path().join("lib-2.0.spdx.json-ld.json"), b"{}").unwrap();
        assert_eq!(
            find_sidecar(&jar, SchemaVersion::V3),
            Some(dir.path().join("lib-2.0.spdx.json-ld.json"))
        );
    }

    #[test]
    fn test_transitive_dependencies_and_switch() {
        let tree = root(vec![node(
            Artifact::new(coords("middle")).with_scope("compile"),
            vec![leaf("bottom", "runtime")],
        )]);

        let mut session = v2_session();
        let (_, count) = run(&mut session, &tree, &MapResolver::default(), &UnreadableReader, TransformOptions::default());
        assert_eq!(count, 2);

        let mut session = v2_session();
        let options = TransformOptions {
            include_transitive: false,
            ..TransformOptions::default()
        };
        let (_, count) = run(&mut session, &tree, &MapResolver::default(), &UnreadableReader, options);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_cycle_is_not_expanded() {
        // app -> lib -> app -> lib ...
        let tree = root(vec![node(
            Artifact::new(coords("lib")).with_scope("compile"),
            vec![node(
                Artifact::new(coords("app")).with_scope("compile"),
                vec![leaf("lib", "compile")],
            )],
        )]);

        let mut session = v2_session();
        let (_, count) = run(&mut session, &tree, &MapResolver::default(), &UnreadableReader, TransformOptions::default());

        assert_eq!(count, 1);
        assert!(session.warnings().iter().any(|w| w.contains("Dependency cycle")));
    }

    #[test]
    fn test_relationship_centric_schema_gets_scope() {
        let mut session = session_with(Box::new(RelationshipCentricAdapter::new("https://example.org/app")));
        let tree = root(vec![leaf("tested", "test")]);
        let (parent, _) = run(&mut session, &tree, &MapResolver::default(), &UnreadableReader, TransformOptions::default());

        let relationships = session.adapter().relationships();
        let test = relationships
            .iter()
            .find(|r| r.relationship_type == RelationshipType::TestDependencyOf)
            .unwrap();
        assert_eq!(test.to.local(), Some(&parent));
        assert_eq!(test.scope, Some(LifecycleScope::Test));
    }
}
