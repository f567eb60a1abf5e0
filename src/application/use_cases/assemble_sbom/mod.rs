use crate::application::dto::{tool_creator, AssemblyRequest, AssemblyResponse};
use crate::application::factories::SchemaAdapterFactory;
use crate::ports::inbound::SbomAssemblyPort;
use crate::ports::outbound::{
    DependencyMetadataResolver, LicenseAssertionKind, ProgressReporter, ProjectDescriptor,
    ProjectMetadataReader, SbomDocumentReader,
};
use crate::sbom_generation::domain::package::{NOASSERTION, UNSPECIFIED};
use crate::sbom_generation::domain::{
    ArtifactCoordinates, Checksum, DocumentInfo, ElementId, ExternalRef, FileSet, LicenseExpression,
    PackageInfo, PrimaryPurpose, ProjectMetadata, Relationship, RelationshipType,
};
use crate::sbom_generation::policies::LicenseOverwritePolicy;
use crate::sbom_generation::services::{
    AssemblySession, ChecksumEngine, CollectionOptions, DependencyGraphTransformer, DocumentVerifier,
    FileCollector, LicenseCatalog, LicenseResolver, TransformOptions,
};
use crate::shared::error::SbomError;
use crate::shared::{AssemblyResult, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// AssembleSbomUseCase - Core use case for SBOM assembly
///
/// This use case orchestrates one assembly run using generic dependency
/// injection for all infrastructure dependencies. Every run owns a fresh
/// `AssemblySession`; only the license catalog is shared between runs.
///
/// # Type Parameters
/// * `PMR` - ProjectMetadataReader implementation
/// * `MR` - DependencyMetadataResolver implementation, consulted for
///   dependencies the project descriptor has no metadata for
/// * `DR` - SbomDocumentReader implementation for dependency sidecars
/// * `PR` - ProgressReporter implementation
pub struct AssembleSbomUseCase<PMR, MR, DR, PR> {
    project_reader: PMR,
    metadata_resolver: MR,
    document_reader: DR,
    progress_reporter: PR,
    catalog: Arc<LicenseCatalog>,
}

impl<PMR, MR, DR, PR> AssembleSbomUseCase<PMR, MR, DR, PR>
where
    PMR: ProjectMetadataReader,
    MR: DependencyMetadataResolver,
    DR: SbomDocumentReader,
    PR: ProgressReporter,
{
    /// Creates a new AssembleSbomUseCase with injected dependencies
    pub fn new(
        project_reader: PMR,
        metadata_resolver: MR,
        document_reader: DR,
        progress_reporter: PR,
        catalog: Arc<LicenseCatalog>,
    ) -> Self {
        Self {
            project_reader,
            metadata_resolver,
            document_reader,
            progress_reporter,
            catalog,
        }
    }

    /// Executes the SBOM assembly use case
    ///
    /// # Arguments
    /// * `request` - Assembly request built from configuration and flags
    ///
    /// # Returns
    /// AssemblyResponse containing the finished document and the warnings of the run
    pub fn execute(&self, request: AssemblyRequest) -> Result<AssemblyResponse> {
        // Step 1: Reject format/schema pairings before doing any work
        request.output_format.check_pairing(request.schema_version)?;

        // Step 2: Read the project descriptor
        self.progress_reporter
            .report(&format!("🔍 Reading project at {}...", request.project_path.display()));
        let descriptor = self.project_reader.read_project(&request.project_path)?;
        let coordinates = descriptor.metadata.coordinates.clone();
        tracing::info!(project = %coordinates, "project descriptor read");

        // Step 3: Start a session for the requested schema version
        let namespace = request
            .document_namespace
            .clone()
            .unwrap_or_else(|| derive_namespace(&coordinates));
        let resolver = LicenseResolver::new(self.catalog.clone(), request.match_cross_reference_urls);
        let mut session = AssemblySession::new(
            SchemaAdapterFactory::create(request.schema_version, &namespace),
            resolver,
        );
        for license in &request.custom_licenses {
            session.register_custom_license(license.clone())?;
        }

        // Step 4: Describe the project package
        let package_id = Self::build_project_package(&mut session, &descriptor.metadata, &request)?;
        session.adapter_mut().materialize_relationship(Relationship::new(
            ElementId::document().into(),
            RelationshipType::Describes,
            package_id.clone().into(),
        ));

        // Step 5: Collect the project files into the package
        self.progress_reporter.report("📁 Collecting project files...");
        let file_sets = Self::effective_file_sets(&request);
        let mut options = CollectionOptions::new(&request.project_path);
        options.default_info = request.default_file.clone();
        options.path_overrides = request.path_overrides.clone();
        options.algorithms = request.checksum_algorithms.clone();
        options.excluded_names = request.excluded_file_names.clone();
        let collected = FileCollector::collect(&mut session, &package_id, &file_sets, &options)?;
        self.progress_reporter
            .report_progress(collected.files.len(), collected.files.len(), Some("files collected"));

        // Step 6: Turn the dependency tree into packages and relationships
        let created = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let dependency_count = self.transform_dependencies(&mut session, &descriptor, &package_id, &request, &created);

        for annotation in &request.document_annotations {
            session
                .adapter_mut()
                .add_annotation(&ElementId::document(), annotation);
        }

        // Step 7: Verify the assembled document
        session.register_missing_custom_licenses();
        let verification_problems = DocumentVerifier::verify(&session);
        if request.strict_verification && !verification_problems.is_empty() {
            let details = verification_problems
                .iter()
                .map(|problem| format!("  - {}", problem))
                .collect::<Vec<_>>()
                .join("\n");
            return Err(SbomError::VerificationFailed {
                count: verification_problems.len(),
                details,
            }
            .into());
        }

        // Step 8: Finish the document
        let info = DocumentInfo {
            name: document_name(&descriptor.metadata),
            namespace,
            creators: request.all_creators(),
            creator_comment: request.creator_comment.clone(),
            created,
            comment: request.document_comment.clone(),
            license_list_version: session.resolver().license_list_version(),
        };
        let external_document_count = session.external_document_count();
        let (document, warnings) = session.finish(&info);

        // Each warning has already been logged where it was raised
        if !warnings.is_empty() {
            self.progress_reporter
                .report_warning(&format!("{} warning(s) raised during assembly", warnings.len()));
        }
        if !verification_problems.is_empty() {
            self.progress_reporter.report_warning(&format!(
                "Document verification found {} problem(s)",
                verification_problems.len()
            ));
        }
        self.progress_reporter.report_completion(&format!(
            "✅ Assembled SPDX {} document: {} file(s), {} dependency relationship(s)",
            request.schema_version.spec_version(),
            collected.files.len(),
            dependency_count
        ));

        Ok(AssemblyResponse {
            document,
            warnings,
            verification_problems,
            file_count: collected.files.len(),
            dependency_count,
            external_document_count,
        })
    }

    /// Builds the package describing the project itself and attaches its
    /// declared and concluded licenses.
    ///
    /// # Errors
    /// - `InvalidLicenseExpression` if a configured license text does not parse
    /// - `ReadError` if the project's built artifact cannot be read
    fn build_project_package(
        session: &mut AssemblySession,
        metadata: &ProjectMetadata,
        request: &AssemblyRequest,
    ) -> AssemblyResult<ElementId> {
        let settings = &request.package;
        let coordinates = &metadata.coordinates;

        let declared = match settings.license_declared.as_deref() {
            Some(text) => session.resolver().parse_expression(text)?,
            None => Self::descriptor_license(session, metadata),
        };
        let concluded = match settings.license_concluded.as_deref() {
            Some(text) => session.resolver().parse_expression(text)?,
            None => declared.clone(),
        };

        let organization = metadata
            .organization
            .as_ref()
            .map(|organization| format!("Organization: {}", organization));

        let mut info = PackageInfo::new(document_name(metadata)).with_version(coordinates.version.as_str());
        info.files_analyzed = true;
        info.originator = settings.originator.clone().or_else(|| organization.clone());
        info.supplier = settings.supplier.clone().or(organization);
        info.download_location = settings
            .download_url
            .clone()
            .or_else(|| metadata.download_url.clone())
            .unwrap_or_else(|| NOASSERTION.to_string());
        info.homepage = metadata.url.clone();
        info.source_info = settings.source_info.clone();
        info.license_comment = settings.license_comments.clone();
        info.copyright = settings
            .copyright_text
            .clone()
            .unwrap_or_else(|| UNSPECIFIED.to_string());
        info.summary = metadata.description.clone();
        info.description = metadata.description.clone();
        info.primary_purpose = metadata.packaging.as_deref().map(PrimaryPurpose::from_packaging);
        info.external_refs = settings.external_refs.clone();
        if request.generate_purls {
            info.external_refs.push(ExternalRef::maven_purl(
                &coordinates.group_id,
                &coordinates.artifact_id,
                &coordinates.version,
            ));
        }
        info.annotations = settings.annotations.clone();
        if let Some(file) = &metadata.file {
            let digests = ChecksumEngine::digest(file, &request.checksum_algorithms)?;
            info.checksums = digests
                .into_iter()
                .map(|(algorithm, value)| Checksum::new(algorithm, value))
                .collect();
            info.package_file_name = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned());
        }

        let adapter = session.adapter_mut();
        let id = adapter.materialize_package(info);
        adapter.materialize_license_assertion(&id, LicenseAssertionKind::Declared, &declared);
        adapter.materialize_license_assertion(&id, LicenseAssertionKind::Concluded, &concluded);
        tracing::debug!("Created project package {}", id);
        Ok(id)
    }

    /// Maps the descriptor's licenses, strictly first, then dropping what
    /// cannot be mapped.
    fn descriptor_license(session: &mut AssemblySession, metadata: &ProjectMetadata) -> LicenseExpression {
        match session.resolver().resolve_declared_strict(&metadata.licenses) {
            Ok(license) => license,
            Err(strict_error) => {
                tracing::debug!("Strict license mapping of the project failed: {}", strict_error);
                let (license, errors) = session.resolver().resolve_declared(&metadata.licenses);
                for error in errors {
                    session.warn(format!("License of project {}: {}", metadata.coordinates, error));
                }
                license
            }
        }
    }

    fn effective_file_sets(request: &AssemblyRequest) -> Vec<FileSet> {
        if !request.file_sets.is_empty() {
            return request.file_sets.clone();
        }
        let sources = request.project_path.join("src");
        if sources.is_dir() {
            vec![FileSet::new(sources)]
        } else {
            tracing::debug!("No file sets configured and no src directory found");
            Vec::new()
        }
    }

    fn transform_dependencies(
        &self,
        session: &mut AssemblySession,
        descriptor: &ProjectDescriptor,
        package_id: &ElementId,
        request: &AssemblyRequest,
        created: &str,
    ) -> usize {
        let total = descriptor.dependency_tree.descendant_count();
        if total == 0 {
            return 0;
        }
        self.progress_reporter
            .report(&format!("🔗 Resolving {} dependencies...", total));

        let metadata = DescriptorMetadata::new(&descriptor.dependency_metadata, &self.metadata_resolver);
        let overwrites = LicenseOverwritePolicy::new(request.license_overwrites.clone());
        let options = TransformOptions {
            include_transitive: request.include_transitive,
            create_external_refs: request.create_external_refs,
            generate_purls: request.generate_purls,
            use_artifact_id: request.use_artifact_id,
            annotator: tool_creator(),
            annotation_date: created.to_string(),
        };
        DependencyGraphTransformer::new(&metadata, &self.document_reader, &overwrites, options)
            .transform(session, &descriptor.dependency_tree, package_id)
    }
}

impl<PMR, MR, DR, PR> SbomAssemblyPort for AssembleSbomUseCase<PMR, MR, DR, PR>
where
    PMR: ProjectMetadataReader,
    MR: DependencyMetadataResolver,
    DR: SbomDocumentReader,
    PR: ProgressReporter,
{
    fn assemble(&self, request: AssemblyRequest) -> Result<AssemblyResponse> {
        self.execute(request)
    }
}

/// Dependency metadata from the project descriptor, falling back to the
/// injected resolver.
struct DescriptorMetadata<'a> {
    entries: HashMap<String, &'a ProjectMetadata>,
    fallback: &'a dyn DependencyMetadataResolver,
}

impl<'a> DescriptorMetadata<'a> {
    fn new(entries: &'a [ProjectMetadata], fallback: &'a dyn DependencyMetadataResolver) -> Self {
        let entries = entries
            .iter()
            .map(|metadata| (metadata.coordinates.to_string(), metadata))
            .collect();
        Self { entries, fallback }
    }
}

impl DependencyMetadataResolver for DescriptorMetadata<'_> {
    fn resolve_metadata(
        &self,
        coordinates: &ArtifactCoordinates,
    ) -> AssemblyResult<Option<ProjectMetadata>> {
        match self.entries.get(&coordinates.to_string()) {
            Some(metadata) => Ok(Some((*metadata).clone())),
            None => self.fallback.resolve_metadata(coordinates),
        }
    }
}

/// Project name, or `group:artifact` when the descriptor has none.
fn document_name(metadata: &ProjectMetadata) -> String {
    match metadata.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!(
            "{}:{}",
            metadata.coordinates.group_id, metadata.coordinates.artifact_id
        ),
    }
}

fn derive_namespace(coordinates: &ArtifactCoordinates) -> String {
    format!(
        "https://spdx.org/spdxdocs/{}-{}-{}",
        urlencoding::encode(&coordinates.artifact_id),
        urlencoding::encode(&coordinates.version),
        uuid::Uuid::new_v4()
    )
}
