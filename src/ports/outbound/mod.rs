/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the assembly engine uses
/// to interact with external systems (file system, network, console, etc.)
/// and with the schema-specific document builders.
pub mod dependency_metadata_resolver;
pub mod license_catalog_source;
pub mod output_presenter;
pub mod progress_reporter;
pub mod project_metadata_reader;
pub mod sbom_document_reader;
pub mod sbom_serializer;
pub mod schema_adapter;

pub use dependency_metadata_resolver::DependencyMetadataResolver;
pub use license_catalog_source::LicenseCatalogSource;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use project_metadata_reader::{ProjectDescriptor, ProjectMetadataReader};
pub use sbom_document_reader::{ExternalPackage, ExternalSbom, SbomDocumentReader};
pub use sbom_serializer::SbomSerializer;
pub use schema_adapter::{LicenseAssertionKind, SchemaVersionAdapter};
