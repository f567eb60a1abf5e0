//! spdx-sbom - SPDX SBOM assembly engine
//!
//! This library assembles Software Bills of Materials as SPDX 2.3
//! (attribute-centric) or SPDX 3.0.1 (relationship-centric) documents from a
//! project descriptor, the project's file tree and its dependency tree,
//! following hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`sbom_generation`): Pure business logic, domain models and the
//!   assembly services (license resolution, file collection, dependency transformation)
//! - **Application Layer** (`application`): Use cases, DTOs and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure and schema strategies
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use spdx_sbom::prelude::*;
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<()> {
//! // Create adapters
//! let catalog = Arc::new(LicenseCatalog::new(None, Box::new(BundledLicenseList::new())));
//! let use_case = AssembleSbomUseCase::new(
//!     FileSystemReader::new(),
//!     LocalMetadataResolver::new(None),
//!     SpdxDocumentReader::new(),
//!     StderrProgressReporter::new(),
//!     catalog,
//! );
//!
//! // Execute
//! let request = AssemblyRequest::new(PathBuf::from("."), SchemaVersion::V2);
//! let response = use_case.execute(request)?;
//!
//! // Serialize output
//! let output = SpdxJsonSerializer::new().serialize(&response.document)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod sbom_generation;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, LocalMetadataResolver, SpdxDocumentReader,
        StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{
        JsonLdSerializer, RdfXmlSerializer, SpdxJsonSerializer,
    };
    pub use crate::adapters::outbound::network::{BundledLicenseList, SpdxLicenseListClient};
    pub use crate::application::dto::{AssemblyRequest, AssemblyResponse, OutputFormat};
    pub use crate::application::use_cases::AssembleSbomUseCase;
    pub use crate::ports::inbound::SbomAssemblyPort;
    pub use crate::ports::outbound::{
        DependencyMetadataResolver, ExternalPackage, ExternalSbom, LicenseCatalogSource,
        OutputPresenter, ProgressReporter, ProjectDescriptor, ProjectMetadataReader,
        SbomDocumentReader, SbomSerializer,
    };
    pub use crate::sbom_generation::domain::{
        Artifact, ArtifactCoordinates, CustomLicense, DeclaredLicense, DependencyNode, FileSet,
        LicenseExpression, ProjectMetadata, SbomDocument, SchemaVersion,
    };
    pub use crate::sbom_generation::services::LicenseCatalog;
    pub use crate::shared::{AssemblyError, AssemblyResult, ErrorKind, Result};
}
