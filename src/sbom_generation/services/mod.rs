mod assembly_session;
mod checksum_engine;
mod dependency_transformer;
mod document_verifier;
mod embedded_license_scanner;
mod file_collector;
mod license_catalog;
mod license_resolver;

pub use assembly_session::AssemblySession;
pub use checksum_engine::ChecksumEngine;
pub use dependency_transformer::{
    find_sidecar, DependencyGraphTransformer, TransformOptions, MAX_DEPENDENCY_DEPTH,
};
pub use document_verifier::DocumentVerifier;
pub use embedded_license_scanner::EmbeddedLicenseScanner;
pub use file_collector::{CollectedFiles, CollectionOptions, FileCollector};
pub use license_catalog::{normalize_url, LicenseCatalog};
pub use license_resolver::LicenseResolver;
