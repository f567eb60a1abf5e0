/// Core SBOM assembly logic: domain model, policies and services.
///
/// Nothing in here performs output formatting; documents are handed to
/// the serializer adapters by the application layer.
pub mod domain;
pub mod policies;
pub mod services;
