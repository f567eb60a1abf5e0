use crate::adapters::outbound::schema::{AttributeCentricAdapter, RelationshipCentricAdapter};
use crate::ports::outbound::SchemaVersionAdapter;
use crate::sbom_generation::domain::SchemaVersion;

/// Factory for creating the schema strategy of one assembly run
///
/// The strategy is selected once; everything downstream talks to the
/// `SchemaVersionAdapter` port only.
pub struct SchemaAdapterFactory;

impl SchemaAdapterFactory {
    /// `namespace` becomes the IRI prefix of every relationship-centric element.
    pub fn create(version: SchemaVersion, namespace: &str) -> Box<dyn SchemaVersionAdapter> {
        match version {
            SchemaVersion::V2 => Box::new(AttributeCentricAdapter::new()),
            SchemaVersion::V3 => Box::new(RelationshipCentricAdapter::new(namespace)),
        }
    }
}
