use crate::adapters::outbound::formatters::{JsonLdSerializer, RdfXmlSerializer, SpdxJsonSerializer};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::SbomSerializer;

/// Factory for creating document serializers
///
/// Selects the serializer adapter for an output format. The pairing of
/// format and schema version is checked by the use case before assembly
/// starts; each serializer still refuses a schema it cannot express.
pub struct SerializerFactory;

impl SerializerFactory {
    /// Creates a serializer instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use spdx_sbom::application::dto::OutputFormat;
    /// use spdx_sbom::application::factories::SerializerFactory;
    ///
    /// let serializer = SerializerFactory::create(OutputFormat::JsonLd);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn SbomSerializer> {
        match format {
            OutputFormat::Json => Box::new(SpdxJsonSerializer::new()),
            OutputFormat::RdfXml => Box::new(RdfXmlSerializer::new()),
            OutputFormat::JsonLd => Box::new(JsonLdSerializer::new()),
        }
    }

    /// Returns the progress message for the specified output format
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Json => "📝 Writing SPDX 2.3 JSON output...",
            OutputFormat::RdfXml => "📝 Writing SPDX 2.3 RDF/XML output...",
            OutputFormat::JsonLd => "📝 Writing SPDX 3.0.1 JSON-LD output...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_generation::domain::document::spdx2::SpdxV2Document;
    use crate::sbom_generation::domain::SbomDocument;

    #[test]
    fn test_created_serializer_matches_format() {
        let document = SbomDocument::AttributeCentric(SpdxV2Document::default());

        let json = SerializerFactory::create(OutputFormat::Json).serialize(&document).unwrap();
        assert!(json.trim_start().starts_with('{'));

        let xml = SerializerFactory::create(OutputFormat::RdfXml).serialize(&document).unwrap();
        assert!(xml.starts_with("<?xml"));

        assert!(SerializerFactory::create(OutputFormat::JsonLd).serialize(&document).is_err());
    }

    #[test]
    fn test_progress_message() {
        assert_eq!(
            SerializerFactory::progress_message(OutputFormat::JsonLd),
            "📝 Writing SPDX 3.0.1 JSON-LD output..."
        );
    }
}
