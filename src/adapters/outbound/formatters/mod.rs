/// Serializer adapters for the concrete SPDX output formats
mod json_ld_formatter;
mod rdf_xml_formatter;
mod spdx_json_formatter;

pub use json_ld_formatter::JsonLdSerializer;
pub use rdf_xml_formatter::RdfXmlSerializer;
pub use spdx_json_formatter::SpdxJsonSerializer;

use crate::sbom_generation::domain::SchemaVersion;
use crate::shared::{AssemblyError, ErrorKind};

/// Error for a document whose schema the format cannot express.
fn schema_mismatch(format: &str, version: SchemaVersion) -> anyhow::Error {
    AssemblyError::new(
        ErrorKind::SchemaFormatMismatch,
        format!(
            "{} output cannot express an SPDX {} document",
            format,
            version.spec_version()
        ),
    )
    .into()
}
