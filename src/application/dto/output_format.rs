use crate::sbom_generation::domain::SchemaVersion;
use crate::shared::{AssemblyError, AssemblyResult, ErrorKind};
use std::path::Path;

/// Output format enumeration for SBOM serialization
///
/// This enum represents the concrete encodings a finished document can be
/// written in. It belongs in the application layer as both the CLI and the
/// serializers need to understand it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// SPDX 2.3 JSON
    Json,
    /// SPDX 2.3 RDF/XML
    RdfXml,
    /// SPDX 3.0.1 JSON-LD
    JsonLd,
}

impl OutputFormat {
    /// Infers the format from an output file name, if it has a known suffix.
    pub fn from_output_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy().to_ascii_lowercase();
        if name.ends_with(".rdf.xml") || name.ends_with(".rdf") {
            Some(OutputFormat::RdfXml)
        } else if name.ends_with(".json-ld.json") || name.ends_with(".jsonld") {
            Some(OutputFormat::JsonLd)
        } else if name.ends_with(".json") {
            Some(OutputFormat::Json)
        } else {
            None
        }
    }

    /// Format used when neither an explicit format nor an output path is given.
    pub fn default_for(version: SchemaVersion) -> Self {
        match version {
            SchemaVersion::V2 => OutputFormat::Json,
            SchemaVersion::V3 => OutputFormat::JsonLd,
        }
    }

    pub fn supports(self, version: SchemaVersion) -> bool {
        match self {
            OutputFormat::Json | OutputFormat::RdfXml => version == SchemaVersion::V2,
            OutputFormat::JsonLd => version == SchemaVersion::V3,
        }
    }

    /// # Errors
    /// Returns `SchemaFormatMismatch` if this format cannot express `version`
    pub fn check_pairing(self, version: SchemaVersion) -> AssemblyResult<()> {
        if self.supports(version) {
            return Ok(());
        }
        Err(AssemblyError::new(
            ErrorKind::SchemaFormatMismatch,
            format!(
                "SPDX {} documents cannot be written as {}; use {}",
                version.spec_version(),
                self,
                OutputFormat::default_for(version)
            ),
        ))
    }

    /// Conventional file suffix, also used for sidecar SBOMs.
    pub fn file_extension(self) -> &'static str {
        match self {
            OutputFormat::Json => ".spdx.json",
            OutputFormat::RdfXml => ".spdx.rdf.xml",
            OutputFormat::JsonLd => ".spdx.json-ld.json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "rdf-xml" | "rdfxml" | "rdf" | "xml" => Ok(OutputFormat::RdfXml),
            "json-ld" | "jsonld" => Ok(OutputFormat::JsonLd),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'json', 'rdf-xml' or 'json-ld'",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::RdfXml => write!(f, "rdf-xml"),
            OutputFormat::JsonLd => write!(f, "json-ld"),
        }
    }
}
