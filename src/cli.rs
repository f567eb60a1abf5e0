use clap::Parser;

use spdx_sbom::application::dto::OutputFormat;
use spdx_sbom::sbom_generation::domain::SchemaVersion;

/// Assemble SPDX SBOM documents for a project and its dependencies
#[derive(Parser, Debug)]
#[command(name = "spdx-sbom")]
#[command(version)]
#[command(about = "Assemble SPDX 2.3 and 3.0.1 SBOM documents for a project", long_about = None)]
pub struct Args {
    /// Path to the project directory containing sbom-project.toml (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<String>,

    /// Configuration file (defaults to spdx-sbom.config.yml in the project directory)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// SPDX spec version: 2 (SPDX 2.3) or 3 (SPDX 3.0.1)
    #[arg(short = 's', long)]
    pub spec_version: Option<SchemaVersion>,

    /// Output format: json, rdf-xml or json-ld (inferred from the output file name when omitted)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Document namespace (derived from the project identity when omitted)
    #[arg(long)]
    pub namespace: Option<String>,

    /// Use the bundled SPDX license list instead of fetching it from spdx.org
    #[arg(long)]
    pub offline: bool,

    /// Record direct dependencies only
    #[arg(long)]
    pub no_transitive: bool,

    /// Copy packages from dependency SBOMs instead of referencing those documents
    #[arg(long)]
    pub no_external_refs: bool,

    /// Log debug diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["spdx-sbom"]).unwrap();
        assert!(args.path.is_none());
        assert!(args.spec_version.is_none());
        assert!(args.format.is_none());
        assert!(!args.offline);
        assert!(!args.no_transitive);
        assert!(!args.verbose);
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "spdx-sbom",
            "--path",
            "demo",
            "--output",
            "demo.spdx.json-ld.json",
            "--spec-version",
            "3",
            "--format",
            "JSON-LD",
            "--namespace",
            "https://example.org/demo",
            "--offline",
            "--no-transitive",
            "--no-external-refs",
            "-v",
        ])
        .unwrap();

        assert_eq!(args.path.as_deref(), Some("demo"));
        assert_eq!(args.spec_version, Some(SchemaVersion::V3));
        assert_eq!(args.format, Some(OutputFormat::JsonLd));
        assert_eq!(args.namespace.as_deref(), Some("https://example.org/demo"));
        assert!(args.offline && args.no_transitive && args.no_external_refs && args.verbose);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(Args::try_parse_from(["spdx-sbom", "--spec-version", "4"]).is_err());
        assert!(Args::try_parse_from(["spdx-sbom", "--format", "markdown"]).is_err());
    }
}
