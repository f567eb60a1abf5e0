mod cli;

use cli::Args;
use owo_colors::OwoColorize;
use spdx_sbom::adapters::outbound::console::StderrProgressReporter;
use spdx_sbom::adapters::outbound::filesystem::{
    FileSystemReader, LocalMetadataResolver, SpdxDocumentReader,
};
use spdx_sbom::adapters::outbound::network::{BundledLicenseList, SpdxLicenseListClient};
use spdx_sbom::application::dto::{AssemblyRequest, OutputFormat};
use spdx_sbom::application::factories::{PresenterFactory, PresenterType, SerializerFactory};
use spdx_sbom::application::use_cases::AssembleSbomUseCase;
use spdx_sbom::config::{discover_config, load_config_from_path, ConfigFile};
use spdx_sbom::ports::outbound::{LicenseCatalogSource, ProgressReporter};
use spdx_sbom::sbom_generation::domain::SchemaVersion;
use spdx_sbom::sbom_generation::services::LicenseCatalog;
use spdx_sbom::shared::error::{ExitCode, SbomError};
use spdx_sbom::shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        StderrProgressReporter::new().report_error(&error_report(&e));
        process::exit(exit_code_for(&e).as_i32());
    }
}

/// Renders a failed run with its error chain.
fn error_report(error: &anyhow::Error) -> String {
    let mut report = format!("\n{}\n\n{}\n", "❌ An error occurred:".bold(), error);
    let mut source = error.source();
    while let Some(err) = source {
        report.push_str(&format!("\nCaused by: {}\n", err));
        source = err.source();
    }
    report
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<SbomError>() {
        Some(SbomError::VerificationFailed { .. }) => ExitCode::VerificationFailed,
        _ => ExitCode::ApplicationError,
    }
}

fn run(args: Args) -> Result<()> {
    // Validate project directory
    let project_path = PathBuf::from(args.path.as_deref().unwrap_or("."));
    validate_project_path(&project_path)?;

    let config = match args.config.as_deref() {
        Some(path) => Some(load_config_from_path(Path::new(path))?),
        None => discover_config(&project_path)?,
    }
    .unwrap_or_default();

    let output = args
        .output
        .as_deref()
        .map(PathBuf::from)
        .or_else(|| config.output.as_deref().map(|path| project_path.join(path)));

    let request = build_request(&args, &config, &project_path, output.as_deref())?;
    let format = request.output_format;

    // Create adapters (Dependency Injection)
    let offline = args.offline || config.only_use_local_licenses.unwrap_or(false);
    let remote: Option<Box<dyn LicenseCatalogSource>> = if offline {
        None
    } else {
        Some(Box::new(SpdxLicenseListClient::new()?))
    };
    let catalog = Arc::new(LicenseCatalog::new(remote, Box::new(BundledLicenseList::new())));

    let use_case = AssembleSbomUseCase::new(
        FileSystemReader::new(),
        LocalMetadataResolver::new(config.metadata_repository(&project_path)),
        SpdxDocumentReader::new(),
        StderrProgressReporter::new(),
        catalog,
    );

    // Execute use case
    let response = use_case.execute(request)?;

    eprintln!("{}", SerializerFactory::progress_message(format));
    let content = SerializerFactory::create(format).serialize(&response.document)?;

    PresenterFactory::create(PresenterType::from_output(output)).present(&content)?;

    Ok(())
}

/// Layers the request: built-in defaults, then the configuration file, then flags.
fn build_request(
    args: &Args,
    config: &ConfigFile,
    project_path: &Path,
    output: Option<&Path>,
) -> Result<AssemblyRequest> {
    let output_format = output.and_then(OutputFormat::from_output_path);
    let schema_version = match (args.spec_version, config.schema_version()?) {
        (Some(version), _) | (None, Some(version)) => version,
        (None, None) if output_format == Some(OutputFormat::JsonLd) => SchemaVersion::V3,
        (None, None) => SchemaVersion::V2,
    };

    let mut request = AssemblyRequest::new(project_path.to_path_buf(), schema_version);
    config.apply_to(&mut request, project_path)?;

    if let Some(format) = args.format {
        request.output_format = format;
    } else if config.output_format.is_none() {
        if let Some(format) = output_format {
            request.output_format = format;
        }
    }
    if let Some(namespace) = &args.namespace {
        request.document_namespace = Some(namespace.clone());
    }
    if args.no_transitive {
        request.include_transitive = false;
    }
    if args.no_external_refs {
        request.create_external_refs = false;
    }
    if let Some(file_name) = output.and_then(Path::file_name) {
        request
            .excluded_file_names
            .push(file_name.to_string_lossy().into_owned());
    }

    Ok(request)
}

fn validate_project_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(SbomError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }

    // Security check: Reject symbolic links for project paths
    let metadata = std::fs::symlink_metadata(path).map_err(|e| SbomError::InvalidProjectPath {
        path: path.to_path_buf(),
        reason: format!("Failed to read path metadata: {}", e),
    })?;

    if metadata.is_symlink() {
        return Err(SbomError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Security: Project path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !path.is_dir() {
        return Err(SbomError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}
