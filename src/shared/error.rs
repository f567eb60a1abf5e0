use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - document written, verification clean or not enforced
    Success = 0,
    /// Document verification reported problems and strict verification was requested
    VerificationFailed = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (fatal assembly error, network error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::VerificationFailed => write!(f, "Verification Failed (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors surfaced by the CLI.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// keeping the hint text next to the variant it belongs to.
#[derive(Debug, Error)]
pub enum SbomError {
    #[error("Project descriptor not found: {path}\n\n💡 Hint: {suggestion}")]
    ProjectDescriptorNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid project path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a valid project directory")]
    InvalidProjectPath { path: PathBuf, reason: String },

    /// Validation error for builder patterns
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Document verification failed with {count} problem(s):\n{details}\n\n💡 Hint: Fix the reported problems or disable strict_verification to write the document anyway")]
    VerificationFailed { count: usize, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

/// Classification of every failure the assembly engine can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ReadError,
    UnsupportedAlgorithm,
    InvalidLicenseExpression,
    AmbiguousLicenseUrl,
    UnmappedLicense,
    UnbalancedExpression,
    ExternalDocumentUnreadable,
    NoDescribedPackageFound,
    MissingProjectIdentity,
    UnwritableOutput,
    SchemaFormatMismatch,
    InvalidConfiguration,
}

impl ErrorKind {
    /// Top-level fatal conditions abort the run before any output is written.
    /// Everything else is recovered from by the component that observed it.
    pub fn is_fatal(self) -> bool {
        matches!(
            self,
            ErrorKind::MissingProjectIdentity
                | ErrorKind::UnwritableOutput
                | ErrorKind::SchemaFormatMismatch
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::ReadError => "read error",
            ErrorKind::UnsupportedAlgorithm => "unsupported checksum algorithm",
            ErrorKind::InvalidLicenseExpression => "invalid license expression",
            ErrorKind::AmbiguousLicenseUrl => "ambiguous license URL",
            ErrorKind::UnmappedLicense => "unmapped license",
            ErrorKind::UnbalancedExpression => "unbalanced license expression",
            ErrorKind::ExternalDocumentUnreadable => "external document unreadable",
            ErrorKind::NoDescribedPackageFound => "no described package found",
            ErrorKind::MissingProjectIdentity => "missing project identity",
            ErrorKind::UnwritableOutput => "unwritable output",
            ErrorKind::SchemaFormatMismatch => "schema/format mismatch",
            ErrorKind::InvalidConfiguration => "invalid configuration",
        };
        f.write_str(name)
    }
}

type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The single error type returned across assembly component boundaries.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AssemblyError {
    kind: ErrorKind,
    message: String,
    #[source]
    cause: Option<BoxedCause>,
}

impl AssemblyError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause<E>(kind: ErrorKind, message: impl Into<String>, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            kind,
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }
}

/// Result alias used by the engine components.
pub type AssemblyResult<T> = std::result::Result<T, AssemblyError>;
