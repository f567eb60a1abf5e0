use crate::ports::outbound::OutputPresenter;
use crate::shared::error::SbomError;
use crate::shared::{AssemblyError, ErrorKind, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// FileSystemWriter adapter for writing the document to a file
///
/// This adapter implements the OutputPresenter port for file output.
/// Failures are reported as `UnwritableOutput` with the I/O detail as cause.
pub struct FileSystemWriter {
    output_path: PathBuf,
}

impl FileSystemWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    fn unwritable(&self, details: String) -> anyhow::Error {
        let cause = SbomError::FileWriteError {
            path: self.output_path.clone(),
            details,
        };
        AssemblyError::with_cause(
            ErrorKind::UnwritableOutput,
            format!("cannot write {}", self.output_path.display()),
            cause,
        )
        .into()
    }

    /// Validates that the parent directory exists before writing
    fn validate_parent_directory(&self) -> Result<()> {
        if let Some(parent) = self.output_path.parent() {
            if parent != Path::new("") && !parent.is_dir() {
                return Err(self.unwritable(format!(
                    "Parent directory does not exist: {}",
                    parent.display()
                )));
            }
        }
        Ok(())
    }

    /// Rejects an existing output path that is a symlink or a directory
    fn validate_output_security(&self) -> Result<()> {
        if let Ok(metadata) = fs::symlink_metadata(&self.output_path) {
            if metadata.is_symlink() {
                return Err(self.unwritable(
                    "Security: Output path is a symbolic link. Writing through symbolic links is not allowed."
                        .to_string(),
                ));
            }
            if metadata.is_dir() {
                return Err(self.unwritable("Output path is a directory".to_string()));
            }
        }
        Ok(())
    }
}

impl OutputPresenter for FileSystemWriter {
    fn present(&self, content: &str) -> Result<()> {
        self.validate_parent_directory()?;
        self.validate_output_security()?;

        fs::write(&self.output_path, content).map_err(|e| self.unwritable(e.to_string()))?;

        tracing::info!("Wrote {}", self.output_path.display());
        eprintln!("✅ Output complete: {}", self.output_path.display());
        Ok(())
    }
}

/// StdoutPresenter adapter for writing output to stdout
///
/// This adapter implements the OutputPresenter port for stdout output.
pub struct StdoutPresenter;

impl StdoutPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPresenter for StdoutPresenter {
    fn present(&self, content: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(content.as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|e| {
                anyhow::Error::from(AssemblyError::with_cause(
                    ErrorKind::UnwritableOutput,
                    "cannot write to stdout",
                    e,
                ))
            })?;
        Ok(())
    }
}
