use std::path::PathBuf;

/// A directory tree to collect, filtered by Ant-style include and exclude
/// patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSet {
    pub directory: PathBuf,
    /// Empty means every file.
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
    /// Directory the files are reported under instead of their location
    /// relative to the project.
    pub output_directory: Option<String>,
}

impl FileSet {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            includes: Vec::new(),
            excludes: Vec::new(),
            output_directory: None,
        }
    }

    pub fn with_includes(mut self, includes: &[&str]) -> Self {
        self.includes = includes.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_excludes(mut self, excludes: &[&str]) -> Self {
        self.excludes = excludes.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_output_directory(mut self, output_directory: impl Into<String>) -> Self {
        self.output_directory = Some(output_directory.into());
        self
    }
}
