use spdx_sbom::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Mock SbomDocumentReader returning prepared documents by sidecar path
#[derive(Default)]
pub struct MockDocumentReader {
    documents: HashMap<PathBuf, ExternalSbom>,
    reads: Mutex<Vec<PathBuf>>,
}

impl MockDocumentReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, path: impl Into<PathBuf>, document: ExternalSbom) -> Self {
        self.documents.insert(path.into(), document);
        self
    }

    pub fn read_count(&self) -> usize {
        self.reads.lock().unwrap().len()
    }
}

impl SbomDocumentReader for MockDocumentReader {
    fn read_document(&self, path: &Path) -> AssemblyResult<ExternalSbom> {
        self.reads.lock().unwrap().push(path.to_path_buf());
        self.documents.get(path).cloned().ok_or_else(|| {
            AssemblyError::new(
                ErrorKind::ExternalDocumentUnreadable,
                format!("no document prepared for {}", path.display()),
            )
        })
    }
}
