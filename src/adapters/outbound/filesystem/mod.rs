/// Filesystem adapters for file I/O operations
mod file_reader;
mod file_writer;
mod metadata_resolver;
mod sidecar_reader;

pub use file_reader::{parse_descriptor, FileSystemReader, DESCRIPTOR_FILE_NAME};
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use metadata_resolver::LocalMetadataResolver;
pub use sidecar_reader::SpdxDocumentReader;
