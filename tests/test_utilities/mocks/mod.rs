/// Mock implementations for testing
mod mock_document_reader;
mod mock_license_list;
mod mock_metadata_resolver;
mod mock_progress_reporter;
mod mock_project_reader;

pub use mock_document_reader::MockDocumentReader;
pub use mock_license_list::MockLicenseList;
pub use mock_metadata_resolver::MockMetadataResolver;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_project_reader::MockProjectReader;
