pub mod checksum;
pub mod document;
pub mod element;
pub mod external_document;
pub mod file_record;
pub mod file_set;
pub mod license;
pub mod package;
pub mod project;
pub mod relationship;
pub mod snippet;
pub mod verification_code;

pub use checksum::{Checksum, ChecksumAlgorithm};
pub use document::{DocumentInfo, SbomDocument, SchemaVersion};
pub use element::{ElementId, ElementRef, IdAllocator};
pub use external_document::{document_ref_id, ExternalDocumentReference};
pub use file_record::{normalize_relative_path, DefaultFileInfo, FileKind, FileRecord};
pub use file_set::FileSet;
pub use license::{CustomLicense, LicenseExpression};
pub use package::{Annotation, AnnotationType, ExternalRef, PackageInfo, PrimaryPurpose};
pub use project::{Artifact, ArtifactCoordinates, DeclaredLicense, DependencyNode, ProjectMetadata};
pub use relationship::{Completeness, LifecycleScope, Relationship, RelationshipType};
pub use snippet::{SnippetInfo, SnippetRange, SnippetRecord};
pub use verification_code::VerificationCode;
