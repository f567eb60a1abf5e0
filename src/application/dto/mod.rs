/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod assembly_request;
mod assembly_response;
mod output_format;

pub use assembly_request::{tool_creator, AssemblyRequest, PackageSettings};
pub use assembly_response::AssemblyResponse;
pub use output_format::OutputFormat;
