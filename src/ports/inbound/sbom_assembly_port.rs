use crate::application::dto::{AssemblyRequest, AssemblyResponse};
use crate::shared::Result;

/// SbomAssemblyPort - Inbound port for the SBOM assembly use case
///
/// This port defines the interface that external adapters (CLI, build
/// plugins, etc.) use to trigger one assembly run.
pub trait SbomAssemblyPort {
    /// Assembles an SBOM for the project described by the request
    ///
    /// # Arguments
    /// * `request` - Project location, target schema and assembly options
    ///
    /// # Returns
    /// The finished document together with the warnings of the run
    ///
    /// # Errors
    /// Returns an error if:
    /// - The project identity is missing
    /// - The configuration is invalid
    /// - Strict verification was requested and the document has problems
    fn assemble(&self, request: AssemblyRequest) -> Result<AssemblyResponse>;
}
