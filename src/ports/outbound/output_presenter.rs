use crate::shared::Result;

/// OutputPresenter port for presenting the serialized document
///
/// This port abstracts the output destination (stdout, file, etc.)
/// where the encoded SBOM is written.
pub trait OutputPresenter {
    /// Presents the encoded SBOM content to the output destination
    ///
    /// # Arguments
    /// * `content` - The serialized document
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the output destination fails
    /// - The destination is a symlink or its parent directory is missing
    fn present(&self, content: &str) -> Result<()>;
}
