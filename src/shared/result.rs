/// Result with `anyhow::Error`, used by the application layer and the CLI.
/// Engine components return [`crate::shared::AssemblyResult`] and convert with `?`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
