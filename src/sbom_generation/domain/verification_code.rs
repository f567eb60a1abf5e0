/// Package verification code: one SHA-1 summarizing every file's SHA-1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCode {
    pub value: String,
    /// File names left out of the digest (typically the SBOM output file).
    pub excluded_files: Vec<String>,
}

impl VerificationCode {
    pub fn new(value: impl Into<String>, excluded_files: Vec<String>) -> Self {
        Self {
            value: value.into(),
            excluded_files,
        }
    }
}
