use super::license::LicenseExpression;
use crate::shared::{AssemblyError, ErrorKind};
use std::fmt;
use std::str::FromStr;

/// Inclusive `start:end` range inside a file, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnippetRange {
    pub start: u64,
    pub end: u64,
}

impl SnippetRange {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }
}

impl FromStr for SnippetRange {
    type Err = AssemblyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| {
            AssemblyError::new(
                ErrorKind::InvalidConfiguration,
                format!("invalid snippet range '{}': {}", s.trim(), reason),
            )
        };
        let (start, end) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| invalid("expected <start>:<end>"))?;
        let start: u64 = start.trim().parse().map_err(|_| invalid("start is not a number"))?;
        let end: u64 = end.trim().parse().map_err(|_| invalid("end is not a number"))?;
        if start == 0 || end < start {
            return Err(invalid("start must be at least 1 and not after end"));
        }
        Ok(Self { start, end })
    }
}

impl fmt::Display for SnippetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// Snippet settings as configured: ranges and licenses are still text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetInfo {
    pub name: String,
    pub comment: String,
    pub byte_range: String,
    pub line_range: Option<String>,
    pub concluded_license: String,
    pub license_info: String,
    pub license_comment: String,
    pub copyright: String,
}

impl Default for SnippetInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            comment: String::new(),
            byte_range: String::new(),
            line_range: None,
            concluded_license: "NOASSERTION".to_string(),
            license_info: "NOASSERTION".to_string(),
            license_comment: String::new(),
            copyright: "NOASSERTION".to_string(),
        }
    }
}

/// A resolved snippet of one collected file.
#[derive(Debug, Clone, PartialEq)]
pub struct SnippetRecord {
    pub name: String,
    pub comment: String,
    pub byte_range: SnippetRange,
    pub line_range: Option<SnippetRange>,
    pub concluded_license: LicenseExpression,
    /// Licenses found in the snippet itself.
    pub license_info: LicenseExpression,
    pub license_comment: String,
    pub copyright: String,
}

impl SnippetRecord {
    pub fn new(name: impl Into<String>, byte_range: SnippetRange) -> Self {
        Self {
            name: name.into(),
            comment: String::new(),
            byte_range,
            line_range: None,
            concluded_license: LicenseExpression::NoAssertion,
            license_info: LicenseExpression::NoAssertion,
            license_comment: String::new(),
            copyright: "NOASSERTION".to_string(),
        }
    }
}
