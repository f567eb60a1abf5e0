use crate::sbom_generation::domain::LicenseExpression;
use crate::shared::{AssemblyError, AssemblyResult, ErrorKind};
use once_cell::sync::Lazy;
use regex::Regex;

/// Files of this size or larger are never scanned.
pub const MAX_SCAN_SIZE: u64 = 300_000;

static IDENTIFIER_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)SPDX-License-Identifier:").expect("static pattern"));

/// Comment terminators that may follow a single-line identifier.
const TRAILING_TERMINATORS: &[&str] = &["*/", "-->"];

/// Finds `SPDX-License-Identifier:` lines in file contents
///
/// A value starting with `(` may span several lines and ends at the
/// matching `)`. Any other value ends at the end of the line.
pub struct EmbeddedLicenseScanner;

impl EmbeddedLicenseScanner {
    pub fn should_scan(file_size: u64) -> bool {
        file_size < MAX_SCAN_SIZE
    }

    /// Returns every identifier expression in `contents`, stopping at the
    /// first malformed one.
    ///
    /// # Errors
    /// - `UnbalancedExpression` if a parenthesized value is never closed
    /// - `InvalidLicenseExpression` if a value does not parse
    pub fn scan(contents: &str) -> AssemblyResult<Vec<LicenseExpression>> {
        Self::matches(contents)
            .into_iter()
            .map(|m| m.and_then(|text| LicenseExpression::parse(&text)))
            .collect()
    }

    /// Like [`scan`](Self::scan), but discards malformed matches and keeps
    /// going. The discarded matches are returned as errors.
    pub fn scan_lenient(contents: &str) -> (Vec<LicenseExpression>, Vec<AssemblyError>) {
        let mut found = Vec::new();
        let mut errors = Vec::new();
        for m in Self::matches(contents) {
            match m.and_then(|text| LicenseExpression::parse(&text)) {
                Ok(expression) => found.push(expression),
                Err(e) => errors.push(e),
            }
        }
        (found, errors)
    }

    /// Raw expression text of each match, in file order.
    fn matches(contents: &str) -> Vec<AssemblyResult<String>> {
        IDENTIFIER_TOKEN
            .find_iter(contents)
            .map(|token| Self::expression_after(&contents[token.end()..]))
            .collect()
    }

    fn expression_after(rest: &str) -> AssemblyResult<String> {
        let value = rest.trim_start_matches([' ', '\t']);
        if value.starts_with('(') {
            return Self::parenthesized(value);
        }

        let mut line = value.lines().next().unwrap_or("").trim_end();
        for terminator in TRAILING_TERMINATORS {
            if let Some(stripped) = line.strip_suffix(terminator) {
                line = stripped.trim_end();
            }
        }
        Ok(line.to_string())
    }

    fn parenthesized(value: &str) -> AssemblyResult<String> {
        let mut depth = 0usize;
        for (index, c) in value.char_indices() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        let text = &value[..=index];
                        return Ok(text
                            .split(['\r', '\n'])
                            .map(str::trim)
                            .filter(|part| !part.is_empty())
                            .collect::<Vec<_>>()
                            .join(" "));
                    }
                }
                _ => {}
            }
        }
        let preview: String = value.lines().next().unwrap_or("").chars().take(60).collect();
        Err(AssemblyError::new(
            ErrorKind::UnbalancedExpression,
            format!("missing ')' in license identifier starting '{}'", preview),
        ))
    }
}
