use super::checksum::{Checksum, ChecksumAlgorithm};
use super::license::LicenseExpression;
use super::snippet::SnippetInfo;
use std::collections::BTreeMap;
use std::fmt;

/// Coarse classification of a file derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Source,
    Binary,
    Archive,
    Text,
    Documentation,
    Image,
    Other,
}

/// Static extension table; lookups use the upper-cased extension.
const EXTENSION_TABLE: &[(&str, FileKind)] = &[
    ("JAVA", FileKind::Source),
    ("KT", FileKind::Source),
    ("SCALA", FileKind::Source),
    ("GROOVY", FileKind::Source),
    ("RS", FileKind::Source),
    ("C", FileKind::Source),
    ("H", FileKind::Source),
    ("CC", FileKind::Source),
    ("CPP", FileKind::Source),
    ("HPP", FileKind::Source),
    ("CS", FileKind::Source),
    ("GO", FileKind::Source),
    ("PY", FileKind::Source),
    ("RB", FileKind::Source),
    ("JS", FileKind::Source),
    ("MJS", FileKind::Source),
    ("TS", FileKind::Source),
    ("PHP", FileKind::Source),
    ("PL", FileKind::Source),
    ("SH", FileKind::Source),
    ("BAT", FileKind::Source),
    ("SQL", FileKind::Source),
    ("CSS", FileKind::Source),
    ("SCSS", FileKind::Source),
    ("HTML", FileKind::Source),
    ("HTM", FileKind::Source),
    ("XML", FileKind::Source),
    ("XSD", FileKind::Source),
    ("XSL", FileKind::Source),
    ("JSP", FileKind::Source),
    ("SWIFT", FileKind::Source),
    ("CLASS", FileKind::Binary),
    ("O", FileKind::Binary),
    ("SO", FileKind::Binary),
    ("DLL", FileKind::Binary),
    ("EXE", FileKind::Binary),
    ("DYLIB", FileKind::Binary),
    ("A", FileKind::Binary),
    ("LIB", FileKind::Binary),
    ("WASM", FileKind::Binary),
    ("PYC", FileKind::Binary),
    ("JAR", FileKind::Archive),
    ("WAR", FileKind::Archive),
    ("EAR", FileKind::Archive),
    ("ZIP", FileKind::Archive),
    ("TAR", FileKind::Archive),
    ("GZ", FileKind::Archive),
    ("TGZ", FileKind::Archive),
    ("BZ2", FileKind::Archive),
    ("XZ", FileKind::Archive),
    ("7Z", FileKind::Archive),
    ("RAR", FileKind::Archive),
    ("CRATE", FileKind::Archive),
    ("TXT", FileKind::Text),
    ("PROPERTIES", FileKind::Text),
    ("JSON", FileKind::Text),
    ("YAML", FileKind::Text),
    ("YML", FileKind::Text),
    ("TOML", FileKind::Text),
    ("CSV", FileKind::Text),
    ("CFG", FileKind::Text),
    ("INI", FileKind::Text),
    ("MF", FileKind::Text),
    ("MD", FileKind::Documentation),
    ("RST", FileKind::Documentation),
    ("ADOC", FileKind::Documentation),
    ("PDF", FileKind::Documentation),
    ("DOC", FileKind::Documentation),
    ("DOCX", FileKind::Documentation),
    ("PNG", FileKind::Image),
    ("JPG", FileKind::Image),
    ("JPEG", FileKind::Image),
    ("GIF", FileKind::Image),
    ("SVG", FileKind::Image),
    ("ICO", FileKind::Image),
    ("BMP", FileKind::Image),
];

impl FileKind {
    /// Classifies a file name. The extension is whatever follows the last
    /// dot; a leading dot (`.gitignore`) does not start an extension.
    pub fn from_file_name(file_name: &str) -> Self {
        let base = file_name.rsplit('/').next().unwrap_or(file_name);
        match base.rfind('.') {
            Some(index) if index >= 1 && index + 1 < base.len() => {
                let extension = base[index + 1..].to_ascii_uppercase();
                EXTENSION_TABLE
                    .iter()
                    .find(|(ext, _)| *ext == extension)
                    .map(|(_, kind)| *kind)
                    .unwrap_or(FileKind::Other)
            }
            _ => FileKind::Other,
        }
    }

    /// File type name used by the attribute-centric schema.
    pub fn spdx_file_type(self) -> &'static str {
        match self {
            FileKind::Source => "SOURCE",
            FileKind::Binary => "BINARY",
            FileKind::Archive => "ARCHIVE",
            FileKind::Text => "TEXT",
            FileKind::Documentation => "DOCUMENTATION",
            FileKind::Image => "IMAGE",
            FileKind::Other => "OTHER",
        }
    }

    /// Software purpose used by the relationship-centric schema.
    pub fn software_purpose(self) -> &'static str {
        match self {
            FileKind::Source => "source",
            FileKind::Binary => "library",
            FileKind::Archive => "archive",
            FileKind::Text => "data",
            FileKind::Documentation => "documentation",
            FileKind::Image => "data",
            FileKind::Other => "other",
        }
    }

    pub fn from_spdx_file_type(value: &str) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "SOURCE" => FileKind::Source,
            "BINARY" => FileKind::Binary,
            "ARCHIVE" => FileKind::Archive,
            "TEXT" => FileKind::Text,
            "DOCUMENTATION" => FileKind::Documentation,
            "IMAGE" => FileKind::Image,
            _ => FileKind::Other,
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spdx_file_type())
    }
}

/// Default per-file information applied when nothing more specific is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultFileInfo {
    pub copyright: String,
    pub notice: String,
    pub comment: String,
    pub license_comment: String,
    pub contributors: Vec<String>,
    pub concluded_license: String,
    pub declared_license: String,
    /// Snippets attached to every file this information applies to.
    pub snippets: Vec<SnippetInfo>,
}

impl Default for DefaultFileInfo {
    fn default() -> Self {
        Self {
            copyright: "NOASSERTION".to_string(),
            notice: String::new(),
            comment: String::new(),
            license_comment: String::new(),
            contributors: Vec::new(),
            concluded_license: "NOASSERTION".to_string(),
            declared_license: "NOASSERTION".to_string(),
            snippets: Vec::new(),
        }
    }
}

/// One collected file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    /// Normalized, `./`-prefixed, forward-slash relative path.
    pub path: String,
    pub checksums: BTreeMap<ChecksumAlgorithm, String>,
    pub kind: FileKind,
    pub concluded_license: LicenseExpression,
    pub declared_license: LicenseExpression,
    pub copyright: String,
    pub notice: String,
    pub comment: String,
    pub license_comment: String,
    pub contributors: Vec<String>,
}

impl FileRecord {
    pub fn sha1(&self) -> Option<&str> {
        self.checksums
            .get(&ChecksumAlgorithm::Sha1)
            .map(String::as_str)
    }

    pub fn checksum_list(&self) -> Vec<Checksum> {
        self.checksums
            .iter()
            .map(|(algorithm, value)| Checksum::new(*algorithm, value.clone()))
            .collect()
    }
}

/// Normalizes a relative path to the `./dir/file` form used in documents.
pub fn normalize_relative_path(path: &str) -> String {
    let forward = path.replace('\\', "/");
    let trimmed = forward.trim_start_matches("./").trim_start_matches('/');
    format!("./{}", trimmed)
}
