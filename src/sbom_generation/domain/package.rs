use super::checksum::Checksum;
use std::fmt;

/// Download location / copyright placeholder meaning "not asserted".
pub const NOASSERTION: &str = "NOASSERTION";

/// Copyright placeholder used when the project says nothing.
pub const UNSPECIFIED: &str = "UNSPECIFIED";

/// Descriptive attributes of a package, independent of the target schema.
///
/// Licenses are not part of this struct: they are attached afterwards as
/// license assertions so that each schema can model them its own way.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageInfo {
    pub name: String,
    pub version: Option<String>,
    pub package_file_name: Option<String>,
    pub supplier: Option<String>,
    pub originator: Option<String>,
    pub download_location: String,
    pub files_analyzed: bool,
    pub homepage: Option<String>,
    pub source_info: Option<String>,
    pub license_comment: Option<String>,
    pub copyright: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub comment: Option<String>,
    pub primary_purpose: Option<PrimaryPurpose>,
    pub checksums: Vec<Checksum>,
    pub external_refs: Vec<ExternalRef>,
    pub annotations: Vec<Annotation>,
    pub built_date: Option<String>,
    pub release_date: Option<String>,
    pub valid_until_date: Option<String>,
}

impl PackageInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            package_file_name: None,
            supplier: None,
            originator: None,
            download_location: NOASSERTION.to_string(),
            files_analyzed: false,
            homepage: None,
            source_info: None,
            license_comment: None,
            copyright: NOASSERTION.to_string(),
            summary: None,
            description: None,
            comment: None,
            primary_purpose: None,
            checksums: Vec::new(),
            external_refs: Vec::new(),
            annotations: Vec::new(),
            built_date: None,
            release_date: None,
            valid_until_date: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

/// Primary purpose of a package, derived from the project packaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimaryPurpose {
    Application,
    Framework,
    Library,
    Container,
    OperatingSystem,
    Device,
    Firmware,
    Source,
    Archive,
    File,
    Install,
    Other,
}

impl PrimaryPurpose {
    /// Maps a Maven-style packaging string.
    pub fn from_packaging(packaging: &str) -> Self {
        match packaging.to_ascii_lowercase().as_str() {
            "jar" | "bundle" | "aar" | "rlib" | "lib" => PrimaryPurpose::Library,
            "war" | "ear" | "rar" | "bin" => PrimaryPurpose::Application,
            "maven-plugin" => PrimaryPurpose::Framework,
            "pom" => PrimaryPurpose::Install,
            "zip" | "tar" | "tar.gz" => PrimaryPurpose::Archive,
            "docker" | "oci" => PrimaryPurpose::Container,
            _ => PrimaryPurpose::Library,
        }
    }

    pub fn spdx_name(self) -> &'static str {
        match self {
            PrimaryPurpose::Application => "APPLICATION",
            PrimaryPurpose::Framework => "FRAMEWORK",
            PrimaryPurpose::Library => "LIBRARY",
            PrimaryPurpose::Container => "CONTAINER",
            PrimaryPurpose::OperatingSystem => "OPERATING-SYSTEM",
            PrimaryPurpose::Device => "DEVICE",
            PrimaryPurpose::Firmware => "FIRMWARE",
            PrimaryPurpose::Source => "SOURCE",
            PrimaryPurpose::Archive => "ARCHIVE",
            PrimaryPurpose::File => "FILE",
            PrimaryPurpose::Install => "INSTALL",
            PrimaryPurpose::Other => "OTHER",
        }
    }

    pub fn from_spdx_name(name: &str) -> Option<Self> {
        let purpose = match name.to_ascii_uppercase().replace('_', "-").as_str() {
            "APPLICATION" => PrimaryPurpose::Application,
            "FRAMEWORK" => PrimaryPurpose::Framework,
            "LIBRARY" => PrimaryPurpose::Library,
            "CONTAINER" => PrimaryPurpose::Container,
            "OPERATING-SYSTEM" | "OPERATINGSYSTEM" => PrimaryPurpose::OperatingSystem,
            "DEVICE" => PrimaryPurpose::Device,
            "FIRMWARE" => PrimaryPurpose::Firmware,
            "SOURCE" => PrimaryPurpose::Source,
            "ARCHIVE" => PrimaryPurpose::Archive,
            "FILE" => PrimaryPurpose::File,
            "INSTALL" => PrimaryPurpose::Install,
            "OTHER" => PrimaryPurpose::Other,
            _ => return None,
        };
        Some(purpose)
    }

    /// Software purpose name in the relationship-centric vocabulary.
    pub fn software_purpose(self) -> &'static str {
        match self {
            PrimaryPurpose::Application => "application",
            PrimaryPurpose::Framework => "framework",
            PrimaryPurpose::Library => "library",
            PrimaryPurpose::Container => "container",
            PrimaryPurpose::OperatingSystem => "operatingSystem",
            PrimaryPurpose::Device => "device",
            PrimaryPurpose::Firmware => "firmware",
            PrimaryPurpose::Source => "source",
            PrimaryPurpose::Archive => "archive",
            PrimaryPurpose::File => "file",
            PrimaryPurpose::Install => "install",
            PrimaryPurpose::Other => "other",
        }
    }

    pub fn from_software_purpose(name: &str) -> Option<Self> {
        Self::from_spdx_name(name)
    }
}

/// A reference to an external identifier of the package, such as a purl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalRef {
    pub category: String,
    pub reference_type: String,
    pub locator: String,
    pub comment: Option<String>,
}

impl ExternalRef {
    /// `pkg:maven/<group>/<artifact>@<version>` package URL.
    pub fn maven_purl(group_id: &str, artifact_id: &str, version: &str) -> Self {
        Self {
            category: "PACKAGE-MANAGER".to_string(),
            reference_type: "purl".to_string(),
            locator: format!(
                "pkg:maven/{}/{}@{}",
                group_id,
                urlencoding::encode(artifact_id),
                version
            ),
            comment: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationType {
    Review,
    Other,
}

impl AnnotationType {
    pub fn spdx_name(self) -> &'static str {
        match self {
            AnnotationType::Review => "REVIEW",
            AnnotationType::Other => "OTHER",
        }
    }

    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("review") {
            AnnotationType::Review
        } else {
            AnnotationType::Other
        }
    }
}

impl fmt::Display for AnnotationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spdx_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// `Tool: ...`, `Person: ...` or `Organization: ...`
    pub annotator: String,
    /// RFC 3339, UTC.
    pub date: String,
    pub annotation_type: AnnotationType,
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_info_defaults() {
        let info = PackageInfo::new("demo").with_version("1.0");
        assert_eq!(info.name, "demo");
        assert_eq!(info.version.as_deref(), Some("1.0"));
        assert_eq!(info.download_location, NOASSERTION);
        assert!(!info.files_analyzed);
    }

    #[test]
    fn test_maven_purl_encodes_artifact() {
        let purl = ExternalRef::maven_purl("org.acme", "core lib", "2.1");
        assert_eq!(purl.locator, "pkg:maven/org.acme/core%20lib@2.1");
        assert_eq!(purl.reference_type, "purl");
    }

    #[test]
    fn test_primary_purpose_from_packaging() {
        assert_eq!(PrimaryPurpose::from_packaging("jar"), PrimaryPurpose::Library);
        assert_eq!(PrimaryPurpose::from_packaging("WAR"), PrimaryPurpose::Application);
        assert_eq!(PrimaryPurpose::from_packaging("pom"), PrimaryPurpose::Install);
        assert_eq!(PrimaryPurpose::from_software_purpose("operatingSystem"), Some(PrimaryPurpose::OperatingSystem));
    }
}
