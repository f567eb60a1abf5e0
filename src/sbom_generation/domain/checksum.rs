use crate::shared::{AssemblyError, ErrorKind};
use std::fmt;
use std::str::FromStr;

/// Checksum algorithms an SBOM can name.
///
/// `Md2`, `Md4` and `Md6` are valid names in the document model but have
/// no digest implementation; asking the engine for them is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChecksumAlgorithm {
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Md2,
    Md4,
    Md5,
    Md6,
}

impl ChecksumAlgorithm {
    /// Name used by the attribute-centric schema (`SHA256`, `MD5`, ...).
    pub fn spdx_name(self) -> &'static str {
        match self {
            ChecksumAlgorithm::Sha1 => "SHA1",
            ChecksumAlgorithm::Sha224 => "SHA224",
            ChecksumAlgorithm::Sha256 => "SHA256",
            ChecksumAlgorithm::Sha384 => "SHA384",
            ChecksumAlgorithm::Sha512 => "SHA512",
            ChecksumAlgorithm::Md2 => "MD2",
            ChecksumAlgorithm::Md4 => "MD4",
            ChecksumAlgorithm::Md5 => "MD5",
            ChecksumAlgorithm::Md6 => "MD6",
        }
    }

    /// Name used by the relationship-centric schema's hash vocabulary.
    pub fn hash_vocabulary_name(self) -> &'static str {
        match self {
            ChecksumAlgorithm::Sha1 => "sha1",
            ChecksumAlgorithm::Sha224 => "sha224",
            ChecksumAlgorithm::Sha256 => "sha256",
            ChecksumAlgorithm::Sha384 => "sha384",
            ChecksumAlgorithm::Sha512 => "sha512",
            ChecksumAlgorithm::Md2 => "md2",
            ChecksumAlgorithm::Md4 => "md4",
            ChecksumAlgorithm::Md5 => "md5",
            ChecksumAlgorithm::Md6 => "md6",
        }
    }

    pub fn is_implemented(self) -> bool {
        !matches!(
            self,
            ChecksumAlgorithm::Md2 | ChecksumAlgorithm::Md4 | ChecksumAlgorithm::Md6
        )
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spdx_name())
    }
}

impl FromStr for ChecksumAlgorithm {
    type Err = AssemblyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_uppercase();
        match normalized.as_str() {
            "SHA1" => Ok(ChecksumAlgorithm::Sha1),
            "SHA224" => Ok(ChecksumAlgorithm::Sha224),
            "SHA256" => Ok(ChecksumAlgorithm::Sha256),
            "SHA384" => Ok(ChecksumAlgorithm::Sha384),
            "SHA512" => Ok(ChecksumAlgorithm::Sha512),
            "MD2" => Ok(ChecksumAlgorithm::Md2),
            "MD4" => Ok(ChecksumAlgorithm::Md4),
            "MD5" => Ok(ChecksumAlgorithm::Md5),
            "MD6" => Ok(ChecksumAlgorithm::Md6),
            _ => Err(AssemblyError::new(
                ErrorKind::UnsupportedAlgorithm,
                format!("unknown checksum algorithm '{}'", s),
            )),
        }
    }
}

/// A single algorithm/digest pair. The digest is lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Checksum {
    pub algorithm: ChecksumAlgorithm,
    pub value: String,
}

impl Checksum {
    pub fn new(algorithm: ChecksumAlgorithm, value: impl Into<String>) -> Self {
        Self {
            algorithm,
            value: value.into().to_ascii_lowercase(),
        }
    }
}
