use crate::sbom_generation::domain::{ChecksumAlgorithm, VerificationCode};
use crate::shared::{AssemblyError, AssemblyResult, ErrorKind};
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// One in-progress digest per requested algorithm.
enum RunningDigest {
    Sha1(Sha1),
    Sha224(Sha224),
    Sha256(Sha256),
    Sha384(Sha384),
    Sha512(Sha512),
    Md5(Md5),
}

impl RunningDigest {
    fn new(algorithm: ChecksumAlgorithm) -> AssemblyResult<Self> {
        match algorithm {
            ChecksumAlgorithm::Sha1 => Ok(Self::Sha1(Sha1::new())),
            ChecksumAlgorithm::Sha224 => Ok(Self::Sha224(Sha224::new())),
            ChecksumAlgorithm::Sha256 => Ok(Self::Sha256(Sha256::new())),
            ChecksumAlgorithm::Sha384 => Ok(Self::Sha384(Sha384::new())),
            ChecksumAlgorithm::Sha512 => Ok(Self::Sha512(Sha512::new())),
            ChecksumAlgorithm::Md5 => Ok(Self::Md5(Md5::new())),
            ChecksumAlgorithm::Md2 | ChecksumAlgorithm::Md4 | ChecksumAlgorithm::Md6 => {
                Err(AssemblyError::new(
                    ErrorKind::UnsupportedAlgorithm,
                    format!("no implementation available for {}", algorithm.spdx_name()),
                ))
            }
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            Self::Sha1(h) => h.update(data),
            Self::Sha224(h) => h.update(data),
            Self::Sha256(h) => h.update(data),
            Self::Sha384(h) => h.update(data),
            Self::Sha512(h) => h.update(data),
            Self::Md5(h) => h.update(data),
        }
    }

    fn finalize_hex(self) -> String {
        match self {
            Self::Sha1(h) => hex::encode(h.finalize()),
            Self::Sha224(h) => hex::encode(h.finalize()),
            Self::Sha256(h) => hex::encode(h.finalize()),
            Self::Sha384(h) => hex::encode(h.finalize()),
            Self::Sha512(h) => hex::encode(h.finalize()),
            Self::Md5(h) => hex::encode(h.finalize()),
        }
    }
}

/// ChecksumEngine service for file digests and package verification codes
///
/// Reads each file once, feeding every requested algorithm from the same
/// buffer. Output is lowercase hex and byte-for-byte reproducible.
pub struct ChecksumEngine;

impl ChecksumEngine {
    /// Computes one digest per requested algorithm for the file at `path`.
    ///
    /// # Errors
    /// - `UnsupportedAlgorithm` if any algorithm has no implementation
    ///   (checked before the file is opened)
    /// - `ReadError` if the file cannot be opened or read
    pub fn digest(
        path: &Path,
        algorithms: &BTreeSet<ChecksumAlgorithm>,
    ) -> AssemblyResult<BTreeMap<ChecksumAlgorithm, String>> {
        let mut digests = algorithms
            .iter()
            .map(|&algorithm| RunningDigest::new(algorithm).map(|d| (algorithm, d)))
            .collect::<AssemblyResult<Vec<_>>>()?;

        let mut file = File::open(path).map_err(|e| {
            AssemblyError::with_cause(
                ErrorKind::ReadError,
                format!("cannot open {}", path.display()),
                e,
            )
        })?;
        let mut buf = vec![0u8; READ_BUFFER_SIZE];
        loop {
            let n = file.read(&mut buf).map_err(|e| {
                AssemblyError::with_cause(
                    ErrorKind::ReadError,
                    format!("cannot read {}", path.display()),
                    e,
                )
            })?;
            if n == 0 {
                break;
            }
            for (_, digest) in digests.iter_mut() {
                digest.update(&buf[..n]);
            }
        }

        Ok(digests
            .into_iter()
            .map(|(algorithm, digest)| (algorithm, digest.finalize_hex()))
            .collect())
    }

    /// SHA-1 of an in-memory byte slice, lowercase hex.
    pub fn sha1_hex(data: &[u8]) -> String {
        hex::encode(Sha1::digest(data))
    }

    /// Computes the package verification code.
    ///
    /// The SHA-1 hex strings are sorted before digesting, so the result does
    /// not depend on discovery order. `excluded_files` is recorded as-is; the
    /// caller has already left those files out of `sha1_values`.
    pub fn verification_code(
        sha1_values: &[String],
        excluded_files: &[String],
    ) -> VerificationCode {
        let mut sorted: Vec<String> = sha1_values.iter().map(|v| v.to_ascii_lowercase()).collect();
        sorted.sort();

        let mut hasher = Sha1::new();
        for value in &sorted {
            hasher.update(value.as_bytes());
        }
        VerificationCode::new(hex::encode(hasher.finalize()), excluded_files.to_vec())
    }
}
