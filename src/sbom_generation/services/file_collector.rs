use super::assembly_session::AssemblySession;
use super::checksum_engine::ChecksumEngine;
use super::embedded_license_scanner::EmbeddedLicenseScanner;
use crate::ports::outbound::LicenseAssertionKind;
use crate::sbom_generation::domain::{
    normalize_relative_path, ChecksumAlgorithm, DefaultFileInfo, ElementId, FileKind,
    FileRecord, FileSet, LicenseExpression, Relationship, RelationshipType, SnippetInfo,
    SnippetRange, SnippetRecord, VerificationCode,
};
use crate::shared::{AssemblyError, AssemblyResult, ErrorKind};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Inputs shared by every file set of one collection pass.
#[derive(Debug, Clone)]
pub struct CollectionOptions {
    pub base_dir: PathBuf,
    pub default_info: DefaultFileInfo,
    /// Keyed by relative path (file or directory) without the `./` prefix.
    pub path_overrides: HashMap<String, DefaultFileInfo>,
    pub algorithms: BTreeSet<ChecksumAlgorithm>,
    /// File names left out of the verification code.
    pub excluded_names: Vec<String>,
}

impl CollectionOptions {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            default_info: DefaultFileInfo::default(),
            path_overrides: HashMap::new(),
            algorithms: BTreeSet::from([ChecksumAlgorithm::Sha1]),
            excluded_names: Vec::new(),
        }
    }
}

/// Result of one collection pass.
#[derive(Debug, Clone)]
pub struct CollectedFiles {
    pub files: Vec<(ElementId, FileRecord)>,
    pub snippets: Vec<(ElementId, SnippetRecord)>,
    /// Distinct licenses declared by the collected files, first seen first.
    pub license_info_from_files: Vec<LicenseExpression>,
    pub verification_code: VerificationCode,
}

/// FileCollector service
///
/// Walks file sets, builds one `FileRecord` per distinct file and attaches
/// every file to the package. Checksum failures skip the file; the run
/// continues.
pub struct FileCollector;

impl FileCollector {
    /// Collects `file_sets` into `package`.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if a pattern is not a valid glob and
    /// `UnsupportedAlgorithm` if a requested checksum algorithm has no
    /// implementation
    pub fn collect(
        session: &mut AssemblySession,
        package: &ElementId,
        file_sets: &[FileSet],
        options: &CollectionOptions,
    ) -> AssemblyResult<CollectedFiles> {
        let mut algorithms = options.algorithms.clone();
        algorithms.insert(ChecksumAlgorithm::Sha1);
        if let Some(unsupported) = algorithms.iter().find(|a| !a.is_implemented()) {
            return Err(AssemblyError::new(
                ErrorKind::UnsupportedAlgorithm,
                format!("checksum algorithm {} is not supported", unsupported.spdx_name()),
            ));
        }

        let overrides: HashMap<String, &DefaultFileInfo> = options
            .path_overrides
            .iter()
            .map(|(path, info)| (override_key(path), info))
            .collect();

        let mut seen: HashSet<PathBuf> = HashSet::new();
        let mut files = Vec::new();
        let mut snippets = Vec::new();
        let mut license_info_from_files: Vec<LicenseExpression> = Vec::new();
        let mut verification_sha1s = Vec::new();

        for file_set in file_sets {
            let includes = compile_patterns(&file_set.includes, true)?;
            let excludes = compile_patterns(&file_set.excludes, false)?;

            let walker = WalkDir::new(&file_set.directory)
                .follow_links(false)
                .sort_by_file_name();
            for entry in walker {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        session.warn(format!("Unable to walk {}: {}", file_set.directory.display(), e));
                        continue;
                    }
                };
                if !entry.file_type().is_file() {
                    continue;
                }

                let path = entry.path();
                let within_set = relative_string(path, &file_set.directory);
                if !includes.is_match(&within_set) || excludes.is_match(&within_set) {
                    continue;
                }

                let identity = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
                if !seen.insert(identity) {
                    tracing::debug!("{} already collected", path.display());
                    continue;
                }

                let record_path = match &file_set.output_directory {
                    Some(output) => normalize_relative_path(&format!(
                        "{}/{}",
                        output.trim_end_matches('/'),
                        within_set
                    )),
                    None => match path.strip_prefix(&options.base_dir) {
                        Ok(relative) => normalize_relative_path(&relative.to_string_lossy()),
                        Err(_) => normalize_relative_path(&within_set),
                    },
                };

                let info = effective_info(&record_path, &overrides, &options.default_info);
                let record = match Self::build_record(session, path, record_path, info, &algorithms)
                {
                    Ok(record) => record,
                    Err(e) => {
                        tracing::error!("Skipping {}: {}", path.display(), e);
                        session.warn(format!("Skipping file {}: {}", path.display(), e));
                        continue;
                    }
                };

                for member in flatten_declared(&record.declared_license) {
                    if !license_info_from_files.contains(&member) {
                        license_info_from_files.push(member);
                    }
                }
                if !is_excluded(&record.path, &options.excluded_names) {
                    if let Some(sha1) = record.sha1() {
                        verification_sha1s.push(sha1.to_string());
                    }
                }

                let adapter = session.adapter_mut();
                let file_id = adapter.materialize_file(&record);
                adapter.materialize_relationship(Relationship::new(
                    file_id.clone().into(),
                    RelationshipType::Generates,
                    package.clone().into(),
                ));
                adapter.materialize_relationship(Relationship::new(
                    package.clone().into(),
                    RelationshipType::Contains,
                    file_id.clone().into(),
                ));
                snippets.extend(Self::materialize_snippets(
                    session,
                    &file_id,
                    &record.path,
                    &info.snippets,
                ));
                files.push((file_id, record));
            }
        }

        let adapter = session.adapter_mut();
        for license in &license_info_from_files {
            adapter.materialize_license_assertion(package, LicenseAssertionKind::InfoFromFiles, license);
        }

        let verification_code =
            ChecksumEngine::verification_code(&verification_sha1s, &options.excluded_names);
        adapter.set_verification_code(package, &verification_code);

        tracing::debug!(files = files.len(), "file collection finished");
        Ok(CollectedFiles {
            files,
            snippets,
            license_info_from_files,
            verification_code,
        })
    }

    fn build_record(
        session: &mut AssemblySession,
        path: &Path,
        record_path: String,
        info: &DefaultFileInfo,
        algorithms: &BTreeSet<ChecksumAlgorithm>,
    ) -> AssemblyResult<FileRecord> {
        let checksums = ChecksumEngine::digest(path, algorithms)?;
        let kind = FileKind::from_file_name(&record_path);

        let mut declared = Self::default_license(session, &info.declared_license, &record_path);
        let mut concluded = Self::default_license(session, &info.concluded_license, &record_path);
        let mut license_comment = info.license_comment.clone();

        if kind == FileKind::Source {
            if let Some(found) = Self::embedded_licenses(session, path)? {
                let note = format!("This file contains SPDX-License-Identifiers for {}", found);
                license_comment = if license_comment.is_empty() {
                    note
                } else {
                    format!("{};  {}", license_comment, note)
                };
                declared = found.clone();
                concluded = found;
            }
        }

        Ok(FileRecord {
            path: record_path,
            checksums,
            kind,
            concluded_license: concluded,
            declared_license: declared,
            copyright: info.copyright.clone(),
            notice: info.notice.clone(),
            comment: info.comment.clone(),
            license_comment,
            contributors: info.contributors.clone(),
        })
    }

    /// Snippets that fail to resolve are skipped with a warning.
    fn materialize_snippets(
        session: &mut AssemblySession,
        file_id: &ElementId,
        record_path: &str,
        infos: &[SnippetInfo],
    ) -> Vec<(ElementId, SnippetRecord)> {
        let mut created = Vec::with_capacity(infos.len());
        for info in infos {
            let record = match Self::snippet_record(session, info, record_path) {
                Ok(record) => record,
                Err(e) => {
                    session.warn(format!(
                        "Skipping snippet '{}' of {}: {}",
                        info.name, record_path, e
                    ));
                    continue;
                }
            };
            let id = session.adapter_mut().materialize_snippet(file_id, &record);
            created.push((id, record));
        }
        created
    }

    fn snippet_record(
        session: &mut AssemblySession,
        info: &SnippetInfo,
        record_path: &str,
    ) -> AssemblyResult<SnippetRecord> {
        let byte_range: SnippetRange = info.byte_range.parse()?;
        let line_range = info
            .line_range
            .as_deref()
            .map(|range| range.parse::<SnippetRange>())
            .transpose()?;
        Ok(SnippetRecord {
            name: info.name.clone(),
            comment: info.comment.clone(),
            byte_range,
            line_range,
            concluded_license: Self::default_license(session, &info.concluded_license, record_path),
            license_info: Self::default_license(session, &info.license_info, record_path),
            license_comment: info.license_comment.clone(),
            copyright: info.copyright.clone(),
        })
    }

    fn default_license(
        session: &mut AssemblySession,
        text: &str,
        record_path: &str,
    ) -> LicenseExpression {
        if text.trim().is_empty() {
            return LicenseExpression::NoAssertion;
        }
        match session.resolver().parse_expression(text) {
            Ok(expression) => expression,
            Err(e) => {
                session.warn(format!(
                    "Invalid default license for {}, using NOASSERTION: {}",
                    record_path, e
                ));
                LicenseExpression::NoAssertion
            }
        }
    }

    /// Embedded identifiers of a source file under the size guard.
    fn embedded_licenses(
        session: &mut AssemblySession,
        path: &Path,
    ) -> AssemblyResult<Option<LicenseExpression>> {
        let size = fs::metadata(path)
            .map_err(|e| {
                AssemblyError::with_cause(
                    ErrorKind::ReadError,
                    format!("cannot stat {}", path.display()),
                    e,
                )
            })?
            .len();
        if !EmbeddedLicenseScanner::should_scan(size) {
            return Ok(None);
        }
        let bytes = fs::read(path).map_err(|e| {
            AssemblyError::with_cause(
                ErrorKind::ReadError,
                format!("cannot read {}", path.display()),
                e,
            )
        })?;
        let contents = String::from_utf8_lossy(&bytes);
        let (found, errors) = session.resolver().scan_embedded_identifiers(&contents);
        for error in errors {
            session.warn(format!(
                "Ignoring license identifier in {}: {}",
                path.display(),
                error
            ));
        }
        Ok(match found.len() {
            0 => None,
            _ => Some(LicenseExpression::conjunction(found)),
        })
    }
}

/// Compiles Ant-style patterns: `**` crosses directories, `*` does not and
/// a trailing `/` means everything below. An empty include list matches all.
fn compile_patterns(patterns: &[String], is_include: bool) -> AssemblyResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    if patterns.is_empty() && is_include {
        builder.add(ant_glob("**")?);
    }
    for pattern in patterns {
        let mut pattern = pattern.trim().replace('\\', "/");
        if pattern.ends_with('/') {
            pattern.push_str("**");
        }
        builder.add(ant_glob(pattern.trim_start_matches("./"))?);
    }
    builder.build().map_err(|e| {
        AssemblyError::with_cause(ErrorKind::InvalidConfiguration, "invalid file set pattern", e)
    })
}

fn ant_glob(pattern: &str) -> AssemblyResult<globset::Glob> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| {
            AssemblyError::with_cause(
                ErrorKind::InvalidConfiguration,
                format!("invalid file set pattern {:?}", pattern),
                e,
            )
        })
}

fn relative_string(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn override_key(path: &str) -> String {
    path.trim()
        .replace('\\', "/")
        .trim_start_matches("./")
        .trim_matches('/')
        .to_string()
}

/// Nearest override wins: the file itself, then each ancestor directory.
fn effective_info<'a>(
    record_path: &str,
    overrides: &HashMap<String, &'a DefaultFileInfo>,
    default_info: &'a DefaultFileInfo,
) -> &'a DefaultFileInfo {
    let mut candidate = override_key(record_path);
    loop {
        if let Some(info) = overrides.get(&candidate) {
            return info;
        }
        match candidate.rfind('/') {
            Some(index) => candidate.truncate(index),
            None => return default_info,
        }
    }
}

fn flatten_declared(license: &LicenseExpression) -> Vec<LicenseExpression> {
    let members = match license {
        LicenseExpression::And(members) => members.clone(),
        other => vec![other.clone()],
    };
    members
        .into_iter()
        .filter(|m| !matches!(m, LicenseExpression::NoAssertion | LicenseExpression::None))
        .collect()
}

fn is_excluded(record_path: &str, excluded_names: &[String]) -> bool {
    let file_name = record_path.rsplit('/').next().unwrap_or(record_path);
    excluded_names.iter().any(|name| {
        let name = name.trim_start_matches("./");
        name == file_name || name == record_path.trim_start_matches("./")
    })
}
