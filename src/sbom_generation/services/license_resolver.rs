use super::embedded_license_scanner::EmbeddedLicenseScanner;
use super::license_catalog::{normalize_url, LicenseCatalog};
use crate::sbom_generation::domain::{
    license::{is_custom_id, LICENSE_REF_PREFIX},
    CustomLicense, DeclaredLicense, LicenseExpression,
};
use crate::shared::{AssemblyError, AssemblyResult, ErrorKind};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Extracted text of custom licenses registered only because they were referenced.
pub const PLACEHOLDER_TEXT: &str = "NOASSERTION";

/// LicenseResolver - per-document license resolution
///
/// Holds a session copy of the catalog's URL map so that cross-reference
/// URLs of custom licenses can be added without touching the shared catalog.
pub struct LicenseResolver {
    catalog: Arc<LicenseCatalog>,
    url_map: HashMap<String, String>,
    custom_licenses: BTreeMap<String, CustomLicense>,
    match_cross_references: bool,
    warnings: Vec<String>,
}

impl LicenseResolver {
    pub fn new(catalog: Arc<LicenseCatalog>, match_cross_references: bool) -> Self {
        let url_map = catalog.url_map_snapshot();
        Self {
            catalog,
            url_map,
            custom_licenses: BTreeMap::new(),
            match_cross_references,
            warnings: Vec::new(),
        }
    }

    pub fn license_list_version(&self) -> Option<String> {
        self.catalog.license_list_version()
    }

    /// Resolves declared licenses, failing on the first one that cannot be
    /// mapped to a listed or registered custom license.
    ///
    /// # Errors
    /// - `UnmappedLicense` if a license has no URL or an unknown URL
    /// - `AmbiguousLicenseUrl` if the URL belongs to several licenses
    pub fn resolve_declared_strict(
        &self,
        licenses: &[DeclaredLicense],
    ) -> AssemblyResult<LicenseExpression> {
        let resolved = licenses
            .iter()
            .map(|license| self.resolve_one(license))
            .collect::<AssemblyResult<Vec<_>>>()?;
        Ok(LicenseExpression::conjunction(resolved))
    }

    /// Resolves declared licenses, dropping those that cannot be mapped.
    ///
    /// Returns NoAssertion when nothing resolves, together with the reasons
    /// each dropped license was skipped.
    pub fn resolve_declared(
        &self,
        licenses: &[DeclaredLicense],
    ) -> (LicenseExpression, Vec<AssemblyError>) {
        let mut resolved = Vec::new();
        let mut skipped = Vec::new();
        for license in licenses {
            match self.resolve_one(license) {
                Ok(expression) => resolved.push(expression),
                Err(e) => skipped.push(e),
            }
        }
        (LicenseExpression::conjunction(resolved), skipped)
    }

    fn resolve_one(&self, license: &DeclaredLicense) -> AssemblyResult<LicenseExpression> {
        let label = license.name.as_deref().unwrap_or("<unnamed>");
        let url = license.url.as_deref().map(str::trim).unwrap_or("");
        if url.is_empty() {
            return Err(AssemblyError::new(
                ErrorKind::UnmappedLicense,
                format!("license '{}' has no URL", label),
            ));
        }
        if let Some(id) = self.url_map.get(&normalize_url(url)) {
            return Ok(Self::expression_for_id(id));
        }
        if self.catalog.is_ambiguous(url) {
            return Err(AssemblyError::new(
                ErrorKind::AmbiguousLicenseUrl,
                format!(
                    "URL {} of license '{}' matches more than one listed license",
                    url, label
                ),
            ));
        }
        Err(AssemblyError::new(
            ErrorKind::UnmappedLicense,
            format!("no listed or custom license found for '{}' ({})", label, url),
        ))
    }

    fn expression_for_id(id: &str) -> LicenseExpression {
        if is_custom_id(id) {
            LicenseExpression::Custom(id.to_string())
        } else {
            LicenseExpression::Listed(id.to_string())
        }
    }

    /// Registers a user-supplied license and, when enabled, maps its
    /// cross-reference URLs to it for the rest of this run.
    ///
    /// # Errors
    /// Returns `InvalidLicenseExpression` if the ID does not start with
    /// `LicenseRef-`
    pub fn register_custom(&mut self, license: CustomLicense) -> AssemblyResult<()> {
        if !license.id.starts_with(LICENSE_REF_PREFIX) || !is_custom_id(&license.id) {
            return Err(AssemblyError::new(
                ErrorKind::InvalidLicenseExpression,
                format!(
                    "invalid custom license ID '{}': it must start with {} and contain only letters, digits, '.' and '-'",
                    license.id, LICENSE_REF_PREFIX
                ),
            ));
        }

        if self.match_cross_references {
            for url in &license.cross_refs {
                let key = normalize_url(url);
                if let Some(existing) = self.url_map.get(&key) {
                    if existing != &license.id {
                        let message = format!(
                            "Duplicate URL {} for license {}. Replacing {}",
                            url, license.id, existing
                        );
                        tracing::warn!("{}", message);
                        self.warnings.push(message);
                    }
                }
                self.url_map.insert(key, license.id.clone());
            }
        }

        if self.custom_licenses.contains_key(&license.id) {
            let message = format!("Custom license {} registered twice; keeping the last one", license.id);
            tracing::warn!("{}", message);
            self.warnings.push(message);
        }
        self.custom_licenses.insert(license.id.clone(), license);
        Ok(())
    }

    pub fn custom_license(&self, id: &str) -> Option<&CustomLicense> {
        self.custom_licenses.get(id)
    }

    pub fn custom_licenses(&self) -> impl Iterator<Item = &CustomLicense> {
        self.custom_licenses.values()
    }

    /// Parses an expression and rewrites listed IDs to their canonical case.
    pub fn parse_expression(&self, text: &str) -> AssemblyResult<LicenseExpression> {
        Ok(self.canonicalize(LicenseExpression::parse(text)?))
    }

    pub fn canonicalize(&self, expression: LicenseExpression) -> LicenseExpression {
        expression.canonicalize(&|id: &str| self.catalog.canonical_id(id))
    }

    /// Scans file contents for embedded identifiers; malformed matches are
    /// returned separately.
    pub fn scan_embedded_identifiers(
        &self,
        contents: &str,
    ) -> (Vec<LicenseExpression>, Vec<AssemblyError>) {
        let (found, errors) = EmbeddedLicenseScanner::scan_lenient(contents);
        (
            found.into_iter().map(|e| self.canonicalize(e)).collect(),
            errors,
        )
    }

    /// Registers a placeholder for every referenced local custom ID that has
    /// not been registered, returning the placeholders created.
    pub fn register_placeholders<'a>(
        &mut self,
        referenced_ids: impl IntoIterator<Item = &'a str>,
    ) -> Vec<CustomLicense> {
        let mut created = Vec::new();
        for id in referenced_ids {
            // DocumentRef-x:LicenseRef-y lives in the other document.
            if id.contains(':') || self.custom_licenses.contains_key(id) {
                continue;
            }
            let message = format!(
                "License {} is referenced but was never supplied; registering it without text",
                id
            );
            tracing::warn!("{}", message);
            self.warnings.push(message);
            let placeholder = CustomLicense::new(id, PLACEHOLDER_TEXT)
                .with_comment("No license text was supplied for this license");
            self.custom_licenses.insert(id.to_string(), placeholder.clone());
            created.push(placeholder);
        }
        created
    }

    /// Warnings raised since the last call.
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }
}
