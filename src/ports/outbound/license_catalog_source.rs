use crate::shared::Result;

/// LicenseCatalogSource port for obtaining the license-list document.
///
/// The document is a JSON object with a `licenses` array of
/// `{licenseId, seeAlso[]}` entries (the published SPDX license list format).
pub trait LicenseCatalogSource: Send + Sync {
    /// Short description used in log messages ("spdx.org", "bundled copy").
    fn describe(&self) -> &str;

    /// Returns the raw JSON text of the license list.
    ///
    /// # Errors
    /// Returns an error if the document cannot be retrieved
    fn fetch_license_list(&self) -> Result<String>;
}
