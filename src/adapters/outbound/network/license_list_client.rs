use crate::ports::outbound::LicenseCatalogSource;
use crate::shared::Result;
use anyhow::Context;
use std::time::Duration;

/// Published location of the SPDX license list.
pub const SPDX_LICENSE_LIST_URL: &str = "https://spdx.org/licenses/licenses.json";

const BUNDLED_LICENSE_LIST: &str = include_str!("../../../../resources/licenses.json");

/// SpdxLicenseListClient adapter for fetching the license list from spdx.org
///
/// Implements the LicenseCatalogSource port with a blocking HTTP client.
/// The catalog calls it at most once per process.
pub struct SpdxLicenseListClient {
    client: reqwest::blocking::Client,
    url: String,
    max_retries: u32,
}

impl SpdxLicenseListClient {
    /// Creates a client for the published license list
    pub fn new() -> Result<Self> {
        Self::with_url(SPDX_LICENSE_LIST_URL)
    }

    /// Creates a client for a mirror of the license list
    pub fn with_url(url: impl Into<String>) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("spdx-sbom/{}", version);
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
            max_retries: 3,
        })
    }

    fn fetch_once(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .with_context(|| format!("Failed to request {}", self.url))?;

        if !response.status().is_success() {
            anyhow::bail!("{} returned status {}", self.url, response.status());
        }

        response
            .text()
            .with_context(|| format!("Failed to read response body from {}", self.url))
    }
}

impl LicenseCatalogSource for SpdxLicenseListClient {
    fn describe(&self) -> &str {
        &self.url
    }

    fn fetch_license_list(&self) -> Result<String> {
        let mut attempt = 1;
        loop {
            match self.fetch_once() {
                Ok(body) => return Ok(body),
                Err(e) if attempt < self.max_retries => {
                    tracing::debug!("License list fetch attempt {} failed: {:#}", attempt, e);
                    std::thread::sleep(Duration::from_millis(100 * attempt as u64));
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// BundledLicenseList adapter serving the license list compiled into the binary
///
/// Used for offline runs and as the fallback when the remote fetch fails.
pub struct BundledLicenseList;

impl BundledLicenseList {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BundledLicenseList {
    fn default() -> Self {
        Self::new()
    }
}

impl LicenseCatalogSource for BundledLicenseList {
    fn describe(&self) -> &str {
        "bundled license list"
    }

    fn fetch_license_list(&self) -> Result<String> {
        Ok(BUNDLED_LICENSE_LIST.to_string())
    }
}
