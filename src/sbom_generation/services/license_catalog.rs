use crate::ports::outbound::LicenseCatalogSource;
use crate::shared::Result;
use anyhow::Context;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

/// Curated URL corrections applied on top of the published list.
const MANUAL_URL_OVERRIDES: &[(&str, &str)] = &[
    ("http://www.apache.org/licenses/LICENSE-2.0.txt", "Apache-2.0"),
    ("http://www.opensource.org/licenses/cpl1.0.txt", "CPL-1.0"),
    ("http://www.opensource.org/licenses/mit-license.php", "MIT"),
    ("http://www.mozilla.org/MPL/MPL-1.0.txt", "MPL-1.0"),
];

const LICENSE_PAGE_PREFIX: &str = "https://spdx.org/licenses/";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LicenseListDocument {
    #[serde(default)]
    license_list_version: Option<String>,
    licenses: Vec<LicenseListEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LicenseListEntry {
    license_id: String,
    #[serde(default)]
    see_also: Vec<String>,
}

/// Immutable catalog contents, built once.
#[derive(Debug, Default)]
struct CatalogData {
    url_to_id: HashMap<String, String>,
    ambiguous_urls: HashSet<String>,
    ids_by_lowercase: HashMap<String, String>,
    license_list_version: Option<String>,
}

impl CatalogData {
    fn from_json(json: &str) -> Result<Self> {
        let document: LicenseListDocument =
            serde_json::from_str(json).context("Failed to parse license list document")?;

        let mut data = CatalogData {
            license_list_version: document.license_list_version,
            ..Default::default()
        };

        for entry in &document.licenses {
            data.ids_by_lowercase
                .insert(entry.license_id.to_ascii_lowercase(), entry.license_id.clone());
            let page = format!("{}{}", LICENSE_PAGE_PREFIX, entry.license_id);
            let page_html = format!("{}.html", page);
            let urls = std::iter::once(page.as_str())
                .chain(std::iter::once(page_html.as_str()))
                .chain(entry.see_also.iter().map(String::as_str));
            for url in urls {
                let key = normalize_url(url);
                if key.is_empty() {
                    continue;
                }
                match data.url_to_id.get(&key) {
                    Some(existing) if existing != &entry.license_id => {
                        data.ambiguous_urls.insert(key);
                    }
                    Some(_) => {}
                    None => {
                        data.url_to_id.insert(key, entry.license_id.clone());
                    }
                }
            }
        }

        for url in &data.ambiguous_urls {
            data.url_to_id.remove(url);
        }

        for (url, id) in MANUAL_URL_OVERRIDES {
            let key = normalize_url(url);
            data.ambiguous_urls.remove(&key);
            data.url_to_id.insert(key, (*id).to_string());
        }

        Ok(data)
    }
}

/// Normalizes a license URL for map keys: trims whitespace and trailing
/// slashes and treats `https` and `http` alike.
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    match trimmed.strip_prefix("https://") {
        Some(rest) => format!("http://{}", rest),
        None => trimmed.to_string(),
    }
}

/// LicenseCatalog - lazily loaded map from license URL to canonical ID
///
/// Constructed once per process and shared (typically behind an `Arc`)
/// by every assembly run. The first lookup loads the catalog: the primary
/// source is tried first, then the fallback source. Loading happens at
/// most once even when several threads race on first use; afterwards
/// reads take no lock.
pub struct LicenseCatalog {
    primary: Option<Box<dyn LicenseCatalogSource>>,
    fallback: Box<dyn LicenseCatalogSource>,
    data: OnceCell<CatalogData>,
}

impl LicenseCatalog {
    /// Creates a catalog that tries `primary` (if any) before `fallback`.
    pub fn new(
        primary: Option<Box<dyn LicenseCatalogSource>>,
        fallback: Box<dyn LicenseCatalogSource>,
    ) -> Self {
        Self {
            primary,
            fallback,
            data: OnceCell::new(),
        }
    }

    /// Canonical license ID for a reference URL.
    ///
    /// Returns `None` for unknown URLs and for URLs claimed by more than one
    /// license.
    pub fn resolve(&self, url: &str) -> Option<String> {
        self.data().url_to_id.get(&normalize_url(url)).cloned()
    }

    /// True if the URL was listed under several licenses and was removed.
    pub fn is_ambiguous(&self, url: &str) -> bool {
        self.data().ambiguous_urls.contains(&normalize_url(url))
    }

    /// Case-insensitive lookup of a listed license ID.
    pub fn canonical_id(&self, id: &str) -> Option<String> {
        self.data()
            .ids_by_lowercase
            .get(&id.to_ascii_lowercase())
            .cloned()
    }

    pub fn license_list_version(&self) -> Option<String> {
        self.data().license_list_version.clone()
    }

    /// Copy of the URL map, used to seed a per-run session map.
    pub fn url_map_snapshot(&self) -> HashMap<String, String> {
        self.data().url_to_id.clone()
    }

    fn data(&self) -> &CatalogData {
        self.data.get_or_init(|| self.load())
    }

    fn load(&self) -> CatalogData {
        if let Some(primary) = &self.primary {
            match primary
                .fetch_license_list()
                .and_then(|json| CatalogData::from_json(&json))
            {
                Ok(data) => {
                    tracing::debug!(source = primary.describe(), "loaded license list");
                    return data;
                }
                Err(e) => tracing::warn!(
                    "Unable to load license list from {}, using {}: {:#}",
                    primary.describe(),
                    self.fallback.describe(),
                    e
                ),
            }
        }

        match self
            .fallback
            .fetch_license_list()
            .and_then(|json| CatalogData::from_json(&json))
        {
            Ok(data) => {
                tracing::debug!(source = self.fallback.describe(), "loaded license list");
                data
            }
            Err(e) => {
                tracing::error!(
                    "Unable to load license list from {}; only manual URL mappings are available: {:#}",
                    self.fallback.describe(),
                    e
                );
                let mut data = CatalogData::default();
                for (url, id) in MANUAL_URL_OVERRIDES {
                    data.url_to_id.insert(normalize_url(url), (*id).to_string());
                }
                data
            }
        }
    }
}
