use spdx_sbom::prelude::*;

/// Mock LicenseCatalogSource serving a license list built in the test
pub struct MockLicenseList {
    json: String,
}

impl MockLicenseList {
    /// `licenses` are `(license id, see-also URLs)` pairs
    pub fn new(licenses: &[(&str, &[&str])]) -> Self {
        let entries: Vec<serde_json::Value> = licenses
            .iter()
            .map(|(id, urls)| {
                serde_json::json!({
                    "licenseId": id,
                    "seeAlso": urls,
                    "isDeprecatedLicenseId": false,
                })
            })
            .collect();
        let json = serde_json::json!({
            "licenseListVersion": "test",
            "licenses": entries,
        });
        Self {
            json: json.to_string(),
        }
    }
}

impl LicenseCatalogSource for MockLicenseList {
    fn describe(&self) -> &str {
        "mock license list"
    }

    fn fetch_license_list(&self) -> Result<String> {
        Ok(self.json.clone())
    }
}
