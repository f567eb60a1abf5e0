/// Network adapters for external API calls
mod license_list_client;

pub use license_list_client::{BundledLicenseList, SpdxLicenseListClient, SPDX_LICENSE_LIST_URL};
