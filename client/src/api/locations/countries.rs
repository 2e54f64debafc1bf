//! Country catalog (`restcountries.com` shape).

use alumni_common::{
    search_result::lenient_list_from_value,
    select_option::{SelectOption, sort_options},
};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::api::DirectoryClient;
use crate::net_utils::request_lifecycle::RequestOutcome;

#[derive(Debug, Deserialize)]
struct RawCountry {
    #[serde(default)]
    cca2: Option<String>,
    #[serde(default)]
    name: Option<RawCountryName>,
}

#[derive(Debug, Deserialize)]
struct RawCountryName {
    #[serde(default)]
    common: Option<String>,
}

impl DirectoryClient {
    pub async fn fetch_countries(&self, cancel: &CancellationToken) -> RequestOutcome<Vec<SelectOption>> {
        let request = self.lifecycle().http_client().get(&self.config().countries_url);
        self.lifecycle().execute_json::<serde_json::Value>(request, cancel).await.map(country_options)
    }
}

/// Keeps entries with a display name; the value is the two-letter code, or the name when
/// the code is missing. Sorted by name.
pub fn country_options(payload: serde_json::Value) -> Vec<SelectOption> {
    let mut options = lenient_list_from_value::<RawCountry>(payload)
        .into_iter()
        .filter_map(|country| {
            let label = country.name?.common?.trim().to_string();
            if label.is_empty() {
                return None;
            }
            let value = country.cca2.map(|code| code.trim().to_string()).filter(|code| !code.is_empty()).unwrap_or_else(|| label.clone());
            Some(SelectOption::new(value, label))
        })
        .collect::<Vec<_>>();
    sort_options(&mut options);
    options
}
