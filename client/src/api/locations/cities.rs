//! Cities of one country (`countriesnow.space` shape).

use alumni_common::{
    search_result::lenient_list_from_value,
    select_option::{SelectOption, sort_options},
};
use tokio_util::sync::CancellationToken;

use crate::api::DirectoryClient;
use crate::net_utils::request_lifecycle::RequestOutcome;

impl DirectoryClient {
    /// Posts the country's display name, not its code.
    pub async fn fetch_cities(&self, country_label: &str, cancel: &CancellationToken) -> RequestOutcome<Vec<SelectOption>> {
        let request = self
            .lifecycle()
            .http_client()
            .post(&self.config().cities_url)
            .json(&serde_json::json!({ "country": country_label }));
        self.lifecycle().execute_json::<serde_json::Value>(request, cancel).await.map(city_options)
    }
}

/// `{error, msg, data}`; a missing or malformed `data` is an empty list.
pub fn city_options(payload: serde_json::Value) -> Vec<SelectOption> {
    if payload.get("error").and_then(|error| error.as_bool()) == Some(true) {
        tracing::debug!(msg = ?payload.get("msg"), "city catalog reported an error");
    }
    let data = payload.get("data").cloned().unwrap_or_default();
    let mut options = lenient_list_from_value::<String>(data)
        .into_iter()
        .filter(|city| !city.trim().is_empty())
        .map(SelectOption::same)
        .collect::<Vec<_>>();
    sort_options(&mut options);
    options
}
