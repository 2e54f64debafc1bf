//! `GET api/search` and `GET api/missing_alumni`.

use alumni_common::{
    search_query::{SearchQuery, SearchScope},
    search_result::SearchResponse,
};
use tokio_util::sync::CancellationToken;

use crate::api::DirectoryClient;
use crate::net_utils::request_lifecycle::RequestOutcome;

pub fn search_endpoint_path(scope: SearchScope) -> &'static str {
    match scope {
        SearchScope::Directory => "api/search",
        SearchScope::Missing => "api/missing_alumni",
    }
}

impl DirectoryClient {
    /// One page of records. Never retries; staleness is the caller's concern.
    pub async fn search_page(&self, scope: SearchScope, query: &SearchQuery, cancel: &CancellationToken) -> RequestOutcome<SearchResponse> {
        let url = self.config().endpoint(search_endpoint_path(scope));
        tracing::debug!(?scope, query = %query.to_query_string(), "searching {}", url);
        let request = self.lifecycle().http_client().get(url).query(&query.params);
        let outcome = self.lifecycle().execute_json::<SearchResponse>(request, cancel).await;
        if let RequestOutcome::Success(response) = &outcome {
            tracing::debug!(rows = response.data.len(), total_count = ?response.total_count, "search page received");
        }
        outcome
    }
}
