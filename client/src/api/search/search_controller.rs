//! Search state machine for one search scope.
//!
//! A search is split in three steps so overlapping searches can be driven explicitly:
//! [`SearchController::start_search`] builds the query and numbers the attempt,
//! [`PendingSearch::run`] performs the request, and [`SearchController::finish_search`]
//! commits the outcome only if no newer search was started and the filters it was built
//! from still match. [`SearchController::search`] chains the three for the common case.

use alumni_common::{
    alumni_record::AlumniRecord,
    pagination::{PageLink, pagination_window},
    search_query::{FilterField, FilterState, FilterValue, SearchQuery, SearchScope, build_scoped_search_query},
    search_result::{SearchResponse, SearchResultPage, sort_by_year_of_entry},
};
use tokio_util::sync::CancellationToken;

use crate::api::DirectoryClient;
use crate::error::DirectoryError;
use crate::net_utils::{request_lifecycle::RequestOutcome, request_sequence::RequestSequence};

pub const NO_FILTER_MESSAGE: &str = "Please select at least one filter before searching.";
pub const TIMEOUT_MESSAGE: &str = "Request timed out. The server may be starting up, please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    /// Nothing searched yet, or cleared.
    Idle,
    Loading { page: u64 },
    Populated(SearchResultPage),
    EmptyResults { page: u64 },
    Failed { message: String, error: DirectoryError },
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading { .. })
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SearchState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// A numbered search that has been started but not yet sent.
#[derive(Debug)]
pub struct PendingSearch {
    seq: u64,
    scope: SearchScope,
    page: u64,
    query: SearchQuery,
    filters: FilterState,
    cancel: CancellationToken,
    client: DirectoryClient,
}

impl PendingSearch {
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub async fn run(self) -> CompletedSearch {
        let outcome = self.client.search_page(self.scope, &self.query, &self.cancel).await;
        CompletedSearch { seq: self.seq, page: self.page, filters: self.filters, outcome }
    }
}

#[derive(Debug)]
pub struct CompletedSearch {
    seq: u64,
    page: u64,
    filters: FilterState,
    outcome: RequestOutcome<SearchResponse>,
}

pub struct SearchController {
    client: DirectoryClient,
    scope: SearchScope,
    filters: FilterState,
    state: SearchState,
    current_page: u64,
    total_count: u64,
    has_more: bool,
    sequence: RequestSequence,
}

impl SearchController {
    pub fn new(client: DirectoryClient, scope: SearchScope) -> Self {
        Self {
            client,
            scope,
            filters: FilterState::new(),
            state: SearchState::Idle,
            current_page: 1,
            total_count: 0,
            has_more: false,
            sequence: RequestSequence::new(),
        }
    }

    pub fn scope(&self) -> SearchScope {
        self.scope
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn page_size(&self) -> u64 {
        self.client.config().page_size
    }

    pub fn rows(&self) -> &[AlumniRecord] {
        match &self.state {
            SearchState::Populated(page) => &page.rows,
            _ => &[],
        }
    }

    pub fn pagination_window(&self) -> Vec<PageLink> {
        pagination_window(self.current_page, self.page_size(), self.total_count)
    }

    pub fn set_filter(&mut self, field: FilterField, value: impl Into<FilterValue>) -> Result<(), DirectoryError> {
        if !self.scope.accepts(field) {
            return Err(DirectoryError::Validation(format!("{} cannot be used to filter this search", field.query_key())));
        }
        self.filters.set(field, value);
        Ok(())
    }

    pub fn clear_filter(&mut self, field: FilterField) {
        self.filters.clear_field(field);
    }

    /// Numbers a new search for `page` and supersedes any search still in flight.
    /// Returns `None` when the search was rejected before reaching the network.
    pub fn start_search(&mut self, page: u64) -> Option<PendingSearch> {
        let page = page.max(1);
        if self.scope.requires_filter() && !self.filters.has_active_filter(self.scope) {
            tracing::info!(scope = ?self.scope, "search rejected: no filter selected");
            self.sequence.invalidate();
            self.reset_results();
            self.current_page = 1;
            self.state = SearchState::Failed {
                message: NO_FILTER_MESSAGE.to_string(),
                error: DirectoryError::Validation(NO_FILTER_MESSAGE.to_string()),
            };
            return None;
        }

        let (seq, cancel) = self.sequence.issue();
        let query = build_scoped_search_query(self.scope, &self.filters, page, self.page_size());
        tracing::debug!(seq, page, scope = ?self.scope, "search started");
        self.state = SearchState::Loading { page };
        Some(PendingSearch {
            seq,
            scope: self.scope,
            page,
            query,
            filters: self.filters.clone(),
            cancel,
            client: self.client.clone(),
        })
    }

    /// Applies a finished search. Returns false if it was discarded as stale.
    pub fn finish_search(&mut self, completed: CompletedSearch) -> bool {
        if !self.sequence.settle(completed.seq) {
            tracing::debug!(seq = completed.seq, latest = self.sequence.latest(), "discarding stale search response");
            return false;
        }
        if completed.filters != self.filters {
            tracing::debug!(seq = completed.seq, "filters changed while loading, discarding response");
            self.reset_results();
            self.state = SearchState::Idle;
            return false;
        }

        match completed.outcome.into_result() {
            Ok(response) => {
                let mut page = SearchResultPage::from_response(response, completed.page);
                if self.scope == SearchScope::Directory {
                    // page-local order only, the server paginates before this runs
                    sort_by_year_of_entry(&mut page.rows);
                }
                self.current_page = page.page;
                self.total_count = page.total_count;
                self.has_more = page.has_more;
                tracing::info!(page = page.page, rows = page.rows.len(), total_count = page.total_count, "search committed");
                self.state = if page.is_empty() { SearchState::EmptyResults { page: page.page } } else { SearchState::Populated(page) };
            }
            Err(error) => {
                let message = failure_message(self.scope, &error);
                tracing::warn!(page = completed.page, "search failed: {}", error);
                self.reset_results();
                self.state = SearchState::Failed { message, error };
            }
        }
        true
    }

    pub async fn search(&mut self, page: u64) -> &SearchState {
        if let Some(pending) = self.start_search(page) {
            let completed = pending.run().await;
            self.finish_search(completed);
        }
        &self.state
    }

    /// `None` when there is no next page.
    pub fn start_next_page(&mut self) -> Option<PendingSearch> {
        if !self.has_more {
            return None;
        }
        self.start_search(self.current_page + 1)
    }

    /// `None` when already on the first page.
    pub fn start_prev_page(&mut self) -> Option<PendingSearch> {
        if self.current_page <= 1 {
            return None;
        }
        self.start_search(self.current_page - 1)
    }

    pub async fn next_page(&mut self) -> &SearchState {
        if let Some(pending) = self.start_next_page() {
            let completed = pending.run().await;
            self.finish_search(completed);
        }
        &self.state
    }

    pub async fn prev_page(&mut self) -> &SearchState {
        if let Some(pending) = self.start_prev_page() {
            let completed = pending.run().await;
            self.finish_search(completed);
        }
        &self.state
    }

    /// Drops every filter and result and abandons any search in flight.
    pub fn clear(&mut self) {
        self.sequence.invalidate();
        self.filters.clear();
        self.reset_results();
        self.current_page = 1;
        self.state = SearchState::Idle;
    }

    pub(crate) fn filters_mut(&mut self) -> &mut FilterState {
        &mut self.filters
    }

    fn reset_results(&mut self) {
        self.total_count = 0;
        self.has_more = false;
    }
}

/// Stable text shown to the user for a failed search.
pub fn failure_message(scope: SearchScope, error: &DirectoryError) -> String {
    let api = match scope {
        SearchScope::Directory => "Search API",
        SearchScope::Missing => "Missing alumni API",
    };
    match error {
        DirectoryError::Timeout => TIMEOUT_MESSAGE.to_string(),
        DirectoryError::InvalidContentType(_) => {
            format!("{api} returned non-JSON response. Check ALUMNI_DATABASE_URL and ensure it points to the backend.")
        }
        DirectoryError::Malformed(_) => format!("{api} returned a response in an unexpected format."),
        DirectoryError::Validation(message) => message.clone(),
        DirectoryError::Http(_) | DirectoryError::Transport(_) | DirectoryError::Cancelled => match scope {
            SearchScope::Directory => "Failed to fetch results".to_string(),
            SearchScope::Missing => "Failed to fetch missing alumni".to_string(),
        },
    }
}
