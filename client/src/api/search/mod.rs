//! Records search endpoints and the controller that drives them.

mod search_alumni;
pub use search_alumni::search_endpoint_path;

pub mod search_controller;
pub use search_controller::{CompletedSearch, PendingSearch, SearchController, SearchState};
