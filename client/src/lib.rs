//! Async search client for the alumni directory: request lifecycle, cascading location
//! options, and the search controller state machine.

pub mod api;
pub mod config;
pub mod directory;
pub mod error;
pub mod net_utils;

pub use api::DirectoryClient;
pub use config::ClientConfig;
pub use directory::AlumniDirectory;
pub use error::DirectoryError;
