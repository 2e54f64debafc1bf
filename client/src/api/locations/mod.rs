//! Country and city option lists from the third-party geo APIs.

mod cities;
mod countries;
pub use cities::city_options;
pub use countries::country_options;

pub mod location_resolver;
pub use location_resolver::{LocationResolver, OptionsState};
