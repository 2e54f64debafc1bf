//! Common library exports shared between the search client and its front ends.

extern crate serde;


pub mod search_const;
pub mod select_option;
pub mod option_catalog;
pub mod alumni_record;
pub mod search_query;
pub mod search_result;
pub mod pagination;
pub mod update_request;
