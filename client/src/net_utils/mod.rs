//! HTTP plumbing shared by every API call.

pub mod request_lifecycle;
pub mod request_sequence;
