//! HTTP access to the records service.

pub use paperswift_client::*;
