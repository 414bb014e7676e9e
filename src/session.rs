//! Session token storage.

pub use paperswift_session::*;
