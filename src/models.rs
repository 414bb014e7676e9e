//! The managed academic entities.

pub use paperswift_models::*;
