//! Query cache with in-flight de-duplication and dependency invalidation.

pub use paperswift_query::*;
