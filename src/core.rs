//! Error taxonomy, the resource contract and the date wire format.

pub use paperswift_core::*;
