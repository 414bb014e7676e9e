//! Field schemas and the entity form controller.

pub use paperswift_forms::*;
