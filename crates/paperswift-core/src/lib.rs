//! Core types for PaperSwift admin
//!
//! This crate holds the pieces every other crate in the workspace agrees on:
//!
//! - [`Error`]: the error taxonomy for network, API, decode and validation failures
//! - [`Resource`]: the contract an entity type implements to be bound to the
//!   generic client, cache and views
//! - [`date`]: the `YYYY-MM-DD` wire format for calendar dates
//! - [`path`]: percent-encoding of keys inside path segments

pub mod date;
pub mod error;
pub mod path;
pub mod resource;

pub use error::{Error, FieldErrors, Result};
pub use resource::{Card, KeyPolicy, Resource, ResourceKey};
