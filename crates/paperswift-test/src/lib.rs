//! Test support for the PaperSwift crates
//!
//! - [`MockBackend`]: an in-process HTTP stand-in for the records service
//! - [`fixtures`]: rstest fixtures and sample records

pub mod fixtures;
pub mod mock_backend;

pub use hyper::Method;
pub use mock_backend::{
	ErrorMode, MockBackend, RecordedRequest, TEST_PASSWORD, TEST_TOKEN, TEST_USERNAME,
};
