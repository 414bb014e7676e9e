//! rstest fixtures and sample records
//!
//! ## Usage
//!
//! ```rust,no_run
//! use paperswift_test::fixtures::*;
//! use rstest::*;
//!
//! #[rstest]
//! #[tokio::test]
//! async fn test_with_backend(#[future] backend: MockBackend) {
//!     let backend = backend.await;
//!     assert!(backend.base_url().starts_with("http://127.0.0.1:"));
//! }
//! ```

pub use crate::mock_backend::MockBackend;
use rstest::fixture;
use serde_json::{Value, json};

/// Fresh, empty backend
#[fixture]
pub async fn backend() -> MockBackend {
	MockBackend::new().await
}

/// Backend seeded with one record per collection, linked together
#[fixture]
pub async fn seeded_backend() -> MockBackend {
	let backend = MockBackend::new().await;
	backend.seed("degrees", sample_degree());
	backend.seed("scemes", sample_scheme());
	backend.seed("teachers", sample_teacher());
	backend.seed("departments", sample_department());
	backend.seed("courses", sample_course());
	backend.seed("exams", sample_exam());
	backend
}

pub fn sample_degree() -> Value {
	json!({"code": "BTECH", "name": "Bachelor of Technology"})
}

pub fn sample_scheme() -> Value {
	json!({
		"sid": 2019,
		"degree": "BTECH",
		"year": 2019,
		"guidelines_doc_url": "https://docs.example.edu/schemes/2019.pdf"
	})
}

pub fn sample_teacher() -> Value {
	json!({
		"id": 1,
		"name": "Grace Hopper",
		"is_external": false,
		"gender": "F",
		"dob": "1976-12-09",
		"mobile_no": "9876543210",
		"address": "12 Harbour Road",
		"designation": "Professor",
		"qualification": "PhD",
		"bank_account_no": "000123456789",
		"bank_ifsc": "SBIN0000123",
		"bank_name": "State Bank",
		"pan_no": "ABCDE1234F",
		"user": 7
	})
}

pub fn sample_department() -> Value {
	json!({"code": "CSE", "name": "Computer Science and Engineering", "hod": 1})
}

pub fn sample_course() -> Value {
	json!({
		"code": "CS301",
		"name": "Data Structures",
		"department": "CSE",
		"sem": 3,
		"scheme": 2019,
		"syllabus_doc_url": "https://docs.example.edu/syllabus/cs301.pdf"
	})
}

pub fn sample_exam() -> Value {
	json!({
		"eid": 1,
		"sem": 3,
		"is_supplementary": false,
		"paper_submission_deadline": "2024-03-09",
		"scheme": 2019
	})
}
