//! Resource and auth client tests against the mock records service

use hyper::Method;
use paperswift_client::{
	AuthClient, Credentials, Endpoints, HttpClient, Payload, ResourceApi, ResourceClient,
};
use paperswift_core::{Card, Error, KeyPolicy, Resource};
use paperswift_session::{MemoryPersistence, SessionStore, Token};
use paperswift_test::fixtures::*;
use paperswift_test::{ErrorMode, TEST_PASSWORD, TEST_TOKEN, TEST_USERNAME};
use rstest::*;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Course {
	code: String,
	name: String,
	department: String,
	sem: i64,
	scheme: i64,
	syllabus_doc_url: String,
}

impl Resource for Course {
	type Key = String;
	const COLLECTION: &'static str = "courses";
	const SINGULAR: &'static str = "Course";
	const KEY_FIELD: &'static str = "code";
	const KEY_POLICY: KeyPolicy = KeyPolicy::ClientProvided;

	fn key(&self) -> String {
		self.code.clone()
	}

	fn card(&self) -> Card {
		Card::new(&self.name)
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Exam {
	#[serde(default)]
	eid: i64,
	sem: i64,
}

impl Resource for Exam {
	type Key = i64;
	const COLLECTION: &'static str = "exams";
	const SINGULAR: &'static str = "Exam";
	const KEY_FIELD: &'static str = "eid";
	const KEY_POLICY: KeyPolicy = KeyPolicy::ServerAssigned;

	fn key(&self) -> i64 {
		self.eid
	}

	fn card(&self) -> Card {
		Card::new(format!("Exam {}", self.eid))
	}
}

fn session_with_token() -> Arc<SessionStore> {
	let session = SessionStore::new(Arc::new(MemoryPersistence::new()));
	session
		.set_token(Token::new(TEST_TOKEN).unwrap())
		.unwrap();
	Arc::new(session)
}

fn http_for(base_url: &str, session: Arc<SessionStore>) -> HttpClient {
	HttpClient::new(Endpoints::new(base_url), session).unwrap()
}

fn payload(value: serde_json::Value) -> Payload {
	value.as_object().cloned().unwrap()
}

#[rstest]
#[tokio::test]
async fn test_list_sends_token_header(#[future] seeded_backend: MockBackend) {
	// Arrange
	let backend = seeded_backend.await;
	let client = ResourceClient::<Course>::new(http_for(&backend.base_url(), session_with_token()));

	// Act
	let courses = client.list().await.unwrap();

	// Assert
	assert_eq!(courses.len(), 1);
	assert_eq!(courses[0].code, "CS301");
	let requests = backend.requests();
	assert_eq!(requests[0].path, "/management/courses/");
	assert_eq!(
		requests[0].authorization.as_deref(),
		Some(format!("Token {}", TEST_TOKEN).as_str())
	);
}

#[rstest]
#[tokio::test]
async fn test_create_then_list_includes_record(#[future] backend: MockBackend) {
	// Arrange
	let backend = backend.await;
	let client = ResourceClient::<Course>::new(http_for(&backend.base_url(), session_with_token()));

	// Act
	let created = client
		.create(payload(json!({
			"code": "CS101",
			"name": "Programming",
			"department": "CSE",
			"sem": 1,
			"scheme": 2019,
			"syllabus_doc_url": ""
		})))
		.await
		.unwrap();
	let listed = client.list().await.unwrap();

	// Assert
	assert_eq!(created.code, "CS101");
	assert_eq!(listed, vec![created]);
}

#[rstest]
#[tokio::test]
async fn test_server_assigned_key_is_omitted_and_returned(#[future] backend: MockBackend) {
	// Arrange
	let backend = backend.await;
	let client = ResourceClient::<Exam>::new(http_for(&backend.base_url(), session_with_token()));

	// Act
	let created = client.create_record(&Exam { eid: 0, sem: 5 }).await.unwrap();

	// Assert
	assert_eq!(created.eid, 1);
	let body = backend.requests()[0].body.clone().unwrap();
	assert!(body.get("eid").is_none());
}

#[rstest]
#[tokio::test]
async fn test_partial_update_changes_only_sent_fields(#[future] seeded_backend: MockBackend) {
	// Arrange
	let backend = seeded_backend.await;
	let client = ResourceClient::<Course>::new(http_for(&backend.base_url(), session_with_token()));

	// Act
	let updated = client
		.update(&"CS301".to_string(), payload(json!({"sem": 4})))
		.await
		.unwrap();

	// Assert
	assert_eq!(updated.sem, 4);
	assert_eq!(updated.name, "Data Structures");
	let patch = backend
		.requests()
		.into_iter()
		.find(|r| r.method == Method::PATCH)
		.unwrap();
	assert_eq!(patch.path, "/management/courses/CS301/");
	assert_eq!(patch.body, Some(json!({"sem": 4})));
}

#[rstest]
#[tokio::test]
async fn test_remove_uses_path_without_trailing_slash(#[future] seeded_backend: MockBackend) {
	// Arrange
	let backend = seeded_backend.await;
	let client = ResourceClient::<Course>::new(http_for(&backend.base_url(), session_with_token()));

	// Act
	client.remove(&"CS301".to_string()).await.unwrap();
	let listed = client.list().await.unwrap();

	// Assert
	assert!(listed.is_empty());
	assert_eq!(backend.count(Method::DELETE, "/management/courses/CS301"), 1);
	let delete = backend
		.requests()
		.into_iter()
		.find(|r| r.method == Method::DELETE)
		.unwrap();
	assert_eq!(delete.path, "/management/courses/CS301");
}

#[rstest]
#[tokio::test]
async fn test_remove_missing_key_is_api_error(#[future] backend: MockBackend) {
	// Arrange
	let backend = backend.await;
	let client = ResourceClient::<Course>::new(http_for(&backend.base_url(), session_with_token()));

	// Act
	let result = client.remove(&"NOPE".to_string()).await;

	// Assert
	assert!(matches!(result, Err(Error::Api { status: 404, .. })));
}

#[rstest]
#[case(ErrorMode::Unauthorized, 401)]
#[case(ErrorMode::ServerError, 500)]
#[tokio::test]
async fn test_error_status_maps_to_api_error(
	#[future] backend: MockBackend,
	#[case] mode: ErrorMode,
	#[case] status: u16,
) {
	// Arrange
	let backend = backend.await;
	backend.set_error_mode(mode);
	let client = ResourceClient::<Course>::new(http_for(&backend.base_url(), session_with_token()));

	// Act
	let result = client.list().await;

	// Assert
	assert_eq!(result.unwrap_err().status(), Some(status));
}

#[rstest]
#[tokio::test]
async fn test_error_invalid_body_is_decode_error(#[future] backend: MockBackend) {
	let backend = backend.await;
	backend.set_error_mode(ErrorMode::InvalidResponse);
	let client = ResourceClient::<Course>::new(http_for(&backend.base_url(), session_with_token()));

	let result = client.list().await;

	assert!(matches!(result, Err(Error::Decode(_))));
}

#[rstest]
#[tokio::test]
async fn test_error_unreachable_service_is_network_error() {
	let client =
		ResourceClient::<Course>::new(http_for(&MockBackend::unreachable_url(), session_with_token()));

	let result = client.list().await;

	assert!(matches!(result, Err(Error::Network(_))));
}

#[rstest]
#[tokio::test]
async fn test_missing_token_is_sent_and_rejected(#[future] backend: MockBackend) {
	// Arrange
	let backend = backend.await;
	let session = Arc::new(SessionStore::new(Arc::new(MemoryPersistence::new())));
	let client = ResourceClient::<Course>::new(http_for(&backend.base_url(), session));

	// Act
	let result = client.list().await;

	// Assert
	assert!(result.unwrap_err().is_unauthorized());
	assert_eq!(backend.requests()[0].authorization, None);
}

#[rstest]
#[tokio::test]
async fn test_login_stores_token_and_fetches_user(#[future] backend: MockBackend) {
	// Arrange
	let backend = backend.await;
	let session = Arc::new(SessionStore::new(Arc::new(MemoryPersistence::new())));
	let auth = AuthClient::new(http_for(&backend.base_url(), session.clone()));

	// Act
	let token = auth
		.login(&Credentials::new(TEST_USERNAME, TEST_PASSWORD).with_email("admin@example.edu"))
		.await
		.unwrap();
	let user = auth.user().await.unwrap();

	// Assert
	assert_eq!(token.as_str(), TEST_TOKEN);
	assert_eq!(session.token(), Some(token));
	assert_eq!(user.username, TEST_USERNAME);
	assert_eq!(user.display_name(), "Ada Lovelace");
}

#[rstest]
#[tokio::test]
async fn test_login_with_bad_credentials_leaves_session_empty(#[future] backend: MockBackend) {
	// Arrange
	let backend = backend.await;
	let session = Arc::new(SessionStore::new(Arc::new(MemoryPersistence::new())));
	let auth = AuthClient::new(http_for(&backend.base_url(), session.clone()));

	// Act
	let result = auth.login(&Credentials::new(TEST_USERNAME, "wrong")).await;

	// Assert
	assert!(matches!(result, Err(Error::Api { status: 400, .. })));
	assert!(!session.is_authenticated());
}

#[rstest]
#[tokio::test]
async fn test_logout_clears_session_without_request(#[future] backend: MockBackend) {
	let backend = backend.await;
	let session = session_with_token();
	let auth = AuthClient::new(http_for(&backend.base_url(), session.clone()));

	auth.logout().unwrap();

	assert!(!session.is_authenticated());
	assert_eq!(backend.request_count(), 0);
}
