//! End-to-end console flows: settings, persisted session, cache and forms
//! working together against the mock records service.

use chrono::NaiveDate;
use futures::future::join_all;
use paperswift::prelude::*;
use paperswift_test::fixtures::*;
use paperswift_test::{Method, TEST_PASSWORD, TEST_TOKEN, TEST_USERNAME};
use rstest::*;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn write_config(dir: &Path, backend_url: &str) -> std::path::PathBuf {
	let path = dir.join("paperswift.toml");
	let state_dir = dir.join("state");
	std::fs::write(
		&path,
		format!(
			"backend_url = \"{}\"\nstate_dir = \"{}\"\n",
			backend_url,
			state_dir.display()
		),
	)
	.unwrap();
	path
}

fn open_site(config: &Path) -> AdminSite {
	let settings = Settings::load(Some(config)).unwrap();
	let persistence = Arc::new(FilePersistence::in_dir(&settings.state_dir));
	let session = Arc::new(SessionStore::restore(persistence).unwrap());
	AdminSite::new(HttpClient::from_settings(&settings, session).unwrap())
}

fn memory_site(backend: &MockBackend) -> AdminSite {
	let session = Arc::new(SessionStore::new(Arc::new(MemoryPersistence::with_token(
		Token::new(TEST_TOKEN).unwrap(),
	))));
	let http = HttpClient::new(
		paperswift::client::Endpoints::new(backend.base_url()),
		session,
	)
	.unwrap();
	AdminSite::new(http)
}

#[rstest]
#[tokio::test]
async fn test_session_survives_restart(#[future] seeded_backend: MockBackend) {
	// Arrange
	let backend = seeded_backend.await;
	let dir = TempDir::new().unwrap();
	let config = write_config(dir.path(), &backend.base_url());
	let first = open_site(&config);
	assert_eq!(first.resolve("/exams"), Guarded::Redirect(AdminRoute::Login));

	// Act
	first
		.login(&Credentials::new(TEST_USERNAME, TEST_PASSWORD))
		.await
		.unwrap();
	let second = open_site(&config);
	let view = second.binding::<Exam>().list_view().await;

	// Assert
	assert!(second.session().is_authenticated());
	assert_eq!(view.cards().len(), 1);
	let list = backend
		.requests()
		.into_iter()
		.find(|r| r.path == "/management/exams/")
		.unwrap();
	assert_eq!(
		list.authorization.as_deref(),
		Some(format!("Token {}", TEST_TOKEN).as_str())
	);

	// Act
	second.logout().unwrap();

	// Assert
	assert!(!open_site(&config).session().is_authenticated());
}

#[rstest]
#[tokio::test]
async fn test_concurrent_views_share_one_request(#[future] seeded_backend: MockBackend) {
	// Arrange
	let backend = seeded_backend.await;
	backend.set_latency(Duration::from_millis(100));
	let site = memory_site(&backend);
	let teachers = site.binding::<Teacher>();

	// Act
	let views = join_all((0..5).map(|_| teachers.list_view())).await;

	// Assert
	assert!(views.iter().all(|v| v.cards().len() == 1));
	assert_eq!(backend.count(Method::GET, "/management/teachers/"), 1);
}

#[rstest]
#[tokio::test]
async fn test_exam_date_round_trip(#[future] seeded_backend: MockBackend) {
	// Arrange
	let backend = seeded_backend.await;
	let site = memory_site(&backend);
	let exams = site.binding::<Exam>();
	let form = exams.create_form();
	form.set_input("sem", "5").unwrap();
	form.set_input("scheme", "2019").unwrap();
	form.set_field(
		"paper_submission_deadline",
		FieldValue::Date(NaiveDate::from_ymd_opt(2024, 12, 31)),
	)
	.unwrap();

	// Act
	let created = form.submit().await.unwrap();
	let reopened = exams.edit_form(&created).unwrap();

	// Assert
	let post = backend
		.requests()
		.into_iter()
		.find(|r| r.method == Method::POST && r.path == "/management/exams/")
		.unwrap();
	let body = post.body.unwrap();
	assert_eq!(body["paper_submission_deadline"], "2024-12-31");
	assert!(body.get("eid").is_none());
	assert_eq!(created.eid, 2);
	assert_eq!(
		reopened.value("paper_submission_deadline"),
		Some(FieldValue::Date(NaiveDate::from_ymd_opt(2024, 12, 31)))
	);
	assert_eq!(reopened.value("sem").unwrap().to_string(), "5");
}

#[rstest]
#[tokio::test]
async fn test_schemes_use_service_path(#[future] seeded_backend: MockBackend) {
	let backend = seeded_backend.await;
	let site = memory_site(&backend);

	let view = site.binding::<Scheme>().list_view().await;

	assert_eq!(view.cards()[0].card.title, "Scheme 2019");
	assert_eq!(backend.count(Method::GET, "/management/scemes/"), 1);
}

#[rstest]
#[tokio::test]
async fn test_missing_required_field_sends_nothing(#[future] backend: MockBackend) {
	// Arrange
	let backend = backend.await;
	let site = memory_site(&backend);
	let form = site.binding::<Teacher>().create_form();
	form.set_input("name", "Ada Lovelace").unwrap();
	form.set_input("gender", "F").unwrap();

	// Act
	let result = form.submit().await;

	// Assert
	let Err(FormError::Validation(errors)) = result else {
		panic!("expected validation errors");
	};
	assert!(errors.contains("dob"));
	assert!(errors.contains("designation"));
	assert!(errors.contains("mobile_no"));
	assert_eq!(
		form.value("name"),
		Some(FieldValue::Text("Ada Lovelace".to_string()))
	);
	assert_eq!(backend.count(Method::POST, "/management/"), 0);
}
