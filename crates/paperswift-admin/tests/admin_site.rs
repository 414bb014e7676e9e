//! Admin site flows against the mock records service

use paperswift_admin::{
	AdminRoute, AdminSite, DetailView, Guarded, LOGGED_OUT, LOGIN_FAILED, LOGIN_SUCCEEDED, ListView,
};
use paperswift_client::{Credentials, Endpoints, HttpClient};
use paperswift_forms::{DELETE_FAILED, NotificationKind};
use paperswift_models::{Course, Degree, Scheme};
use paperswift_session::{MemoryPersistence, SessionStore, Token};
use paperswift_test::fixtures::*;
use paperswift_test::{ErrorMode, Method, TEST_PASSWORD, TEST_TOKEN, TEST_USERNAME};
use rstest::*;
use std::sync::Arc;

fn site_for(backend: &MockBackend, token: Option<&str>) -> AdminSite {
	let persistence = match token.and_then(Token::new) {
		Some(token) => MemoryPersistence::with_token(token),
		None => MemoryPersistence::new(),
	};
	let session = Arc::new(SessionStore::restore(Arc::new(persistence)).unwrap());
	let http = HttpClient::new(Endpoints::new(backend.base_url()), session).unwrap();
	AdminSite::new(http)
}

#[rstest]
#[tokio::test]
async fn test_guard_redirects_without_requests(#[future] seeded_backend: MockBackend) {
	// Arrange
	let backend = seeded_backend.await;
	let site = site_for(&backend, None);

	// Act
	let outcome = site
		.guard()
		.guard_async(|| async { site.binding::<Course>().list_view().await })
		.await;

	// Assert
	assert_eq!(outcome, Guarded::Redirect(AdminRoute::Login));
	assert_eq!(site.resolve("/courses"), Guarded::Redirect(AdminRoute::Login));
	assert_eq!(site.resolve("/login"), Guarded::Allowed(AdminRoute::Login));
	assert_eq!(backend.request_count(), 0);
}

#[rstest]
#[tokio::test]
async fn test_resolve_unknown_collection(#[future] backend: MockBackend) {
	let backend = backend.await;
	let site = site_for(&backend, Some(TEST_TOKEN));

	assert_eq!(site.resolve("/students"), Guarded::Allowed(AdminRoute::NotFound));
	assert_eq!(
		site.resolve("/courses/CS301"),
		Guarded::Allowed(AdminRoute::edit("courses", "CS301"))
	);
}

#[rstest]
#[tokio::test]
async fn test_card_route_opens_awkward_keys(#[future] backend: MockBackend) {
	// Arrange
	let backend = backend.await;
	backend.seed("degrees", serde_json::json!({"code": "new", "name": "New Programme"}));
	backend.seed("degrees", serde_json::json!({"code": "B/TECH", "name": "Bachelor of Technology"}));
	let site = site_for(&backend, Some(TEST_TOKEN));
	let degrees = site.binding::<Degree>();

	// Act
	let cards = degrees.list_view().await.cards().to_vec();
	let mut opened = Vec::new();
	for card in &cards {
		let Guarded::Allowed(AdminRoute::Edit { key, .. }) = site.resolve(&card.edit_route.path())
		else {
			panic!("card route {} did not resolve to an edit form", card.edit_route);
		};
		opened.push(degrees.detail_view_raw(&key).await);
	}

	// Assert
	assert_eq!(cards.len(), 2);
	let names: Vec<String> = opened
		.into_iter()
		.map(|view| view.found().map(|d| d.name).unwrap_or_default())
		.collect();
	assert_eq!(names, vec!["New Programme", "Bachelor of Technology"]);
}

#[rstest]
#[tokio::test]
async fn test_empty_collection_shows_placeholder(#[future] backend: MockBackend) {
	// Arrange
	let backend = backend.await;
	let site = site_for(&backend, Some(TEST_TOKEN));

	// Act
	let view = site.binding::<Course>().list_view().await;

	// Assert
	assert_eq!(
		view,
		ListView::Empty {
			placeholder: "There are no courses yet.".to_string(),
			action_label: "Create New Course".to_string(),
			create_route: AdminRoute::create("courses"),
		}
	);
}

#[rstest]
#[tokio::test]
async fn test_list_is_cached_until_mutation(#[future] seeded_backend: MockBackend) {
	// Arrange
	let backend = seeded_backend.await;
	let site = site_for(&backend, Some(TEST_TOKEN));
	let courses = site.binding::<Course>();

	// Act
	let first = courses.list_view().await;
	let second = courses.list_view().await;

	// Assert
	let ListView::Populated {
		title,
		count,
		add_label,
		cards,
		..
	} = &first
	else {
		panic!("expected a populated list, got {:?}", first);
	};
	assert_eq!(title, "Courses (1)");
	assert_eq!(*count, 1);
	assert_eq!(add_label, "Add New Course");
	assert_eq!(cards[0].edit_route, AdminRoute::edit("courses", "CS301"));
	assert_eq!(first, second);
	assert_eq!(backend.count(Method::GET, "/management/courses/"), 1);
}

#[rstest]
#[tokio::test]
async fn test_refresh_bypasses_cache(#[future] backend: MockBackend) {
	// Arrange
	let backend = backend.await;
	let site = site_for(&backend, Some(TEST_TOKEN));
	let degrees = site.binding::<Degree>();
	degrees.list_view().await;
	backend.seed("degrees", serde_json::json!({"code": "MCA", "name": "Computer Applications"}));

	// Act
	let cached = degrees.list_view().await;
	let refreshed = degrees.refresh().await;

	// Assert
	assert!(cached.cards().is_empty());
	assert_eq!(refreshed.cards().len(), 1);
	assert_eq!(backend.count(Method::GET, "/management/degrees/"), 2);
}

#[rstest]
#[tokio::test]
async fn test_create_form_submits_and_reloads(#[future] seeded_backend: MockBackend) {
	// Arrange
	let backend = seeded_backend.await;
	let site = site_for(&backend, Some(TEST_TOKEN));
	let courses = site.binding::<Course>();
	courses.list_view().await;
	let form = courses.create_form();
	for (field, raw) in [
		("name", "Operating Systems"),
		("sem", "5"),
		("scheme", "2019"),
		("department", "CSE"),
		("code", "CS501"),
	] {
		form.set_input(field, raw).unwrap();
	}

	// Act
	let created = form.submit().await.unwrap();
	let view = courses.list_view().await;

	// Assert
	assert_eq!(created.code, "CS501");
	assert_eq!(created.sem, 5);
	assert_eq!(site.navigator().current(), AdminRoute::list("courses"));
	let toasts = site.toasts().drain();
	assert_eq!(toasts.len(), 1);
	assert_eq!(toasts[0].message, "Course created");
	assert_eq!(view.cards().len(), 2);
	assert_eq!(backend.count(Method::GET, "/management/courses/"), 2);
}

#[rstest]
#[tokio::test]
async fn test_edit_form_round_trips_numbers(#[future] seeded_backend: MockBackend) {
	// Arrange
	let backend = seeded_backend.await;
	let site = site_for(&backend, Some(TEST_TOKEN));
	let courses = site.binding::<Course>();
	let record = courses
		.detail_view(&"CS301".to_string())
		.await
		.found()
		.unwrap();
	let form = courses.edit_form(&record).unwrap();

	// Act
	form.set_input("sem", "4").unwrap();
	form.submit().await.unwrap();
	let reloaded = courses
		.detail_view(&"CS301".to_string())
		.await
		.found()
		.unwrap();
	let reopened = courses.edit_form(&reloaded).unwrap();

	// Assert
	let patch = backend
		.requests()
		.into_iter()
		.find(|r| r.method == Method::PATCH)
		.unwrap();
	assert_eq!(patch.path, "/management/courses/CS301/");
	assert_eq!(patch.body, Some(serde_json::json!({"sem": 4})));
	assert_eq!(reloaded.sem, 4);
	assert_eq!(reloaded.name, "Data Structures");
	assert_eq!(reopened.value("sem").unwrap().to_string(), "4");
}

#[rstest]
#[tokio::test]
async fn test_detail_falls_back_to_direct_fetch(#[future] seeded_backend: MockBackend) {
	// Arrange
	let backend = seeded_backend.await;
	let site = site_for(&backend, Some(TEST_TOKEN));
	let degrees = site.binding::<Degree>();
	degrees.list_view().await;
	backend.seed(
		"degrees",
		serde_json::json!({"code": "MTECH", "name": "Master of Technology"}),
	);

	// Act
	let found = degrees.detail_view_raw("MTECH").await;
	let missing = degrees.detail_view_raw("PHD").await;

	// Assert
	assert_eq!(found.found().map(|d| d.name), Some("Master of Technology".to_string()));
	assert_eq!(
		missing,
		DetailView::NotFound {
			key: "PHD".to_string()
		}
	);
	assert_eq!(backend.count(Method::GET, "/management/degrees/MTECH/"), 1);
}

#[rstest]
#[tokio::test]
async fn test_delete_from_list(#[future] seeded_backend: MockBackend) {
	// Arrange
	let backend = seeded_backend.await;
	let site = site_for(&backend, Some(TEST_TOKEN));
	let courses = site.binding::<Course>();
	courses.list_view().await;

	// Act
	let view = courses.delete_from_list(&"CS301".to_string()).await.unwrap();

	// Assert
	assert!(matches!(view, ListView::Empty { .. }));
	assert_eq!(backend.count(Method::DELETE, "/management/courses/CS301"), 1);
	assert_eq!(site.toasts().drain()[0].message, "Course deleted.");
}

#[rstest]
#[tokio::test]
async fn test_failed_delete_keeps_list(#[future] seeded_backend: MockBackend) {
	// Arrange
	let backend = seeded_backend.await;
	let site = site_for(&backend, Some(TEST_TOKEN));
	let courses = site.binding::<Course>();
	courses.list_view().await;
	backend.set_error_mode(ErrorMode::ServerError);

	// Act
	let result = courses.delete_from_list(&"CS301".to_string()).await;

	// Assert
	assert_eq!(result.unwrap_err().status(), Some(500));
	let toasts = site.toasts().drain();
	assert_eq!(toasts[0].kind, NotificationKind::Error);
	assert_eq!(toasts[0].message, DELETE_FAILED);
	assert_eq!(courses.current_list_view().cards().len(), 1);
}

#[rstest]
#[tokio::test]
async fn test_mutating_degrees_invalidates_schemes(#[future] seeded_backend: MockBackend) {
	// Arrange
	let backend = seeded_backend.await;
	let site = site_for(&backend, Some(TEST_TOKEN));
	let degrees = site.binding::<Degree>();
	let schemes = site.binding::<Scheme>();
	let courses = site.binding::<Course>();
	degrees.list_view().await;
	schemes.list_view().await;
	courses.list_view().await;
	let form = degrees.create_form();
	form.set_input("code", "MTECH").unwrap();
	form.set_input("name", "Master of Technology").unwrap();

	// Act
	form.submit().await.unwrap();

	// Assert
	assert!(!site.query().is_cached("degrees"));
	assert!(!site.query().is_cached("schemes"));
	assert!(site.query().is_cached("courses"));
}

#[rstest]
#[tokio::test]
async fn test_login_and_logout(#[future] backend: MockBackend) {
	// Arrange
	let backend = backend.await;
	let site = site_for(&backend, None);
	let credentials = Credentials::new(TEST_USERNAME, TEST_PASSWORD);

	// Act
	site.login(&credentials).await.unwrap();
	let user = site.current_user().await.unwrap();

	// Assert
	assert!(site.session().is_authenticated());
	assert_eq!(site.navigator().current(), AdminRoute::Home);
	assert_eq!(user.username, TEST_USERNAME);
	assert_eq!(site.toasts().drain()[0].message, LOGIN_SUCCEEDED);

	// Act
	site.logout().unwrap();

	// Assert
	assert!(!site.session().is_authenticated());
	assert_eq!(site.navigator().current(), AdminRoute::Login);
	assert_eq!(site.toasts().drain()[0].message, LOGGED_OUT);
}

#[rstest]
#[tokio::test]
async fn test_login_rejected(#[future] backend: MockBackend) {
	let backend = backend.await;
	let site = site_for(&backend, None);

	let result = site
		.login(&Credentials::new(TEST_USERNAME, "wrong"))
		.await;

	assert!(result.is_err());
	assert!(!site.session().is_authenticated());
	assert_eq!(site.toasts().drain()[0].message, LOGIN_FAILED);
	assert_eq!(site.navigator().current(), AdminRoute::Login);
}
