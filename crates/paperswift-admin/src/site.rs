//! The admin site: registered resources, menu, routing and session flows

use crate::binding::ResourceBinding;
use crate::guard::{Guarded, NavigationGuard};
use crate::route::AdminRoute;
use crate::toast::{RouterNavigator, ToastNotifier};
use paperswift_client::{AuthClient, Credentials, HttpClient, ResourceClient, User};
use paperswift_core::{Resource, Result};
use paperswift_forms::{FormSchema, Navigator, Notification, Notifier};
use paperswift_models::{Course, Degree, Department, Exam, Scheme, Teacher, invalidation_map};
use paperswift_query::QueryClient;
use paperswift_session::SessionStore;
use std::fmt;
use std::sync::Arc;

pub const LOGIN_SUCCEEDED: &str = "You are successfully logged in!";
pub const LOGIN_FAILED: &str = "Unable to login with this credentials.";
pub const LOGGED_OUT: &str = "You are successfully logged out!";

/// The managed collections, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
	Exams,
	Courses,
	Teachers,
	Departments,
	Degrees,
	Schemes,
}

impl ResourceKind {
	pub const ALL: [ResourceKind; 6] = [
		Self::Exams,
		Self::Courses,
		Self::Teachers,
		Self::Departments,
		Self::Degrees,
		Self::Schemes,
	];

	pub fn collection(self) -> &'static str {
		match self {
			Self::Exams => Exam::COLLECTION,
			Self::Courses => Course::COLLECTION,
			Self::Teachers => Teacher::COLLECTION,
			Self::Departments => Department::COLLECTION,
			Self::Degrees => Degree::COLLECTION,
			Self::Schemes => Scheme::COLLECTION,
		}
	}

	pub fn label(self) -> String {
		match self {
			Self::Exams => Exam::plural(),
			Self::Courses => Course::plural(),
			Self::Teachers => Teacher::plural(),
			Self::Departments => Department::plural(),
			Self::Degrees => Degree::plural(),
			Self::Schemes => Scheme::plural(),
		}
	}

	/// Look up a collection name; accepts the singular too
	pub fn from_collection(name: &str) -> Option<Self> {
		let name = name.trim().to_lowercase();
		Self::ALL.into_iter().find(|kind| {
			let collection = kind.collection();
			name == collection || Some(name.as_str()) == collection.strip_suffix('s')
		})
	}
}

impl fmt::Display for ResourceKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.collection())
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
	pub label: String,
	pub route: AdminRoute,
}

/// Everything a front end needs, built around one session.
pub struct AdminSite {
	http: HttpClient,
	auth: AuthClient,
	query: Arc<QueryClient>,
	guard: NavigationGuard,
	notifier: Arc<ToastNotifier>,
	navigator: Arc<RouterNavigator>,
}

impl AdminSite {
	pub fn new(http: HttpClient) -> Self {
		let start = if http.session().is_authenticated() {
			AdminRoute::Home
		} else {
			AdminRoute::Login
		};
		Self {
			auth: AuthClient::new(http.clone()),
			query: Arc::new(QueryClient::new(invalidation_map())),
			guard: NavigationGuard::new(http.session().clone()),
			notifier: Arc::new(ToastNotifier::new()),
			navigator: Arc::new(RouterNavigator::new(start)),
			http,
		}
	}

	pub fn session(&self) -> &Arc<SessionStore> {
		self.http.session()
	}

	pub fn query(&self) -> &Arc<QueryClient> {
		&self.query
	}

	pub fn guard(&self) -> &NavigationGuard {
		&self.guard
	}

	pub fn toasts(&self) -> &Arc<ToastNotifier> {
		&self.notifier
	}

	pub fn navigator(&self) -> &Arc<RouterNavigator> {
		&self.navigator
	}

	/// Binding for one resource, sharing this site's cache and seams
	pub fn binding<T: FormSchema>(&self) -> ResourceBinding<T> {
		ResourceBinding::new(
			Arc::new(ResourceClient::<T>::new(self.http.clone())),
			self.query.clone(),
			self.notifier.clone(),
			self.navigator.clone(),
		)
	}

	pub fn menu(&self) -> Vec<MenuItem> {
		ResourceKind::ALL
			.into_iter()
			.map(|kind| MenuItem {
				label: kind.label(),
				route: AdminRoute::list(kind.collection()),
			})
			.collect()
	}

	/// Resolve a path through the guard.
	///
	/// Unknown collections resolve to [`AdminRoute::NotFound`].
	pub fn resolve(&self, path: &str) -> Guarded<AdminRoute> {
		let route = AdminRoute::parse(path);
		if route.is_public() {
			return Guarded::Allowed(route);
		}
		self.guard.guard(|| match route.collection() {
			Some(collection) if ResourceKind::from_collection(collection).is_none() => {
				AdminRoute::NotFound
			}
			_ => route,
		})
	}

	/// Log in, then go home. Failures leave the session untouched.
	pub async fn login(&self, credentials: &Credentials) -> Result<()> {
		match self.auth.login(credentials).await {
			Ok(_) => {
				self.notifier.notify(Notification::success(LOGIN_SUCCEEDED));
				self.navigator.navigate(&AdminRoute::Home.path());
				Ok(())
			}
			Err(error) => {
				tracing::warn!(username = %credentials.username, error = %error, "login failed");
				self.notifier.notify(Notification::error(LOGIN_FAILED));
				Err(error)
			}
		}
	}

	/// Forget the session and every cached collection
	pub fn logout(&self) -> Result<()> {
		self.auth.logout()?;
		for kind in ResourceKind::ALL {
			self.query.invalidate(kind.collection());
		}
		self.notifier.notify(Notification::success(LOGGED_OUT));
		self.navigator.navigate(&AdminRoute::Login.path());
		Ok(())
	}

	/// Profile of the logged-in user
	pub async fn current_user(&self) -> Result<User> {
		self.auth.user().await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("courses", Some(ResourceKind::Courses))]
	#[case("Course", Some(ResourceKind::Courses))]
	#[case("schemes", Some(ResourceKind::Schemes))]
	#[case("scemes", None)]
	#[case("students", None)]
	fn test_kind_from_collection(#[case] name: &str, #[case] expected: Option<ResourceKind>) {
		assert_eq!(ResourceKind::from_collection(name), expected);
	}

	#[rstest]
	fn test_menu_order() {
		let labels: Vec<String> = ResourceKind::ALL.iter().map(|k| k.label()).collect();

		assert_eq!(
			labels,
			vec!["Exams", "Courses", "Teachers", "Departments", "Degrees", "Schemes"]
		);
	}
}
