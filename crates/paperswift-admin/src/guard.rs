//! Navigation guard for authenticated screens

use crate::route::AdminRoute;
use paperswift_session::SessionStore;
use std::sync::Arc;

/// Outcome of passing a view through the guard
#[derive(Debug, Clone, PartialEq)]
pub enum Guarded<V> {
	Allowed(V),
	Redirect(AdminRoute),
}

impl<V> Guarded<V> {
	pub fn is_redirect(&self) -> bool {
		matches!(self, Self::Redirect(_))
	}

	pub fn allowed(self) -> Option<V> {
		match self {
			Self::Allowed(view) => Some(view),
			Self::Redirect(_) => None,
		}
	}
}

/// Lets a subtree render only when the session holds a token.
///
/// Without a token the subtree is never invoked, so it issues no requests.
/// Expired tokens are not detected here; the server rejects them.
#[derive(Clone)]
pub struct NavigationGuard {
	session: Arc<SessionStore>,
}

impl NavigationGuard {
	pub fn new(session: Arc<SessionStore>) -> Self {
		Self { session }
	}

	pub fn guard<V>(&self, view: impl FnOnce() -> V) -> Guarded<V> {
		if !self.session.is_authenticated() {
			tracing::debug!("No session token; redirecting to login");
			return Guarded::Redirect(AdminRoute::Login);
		}
		Guarded::Allowed(view())
	}

	/// Async form of [`guard`](Self::guard); the future is only built when allowed
	pub async fn guard_async<V, F, Fut>(&self, view: F) -> Guarded<V>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = V>,
	{
		if !self.session.is_authenticated() {
			tracing::debug!("No session token; redirecting to login");
			return Guarded::Redirect(AdminRoute::Login);
		}
		Guarded::Allowed(view().await)
	}
}
