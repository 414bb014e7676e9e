//! Toast queue and router-backed navigation used by the console front end

use crate::route::AdminRoute;
use paperswift_forms::{Navigator, Notification, NotificationKind, Notifier};
use parking_lot::{Mutex, RwLock};

/// Queues notifications until the front end shows them
#[derive(Debug, Default)]
pub struct ToastNotifier {
	pending: Mutex<Vec<Notification>>,
}

impl ToastNotifier {
	pub fn new() -> Self {
		Self::default()
	}

	/// Take every queued toast, oldest first
	pub fn drain(&self) -> Vec<Notification> {
		std::mem::take(&mut *self.pending.lock())
	}

	pub fn pending(&self) -> Vec<Notification> {
		self.pending.lock().clone()
	}
}

impl Notifier for ToastNotifier {
	fn notify(&self, notification: Notification) {
		match notification.kind {
			NotificationKind::Success => tracing::info!(message = %notification.message, "toast"),
			NotificationKind::Error => tracing::warn!(message = %notification.message, "toast"),
		}
		self.pending.lock().push(notification);
	}
}

/// Tracks the current route and the paths visited
#[derive(Debug)]
pub struct RouterNavigator {
	current: RwLock<AdminRoute>,
	history: Mutex<Vec<String>>,
}

impl RouterNavigator {
	pub fn new(start: AdminRoute) -> Self {
		Self {
			current: RwLock::new(start),
			history: Mutex::new(Vec::new()),
		}
	}

	pub fn current(&self) -> AdminRoute {
		self.current.read().clone()
	}

	pub fn history(&self) -> Vec<String> {
		self.history.lock().clone()
	}
}

impl Default for RouterNavigator {
	fn default() -> Self {
		Self::new(AdminRoute::Home)
	}
}

impl Navigator for RouterNavigator {
	fn navigate(&self, path: &str) {
		let route = AdminRoute::parse(path);
		tracing::debug!(%route, "navigate");
		*self.current.write() = route;
		self.history.lock().push(path.to_string());
	}
}
