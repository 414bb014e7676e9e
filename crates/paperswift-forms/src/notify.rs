//! Side-effect seams: user notifications and navigation

use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
	Success,
	Error,
}

/// A transient message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
	pub kind: NotificationKind,
	pub message: String,
}

impl Notification {
	pub fn success(message: impl Into<String>) -> Self {
		Self {
			kind: NotificationKind::Success,
			message: message.into(),
		}
	}

	pub fn error(message: impl Into<String>) -> Self {
		Self {
			kind: NotificationKind::Error,
			message: message.into(),
		}
	}
}

/// Failure message after a submit
pub const SUBMIT_FAILED: &str = "Something went wrong.";
/// Failure message after a delete
pub const DELETE_FAILED: &str = "Something went wrong. Please try again";

pub trait Notifier: Send + Sync {
	fn notify(&self, notification: Notification);
}

/// Moves the user to another screen, addressed by path (e.g. `/courses`)
pub trait Navigator: Send + Sync {
	fn navigate(&self, path: &str);
}

/// Keeps every notification, for tests and batch front ends
#[derive(Debug, Default)]
pub struct RecordingNotifier {
	notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn notifications(&self) -> Vec<Notification> {
		self.notifications.lock().clone()
	}
}

impl Notifier for RecordingNotifier {
	fn notify(&self, notification: Notification) {
		self.notifications.lock().push(notification);
	}
}

/// Keeps every navigation, for tests
#[derive(Debug, Default)]
pub struct RecordingNavigator {
	paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn paths(&self) -> Vec<String> {
		self.paths.lock().clone()
	}
}

impl Navigator for RecordingNavigator {
	fn navigate(&self, path: &str) {
		self.paths.lock().push(path.to_string());
	}
}
