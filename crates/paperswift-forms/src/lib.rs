//! Schema-driven forms for PaperSwift resources
//!
//! A resource declares its fields once through [`FormSchema`]; an
//! [`EntityForm`] then handles editing, validation, submission and the
//! two-stage delete for it.

pub mod controller;
pub mod notify;
pub mod schema;
pub mod value;

pub use controller::{EntityForm, FormContext, FormError, FormMode, FormResult};
pub use notify::{
	DELETE_FAILED, Navigator, Notification, NotificationKind, Notifier, RecordingNavigator,
	RecordingNotifier, SUBMIT_FAILED,
};
pub use schema::{EntitySchema, FieldKind, FieldSchema, FormSchema, Widget};
pub use value::{FieldValue, clean};
