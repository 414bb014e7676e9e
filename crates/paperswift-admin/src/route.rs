//! Admin routes
//!
//! - `/login` - Login form
//! - `/` - Home
//! - `/{collection}` - List view
//! - `/{collection}/new` - Create form
//! - `/{collection}/{key}` - Edit form
//!
//! Keys are percent-encoded in paths. A key spelled `new` has its first
//! byte escaped so it cannot collide with the create form.

use paperswift_core::path::{decode_segment, encode_segment};
use std::fmt;

/// Segment that opens the create form instead of a record
pub const NEW_SEGMENT: &str = "new";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminRoute {
	Login,
	Home,
	List { collection: String },
	Create { collection: String },
	Edit { collection: String, key: String },
	NotFound,
}

impl AdminRoute {
	pub fn list(collection: impl Into<String>) -> Self {
		Self::List {
			collection: collection.into(),
		}
	}

	pub fn create(collection: impl Into<String>) -> Self {
		Self::Create {
			collection: collection.into(),
		}
	}

	pub fn edit(collection: impl Into<String>, key: impl fmt::Display) -> Self {
		Self::Edit {
			collection: collection.into(),
			key: key.to_string(),
		}
	}

	/// Parse a path. Collection names are not checked here.
	pub fn parse(path: &str) -> Self {
		let segments: Vec<&str> = path
			.trim()
			.split('/')
			.filter(|segment| !segment.is_empty())
			.collect();

		match segments.as_slice() {
			[] => Self::Home,
			["login"] => Self::Login,
			[collection] => Self::list(*collection),
			[collection, NEW_SEGMENT] => Self::create(*collection),
			[collection, key] => match decode_segment(key) {
				Some(key) => Self::edit(*collection, key),
				None => Self::NotFound,
			},
			_ => Self::NotFound,
		}
	}

	pub fn path(&self) -> String {
		match self {
			Self::Login => "/login".to_string(),
			Self::Home => "/".to_string(),
			Self::List { collection } => format!("/{}", collection),
			Self::Create { collection } => format!("/{}/{}", collection, NEW_SEGMENT),
			Self::Edit { collection, key } => format!("/{}/{}", collection, key_segment(key)),
			Self::NotFound => "/404".to_string(),
		}
	}

	/// Collection addressed by the route, if any
	pub fn collection(&self) -> Option<&str> {
		match self {
			Self::List { collection }
			| Self::Create { collection }
			| Self::Edit { collection, .. } => Some(collection),
			_ => None,
		}
	}

	/// Whether the route may be shown without a session
	pub fn is_public(&self) -> bool {
		matches!(self, Self::Login | Self::NotFound)
	}
}

fn key_segment(key: &str) -> String {
	if key == NEW_SEGMENT {
		// `%6E` is `n`
		return format!("%6E{}", &key[1..]);
	}
	encode_segment(key)
}

impl fmt::Display for AdminRoute {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.path())
	}
}
