//! Error types shared across the workspace

use std::collections::BTreeMap;
use std::fmt;

/// Errors raised while talking to the records service or validating input.
///
/// The enum is `Clone` so a single failed request can be handed to every
/// caller waiting on the same in-flight fetch.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
	/// The request never produced a response
	#[error("Network error: {0}")]
	Network(String),

	/// The service answered with a non-success status
	#[error("API error ({status}): {body}")]
	Api { status: u16, body: String },

	/// A success response whose body could not be decoded
	#[error("Decode error: {0}")]
	Decode(String),

	#[error("Validation failed: {0}")]
	Validation(FieldErrors),

	#[error("Configuration error: {0}")]
	Config(String),

	#[error("Session error: {0}")]
	Session(String),

	#[error("Not found: {0}")]
	NotFound(String),
}

impl Error {
	/// Create an API error from a status code and response body
	pub fn api(status: u16, body: impl Into<String>) -> Self {
		Self::Api {
			status,
			body: body.into(),
		}
	}

	/// HTTP status carried by the error, if any
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Api { status, .. } => Some(*status),
			_ => None,
		}
	}

	/// Whether the service rejected the credentials.
	///
	/// Nothing in the workspace reacts to this automatically; a stale token
	/// surfaces as an ordinary failed request.
	pub fn is_unauthorized(&self) -> bool {
		self.status() == Some(401)
	}

	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound(_)) || self.status() == Some(404)
	}
}

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Per-field validation messages, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
	errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
	pub fn new() -> Self {
		Self::default()
	}

	/// Record a message against a field
	pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
		self.errors
			.entry(field.into())
			.or_default()
			.push(message.into());
	}

	pub fn is_empty(&self) -> bool {
		self.errors.is_empty()
	}

	pub fn len(&self) -> usize {
		self.errors.len()
	}

	/// Messages recorded for a single field
	pub fn get(&self, field: &str) -> Option<&[String]> {
		self.errors.get(field).map(Vec::as_slice)
	}

	pub fn contains(&self, field: &str) -> bool {
		self.errors.contains_key(field)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
		self.errors.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
	}
}

impl fmt::Display for FieldErrors {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let parts: Vec<String> = self
			.errors
			.iter()
			.map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
			.collect();
		write!(f, "{}", parts.join("; "))
	}
}
