//! The resource contract
//!
//! An entity becomes a managed resource by implementing [`Resource`]: a
//! collection name, a key, the collections it refers to, and a card summary.
//! The client, query cache and admin views are all generic over this trait.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::{Debug, Display};
use std::str::FromStr;

/// Natural key of a resource instance.
///
/// Implemented for integer ids and string codes.
pub trait ResourceKey:
	Clone + Debug + Display + PartialEq + Eq + std::hash::Hash + Send + Sync + 'static
{
	/// Parse a key from a path segment or command-line argument
	fn parse_key(raw: &str) -> Option<Self>;
}

impl ResourceKey for i64 {
	fn parse_key(raw: &str) -> Option<Self> {
		i64::from_str(raw.trim()).ok()
	}
}

impl ResourceKey for String {
	fn parse_key(raw: &str) -> Option<Self> {
		let raw = raw.trim();
		(!raw.is_empty()).then(|| raw.to_string())
	}
}

/// Who chooses the key of a new record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPolicy {
	/// The service assigns the key; create payloads omit it
	ServerAssigned,
	/// The user enters the key on the create form
	ClientProvided,
}

/// Summary of one record as shown on a list card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Card {
	pub title: String,
	pub subtitle: Option<String>,
	pub badges: Vec<String>,
	pub details: Vec<String>,
	/// External document linked from the card
	pub link: Option<String>,
}

impl Card {
	pub fn new(title: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			..Self::default()
		}
	}

	pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
		self.subtitle = Some(subtitle.into());
		self
	}

	pub fn with_badge(mut self, badge: impl Into<String>) -> Self {
		self.badges.push(badge.into());
		self
	}

	pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
		self.details.push(detail.into());
		self
	}

	/// Attach a link; empty URLs are ignored
	pub fn with_link(mut self, link: impl Into<String>) -> Self {
		let link = link.into();
		if !link.is_empty() {
			self.link = Some(link);
		}
		self
	}
}

/// A managed entity collection.
///
/// # Examples
///
/// ```
/// use paperswift_core::{Card, KeyPolicy, Resource};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct Degree {
///     code: String,
///     name: String,
/// }
///
/// impl Resource for Degree {
///     type Key = String;
///     const COLLECTION: &'static str = "degrees";
///     const SINGULAR: &'static str = "Degree";
///     const KEY_FIELD: &'static str = "code";
///     const KEY_POLICY: KeyPolicy = KeyPolicy::ClientProvided;
///
///     fn key(&self) -> String {
///         self.code.clone()
///     }
///
///     fn card(&self) -> Card {
///         Card::new(&self.name).with_badge(&self.code)
///     }
/// }
///
/// assert_eq!(Degree::PATH, "degrees");
/// ```
pub trait Resource: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {
	type Key: ResourceKey;

	/// Collection name; also the query cache key and the route segment
	const COLLECTION: &'static str;

	/// Human singular name used in titles and notifications
	const SINGULAR: &'static str;

	/// Name of the key field in the wire representation
	const KEY_FIELD: &'static str;

	const KEY_POLICY: KeyPolicy;

	/// Path segment under `/management/`.
	///
	/// Defaults to the collection name. Overridable per resource and again
	/// at runtime through the client's endpoint table.
	const PATH: &'static str = Self::COLLECTION;

	/// Collections whose keys this resource embeds as soft references.
	///
	/// A mutation of any listed collection invalidates this one.
	const REFERENCES: &'static [&'static str] = &[];

	fn key(&self) -> Self::Key;

	fn card(&self) -> Card;

	/// Plural label, e.g. "Courses"
	fn plural() -> String {
		format!("{}s", Self::SINGULAR)
	}
}
