//! URL layout of the records service

use paperswift_conf::Settings;
use paperswift_core::path::encode_segment;
use paperswift_core::{Resource, ResourceKey};
use std::collections::HashMap;

/// Prefix of every managed collection
pub const MANAGEMENT_PREFIX: &str = "management";
pub const LOGIN_PATH: &str = "/auth/login/";
pub const USER_PATH: &str = "/auth/user/";

/// Resolves collection and item URLs, honouring per-collection path overrides.
///
/// # Examples
///
/// ```
/// use paperswift_client::Endpoints;
///
/// let endpoints = Endpoints::new("http://localhost:8000/");
/// assert_eq!(endpoints.base_url(), "http://localhost:8000");
/// assert_eq!(
///     endpoints.url("/auth/login/"),
///     "http://localhost:8000/auth/login/"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Endpoints {
	base_url: String,
	overrides: HashMap<String, String>,
}

impl Endpoints {
	pub fn new(base_url: impl Into<String>) -> Self {
		let base_url = base_url.into();
		Self {
			base_url: base_url.trim_end_matches('/').to_string(),
			overrides: HashMap::new(),
		}
	}

	/// Build from settings, applying the scheme path override if present
	pub fn from_settings(settings: &Settings) -> Self {
		let endpoints = Self::new(settings.base_url());
		match &settings.scheme_path {
			Some(path) => endpoints.with_override("schemes", path.clone()),
			None => endpoints,
		}
	}

	/// Serve `collection` from a different path segment
	pub fn with_override(mut self, collection: impl Into<String>, path: impl Into<String>) -> Self {
		self.overrides.insert(collection.into(), path.into());
		self
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Absolute URL for a path on the service
	pub fn url(&self, path: &str) -> String {
		format!("{}/{}", self.base_url, path.trim_start_matches('/'))
	}

	/// Path segment used for `T`
	pub fn segment<T: Resource>(&self) -> &str {
		self.overrides
			.get(T::COLLECTION)
			.map(String::as_str)
			.unwrap_or(T::PATH)
	}

	/// `<base>/management/<segment>/`
	pub fn collection<T: Resource>(&self) -> String {
		format!(
			"{}/{}/{}/",
			self.base_url,
			MANAGEMENT_PREFIX,
			self.segment::<T>()
		)
	}

	/// `<base>/management/<segment>/<key>/`, used for reads and partial updates
	pub fn item<T: Resource>(&self, key: &T::Key) -> String {
		format!("{}{}/", self.collection::<T>(), encode_key(key))
	}

	/// `<base>/management/<segment>/<key>`, the delete form without trailing slash
	pub fn item_for_delete<T: Resource>(&self, key: &T::Key) -> String {
		format!("{}{}", self.collection::<T>(), encode_key(key))
	}
}

fn encode_key<K: ResourceKey>(key: &K) -> String {
	encode_segment(&key.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use paperswift_core::{Card, KeyPolicy};
	use rstest::rstest;
	use serde::{Deserialize, Serialize};

	#[derive(Debug, Clone, Serialize, Deserialize)]
	struct Scheme {
		sid: i64,
	}

	impl Resource for Scheme {
		type Key = i64;
		const COLLECTION: &'static str = "schemes";
		const SINGULAR: &'static str = "Scheme";
		const KEY_FIELD: &'static str = "sid";
		const KEY_POLICY: KeyPolicy = KeyPolicy::ClientProvided;
		const PATH: &'static str = "scemes";

		fn key(&self) -> i64 {
			self.sid
		}

		fn card(&self) -> Card {
			Card::new(self.sid.to_string())
		}
	}

	#[rstest]
	fn test_resource_path_is_used_by_default() {
		let endpoints = Endpoints::new("http://localhost:8000");

		assert_eq!(
			endpoints.collection::<Scheme>(),
			"http://localhost:8000/management/scemes/"
		);
		assert_eq!(
			endpoints.item::<Scheme>(&2019),
			"http://localhost:8000/management/scemes/2019/"
		);
		assert_eq!(
			endpoints.item_for_delete::<Scheme>(&2019),
			"http://localhost:8000/management/scemes/2019"
		);
	}

	#[rstest]
	fn test_override_replaces_segment() {
		let endpoints = Endpoints::new("http://localhost:8000").with_override("schemes", "schemes");

		assert_eq!(
			endpoints.collection::<Scheme>(),
			"http://localhost:8000/management/schemes/"
		);
	}

	#[rstest]
	#[case("CS 101", "CS%20101")]
	#[case("A/B", "A%2FB")]
	#[case("CS101", "CS101")]
	#[case("M.TECH?x=1", "M.TECH%3Fx%3D1")]
	#[case("Génie", "G%C3%A9nie")]
	fn test_encode_key(#[case] key: &str, #[case] expected: &str) {
		assert_eq!(encode_key(&key.to_string()), expected);
	}
}
