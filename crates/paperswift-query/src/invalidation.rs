//! Which cached collections go stale when another one changes

use paperswift_core::Resource;
use std::collections::{BTreeSet, HashMap};

/// Maps a collection to the collections that embed its keys.
///
/// # Examples
///
/// ```
/// use paperswift_query::InvalidationMap;
///
/// let map = InvalidationMap::new()
///     .with_references("schemes", &["degrees"])
///     .with_references("courses", &["departments", "schemes"]);
///
/// assert_eq!(map.affected_by("degrees"), vec!["degrees", "schemes"]);
/// assert_eq!(map.affected_by("courses"), vec!["courses"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InvalidationMap {
	dependents: HashMap<String, BTreeSet<String>>,
}

impl InvalidationMap {
	pub fn new() -> Self {
		Self::default()
	}

	/// Declare that `collection` embeds keys of each of `references`
	pub fn with_references(mut self, collection: &str, references: &[&str]) -> Self {
		for referenced in references {
			self.dependents
				.entry((*referenced).to_string())
				.or_default()
				.insert(collection.to_string());
		}
		self
	}

	/// Register a resource's declared references
	pub fn with_resource<T: Resource>(self) -> Self {
		self.with_references(T::COLLECTION, T::REFERENCES)
	}

	/// The mutated collection followed by its direct dependents, sorted
	pub fn affected_by(&self, collection: &str) -> Vec<String> {
		let mut affected = vec![collection.to_string()];
		if let Some(dependents) = self.dependents.get(collection) {
			affected.extend(dependents.iter().filter(|d| *d != collection).cloned());
		}
		affected
	}
}
