use paperswift_core::{Card, KeyPolicy, Resource};
use paperswift_forms::{EntitySchema, FieldSchema, FormSchema};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Degree {
	pub code: String,
	pub name: String,
}

impl Resource for Degree {
	type Key = String;
	const COLLECTION: &'static str = "degrees";
	const SINGULAR: &'static str = "Degree";
	const KEY_FIELD: &'static str = "code";
	const KEY_POLICY: KeyPolicy = KeyPolicy::ClientProvided;

	fn key(&self) -> String {
		self.code.clone()
	}

	fn card(&self) -> Card {
		Card::new(&self.name).with_badge(&self.code)
	}
}

impl FormSchema for Degree {
	fn schema() -> EntitySchema {
		EntitySchema::for_resource::<Self>()
			.field(FieldSchema::text("name", "Name").placeholder("Degree name"))
			.field(FieldSchema::text("code", "Code").placeholder("Degree Code"))
	}
}
