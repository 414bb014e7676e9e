use paperswift_core::{Card, KeyPolicy, Resource};
use paperswift_forms::{EntitySchema, FieldSchema, FormSchema};
use serde::{Deserialize, Serialize};

/// A curriculum scheme of a degree, usually named after its starting year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheme {
	pub sid: i64,
	pub degree: String,
	pub year: i64,
	#[serde(default)]
	pub guidelines_doc_url: String,
}

impl Resource for Scheme {
	type Key = i64;
	const COLLECTION: &'static str = "schemes";
	const SINGULAR: &'static str = "Scheme";
	const KEY_FIELD: &'static str = "sid";
	const KEY_POLICY: KeyPolicy = KeyPolicy::ClientProvided;
	// The records service publishes schemes under this misspelt segment.
	const PATH: &'static str = "scemes";
	const REFERENCES: &'static [&'static str] = &["degrees"];

	fn key(&self) -> i64 {
		self.sid
	}

	fn card(&self) -> Card {
		Card::new(format!("Scheme {}", self.sid))
			.with_badge(&self.degree)
			.with_detail(format!("Year: {}", self.year))
			.with_link(&self.guidelines_doc_url)
	}
}

impl FormSchema for Scheme {
	fn schema() -> EntitySchema {
		EntitySchema::for_resource::<Self>()
			.field(FieldSchema::integer("sid", "Scheme id").placeholder("Scheme id"))
			.field(FieldSchema::integer("year", "Year").placeholder("Year"))
			.field(FieldSchema::text("degree", "Degree").placeholder("Degree"))
			.field(
				FieldSchema::url("guidelines_doc_url", "Guidelines Document URL")
					.optional()
					.placeholder("Document URL"),
			)
	}
}
