use paperswift_core::{Card, KeyPolicy, Resource};
use paperswift_forms::{EntitySchema, FieldSchema, FormSchema};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
	pub code: String,
	pub name: String,
	/// Teacher id of the head of department
	pub hod: Option<i64>,
}

impl Resource for Department {
	type Key = String;
	const COLLECTION: &'static str = "departments";
	const SINGULAR: &'static str = "Department";
	const KEY_FIELD: &'static str = "code";
	const KEY_POLICY: KeyPolicy = KeyPolicy::ClientProvided;
	const REFERENCES: &'static [&'static str] = &["teachers"];

	fn key(&self) -> String {
		self.code.clone()
	}

	fn card(&self) -> Card {
		let card = Card::new(&self.name).with_badge(&self.code);
		match self.hod {
			Some(hod) => card.with_detail(format!("HOD: {}", hod)),
			None => card,
		}
	}
}

impl FormSchema for Department {
	fn schema() -> EntitySchema {
		EntitySchema::for_resource::<Self>()
			.field(FieldSchema::text("name", "Name").placeholder("Department name"))
			.field(FieldSchema::text("code", "Code").placeholder("Department Code"))
			.field(
				FieldSchema::integer("hod", "Head of department")
					.optional()
					.placeholder("hod"),
			)
	}
}
