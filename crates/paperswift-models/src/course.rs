use paperswift_core::{Card, KeyPolicy, Resource};
use paperswift_forms::{EntitySchema, FieldSchema, FormSchema};
use serde::{Deserialize, Serialize};

/// A course taught by a department under a scheme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
	pub code: String,
	pub name: String,
	pub department: String,
	pub sem: i64,
	pub scheme: i64,
	#[serde(default)]
	pub syllabus_doc_url: String,
}

impl Resource for Course {
	type Key = String;
	const COLLECTION: &'static str = "courses";
	const SINGULAR: &'static str = "Course";
	const KEY_FIELD: &'static str = "code";
	const KEY_POLICY: KeyPolicy = KeyPolicy::ClientProvided;
	const REFERENCES: &'static [&'static str] = &["departments", "schemes"];

	fn key(&self) -> String {
		self.code.clone()
	}

	fn card(&self) -> Card {
		Card::new(&self.name)
			.with_badge(&self.department)
			.with_badge(&self.code)
			.with_detail(format!("Sem: {}", self.sem))
			.with_detail(format!("Scheme {}", self.scheme))
			.with_link(&self.syllabus_doc_url)
	}
}

impl FormSchema for Course {
	fn schema() -> EntitySchema {
		EntitySchema::for_resource::<Self>()
			.field(FieldSchema::text("name", "Name").placeholder("Course name"))
			.field(FieldSchema::integer("sem", "Semester").placeholder("Semester"))
			.field(FieldSchema::integer("scheme", "Scheme").placeholder("Scheme"))
			.field(FieldSchema::text("department", "Department").placeholder("Department"))
			.field(FieldSchema::text("code", "Code").placeholder("Course Code"))
			.field(
				FieldSchema::url("syllabus_doc_url", "Syllabus Document URL")
					.optional()
					.placeholder("Document URL"),
			)
	}
}
