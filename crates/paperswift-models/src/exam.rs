use chrono::NaiveDate;
use paperswift_core::date::format_date;
use paperswift_core::{Card, KeyPolicy, Resource};
use paperswift_forms::{EntitySchema, FieldSchema, FormSchema};
use serde::{Deserialize, Serialize};

/// An examination sitting for one semester of a scheme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exam {
	pub eid: i64,
	pub sem: i64,
	#[serde(default)]
	pub is_supplementary: bool,
	pub paper_submission_deadline: NaiveDate,
	pub scheme: i64,
}

impl Resource for Exam {
	type Key = i64;
	const COLLECTION: &'static str = "exams";
	const SINGULAR: &'static str = "Exam";
	const KEY_FIELD: &'static str = "eid";
	const KEY_POLICY: KeyPolicy = KeyPolicy::ServerAssigned;
	const REFERENCES: &'static [&'static str] = &["schemes"];

	fn key(&self) -> i64 {
		self.eid
	}

	fn card(&self) -> Card {
		let mut card = Card::new(format!("Semester {} exam", self.sem))
			.with_badge(format!("Scheme {}", self.scheme))
			.with_detail(format!(
				"Deadline: {}",
				format_date(self.paper_submission_deadline)
			));
		if self.is_supplementary {
			card = card.with_badge("Supplementary");
		}
		card
	}
}

impl FormSchema for Exam {
	fn schema() -> EntitySchema {
		EntitySchema::for_resource::<Self>()
			.field(FieldSchema::integer("sem", "Semester").placeholder("Semester"))
			.field(FieldSchema::integer("scheme", "Scheme").placeholder("Scheme"))
			.field(FieldSchema::boolean("is_supplementary", "Supplementary exam"))
			.field(FieldSchema::date(
				"paper_submission_deadline",
				"Submission deadline",
			))
	}
}
