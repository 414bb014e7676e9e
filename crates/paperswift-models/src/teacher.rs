use chrono::NaiveDate;
use paperswift_core::{Card, KeyPolicy, Resource};
use paperswift_forms::{EntitySchema, FieldSchema, FormSchema};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
	#[serde(rename = "M")]
	Male,
	#[serde(rename = "F")]
	Female,
}

impl fmt::Display for Gender {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Male => f.write_str("Male"),
			Self::Female => f.write_str("Female"),
		}
	}
}

/// Options for the gender select, as `(wire value, label)`
pub const GENDERS: &[(&str, &str)] = &[("M", "Male"), ("F", "Female")];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
	pub id: i64,
	pub name: String,
	#[serde(default)]
	pub is_external: bool,
	pub gender: Gender,
	pub dob: NaiveDate,
	pub mobile_no: String,
	#[serde(default)]
	pub address: String,
	pub designation: String,
	#[serde(default)]
	pub qualification: String,
	#[serde(default)]
	pub bank_account_no: String,
	#[serde(default)]
	pub bank_ifsc: String,
	#[serde(default)]
	pub bank_name: String,
	#[serde(default)]
	pub pan_no: String,
	/// Login account linked to this teacher
	#[serde(default)]
	pub user: Option<i64>,
}

impl Resource for Teacher {
	type Key = i64;
	const COLLECTION: &'static str = "teachers";
	const SINGULAR: &'static str = "Teacher";
	const KEY_FIELD: &'static str = "id";
	const KEY_POLICY: KeyPolicy = KeyPolicy::ServerAssigned;

	fn key(&self) -> i64 {
		self.id
	}

	fn card(&self) -> Card {
		Card::new(&self.name)
			.with_badge(&self.designation)
			.with_detail(&self.mobile_no)
	}
}

impl FormSchema for Teacher {
	fn schema() -> EntitySchema {
		EntitySchema::for_resource::<Self>()
			.field(FieldSchema::text("name", "Name").placeholder("Teacher name"))
			.field(FieldSchema::choice("gender", "Gender", GENDERS).placeholder("Select a gender"))
			.field(FieldSchema::boolean("is_external", "Is External?"))
			.field(FieldSchema::text("designation", "Designation").placeholder("Designation"))
			.field(
				FieldSchema::text("qualification", "Qualification")
					.optional()
					.placeholder("Qualification"),
			)
			.field(FieldSchema::text("mobile_no", "Mobile number").placeholder("Mobile number"))
			.field(FieldSchema::textarea("address", "Address").optional().placeholder("Address"))
			.field(FieldSchema::text("pan_no", "Pan number").optional().placeholder("Pan number"))
			.field(FieldSchema::date("dob", "Date of birth"))
			.field(
				FieldSchema::text("bank_account_no", "Bank Account Number")
					.optional()
					.placeholder("Bank Account Number"),
			)
			.field(
				FieldSchema::text("bank_ifsc", "Bank IFSC Code")
					.optional()
					.placeholder("IFSC Code"),
			)
			.field(FieldSchema::text("bank_name", "Bank Name").optional().placeholder("Bank name"))
			.field(FieldSchema::integer("user", "User").optional().placeholder("User id"))
	}
}
