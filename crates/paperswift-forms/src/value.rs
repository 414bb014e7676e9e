//! Editable field values and their conversion to and from JSON

use crate::schema::{FieldKind, FieldSchema};
use chrono::NaiveDate;
use paperswift_core::date::{format_date, parse_date};
use serde_json::Value;
use std::fmt;

/// The editing state of one field.
///
/// Integers and choices are held as the text the user sees; dates as an
/// optional calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
	Text(String),
	Bool(bool),
	Date(Option<NaiveDate>),
}

impl FieldValue {
	/// Blank value for a field kind
	pub fn empty(kind: FieldKind) -> Self {
		match kind {
			FieldKind::Boolean => Self::Bool(false),
			FieldKind::Date => Self::Date(None),
			FieldKind::Text | FieldKind::Integer | FieldKind::Choice(_) => Self::Text(String::new()),
		}
	}

	/// Editing value for a field read from a record.
	///
	/// Missing or null values become blank.
	pub fn from_json(kind: FieldKind, value: Option<&Value>) -> Self {
		let Some(value) = value.filter(|v| !v.is_null()) else {
			return Self::empty(kind);
		};
		match kind {
			FieldKind::Boolean => Self::Bool(value.as_bool().unwrap_or(false)),
			FieldKind::Date => Self::Date(value.as_str().and_then(parse_date)),
			FieldKind::Text | FieldKind::Integer | FieldKind::Choice(_) => match value {
				Value::String(s) => Self::Text(s.clone()),
				other => Self::Text(other.to_string()),
			},
		}
	}

	/// Parse raw user input for a field kind
	pub fn parse(kind: FieldKind, raw: &str) -> Result<Self, String> {
		match kind {
			FieldKind::Boolean => match raw.trim().to_lowercase().as_str() {
				"true" | "yes" | "y" | "1" | "on" => Ok(Self::Bool(true)),
				"false" | "no" | "n" | "0" | "off" | "" => Ok(Self::Bool(false)),
				_ => Err("Enter yes or no".to_string()),
			},
			FieldKind::Date if raw.trim().is_empty() => Ok(Self::Date(None)),
			FieldKind::Date => parse_date(raw)
				.map(|d| Self::Date(Some(d)))
				.ok_or_else(|| "Enter a valid date".to_string()),
			FieldKind::Text | FieldKind::Integer | FieldKind::Choice(_) => {
				Ok(Self::Text(raw.to_string()))
			}
		}
	}

	pub fn is_blank(&self) -> bool {
		match self {
			Self::Text(s) => s.trim().is_empty(),
			Self::Bool(_) => false,
			Self::Date(d) => d.is_none(),
		}
	}
}

impl fmt::Display for FieldValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Text(s) => f.write_str(s),
			Self::Bool(b) => write!(f, "{}", if *b { "yes" } else { "no" }),
			Self::Date(Some(d)) => f.write_str(&format_date(*d)),
			Self::Date(None) => Ok(()),
		}
	}
}

/// Validate a field and convert it to its wire value.
///
/// Blank optional fields yield `Null` for integers and dates and `""` for text.
pub fn clean(field: &FieldSchema, value: &FieldValue) -> Result<Value, String> {
	if value.is_blank() {
		if field.required {
			return Err("This field is required".to_string());
		}
		return Ok(match field.kind {
			FieldKind::Integer | FieldKind::Date => Value::Null,
			_ => Value::String(String::new()),
		});
	}

	match (field.kind, value) {
		(FieldKind::Text, FieldValue::Text(s)) => Ok(Value::String(s.trim().to_string())),
		(FieldKind::Integer, FieldValue::Text(s)) => s
			.trim()
			.parse::<i64>()
			.map(|n| Value::Number(n.into()))
			.map_err(|_| "Enter a whole number".to_string()),
		(FieldKind::Choice(options), FieldValue::Text(s)) => {
			let s = s.trim();
			options
				.iter()
				.find(|(value, _)| *value == s)
				.map(|(value, _)| Value::String((*value).to_string()))
				.ok_or_else(|| {
					let allowed: Vec<&str> = options.iter().map(|(v, _)| *v).collect();
					format!("Select one of: {}", allowed.join(", "))
				})
		}
		(FieldKind::Boolean, FieldValue::Bool(b)) => Ok(Value::Bool(*b)),
		(FieldKind::Date, FieldValue::Date(Some(d))) => Ok(Value::String(format_date(*d))),
		_ => Err("Value does not match the field type".to_string()),
	}
}
