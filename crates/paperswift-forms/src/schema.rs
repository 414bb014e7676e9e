//! Declarative field schemas
//!
//! Each resource describes its form as an ordered list of [`FieldSchema`]s.
//! The controller, the views and the command line all read this one
//! description.

use paperswift_core::{KeyPolicy, Resource};

/// Value type of a field, which decides parsing and the wire representation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
	Text,
	/// Held as text while editing, sent as a JSON number
	Integer,
	Boolean,
	/// Sent as `YYYY-MM-DD`
	Date,
	/// One of a fixed set of `(value, label)` options, sent as the value
	Choice(&'static [(&'static str, &'static str)]),
}

/// Rendering hint for front ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
	TextInput,
	NumberInput,
	UrlInput,
	Textarea,
	Checkbox,
	DatePicker,
	Select,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
	pub name: &'static str,
	pub label: &'static str,
	pub kind: FieldKind,
	pub required: bool,
	pub widget: Widget,
	pub placeholder: Option<&'static str>,
}

impl FieldSchema {
	fn new(name: &'static str, label: &'static str, kind: FieldKind, widget: Widget) -> Self {
		Self {
			name,
			label,
			kind,
			required: true,
			widget,
			placeholder: None,
		}
	}

	pub fn text(name: &'static str, label: &'static str) -> Self {
		Self::new(name, label, FieldKind::Text, Widget::TextInput)
	}

	pub fn integer(name: &'static str, label: &'static str) -> Self {
		Self::new(name, label, FieldKind::Integer, Widget::NumberInput)
	}

	pub fn url(name: &'static str, label: &'static str) -> Self {
		Self::new(name, label, FieldKind::Text, Widget::UrlInput)
	}

	pub fn textarea(name: &'static str, label: &'static str) -> Self {
		Self::new(name, label, FieldKind::Text, Widget::Textarea)
	}

	/// Checkboxes are never "missing"; unchecked is `false`
	pub fn boolean(name: &'static str, label: &'static str) -> Self {
		Self::new(name, label, FieldKind::Boolean, Widget::Checkbox).optional()
	}

	pub fn date(name: &'static str, label: &'static str) -> Self {
		Self::new(name, label, FieldKind::Date, Widget::DatePicker)
	}

	pub fn choice(
		name: &'static str,
		label: &'static str,
		options: &'static [(&'static str, &'static str)],
	) -> Self {
		Self::new(name, label, FieldKind::Choice(options), Widget::Select)
	}

	pub fn optional(mut self) -> Self {
		self.required = false;
		self
	}

	pub fn placeholder(mut self, placeholder: &'static str) -> Self {
		self.placeholder = Some(placeholder);
		self
	}
}

/// Complete form description of one resource.
///
/// Server-assigned keys are not listed; they never appear on a form.
#[derive(Debug, Clone)]
pub struct EntitySchema {
	pub singular: &'static str,
	pub collection: &'static str,
	pub key_field: &'static str,
	pub key_policy: KeyPolicy,
	pub fields: Vec<FieldSchema>,
}

impl EntitySchema {
	/// Start a schema for `T`, copying its identity from the resource contract
	pub fn for_resource<T: Resource>() -> Self {
		Self {
			singular: T::SINGULAR,
			collection: T::COLLECTION,
			key_field: T::KEY_FIELD,
			key_policy: T::KEY_POLICY,
			fields: Vec::new(),
		}
	}

	pub fn field(mut self, field: FieldSchema) -> Self {
		self.fields.push(field);
		self
	}

	pub fn get(&self, name: &str) -> Option<&FieldSchema> {
		self.fields.iter().find(|f| f.name == name)
	}
}

/// A resource that can be edited through a form
pub trait FormSchema: Resource {
	fn schema() -> EntitySchema;
}
