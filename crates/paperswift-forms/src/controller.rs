//! Entity form controller
//!
//! Drives one create or edit form for a resource: holds field state,
//! validates, submits through a [`ResourceApi`], and performs the delete
//! confirmation. Every operation that reaches the network produces exactly
//! one notification, and at most one navigation.

use crate::notify::{DELETE_FAILED, Navigator, Notification, Notifier, SUBMIT_FAILED};
use crate::schema::{EntitySchema, FieldKind, FormSchema};
use crate::value::{FieldValue, clean};
use paperswift_client::{Payload, ResourceApi};
use paperswift_core::{Error, FieldErrors, Resource};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Form errors
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
	#[error("Validation failed: {0}")]
	Validation(FieldErrors),

	/// Another submit or delete on this form has not finished
	#[error("A request from this form is already in progress")]
	Busy,

	#[error("Field '{0}' cannot be changed on an existing record")]
	ReadOnlyField(String),

	#[error("Unknown field '{0}'")]
	UnknownField(String),

	#[error("Invalid value for {field}: {message}")]
	InvalidInput { field: String, message: String },

	#[error("Delete was not confirmed")]
	DeleteNotConfirmed,

	#[error("Nothing to delete on a create form")]
	DeleteInCreateMode,

	#[error(transparent)]
	Request(#[from] Error),
}

pub type FormResult<T> = Result<T, FormError>;

/// Whether the form creates a new record or edits an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode<K> {
	Create,
	/// Updates and deletes address the key the record was loaded with
	Edit { original_key: K },
}

/// Collaborators a form needs; cheap to clone
pub struct FormContext<T: Resource> {
	pub api: Arc<dyn ResourceApi<T>>,
	pub notifier: Arc<dyn Notifier>,
	pub navigator: Arc<dyn Navigator>,
	/// Called after every successful mutation, before notifying
	pub on_mutated: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl<T: Resource> Clone for FormContext<T> {
	fn clone(&self) -> Self {
		Self {
			api: self.api.clone(),
			notifier: self.notifier.clone(),
			navigator: self.navigator.clone(),
			on_mutated: self.on_mutated.clone(),
		}
	}
}

impl<T: Resource> FormContext<T> {
	pub fn new(
		api: Arc<dyn ResourceApi<T>>,
		notifier: Arc<dyn Notifier>,
		navigator: Arc<dyn Navigator>,
	) -> Self {
		Self {
			api,
			notifier,
			navigator,
			on_mutated: None,
		}
	}

	pub fn on_mutated(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
		self.on_mutated = Some(Arc::new(hook));
		self
	}
}

struct FormState {
	values: HashMap<&'static str, FieldValue>,
	errors: FieldErrors,
	delete_pending: bool,
}

/// Marks the form busy for as long as it lives
struct BusyGuard<'a> {
	flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
	fn acquire(flag: &'a AtomicBool) -> Option<Self> {
		flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
			.ok()
			.map(|_| Self { flag })
	}
}

impl Drop for BusyGuard<'_> {
	fn drop(&mut self) {
		self.flag.store(false, Ordering::Release);
	}
}

pub struct EntityForm<T: FormSchema> {
	schema: EntitySchema,
	mode: FormMode<T::Key>,
	/// Values the form was initialized with; edit payloads are diffed against these
	initial: HashMap<&'static str, FieldValue>,
	state: Mutex<FormState>,
	busy: AtomicBool,
	ctx: FormContext<T>,
}

impl<T: FormSchema> EntityForm<T> {
	/// Blank form for a new record
	pub fn create(ctx: FormContext<T>) -> Self {
		let schema = T::schema();
		let initial = initial_values(&schema, None);
		Self::build(schema, FormMode::Create, initial, ctx)
	}

	/// Form pre-filled from an existing record
	pub fn edit(ctx: FormContext<T>, record: &T) -> FormResult<Self> {
		let schema = T::schema();
		let json = serde_json::to_value(record)
			.map_err(|e| Error::Decode(format!("Failed to read {}: {}", T::SINGULAR, e)))?;
		let initial = initial_values(&schema, Some(&json));
		let mode = FormMode::Edit {
			original_key: record.key(),
		};
		Ok(Self::build(schema, mode, initial, ctx))
	}

	fn build(
		schema: EntitySchema,
		mode: FormMode<T::Key>,
		initial: HashMap<&'static str, FieldValue>,
		ctx: FormContext<T>,
	) -> Self {
		Self {
			schema,
			mode,
			state: Mutex::new(FormState {
				values: initial.clone(),
				errors: FieldErrors::new(),
				delete_pending: false,
			}),
			initial,
			busy: AtomicBool::new(false),
			ctx,
		}
	}

	/// Restore the initial values and clear errors. Idempotent.
	pub fn reset(&self) {
		let mut state = self.state.lock();
		state.values = self.initial.clone();
		state.errors = FieldErrors::new();
		state.delete_pending = false;
	}

	pub fn schema(&self) -> &EntitySchema {
		&self.schema
	}

	pub fn mode(&self) -> &FormMode<T::Key> {
		&self.mode
	}

	pub fn is_edit(&self) -> bool {
		matches!(self.mode, FormMode::Edit { .. })
	}

	/// "Edit Course" / "Create Course"
	pub fn title(&self) -> String {
		if self.is_edit() {
			format!("Edit {}", self.schema.singular)
		} else {
			format!("Create {}", self.schema.singular)
		}
	}

	pub fn description(&self) -> String {
		let noun = self.schema.singular.to_lowercase();
		if self.is_edit() {
			format!("Edit the {}", noun)
		} else {
			format!("Add a new {}", noun)
		}
	}

	pub fn action_label(&self) -> &'static str {
		if self.is_edit() { "Save changes" } else { "Create" }
	}

	/// Whether `name` may be edited in the current mode
	pub fn is_read_only(&self, name: &str) -> bool {
		self.is_edit() && name == self.schema.key_field
	}

	/// Current values in schema order
	pub fn values(&self) -> Vec<(&'static str, FieldValue)> {
		let state = self.state.lock();
		self.schema
			.fields
			.iter()
			.filter_map(|f| state.values.get(f.name).map(|v| (f.name, v.clone())))
			.collect()
	}

	pub fn value(&self, name: &str) -> Option<FieldValue> {
		self.state.lock().values.get(name).cloned()
	}

	/// Errors from the last validation
	pub fn errors(&self) -> FieldErrors {
		self.state.lock().errors.clone()
	}

	pub fn is_busy(&self) -> bool {
		self.busy.load(Ordering::Acquire)
	}

	pub fn is_delete_pending(&self) -> bool {
		self.state.lock().delete_pending
	}

	/// Replace one field's value
	pub fn set_field(&self, name: &str, value: FieldValue) -> FormResult<()> {
		let field = self
			.schema
			.get(name)
			.ok_or_else(|| FormError::UnknownField(name.to_string()))?;
		if self.is_read_only(name) {
			return Err(FormError::ReadOnlyField(name.to_string()));
		}
		let matches_kind = matches!(
			(field.kind, &value),
			(FieldKind::Boolean, FieldValue::Bool(_))
				| (FieldKind::Date, FieldValue::Date(_))
				| (
					FieldKind::Text | FieldKind::Integer | FieldKind::Choice(_),
					FieldValue::Text(_)
				)
		);
		if !matches_kind {
			return Err(FormError::InvalidInput {
				field: name.to_string(),
				message: "Value does not match the field type".to_string(),
			});
		}
		self.state.lock().values.insert(field.name, value);
		Ok(())
	}

	/// Parse raw text for a field and set it
	pub fn set_input(&self, name: &str, raw: &str) -> FormResult<()> {
		let field = self
			.schema
			.get(name)
			.ok_or_else(|| FormError::UnknownField(name.to_string()))?;
		let value = FieldValue::parse(field.kind, raw).map_err(|message| FormError::InvalidInput {
			field: name.to_string(),
			message,
		})?;
		self.set_field(name, value)
	}

	/// Check presence and types of every field, recording the errors
	pub fn validate(&self) -> FormResult<()> {
		self.payload().map(|_| ())
	}

	// Full payload on create; only changed fields on edit.
	fn payload(&self) -> FormResult<Payload> {
		let mut state = self.state.lock();
		let mut errors = FieldErrors::new();
		let mut payload = Payload::new();

		for field in &self.schema.fields {
			let value = state
				.values
				.get(field.name)
				.cloned()
				.unwrap_or_else(|| FieldValue::empty(field.kind));
			match clean(field, &value) {
				Ok(json) => {
					let changed = self.initial.get(field.name) != Some(&value);
					let include = match self.mode {
						FormMode::Create => true,
						FormMode::Edit { .. } => changed && !self.is_read_only(field.name),
					};
					if include {
						payload.insert(field.name.to_string(), json);
					}
				}
				Err(message) => errors.add(field.name, message),
			}
		}

		state.errors = errors.clone();
		if errors.is_empty() {
			Ok(payload)
		} else {
			Err(FormError::Validation(errors))
		}
	}

	/// Validate and send the form.
	///
	/// Creates in create mode, partially updates in edit mode. A second call
	/// while one is outstanding fails with [`FormError::Busy`].
	pub async fn submit(&self) -> FormResult<T> {
		let _guard = BusyGuard::acquire(&self.busy).ok_or(FormError::Busy)?;
		let payload = self.payload()?;

		let (result, verb) = match &self.mode {
			FormMode::Create => (self.ctx.api.create(payload).await, "created"),
			FormMode::Edit { original_key } => {
				(self.ctx.api.update(original_key, payload).await, "updated")
			}
		};

		match result {
			Ok(record) => {
				self.after_mutation();
				self.ctx
					.notifier
					.notify(Notification::success(format!("{} {}", self.schema.singular, verb)));
				self.ctx.navigator.navigate(&self.collection_path());
				Ok(record)
			}
			Err(error) => {
				tracing::warn!(
					collection = self.schema.collection,
					error = %error,
					"submit failed"
				);
				self.ctx.notifier.notify(Notification::error(SUBMIT_FAILED));
				Err(FormError::Request(error))
			}
		}
	}

	/// First stage of delete: open the confirmation
	pub fn request_delete(&self) -> FormResult<()> {
		if !self.is_edit() {
			return Err(FormError::DeleteInCreateMode);
		}
		self.state.lock().delete_pending = true;
		Ok(())
	}

	pub fn cancel_delete(&self) {
		self.state.lock().delete_pending = false;
	}

	/// Second stage of delete: remove the record if confirmation is open
	pub async fn confirm_delete(&self) -> FormResult<()> {
		let FormMode::Edit { original_key } = &self.mode else {
			return Err(FormError::DeleteInCreateMode);
		};
		let _guard = BusyGuard::acquire(&self.busy).ok_or(FormError::Busy)?;
		{
			let mut state = self.state.lock();
			if !state.delete_pending {
				return Err(FormError::DeleteNotConfirmed);
			}
			state.delete_pending = false;
		}

		match self.ctx.api.remove(original_key).await {
			Ok(()) => {
				self.after_mutation();
				self.ctx.navigator.navigate(&self.collection_path());
				self.ctx
					.notifier
					.notify(Notification::success(format!("{} deleted.", self.schema.singular)));
				Ok(())
			}
			Err(error) => {
				tracing::warn!(
					collection = self.schema.collection,
					key = %original_key,
					error = %error,
					"delete failed"
				);
				self.ctx.notifier.notify(Notification::error(DELETE_FAILED));
				Err(FormError::Request(error))
			}
		}
	}

	fn after_mutation(&self) {
		if let Some(hook) = &self.ctx.on_mutated {
			hook();
		}
	}

	fn collection_path(&self) -> String {
		format!("/{}", self.schema.collection)
	}
}

fn initial_values(
	schema: &EntitySchema,
	record: Option<&serde_json::Value>,
) -> HashMap<&'static str, FieldValue> {
	schema
		.fields
		.iter()
		.map(|field| {
			let value = match record {
				Some(record) => FieldValue::from_json(field.kind, record.get(field.name)),
				None => FieldValue::empty(field.kind),
			};
			(field.name, value)
		})
		.collect()
}
