//! Generic wiring of one resource to its list, detail and form screens

use crate::route::AdminRoute;
use crate::view::{DetailView, ListView};
use paperswift_client::ResourceApi;
use paperswift_core::{ResourceKey, Result};
use paperswift_forms::{
	DELETE_FAILED, EntityForm, FormContext, FormResult, FormSchema, Navigator, Notification,
	Notifier,
};
use paperswift_query::{QueryClient, QueryHandle, QueryState, UseQuery};
use std::sync::Arc;

/// Binds a resource to the shared query cache and the user-facing seams.
///
/// Every entity screen is an instance of this type; nothing here is
/// specific to one entity.
pub struct ResourceBinding<T: FormSchema> {
	api: Arc<dyn ResourceApi<T>>,
	query: Arc<QueryClient>,
	notifier: Arc<dyn Notifier>,
	navigator: Arc<dyn Navigator>,
}

impl<T: FormSchema> Clone for ResourceBinding<T> {
	fn clone(&self) -> Self {
		Self {
			api: self.api.clone(),
			query: self.query.clone(),
			notifier: self.notifier.clone(),
			navigator: self.navigator.clone(),
		}
	}
}

impl<T: FormSchema> ResourceBinding<T> {
	pub fn new(
		api: Arc<dyn ResourceApi<T>>,
		query: Arc<QueryClient>,
		notifier: Arc<dyn Notifier>,
		navigator: Arc<dyn Navigator>,
	) -> Self {
		Self {
			api,
			query,
			notifier,
			navigator,
		}
	}

	pub fn api(&self) -> &Arc<dyn ResourceApi<T>> {
		&self.api
	}

	/// Query over the whole collection, keyed by the collection name
	pub fn collection(&self) -> QueryHandle<Vec<T>> {
		let api = self.api.clone();
		self.query.use_query(T::COLLECTION, move || {
			let api = api.clone();
			async move { api.list().await }
		})
	}

	/// Snapshot of the collection without fetching
	pub fn state(&self) -> QueryState<Vec<T>> {
		self.collection().state()
	}

	/// List screen; fetches the collection on first use
	pub async fn list_view(&self) -> ListView {
		let state = self.collection().load().await;
		ListView::from_state(&state)
	}

	/// List screen for whatever is cached right now
	pub fn current_list_view(&self) -> ListView {
		ListView::from_state(&self.state())
	}

	/// Re-fetch the collection and rebuild the list screen
	pub async fn refresh(&self) -> ListView {
		let state = self.collection().refetch().await;
		ListView::from_state(&state)
	}

	/// Delete straight from a list card.
	///
	/// The caller has already asked for confirmation.
	pub async fn delete_from_list(&self, key: &T::Key) -> Result<ListView> {
		match self.api.remove(key).await {
			Ok(()) => {
				self.invalidate();
				self.notifier
					.notify(Notification::success(format!("{} deleted.", T::SINGULAR)));
				Ok(self.list_view().await)
			}
			Err(error) => {
				tracing::warn!(collection = T::COLLECTION, %key, error = %error, "delete failed");
				self.notifier.notify(Notification::error(DELETE_FAILED));
				Err(error)
			}
		}
	}

	/// Open one record: cached collection first, then a direct fetch
	pub async fn detail_view(&self, key: &T::Key) -> DetailView<T> {
		let state = self.collection().load().await;
		if let Some(records) = &state.data
			&& let Some(record) = records.iter().find(|r| &r.key() == key)
		{
			return DetailView::Found(record.clone());
		}

		tracing::debug!(collection = T::COLLECTION, %key, "record not in list; fetching directly");
		match self.api.get(key).await {
			Ok(record) => DetailView::Found(record),
			Err(error) if error.is_not_found() => DetailView::NotFound {
				key: key.to_string(),
			},
			Err(error) => DetailView::Failed(error.to_string()),
		}
	}

	/// Like [`detail_view`](Self::detail_view) for a key taken from a path
	pub async fn detail_view_raw(&self, raw: &str) -> DetailView<T> {
		match T::Key::parse_key(raw) {
			Some(key) => self.detail_view(&key).await,
			None => DetailView::NotFound {
				key: raw.to_string(),
			},
		}
	}

	/// Collaborators for a form; successful mutations invalidate the cache
	pub fn form_context(&self) -> FormContext<T> {
		let query = self.query.clone();
		FormContext::new(
			self.api.clone(),
			self.notifier.clone(),
			self.navigator.clone(),
		)
		.on_mutated(move || {
			query.invalidate(T::COLLECTION);
		})
	}

	pub fn create_form(&self) -> EntityForm<T> {
		EntityForm::create(self.form_context())
	}

	pub fn edit_form(&self, record: &T) -> FormResult<EntityForm<T>> {
		EntityForm::edit(self.form_context(), record)
	}

	/// Drop this collection and its dependents from the cache
	pub fn invalidate(&self) -> Vec<String> {
		self.query.invalidate(T::COLLECTION)
	}

	pub fn list_route(&self) -> AdminRoute {
		AdminRoute::list(T::COLLECTION)
	}
}
