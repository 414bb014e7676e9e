//! Generic CRUD client for managed collections

use crate::transport::HttpClient;
use async_trait::async_trait;
use paperswift_core::{KeyPolicy, Resource, Result};
use serde_json::Value;
use std::marker::PhantomData;

/// JSON object sent on create and update
pub type Payload = serde_json::Map<String, Value>;

/// Remote operations on one collection.
///
/// The form controller and views depend on this trait rather than on
/// [`ResourceClient`] so they can be driven without a live service.
#[async_trait]
pub trait ResourceApi<T: Resource>: Send + Sync {
	async fn list(&self) -> Result<Vec<T>>;

	async fn get(&self, key: &T::Key) -> Result<T>;

	async fn create(&self, payload: Payload) -> Result<T>;

	/// Partial update: only the fields in `payload` change
	async fn update(&self, key: &T::Key, payload: Payload) -> Result<T>;

	async fn remove(&self, key: &T::Key) -> Result<()>;
}

/// [`ResourceApi`] over HTTP.
///
/// | Operation | Request |
/// |-----------|---------|
/// | `list` | `GET /management/<path>/` |
/// | `get` | `GET /management/<path>/<key>/` |
/// | `create` | `POST /management/<path>/` |
/// | `update` | `PATCH /management/<path>/<key>/` |
/// | `remove` | `DELETE /management/<path>/<key>` |
pub struct ResourceClient<T: Resource> {
	http: HttpClient,
	_marker: PhantomData<fn() -> T>,
}

impl<T: Resource> ResourceClient<T> {
	pub fn new(http: HttpClient) -> Self {
		Self {
			http,
			_marker: PhantomData,
		}
	}

	/// Create from a typed record.
	///
	/// For server-assigned keys the key field is dropped from the payload.
	pub async fn create_record(&self, record: &T) -> Result<T> {
		let payload = record_payload(record)?;
		self.create(payload).await
	}
}

impl<T: Resource> Clone for ResourceClient<T> {
	fn clone(&self) -> Self {
		Self::new(self.http.clone())
	}
}

/// Serialize a record into a create payload, honouring its key policy
pub fn record_payload<T: Resource>(record: &T) -> Result<Payload> {
	let value = serde_json::to_value(record)
		.map_err(|e| paperswift_core::Error::Decode(format!("Failed to encode {}: {}", T::SINGULAR, e)))?;
	let Value::Object(mut map) = value else {
		return Err(paperswift_core::Error::Decode(format!(
			"{} did not encode to an object",
			T::SINGULAR
		)));
	};
	if T::KEY_POLICY == KeyPolicy::ServerAssigned {
		map.remove(T::KEY_FIELD);
	}
	Ok(map)
}

#[async_trait]
impl<T: Resource> ResourceApi<T> for ResourceClient<T> {
	async fn list(&self) -> Result<Vec<T>> {
		let url = self.http.endpoints().collection::<T>();
		self.http.request(reqwest::Method::GET, &url, None).await
	}

	async fn get(&self, key: &T::Key) -> Result<T> {
		let url = self.http.endpoints().item::<T>(key);
		self.http.request(reqwest::Method::GET, &url, None).await
	}

	async fn create(&self, payload: Payload) -> Result<T> {
		let url = self.http.endpoints().collection::<T>();
		let created: T = self
			.http
			.request(reqwest::Method::POST, &url, Some(Value::Object(payload)))
			.await?;
		tracing::info!(collection = T::COLLECTION, key = %created.key(), "created record");
		Ok(created)
	}

	async fn update(&self, key: &T::Key, payload: Payload) -> Result<T> {
		let url = self.http.endpoints().item::<T>(key);
		let fields: Vec<&str> = payload.keys().map(String::as_str).collect();
		tracing::info!(collection = T::COLLECTION, %key, ?fields, "updating record");
		self.http
			.request(reqwest::Method::PATCH, &url, Some(Value::Object(payload)))
			.await
	}

	async fn remove(&self, key: &T::Key) -> Result<()> {
		let url = self.http.endpoints().item_for_delete::<T>(key);
		self.http
			.request_empty(reqwest::Method::DELETE, &url, None)
			.await?;
		tracing::info!(collection = T::COLLECTION, %key, "removed record");
		Ok(())
	}
}
