//! Query cache
//!
//! One entry per query key. The first request for a key starts a fetch;
//! callers arriving while it runs await the same shared future; later callers
//! get the cached value until the key is invalidated. Entries never expire.

use crate::invalidation::InvalidationMap;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use paperswift_core::{Error, Result};
use parking_lot::Mutex;
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

type AnyValue = Arc<dyn Any + Send + Sync>;
type SharedFetch = Shared<BoxFuture<'static, Result<AnyValue>>>;

#[derive(Default)]
struct Entry {
	data: Option<AnyValue>,
	error: Option<Error>,
	in_flight: Option<(u64, SharedFetch)>,
}

/// Snapshot of one query
pub struct QueryState<T> {
	pub data: Option<Arc<T>>,
	pub is_loading: bool,
	pub error: Option<Error>,
}

impl<T> QueryState<T> {
	pub fn idle() -> Self {
		Self {
			data: None,
			is_loading: false,
			error: None,
		}
	}
}

impl<T> Clone for QueryState<T> {
	fn clone(&self) -> Self {
		Self {
			data: self.data.clone(),
			is_loading: self.is_loading,
			error: self.error.clone(),
		}
	}
}

impl<T: std::fmt::Debug> std::fmt::Debug for QueryState<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("QueryState")
			.field("data", &self.data)
			.field("is_loading", &self.is_loading)
			.field("error", &self.error)
			.finish()
	}
}

/// Shared cache of remote collections, keyed by collection name
pub struct QueryClient {
	entries: Mutex<HashMap<String, Entry>>,
	invalidation: InvalidationMap,
	next_id: AtomicU64,
	hits: AtomicU64,
	fetches: AtomicU64,
}

impl QueryClient {
	pub fn new(invalidation: InvalidationMap) -> Self {
		Self {
			entries: Mutex::new(HashMap::new()),
			invalidation,
			next_id: AtomicU64::new(0),
			hits: AtomicU64::new(0),
			fetches: AtomicU64::new(0),
		}
	}

	/// Cached value for `key`, fetching it on first use
	pub async fn fetch<T, F, Fut>(&self, key: &str, fetcher: F) -> Result<Arc<T>>
	where
		T: Send + Sync + 'static,
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<T>> + Send + 'static,
	{
		let (id, shared) = {
			let mut entries = self.entries.lock();
			let entry = entries.entry(key.to_string()).or_default();
			if let Some(data) = &entry.data {
				self.hits.fetch_add(1, Ordering::Relaxed);
				return downcast(key, data.clone());
			}
			match &entry.in_flight {
				Some((id, shared)) => (*id, shared.clone()),
				None => self.start(key, entry, fetcher()),
			}
		};
		self.complete(key, id, shared).await
	}

	/// Fetch `key` again even if cached; joins a fetch already in flight
	pub async fn refetch<T, F, Fut>(&self, key: &str, fetcher: F) -> Result<Arc<T>>
	where
		T: Send + Sync + 'static,
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<T>> + Send + 'static,
	{
		let (id, shared) = {
			let mut entries = self.entries.lock();
			let entry = entries.entry(key.to_string()).or_default();
			match &entry.in_flight {
				Some((id, shared)) => (*id, shared.clone()),
				None => self.start(key, entry, fetcher()),
			}
		};
		self.complete(key, id, shared).await
	}

	fn start<T, Fut>(&self, key: &str, entry: &mut Entry, fut: Fut) -> (u64, SharedFetch)
	where
		T: Send + Sync + 'static,
		Fut: Future<Output = Result<T>> + Send + 'static,
	{
		let id = self.next_id.fetch_add(1, Ordering::Relaxed);
		self.fetches.fetch_add(1, Ordering::Relaxed);
		tracing::debug!(key, id, "starting query fetch");

		let boxed: BoxFuture<'static, Result<AnyValue>> =
			async move { fut.await.map(|value| Arc::new(value) as AnyValue) }.boxed();
		let shared = boxed.shared();
		entry.in_flight = Some((id, shared.clone()));
		(id, shared)
	}

	// A result landing after an invalidation is still stored.
	async fn complete<T: Send + Sync + 'static>(
		&self,
		key: &str,
		id: u64,
		shared: SharedFetch,
	) -> Result<Arc<T>> {
		let result = shared.await;

		let mut entries = self.entries.lock();
		let entry = entries.entry(key.to_string()).or_default();
		if matches!(&entry.in_flight, Some((current, _)) if *current == id) {
			entry.in_flight = None;
		}
		match result {
			Ok(value) => {
				entry.data = Some(value.clone());
				entry.error = None;
				downcast(key, value)
			}
			Err(error) => {
				tracing::warn!(key, error = %error, "query fetch failed");
				entry.error = Some(error.clone());
				Err(error)
			}
		}
	}

	/// Current snapshot without triggering a fetch
	pub fn state<T: Send + Sync + 'static>(&self, key: &str) -> QueryState<T> {
		let entries = self.entries.lock();
		let Some(entry) = entries.get(key) else {
			return QueryState::idle();
		};
		QueryState {
			data: entry
				.data
				.clone()
				.and_then(|data| downcast::<T>(key, data).ok()),
			is_loading: entry.in_flight.is_some(),
			error: entry.error.clone(),
		}
	}

	/// Drop `key` and every key that embeds it
	pub fn invalidate(&self, key: &str) -> Vec<String> {
		let affected = self.invalidation.affected_by(key);
		let mut entries = self.entries.lock();
		for k in &affected {
			entries.remove(k);
		}
		tracing::debug!(key, ?affected, "invalidated queries");
		affected
	}

	pub fn is_cached(&self, key: &str) -> bool {
		self.entries
			.lock()
			.get(key)
			.is_some_and(|entry| entry.data.is_some())
	}

	/// Number of fetches started since creation
	pub fn fetch_count(&self) -> u64 {
		self.fetches.load(Ordering::Relaxed)
	}

	pub fn hit_count(&self) -> u64 {
		self.hits.load(Ordering::Relaxed)
	}
}

impl Default for QueryClient {
	fn default() -> Self {
		Self::new(InvalidationMap::default())
	}
}

fn downcast<T: Send + Sync + 'static>(key: &str, value: AnyValue) -> Result<Arc<T>> {
	value.downcast::<T>().map_err(|_| {
		Error::Decode(format!(
			"Cached value under '{}' is not a {}",
			key,
			std::any::type_name::<T>()
		))
	})
}

/// A query bound to one key and fetcher
pub struct QueryHandle<T> {
	client: Arc<QueryClient>,
	key: String,
	fetcher: Arc<dyn Fn() -> BoxFuture<'static, Result<T>> + Send + Sync>,
}

impl<T> Clone for QueryHandle<T> {
	fn clone(&self) -> Self {
		Self {
			client: self.client.clone(),
			key: self.key.clone(),
			fetcher: self.fetcher.clone(),
		}
	}
}

impl<T: Send + Sync + 'static> QueryHandle<T> {
	pub fn new<F, Fut>(client: Arc<QueryClient>, key: impl Into<String>, fetcher: F) -> Self
	where
		F: Fn() -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<T>> + Send + 'static,
	{
		Self {
			client,
			key: key.into(),
			fetcher: Arc::new(move || fetcher().boxed()),
		}
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	/// Fetch on first use, then serve from cache
	pub async fn load(&self) -> QueryState<T> {
		let fetcher = self.fetcher.clone();
		let _ = self.client.fetch(&self.key, move || fetcher()).await;
		self.state()
	}

	/// Force a new fetch
	pub async fn refetch(&self) -> QueryState<T> {
		let fetcher = self.fetcher.clone();
		let _ = self.client.refetch(&self.key, move || fetcher()).await;
		self.state()
	}

	pub fn state(&self) -> QueryState<T> {
		self.client.state(&self.key)
	}

	/// Invalidate this key and its dependents
	pub fn invalidate(&self) -> Vec<String> {
		self.client.invalidate(&self.key)
	}
}

/// Convenience for building handles off a shared client
pub trait UseQuery {
	fn use_query<T, F, Fut>(&self, key: impl Into<String>, fetcher: F) -> QueryHandle<T>
	where
		T: Send + Sync + 'static,
		F: Fn() -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<T>> + Send + 'static;
}

impl UseQuery for Arc<QueryClient> {
	fn use_query<T, F, Fut>(&self, key: impl Into<String>, fetcher: F) -> QueryHandle<T>
	where
		T: Send + Sync + 'static,
		F: Fn() -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<T>> + Send + 'static,
	{
		QueryHandle::new(self.clone(), key, fetcher)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::*;
	use std::sync::atomic::AtomicUsize;
	use std::time::Duration;

	#[fixture]
	fn client() -> Arc<QueryClient> {
		Arc::new(QueryClient::new(
			InvalidationMap::new().with_references("schemes", &["degrees"]),
		))
	}

	fn counting_fetcher(
		calls: Arc<AtomicUsize>,
		delay: Duration,
	) -> impl Fn() -> BoxFuture<'static, Result<Vec<String>>> + Send + Sync + 'static {
		move || {
			let calls = calls.clone();
			async move {
				calls.fetch_add(1, Ordering::SeqCst);
				tokio::time::sleep(delay).await;
				Ok(vec!["BTECH".to_string()])
			}
			.boxed()
		}
	}

	#[rstest]
	#[tokio::test]
	async fn test_second_load_served_from_cache(client: Arc<QueryClient>) {
		// Arrange
		let calls = Arc::new(AtomicUsize::new(0));
		let query = client.use_query("degrees", counting_fetcher(calls.clone(), Duration::ZERO));

		// Act
		let first = query.load().await;
		let second = query.load().await;

		// Assert
		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert_eq!(first.data.as_deref(), Some(&vec!["BTECH".to_string()]));
		assert_eq!(second.data, first.data);
		assert!(!second.is_loading);
		assert_eq!(client.hit_count(), 1);
	}

	#[rstest]
	#[tokio::test]
	async fn test_concurrent_loads_share_one_fetch(client: Arc<QueryClient>) {
		// Arrange
		let calls = Arc::new(AtomicUsize::new(0));
		let query = client.use_query(
			"degrees",
			counting_fetcher(calls.clone(), Duration::from_millis(50)),
		);

		// Act
		let states = futures::future::join_all((0..5).map(|_| query.load())).await;

		// Assert
		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert_eq!(client.fetch_count(), 1);
		assert!(states.iter().all(|s| s.data.is_some()));
	}

	#[rstest]
	#[tokio::test]
	async fn test_state_reports_loading_while_in_flight(client: Arc<QueryClient>) {
		// Arrange
		let calls = Arc::new(AtomicUsize::new(0));
		let query = client.use_query(
			"degrees",
			counting_fetcher(calls.clone(), Duration::from_millis(100)),
		);
		let background = query.clone();
		let task = tokio::spawn(async move { background.load().await });
		tokio::time::sleep(Duration::from_millis(20)).await;

		// Act
		let during = query.state();
		task.await.unwrap();
		let after = query.state();

		// Assert
		assert!(during.is_loading);
		assert!(during.data.is_none());
		assert!(!after.is_loading);
		assert!(after.data.is_some());
	}

	#[rstest]
	#[tokio::test]
	async fn test_refetch_forces_new_request(client: Arc<QueryClient>) {
		let calls = Arc::new(AtomicUsize::new(0));
		let query = client.use_query("degrees", counting_fetcher(calls.clone(), Duration::ZERO));

		query.load().await;
		query.refetch().await;

		assert_eq!(calls.load(Ordering::SeqCst), 2);
	}

	#[rstest]
	#[tokio::test]
	async fn test_invalidate_drops_dependents(client: Arc<QueryClient>) {
		// Arrange
		let calls = Arc::new(AtomicUsize::new(0));
		let degrees = client.use_query("degrees", counting_fetcher(calls.clone(), Duration::ZERO));
		let schemes = client.use_query("schemes", counting_fetcher(calls.clone(), Duration::ZERO));
		let courses = client.use_query("courses", counting_fetcher(calls.clone(), Duration::ZERO));
		degrees.load().await;
		schemes.load().await;
		courses.load().await;

		// Act
		let affected = client.invalidate("degrees");

		// Assert
		assert_eq!(affected, vec!["degrees", "schemes"]);
		assert!(!client.is_cached("degrees"));
		assert!(!client.is_cached("schemes"));
		assert!(client.is_cached("courses"));
	}

	#[rstest]
	#[tokio::test]
	async fn test_failed_fetch_records_error_and_retries_next_load(client: Arc<QueryClient>) {
		// Arrange
		let calls = Arc::new(AtomicUsize::new(0));
		let counter = calls.clone();
		let query: QueryHandle<Vec<String>> = client.use_query("courses", move || {
			let counter = counter.clone();
			async move {
				counter.fetch_add(1, Ordering::SeqCst);
				Err(Error::Network("connection refused".into()))
			}
		});

		// Act
		let first = query.load().await;
		let second = query.load().await;

		// Assert
		assert!(matches!(first.error, Some(Error::Network(_))));
		assert!(first.data.is_none());
		assert!(second.error.is_some());
		assert_eq!(calls.load(Ordering::SeqCst), 2);
	}

	#[rstest]
	#[tokio::test]
	async fn test_type_mismatch_under_same_key_is_decode_error(client: Arc<QueryClient>) {
		client
			.fetch("degrees", || async { Ok(vec!["BTECH".to_string()]) })
			.await
			.unwrap();

		let result = client.fetch::<Vec<i64>, _, _>("degrees", || async { Ok(vec![1]) }).await;

		assert!(matches!(result, Err(Error::Decode(_))));
	}
}
