//! Resource query cache for PaperSwift admin
//!
//! [`QueryClient`] caches remote collections by key, shares one in-flight
//! request among concurrent callers and drops stale entries through an
//! [`InvalidationMap`].
//!
//! ```
//! use paperswift_query::{InvalidationMap, QueryClient, UseQuery};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let client = Arc::new(QueryClient::new(InvalidationMap::new()));
//! let degrees = client.use_query("degrees", || async {
//!     Ok::<_, paperswift_core::Error>(vec!["BTECH".to_string()])
//! });
//!
//! let state = degrees.load().await;
//! assert_eq!(state.data.map(|d| d.len()), Some(1));
//! # }
//! ```

pub mod client;
pub mod invalidation;

pub use client::{QueryClient, QueryHandle, QueryState, UseQuery};
pub use invalidation::InvalidationMap;
