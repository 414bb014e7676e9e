//! REST client for the PaperSwift records service
//!
//! Every request carries `Authorization: Token <key>` from the shared
//! [`paperswift_session::SessionStore`]. Failures map onto
//! [`paperswift_core::Error`]; nothing is retried.
//!
//! ```no_run
//! use paperswift_client::{Endpoints, HttpClient, ResourceApi, ResourceClient};
//! # use paperswift_core::{Card, KeyPolicy, Resource};
//! # use paperswift_session::{MemoryPersistence, SessionStore};
//! # use std::sync::Arc;
//! # #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
//! # struct Degree { code: String, name: String }
//! # impl Resource for Degree {
//! #     type Key = String;
//! #     const COLLECTION: &'static str = "degrees";
//! #     const SINGULAR: &'static str = "Degree";
//! #     const KEY_FIELD: &'static str = "code";
//! #     const KEY_POLICY: KeyPolicy = KeyPolicy::ClientProvided;
//! #     fn key(&self) -> String { self.code.clone() }
//! #     fn card(&self) -> Card { Card::new(&self.name) }
//! # }
//! # async fn run() -> paperswift_core::Result<()> {
//! let session = Arc::new(SessionStore::new(Arc::new(MemoryPersistence::new())));
//! let http = HttpClient::new(Endpoints::new("http://localhost:8000"), session)?;
//! let degrees = ResourceClient::<Degree>::new(http).list().await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod endpoints;
pub mod resource;
pub mod transport;

pub use auth::{AuthClient, Credentials, User};
pub use endpoints::Endpoints;
pub use resource::{Payload, ResourceApi, ResourceClient, record_payload};
pub use transport::HttpClient;
