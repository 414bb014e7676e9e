//! # PaperSwift
//!
//! Administrative console for the PaperSwift academic records service.
//!
//! PaperSwift manages exams, courses, departments, degrees, schemes and
//! teachers held by a remote REST service. Each entity is declared once as
//! a [`Resource`] with a [`FormSchema`]; listing, caching, editing and
//! deleting are generic over that declaration.
//!
//! ## Layers
//!
//! - [`conf`] - layered settings (defaults, TOML file, `.env`, environment)
//! - [`session`] - the session token and its persistence
//! - [`client`] - HTTP transport, per-resource CRUD client, login
//! - [`query`] - keyed cache with in-flight de-duplication
//! - [`forms`] - field schemas and the entity form controller
//! - [`models`] - the six managed entities
//! - [`admin`] - routes, navigation guard, list and detail views
//!
//! ## Feature Flags
//!
//! - `full` (default) - everything below except `testing`
//! - `admin` - the view layer in [`admin`]
//! - `testing` - mock records service and fixtures in [`test`]
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! use paperswift::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example() -> paperswift::Result<()> {
//! let settings = Settings::load(None)?;
//! let session = Arc::new(SessionStore::restore(Arc::new(FilePersistence::in_dir(
//!     &settings.state_dir,
//! )))?);
//! let site = AdminSite::new(HttpClient::from_settings(&settings, session)?);
//!
//! site.login(&Credentials::new("admin", "secret")).await?;
//! let courses = site.binding::<Course>().list_view().await;
//! println!("{:?}", courses);
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "admin")]
pub mod admin;
pub mod client;
pub mod conf;
pub mod core;
pub mod forms;
pub mod models;
pub mod query;
pub mod session;

pub use paperswift_core::{Card, Error, FieldErrors, KeyPolicy, Resource, ResourceKey, Result};
pub use paperswift_forms::FormSchema;

/// The commonly used types in one import
pub mod prelude {
	#[cfg(feature = "admin")]
	pub use paperswift_admin::{
		AdminRoute, AdminSite, DetailView, Guarded, ListView, NavigationGuard, ResourceBinding,
		ResourceKind,
	};
	pub use paperswift_client::{AuthClient, Credentials, HttpClient, ResourceApi, ResourceClient};
	pub use paperswift_conf::Settings;
	pub use paperswift_core::{Error, Resource, Result};
	pub use paperswift_forms::{EntityForm, FieldValue, FormError, FormSchema};
	pub use paperswift_models::{Course, Degree, Department, Exam, Scheme, Teacher};
	pub use paperswift_query::{QueryClient, UseQuery};
	pub use paperswift_session::{FilePersistence, MemoryPersistence, SessionStore, Token};
}
