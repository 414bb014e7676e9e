//! PaperSwift admin screens
//!
//! Front-end independent view layer: routes and the navigation guard, the
//! generic [`ResourceBinding`] behind every list and form, and the
//! [`AdminSite`] that registers the six managed resources.
//!
//! ```rust,no_run
//! use paperswift_admin::{AdminSite, Guarded};
//! use paperswift_client::{Endpoints, HttpClient};
//! use paperswift_models::Course;
//! use paperswift_session::{MemoryPersistence, SessionStore};
//! use std::sync::Arc;
//!
//! # async fn example() -> paperswift_core::Result<()> {
//! let session = Arc::new(SessionStore::new(Arc::new(MemoryPersistence::new())));
//! let site = AdminSite::new(HttpClient::new(Endpoints::new("http://localhost:8000"), session)?);
//!
//! if let Guarded::Allowed(_) = site.resolve("/courses") {
//!     let view = site.binding::<Course>().list_view().await;
//!     println!("{:?}", view);
//! }
//! # Ok(())
//! # }
//! ```

pub mod binding;
pub mod guard;
pub mod route;
pub mod site;
pub mod toast;
pub mod view;

pub use binding::ResourceBinding;
pub use guard::{Guarded, NavigationGuard};
pub use route::AdminRoute;
pub use site::{AdminSite, LOGGED_OUT, LOGIN_FAILED, LOGIN_SUCCEEDED, MenuItem, ResourceKind};
pub use toast::{RouterNavigator, ToastNotifier};
pub use view::{CardView, DetailView, ListView};
