//! Routes, navigation guard, resource bindings and the admin site.
//!
//! # Examples
//!
//! ```rust
//! use paperswift::admin::AdminRoute;
//!
//! assert_eq!(AdminRoute::parse("/courses/new"), AdminRoute::create("courses"));
//! ```

pub use paperswift_admin::*;
