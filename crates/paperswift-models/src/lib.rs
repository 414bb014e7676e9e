//! The academic records managed by PaperSwift admin
//!
//! Each entity is a plain serde struct plus two declarations: its
//! [`Resource`](paperswift_core::Resource) identity (collection, key,
//! references, card) and its [`FormSchema`](paperswift_forms::FormSchema).
//! Everything else is generic.

pub mod course;
pub mod degree;
pub mod department;
pub mod exam;
pub mod scheme;
pub mod teacher;

pub use course::Course;
pub use degree::Degree;
pub use department::Department;
pub use exam::Exam;
pub use scheme::Scheme;
pub use teacher::{GENDERS, Gender, Teacher};

use paperswift_query::InvalidationMap;

/// Invalidation map covering every managed collection
pub fn invalidation_map() -> InvalidationMap {
	InvalidationMap::new()
		.with_resource::<Exam>()
		.with_resource::<Course>()
		.with_resource::<Department>()
		.with_resource::<Degree>()
		.with_resource::<Scheme>()
		.with_resource::<Teacher>()
}
