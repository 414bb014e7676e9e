//! View models produced by a resource binding

use crate::route::AdminRoute;
use paperswift_core::{Card, Resource};
use paperswift_query::QueryState;

/// One record on a list screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
	pub key: String,
	pub card: Card,
	pub edit_route: AdminRoute,
}

impl CardView {
	pub fn from_record<T: Resource>(record: &T) -> Self {
		let key = record.key();
		Self {
			key: key.to_string(),
			card: record.card(),
			edit_route: AdminRoute::edit(T::COLLECTION, key),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
	Loading,
	/// The collection could not be fetched
	Failed(String),
	Empty {
		placeholder: String,
		action_label: String,
		create_route: AdminRoute,
	},
	Populated {
		/// e.g. "Courses (3)"
		title: String,
		count: usize,
		add_label: String,
		create_route: AdminRoute,
		cards: Vec<CardView>,
	},
}

impl ListView {
	/// Build the list screen for a query state
	pub fn from_state<T: Resource>(state: &QueryState<Vec<T>>) -> Self {
		if let Some(records) = &state.data {
			return Self::from_records(records);
		}
		match &state.error {
			Some(error) => Self::Failed(error.to_string()),
			None => Self::Loading,
		}
	}

	pub fn from_records<T: Resource>(records: &[T]) -> Self {
		let create_route = AdminRoute::create(T::COLLECTION);
		if records.is_empty() {
			return Self::Empty {
				placeholder: format!("There are no {} yet.", T::plural().to_lowercase()),
				action_label: format!("Create New {}", T::SINGULAR),
				create_route,
			};
		}
		Self::Populated {
			title: format!("{} ({})", T::plural(), records.len()),
			count: records.len(),
			add_label: format!("Add New {}", T::SINGULAR),
			create_route,
			cards: records.iter().map(CardView::from_record).collect(),
		}
	}

	pub fn cards(&self) -> &[CardView] {
		match self {
			Self::Populated { cards, .. } => cards,
			_ => &[],
		}
	}
}

/// Result of opening one record
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView<T> {
	Found(T),
	NotFound { key: String },
	Failed(String),
}

impl<T> DetailView<T> {
	pub fn found(self) -> Option<T> {
		match self {
			Self::Found(record) => Some(record),
			_ => None,
		}
	}
}
