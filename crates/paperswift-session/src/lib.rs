//! Session management for the PaperSwift admin console
//!
//! A [`SessionStore`] owns the login token; a [`SessionPersistence`] adapter
//! decides where it survives restarts ([`FilePersistence`] on disk,
//! [`MemoryPersistence`] for tests).

pub mod persistence;
pub mod store;

pub use persistence::{
	FilePersistence, MemoryPersistence, PersistenceError, STORAGE_KEY, SessionPersistence,
};
pub use store::{SessionStore, Token};
