//! Session token store
//!
//! Holds the one credential of the running console. Every network-capable
//! component receives the store as an `Arc<SessionStore>` and reads the token
//! at call time, so a login or logout is seen by the next request.

use crate::persistence::{PersistenceError, SessionPersistence};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Opaque credential returned by login.
///
/// `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
	/// Wrap a raw key; blank keys are not tokens
	pub fn new(raw: impl Into<String>) -> Option<Self> {
		let raw = raw.into();
		if raw.trim().is_empty() {
			None
		} else {
			Some(Self(raw))
		}
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Value of the `Authorization` header
	pub fn header_value(&self) -> String {
		format!("Token {}", self.0)
	}
}

impl fmt::Debug for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Token(****)")
	}
}

pub struct SessionStore {
	token: RwLock<Option<Token>>,
	persistence: Arc<dyn SessionPersistence>,
}

impl SessionStore {
	/// Create an empty store writing through to `persistence`
	pub fn new(persistence: Arc<dyn SessionPersistence>) -> Self {
		Self {
			token: RwLock::new(None),
			persistence,
		}
	}

	/// Create a store primed with whatever `persistence` already holds.
	///
	/// A corrupt entry starts an anonymous session; the next login overwrites it.
	pub fn restore(persistence: Arc<dyn SessionPersistence>) -> Result<Self, PersistenceError> {
		let token = match persistence.load() {
			Ok(token) => token,
			Err(PersistenceError::Corrupt(error)) => {
				tracing::warn!(error = %error, "ignoring corrupt session entry");
				None
			}
			Err(error) => return Err(error),
		};
		if token.is_some() {
			tracing::debug!("restored persisted session");
		}
		Ok(Self {
			token: RwLock::new(token),
			persistence,
		})
	}

	/// Current token, if logged in
	pub fn token(&self) -> Option<Token> {
		self.token.read().clone()
	}

	pub fn is_authenticated(&self) -> bool {
		self.token.read().is_some()
	}

	/// Replace the token and persist it
	pub fn set_token(&self, token: Token) -> Result<(), PersistenceError> {
		let mut slot = self.token.write();
		self.persistence.save(&token)?;
		*slot = Some(token);
		tracing::info!("session token stored");
		Ok(())
	}

	/// Forget the token and remove the persisted entry.
	///
	/// In-memory state is reset even if the persisted entry cannot be removed.
	pub fn clear(&self) -> Result<(), PersistenceError> {
		let mut slot = self.token.write();
		*slot = None;
		let result = self.persistence.clear();
		if let Err(e) = &result {
			tracing::warn!(error = %e, "failed to remove persisted session");
		} else {
			tracing::info!("session cleared");
		}
		result
	}
}

impl fmt::Debug for SessionStore {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SessionStore")
			.field("token", &*self.token.read())
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::persistence::{FilePersistence, MemoryPersistence};
	use rstest::*;

	#[fixture]
	fn persistence() -> Arc<MemoryPersistence> {
		Arc::new(MemoryPersistence::new())
	}

	#[rstest]
	fn test_new_store_is_anonymous(persistence: Arc<MemoryPersistence>) {
		let store = SessionStore::new(persistence);
		assert!(!store.is_authenticated());
		assert_eq!(store.token(), None);
	}

	#[rstest]
	fn test_set_token_writes_through(persistence: Arc<MemoryPersistence>) {
		// Arrange
		let store = SessionStore::new(persistence.clone());
		let token = Token::new("abc123").unwrap();

		// Act
		store.set_token(token.clone()).unwrap();

		// Assert
		assert_eq!(store.token(), Some(token.clone()));
		assert_eq!(persistence.load().unwrap(), Some(token));
	}

	#[rstest]
	fn test_clear_removes_persisted_entry(persistence: Arc<MemoryPersistence>) {
		// Arrange
		let store = SessionStore::new(persistence.clone());
		store.set_token(Token::new("abc123").unwrap()).unwrap();

		// Act
		store.clear().unwrap();

		// Assert
		assert!(!store.is_authenticated());
		assert_eq!(persistence.load().unwrap(), None);
	}

	#[rstest]
	fn test_restore_reads_persisted_token() {
		let token = Token::new("persisted").unwrap();
		let persistence = Arc::new(MemoryPersistence::with_token(token.clone()));

		let store = SessionStore::restore(persistence).unwrap();

		assert_eq!(store.token(), Some(token));
	}

	#[rstest]
	fn test_login_overwrites_corrupt_entry() {
		// Arrange
		let dir = tempfile::TempDir::new().unwrap();
		let persistence = Arc::new(FilePersistence::in_dir(dir.path()));
		std::fs::write(persistence.path(), "{truncated").unwrap();

		// Act
		let store = SessionStore::restore(persistence.clone()).unwrap();
		store.set_token(Token::new("fresh").unwrap()).unwrap();

		// Assert
		assert_eq!(
			SessionStore::restore(persistence).unwrap().token(),
			Token::new("fresh")
		);
	}

	#[rstest]
	fn test_restore_starts_anonymous_on_corrupt_entry() {
		let dir = tempfile::TempDir::new().unwrap();
		let persistence = Arc::new(FilePersistence::in_dir(dir.path()));
		std::fs::write(persistence.path(), "{truncated").unwrap();

		let store = SessionStore::restore(persistence).unwrap();

		assert!(!store.is_authenticated());
	}

	#[rstest]
	#[case("")]
	#[case("   ")]
	fn test_blank_token_rejected(#[case] raw: &str) {
		assert_eq!(Token::new(raw), None);
	}

	#[rstest]
	fn test_token_debug_is_redacted() {
		let token = Token::new("secret-key").unwrap();
		assert_eq!(format!("{:?}", token), "Token(****)");
		assert_eq!(token.header_value(), "Token secret-key");
	}
}
