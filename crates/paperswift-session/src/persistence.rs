//! Durable storage behind the session token

use crate::Token;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Name of the persisted session entry
pub const STORAGE_KEY: &str = "auth-storage";

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
	#[error("IO error on {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Corrupt session entry: {0}")]
	Corrupt(#[from] serde_json::Error),
}

impl From<PersistenceError> for paperswift_core::Error {
	fn from(err: PersistenceError) -> Self {
		paperswift_core::Error::Session(err.to_string())
	}
}

/// Where the token survives restarts
pub trait SessionPersistence: Send + Sync {
	/// Read the persisted token, if any
	fn load(&self) -> Result<Option<Token>, PersistenceError>;

	fn save(&self, token: &Token) -> Result<(), PersistenceError>;

	/// Remove the persisted entry entirely
	fn clear(&self) -> Result<(), PersistenceError>;
}

#[derive(Serialize, Deserialize)]
struct StoredState {
	key: Option<String>,
}

/// On-disk layout: `{"state": {"key": ...}, "version": 0}`
#[derive(Serialize, Deserialize)]
struct StoredEntry {
	state: StoredState,
	#[serde(default)]
	version: u32,
}

/// JSON file named after [`STORAGE_KEY`] inside a state directory
#[derive(Debug, Clone)]
pub struct FilePersistence {
	path: PathBuf,
}

impl FilePersistence {
	/// Persist under `<dir>/auth-storage.json`
	pub fn in_dir(dir: impl AsRef<Path>) -> Self {
		Self {
			path: dir.as_ref().join(format!("{}.json", STORAGE_KEY)),
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn io_error(&self, source: std::io::Error) -> PersistenceError {
		PersistenceError::Io {
			path: self.path.clone(),
			source,
		}
	}
}

impl SessionPersistence for FilePersistence {
	fn load(&self) -> Result<Option<Token>, PersistenceError> {
		let content = match fs::read_to_string(&self.path) {
			Ok(content) => content,
			Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
			Err(e) => return Err(self.io_error(e)),
		};
		let entry: StoredEntry = serde_json::from_str(&content)?;
		Ok(entry.state.key.and_then(Token::new))
	}

	fn save(&self, token: &Token) -> Result<(), PersistenceError> {
		if let Some(parent) = self.path.parent()
			&& !parent.as_os_str().is_empty()
		{
			fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
		}
		let entry = StoredEntry {
			state: StoredState {
				key: Some(token.as_str().to_string()),
			},
			version: 0,
		};
		let json = serde_json::to_string(&entry)?;
		fs::write(&self.path, json).map_err(|e| self.io_error(e))
	}

	fn clear(&self) -> Result<(), PersistenceError> {
		match fs::remove_file(&self.path) {
			Ok(()) => Ok(()),
			Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
			Err(e) => Err(self.io_error(e)),
		}
	}
}

/// In-process persistence for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryPersistence {
	entry: Mutex<Option<Token>>,
}

impl MemoryPersistence {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_token(token: Token) -> Self {
		Self {
			entry: Mutex::new(Some(token)),
		}
	}
}

impl SessionPersistence for MemoryPersistence {
	fn load(&self) -> Result<Option<Token>, PersistenceError> {
		Ok(self.entry.lock().clone())
	}

	fn save(&self, token: &Token) -> Result<(), PersistenceError> {
		*self.entry.lock() = Some(token.clone());
		Ok(())
	}

	fn clear(&self) -> Result<(), PersistenceError> {
		*self.entry.lock() = None;
		Ok(())
	}
}
