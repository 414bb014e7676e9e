//! Application settings and the builder that merges sources

use crate::sources::{ConfigSource, DefaultSource, DotEnvSource, EnvSource, SourceError, TomlFileSource};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Prefix shared by every environment variable the console reads
pub const ENV_PREFIX: &str = "PAPERSWIFT_";

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_STATE_DIR: &str = ".paperswift";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Settings errors
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("Failed to load {source_name}: {error}")]
	Source {
		source_name: String,
		error: SourceError,
	},

	#[error("Invalid settings: {0}")]
	Deserialize(#[from] serde_json::Error),

	#[error("Invalid value for {key}: {message}")]
	Invalid { key: String, message: String },
}

impl From<ConfigError> for paperswift_core::Error {
	fn from(err: ConfigError) -> Self {
		paperswift_core::Error::Config(err.to_string())
	}
}

/// Console settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
	/// Origin of the records service, without the `/management` suffix
	pub backend_url: String,

	/// Directory holding the persisted session
	pub state_dir: PathBuf,

	pub log_level: String,

	/// Per-request timeout in seconds; unset means wait indefinitely
	#[serde(default)]
	pub request_timeout: Option<u64>,

	/// Path segment of the scheme collection, if it differs from the default
	#[serde(default)]
	pub scheme_path: Option<String>,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			backend_url: DEFAULT_BACKEND_URL.to_string(),
			state_dir: PathBuf::from(DEFAULT_STATE_DIR),
			log_level: DEFAULT_LOG_LEVEL.to_string(),
			request_timeout: None,
			scheme_path: None,
		}
	}
}

impl Settings {
	/// Load from defaults, an optional TOML file, `.env` and the environment
	pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
		let mut builder = SettingsBuilder::new();
		if let Some(path) = config_file {
			builder = builder.add_source(TomlFileSource::new(path));
		}
		builder
			.add_source(DotEnvSource::new(ENV_PREFIX))
			.add_source(EnvSource::new(ENV_PREFIX))
			.build()
	}

	/// Validate invariants the type system cannot express
	pub fn validate(&self) -> Result<(), ConfigError> {
		let parsed = url::Url::parse(&self.backend_url).map_err(|e| ConfigError::Invalid {
			key: "backend_url".to_string(),
			message: e.to_string(),
		})?;
		if !matches!(parsed.scheme(), "http" | "https") {
			return Err(ConfigError::Invalid {
				key: "backend_url".to_string(),
				message: format!("unsupported scheme '{}'", parsed.scheme()),
			});
		}
		if let Some(path) = &self.scheme_path
			&& (path.is_empty() || path.contains('/'))
		{
			return Err(ConfigError::Invalid {
				key: "scheme_path".to_string(),
				message: "must be a single path segment".to_string(),
			});
		}
		if self.request_timeout == Some(0) {
			return Err(ConfigError::Invalid {
				key: "request_timeout".to_string(),
				message: "must be greater than zero".to_string(),
			});
		}
		Ok(())
	}

	/// Backend origin with any trailing slash removed
	pub fn base_url(&self) -> &str {
		self.backend_url.trim_end_matches('/')
	}
}

/// Merges [`ConfigSource`]s by priority into [`Settings`].
///
/// # Examples
///
/// ```
/// use paperswift_conf::{SettingsBuilder, DefaultSource};
///
/// let settings = SettingsBuilder::new()
///     .add_source(DefaultSource::new().with_value("log_level", "debug"))
///     .build()
///     .unwrap();
/// assert_eq!(settings.log_level, "debug");
/// ```
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
	/// Create a builder seeded with the built-in defaults
	pub fn new() -> Self {
		let defaults = Settings::default();
		let seed = DefaultSource::new()
			.with_value("backend_url", defaults.backend_url)
			.with_value("state_dir", defaults.state_dir.to_string_lossy().into_owned())
			.with_value("log_level", defaults.log_level);
		Self {
			sources: vec![Box::new(seed)],
		}
	}

	pub fn add_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	pub fn build(mut self) -> Result<Settings, ConfigError> {
		// Stable sort keeps insertion order among equal priorities
		self.sources.sort_by_key(|s| s.priority());

		let mut merged: IndexMap<String, Value> = IndexMap::new();
		for source in &self.sources {
			let values = source.load().map_err(|error| ConfigError::Source {
				source_name: source.description(),
				error,
			})?;
			tracing::debug!(
				source = %source.description(),
				keys = values.len(),
				"loaded settings source"
			);
			merged.extend(values);
		}

		let object = merged
			.into_iter()
			.filter(|(key, _)| is_known_key(key))
			.map(|(key, value)| Ok((key.clone(), typed(&key, value)?)))
			.collect::<Result<serde_json::Map<String, Value>, ConfigError>>()?;
		let settings: Settings = serde_json::from_value(Value::Object(object))?;
		settings.validate()?;
		Ok(settings)
	}
}

impl Default for SettingsBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Settings read from sources; anything else is ignored
const KNOWN_KEYS: &[&str] = &[
	"backend_url",
	"state_dir",
	"log_level",
	"request_timeout",
	"scheme_path",
];

fn is_known_key(key: &str) -> bool {
	KNOWN_KEYS.contains(&key)
}

/// Give a raw source value the JSON type its setting deserializes from
fn typed(key: &str, value: Value) -> Result<Value, ConfigError> {
	let invalid = |message: String| ConfigError::Invalid {
		key: key.to_string(),
		message,
	};
	match (key, value) {
		("request_timeout", Value::String(raw)) => match raw.trim() {
			"" => Ok(Value::Null),
			trimmed => trimmed
				.parse::<u64>()
				.map(|secs| Value::Number(secs.into()))
				.map_err(|_| invalid(format!("expected whole seconds, got '{}'", raw))),
		},
		("request_timeout", value) => Ok(value),
		(_, Value::String(raw)) => Ok(Value::String(raw)),
		(_, Value::Number(n)) => Ok(Value::String(n.to_string())),
		(_, Value::Bool(b)) => Ok(Value::String(b.to_string())),
		(_, Value::Null) => Ok(Value::Null),
		(_, other) => Err(invalid(format!("expected text, got {}", other))),
	}
}
