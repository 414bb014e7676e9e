//! Where settings values come from
//!
//! Each source yields raw values keyed by setting name. Text sources
//! (environment, `.env`) hand values over as strings; typing happens once,
//! in [`SettingsBuilder`](crate::SettingsBuilder).

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};
use std::fs;
use std::path::PathBuf;

/// Raw values of one source, in the order the source produced them
pub type SourceValues = IndexMap<String, Value>;

/// A layer of settings. Higher priority wins when keys collide.
pub trait ConfigSource: Send + Sync {
	fn load(&self) -> Result<SourceValues, SourceError>;

	fn priority(&self) -> u8;

	/// Human-readable origin, used in errors and logs
	fn description(&self) -> String;
}

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	#[error("Cannot read {path}: {source}")]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("{path} is not valid TOML: {source}")]
	Toml {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Cannot read {path}: {message}")]
	DotEnv { path: PathBuf, message: String },
}

/// Keep variables starting with `prefix`, keyed by the lowercased remainder
fn prefixed(prefix: &str, vars: impl IntoIterator<Item = (String, String)>) -> SourceValues {
	vars.into_iter()
		.filter_map(|(name, value)| {
			let key = name.strip_prefix(prefix)?;
			(!key.is_empty()).then(|| (key.to_lowercase(), Value::String(value)))
		})
		.collect()
}

/// Process environment, e.g. `PAPERSWIFT_BACKEND_URL` -> `backend_url`
pub struct EnvSource {
	prefix: String,
	vars: Option<Vec<(String, String)>>,
}

impl EnvSource {
	pub fn new(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
			vars: None,
		}
	}

	/// Read from `vars` instead of the process environment
	pub fn with_vars<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<String>,
		V: Into<String>,
	{
		self.vars = Some(
			vars.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		);
		self
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<SourceValues, SourceError> {
		Ok(match &self.vars {
			Some(vars) => prefixed(&self.prefix, vars.iter().cloned()),
			None => prefixed(&self.prefix, std::env::vars()),
		})
	}

	fn priority(&self) -> u8 {
		100
	}

	fn description(&self) -> String {
		format!("environment ({}*)", self.prefix)
	}
}

/// `KEY=value` file using the same prefix as [`EnvSource`].
///
/// The file is read directly; the process environment is left alone.
pub struct DotEnvSource {
	path: PathBuf,
	prefix: String,
}

impl DotEnvSource {
	/// `.env` in the working directory
	pub fn new(prefix: impl Into<String>) -> Self {
		Self {
			path: PathBuf::from(".env"),
			prefix: prefix.into(),
		}
	}

	pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
		self.path = path.into();
		self
	}
}

impl ConfigSource for DotEnvSource {
	fn load(&self) -> Result<SourceValues, SourceError> {
		if !self.path.exists() {
			return Ok(SourceValues::new());
		}
		let dotenv_error = |e: dotenv::Error| SourceError::DotEnv {
			path: self.path.clone(),
			message: e.to_string(),
		};
		let vars = dotenv::from_path_iter(&self.path)
			.map_err(dotenv_error)?
			.collect::<Result<Vec<_>, _>>()
			.map_err(dotenv_error)?;
		Ok(prefixed(&self.prefix, vars))
	}

	fn priority(&self) -> u8 {
		90
	}

	fn description(&self) -> String {
		format!(".env file {}", self.path.display())
	}
}

/// TOML settings file with settings at the root table. A missing file is empty.
pub struct TomlFileSource {
	path: PathBuf,
}

impl TomlFileSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<SourceValues, SourceError> {
		let content = match fs::read_to_string(&self.path) {
			Ok(content) => content,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(SourceValues::new()),
			Err(source) => {
				return Err(SourceError::Read {
					path: self.path.clone(),
					source,
				});
			}
		};
		let table: toml::Table = toml::from_str(&content).map_err(|source| SourceError::Toml {
			path: self.path.clone(),
			source,
		})?;
		Ok(table
			.into_iter()
			.map(|(key, value)| (key, toml_to_json(value)))
			.collect())
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		format!("settings file {}", self.path.display())
	}
}

fn toml_to_json(value: toml::Value) -> Value {
	match value {
		toml::Value::String(s) => Value::String(s),
		toml::Value::Integer(i) => Value::Number(i.into()),
		toml::Value::Float(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
		toml::Value::Boolean(b) => Value::Bool(b),
		toml::Value::Datetime(dt) => Value::String(dt.to_string()),
		toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
		toml::Value::Table(table) => Value::Object(
			table
				.into_iter()
				.map(|(k, v)| (k, toml_to_json(v)))
				.collect::<Map<_, _>>(),
		),
	}
}

/// Fixed values at the lowest priority
#[derive(Default)]
pub struct DefaultSource {
	values: SourceValues,
}

impl DefaultSource {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.values.insert(key.into(), value.into());
		self
	}
}

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<SourceValues, SourceError> {
		Ok(self.values.clone())
	}

	fn priority(&self) -> u8 {
		0
	}

	fn description(&self) -> String {
		"defaults".to_string()
	}
}
