//! Layered settings for the PaperSwift admin console
//!
//! Values are merged from built-in defaults, an optional TOML file, a `.env`
//! file and `PAPERSWIFT_*` environment variables, in increasing priority.

pub mod settings;
pub mod sources;

pub use settings::{ConfigError, ENV_PREFIX, Settings, SettingsBuilder};
pub use sources::{
	ConfigSource, DefaultSource, DotEnvSource, EnvSource, SourceError, SourceValues, TomlFileSource,
};
