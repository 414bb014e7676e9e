//! Layered settings.
//!
//! ```rust,no_run
//! use paperswift::conf::Settings;
//!
//! let settings = Settings::load(Some(std::path::Path::new("paperswift.toml"))).unwrap();
//! println!("{}", settings.base_url());
//! ```

pub use paperswift_conf::*;
