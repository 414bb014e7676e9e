//! Terminal input helpers

use anyhow::{Context, bail};
use dialoguer::{Confirm, Password};

/// Split a `--set` argument into field and raw value
pub(crate) fn parse_assignment(raw: &str) -> anyhow::Result<(String, String)> {
	let Some((field, value)) = raw.split_once('=') else {
		bail!("Expected FIELD=VALUE, got '{}'", raw);
	};
	let field = field.trim();
	if field.is_empty() {
		bail!("Missing field name in '{}'", raw);
	}
	Ok((field.to_string(), value.to_string()))
}

/// Ask a yes/no question; the default answer is no
pub(crate) fn confirm(question: &str) -> anyhow::Result<bool> {
	Confirm::new()
		.with_prompt(question)
		.default(false)
		.interact()
		.context("Failed to read confirmation")
}

/// Read a password without echoing it
pub(crate) fn read_password() -> anyhow::Result<String> {
	Password::new()
		.with_prompt("Password")
		.interact()
		.context("Failed to read password")
}
