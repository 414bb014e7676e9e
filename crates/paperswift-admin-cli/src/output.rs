//! Text rendering of admin views

use colored::Colorize;
use paperswift_admin::{CardView, ListView, MenuItem};
use paperswift_core::FieldErrors;
use paperswift_forms::{EntitySchema, FieldValue, Notification, NotificationKind};
use std::fmt::Write;

pub(crate) fn render_list(view: &ListView) -> String {
	let mut out = String::new();
	match view {
		ListView::Loading => out.push_str("Loading..."),
		ListView::Failed(message) => {
			let _ = write!(out, "{} {}", "Failed to load:".red().bold(), message);
		}
		ListView::Empty {
			placeholder,
			action_label,
			create_route,
		} => {
			let _ = writeln!(out, "{}", placeholder.dimmed());
			let _ = write!(out, "{} ({})", action_label.cyan(), create_route);
		}
		ListView::Populated {
			title,
			add_label,
			create_route,
			cards,
			..
		} => {
			let _ = writeln!(out, "{}", title.bold());
			for card in cards {
				out.push_str(&render_card(card));
			}
			let _ = write!(out, "{} ({})", add_label.cyan(), create_route);
		}
	}
	out
}

fn render_card(view: &CardView) -> String {
	let card = &view.card;
	let mut out = String::new();
	let badges: Vec<String> = card
		.badges
		.iter()
		.map(|b| format!("[{}]", b).yellow().to_string())
		.collect();
	let _ = write!(out, "  {} {}", view.key.green().bold(), card.title);
	if !badges.is_empty() {
		let _ = write!(out, " {}", badges.join(" "));
	}
	out.push('\n');
	if let Some(subtitle) = &card.subtitle {
		let _ = writeln!(out, "      {}", subtitle);
	}
	if !card.details.is_empty() {
		let _ = writeln!(out, "      {}", card.details.join(" | "));
	}
	if let Some(link) = &card.link {
		let _ = writeln!(out, "      {}", link.underline());
	}
	out
}

/// Field values of a form, one `Label: value` line each
pub(crate) fn render_fields(
	schema: &EntitySchema,
	key: Option<&str>,
	values: &[(&'static str, FieldValue)],
) -> String {
	let mut out = String::new();
	if let Some(key) = key
		&& schema.get(schema.key_field).is_none()
	{
		let _ = writeln!(out, "{:>24}: {}", schema.key_field.bold(), key);
	}
	for (name, value) in values {
		let label = schema.get(name).map_or(*name, |f| f.label);
		let _ = writeln!(out, "{:>24}: {}", label.bold(), value);
	}
	out
}

pub(crate) fn render_field_errors(errors: &FieldErrors) -> String {
	let mut out = String::new();
	for (field, messages) in errors.iter() {
		let _ = writeln!(out, "  {}: {}", field.red(), messages.join(", "));
	}
	out
}

pub(crate) fn render_toast(notification: &Notification) -> String {
	match notification.kind {
		NotificationKind::Success => format!("{} {}", "✓".green(), notification.message),
		NotificationKind::Error => format!("{} {}", "✗".red(), notification.message),
	}
}

pub(crate) fn render_menu(items: &[MenuItem]) -> String {
	let mut out = String::new();
	for item in items {
		let _ = writeln!(out, "{:<12} {}", item.label.bold(), item.route);
	}
	out
}
