//! Command handlers

use crate::ResourceAction;
use crate::output::{render_field_errors, render_fields, render_list, render_menu, render_toast};
use crate::prompt::{confirm, parse_assignment, read_password};
use anyhow::{Context, anyhow, bail};
use colored::Colorize;
use paperswift_admin::{AdminRoute, AdminSite, DetailView, ResourceBinding, ResourceKind};
use paperswift_client::{Credentials, HttpClient};
use paperswift_conf::Settings;
use paperswift_forms::{EntityForm, FormError, FormSchema};
use paperswift_models::{Course, Degree, Department, Exam, Scheme, Teacher};
use paperswift_session::{FilePersistence, SessionStore};
use std::path::Path;
use std::sync::Arc;

pub(crate) struct Console {
	settings: Settings,
	site: AdminSite,
}

impl Console {
	/// Load settings, restore the stored session and build the site
	pub(crate) fn open(config: Option<&Path>) -> anyhow::Result<Self> {
		let settings = Settings::load(config).context("Failed to load settings")?;
		let persistence = Arc::new(FilePersistence::in_dir(&settings.state_dir));
		let session = Arc::new(
			SessionStore::restore(persistence).context("Failed to restore the session")?,
		);
		tracing::debug!(
			backend = %settings.backend_url,
			authenticated = session.is_authenticated(),
			"console opened"
		);
		let http = HttpClient::from_settings(&settings, session)?;
		Ok(Self {
			site: AdminSite::new(http),
			settings,
		})
	}

	pub(crate) fn settings(&self) -> &Settings {
		&self.settings
	}

	fn flush_toasts(&self) {
		for toast in self.site.toasts().drain() {
			println!("{}", render_toast(&toast));
		}
	}

	pub(crate) async fn login(
		&self,
		username: String,
		email: String,
		password: Option<String>,
	) -> anyhow::Result<()> {
		let password = match password {
			Some(password) => password,
			None => read_password()?,
		};
		let credentials = Credentials::new(username, password).with_email(email);
		let result = self.site.login(&credentials).await;
		self.flush_toasts();
		result?;
		Ok(())
	}

	pub(crate) fn logout(&self) -> anyhow::Result<()> {
		self.site.logout()?;
		self.flush_toasts();
		Ok(())
	}

	pub(crate) async fn whoami(&self) -> anyhow::Result<()> {
		self.require_session(&AdminRoute::Home)?;
		let user = self.site.current_user().await?;
		println!("{} <{}>", user.display_name().bold(), user.email);
		Ok(())
	}

	pub(crate) fn resources(&self) {
		print!("{}", render_menu(&self.site.menu()));
	}

	pub(crate) async fn resource(
		&self,
		kind: ResourceKind,
		action: ResourceAction,
	) -> anyhow::Result<()> {
		match kind {
			ResourceKind::Exams => self.run::<Exam>(action).await,
			ResourceKind::Courses => self.run::<Course>(action).await,
			ResourceKind::Teachers => self.run::<Teacher>(action).await,
			ResourceKind::Departments => self.run::<Department>(action).await,
			ResourceKind::Degrees => self.run::<Degree>(action).await,
			ResourceKind::Schemes => self.run::<Scheme>(action).await,
		}
	}

	fn require_session(&self, route: &AdminRoute) -> anyhow::Result<()> {
		if self.site.resolve(&route.path()).is_redirect() {
			bail!("Not logged in. Run `paperswift-admin login` first.");
		}
		Ok(())
	}

	async fn run<T: FormSchema>(&self, action: ResourceAction) -> anyhow::Result<()> {
		self.require_session(&AdminRoute::list(T::COLLECTION))?;
		let binding = self.site.binding::<T>();

		match action {
			ResourceAction::List => {
				println!("{}", render_list(&binding.list_view().await));
			}
			ResourceAction::Show { key } => {
				let record = self.fetch(&binding, &key).await?;
				let form = binding.edit_form(&record)?;
				print!(
					"{}",
					render_fields(form.schema(), Some(&key), &form.values())
				);
				if let Some(link) = record.card().link {
					println!("{:>24}: {}", "Document".bold(), link);
				}
			}
			ResourceAction::Create { assignments } => {
				let form = binding.create_form();
				apply(&form, &assignments)?;
				self.submit(&form).await?;
			}
			ResourceAction::Update { key, assignments } => {
				if assignments.is_empty() {
					bail!("Nothing to update; pass at least one --set FIELD=VALUE");
				}
				let record = self.fetch(&binding, &key).await?;
				let form = binding.edit_form(&record)?;
				apply(&form, &assignments)?;
				self.submit(&form).await?;
			}
			ResourceAction::Delete { key, yes } => {
				let record = self.fetch(&binding, &key).await?;
				let form = binding.edit_form(&record)?;
				form.request_delete()?;
				let question = format!("Delete {} {}?", T::SINGULAR.to_lowercase(), key);
				if !yes && !confirm(&question)? {
					form.cancel_delete();
					println!("Cancelled.");
					return Ok(());
				}
				let result = form.confirm_delete().await;
				self.flush_toasts();
				result?;
			}
		}
		Ok(())
	}

	async fn fetch<T: FormSchema>(
		&self,
		binding: &ResourceBinding<T>,
		key: &str,
	) -> anyhow::Result<T> {
		match binding.detail_view_raw(key).await {
			DetailView::Found(record) => Ok(record),
			DetailView::NotFound { key } => Err(anyhow!("{} '{}' not found", T::SINGULAR, key)),
			DetailView::Failed(message) => Err(anyhow!(message)),
		}
	}

	async fn submit<T: FormSchema>(&self, form: &EntityForm<T>) -> anyhow::Result<()> {
		let result = form.submit().await;
		self.flush_toasts();
		match result {
			Ok(record) => {
				println!("{} {}", "Saved".green().bold(), record.key());
				Ok(())
			}
			Err(FormError::Validation(errors)) => {
				eprint!("{}", render_field_errors(&errors));
				bail!("{} has invalid fields", form.title())
			}
			Err(error) => Err(error.into()),
		}
	}
}

fn apply<T: FormSchema>(form: &EntityForm<T>, assignments: &[String]) -> anyhow::Result<()> {
	for raw in assignments {
		let (field, value) = parse_assignment(raw)?;
		form.set_input(&field, &value)?;
	}
	Ok(())
}
