//! Authenticated HTTP transport

use crate::endpoints::Endpoints;
use paperswift_conf::Settings;
use paperswift_core::{Error, Result};
use paperswift_session::SessionStore;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Shared HTTP plumbing: one `reqwest::Client`, the endpoint table and the
/// session store the `Authorization` header is read from.
#[derive(Clone)]
pub struct HttpClient {
	client: reqwest::Client,
	endpoints: Endpoints,
	session: Arc<SessionStore>,
}

impl HttpClient {
	pub fn new(endpoints: Endpoints, session: Arc<SessionStore>) -> Result<Self> {
		Self::with_timeout(endpoints, session, None)
	}

	pub fn with_timeout(
		endpoints: Endpoints,
		session: Arc<SessionStore>,
		timeout: Option<Duration>,
	) -> Result<Self> {
		let mut builder = reqwest::Client::builder();
		if let Some(timeout) = timeout {
			builder = builder.timeout(timeout);
		}
		let client = builder
			.build()
			.map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
		Ok(Self {
			client,
			endpoints,
			session,
		})
	}

	pub fn from_settings(settings: &Settings, session: Arc<SessionStore>) -> Result<Self> {
		Self::with_timeout(
			Endpoints::from_settings(settings),
			session,
			settings.request_timeout.map(Duration::from_secs),
		)
	}

	pub fn endpoints(&self) -> &Endpoints {
		&self.endpoints
	}

	pub fn session(&self) -> &Arc<SessionStore> {
		&self.session
	}

	/// Send a request and decode a JSON response body
	pub async fn request<T: DeserializeOwned>(
		&self,
		method: reqwest::Method,
		url: &str,
		body: Option<serde_json::Value>,
	) -> Result<T> {
		let response = self.send(method, url, body).await?;
		response
			.json()
			.await
			.map_err(|e| Error::Decode(format!("Failed to parse response from {}: {}", url, e)))
	}

	/// Send a request whose success response carries no meaningful body
	pub async fn request_empty(
		&self,
		method: reqwest::Method,
		url: &str,
		body: Option<serde_json::Value>,
	) -> Result<()> {
		self.send(method, url, body).await.map(|_| ())
	}

	async fn send(
		&self,
		method: reqwest::Method,
		url: &str,
		body: Option<serde_json::Value>,
	) -> Result<reqwest::Response> {
		tracing::debug!(%method, url, "sending request");

		let mut req = self.client.request(method.clone(), url);

		// Missing tokens are not refused locally; the service answers 401.
		if let Some(token) = self.session.token() {
			req = req.header(reqwest::header::AUTHORIZATION, token.header_value());
		}

		if let Some(body) = body {
			req = req.json(&body);
		}

		let response = req.send().await.map_err(|e| {
			tracing::warn!(%method, url, error = %e, "request failed");
			Error::Network(format!("Request failed: {}", e))
		})?;

		let status = response.status();
		if !status.is_success() {
			let body = response
				.text()
				.await
				.unwrap_or_else(|_| "Unknown error".to_string());
			tracing::warn!(%method, url, status = status.as_u16(), "request rejected");
			return Err(Error::api(status.as_u16(), body));
		}

		Ok(response)
	}
}
