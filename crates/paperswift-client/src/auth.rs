//! Login and profile endpoints

use crate::endpoints::{LOGIN_PATH, USER_PATH};
use crate::transport::HttpClient;
use paperswift_core::{Error, Result};
use paperswift_session::Token;
use serde::{Deserialize, Serialize};

/// Login form body
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
	pub username: String,
	pub password: String,
	/// Sent as an empty string when not given; the service accepts either
	pub email: String,
}

impl Credentials {
	pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
		Self {
			username: username.into(),
			password: password.into(),
			email: String::new(),
		}
	}

	pub fn with_email(mut self, email: impl Into<String>) -> Self {
		self.email = email.into();
		self
	}
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
	key: String,
}

/// Profile of the logged-in account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	pub pk: i64,
	pub username: String,
	#[serde(default)]
	pub email: String,
	#[serde(default)]
	pub first_name: String,
	#[serde(default)]
	pub last_name: String,
}

impl User {
	/// "First Last", falling back to the username
	pub fn display_name(&self) -> String {
		let full = format!("{} {}", self.first_name, self.last_name);
		let full = full.trim();
		if full.is_empty() {
			self.username.clone()
		} else {
			full.to_string()
		}
	}
}

#[derive(Clone)]
pub struct AuthClient {
	http: HttpClient,
}

impl AuthClient {
	pub fn new(http: HttpClient) -> Self {
		Self { http }
	}

	/// Exchange credentials for a token and store it in the session
	pub async fn login(&self, credentials: &Credentials) -> Result<Token> {
		let url = self.http.endpoints().url(LOGIN_PATH);
		let body = serde_json::to_value(credentials)
			.map_err(|e| Error::Decode(format!("Failed to encode credentials: {}", e)))?;
		let response: LoginResponse = self
			.http
			.request(reqwest::Method::POST, &url, Some(body))
			.await?;
		let token = Token::new(response.key)
			.ok_or_else(|| Error::Decode("Login response carried an empty key".to_string()))?;
		self.http.session().set_token(token.clone())?;
		tracing::info!(username = %credentials.username, "logged in");
		Ok(token)
	}

	pub async fn user(&self) -> Result<User> {
		let url = self.http.endpoints().url(USER_PATH);
		self.http.request(reqwest::Method::GET, &url, None).await
	}

	/// Drop the local session. The service is not contacted.
	pub fn logout(&self) -> Result<()> {
		self.http.session().clear()?;
		Ok(())
	}
}
