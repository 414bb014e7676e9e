//! In-process mock of the records service
//!
//! Serves `/auth/login/`, `/auth/user/` and the `/management/<collection>/`
//! CRUD routes over real HTTP on a random local port, records every request,
//! and can be switched into failure modes.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Method, Request, Response, StatusCode, body::Incoming};
use hyper_util::rt::TokioIo;
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Token handed out by a successful login
pub const TEST_TOKEN: &str = "9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b";
pub const TEST_USERNAME: &str = "admin";
pub const TEST_PASSWORD: &str = "correct-horse";

/// Failure simulation mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorMode {
	Success,
	/// 200 OK with a body that is not JSON
	InvalidResponse,
	Unauthorized,
	ServerError,
}

/// One request as the backend saw it
#[derive(Clone, Debug)]
pub struct RecordedRequest {
	pub method: Method,
	pub path: String,
	pub authorization: Option<String>,
	pub body: Option<Value>,
}

#[derive(Clone)]
struct Collection {
	key_field: String,
	server_assigned: bool,
	records: Vec<Value>,
}

struct BackendState {
	error_mode: ErrorMode,
	require_auth: bool,
	latency: Option<Duration>,
	collections: HashMap<String, Collection>,
	requests: Vec<RecordedRequest>,
}

/// Mock records service for tests
pub struct MockBackend {
	state: Arc<Mutex<BackendState>>,
	local_addr: SocketAddr,
}

impl MockBackend {
	/// Start a backend with the six standard collections registered and empty
	pub async fn new() -> Self {
		let listener = TcpListener::bind("127.0.0.1:0")
			.await
			.expect("Failed to bind mock backend");
		let local_addr = listener
			.local_addr()
			.expect("Failed to read mock backend address");

		let mut collections = HashMap::new();
		for (segment, key_field, server_assigned) in [
			("exams", "eid", true),
			("courses", "code", false),
			("departments", "code", false),
			("degrees", "code", false),
			("scemes", "sid", false),
			("teachers", "id", true),
		] {
			collections.insert(
				segment.to_string(),
				Collection {
					key_field: key_field.to_string(),
					server_assigned,
					records: Vec::new(),
				},
			);
		}

		let state = Arc::new(Mutex::new(BackendState {
			error_mode: ErrorMode::Success,
			require_auth: true,
			latency: None,
			collections,
			requests: Vec::new(),
		}));

		let state_clone = state.clone();
		tokio::spawn(async move {
			let state = state_clone;
			loop {
				if let Ok((stream, _)) = listener.accept().await {
					let io = TokioIo::new(stream);
					let state = state.clone();

					tokio::spawn(async move {
						let mut service =
							hyper::service::service_fn(move |req: Request<Incoming>| {
								let state = state.clone();
								async move { handle_request(req, state).await }
							});

						let _ = hyper::server::conn::http1::Builder::new()
							.serve_connection(io, &mut service)
							.await;
					});
				}
			}
		});

		Self { state, local_addr }
	}

	pub fn base_url(&self) -> String {
		format!("http://{}", self.local_addr)
	}

	/// A URL nothing listens on, for transport failures
	pub fn unreachable_url() -> String {
		"http://127.0.0.1:9".to_string()
	}

	pub fn set_error_mode(&self, mode: ErrorMode) {
		self.state.lock().error_mode = mode;
	}

	/// Accept requests without a valid token
	pub fn allow_anonymous(&self) {
		self.state.lock().require_auth = false;
	}

	/// Delay every response, to hold requests in flight
	pub fn set_latency(&self, latency: Duration) {
		self.state.lock().latency = Some(latency);
	}

	/// Insert a record directly, bypassing the API
	pub fn seed(&self, segment: &str, record: Value) {
		let mut state = self.state.lock();
		if let Some(collection) = state.collections.get_mut(segment) {
			collection.records.push(record);
		}
	}

	/// Current records of a collection
	pub fn records(&self, segment: &str) -> Vec<Value> {
		self.state
			.lock()
			.collections
			.get(segment)
			.map(|c| c.records.clone())
			.unwrap_or_default()
	}

	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.state.lock().requests.clone()
	}

	pub fn request_count(&self) -> usize {
		self.state.lock().requests.len()
	}

	/// Number of requests with `method` whose path starts with `path_prefix`
	pub fn count(&self, method: Method, path_prefix: &str) -> usize {
		self.state
			.lock()
			.requests
			.iter()
			.filter(|r| r.method == method && r.path.starts_with(path_prefix))
			.count()
	}

	pub fn clear_requests(&self) {
		self.state.lock().requests.clear();
	}
}

fn json_response(status: StatusCode, body: Value) -> Response<Full<Bytes>> {
	let mut response = Response::new(Full::from(Bytes::from(body.to_string())));
	*response.status_mut() = status;
	response.headers_mut().insert(
		hyper::header::CONTENT_TYPE,
		hyper::header::HeaderValue::from_static("application/json"),
	);
	response
}

fn empty_response(status: StatusCode) -> Response<Full<Bytes>> {
	let mut response = Response::new(Full::default());
	*response.status_mut() = status;
	response
}

fn not_found() -> Response<Full<Bytes>> {
	json_response(StatusCode::NOT_FOUND, json!({"detail": "Not found."}))
}

fn key_string(value: &Value) -> Option<String> {
	match value {
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		_ => None,
	}
}

fn decode_segment(raw: &str) -> String {
	raw.replace("%20", " ")
		.replace("%2F", "/")
		.replace("%3F", "?")
		.replace("%23", "#")
		.replace("%25", "%")
}

async fn handle_request(
	req: Request<Incoming>,
	state: Arc<Mutex<BackendState>>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
	let method = req.method().clone();
	let path = req.uri().path().to_string();
	let authorization = req
		.headers()
		.get(hyper::header::AUTHORIZATION)
		.and_then(|v| v.to_str().ok())
		.map(str::to_string);
	let bytes = req.into_body().collect().await?.to_bytes();
	let body = if bytes.is_empty() {
		None
	} else {
		serde_json::from_slice::<Value>(&bytes).ok()
	};

	let latency = {
		let mut state = state.lock();
		state.requests.push(RecordedRequest {
			method: method.clone(),
			path: path.clone(),
			authorization: authorization.clone(),
			body: body.clone(),
		});
		state.latency
	};
	if let Some(latency) = latency {
		tokio::time::sleep(latency).await;
	}

	let mut state = state.lock();

	match state.error_mode {
		ErrorMode::InvalidResponse => {
			return Ok(json_response_raw("{invalid json!!! not valid"));
		}
		ErrorMode::Unauthorized => {
			return Ok(json_response(
				StatusCode::UNAUTHORIZED,
				json!({"detail": "Invalid token."}),
			));
		}
		ErrorMode::ServerError => {
			return Ok(empty_response(StatusCode::INTERNAL_SERVER_ERROR));
		}
		ErrorMode::Success => {}
	}

	if method == Method::POST && path == "/auth/login/" {
		return Ok(login(body.as_ref()));
	}

	let expected = format!("Token {}", TEST_TOKEN);
	if state.require_auth && authorization.as_deref() != Some(expected.as_str()) {
		return Ok(json_response(
			StatusCode::UNAUTHORIZED,
			json!({"detail": "Invalid token."}),
		));
	}

	if method == Method::GET && path == "/auth/user/" {
		return Ok(json_response(
			StatusCode::OK,
			json!({
				"pk": 1,
				"username": TEST_USERNAME,
				"email": "admin@example.edu",
				"first_name": "Ada",
				"last_name": "Lovelace"
			}),
		));
	}

	let Some(rest) = path.strip_prefix("/management/") else {
		return Ok(not_found());
	};
	let parts: Vec<&str> = rest.split('/').collect();
	let (segment, key) = match parts.as_slice() {
		[segment, ""] => (*segment, None),
		[segment, key] | [segment, key, ""] if !key.is_empty() => {
			(*segment, Some(decode_segment(key)))
		}
		_ => return Ok(not_found()),
	};
	let Some(collection) = state.collections.get_mut(segment) else {
		return Ok(not_found());
	};

	let response = match (method, key) {
		(Method::GET, None) => json_response(StatusCode::OK, Value::Array(collection.records.clone())),
		(Method::POST, None) => create(collection, body),
		(Method::GET, Some(key)) => match find(collection, &key) {
			Some(index) => json_response(StatusCode::OK, collection.records[index].clone()),
			None => not_found(),
		},
		(Method::PATCH, Some(key)) => update(collection, &key, body),
		(Method::DELETE, Some(key)) => match find(collection, &key) {
			Some(index) => {
				collection.records.remove(index);
				empty_response(StatusCode::NO_CONTENT)
			}
			None => not_found(),
		},
		_ => json_response(
			StatusCode::METHOD_NOT_ALLOWED,
			json!({"detail": "Method not allowed."}),
		),
	};
	Ok(response)
}

fn json_response_raw(body: &'static str) -> Response<Full<Bytes>> {
	let mut response = Response::new(Full::from(Bytes::from(body)));
	response.headers_mut().insert(
		hyper::header::CONTENT_TYPE,
		hyper::header::HeaderValue::from_static("application/json"),
	);
	response
}

fn login(body: Option<&Value>) -> Response<Full<Bytes>> {
	let username = body.and_then(|b| b.get("username")).and_then(Value::as_str);
	let password = body.and_then(|b| b.get("password")).and_then(Value::as_str);
	if username == Some(TEST_USERNAME) && password == Some(TEST_PASSWORD) {
		json_response(StatusCode::OK, json!({"key": TEST_TOKEN}))
	} else {
		json_response(
			StatusCode::BAD_REQUEST,
			json!({"non_field_errors": ["Unable to log in with provided credentials."]}),
		)
	}
}

fn field_error(field: &str, message: &str) -> Response<Full<Bytes>> {
	let mut body = serde_json::Map::new();
	body.insert(field.to_string(), json!([message]));
	json_response(StatusCode::BAD_REQUEST, Value::Object(body))
}

fn find(collection: &Collection, key: &str) -> Option<usize> {
	collection.records.iter().position(|record| {
		record
			.get(&collection.key_field)
			.and_then(key_string)
			.as_deref()
			== Some(key)
	})
}

fn create(collection: &mut Collection, body: Option<Value>) -> Response<Full<Bytes>> {
	let Some(Value::Object(mut record)) = body else {
		return json_response(
			StatusCode::BAD_REQUEST,
			json!({"detail": "Expected a JSON object."}),
		);
	};

	if collection.server_assigned {
		let next = collection
			.records
			.iter()
			.filter_map(|r| r.get(&collection.key_field).and_then(Value::as_i64))
			.max()
			.unwrap_or(0)
			+ 1;
		record.insert(collection.key_field.clone(), json!(next));
	}

	let Some(key) = record.get(&collection.key_field).and_then(key_string) else {
		return field_error(&collection.key_field, "This field is required.");
	};
	if find(collection, &key).is_some() {
		return field_error(&collection.key_field, "A record with this key already exists.");
	}

	let record = Value::Object(record);
	collection.records.push(record.clone());
	json_response(StatusCode::CREATED, record)
}

fn update(collection: &mut Collection, key: &str, body: Option<Value>) -> Response<Full<Bytes>> {
	let Some(index) = find(collection, key) else {
		return not_found();
	};
	let Some(Value::Object(changes)) = body else {
		return json_response(
			StatusCode::BAD_REQUEST,
			json!({"detail": "Expected a JSON object."}),
		);
	};
	if let Value::Object(record) = &mut collection.records[index] {
		for (field, value) in changes {
			if field != collection.key_field {
				record.insert(field, value);
			}
		}
	}
	json_response(StatusCode::OK, collection.records[index].clone())
}
