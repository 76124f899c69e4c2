mod error;

pub use error::{Error, Result};

use std::{
	collections::HashMap,
	net::SocketAddr,
	sync::{Arc, Mutex},
};

use axum::{
	Json, Router,
	extract::{Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde_json::Value;
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

use scouter_domain::{Character, CharacterId, Ki};

/// An address nothing listens on, for exercising transport failures.
pub const UNREACHABLE_API_BASE: &str = "http://127.0.0.1:1/api";

#[derive(Clone, Debug)]
pub enum MockResponse {
	Json(Value),
	Status(u16),
	Raw(String),
}

#[derive(Clone)]
struct MockState {
	response: MockResponse,
	requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

/// Local stand-in for the remote catalog serving `GET /api/characters`.
pub struct MockCatalogApi {
	addr: SocketAddr,
	requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
	shutdown: Option<oneshot::Sender<()>>,
	server: JoinHandle<()>,
}
impl MockCatalogApi {
	pub async fn start(response: MockResponse) -> Result<Self> {
		let requests = Arc::new(Mutex::new(Vec::new()));
		let state = MockState { response, requests: requests.clone() };
		let app = Router::new().route("/api/characters", get(characters)).with_state(state);
		let listener = TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let (shutdown, shutdown_rx) = oneshot::channel::<()>();
		let server = tokio::spawn(async move {
			let result = axum::serve(listener, app)
				.with_graceful_shutdown(async move {
					let _ = shutdown_rx.await;
				})
				.await;

			if let Err(err) = result {
				eprintln!("Mock catalog API stopped with an error: {err}.");
			}
		});

		Ok(Self { addr, requests, shutdown: Some(shutdown), server })
	}

	pub fn api_base(&self) -> String {
		format!("http://{}/api", self.addr)
	}

	/// Query strings received so far, oldest first.
	pub fn requests(&self) -> Vec<HashMap<String, String>> {
		self.requests.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}
}
impl Drop for MockCatalogApi {
	fn drop(&mut self) {
		if let Some(shutdown) = self.shutdown.take() {
			let _ = shutdown.send(());
		}

		self.server.abort();
	}
}

async fn characters(
	State(state): State<MockState>,
	Query(params): Query<HashMap<String, String>>,
) -> Response {
	state.requests.lock().unwrap_or_else(|err| err.into_inner()).push(params);

	match state.response {
		MockResponse::Json(body) => Json(body).into_response(),
		MockResponse::Status(code) => StatusCode::from_u16(code)
			.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
			.into_response(),
		MockResponse::Raw(body) => body.into_response(),
	}
}

pub fn character(id: i64, name: &str, ki: &str) -> Character {
	Character {
		id: Some(CharacterId::Number(id)),
		name: name.to_string(),
		ki: Ki::from(ki),
		image: format!("https://example.com/characters/{}.webp", name.to_lowercase()),
		description: None,
	}
}

/// `count` distinct characters named "Fighter 1".. with ascending ki.
pub fn roster(count: usize) -> Vec<Character> {
	(1..=count)
		.map(|n| character(n as i64, &format!("Fighter {n}"), &format!("{}", n * 1_000)))
		.collect()
}

pub fn to_json(characters: &[Character]) -> Value {
	serde_json::to_value(characters).unwrap_or(Value::Null)
}
