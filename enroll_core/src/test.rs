use crate::sync::register;
use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use chrono::NaiveDate;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

proptest::prop_compose! {
    pub fn birth_date()(days in 0..45_000u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(1920, 1, 1).unwrap() + chrono::Days::new(days)
    }
}

/// A request the fake server received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub content_type: Option<String>,
    pub body: Value,
}

/// An in-process stand-in for the registration server. Answers every
/// registration with the same canned response and remembers what it was sent.
#[derive(Debug, Clone)]
pub struct FakeServer {
    reply: Arc<(StatusCode, String)>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeServer {
    pub fn replying(status: StatusCode, body: &str) -> Self {
        Self {
            reply: Arc::new((status, body.to_string())),
            requests: Arc::default(),
        }
    }

    /// Serve on a random local port and return the base URL.
    pub async fn start(&self) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        let app = Router::new()
            .route(register::PATH, post(handler))
            .with_state(self.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{address}")
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn handler(
    State(server): State<FakeServer>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    server.requests.lock().unwrap().push(Recorded {
        content_type: headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });

    let (status, reply) = &*server.reply;

    (*status, [(CONTENT_TYPE, "application/json")], reply.clone())
}

/// A base URL where nothing is listening.
pub async fn unreachable_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    format!("http://{address}")
}
