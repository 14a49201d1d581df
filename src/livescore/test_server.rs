//! Local stand-in for the LiveScore website, used by network-facing tests.
//!
//! Serves a fixed homepage at `/` and a fixed JSON body for every other path,
//! counting hits on each and recording the request URIs of data calls.

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::IntoResponse,
    routing::get,
    Router,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub struct FakeState {
    home_status: StatusCode,
    home_body: String,
    data_status: StatusCode,
    data_body: String,
    pub home_hits: AtomicUsize,
    pub data_hits: AtomicUsize,
    pub data_uris: Mutex<Vec<String>>,
}

pub struct FakeProvider {
    pub base_url: String,
    pub state: Arc<FakeState>,
}

impl FakeProvider {
    pub async fn start(home_status: u16, home_body: &str, data_status: u16, data_body: &str) -> Self {
        let state = Arc::new(FakeState {
            home_status: StatusCode::from_u16(home_status).unwrap(),
            home_body: home_body.to_string(),
            data_status: StatusCode::from_u16(data_status).unwrap(),
            data_body: data_body.to_string(),
            home_hits: AtomicUsize::new(0),
            data_hits: AtomicUsize::new(0),
            data_uris: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/", get(home_handler))
            .fallback(data_handler)
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        FakeProvider {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn last_data_uri(&self) -> Option<String> {
        self.state.data_uris.lock().unwrap().last().cloned()
    }
}

async fn home_handler(State(state): State<Arc<FakeState>>) -> impl IntoResponse {
    state.home_hits.fetch_add(1, Ordering::SeqCst);
    (
        state.home_status,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        state.home_body.clone(),
    )
}

async fn data_handler(State(state): State<Arc<FakeState>>, uri: Uri) -> impl IntoResponse {
    state.data_hits.fetch_add(1, Ordering::SeqCst);
    state.data_uris.lock().unwrap().push(uri.to_string());
    (
        state.data_status,
        [(header::CONTENT_TYPE, "application/json")],
        state.data_body.clone(),
    )
}
