//! Mock Papiea engine that answers every path with a canned response

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

/// Canned answer for one path
#[derive(Clone)]
enum Canned {
    Json(StatusCode, Value),
    Text(StatusCode, String),
}

/// Builder for a [`MockEngine`]
#[derive(Default)]
pub struct MockEngineBuilder {
    routes: HashMap<String, Canned>,
}

impl MockEngineBuilder {
    /// Answer `path` with a JSON body
    pub fn json(mut self, path: &str, status: u16, body: Value) -> Self {
        self.routes.insert(path.to_owned(), Canned::Json(status_code(status), body));
        self
    }

    /// Answer `path` with a plain text body
    pub fn text(mut self, path: &str, status: u16, body: &str) -> Self {
        self.routes
            .insert(path.to_owned(), Canned::Text(status_code(status), body.to_owned()));
        self
    }

    /// Answer `path` with the engine's usual error object
    pub fn error(self, path: &str, status: u16, error_type: &str, message: &str) -> Self {
        self.json(
            path,
            status,
            serde_json::json!({
                "error": {
                    "type": error_type,
                    "errors": [{ "message": message }],
                    "entity_info": { "provider_prefix": "location", "provider_version": "0.1.0", "kind_name": "Location" }
                }
            }),
        )
    }

    pub async fn start(self) -> anyhow::Result<MockEngine> {
        let state = Arc::new(EngineState {
            routes: self.routes,
            request_count: AtomicU32::new(0),
        });

        let app = Router::new().fallback(handle).with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(MockEngine { addr, shutdown, state })
    }
}

/// A running mock engine
pub struct MockEngine {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<EngineState>,
}

struct EngineState {
    routes: HashMap<String, Canned>,
    request_count: AtomicU32,
}

impl MockEngine {
    pub fn builder() -> MockEngineBuilder {
        MockEngineBuilder::default()
    }

    /// Base URL of the running engine
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of requests served so far
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }
}

impl Drop for MockEngine {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

async fn handle(State(state): State<Arc<EngineState>>, uri: Uri) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    match state.routes.get(uri.path()) {
        Some(Canned::Json(status, body)) => (*status, axum::Json(body.clone())).into_response(),
        Some(Canned::Text(status, body)) => (*status, [(header::CONTENT_TYPE, "text/html")], body.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "no canned response").into_response(),
    }
}
