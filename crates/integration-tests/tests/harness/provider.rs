//! Test provider whose procedures call a Papiea engine
//!
//! Procedure failures are reported as invocation error envelopes.

use std::net::SocketAddr;

use axum::extract::State;
use axum::{Json, Router, routing};
use papiea_client::PapieaClient;
use papiea_core::InvocationError;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

/// Path of the engine procedure every provider procedure forwards to
pub const ENGINE_PROCEDURE: &str = "/services/location/0.1.0/procedure/move";

/// Path of the engine endpoint consulted by the secured procedure
pub const ENGINE_PERMISSION_CHECK: &str = "/services/location/0.1.0/auth/check_permission";

/// A running test provider
pub struct TestProvider {
    addr: SocketAddr,
    shutdown: CancellationToken,
    client: reqwest::Client,
}

impl TestProvider {
    /// Start a provider whose procedures call the engine at `engine_url`
    pub async fn start(engine_url: &str) -> anyhow::Result<Self> {
        let engine = PapieaClient::new(engine_url)?;

        let app = Router::new()
            .route("/procedure/move", routing::post(forward))
            .route("/procedure/secure_move", routing::post(secure_forward))
            .route("/procedure/crash", routing::post(crash))
            .with_state(engine);

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

        Ok(Self {
            addr,
            shutdown,
            client: reqwest::Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

impl Drop for TestProvider {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn forward(State(engine): State<PapieaClient>, Json(input): Json<Value>) -> Result<Json<Value>, InvocationError> {
    engine
        .invoke_procedure(ENGINE_PROCEDURE, &input)
        .await
        .map(Json)
        .map_err(|e| InvocationError::from_error(e, None))
}

async fn secure_forward(
    State(engine): State<PapieaClient>,
    Json(input): Json<Value>,
) -> Result<Json<Value>, InvocationError> {
    engine
        .post::<_, Value>(ENGINE_PERMISSION_CHECK, &input)
        .await
        .map_err(|e| InvocationError::security_api_error(e, "cannot check permission"))?;

    forward(State(engine), Json(input)).await
}

async fn crash(Json(_input): Json<Value>) -> Result<Json<Value>, InvocationError> {
    Err(InvocationError::from_error(
        anyhow::anyhow!("storage backend unavailable"),
        Some("Could not move location"),
    ))
}
