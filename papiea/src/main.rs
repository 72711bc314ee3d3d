#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use std::process::ExitCode;

use args::Args;
use clap::Parser;
use papiea_client::{ClientError, PapieaClient};
use papiea_config::{ClientConfig, Config};
use papiea_core::InvocationError;
use serde_json::Value;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args.config)?;

    // Initialize logging
    let _telemetry_guard = papiea_telemetry::init(&config.telemetry)?;

    let client = build_client(&config.client)?;

    let body = args
        .data
        .as_deref()
        .map(serde_json::from_str::<Value>)
        .transpose()
        .map_err(|e| anyhow::anyhow!("--data is not valid JSON: {e}"))?;

    tracing::info!(method = %args.method, path = %args.path, "calling papiea");

    // Dropping the call on Ctrl+C releases the connection without classifying anything
    let result = tokio::select! {
        result = client.send(args.method, &args.path, body.as_ref()) => result,
        () = interrupted() => anyhow::bail!("interrupted"),
    };

    match result {
        Ok(response) => {
            println!("{}", response.text().await?);
            Ok(ExitCode::SUCCESS)
        }
        Err(ClientError::Papiea(e)) => {
            let envelope = InvocationError::from_error(e, None).to_response();
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

/// Build a client from configuration
fn build_client(config: &ClientConfig) -> anyhow::Result<PapieaClient> {
    let mut client = PapieaClient::new(config.base_url.as_str())?;

    if let Some(token) = &config.token {
        client = client.with_token(token.clone());
    }

    if let Some(timeout) = config.timeout()? {
        client = client.with_timeout(timeout)?;
    }

    Ok(client)
}

/// Wait for Ctrl+C
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        // Without a signal handler the call simply runs to completion
        std::future::pending::<()>().await;
    }

    tracing::info!("interrupt received");
}
