use std::fmt;
use std::time::Duration;

use papiea_core::ResponseClassifier;
use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::{ClientError, Result};
use crate::response::HttpResponse;

/// Typed client for a Papiea engine
///
/// Requests are sent as-is: no retries, and no timeout unless one is set
/// with [`PapieaClient::with_timeout`].
#[derive(Clone)]
pub struct PapieaClient {
    base_url: Url,
    http: reqwest::Client,
    token: Option<SecretString>,
    classifier: ResponseClassifier,
}

impl PapieaClient {
    /// Create a new client pointing at the given base URL
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| ClientError::Config(format!("invalid base URL: {e}")))?;

        // Paths are joined onto the base, which needs a trailing slash to keep its own path
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
            token: None,
            classifier: ResponseClassifier::default(),
        })
    }

    /// Set the bearer token sent with every request
    #[must_use]
    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    /// Set a whole-request timeout on the underlying HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    /// Replace the classifier, e.g. to use a custom registry
    #[must_use]
    pub fn with_classifier(mut self, classifier: ResponseClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub const fn classifier(&self) -> &ResponseClassifier {
        &self.classifier
    }

    /// GET `path` and decode the JSON body
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(Method::GET, path, None::<&()>).await?;
        decode(response).await
    }

    /// POST `body` to `path` and decode the JSON body
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        decode(response).await
    }

    /// PUT `body` to `path` and decode the JSON body
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self.send(Method::PUT, path, Some(body)).await?;
        decode(response).await
    }

    /// DELETE `path`, ignoring any response body
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(Method::DELETE, path, None::<&()>).await?;
        Ok(())
    }

    /// Invoke a procedure with `input`, returning its raw output
    ///
    /// An empty response body yields `Value::Null`.
    pub async fn invoke_procedure(&self, path: &str, input: &Value) -> Result<Value> {
        let response = self.send(Method::POST, path, Some(input)).await?;
        let text = response.text().await?;

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| ClientError::Parse(e.to_string()))
    }

    /// Send a request and classify the response
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Papiea`] for any status of 400 or above, and
    /// [`ClientError::Http`] on transport failures
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response> {
        let url = make_url(&self.base_url, path)?;

        tracing::debug!(%method, %url, "sending papiea request");

        let mut request = make_request(&self.http, method, &url, self.token.as_ref());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let response = self.classifier.check(HttpResponse::new(response)).await?;

        Ok(response.into_inner())
    }
}

impl fmt::Debug for PapieaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PapieaClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

// -- Helper functions --

/// Resolve a request path against the base URL
///
/// The path must stay on the base URL's origin, so absolute URLs and
/// segments that read as a scheme (`location:v1`) are rejected.
fn make_url(base_url: &Url, path: &str) -> Result<Url> {
    let relative = path.trim_start_matches('/');

    if Url::parse(relative).is_ok() {
        return Err(ClientError::Config(format!("request path '{path}' must be relative to the base URL")));
    }

    let url = base_url
        .join(relative)
        .map_err(|e| ClientError::Config(format!("invalid request path '{path}': {e}")))?;

    if url.origin() != base_url.origin() {
        return Err(ClientError::Config(format!("request path '{path}' leaves the base URL")));
    }

    Ok(url)
}

/// Build an authenticated request
fn make_request(
    http: &reqwest::Client,
    method: Method,
    url: &Url,
    token: Option<&SecretString>,
) -> reqwest::RequestBuilder {
    let mut builder = http.request(method, url.as_str());

    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {}", token.expose_secret()));
    }

    builder
}

/// Decode a successful JSON response
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| ClientError::Parse(e.to_string()))
}
