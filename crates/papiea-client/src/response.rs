use std::future::Future;

use papiea_core::PapieaResponse;
use reqwest::StatusCode;

/// A `reqwest` response as seen by the classifier
#[derive(Debug)]
pub struct HttpResponse(reqwest::Response);

impl HttpResponse {
    pub const fn new(response: reqwest::Response) -> Self {
        Self(response)
    }

    pub fn into_inner(self) -> reqwest::Response {
        self.0
    }
}

impl From<reqwest::Response> for HttpResponse {
    fn from(response: reqwest::Response) -> Self {
        Self(response)
    }
}

impl PapieaResponse for HttpResponse {
    type Error = reqwest::Error;

    fn status(&self) -> StatusCode {
        self.0.status()
    }

    // reqwest only exposes the status code, not the phrase on the wire
    fn reason_phrase(&self) -> Option<&str> {
        self.0.status().canonical_reason()
    }

    fn into_text(self) -> impl Future<Output = Result<String, Self::Error>> + Send {
        self.0.text()
    }
}
