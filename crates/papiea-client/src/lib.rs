#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Typed Rust HTTP client for the Papiea entity engine
//!
//! Every failed call surfaces as a classified [`papiea_core::PapieaException`]

mod client;
pub mod error;
mod response;

pub use client::PapieaClient;
pub use error::{ClientError, Result};
pub use reqwest::Method;
pub use response::HttpResponse;
