#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Error layer of the Papiea SDK
//!
//! Classifies failed Papiea responses into typed [`PapieaException`]s and
//! normalizes procedure handler failures into [`InvocationError`] envelopes

pub mod body;
mod classify;
pub mod context;
mod exception;
pub mod invocation;
mod kind;
mod registry;

pub use body::{ErrorDetails, ErrorPayload};
pub use classify::{PapieaResponse, ResponseClassifier, ResponseError};
pub use context::ExceptionContext;
pub use exception::PapieaException;
pub use invocation::{HandlerFailure, InvocationError, InvocationErrorKind};
pub use kind::ErrorKind;
pub use registry::ExceptionRegistry;
