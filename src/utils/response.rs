//! Response mapping shared by every route.
//!
//! Reads answer with [`Presence`]: the status follows whether the
//! collaborator produced a value. Writes answer with [`Verdict`]: the status
//! follows the success flag carried inside the payload, and the payload is
//! sent back either way. Anything the collaborator could not complete ends
//! as [`Failure`].

use axum::{
    extract::Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub enum Presence<T> {
    Found(T),
    Absent,
}

impl<T> From<Option<T>> for Presence<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Found(value),
            None => Self::Absent,
        }
    }
}

impl<T: Serialize> IntoResponse for Presence<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Found(value) => (StatusCode::OK, Json(value)).into_response(),
            Self::Absent => StatusCode::NOT_FOUND.into_response(),
        }
    }
}

/// A write result that knows whether it went through.
pub trait Outcome {
    fn succeeded(&self) -> bool;
}

pub enum Verdict<T> {
    Accepted(T),
    Rejected(T),
}

impl<T: Outcome> From<T> for Verdict<T> {
    fn from(outcome: T) -> Self {
        if outcome.succeeded() {
            Self::Accepted(outcome)
        } else {
            Self::Rejected(outcome)
        }
    }
}

impl<T: Serialize> IntoResponse for Verdict<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Accepted(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
            Self::Rejected(outcome) => (StatusCode::BAD_REQUEST, Json(outcome)).into_response(),
        }
    }
}

/// Empty 500. Callers log the cause before producing one.
pub struct Failure;

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}
