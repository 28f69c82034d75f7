//! Transport-neutral request handling shared by the HTTP router and the
//! function-trigger front-end.
//!
//! Handlers take already-extracted raw inputs (path strings, query map, body
//! bytes), call the service layer and return a [`Reply`] or an [`ApiError`].
//! Each front-end only renders the result.

pub mod courses;
pub mod objects;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::types::{Health, PING_REPLY};
use serde::Serialize;

use crate::errors::ApiError;

pub type HandlerResult = Result<Reply, ApiError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ReplyBody {
    Json(serde_json::Value),
    Text(String),
    Empty,
}

/// Status plus body, independent of the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: ReplyBody,
}

impl Reply {
    pub fn json<T: Serialize>(status: StatusCode, value: &T) -> HandlerResult {
        let value = serde_json::to_value(value)
            .map_err(|e| ApiError::internal(format!("failed to encode response: {e}")))?;
        Ok(Self::json_value(status, value))
    }

    pub fn json_value(status: StatusCode, value: serde_json::Value) -> Self {
        Self { status, body: ReplyBody::Json(value) }
    }

    pub fn text(status: StatusCode, text: impl Into<String>) -> Self {
        Self { status, body: ReplyBody::Text(text.into()) }
    }

    pub fn no_content() -> Self {
        Self { status: StatusCode::NO_CONTENT, body: ReplyBody::Empty }
    }

    /// Content type and encoded body bytes.
    pub fn encode(&self) -> (Option<&'static str>, Vec<u8>) {
        match &self.body {
            ReplyBody::Json(v) => (Some("application/json"), serde_json::to_vec(v).unwrap_or_default()),
            ReplyBody::Text(t) => (Some("text/plain; charset=utf-8"), t.clone().into_bytes()),
            ReplyBody::Empty => (None, Vec::new()),
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self.body {
            ReplyBody::Json(v) => (self.status, Json(v)).into_response(),
            ReplyBody::Text(t) => (self.status, t).into_response(),
            ReplyBody::Empty => self.status.into_response(),
        }
    }
}

/// Collapse a handler result into the reply a client sees.
pub fn settle(result: HandlerResult) -> Reply {
    result.unwrap_or_else(ApiError::into_reply)
}

pub fn ping() -> Reply {
    Reply::text(StatusCode::OK, PING_REPLY)
}

pub fn health() -> HandlerResult {
    Reply::json(StatusCode::OK, &Health::ok())
}
