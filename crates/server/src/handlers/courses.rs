use axum::http::StatusCode;
use models::{CourseId, CourseInput};
use tracing::info;

use super::{HandlerResult, Reply};
use crate::errors::ApiError;
use crate::state::ServerState;

/// Parse a course id from a path segment.
pub fn parse_id(raw: &str) -> Result<CourseId, ApiError> {
    raw.trim()
        .parse::<CourseId>()
        .map_err(|_| ApiError::bad_request(format!("Invalid course ID format: {raw}")))
}

/// Decode a create/update body. An empty body is reported separately from a
/// malformed one.
pub fn parse_input(body: &[u8]) -> Result<CourseInput, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::bad_request("Course data is required"));
    }
    serde_json::from_slice(body).map_err(|e| ApiError::bad_request(format!("Invalid course data: {e}")))
}

pub async fn list(state: &ServerState) -> HandlerResult {
    info!("listing courses");
    let courses = state.courses.list().await;
    Reply::json(StatusCode::OK, &courses)
}

pub async fn get(state: &ServerState, raw_id: &str) -> HandlerResult {
    let id = parse_id(raw_id)?;
    info!(course_id = id, "fetching course");
    let course = state.courses.get(id).await?;
    Reply::json(StatusCode::OK, &course)
}

pub async fn create(state: &ServerState, body: &[u8]) -> HandlerResult {
    let input = parse_input(body)?;
    let course = state.courses.create(input).await?;
    Reply::json(StatusCode::CREATED, &course)
}

pub async fn update(state: &ServerState, raw_id: &str, body: &[u8]) -> HandlerResult {
    let id = parse_id(raw_id)?;
    let input = parse_input(body)?;
    let course = state.courses.update(id, input).await?;
    Reply::json(StatusCode::OK, &course)
}

pub async fn delete(state: &ServerState, raw_id: &str) -> HandlerResult {
    let id = parse_id(raw_id)?;
    state.courses.delete(id).await?;
    Ok(Reply::no_content())
}
