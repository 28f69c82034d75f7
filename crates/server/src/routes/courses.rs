use axum::{
    extract::{Path, State},
    body::Bytes,
};

use crate::errors::ApiError;
use crate::handlers::{courses, Reply};
use crate::state::ServerState;

#[utoipa::path(get, path = "/courses", tag = "courses",
    responses(
        (status = 200, description = "All courses in insertion order", body = [crate::openapi::CourseDoc])
    ))]
pub async fn list_courses(State(state): State<ServerState>) -> Result<Reply, ApiError> {
    courses::list(&state).await
}

#[utoipa::path(get, path = "/courses/{id}", tag = "courses",
    params(("id" = i64, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course found", body = crate::openapi::CourseDoc),
        (status = 400, description = "Malformed id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "No course with this id", body = crate::openapi::ErrorDoc)
    ))]
pub async fn get_course(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Reply, ApiError> {
    courses::get(&state, &id).await
}

#[utoipa::path(post, path = "/courses", tag = "courses",
    request_body = crate::openapi::CourseInputDoc,
    responses(
        (status = 201, description = "Course created", body = crate::openapi::CourseDoc),
        (status = 400, description = "Missing, malformed or invalid body", body = crate::openapi::ErrorDoc)
    ))]
pub async fn create_course(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<Reply, ApiError> {
    courses::create(&state, &body).await
}

#[utoipa::path(put, path = "/courses/{id}", tag = "courses",
    params(("id" = i64, Path, description = "Course id")),
    request_body = crate::openapi::CourseInputDoc,
    responses(
        (status = 200, description = "Course updated", body = crate::openapi::CourseDoc),
        (status = 400, description = "Malformed id or body", body = crate::openapi::ErrorDoc),
        (status = 404, description = "No course with this id", body = crate::openapi::ErrorDoc)
    ))]
pub async fn update_course(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Reply, ApiError> {
    courses::update(&state, &id, &body).await
}

#[utoipa::path(delete, path = "/courses/{id}", tag = "courses",
    params(("id" = i64, Path, description = "Course id")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 400, description = "Malformed id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "No course with this id", body = crate::openapi::ErrorDoc)
    ))]
pub async fn delete_course(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Reply, ApiError> {
    courses::delete(&state, &id).await
}
