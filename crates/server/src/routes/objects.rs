use std::collections::HashMap;

use axum::extract::{Path, Query, State};

use crate::errors::ApiError;
use crate::handlers::{objects, objects::ObjectFlavor, Reply};
use crate::state::ServerState;

type Params = Query<HashMap<String, String>>;

async fn read(
    state: ServerState,
    flavor: ObjectFlavor,
    key: String,
    query: HashMap<String, String>,
) -> Result<Reply, ApiError> {
    let key = objects::resolve_key(flavor, &key, &query);
    objects::read(&state, flavor, &key).await
}

async fn exists(
    state: ServerState,
    flavor: ObjectFlavor,
    key: String,
    query: HashMap<String, String>,
) -> Result<Reply, ApiError> {
    let key = objects::resolve_key(flavor, &key, &query);
    objects::exists(&state, flavor, &key).await
}

#[utoipa::path(get, path = "/courses/s3/read/{objectKey}", tag = "objects",
    params(("objectKey" = String, Path, description = "Object key, may contain `/`")),
    responses(
        (status = 200, description = "Object content as text"),
        (status = 404, description = "Object not found", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Object store failure", body = crate::openapi::ErrorDoc),
        (status = 503, description = "S3 storage not configured", body = crate::openapi::ErrorDoc)
    ))]
pub async fn read_s3_object(
    State(state): State<ServerState>,
    Path(key): Path<String>,
    Query(q): Params,
) -> Result<Reply, ApiError> {
    read(state, ObjectFlavor::S3, key, q).await
}

#[utoipa::path(get, path = "/courses/s3/list", tag = "objects",
    responses(
        (status = 200, description = "All keys in the bucket"),
        (status = 500, description = "Object store failure")
    ))]
pub async fn list_s3_objects(State(state): State<ServerState>) -> Result<Reply, ApiError> {
    objects::list(&state, ObjectFlavor::S3).await
}

#[utoipa::path(get, path = "/courses/s3/exists/{objectKey}", tag = "objects",
    params(("objectKey" = String, Path, description = "Object key, may contain `/`")),
    responses(
        (status = 200, description = "Existence flag"),
        (status = 500, description = "Existence check failed")
    ))]
pub async fn s3_object_exists(
    State(state): State<ServerState>,
    Path(key): Path<String>,
    Query(q): Params,
) -> Result<Reply, ApiError> {
    exists(state, ObjectFlavor::S3, key, q).await
}

#[utoipa::path(get, path = "/courses/blob/read/{blobName}", tag = "objects",
    params(("blobName" = String, Path, description = "Blob name, may contain `/`")),
    responses(
        (status = 200, description = "Blob content as text"),
        (status = 404, description = "Blob not found", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Object store failure", body = crate::openapi::ErrorDoc),
        (status = 503, description = "Blob storage not configured", body = crate::openapi::ErrorDoc)
    ))]
pub async fn read_blob(
    State(state): State<ServerState>,
    Path(key): Path<String>,
    Query(q): Params,
) -> Result<Reply, ApiError> {
    read(state, ObjectFlavor::Blob, key, q).await
}

#[utoipa::path(get, path = "/courses/blob/list", tag = "objects",
    responses(
        (status = 200, description = "All blob names in the container"),
        (status = 500, description = "Object store failure")
    ))]
pub async fn list_blobs(State(state): State<ServerState>) -> Result<Reply, ApiError> {
    objects::list(&state, ObjectFlavor::Blob).await
}

#[utoipa::path(get, path = "/courses/blob/exists/{blobName}", tag = "objects",
    params(("blobName" = String, Path, description = "Blob name, may contain `/`")),
    responses(
        (status = 200, description = "Existence flag"),
        (status = 500, description = "Existence check failed")
    ))]
pub async fn blob_exists(
    State(state): State<ServerState>,
    Path(key): Path<String>,
    Query(q): Params,
) -> Result<Reply, ApiError> {
    exists(state, ObjectFlavor::Blob, key, q).await
}
