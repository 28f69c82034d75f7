use std::collections::HashMap;

use axum::http::StatusCode;
use serde_json::json;
use service::{errors::ServiceError, objects::ObjectProxy};
use tracing::info;

use super::{HandlerResult, Reply};
use crate::errors::ApiError;
use crate::state::ServerState;

/// Which object store a route talks to. The two flavors share behavior and
/// differ only in field names and messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectFlavor {
    S3,
    Blob,
}

impl ObjectFlavor {
    /// Name of the key field in bodies, also accepted as a query override.
    pub fn key_field(self) -> &'static str {
        match self {
            Self::S3 => "objectKey",
            Self::Blob => "blobName",
        }
    }

    fn container_field(self) -> &'static str {
        match self {
            Self::S3 => "bucket",
            Self::Blob => "container",
        }
    }

    fn items_field(self) -> &'static str {
        match self {
            Self::S3 => "objects",
            Self::Blob => "blobs",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Self::S3 => "S3 object",
            Self::Blob => "blob",
        }
    }

    fn not_found_message(self, key: &str) -> String {
        match self {
            Self::S3 => format!("Object not found in S3: {key}"),
            Self::Blob => format!("Blob not found: {key}"),
        }
    }

    fn unconfigured_message(self) -> &'static str {
        match self {
            Self::S3 => "S3 storage is not configured",
            Self::Blob => "Blob storage is not configured",
        }
    }
}

/// Key from the path unless the query carries the flavor's key field.
pub fn resolve_key(flavor: ObjectFlavor, path_key: &str, query: &HashMap<String, String>) -> String {
    query
        .get(flavor.key_field())
        .filter(|k| !k.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| path_key.to_string())
}

fn proxy(state: &ServerState, flavor: ObjectFlavor) -> Result<&ObjectProxy, ApiError> {
    state
        .object_proxy(flavor)
        .ok_or_else(|| ApiError::unavailable(flavor.unconfigured_message()))
}

/// Map proxy failures: validation stays 400, anything else becomes a 500 with
/// `Failed to <action>: <cause>`.
fn failure(action: String, e: ServiceError) -> ApiError {
    match e {
        ServiceError::Validation(msg) => ApiError::bad_request(msg),
        other => ApiError::internal(format!("Failed to {action}: {other}")),
    }
}

pub async fn read(state: &ServerState, flavor: ObjectFlavor, key: &str) -> HandlerResult {
    let proxy = proxy(state, flavor)?;
    info!(?flavor, key, "reading object");
    match proxy.read_content(key).await {
        Ok(content) => Ok(Reply::json_value(
            StatusCode::OK,
            json!({ flavor.key_field(): key, "content": content }),
        )),
        Err(ServiceError::NotFound(_)) => Err(ApiError::not_found(flavor.not_found_message(key))),
        Err(e) => Err(failure(format!("read {}", flavor.noun()), e)),
    }
}

pub async fn list(state: &ServerState, flavor: ObjectFlavor) -> HandlerResult {
    let proxy = proxy(state, flavor)?;
    info!(?flavor, container = proxy.container(), "listing objects");
    let keys = proxy
        .list_keys()
        .await
        .map_err(|e| failure(format!("list {}s", flavor.noun()), e))?;
    Ok(Reply::json_value(
        StatusCode::OK,
        json!({ flavor.container_field(): proxy.container(), flavor.items_field(): keys }),
    ))
}

pub async fn exists(state: &ServerState, flavor: ObjectFlavor, key: &str) -> HandlerResult {
    let proxy = proxy(state, flavor)?;
    info!(?flavor, key, "checking object existence");
    let exists = proxy
        .exists(key)
        .await
        .map_err(|e| failure(format!("check {} existence", flavor.noun()), e))?;
    Ok(Reply::json_value(StatusCode::OK, json!({ flavor.key_field(): key, "exists": exists })))
}
