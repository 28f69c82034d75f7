use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::Method,
};
use tracing::info;

use crate::state::ServerState;
use crate::trigger::{dispatch, TriggerRequest, TriggerResponse};

/// Catch-all `/api/*route` entry: hands the request to the function-trigger
/// front-end unchanged.
pub async fn function_trigger(
    State(state): State<ServerState>,
    method: Method,
    Path(route): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> TriggerResponse {
    info!(%method, %route, "handling function trigger");
    let req = TriggerRequest { method, route, query, body };
    dispatch(&state, req).await
}
