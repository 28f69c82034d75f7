pub mod courses;
pub mod objects;
pub mod trigger;

use axum::{
    routing::{any, get},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{self, HandlerResult, Reply};
use crate::openapi::ApiDoc;
use crate::state::ServerState;

#[utoipa::path(get, path = "/health", tag = "health",
    responses(
        (status = 200, description = "Service is up", body = crate::openapi::HealthResponse)
    ))]
pub async fn health() -> HandlerResult {
    handlers::health()
}

#[utoipa::path(get, path = "/ping", tag = "health",
    responses((status = 200, description = "Plain-text `pong`", body = String)))]
pub async fn ping() -> Reply {
    handlers::ping()
}

/// Build the application router: course CRUD, object proxies, the
/// function-trigger catch-all under `/api`, and the OpenAPI docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/ping", get(ping));

    let course_routes = Router::new()
        .route("/courses", get(courses::list_courses).post(courses::create_course))
        .route(
            "/courses/:id",
            get(courses::get_course).put(courses::update_course).delete(courses::delete_course),
        );

    let object_routes = Router::new()
        .route("/courses/s3/list", get(objects::list_s3_objects))
        .route("/courses/s3/read/*key", get(objects::read_s3_object))
        .route("/courses/s3/exists/*key", get(objects::s3_object_exists))
        .route("/courses/blob/list", get(objects::list_blobs))
        .route("/courses/blob/read/*key", get(objects::read_blob))
        .route("/courses/blob/exists/*key", get(objects::blob_exists));

    let trigger_routes = Router::new().route("/api/*route", any(trigger::function_trigger));

    public
        .merge(course_routes)
        .merge(object_routes)
        .merge(trigger_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
