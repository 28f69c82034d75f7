//! Function-trigger front-end.
//!
//! Serverless hosts hand a function a generic request (method, route, query,
//! body) instead of a framework-routed call. [`RouteTable`] maps method plus
//! route pattern to a [`RouteId`] explicitly, and [`dispatch`] runs the same
//! handlers the HTTP router uses.

use std::collections::HashMap;

use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;

use crate::errors::ApiError;
use crate::handlers::{self, courses, objects, objects::ObjectFlavor, settle, HandlerResult};
use crate::state::ServerState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteId {
    Ping,
    Health,
    ListCourses,
    CreateCourse,
    GetCourse,
    UpdateCourse,
    DeleteCourse,
    ReadObject(ObjectFlavor),
    ListObjects(ObjectFlavor),
    ObjectExists(ObjectFlavor),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(&'static str),
    Param(&'static str),
    /// Captures the remaining segments (at least one), joined by `/`.
    Rest(&'static str),
}

#[derive(Debug, Clone)]
struct RoutePattern {
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// `courses/{id}` style; `{*name}` captures the rest of the path.
    fn parse(pattern: &'static str) -> Self {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => match name.strip_prefix('*') {
                    Some(rest) => Segment::Rest(rest),
                    None => Segment::Param(name),
                },
                None => Segment::Static(s),
            })
            .collect();
        Self { segments }
    }

    fn matches(&self, parts: &[&str]) -> Option<Params> {
        let mut params = Params::new();
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Static(expected) => {
                    if parts.get(i) != Some(expected) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let value = parts.get(i).filter(|v| !v.is_empty())?;
                    params.insert(*name, value.to_string());
                }
                Segment::Rest(name) => {
                    let rest = parts.get(i..).filter(|r| !r.is_empty())?;
                    params.insert(*name, rest.join("/"));
                    return Some(params);
                }
            }
        }
        (parts.len() == self.segments.len()).then_some(params)
    }
}

pub type Params = HashMap<&'static str, String>;

#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    Matched(RouteId, Params),
    MethodNotAllowed,
    NotFound,
}

/// Ordered method + pattern table; the first match wins, so more specific
/// patterns are listed before `courses/{id}`.
pub struct RouteTable {
    routes: Vec<(Method, RoutePattern, RouteId)>,
}

impl RouteTable {
    pub fn standard() -> Self {
        use ObjectFlavor::{Blob, S3};
        let entries: [(Method, &'static str, RouteId); 13] = [
            (Method::GET, "ping", RouteId::Ping),
            (Method::GET, "health", RouteId::Health),
            (Method::GET, "courses", RouteId::ListCourses),
            (Method::POST, "courses", RouteId::CreateCourse),
            (Method::GET, "courses/s3/list", RouteId::ListObjects(S3)),
            (Method::GET, "courses/s3/read/{*objectKey}", RouteId::ReadObject(S3)),
            (Method::GET, "courses/s3/exists/{*objectKey}", RouteId::ObjectExists(S3)),
            (Method::GET, "courses/blob/list", RouteId::ListObjects(Blob)),
            (Method::GET, "courses/blob/read/{*blobName}", RouteId::ReadObject(Blob)),
            (Method::GET, "courses/blob/exists/{*blobName}", RouteId::ObjectExists(Blob)),
            (Method::GET, "courses/{id}", RouteId::GetCourse),
            (Method::PUT, "courses/{id}", RouteId::UpdateCourse),
            (Method::DELETE, "courses/{id}", RouteId::DeleteCourse),
        ];
        let routes = entries
            .into_iter()
            .map(|(method, pattern, id)| (method, RoutePattern::parse(pattern), id))
            .collect();
        Self { routes }
    }

    pub fn resolve(&self, method: &Method, route: &str) -> Resolution {
        let parts: Vec<&str> =
            route.trim_matches('/').split('/').filter(|p| !p.is_empty()).collect();
        let mut path_known = false;
        for (m, pattern, id) in &self.routes {
            if let Some(params) = pattern.matches(&parts) {
                if m == method {
                    return Resolution::Matched(*id, params);
                }
                path_known = true;
            }
        }
        if path_known { Resolution::MethodNotAllowed } else { Resolution::NotFound }
    }
}

/// Generic request as delivered by a function host.
#[derive(Debug, Clone)]
pub struct TriggerRequest {
    pub method: Method,
    pub route: String,
    pub query: HashMap<String, String>,
    pub body: Bytes,
}

impl TriggerRequest {
    pub fn new(method: Method, route: impl Into<String>) -> Self {
        Self { method, route: route.into(), query: HashMap::new(), body: Bytes::new() }
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TriggerResponse {
    pub status: StatusCode,
    pub content_type: Option<&'static str>,
    pub body: Vec<u8>,
}

impl TriggerResponse {
    pub fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_slice(&self.body).ok()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl From<HandlerResult> for TriggerResponse {
    fn from(result: HandlerResult) -> Self {
        let reply = settle(result);
        let (content_type, body) = reply.encode();
        Self { status: reply.status, content_type, body }
    }
}

impl IntoResponse for TriggerResponse {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.body).into_response();
        match self.content_type {
            Some(ct) => {
                response
                    .headers_mut()
                    .insert(header::CONTENT_TYPE, header::HeaderValue::from_static(ct));
            }
            None => {
                response.headers_mut().remove(header::CONTENT_TYPE);
            }
        }
        response
    }
}

fn param<'a>(params: &'a Params, name: &str) -> &'a str {
    params.get(name).map(String::as_str).unwrap_or_default()
}

/// Resolve `req` against the state's route table and run the matching handler.
pub async fn dispatch(state: &ServerState, req: TriggerRequest) -> TriggerResponse {
    let (id, params) = match state.routes.resolve(&req.method, &req.route) {
        Resolution::Matched(id, params) => (id, params),
        Resolution::MethodNotAllowed => {
            let msg = format!("Method {} not allowed for route: {}", req.method, req.route);
            let result: HandlerResult = Err(ApiError::method_not_allowed(msg));
            return result.into();
        }
        Resolution::NotFound => {
            let msg = format!("No route for: {}", req.route);
            let result: HandlerResult = Err(ApiError::not_found(msg));
            return result.into();
        }
    };
    tracing::debug!(?id, route = %req.route, "function trigger matched");

    let result = match id {
        RouteId::Ping => Ok(handlers::ping()),
        RouteId::Health => handlers::health(),
        RouteId::ListCourses => courses::list(state).await,
        RouteId::CreateCourse => courses::create(state, &req.body).await,
        RouteId::GetCourse => courses::get(state, param(&params, "id")).await,
        RouteId::UpdateCourse => courses::update(state, param(&params, "id"), &req.body).await,
        RouteId::DeleteCourse => courses::delete(state, param(&params, "id")).await,
        RouteId::ReadObject(flavor) => {
            let key = objects::resolve_key(flavor, param(&params, flavor.key_field()), &req.query);
            objects::read(state, flavor, &key).await
        }
        RouteId::ListObjects(flavor) => objects::list(state, flavor).await,
        RouteId::ObjectExists(flavor) => {
            let key = objects::resolve_key(flavor, param(&params, flavor.key_field()), &req.query);
            objects::exists(state, flavor, &key).await
        }
    };
    result.into()
}
