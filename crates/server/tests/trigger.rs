use axum::http::{Method, StatusCode};
use serde_json::json;
use service::courses::{CourseService, CourseStore};

use server::{
    state::ServerState,
    trigger::{dispatch, TriggerRequest},
};

fn state() -> ServerState {
    ServerState::new(CourseService::new(CourseStore::new()))
}

#[tokio::test]
async fn course_scenario_through_dispatch() {
    let state = state();

    let created = dispatch(
        &state,
        TriggerRequest::new(Method::POST, "courses").with_body(r#"{"name":"Java","price":99.99}"#),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.content_type, Some("application/json"));
    assert_eq!(created.json().unwrap(), json!({"id": 1, "name": "Java", "price": 99.99}));

    let updated = dispatch(
        &state,
        TriggerRequest::new(Method::PUT, "courses/1").with_body(r#"{"name":"Java2","price":10.0}"#),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.json().unwrap()["name"], "Java2");

    let deleted = dispatch(&state, TriggerRequest::new(Method::DELETE, "courses/1")).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert!(deleted.body.is_empty());

    let missing = dispatch(&state, TriggerRequest::new(Method::GET, "courses/1")).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.json().unwrap()["error"], "Course not found with id: 1");
}

#[tokio::test]
async fn ping_is_text() {
    let res = dispatch(&state(), TriggerRequest::new(Method::GET, "/ping")).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.text(), "pong");
}

#[tokio::test]
async fn unknown_route_and_wrong_method() {
    let state = state();
    let res = dispatch(&state, TriggerRequest::new(Method::GET, "instructors/1")).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert!(res.json().unwrap()["error"].as_str().unwrap().contains("instructors/1"));

    let res = dispatch(&state, TriggerRequest::new(Method::POST, "courses/1")).await;
    assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn invalid_id_and_unconfigured_storage() {
    let state = state();
    let res = dispatch(&state, TriggerRequest::new(Method::DELETE, "courses/x1")).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json().unwrap()["error"], "Invalid course ID format: x1");

    let res = dispatch(
        &state,
        TriggerRequest::new(Method::GET, "courses/s3/exists/a.txt").with_query("objectKey", "b.txt"),
    )
    .await;
    assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE);
}
