use std::net::SocketAddr;
use std::sync::Arc;

use object_store::{memory::InMemory, path::Path, ObjectStore, PutPayload};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use service::{
    courses::{CourseService, CourseStore},
    objects::ObjectProxy,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::{routes, state::ServerState};

struct TestApp {
    base_url: String,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn seeded_store(objects: &[(&str, &'static str)]) -> anyhow::Result<Arc<InMemory>> {
    let store = Arc::new(InMemory::new());
    for (key, content) in objects {
        store.put(&Path::from(*key), PutPayload::from(bytes::Bytes::from_static(content.as_bytes()))).await?;
    }
    Ok(store)
}

async fn start_server(state: ServerState) -> anyhow::Result<TestApp> {
    let app = routes::build_router(state, CorsLayer::very_permissive());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

async fn start_empty() -> anyhow::Result<TestApp> {
    start_server(ServerState::new(CourseService::new(CourseStore::new()))).await
}

async fn start_with_objects() -> anyhow::Result<TestApp> {
    let s3 = seeded_store(&[("syllabus/java.txt", "week 1: types"), ("readme.md", "# courses")]).await?;
    let blob = seeded_store(&[("notes.txt", "hello blob")]).await?;
    let state = ServerState::new(CourseService::new(CourseStore::new()))
        .with_s3(ObjectProxy::new(s3, "course-bucket"))
        .with_blob(ObjectProxy::new(blob, "course-container"));
    start_server(state).await
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_public_ping_and_health() -> anyhow::Result<()> {
    let app = start_empty().await?;
    let res = client().get(app.url("/ping")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.text().await?, "pong");

    let res = client().get(app.url("/health")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn e2e_course_lifecycle() -> anyhow::Result<()> {
    let app = start_empty().await?;
    let c = client();

    let res = c.post(app.url("/courses")).json(&json!({"name": "Java", "price": 99.99})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created: Value = res.json().await?;
    assert_eq!(created, json!({"id": 1, "name": "Java", "price": 99.99}));

    let res = c.get(app.url("/courses/1")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, created);

    let res = c.put(app.url("/courses/1")).json(&json!({"name": "Java2", "price": 10.0})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated: Value = res.json().await?;
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["name"], "Java2");

    let res = c.delete(app.url("/courses/1")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    assert!(res.bytes().await?.is_empty());

    let res = c.get(app.url("/courses/1")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "Course not found with id: 1");

    let res = c.post(app.url("/courses")).json(&json!({"name": "Rust", "price": 5.0})).send().await?;
    assert_eq!(res.json::<Value>().await?["id"], 2);
    Ok(())
}

#[tokio::test]
async fn e2e_course_bad_requests() -> anyhow::Result<()> {
    let app = start_empty().await?;
    let c = client();

    let res = c.get(app.url("/courses/abc")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["error"], "Invalid course ID format: abc");

    let res = c.post(app.url("/courses")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["error"], "Course data is required");

    let res = c.post(app.url("/courses")).json(&json!({"name": "  ", "price": 1.0})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c.post(app.url("/courses")).json(&json!({"name": "Free", "price": 0.0})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c.put(app.url("/courses/7")).json(&json!({"name": "Ghost", "price": 1.0})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.delete(app.url("/courses/7")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let listed: Vec<Value> = c.get(app.url("/courses")).send().await?.json().await?;
    assert!(listed.is_empty());
    Ok(())
}

#[tokio::test]
async fn e2e_s3_proxy() -> anyhow::Result<()> {
    let app = start_with_objects().await?;
    let c = client();

    let res = c.get(app.url("/courses/s3/list")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(
        res.json::<Value>().await?,
        json!({"bucket": "course-bucket", "objects": ["readme.md", "syllabus/java.txt"]})
    );

    let res = c.get(app.url("/courses/s3/read/syllabus/java.txt")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(
        res.json::<Value>().await?,
        json!({"objectKey": "syllabus/java.txt", "content": "week 1: types"})
    );

    let res = c.get(app.url("/courses/s3/exists/readme.md")).send().await?;
    assert_eq!(res.json::<Value>().await?, json!({"objectKey": "readme.md", "exists": true}));

    let res = c.get(app.url("/courses/s3/exists/missing.txt")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["exists"], false);

    let res = c.get(app.url("/courses/s3/read/missing.txt")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["error"], "Object not found in S3: missing.txt");
    Ok(())
}

#[tokio::test]
async fn e2e_blob_proxy_with_query_override() -> anyhow::Result<()> {
    let app = start_with_objects().await?;
    let c = client();

    let res = c.get(app.url("/courses/blob/list")).send().await?;
    assert_eq!(
        res.json::<Value>().await?,
        json!({"container": "course-container", "blobs": ["notes.txt"]})
    );

    let res = c.get(app.url("/courses/blob/read/ignored.txt?blobName=notes.txt")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"blobName": "notes.txt", "content": "hello blob"}));

    let res = c.get(app.url("/courses/blob/read/gone.txt")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["error"], "Blob not found: gone.txt");
    Ok(())
}

#[tokio::test]
async fn e2e_unconfigured_proxy_is_unavailable() -> anyhow::Result<()> {
    let app = start_empty().await?;
    let res = client().get(app.url("/courses/blob/exists/notes.txt")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.json::<Value>().await?["error"], "Blob storage is not configured");
    Ok(())
}

#[tokio::test]
async fn e2e_function_trigger_mount() -> anyhow::Result<()> {
    let app = start_with_objects().await?;
    let c = client();

    let res = c.post(app.url("/api/courses")).json(&json!({"name": "Go", "price": 20.0})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    assert_eq!(res.json::<Value>().await?["id"], 1);

    // both front-ends share the same store
    let res = c.get(app.url("/courses/1")).send().await?;
    assert_eq!(res.json::<Value>().await?["name"], "Go");

    let res = c.get(app.url("/api/courses/s3/read/readme.md")).send().await?;
    assert_eq!(res.json::<Value>().await?["content"], "# courses");

    let res = c.get(app.url("/api/students")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.delete(app.url("/api/ping")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::METHOD_NOT_ALLOWED);
    Ok(())
}
