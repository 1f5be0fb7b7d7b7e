use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use todoctl_server::db::{create_pool, create_tables, Todo};
use todoctl_server::{build_router, AppState, ServerConfig};
use tower::ServiceExt;

async fn app() -> Router {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    create_tables(&pool).await.unwrap();
    build_router(AppState::new(pool), &ServerConfig::default())
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

async fn list(app: &Router) -> Vec<Todo> {
    let resp = app.clone().oneshot(empty_request("GET", "/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await
}

const GO_STUDY: &str =
    r#"{"title":"Go study","description":"pass tests","priority":5,"complete":false}"#;

// --- read all ---

#[tokio::test]
async fn read_all_empty() {
    let app = app().await;
    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn read_all_in_insertion_order() {
    let app = app().await;
    for title in ["first", "second", "third"] {
        let body = format!(
            r#"{{"title":"{title}","description":"d","priority":1,"complete":false}}"#
        );
        let resp = app
            .clone()
            .oneshot(json_request("POST", "/todo", &body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let titles: Vec<String> = list(&app).await.into_iter().map(|t| t.title).collect();
    assert_eq!(titles, ["first", "second", "third"]);
}

// --- create ---

#[tokio::test]
async fn create_returns_201_with_empty_body() {
    let app = app().await;
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/todo", GO_STUDY))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert!(body_bytes(resp).await.is_empty());

    let todos = list(&app).await;
    assert_eq!(todos.len(), 1);
    let todo = &todos[0];
    assert!(todo.id >= 1);
    assert_eq!(todo.title, "Go study");
    assert_eq!(todo.description, "pass tests");
    assert_eq!(todo.priority, 5);
    assert!(!todo.complete);
}

#[tokio::test]
async fn create_invalid_payloads_return_422_and_write_nothing() {
    let app = app().await;
    let long_description = "d".repeat(101);
    let bodies = [
        // title length 2
        r#"{"title":"ab","description":"d","priority":1,"complete":false}"#.to_string(),
        // priority 0 and 6
        r#"{"title":"abc","description":"d","priority":0,"complete":false}"#.to_string(),
        r#"{"title":"abc","description":"d","priority":6,"complete":false}"#.to_string(),
        // description length 0 and 101
        r#"{"title":"abc","description":"","priority":1,"complete":false}"#.to_string(),
        format!(
            r#"{{"title":"abc","description":"{long_description}","priority":1,"complete":false}}"#
        ),
        // complete is not a boolean
        r#"{"title":"abc","description":"d","priority":1,"complete":"yes"}"#.to_string(),
        // missing field
        r#"{"title":"abc","description":"d","priority":1}"#.to_string(),
        // not JSON at all
        "title=abc".to_string(),
    ];

    for body in bodies {
        let resp = app
            .clone()
            .oneshot(json_request("POST", "/todo", &body))
            .await
            .unwrap();
        assert_eq!(
            resp.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "body should be rejected: {body}"
        );
    }

    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn create_reports_offending_field() {
    let app = app().await;
    let resp = app
        .oneshot(json_request(
            "POST",
            "/todo",
            r#"{"title":"abc","description":"d","priority":9,"complete":false}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["field"], "priority");
}

#[tokio::test]
async fn create_without_content_type_returns_422() {
    let app = app().await;
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/todo")
                .body(GO_STUDY.to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- read one ---

#[tokio::test]
async fn read_one_not_found() {
    let app = app().await;
    let resp = app.oneshot(empty_request("GET", "/todo/999")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["message"], "resource not found");
}

#[tokio::test]
async fn ids_beyond_i64_are_not_found() {
    let app = app().await;
    let resp = app
        .clone()
        .oneshot(empty_request("GET", "/todo/99999999999999999999"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app
        .clone()
        .oneshot(json_request("PUT", "/todo/99999999999999999999", GO_STUDY))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(list(&app).await.is_empty());

    let resp = app
        .oneshot(empty_request("DELETE", "/todo/-99999999999999999999"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn invalid_ids_return_422() {
    let app = app().await;
    for (method, uri) in [
        ("GET", "/todo/0"),
        ("GET", "/todo/-3"),
        ("GET", "/todo/abc"),
        ("DELETE", "/todo/0"),
    ] {
        let resp = app
            .clone()
            .oneshot(empty_request(method, uri))
            .await
            .unwrap();
        assert_eq!(
            resp.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "{method} {uri}"
        );
    }

    let resp = app
        .oneshot(json_request("PUT", "/todo/0", GO_STUDY))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- update ---

#[tokio::test]
async fn update_missing_returns_404_and_creates_nothing() {
    let app = app().await;
    let resp = app
        .clone()
        .oneshot(json_request("PUT", "/todo/999", GO_STUDY))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn update_invalid_payloads_return_422_and_leave_row_unchanged() {
    let app = app().await;
    app.clone()
        .oneshot(json_request("POST", "/todo", GO_STUDY))
        .await
        .unwrap();
    let before = list(&app).await;
    let uri = format!("/todo/{}", before[0].id);

    let long_description = "d".repeat(101);
    let bodies = [
        r#"{"title":"ab","description":"changed","priority":1,"complete":true}"#.to_string(),
        r#"{"title":"changed","description":"changed","priority":0,"complete":true}"#.to_string(),
        r#"{"title":"changed","description":"changed","priority":6,"complete":true}"#.to_string(),
        r#"{"title":"changed","description":"","priority":1,"complete":true}"#.to_string(),
        format!(
            r#"{{"title":"changed","description":"{long_description}","priority":1,"complete":true}}"#
        ),
        r#"{"title":"changed","description":"changed","priority":1,"complete":"true"}"#.to_string(),
        r#"{"title":"changed","description":"changed","priority":1}"#.to_string(),
    ];

    for body in bodies {
        let resp = app
            .clone()
            .oneshot(json_request("PUT", &uri, &body))
            .await
            .unwrap();
        assert_eq!(
            resp.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "body should be rejected: {body}"
        );
    }

    assert_eq!(list(&app).await, before);
}

#[tokio::test]
async fn stalled_upload_does_not_hold_a_connection() {
    let app = app().await;

    // Body that never yields a chunk; the in-memory pool has one connection
    let stalled = Request::builder()
        .method("POST")
        .uri("/todo")
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from_stream(futures::stream::pending::<
            Result<Bytes, std::io::Error>,
        >()))
        .unwrap();
    let upload = tokio::spawn(app.clone().oneshot(stalled));
    tokio::time::sleep(Duration::from_millis(50)).await;

    let resp = tokio::time::timeout(
        Duration::from_secs(3),
        app.clone().oneshot(empty_request("GET", "/")),
    )
    .await
    .expect("GET / waited on a stalled upload")
    .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = tokio::time::timeout(
        Duration::from_secs(3),
        app.clone().oneshot(json_request("POST", "/todo", GO_STUDY)),
    )
    .await
    .expect("POST waited on a stalled upload")
    .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    upload.abort();
}

// --- delete ---

#[tokio::test]
async fn delete_missing_returns_404() {
    let app = app().await;
    let resp = app
        .oneshot(empty_request("DELETE", "/todo/999"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    let app = app().await;

    // create
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/todo", GO_STUDY))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    // list - exactly one matching record
    let todos = list(&app).await;
    assert_eq!(todos.len(), 1);
    let id = todos[0].id;

    // get
    let resp = app
        .clone()
        .oneshot(empty_request("GET", &format!("/todo/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Todo = body_json(resp).await;
    assert_eq!(fetched, todos[0]);

    // update - full replace
    let resp = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/todo/{id}"),
            r#"{"title":"Go study more","description":"pass all tests","priority":3,"complete":true}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    let resp = app
        .clone()
        .oneshot(empty_request("GET", &format!("/todo/{id}")))
        .await
        .unwrap();
    let updated: Todo = body_json(resp).await;
    assert_eq!(
        updated,
        Todo {
            id,
            title: "Go study more".into(),
            description: "pass all tests".into(),
            priority: 3,
            complete: true,
        }
    );

    // delete
    let resp = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/todo/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // second delete - 404
    let resp = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/todo/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // get after delete - 404
    let resp = app
        .clone()
        .oneshot(empty_request("GET", &format!("/todo/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    assert!(list(&app).await.is_empty());
}

// --- health ---

#[tokio::test]
async fn health_reports_database_ready() {
    let app = app().await;
    let resp = app.oneshot(empty_request("GET", "/health")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ready");
}
