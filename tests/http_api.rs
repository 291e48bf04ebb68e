//! HTTP API integration tests.
//!
//! Drives the router in-process with `tower::ServiceExt::oneshot`; every test
//! gets its own in-memory database.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use catalog::{CatalogService, Database};
use serde_json::{Value, json};
use tower::ServiceExt;

fn setup() -> Router {
    let service = CatalogService::new(Database::in_memory().expect("in-memory database"));
    {
        let conn = service.database().connection();
        conn.execute_batch(
            "INSERT INTO users (user_id, name) VALUES (1, 'Grace');
             INSERT INTO users (user_id, name) VALUES (2, 'Ada');",
        )
        .expect("seed users");
    }
    catalog::http::router(Arc::new(service))
}

async fn call(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let body = match body {
        Some(v) => Body::from(serde_json::to_string(&v).unwrap()),
        None => Body::empty(),
    };
    let req = builder.body(body).unwrap();
    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

fn resource_body(name: &str, user_id: i64) -> Value {
    json!({
        "resource_name": name,
        "author_name": "A",
        "url": "https://example.com",
        "description": "intro",
        "content_type": "video",
        "build_stage": "week 1",
        "opinion": "recommended",
        "opinion_reason": "short and clear",
        "user_id": user_id,
    })
}

#[tokio::test]
async fn full_resource_scenario() {
    let r = setup();

    let (s, body) = call(&r, "POST", "/resources", Some(resource_body("X", 1))).await;
    assert_eq!(s, StatusCode::CREATED);
    assert_eq!(body[0]["resource_id"], 1);
    assert_eq!(body[0]["resource_name"], "X");
    assert!(body[0]["time_date"].is_string());

    let (s, body) = call(
        &r,
        "POST",
        "/resources/1/comments",
        Some(json!({"comment_body": "nice", "user_id": 2})),
    )
    .await;
    assert_eq!(s, StatusCode::CREATED);
    assert_eq!(body[0]["comment_id"], 1);
    assert_eq!(body[0]["resource_id"], 1);

    let (s, body) = call(
        &r,
        "POST",
        "/resources/1/likes",
        Some(json!({"user_id": 2, "like_or_dislike": "like"})),
    )
    .await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(body, json!({"user_id": 2, "resource_id": 1, "liked": true}));

    let (s, body) = call(
        &r,
        "POST",
        "/resources/1/likes",
        Some(json!({"user_id": 2, "like_or_dislike": "dislike"})),
    )
    .await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(body["liked"], false);

    let (s, body) = call(&r, "GET", "/resources/1/likes", None).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(body["likes"], 0);
    assert_eq!(body["dislikes"], 1);

    let (s, body) = call(&r, "DELETE", "/resources/1", None).await;
    assert_eq!(s, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");

    let (s, body) = call(&r, "DELETE", "/resources/1?cascade=true", None).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert!(body["message"].as_str().unwrap().starts_with("Deleted resource 1"));

    let (s, _) = call(&r, "GET", "/resources/1", None).await;
    assert_eq!(s, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_resources_is_404_when_empty_then_newest_first() {
    let r = setup();

    let (s, body) = call(&r, "GET", "/resources", None).await;
    assert_eq!(s, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Could not find any rows");

    call(&r, "POST", "/resources", Some(resource_body("older", 1))).await;
    call(&r, "POST", "/resources", Some(resource_body("newer", 2))).await;

    let (s, body) = call(&r, "GET", "/resources", None).await;
    assert_eq!(s, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["resource_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["newer", "older"]);
}

#[tokio::test]
async fn create_resource_for_unknown_user_is_bad_request() {
    let r = setup();

    let (s, body) = call(&r, "POST", "/resources", Some(resource_body("X", 77))).await;

    assert_eq!(s, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("FOREIGN KEY"));
}

#[tokio::test]
async fn malformed_payload_is_bad_request() {
    let r = setup();

    let (s, body) = call(&r, "POST", "/tags", Some(json!({"name": "rust"}))).await;
    assert_eq!(s, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");

    call(&r, "POST", "/resources", Some(resource_body("X", 1))).await;
    let (s, _) = call(
        &r,
        "POST",
        "/resources/1/likes",
        Some(json!({"user_id": 1, "like_or_dislike": "love"})),
    )
    .await;
    assert_eq!(s, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn comments_list_and_delete() {
    let r = setup();
    call(&r, "POST", "/resources", Some(resource_body("X", 1))).await;

    let (s, _) = call(&r, "GET", "/resources/1/comments", None).await;
    assert_eq!(s, StatusCode::NOT_FOUND);

    for body in ["first", "second"] {
        call(
            &r,
            "POST",
            "/resources/1/comments",
            Some(json!({"comment_body": body, "user_id": 1})),
        )
        .await;
    }

    let (s, body) = call(&r, "DELETE", "/resources/comments/1", None).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(body["message"], "Deleted comment 1");

    let (s, body) = call(&r, "GET", "/resources/1/comments", None).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["comment_body"], "second");

    let (s, _) = call(&r, "DELETE", "/resources/comments/1", None).await;
    assert_eq!(s, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_votes_scoped_and_bulk() {
    let r = setup();
    call(&r, "POST", "/resources", Some(resource_body("X", 1))).await;
    for user_id in [1, 2] {
        call(
            &r,
            "POST",
            "/resources/1/likes",
            Some(json!({"user_id": user_id, "like_or_dislike": "like"})),
        )
        .await;
    }

    let (s, _) = call(&r, "DELETE", "/resources/1/likes?user_id=2", None).await;
    assert_eq!(s, StatusCode::OK);
    let (_, tally) = call(&r, "GET", "/resources/1/likes", None).await;
    assert_eq!(tally["likes"], 1);

    let (s, body) = call(&r, "DELETE", "/resources/1/likes", None).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(body["message"], "Deleted 1 likes/dislikes from 1");

    let (s, _) = call(&r, "DELETE", "/resources/1/likes", None).await;
    assert_eq!(s, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tags_create_list_delete() {
    let r = setup();

    let (s, body) = call(&r, "POST", "/tags", Some(json!({"tag_name": "rust"}))).await;
    assert_eq!(s, StatusCode::CREATED);
    assert_eq!(body, json!([{"tag_name": "rust"}]));

    let (s, body) = call(&r, "POST", "/tags", Some(json!({"tag_name": "rust"}))).await;
    assert_eq!(s, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("UNIQUE"));

    let (s, body) = call(&r, "GET", "/tags", None).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(body, json!([{"tag_name": "rust"}]));

    let (s, body) = call(&r, "DELETE", "/tags", Some(json!({"tag_name": "rust"}))).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(body["message"], "Deleted the tag rust");

    let (s, _) = call(&r, "GET", "/tags", None).await;
    assert_eq!(s, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn users_listed_by_name() {
    let r = setup();

    let (s, body) = call(&r, "GET", "/users", None).await;

    assert_eq!(s, StatusCode::OK);
    assert_eq!(body[0]["name"], "Ada");
    assert_eq!(body[1]["name"], "Grace");
}

#[tokio::test]
async fn study_list_round_trip() {
    let r = setup();
    call(&r, "POST", "/resources", Some(resource_body("X", 1))).await;

    let (s, body) = call(
        &r,
        "POST",
        "/users/2/study_list",
        Some(json!({"resource_id": 1})),
    )
    .await;
    assert_eq!(s, StatusCode::CREATED);
    assert_eq!(body, json!([{"user_id": 2, "resource_id": 1}]));

    // Saving again does not add a second entry.
    let (s, _) = call(
        &r,
        "POST",
        "/users/2/study-list",
        Some(json!({"resource_id": 1})),
    )
    .await;
    assert_eq!(s, StatusCode::CREATED);

    let (s, body) = call(&r, "GET", "/users/2/study-list", None).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (s, body) = call(
        &r,
        "DELETE",
        "/users/2/study-list",
        Some(json!({"resource_id": 1})),
    )
    .await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(body["message"], "Deleted resource 1 from your study-list");

    let (s, _) = call(&r, "GET", "/users/2/study-list", None).await;
    assert_eq!(s, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bad_path_and_query_parameters_get_json_errors() {
    let r = setup();
    call(&r, "POST", "/resources", Some(resource_body("X", 1))).await;

    for (method, uri) in [
        ("GET", "/resources/abc"),
        ("GET", "/users/abc/study-list"),
        ("DELETE", "/resources/1/likes?user_id=x"),
        ("DELETE", "/resources/1?cascade=yes"),
    ] {
        let (s, body) = call(&r, method, uri, None).await;
        assert_eq!(s, StatusCode::BAD_REQUEST, "{method} {uri}");
        assert_eq!(body["status"], "error", "{method} {uri}");
        assert!(
            body["message"]
                .as_str()
                .unwrap()
                .starts_with("Malformed request"),
            "{method} {uri}"
        );
    }

    // The resource was left alone by the rejected delete.
    let (s, _) = call(&r, "GET", "/resources/1", None).await;
    assert_eq!(s, StatusCode::OK);
}

#[tokio::test]
async fn study_list_accepts_string_resource_ids() {
    let r = setup();
    call(&r, "POST", "/resources", Some(resource_body("X", 1))).await;

    let (s, body) = call(
        &r,
        "POST",
        "/users/2/study-list",
        Some(json!({"resource_id": "1"})),
    )
    .await;
    assert_eq!(s, StatusCode::CREATED);
    assert_eq!(body, json!([{"user_id": 2, "resource_id": 1}]));

    let (s, body) = call(
        &r,
        "DELETE",
        "/users/2/study-list",
        Some(json!({"resource_id": "1"})),
    )
    .await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(body["message"], "Deleted resource 1 from your study-list");

    let (s, body) = call(
        &r,
        "DELETE",
        "/users/2/study-list",
        Some(json!({"resource_id": "one"})),
    )
    .await;
    assert_eq!(s, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}
