mod common;
mod http_helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::read_json;
use http_helpers::json_request;
use lamp_control::app::{build_router, AppState};
use lamp_control::store::memory::InMemoryLampStore;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> axum::routing::RouterIntoService<Body, ()> {
    let state = AppState {
        api_version: "v1".to_string(),
        store: Arc::new(InMemoryLampStore::new()),
    };
    build_router(state).into_service()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

async fn create_lamps(app: &axum::routing::RouterIntoService<Body, ()>, count: usize) -> Vec<String> {
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let request = json_request("POST", "/lamps", serde_json::json!({ "status": i % 2 == 0 }));
        let response = app.clone().oneshot(request).await.expect("create");
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = read_json(response).await;
        ids.push(body["id"].as_str().expect("id").to_string());
    }
    ids
}

async fn list_ids(
    app: &axum::routing::RouterIntoService<Body, ()>,
    uri: &str,
) -> (Vec<String>, Option<String>, bool) {
    let response = app.clone().oneshot(get_request(uri)).await.expect("list");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let ids = body["data"]
        .as_array()
        .expect("data")
        .iter()
        .map(|lamp| lamp["id"].as_str().expect("id").to_string())
        .collect();
    let next_cursor = body["nextCursor"].as_str().map(str::to_string);
    let has_more = body["hasMore"].as_bool().expect("hasMore");
    (ids, next_cursor, has_more)
}

#[tokio::test]
async fn thirty_lamps_paginate_in_two_pages() {
    let app = app();
    create_lamps(&app, 30).await;

    let (first, next_cursor, has_more) = list_ids(&app, "/lamps?pageSize=25").await;
    assert_eq!(first.len(), 25);
    assert!(has_more);
    assert_eq!(next_cursor.as_deref(), Some("25"));

    let (second, next_cursor, has_more) = list_ids(&app, "/lamps?pageSize=25&cursor=25").await;
    assert_eq!(second.len(), 5);
    assert!(!has_more);
    assert_eq!(next_cursor, None);

    // Both pages together visit each lamp exactly once, in listing order.
    let (all, _, _) = list_ids(&app, "/lamps?pageSize=100").await;
    let mut walked = first;
    walked.extend(second);
    assert_eq!(walked, all);
}

#[tokio::test]
async fn cursor_walk_visits_every_lamp_once() {
    let app = app();
    create_lamps(&app, 17).await;

    let (all, _, _) = list_ids(&app, "/lamps?pageSize=100").await;
    let mut walked: Vec<String> = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let uri = match &cursor {
            Some(cursor) => format!("/lamps?pageSize=5&cursor={cursor}"),
            None => "/lamps?pageSize=5".to_string(),
        };
        let (ids, next_cursor, has_more) = list_ids(&app, &uri).await;
        walked.extend(ids);
        match (has_more, next_cursor) {
            (true, Some(next)) => cursor = Some(next),
            (false, None) => break,
            (has_more, next_cursor) => {
                panic!("inconsistent page: has_more={has_more}, next_cursor={next_cursor:?}")
            }
        }
    }
    assert_eq!(walked, all);
}

#[tokio::test]
async fn bad_cursors_behave_like_the_first_page() {
    let app = app();
    create_lamps(&app, 3).await;

    let (baseline, _, _) = list_ids(&app, "/lamps").await;
    let (garbage, _, _) = list_ids(&app, "/lamps?cursor=not-a-number").await;
    let (negative, _, _) = list_ids(&app, "/lamps?cursor=-5").await;
    assert_eq!(garbage, baseline);
    assert_eq!(negative, baseline);
}

#[tokio::test]
async fn page_size_is_defaulted_and_clamped() {
    let app = app();
    create_lamps(&app, 30).await;

    // No pageSize, and unparseable or non-positive ones, fall back to 25.
    for uri in ["/lamps", "/lamps?pageSize=abc", "/lamps?pageSize=0", "/lamps?pageSize=-3"] {
        let (ids, _, has_more) = list_ids(&app, uri).await;
        assert_eq!(ids.len(), 25, "uri: {uri}");
        assert!(has_more, "uri: {uri}");
    }

    // Oversized requests clamp to the maximum rather than failing.
    let (ids, _, has_more) = list_ids(&app, "/lamps?pageSize=1000").await;
    assert_eq!(ids.len(), 30);
    assert!(!has_more);
}

#[tokio::test]
async fn cursor_past_the_end_returns_an_empty_page() {
    let app = app();
    create_lamps(&app, 4).await;

    let (ids, next_cursor, has_more) = list_ids(&app, "/lamps?cursor=100").await;
    assert!(ids.is_empty());
    assert_eq!(next_cursor, None);
    assert!(!has_more);
}

#[tokio::test]
async fn deleted_lamps_drop_out_of_the_listing() {
    let app = app();
    let ids = create_lamps(&app, 6).await;

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/lamps/{}", ids[2]))
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(delete).await.expect("delete");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (listed, _, _) = list_ids(&app, "/lamps").await;
    assert_eq!(listed.len(), 5);
    assert!(!listed.contains(&ids[2]));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = app();
    let response = app
        .clone()
        .oneshot(get_request("/openapi.json"))
        .await
        .expect("openapi");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert!(body["paths"]["/lamps"].is_object());
    assert!(body["paths"]["/lamps/{lamp_id}"].is_object());
}
