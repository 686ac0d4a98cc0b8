use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use placeshare::config::Config;
use std::sync::Arc;
use tower::ServiceExt;

async fn spawn_app() -> (Arc<placeshare::api::AppState>, Router) {
    let db_path =
        std::env::temp_dir().join(format!("placeshare-api-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_url = format!("sqlite:{}", db_path.display());
    config.search.page_size = 2;

    let state = placeshare::api::create_app_state_from_config(config, None)
        .await
        .expect("failed to create app state");
    let router = placeshare::api::router(state.clone());
    (state, router)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_as(uri: &str, user: i32, role: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("X-User-Id", user.to_string())
        .header("X-User-Role", role)
        .body(Body::empty())
        .unwrap()
}

fn send_as(method: &str, uri: &str, user: i32, role: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("X-User-Id", user.to_string())
        .header("X-User-Role", role)
        .body(Body::empty())
        .unwrap()
}

async fn create_place(app: &Router, user: i32, body: serde_json::Value) -> i64 {
    let request = Request::builder()
        .method("POST")
        .uri("/api/places")
        .header("X-User-Id", user.to_string())
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let (status, json) = send(app, request).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {json}");
    json["data"]["id"].as_i64().unwrap()
}

fn names(json: &serde_json::Value) -> Vec<String> {
    json["data"]["places"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_reports_strategy() {
    let (_state, app) = spawn_app().await;

    let (status, json) = send(&app, get("/api/system/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["database"], true);
    assert_eq!(json["data"]["search_strategy"], "plain");
}

#[tokio::test]
async fn test_create_requires_identity() {
    let (_state, app) = spawn_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/places")
        .header("Content-Type", "application/json")
        .body(Body::from(r#"{"name":"Moonhouse"}"#))
        .unwrap();
    let (status, json) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_create_validates_payload() {
    let (_state, app) = spawn_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/places")
        .header("X-User-Id", "1")
        .header("Content-Type", "application/json")
        .body(Body::from(r#"{"name":"   "}"#))
        .unwrap();
    let (status, _) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_and_suggest_endpoints() {
    let (_state, app) = spawn_app().await;
    create_place(&app, 1, serde_json::json!({"name": "Moonhouse", "city": "Melbourne"})).await;
    let station = create_place(
        &app,
        1,
        serde_json::json!({"name": "Tokyo Station", "city": "Chiyoda"}),
    )
    .await;

    let (status, json) = send(&app, get("/api/places?q=station")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["places"][0]["id"].as_i64(), Some(station));
    assert_eq!(json["data"]["places"].as_array().unwrap().len(), 1);
    assert!(json["data"].get("total").is_none());

    let (status, json) = send(&app, get("/api/places?q=xyz123")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["data"]["places"].as_array().unwrap().is_empty());

    let (status, json) = send(&app, get("/api/places/suggest?q=tok&limit=5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], serde_json::json!(["Tokyo Station", "Chiyoda"]));

    let (status, json) = send(&app, get("/api/places/suggest?q=%20%20")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], serde_json::json!([]));
}

#[tokio::test]
async fn test_listing_pages_newest_first() {
    let (_state, app) = spawn_app().await;
    for name in ["First", "Second", "Third"] {
        create_place(&app, 1, serde_json::json!({ "name": name })).await;
    }

    let (status, json) = send(&app, get("/api/places")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&json), vec!["Third", "Second"]);
    assert_eq!(json["data"]["total"], 3);

    let (_, json) = send(&app, get("/api/places?page=2")).await;
    assert_eq!(names(&json), vec!["First"]);

    let (status, _) = send(&app, get("/api/places?page=0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_mine_filter() {
    let (_state, app) = spawn_app().await;
    create_place(&app, 1, serde_json::json!({"name": "Ramen Alley"})).await;
    create_place(&app, 2, serde_json::json!({"name": "Ramen Museum"})).await;

    let (status, _) = send(&app, get("/api/places?q=ramen&mine=true")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, json) = send(&app, get_as("/api/places?q=ramen&mine=true", 2, "member")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&json), vec!["Ramen Museum"]);

    let (_, json) = send(&app, get_as("/api/places/suggest?q=ramen&mine=true", 1, "member")).await;
    assert_eq!(json["data"], serde_json::json!(["Ramen Alley"]));
}

#[tokio::test]
async fn test_soft_delete_and_restore() {
    let (_state, app) = spawn_app().await;
    let id = create_place(&app, 5, serde_json::json!({"name": "Osaka Castle"})).await;
    let uri = format!("/api/places/{id}");

    let (status, _) = send(&app, send_as("DELETE", &uri, 6, "member")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, send_as("DELETE", &uri, 5, "member")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = send(&app, get("/api/places?q=osaka")).await;
    assert!(json["data"]["places"].as_array().unwrap().is_empty());

    let (status, _) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = send(&app, get_as(&uri, 5, "member")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["data"]["deleted_at"].is_string());

    let (status, _) = send(&app, get_as("/api/places?deleted=only", 5, "member")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, json) = send(&app, get_as("/api/places?deleted=only&q=castle", 1, "admin")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&json), vec!["Osaka Castle"]);

    let restore_uri = format!("/api/places/{id}/restore");
    let (status, json) = send(&app, send_as("POST", &restore_uri, 1, "admin")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["data"].get("deleted_at").is_none());

    let (status, _) = send(&app, send_as("POST", &restore_uri, 1, "admin")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, json) = send(&app, get("/api/places?q=osaka")).await;
    assert_eq!(names(&json), vec!["Osaka Castle"]);
}

#[tokio::test]
async fn test_malformed_identity_and_ids() {
    let (_state, app) = spawn_app().await;

    let (status, _) = send(&app, get_as("/api/places", 3, "superuser")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, get("/api/places/0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, get("/api/places/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_storage_failure_returns_503() {
    use sea_orm::ConnectionTrait;

    let (state, app) = spawn_app().await;
    create_place(&app, 1, serde_json::json!({"name": "Tokyo Station"})).await;

    state
        .store()
        .conn
        .execute_unprepared("DROP TABLE places")
        .await
        .unwrap();

    let (status, json) = send(&app, get("/api/places?q=station")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_out_of_range_pages_are_rejected() {
    let (_state, app) = spawn_app().await;
    create_place(&app, 1, serde_json::json!({"name": "Tokyo Station"})).await;

    for uri in [
        "/api/places?q=station&page=18446744073709551615",
        "/api/places?page=18446744073709551615",
        "/api/places?q=station&page=4611686018427387904",
        "/api/places?page=100001",
    ] {
        let (status, json) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri {uri}");
        assert_eq!(json["success"], false);
    }

    let (status, json) = send(&app, get("/api/places?q=station&page=100000")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["data"]["places"].as_array().unwrap().is_empty());

    let (status, _) = send(&app, get("/api/system/health")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_service_rejects_unbindable_pages() {
    use placeshare::services::{PlaceError, PlaceFilter, PlaceService};

    let (state, app) = spawn_app().await;
    create_place(&app, 1, serde_json::json!({"name": "Tokyo Station"})).await;

    let service = state.place_service();
    for filter in [PlaceFilter::default(), PlaceFilter::text("station")] {
        let err = service.list(None, filter, u64::MAX).await.unwrap_err();
        assert!(matches!(err, PlaceError::Validation(_)));
    }
}

#[tokio::test]
async fn test_restore_of_live_place_changes_nothing() {
    let (state, app) = spawn_app().await;
    let id = create_place(&app, 5, serde_json::json!({"name": "Osaka Castle"})).await;
    let place_id = placeshare::domain::PlaceId::new(i32::try_from(id).unwrap());

    assert!(!state.store().restore_place(place_id).await.unwrap());

    let (status, _) = send(
        &app,
        send_as("POST", &format!("/api/places/{id}/restore"), 5, "member"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
