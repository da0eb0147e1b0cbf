mod common;

use std::time::Duration;
use axum::http::StatusCode;
use common::{parse_body, TestApp};
use gig_booking_backend::domain::{
    events::DomainEvent,
    models::profile::{Profile, Role},
    ports::ProfileRepository,
};
use gig_booking_backend::infra::repositories::sqlite_profile_repo::SqliteProfileRepo;
use serde_json::json;

const MAKER: &str = "bbbbbbbb-0000-0000-0000-000000000001";
const GOER: &str = "bbbbbbbb-0000-0000-0000-000000000002";

#[tokio::test]
async fn test_create_and_fetch_profile() {
    let app = TestApp::new().await;

    let res = app.send("POST", "/api/v1/profiles", Some(MAKER), Some(json!({
        "display_name": "Kari Trio", "role": "maker", "bio": "Jazz from Bergen"
    }))).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    assert_eq!(body["role"], "maker");
    assert_eq!(body["current_mode"], "maker");

    let res = app.send("POST", "/api/v1/profiles", Some(MAKER), Some(json!({
        "display_name": "Again", "role": "maker"
    }))).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = app.send("GET", "/api/v1/profiles/me", Some(MAKER), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["display_name"], "Kari Trio");
}

#[tokio::test]
async fn test_update_profile() {
    let app = TestApp::new().await;
    app.send("POST", "/api/v1/profiles", Some(GOER), Some(json!({"display_name": "Ola", "role": "goer"}))).await;

    let res = app.send("PUT", "/api/v1/profiles/me", Some(GOER), Some(json!({"bio": "Goes to every gig"}))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["display_name"], "Ola");
    assert_eq!(body["bio"], "Goes to every gig");

    let res = app.send("PUT", "/api/v1/profiles/me", Some(GOER), Some(json!({"display_name": "  "}))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_mode_switching_rules_and_event() {
    let app = TestApp::new().await;
    let mut events = app.state.events.subscribe();

    app.send("POST", "/api/v1/profiles", Some(MAKER), Some(json!({"display_name": "Band", "role": "maker"}))).await;
    app.send("POST", "/api/v1/profiles", Some(GOER), Some(json!({"display_name": "Fan", "role": "goer"}))).await;

    let res = app.send("PUT", "/api/v1/profiles/me/mode", Some(MAKER), Some(json!({"mode": "goer"}))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["role"], "maker");
    assert_eq!(body["current_mode"], "goer");

    assert_eq!(
        events.recv().await.unwrap(),
        DomainEvent::ModeChanged { user_id: MAKER.to_string(), mode: Role::Goer }
    );

    let res = app.send("PUT", "/api/v1/profiles/me/mode", Some(GOER), Some(json!({"mode": "maker"}))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.send("PUT", "/api/v1/profiles/me/mode", Some(GOER), Some(json!({"mode": "admin"}))).await;
    assert!(res.status().is_client_error());
}

#[tokio::test]
async fn test_profile_provisioned_late_is_found_by_polling() {
    let app = TestApp::new().await;

    let repo = SqliteProfileRepo::new(app.pool.clone());
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        repo.create(&Profile::new(GOER.to_string(), "Late Fan".to_string(), Role::Goer, None))
            .await
            .unwrap();
    });

    let res = app.send("GET", "/api/v1/profiles/me", Some(GOER), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["display_name"], "Late Fan");
}

#[tokio::test]
async fn test_missing_profile_gives_up_with_not_found() {
    let app = TestApp::new().await;
    let res = app.send("GET", "/api/v1/profiles/me", Some(GOER), None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(parse_body(res).await["error"], "Profile not found");
}
