mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;

const FAN: &str = "cccccccc-0000-0000-0000-000000000001";
const MAKER: &str = "cccccccc-0000-0000-0000-000000000002";
const OTHER_MAKER: &str = "cccccccc-0000-0000-0000-000000000003";

#[tokio::test]
async fn test_toggle_favorite_maker() {
    let app = TestApp::new().await;
    let uri = format!("/api/v1/favorites/makers/{}", MAKER);

    let res = app.send("POST", &uri, Some(FAN), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["favorite"], true);

    let res = app.send("POST", &uri, Some(FAN), None).await;
    assert_eq!(parse_body(res).await["favorite"], false);

    let res = app.send("GET", "/api/v1/favorites/makers", Some(FAN), None).await;
    assert!(parse_body(res).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_favorite_makers_newest_first() {
    let app = TestApp::new().await;

    app.send("POST", &format!("/api/v1/favorites/makers/{}", MAKER), Some(FAN), None).await;
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    app.send("POST", &format!("/api/v1/favorites/makers/{}", OTHER_MAKER), Some(FAN), None).await;

    let res = app.send("GET", "/api/v1/favorites/makers", Some(FAN), None).await;
    let list = parse_body(res).await;
    assert_eq!(list[0]["maker_id"], OTHER_MAKER);
    assert_eq!(list[1]["maker_id"], MAKER);
}

#[tokio::test]
async fn test_cannot_favorite_yourself() {
    let app = TestApp::new().await;
    let res = app.send("POST", &format!("/api/v1/favorites/makers/{}", MAKER), Some(MAKER), None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

async fn listed_booking(app: &TestApp) -> String {
    let booking = app.create_booking(MAKER, OTHER_MAKER, json!({
        "title": "Release party", "is_public_after_approval": true
    })).await;
    let id = booking["id"].as_str().unwrap().to_string();
    for party in [MAKER, OTHER_MAKER] {
        app.send("POST", &format!("/api/v1/bookings/{}/approve", id), Some(party), None).await;
    }
    id
}

#[tokio::test]
async fn test_toggle_favorite_event() {
    let app = TestApp::new().await;
    let id = listed_booking(&app).await;

    let res = app.send("POST", &format!("/api/v1/favorites/events/{}", id), Some(FAN), None).await;
    assert_eq!(parse_body(res).await["favorite"], true);

    let res = app.send("GET", "/api/v1/favorites/events", Some(FAN), None).await;
    let list = parse_body(res).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["booking_id"], id.as_str());

    let res = app.send("POST", "/api/v1/favorites/events/no-such-booking", Some(FAN), None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_outsider_cannot_favorite_private_booking() {
    let app = TestApp::new().await;
    let booking = app.create_booking(MAKER, OTHER_MAKER, json!({
        "title": "Closed rehearsal", "is_public_after_approval": false
    })).await;
    let id = booking["id"].as_str().unwrap();

    let res = app.send("POST", &format!("/api/v1/favorites/events/{}", id), Some(FAN), None).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app.send("GET", "/api/v1/favorites/events", Some(FAN), None).await;
    assert!(parse_body(res).await.as_array().unwrap().is_empty());

    // The parties themselves still can
    let res = app.send("POST", &format!("/api/v1/favorites/events/{}", id), Some(OTHER_MAKER), None).await;
    assert_eq!(parse_body(res).await["favorite"], true);
}

#[tokio::test]
async fn test_favorites_require_auth() {
    let app = TestApp::new().await;
    let res = app.send("GET", "/api/v1/favorites/events", None, None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
