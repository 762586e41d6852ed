//! Integration tests for availability and health endpoints.

use axum::http::StatusCode;

use hotel_core::types::HotelId;
use hotel_entity::user::UserRole;

use crate::helpers::{TestApp, day, user_token};

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_availability_reflects_bookings() {
    let app = TestApp::new().await;
    let (_, token) = user_token(UserRole::User);
    app.create_booking(&token, 10, 12, 1).await;

    let path = format!(
        "/api/hotels/{}/availability?checkIn={}&checkOut={}&rooms=2",
        app.hotel_id,
        day(11),
        day(13)
    );
    let response = app.request("GET", &path, None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let rooms = response.body["data"]["rooms"].as_array().expect("rooms");
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["roomId"], app.room_id.to_string());
    assert_eq!(rooms[0]["totalRooms"], 2);
    assert_eq!(rooms[0]["bookedRooms"], 1);
    assert_eq!(rooms[0]["availableRooms"], 1);
    assert_eq!(rooms[0]["isAvailable"], false);
}

#[tokio::test]
async fn test_availability_ignores_touching_stays() {
    let app = TestApp::new().await;
    let (_, token) = user_token(UserRole::User);
    app.create_booking(&token, 10, 12, 2).await;

    let path = format!(
        "/api/hotels/{}/availability?checkIn={}&checkOut={}&roomId={}",
        app.hotel_id,
        day(12),
        day(14),
        app.room_id
    );
    let response = app.request("GET", &path, None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["rooms"][0]["availableRooms"], 2);
    assert_eq!(response.body["data"]["rooms"][0]["isAvailable"], true);
}

#[tokio::test]
async fn test_availability_errors() {
    let app = TestApp::new().await;

    let path = format!(
        "/api/hotels/{}/availability?checkIn={}&checkOut={}",
        HotelId::new(),
        day(1),
        day(2)
    );
    let response = app.request("GET", &path, None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let path = format!(
        "/api/hotels/{}/availability?checkIn={}&checkOut={}",
        app.hotel_id,
        day(3),
        day(3)
    );
    let response = app.request("GET", &path, None, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request("GET", "/api/hotels/oops/availability?checkIn=x&checkOut=y", None, None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let path = format!("/api/hotels/{}/availability", app.hotel_id);
    let response = app.request("GET", &path, None, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
