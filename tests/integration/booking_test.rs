//! Integration tests for the booking lifecycle.

use std::sync::Arc;

use axum::http::StatusCode;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use hotel_entity::user::UserRole;

use crate::helpers::{TestApp, user_token};

fn decimal(value: &serde_json::Value) -> Decimal {
    value
        .as_str()
        .expect("decimal should serialize as a string")
        .parse()
        .expect("decimal should parse")
}

#[tokio::test]
async fn test_create_booking_prices_and_holds() {
    let app = TestApp::new().await;
    let (user_id, token) = user_token(UserRole::User);

    let response = app
        .request(
            "POST",
            "/api/bookings",
            Some(app.booking_body(10, 13, 1)),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = &response.body["data"];
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["message"], "Booking created successfully");
    assert_eq!(data["status"], "pending_payment");
    assert_eq!(data["paymentStatus"], "pending");
    assert_eq!(data["userId"], user_id.to_string());
    assert_eq!(data["priceBreakdown"]["nights"], 3);
    assert_eq!(decimal(&data["priceBreakdown"]["subtotal"]), dec!(300));
    assert_eq!(decimal(&data["priceBreakdown"]["taxes"]), dec!(36));
    assert_eq!(decimal(&data["priceBreakdown"]["total"]), dec!(361));
    assert_eq!(decimal(&data["totalAmount"]), dec!(361));
}

#[tokio::test]
async fn test_create_requires_token() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/api/bookings", Some(app.booking_body(10, 12, 1)), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["success"], false);

    let response = app
        .request(
            "POST",
            "/api/bookings",
            Some(app.booking_body(10, 12, 1)),
            Some("not-a-jwt"),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sold_out_reports_availability() {
    let app = TestApp::new().await;
    let (_, token) = user_token(UserRole::User);

    app.create_booking(&token, 10, 12, 2).await;

    let response = app
        .request(
            "POST",
            "/api/bookings",
            Some(app.booking_body(11, 13, 1)),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");
    assert_eq!(response.body["details"]["available"], 0);
}

#[tokio::test]
async fn test_back_to_back_stays_share_inventory() {
    let app = TestApp::new().await;
    let (_, token) = user_token(UserRole::User);

    app.create_booking(&token, 10, 12, 2).await;
    app.create_booking(&token, 12, 14, 2).await;
}

#[tokio::test]
async fn test_rejects_invalid_requests() {
    let app = TestApp::new().await;
    let (_, token) = user_token(UserRole::User);

    let mut too_many_guests = app.booking_body(10, 12, 1);
    too_many_guests["guests"] = 3.into();
    let response = app
        .request("POST", "/api/bookings", Some(too_many_guests), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let mut bad_email = app.booking_body(10, 12, 1);
    bad_email["guestEmail"] = "nope".into();
    let response = app
        .request("POST", "/api/bookings", Some(bad_email), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Validation failed");

    let response = app
        .request(
            "POST",
            "/api/bookings",
            Some(app.booking_body(-2, 3, 1)),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/api/bookings",
            Some(app.booking_body(12, 10, 1)),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let mut wrong_hotel = app.booking_body(10, 12, 1);
    wrong_hotel["roomId"] = serde_json::json!(app.foreign_room_id);
    let response = app
        .request("POST", "/api/bookings", Some(wrong_hotel), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_confirm_payment_once() {
    let app = TestApp::new().await;
    let (_, token) = user_token(UserRole::User);
    let id = app.create_booking(&token, 10, 12, 1).await;
    let path = format!("/api/bookings/{id}/confirm-payment");

    let response = app
        .request(
            "POST",
            &path,
            Some(serde_json::json!({ "paymentRef": "" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            &path,
            Some(serde_json::json!({ "paymentRef": "pi_123" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "confirmed");
    assert_eq!(response.body["data"]["paymentStatus"], "paid");

    let response = app
        .request(
            "POST",
            &path,
            Some(serde_json::json!({ "paymentRef": "pi_456" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .request("GET", &format!("/api/bookings/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let payments = response.body["data"]["payments"]
        .as_array()
        .expect("payments array");
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0]["providerRef"], "pi_123");
}

#[tokio::test]
async fn test_cancel_releases_inventory_and_refunds() {
    let app = TestApp::new().await;
    let (_, token) = user_token(UserRole::User);
    let id = app.create_booking(&token, 10, 12, 2).await;

    app.request(
        "POST",
        &format!("/api/bookings/{id}/confirm-payment"),
        Some(serde_json::json!({ "paymentRef": "pi_789" })),
        Some(&token),
    )
    .await;

    let path = format!("/api/bookings/{id}/cancel");
    let response = app.request("PATCH", &path, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "cancelled");
    assert_eq!(response.body["data"]["paymentStatus"], "refunded");

    let response = app.request("PATCH", &path, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    app.create_booking(&token, 10, 12, 2).await;
}

#[tokio::test]
async fn test_cancel_inside_cutoff_rejected() {
    let app = TestApp::new().await;
    let (_, token) = user_token(UserRole::User);
    let id = app.create_booking(&token, 0, 2, 1).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/bookings/{id}/cancel"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let (_, admin) = user_token(UserRole::Admin);
    let response = app
        .request(
            "PATCH",
            &format!("/api/admin/bookings/{id}/cancel"),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "cancelled");
}

#[tokio::test]
async fn test_bookings_are_owner_scoped() {
    let app = TestApp::new().await;
    let (_, owner) = user_token(UserRole::User);
    let (_, stranger) = user_token(UserRole::User);
    let (_, admin) = user_token(UserRole::Admin);
    let id = app.create_booking(&owner, 10, 12, 1).await;
    let path = format!("/api/bookings/{id}");

    let response = app.request("GET", &path, None, Some(&stranger)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("PATCH", &format!("{path}/cancel"), None, Some(&stranger))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.request("GET", &path, None, Some(&admin)).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", "/api/bookings/not-a-uuid", None, Some(&owner))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_my_bookings_paginates_newest_first() {
    let app = TestApp::new().await;
    let (_, token) = user_token(UserRole::User);
    let (_, other) = user_token(UserRole::User);

    app.create_booking(&token, 10, 11, 1).await;
    app.create_booking(&token, 20, 21, 1).await;
    let newest = app.create_booking(&token, 30, 31, 1).await;
    app.create_booking(&other, 40, 41, 1).await;

    let response = app
        .request("GET", "/api/bookings/my?page=1&limit=2", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let data = response.body["data"].as_array().expect("data array");
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["id"], newest.as_str());
    assert_eq!(response.body["pagination"]["total"], 3);
    assert_eq!(response.body["pagination"]["totalPages"], 2);

    let response = app
        .request(
            "GET",
            "/api/bookings/my?status=cancelled",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.body["pagination"]["total"], 0);

    let response = app
        .request("GET", "/api/bookings/my?status=bogus", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_my_bookings_far_page_is_empty() {
    let app = TestApp::new().await;
    let (_, token) = user_token(UserRole::User);
    app.create_booking(&token, 10, 11, 1).await;

    let response = app
        .request(
            "GET",
            "/api/bookings/my?page=18446744073709551615&limit=50",
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"].as_array().map(Vec::len), Some(0));
    assert_eq!(response.body["pagination"]["total"], 1);
}

#[tokio::test]
async fn test_admin_routes_require_admin() {
    let app = TestApp::new().await;
    let (_, user) = user_token(UserRole::User);
    let (_, admin) = user_token(UserRole::Admin);
    let id = app.create_booking(&user, 10, 12, 1).await;

    let response = app
        .request("GET", "/api/admin/bookings", None, Some(&user))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "PATCH",
            &format!("/api/admin/bookings/{id}/cancel"),
            None,
            Some(&user),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("GET", "/api/admin/bookings", None, Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["pagination"]["limit"], 20);
    assert_eq!(response.body["pagination"]["total"], 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_never_oversell() {
    let app = Arc::new(TestApp::new().await);
    let (_, token) = user_token(UserRole::User);

    let mut handles = Vec::new();
    for _ in 0..12 {
        let app = Arc::clone(&app);
        let token = token.clone();
        handles.push(tokio::spawn(async move {
            app.request(
                "POST",
                "/api/bookings",
                Some(app.booking_body(10, 12, 1)),
                Some(&token),
            )
            .await
            .status
        }));
    }

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.expect("task panicked") {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => conflicts += 1,
            other => panic!("unexpected status {other}"),
        }
    }

    assert_eq!(created, 2);
    assert_eq!(conflicts, 10);

    let night = (chrono::Utc::now().date_naive() + chrono::Duration::days(10))
        .and_hms_opt(12, 0, 0)
        .expect("valid time")
        .and_utc();
    assert_eq!(app.store.occupancy_at(app.room_id, night).await, 2);
}
