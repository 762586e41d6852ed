//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use rust_decimal_macros::dec;
use serde_json::Value;
use tower::ServiceExt;

use hotel_api::{AppState, build_app};
use hotel_auth::Claims;
use hotel_core::config::AppConfig;
use hotel_core::types::{HotelId, RoomId, UserId};
use hotel_database::{BookingStore, MemoryBookingStore};
use hotel_entity::hotel::Hotel;
use hotel_entity::room::Room;
use hotel_entity::user::UserRole;

const TEST_SECRET: &str = "integration-test-secret";

const TEST_CONFIG: &str = r#"
[database]
url = "postgres://unused@localhost/hotel_test"

[auth]
jwt_secret = "integration-test-secret"
leeway_seconds = 0

[booking]
retry_backoff_ms = 1
"#;

/// Test application context
pub struct TestApp {
    /// The Axum app for making test requests
    pub router: Router,
    /// Backing store, for seeding and inspection
    pub store: MemoryBookingStore,
    /// Seeded hotel
    pub hotel_id: HotelId,
    /// Seeded room type: 2 units, capacity 2, 100.00 per night
    pub room_id: RoomId,
    /// Room type belonging to a second hotel
    pub foreign_room_id: RoomId,
}

impl TestApp {
    /// Create a new test application over a seeded in-memory store
    pub async fn new() -> Self {
        let config = AppConfig::from_toml(TEST_CONFIG).expect("Failed to load test config");
        let store = MemoryBookingStore::new();

        let hotel_id = HotelId::new();
        let other_hotel_id = HotelId::new();
        for (id, name) in [(hotel_id, "Harbour View"), (other_hotel_id, "Old Town Inn")] {
            store
                .insert_hotel(Hotel {
                    id,
                    name: name.to_string(),
                    city: "Lisbon".to_string(),
                    address: "1 Test Street".to_string(),
                    price_from: dec!(100),
                    created_at: Utc::now(),
                })
                .await;
        }

        let room_id = RoomId::new();
        store.insert_room(room(room_id, hotel_id, "Double", 2)).await;
        let foreign_room_id = RoomId::new();
        store
            .insert_room(room(foreign_room_id, other_hotel_id, "Single", 5))
            .await;

        let shared: Arc<dyn BookingStore> = Arc::new(store.clone());
        let router = build_app(AppState::new(config, shared));

        Self {
            router,
            store,
            hotel_id,
            room_id,
            foreign_room_id,
        }
    }

    /// Booking body for the seeded room, `from`..`to` days from today
    pub fn booking_body(&self, from: i64, to: i64, rooms_count: i32) -> Value {
        serde_json::json!({
            "hotelId": self.hotel_id,
            "roomId": self.room_id,
            "checkIn": day(from),
            "checkOut": day(to),
            "guests": 1,
            "roomsCount": rooms_count,
            "guestName": "Grace Hopper",
            "guestEmail": "grace@example.com",
            "guestPhone": "+1 555 0100",
        })
    }

    /// Create a booking and return its id, asserting success
    pub async fn create_booking(&self, token: &str, from: i64, to: i64, rooms_count: i32) -> String {
        let response = self
            .request(
                "POST",
                "/api/bookings",
                Some(self.booking_body(from, to, rooms_count)),
                Some(token),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create failed: {:?}",
            response.body
        );
        response.body["data"]["id"]
            .as_str()
            .expect("No booking id in response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// A fresh user id with a signed access token
pub fn user_token(role: UserRole) -> (UserId, String) {
    let user_id = UserId::new();
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        email: format!("{}@example.com", role.as_str()),
        role,
        iat: now.timestamp(),
        exp: (now + Duration::hours(1)).timestamp(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Failed to sign token");
    (user_id, token)
}

/// `YYYY-MM-DD`, `offset` days from today (UTC)
pub fn day(offset: i64) -> String {
    (Utc::now().date_naive() + Duration::days(offset))
        .format("%Y-%m-%d")
        .to_string()
}

fn room(id: RoomId, hotel_id: HotelId, name: &str, total_rooms: i32) -> Room {
    Room {
        id,
        hotel_id,
        name: name.to_string(),
        room_type: name.to_lowercase(),
        capacity: 2,
        price_per_night: dec!(100),
        total_rooms,
        created_at: Utc::now(),
    }
}
