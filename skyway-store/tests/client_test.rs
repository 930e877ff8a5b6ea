use axum::{
    extract::{Path, RawQuery},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use skyway_core::services::{AccessToken, AuthService, BookingService, FlightService};
use skyway_core::{CoreError, SeatId};
use skyway_shared::models::{CreateBooking, FlightSearch};
use skyway_store::app_config::UpstreamConfig;
use skyway_store::client::UNREACHABLE_MESSAGE;
use skyway_store::ApiClient;

fn flight_json(id: &str, from: &str) -> Value {
    json!({
        "_id": id,
        "from": from,
        "to": "London",
        "departDate": "2024-03-20T10:00:00Z",
        "flightType": "One Way",
        "economyClassPrice": 500,
        "businessClassPrice": 800,
        "firstClassPrice": 1200
    })
}

async fn list_flights() -> Json<Value> {
    Json(json!([flight_json("f1", "New York"), flight_json("f2", "Paris")]))
}

async fn search_flights(RawQuery(query): RawQuery) -> Json<Value> {
    Json(json!([flight_json("f3", &query.unwrap_or_default())]))
}

async fn booked_seats(Path(id): Path<String>) -> impl IntoResponse {
    match id.as_str() {
        "f1" => (StatusCode::OK, Json(json!(["E11-A", "junk", "B6-C"]))),
        "f2" => (StatusCode::OK, Json(json!({ "bookedSeats": ["F1-A"] }))),
        _ => (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" }))),
    }
}

async fn create_booking(headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some("Bearer tok-1");
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "No token provided" })));
    }
    if body["seatNumber"] == "E11-A" {
        return (StatusCode::CONFLICT, Json(json!({ "message": "Seat already booked" })));
    }
    (
        StatusCode::CREATED,
        Json(json!({ "booking": { "_id": "bk-1", "seatNumber": body["seatNumber"], "classType": body["classType"] } })),
    )
}

async fn me() -> impl IntoResponse {
    (StatusCode::UNAUTHORIZED, "token expired")
}

async fn spawn_upstream() -> String {
    let api = Router::new()
        .route("/flights", get(list_flights))
        .route("/flights/search", get(search_flights))
        .route("/flights/{id}/booked-seats", get(booked_seats))
        .route("/bookings", post(create_booking))
        .route("/users/me", get(me));
    let app = Router::new().nest("/api", api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api", addr)
}

async fn client() -> ApiClient {
    ApiClient::new(&UpstreamConfig::new(spawn_upstream().await)).unwrap()
}

#[tokio::test]
async fn test_list_flights() {
    let client = client().await;
    let flights = client.list_flights().await.unwrap();
    assert_eq!(flights.len(), 2);
    assert_eq!(flights[0].id, "f1");
    assert_eq!(flights[1].first_class_price, Some(1200.0));
}

#[tokio::test]
async fn test_search_omits_blank_fields() {
    let client = client().await;
    let search = FlightSearch {
        from: Some("London".to_string()),
        to: Some(String::new()),
        ..Default::default()
    };
    let flights = client.search_flights(&search).await.unwrap();
    assert_eq!(flights[0].from, "from=London");
}

#[tokio::test]
async fn test_taken_seats_shapes() {
    let client = client().await;

    let taken = client.taken_seats("f1").await.unwrap();
    assert_eq!(taken.len(), 2);
    assert!(taken.contains(&"B6-C".parse::<SeatId>().unwrap()));

    let taken = client.taken_seats("f2").await.unwrap();
    assert!(taken.contains(&"F1-A".parse::<SeatId>().unwrap()));

    // Flights without published occupancy read as fully available.
    assert!(client.taken_seats("unknown").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_booking() {
    let client = client().await;
    let token = AccessToken::from("tok-1");
    let booking = CreateBooking {
        flight_id: "f1".to_string(),
        class_type: "Economy Class".to_string(),
        seat_number: "E12-B".to_string(),
    };

    let confirmation = client.create_booking(Some(&token), &booking).await.unwrap();
    assert_eq!(confirmation.booking.id.as_deref(), Some("bk-1"));
    assert_eq!(confirmation.booking.class_type.as_deref(), Some("Economy Class"));
}

#[tokio::test]
async fn test_booking_failures_keep_upstream_message() {
    let client = client().await;
    let booking = CreateBooking {
        flight_id: "f1".to_string(),
        class_type: "Economy Class".to_string(),
        seat_number: "E11-A".to_string(),
    };

    let err = client
        .create_booking(Some(&AccessToken::from("tok-1")), &booking)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::RemoteFailure { status: Some(409), ref message, explained: true } if message == "Seat already booked"
    ));

    let err = client.create_booking(None, &booking).await.unwrap_err();
    assert!(matches!(err, CoreError::RemoteFailure { status: Some(401), .. }));
}

#[tokio::test]
async fn test_plain_text_error_body() {
    let client = client().await;
    let err = client.me(&AccessToken::from("stale")).await.unwrap_err();
    assert_eq!(err.user_message(), "token expired");
}

#[tokio::test]
async fn test_unreachable_upstream() {
    let client = ApiClient::new(&UpstreamConfig::new("http://127.0.0.1:1/api")).unwrap();
    let err = client.list_flights().await.unwrap_err();
    assert!(matches!(err, CoreError::RemoteFailure { status: None, .. }));
    assert_eq!(err.user_message(), UNREACHABLE_MESSAGE);
}
