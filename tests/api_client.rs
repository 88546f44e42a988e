//! Wire-level tests for the garage API client against a mock server: request
//! construction, response parsing, and every error branch the UI depends on.

use pitstop::api::{ApiClient, ApiError, BookingRequest};
use pitstop::config::ApiConfig;
use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    let config = ApiConfig {
        base_url: server.uri(),
        timeout_secs: 5,
    };
    ApiClient::new(&config).expect("client build")
}

fn booking_request() -> BookingRequest {
    BookingRequest {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        phone: "0812345678".to_string(),
        email: "ada@example.com".to_string(),
        license_plate: "AB-1234".to_string(),
        booking_date: "2026-09-01".to_string(),
        booking_time: "10:30".to_string(),
        selected_service: "Oil Change".to_string(),
    }
}

// ── POST /book ───────────────────────────────────────────────────────────

#[tokio::test]
async fn book_sends_camel_case_fields_and_returns_the_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/book"))
        .and(body_partial_json(serde_json::json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "phone": "0812345678",
            "licensePlate": "AB-1234",
            "bookingDate": "2026-09-01",
            "bookingTime": "10:30",
            "selectedService": "Oil Change",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "message": "Booking confirmed",
            "booking_id": 12,
            "tracking_key": "0812345678",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let confirmation = client.book(&booking_request()).await.expect("book");

    assert_eq!(confirmation.message, "Booking confirmed");
    assert_eq!(confirmation.booking_id, Some(12));
}

#[tokio::test]
async fn book_conflict_carries_the_server_text_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/book"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(serde_json::json!({ "error": "Slot full" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.book(&booking_request()).await.unwrap_err();

    match err {
        ApiError::Conflict(msg) => assert_eq!(msg, "Slot full"),
        other => panic!("expected Conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn book_server_failure_maps_to_rejected_with_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/book"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({ "error": "database unavailable" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.book(&booking_request()).await.unwrap_err();

    match err {
        ApiError::Rejected { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database unavailable");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn book_tolerates_a_non_json_failure_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/book"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.book(&booking_request()).await.unwrap_err();

    assert!(err.server_message().is_none());
    match err {
        ApiError::Rejected { status, message } => {
            assert_eq!(status, 502);
            assert!(message.is_empty());
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

// ── GET /track ───────────────────────────────────────────────────────────

#[tokio::test]
async fn track_parses_the_record_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/track"))
        .and(query_param("key", "0812345678"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Status found",
            "data": {
                "id": 12,
                "fullname": "Ada Lovelace",
                "phone_number": "0812345678",
                "email": "ada@example.com",
                "service_type": "Oil Change",
                "booking_date": "2026-09-01",
                "booking_time": "10:30:00",
                "license_plate": "AB-1234",
                "status": "In Progress",
            },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let record = client.track("0812345678").await.expect("track");

    assert_eq!(record.fullname, "Ada Lovelace");
    assert_eq!(record.status, "In Progress");
    assert_eq!(record.license_plate, "AB-1234");
}

#[tokio::test]
async fn track_miss_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/track"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "error": "no booking for that key" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.track("nobody@example.com").await.unwrap_err();

    assert!(matches!(err, ApiError::NotFound(_)));
}

// ── POST /login ──────────────────────────────────────────────────────────

#[tokio::test]
async fn login_returns_fullname_and_redirect() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(serde_json::json!({
            "username": "admin@garage.com",
            "password": "secret",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Login successful",
            "fullname": "Admin Auto Shop",
            "redirect": "/admin_dashboard",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let session = client
        .login("admin@garage.com", "secret")
        .await
        .expect("login");

    assert_eq!(session.fullname, "Admin Auto Shop");
    assert_eq!(session.redirect, "/admin_dashboard");
}

#[tokio::test]
async fn login_rejection_carries_the_server_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({ "error": "wrong username or password" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.login("admin", "nope").await.unwrap_err();

    assert_eq!(err.server_message(), Some("wrong username or password"));
}

// ── Staff endpoints ──────────────────────────────────────────────────────

#[tokio::test]
async fn bookings_lists_every_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": 1,
                "fullname": "Ada Lovelace",
                "service_type": "Oil Change",
                "booking_date": "2026-09-01",
                "booking_time": "10:30:00",
                "license_plate": "AB-1234",
                "status": "Booking Confirmed",
            },
            {
                "id": 2,
                "fullname": "Grace Hopper",
                "service_type": "Full Service",
                "booking_date": "2026-09-02",
                "booking_time": "14:00:00",
                "license_plate": "CD-5678",
                "status": "In Progress",
            },
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let bookings = client.bookings().await.expect("bookings");

    assert_eq!(bookings.len(), 2);
    assert_eq!(bookings[1].fullname, "Grace Hopper");
}

#[tokio::test]
async fn update_status_posts_to_the_booking_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/admin/update_status/7"))
        .and(body_json(serde_json::json!({ "status": "Quality Check" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Status updated to Quality Check successfully",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let message = client.update_status(7, "Quality Check").await.expect("update");

    assert!(message.contains("Quality Check"));
}

#[tokio::test]
async fn trailing_slash_on_base_url_is_trimmed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let config = ApiConfig {
        base_url: format!("{}/", server.uri()),
        timeout_secs: 5,
    };
    let client = ApiClient::new(&config).expect("client build");

    assert!(client.bookings().await.expect("bookings").is_empty());
}
