//! End-to-end wizard and tracker scenarios: keystrokes in, model state out,
//! with the garage API mocked. Covers the full booking round-trip, the slot
//! conflict, and the tracker's no-request validation path.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pitstop::api::ApiClient;
use pitstop::app::{App, AppAction, Screen};
use pitstop::booking::WizardStep;
use pitstop::config::AppConfig;
use pitstop::tracker::LookupState;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn setup(server: &MockServer) -> (App, ApiClient) {
    let mut config = AppConfig::default();
    config.api.base_url = server.uri();
    let client = ApiClient::new(&config.api).expect("client build");
    (App::new(config), client)
}

fn press(app: &mut App, code: KeyCode) -> Option<AppAction> {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// Select "Oil Change", fill the form, and land on the confirmation panel.
fn walk_to_confirmation(app: &mut App) {
    press(app, KeyCode::Char(' '));
    assert_eq!(press(app, KeyCode::Enter), None);
    assert_eq!(app.wizard.step, WizardStep::CustomerForm);

    press(app, KeyCode::Char('i'));
    for value in [
        "Ada",
        "Lovelace",
        "0812345678",
        "ada@example.com",
        "AB-1234",
        "2026-09-01",
        "10:30",
    ] {
        type_text(app, value);
        press(app, KeyCode::Enter);
    }

    assert_eq!(app.wizard.step, WizardStep::Confirmation);
}

#[tokio::test]
async fn advancing_without_a_service_warns_and_stays_put() {
    let server = MockServer::start().await;
    let (mut app, _client) = setup(&server);

    assert_eq!(press(&mut app, KeyCode::Enter), None);
    assert_eq!(app.wizard.step, WizardStep::ServiceSelection);

    let message = app.message.as_ref().expect("warning shown");
    assert!(message.is_error);
    assert_eq!(message.text, "Select a service first");
}

#[tokio::test]
async fn advancing_with_an_empty_field_warns_and_stays_put() {
    let server = MockServer::start().await;
    let (mut app, _client) = setup(&server);

    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.wizard.step, WizardStep::CustomerForm);

    // Straight to submit with everything blank
    assert_eq!(press(&mut app, KeyCode::Enter), None);

    assert_eq!(app.wizard.step, WizardStep::CustomerForm);
    let message = app.message.as_ref().expect("validation message shown");
    assert!(message.is_error);
    assert_eq!(message.text, "First name is required");
}

#[tokio::test]
async fn booking_round_trip_hands_off_to_the_tracker() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/book"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "message": "Booking confirmed",
            "booking_id": 1,
            "tracking_key": "0812345678",
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/track"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "fullname": "Ada Lovelace",
                "service_type": "Oil Change",
                "booking_date": "2026-09-01",
                "booking_time": "10:30:00",
                "license_plate": "AB-1234",
                "status": "Booking Confirmed",
            },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (mut app, client) = setup(&server);
    walk_to_confirmation(&mut app);

    let action = press(&mut app, KeyCode::Enter).expect("submit action");
    let AppAction::SubmitBooking(request) = action else {
        panic!("expected SubmitBooking");
    };
    assert_eq!(request.selected_service, "Oil Change");
    assert_eq!(request.phone, "0812345678");

    // What the event loop does with the action
    app.begin_request("Saving booking...");
    let phone = app.submit_booking(&client, &request).await;
    assert_eq!(phone.as_deref(), Some("0812345678"));

    let message = app.message.as_ref().expect("server message shown");
    assert!(!message.is_error);
    assert_eq!(message.text, "Booking confirmed");

    // Handoff: tracker shown, key pre-filled, lookup issued immediately
    app.open_tracker_with(&phone.unwrap());
    assert_eq!(app.screen, Screen::Tracker);
    assert_eq!(app.tracker.key.content(), "0812345678");

    let key = app.tracker.begin_lookup().expect("lookup issued");
    app.in_flight = true;
    app.run_lookup(&client, &key).await;

    match &app.tracker.state {
        LookupState::Found { record, timeline } => {
            assert_eq!(record.fullname, "Ada Lovelace");
            assert!(timeline.stages[0].current);
        }
        _ => panic!("expected Found after auto-lookup"),
    }
}

#[tokio::test]
async fn slot_conflict_shows_the_server_text_and_keeps_the_panel() {
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

    let (mut app, client) = setup(&server);
    walk_to_confirmation(&mut app);

    let Some(AppAction::SubmitBooking(request)) = press(&mut app, KeyCode::Enter) else {
        panic!("expected SubmitBooking");
    };

    app.begin_request("Saving booking...");
    let phone = app.submit_booking(&client, &request).await;

    assert!(phone.is_none());
    assert_eq!(app.screen, Screen::Booking);
    assert_eq!(app.wizard.step, WizardStep::Confirmation);

    let message = app.message.as_ref().expect("conflict shown");
    assert!(message.is_error);
    assert_eq!(message.text, "Slot full");
}

#[tokio::test]
async fn empty_lookup_never_touches_the_network() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/track"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (mut app, _client) = setup(&server);

    press(&mut app, KeyCode::Char(':'));
    type_text(&mut app, "track");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.screen, Screen::Tracker);

    assert_eq!(press(&mut app, KeyCode::Enter), None);
    assert!(matches!(app.tracker.state, LookupState::MissingKey));
    // Mock's expect(0) verifies on drop that no request went out
}

#[tokio::test]
async fn lookup_failure_renders_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/track"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "error": "no booking" })),
        )
        .mount(&server)
        .await;

    let (mut app, client) = setup(&server);

    press(&mut app, KeyCode::Char(':'));
    type_text(&mut app, "track nobody@example.com");
    let action = press(&mut app, KeyCode::Enter).expect("lookup action");
    let AppAction::Lookup(key) = action else {
        panic!("expected Lookup");
    };

    app.in_flight = true;
    app.run_lookup(&client, &key).await;

    match &app.tracker.state {
        LookupState::NotFound { key } => assert_eq!(key, "nobody@example.com"),
        _ => panic!("expected NotFound"),
    }
}

#[tokio::test]
async fn input_is_dropped_while_a_request_is_in_flight() {
    let server = MockServer::start().await;
    let (mut app, _client) = setup(&server);

    app.begin_request("Saving booking...");
    assert_eq!(press(&mut app, KeyCode::Enter), None);
    assert_eq!(press(&mut app, KeyCode::Char(' ')), None);
    assert_eq!(app.wizard.step, WizardStep::ServiceSelection);
    assert!(app.wizard.selected_service().is_none());
}

#[tokio::test]
async fn login_success_opens_the_dashboard_with_bookings() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "fullname": "Admin Auto Shop",
            "redirect": "/admin_dashboard",
        })))
        .expect(1)
        .mount(&server)
        .await;

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
                "status": "In Progress",
            },
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (mut app, client) = setup(&server);

    press(&mut app, KeyCode::Char(':'));
    type_text(&mut app, "login");
    press(&mut app, KeyCode::Enter);
    assert!(app.show_login);

    type_text(&mut app, "admin@garage.com");
    press(&mut app, KeyCode::Enter);
    type_text(&mut app, "secret");
    let action = press(&mut app, KeyCode::Enter).expect("login action");
    let AppAction::Login { username, password } = action else {
        panic!("expected Login");
    };
    assert_eq!(username, "admin@garage.com");
    assert_eq!(password, "secret");

    app.begin_request("Signing in...");
    assert!(app.submit_login(&client, &username, &password).await);
    assert_eq!(
        app.message.as_ref().map(|m| m.text.as_str()),
        Some("Welcome, Admin Auto Shop")
    );

    app.open_dashboard();
    assert_eq!(app.screen, Screen::Dashboard);
    assert!(!app.show_login);

    app.in_flight = true;
    app.load_bookings(&client).await;
    assert_eq!(app.dashboard.bookings.len(), 1);
    assert_eq!(app.login.session.as_ref().unwrap().redirect, "/admin_dashboard");
}

#[tokio::test]
async fn failed_login_keeps_the_modal_and_clears_the_password() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({ "error": "wrong username or password" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (mut app, client) = setup(&server);

    press(&mut app, KeyCode::Char(':'));
    type_text(&mut app, "login");
    press(&mut app, KeyCode::Enter);

    type_text(&mut app, "admin");
    press(&mut app, KeyCode::Enter);
    type_text(&mut app, "wrong");
    let Some(AppAction::Login { username, password }) = press(&mut app, KeyCode::Enter) else {
        panic!("expected Login");
    };

    app.begin_request("Signing in...");
    assert!(!app.submit_login(&client, &username, &password).await);

    assert!(app.show_login);
    assert!(!app.login.signed_in());
    assert!(app.login.password.is_empty());
    assert_eq!(
        app.message.as_ref().map(|m| m.text.as_str()),
        Some("wrong username or password")
    );
}

#[tokio::test]
async fn summary_reflects_edits_made_after_going_back() {
    let server = MockServer::start().await;
    let (mut app, _client) = setup(&server);

    walk_to_confirmation(&mut app);
    assert_eq!(
        app.wizard.summary.as_ref().unwrap().phone,
        "0812345678"
    );

    // Back to the form, change the phone, forward again
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.wizard.step, WizardStep::CustomerForm);

    press(&mut app, KeyCode::Char('k')); // focus wraps back to the time field; go to phone
    press(&mut app, KeyCode::Char('k'));
    press(&mut app, KeyCode::Char('k'));
    press(&mut app, KeyCode::Char('k'));
    press(&mut app, KeyCode::Char('i'));
    // Replace the content wholesale
    app.wizard.form.phone.set("0899999999");
    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.wizard.step, WizardStep::Confirmation);
    assert_eq!(
        app.wizard.summary.as_ref().unwrap().phone,
        "0899999999"
    );
}
