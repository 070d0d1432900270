mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use campusbus_app::operator::{IncidentForm, OperatorLoginForm, Passenger};
use campusbus_app::OperatorApp;
use campusbus_core::{CoreError, Session};
use campusbus_nav::{OperatorScreen, ScanFeedback};
use campusbus_shared::models::{Route, ScanResult, TripStatus};
use common::{scan_result, today, trip, valid_scan, FakeApi, PASSWORD};

const DISPLAY: Duration = Duration::from_millis(2300);

fn fake_api() -> Arc<FakeApi> {
    let mut cancelled = trip("t-3", Route::CampusToCity, "09:00", 0);
    cancelled.status = TripStatus::Cancelled;
    let api = FakeApi::new()
        .with_trips(
            Route::CampusToCity,
            vec![trip("t-2", Route::CampusToCity, "17:00", 12), cancelled],
        )
        .with_trips(
            Route::CityToCampus,
            vec![trip("t-1", Route::CityToCampus, "07:30", 5)],
        );
    api.set_scan("qr-asha", valid_scan("s-1", "Asha"));
    api.set_scan("qr-used", scan_result(ScanResult::Duplicate));
    Arc::new(api)
}

async fn on_shift(api: &Arc<FakeApi>) -> OperatorApp {
    let mut app = OperatorApp::new(api.clone(), Session::new(), DISPLAY);
    app.dev_skip(today()).await;
    app.selection_mut().select("t-2");
    app.selection_mut().request_start().unwrap();
    assert!(app.start_shift());
    app
}

#[tokio::test]
async fn test_login_loads_running_trips() {
    let api = fake_api();
    let session = Session::new();
    let mut app = OperatorApp::new(api.clone(), session.clone(), DISPLAY);

    let wrong = OperatorLoginForm {
        employee_id: "EMP-7".into(),
        password: "nope".into(),
    };
    assert!(!app.login(&wrong, today()).await);
    assert_eq!(app.screen(), OperatorScreen::Login);
    let notice = app.dismiss_notice().unwrap();
    assert_eq!(notice.title, "Login Failed");
    assert_eq!(notice.message, "Invalid Employee ID or Password.");

    let form = OperatorLoginForm {
        employee_id: "EMP-7".into(),
        password: PASSWORD.into(),
    };
    assert!(app.login(&form, today()).await);
    assert!(session.is_authenticated().await);
    assert_eq!(app.screen(), OperatorScreen::BusSelection);
    assert_eq!(api.count("login EMP-7"), 2);

    // Both routes, active only, earliest first
    let ids: Vec<_> = app.selection().trips().iter().map(|t| t.trip_id.as_str()).collect();
    assert_eq!(ids, vec!["t-1", "t-2"]);
    assert_eq!(app.selection().trips()[0].time, "7:30 AM");
}

#[tokio::test]
async fn test_login_network_failure_is_not_a_credentials_error() {
    let api = fake_api();
    api.set_login_error(Some(CoreError::Transport("connection refused".into())));
    let mut app = OperatorApp::new(api.clone(), Session::new(), DISPLAY);

    let form = OperatorLoginForm {
        employee_id: "EMP-7".into(),
        password: PASSWORD.into(),
    };
    assert!(!app.login(&form, today()).await);
    assert_eq!(app.screen(), OperatorScreen::Login);

    let notice = app.dismiss_notice().unwrap();
    assert_eq!(notice.title, "Login Failed");
    assert_ne!(notice.message, "Invalid Employee ID or Password.");
    assert!(notice.message.contains("Unable to reach the server"));
    assert_eq!(api.count("trips "), 0);
}

#[tokio::test]
async fn test_start_requires_selection_and_confirmation() {
    let api = fake_api();
    let mut app = OperatorApp::new(api.clone(), Session::new(), DISPLAY);
    app.dev_skip(today()).await;

    let notice = app.selection_mut().request_start().unwrap_err();
    assert_eq!(notice.title, "No Trip Selected");
    assert!(!app.start_shift());
    assert_eq!(app.screen(), OperatorScreen::BusSelection);

    assert!(!app.selection_mut().select("t-3"));
    assert!(app.selection_mut().select("t-2"));
    app.selection_mut().request_start().unwrap();
    assert!(app.selection().is_confirming());
    app.selection_mut().cancel_start();
    assert!(!app.start_shift());

    app.selection_mut().request_start().unwrap();
    assert!(app.start_shift());
    assert_eq!(app.screen(), OperatorScreen::Scanner);
    let scanner = app.scanner().unwrap();
    assert_eq!(scanner.trip_id(), "t-2");
    assert_eq!(scanner.counts(), (0, 12));
}

#[tokio::test]
async fn test_scan_feedback_holds_then_clears() {
    let api = fake_api();
    let mut app = on_shift(&api).await;
    let start = Instant::now();

    let feedback = app.scan("qr-asha", start).await;
    assert_eq!(feedback, Some(ScanFeedback::Valid { name: "Asha".into() }));
    assert_eq!(app.scanner().unwrap().feedback().label(), "VALID");

    // Ignored while feedback is on screen; the backend is not asked
    assert_eq!(app.scan("qr-used", start + Duration::from_secs(1)).await, None);
    assert_eq!(api.count("scan "), 1);

    assert!(!app.tick(start + Duration::from_millis(2299)));
    assert!(app.tick(start + DISPLAY));
    assert_eq!(app.scanner().unwrap().feedback(), &ScanFeedback::None);

    let later = start + Duration::from_secs(3);
    assert_eq!(app.scan("qr-used", later).await, Some(ScanFeedback::Duplicate));
    assert_eq!(app.scanner().unwrap().feedback().label(), "ALREADY SCANNED");
    assert!(app.tick(later + DISPLAY));

    assert_eq!(
        app.scan("qr-forged", later + Duration::from_secs(5)).await,
        Some(ScanFeedback::Invalid)
    );
    assert_eq!(app.scanner().unwrap().counts(), (1, 12));
    assert_eq!(api.calls().last().unwrap(), "scan t-2 qr-forged");
}

#[tokio::test]
async fn test_passenger_list_and_incident_report() {
    let api = fake_api();
    let mut app = on_shift(&api).await;
    app.scan("qr-asha", Instant::now()).await;

    app.view_passengers();
    assert_eq!(app.screen(), OperatorScreen::PassengerList);
    assert_eq!(
        app.passengers(),
        &[Passenger {
            student_id: "s-1".into(),
            name: "Asha".into(),
        }]
    );

    let mut form = IncidentForm::for_passenger(&app.passengers()[0]);
    assert!(!app.report_incident(&form).await);
    assert_eq!(app.dismiss_notice().unwrap().message, "Reason is required");
    assert!(api.reports.lock().unwrap().is_empty());

    form.reason = "No valid ID".into();
    assert!(app.report_incident(&form).await);
    let notice = app.dismiss_notice().unwrap();
    assert_eq!(notice.title, "Report Submitted");
    assert_eq!(notice.message, "Your report for Asha has been sent successfully.");
    let reports = api.reports.lock().unwrap().clone();
    assert_eq!(reports[0].trip_id, "t-2");
    assert_eq!(reports[0].student_id, "s-1");

    app.back();
    assert_eq!(app.screen(), OperatorScreen::Scanner);
}

#[tokio::test]
async fn test_end_shift_and_logout() {
    let api = fake_api();
    let mut app = on_shift(&api).await;
    app.scan("qr-asha", Instant::now()).await;

    app.end_shift();
    assert_eq!(app.screen(), OperatorScreen::BusSelection);
    assert!(app.scanner().is_none());
    assert!(app.passengers().is_empty());
    assert_eq!(app.scan("qr-asha", Instant::now()).await, None);

    app.logout().await;
    assert_eq!(app.screen(), OperatorScreen::Login);
}
