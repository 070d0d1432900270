use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use campusbus_app::auth::{LoginForm, RegisterForm};
use campusbus_app::operator::{IncidentForm, OperatorLoginForm};
use campusbus_app::profile::ProfileForm;
use campusbus_app::{OperatorApp, StudentApp};
use campusbus_client::{Config, HttpBusApi};
use campusbus_core::trips::DayChoice;
use campusbus_core::{BusApi, Session};
use campusbus_nav::{OperatorScreen, StudentEvent, StudentScreen};
use campusbus_shared::models::Route;
use chrono::Local;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campusbus_app=debug,campusbus_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Using backend at {}", config.api.base_url);

    let http = HttpBusApi::new(&config.api, Session::new())?;
    let session = http.session().clone();
    let api: Arc<dyn BusApi> = Arc::new(http);

    if std::env::args().any(|arg| arg == "--operator") {
        let app = OperatorApp::new(api, session, config.scanner.feedback_display());
        run_operator(app).await
    } else {
        let app = StudentApp::new(api, session, Local::now().date_naive());
        run_student(app).await
    }
}

async fn run_student(mut app: StudentApp) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    render_student(&app);

    while let Some(line) = lines.next_line().await? {
        // Keep "Today" correct across midnight
        app.dashboard_mut().set_today(Local::now().date_naive());
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["quit"] | ["exit"] => break,
            ["proceed"] => app.navigate(StudentEvent::Proceed).await,
            ["login", email, password] => {
                let form = LoginForm {
                    email: email.to_string(),
                    password: password.to_string(),
                };
                app.login(&form).await;
            }
            ["register", email, password, room, phone, name @ ..] => {
                let form = RegisterForm {
                    email: email.to_string(),
                    name: name.join(" "),
                    password: password.to_string(),
                    room: room.to_string(),
                    phone: phone.to_string(),
                };
                app.register(&form).await;
            }
            ["skip"] => app.dev_skip().await,
            ["profile", roll, hostel, room, mobile, parent, name @ ..] => {
                let form = ProfileForm {
                    name: name.join(" "),
                    roll_number: roll.to_string(),
                    hostel: hostel.to_string(),
                    room_number: room.to_string(),
                    student_mobile: mobile.to_string(),
                    parent_mobile: parent.to_string(),
                };
                app.submit_profile(&form).await;
            }
            ["route", "city"] => {
                app.dashboard_mut().select_route(Route::CampusToCity).await;
            }
            ["route", "campus"] => {
                app.dashboard_mut().select_route(Route::CityToCampus).await;
            }
            ["day", "today"] => {
                app.dashboard_mut().select_day(DayChoice::Today).await;
            }
            ["day", "tomorrow"] => {
                app.dashboard_mut().select_day(DayChoice::Tomorrow).await;
            }
            ["refresh"] => {
                app.dashboard_mut().refresh().await;
            }
            ["book", trip_id] => {
                if !app.dashboard_mut().tap_trip(trip_id) {
                    println!("That trip cannot be booked right now.");
                }
            }
            ["confirm"] => {
                app.confirm_booking().await;
            }
            ["close"] => app.dashboard_mut().close_modal(),
            ["me"] => app.navigate(StudentEvent::SelectProfile).await,
            ["history"] => app.navigate(StudentEvent::ViewHistory).await,
            ["mytrip"] => app.navigate(StudentEvent::ViewMyTrip).await,
            ["feedback"] => app.navigate(StudentEvent::ViewFeedback).await,
            ["back"] => app.navigate(StudentEvent::Back).await,
            ["done"] => app.navigate(StudentEvent::Done).await,
            ["cancel"] => {
                app.cancel_trip().await;
            }
            ["logout"] => app.logout().await,
            [] => {}
            _ => println!("Unknown command"),
        }

        while let Some(notice) = app.take_notice() {
            println!("[{}] {}", notice.title, notice.message);
        }
        render_student(&app);
    }
    Ok(())
}

fn render_student(app: &StudentApp) {
    println!();
    match app.screen() {
        StudentScreen::Splash => println!("== Campus Bus ==  (proceed)"),
        StudentScreen::Auth => println!("== Sign in ==  (login <email> <password> | register <email> <password> <room> <phone> <name> | skip)"),
        StudentScreen::ProfileSetup => println!("== Profile setup ==  (profile <roll> <hostel> <room> <mobile> <parent-mobile> <name>)"),
        StudentScreen::Dashboard => {
            let dashboard = app.dashboard();
            println!(
                "== {} | {} ==",
                dashboard.route().display_name(),
                match dashboard.day() {
                    DayChoice::Today => "Today",
                    DayChoice::Tomorrow => "Tomorrow",
                }
            );
            if dashboard.is_loading() {
                println!("  loading...");
            }
            if dashboard.rows().is_empty() {
                println!("  No trips available");
            }
            for row in dashboard.rows() {
                println!(
                    "  [{}] {:>8}  {:>2}/{:<2} seats  {}  waitlist {}",
                    row.trip_id,
                    row.time,
                    row.available_seats,
                    row.total_seats,
                    row.status.label(),
                    row.waitlist_count
                );
            }
            if let Some(modal) = dashboard.modal() {
                let action = if modal.draft.is_waitlist { "Join waitlist" } else { "Book" };
                println!(
                    "  > {} {} on {} at {}?  (confirm | close){}",
                    action,
                    modal.draft.route.display_name(),
                    modal.draft.date,
                    modal.draft.time,
                    if modal.submitting { "  submitting..." } else { "" }
                );
            }
            println!("  (route city|campus, day today|tomorrow, book <trip>, me, history, mytrip, feedback, logout)");
        }
        StudentScreen::Profile => {
            println!("== Profile ==  (back | logout)");
            if let Some(profile) = app.profile() {
                println!("  {} ({}), {} room {}", profile.name, profile.roll_number, profile.hostel, profile.room_number);
            }
        }
        StudentScreen::BookingConfirmation => match app.navigator().confirmation_details() {
            Some(details) => println!(
                "== Booking confirmed ==\n  {} on {} at {}  (done)",
                details.route.display_name(),
                details.date,
                details.time
            ),
            None => println!("== Campus Bus ==  (proceed)"),
        },
        StudentScreen::TripHistory => {
            println!("== My trip history ==  (back)");
            for entry in app.history().entries() {
                println!("  {}  {} at {}  {}", entry.route.display_name(), entry.date, entry.time, entry.status.label());
            }
        }
        StudentScreen::MyTrip => {
            println!("== My active trip ==  (cancel | back)");
            match app.ticket() {
                Some(ticket) => {
                    println!("  Route       {}", ticket.route);
                    println!("  Date        {}", ticket.date);
                    println!("  Time        {}", ticket.time);
                    println!("  Bus Number  {}", ticket.bus_number);
                    if let Some(qr) = ticket.qr_token {
                        println!("  Boarding QR {}", qr);
                    }
                }
                None => println!("  No active trip"),
            }
        }
        StudentScreen::Feedback => println!("== Feedback ==  (back)"),
        StudentScreen::CancellationSuccess => println!("== Trip cancelled ==  (done)"),
    }
}

async fn run_operator(mut app: OperatorApp) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    render_operator(&app);

    while let Some(line) = lines.next_line().await? {
        app.tick(Instant::now());
        let today = Local::now().date_naive();
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["quit"] | ["exit"] => break,
            ["login", employee_id, password] => {
                let form = OperatorLoginForm {
                    employee_id: employee_id.to_string(),
                    password: password.to_string(),
                };
                app.login(&form, today).await;
            }
            ["skip"] => app.dev_skip(today).await,
            ["trips"] => app.load_trips(today).await,
            ["select", trip_id] => {
                app.selection_mut().select(trip_id);
            }
            ["start"] => {
                if let Err(notice) = app.selection_mut().request_start() {
                    println!("[{}] {}", notice.title, notice.message);
                }
            }
            ["yes"] => {
                app.start_shift();
            }
            ["no"] => app.selection_mut().cancel_start(),
            ["scan", token] => {
                app.scan(token, Instant::now()).await;
            }
            ["passengers"] => app.view_passengers(),
            ["back"] => app.back(),
            ["report", student_id, reason @ ..] => {
                let passenger = app.passengers().iter().find(|p| p.student_id == *student_id).cloned();
                let mut form = match passenger {
                    Some(passenger) => IncidentForm::for_passenger(&passenger),
                    None => IncidentForm {
                        student_id: student_id.to_string(),
                        ..IncidentForm::default()
                    },
                };
                form.reason = reason.join(" ");
                app.report_incident(&form).await;
            }
            ["end"] => app.end_shift(),
            ["logout"] => app.logout().await,
            [] => {}
            _ => println!("Unknown command"),
        }

        while let Some(notice) = app.dismiss_notice() {
            println!("[{}] {}", notice.title, notice.message);
        }
        render_operator(&app);
    }
    Ok(())
}

fn render_operator(app: &OperatorApp) {
    println!();
    match app.screen() {
        OperatorScreen::Login => println!("== Operator sign in ==  (login <employee-id> <password> | skip)"),
        OperatorScreen::BusSelection => {
            println!("== Select your trip ==  (select <trip>, start, trips, logout)");
            let selected = app.selection().selected().map(|t| t.trip_id.clone());
            for trip in app.selection().trips() {
                let marker = if selected.as_deref() == Some(trip.trip_id.as_str()) { "*" } else { " " };
                println!(
                    " {}[{}] {:>8}  {}  {}/{} booked",
                    marker,
                    trip.trip_id,
                    trip.time,
                    trip.route.display_name(),
                    trip.booked_count,
                    trip.total_seats
                );
            }
            if app.selection().is_confirming() {
                println!("  > Start shift on this trip? (yes | no)");
            }
        }
        OperatorScreen::Scanner => {
            if let Some(scanner) = app.scanner() {
                let (boarded, expected) = scanner.counts();
                println!("== Trip {} ==  boarded {}/{}", scanner.trip_id(), boarded, expected);
                let label = scanner.feedback().label();
                if !label.is_empty() {
                    println!("  >> {}", label);
                }
            }
            println!("  (scan <token>, passengers, end)");
        }
        OperatorScreen::PassengerList => {
            println!("== Passenger list ==  (report <student-id> <reason>, back)");
            for passenger in app.passengers() {
                println!("  {}  {}  Boarded", passenger.student_id, passenger.name);
            }
        }
    }
}
