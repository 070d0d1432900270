pub mod report;
pub mod scanner;
pub mod shift;

use std::sync::Arc;
use std::time::{Duration, Instant};

use campusbus_core::validation::require_fields;
use campusbus_core::{BusApi, CoreError, Session};
use campusbus_nav::{OperatorEvent, OperatorNavigator, OperatorScreen, ScanFeedback, Transition};
use campusbus_shared::models::LoginRequest;
use campusbus_shared::Secret;
use chrono::NaiveDate;

use crate::error::Notice;
use crate::store::{intent_channel, IntentQueue, IntentSender};

pub use report::IncidentForm;
pub use scanner::{Passenger, Scanner};
pub use shift::{BusSelection, ShiftTrip};

#[derive(Debug, Clone, Default)]
pub struct OperatorLoginForm {
    pub employee_id: String,
    pub password: String,
}

/// The operator app: login, shift selection, scanning and the passenger list
pub struct OperatorApp {
    api: Arc<dyn BusApi>,
    session: Session,
    navigator: OperatorNavigator,
    intents: IntentSender<OperatorEvent>,
    queue: IntentQueue<OperatorEvent>,
    feedback_display: Duration,
    selection: BusSelection,
    scanner: Option<Scanner>,
    notice: Option<Notice>,
}

impl OperatorApp {
    pub fn new(api: Arc<dyn BusApi>, session: Session, feedback_display: Duration) -> Self {
        let (intents, queue) = intent_channel();
        Self {
            api,
            session,
            navigator: OperatorNavigator::new(),
            intents,
            queue,
            feedback_display,
            selection: BusSelection::new(),
            scanner: None,
            notice: None,
        }
    }

    pub fn screen(&self) -> OperatorScreen {
        self.navigator.screen()
    }

    pub fn selection(&self) -> &BusSelection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut BusSelection {
        &mut self.selection
    }

    pub fn scanner(&self) -> Option<&Scanner> {
        self.scanner.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn intents(&self) -> IntentSender<OperatorEvent> {
        self.intents.clone()
    }

    fn settle(&mut self) -> Vec<Transition<OperatorScreen>> {
        let steps: Vec<_> = self
            .queue
            .drain()
            .into_iter()
            .map(|event| self.navigator.apply(event))
            .collect();

        // The scanner lives exactly as long as the shift
        if self.navigator.active_trip().is_none() {
            self.scanner = None;
        }
        steps
    }

    pub async fn login(&mut self, form: &OperatorLoginForm, today: NaiveDate) -> bool {
        let validated = require_fields(&[
            ("Employee ID", form.employee_id.as_str()),
            ("Password", form.password.as_str()),
        ]);
        if let Err(e) = validated {
            self.notice = Some(Notice::failure("Login Failed", &e));
            return false;
        }

        let request = LoginRequest {
            email: form.employee_id.trim().to_string(),
            password: Secret::new(form.password.clone()),
        };
        match self.api.login(&request).await {
            Ok(response) => {
                self.session.set_token(response.token).await;
                self.intents.send(OperatorEvent::LoginSuccess);
                self.settle();
                self.load_trips(today).await;
                true
            }
            Err(CoreError::Backend { status: 401 | 403, .. }) => {
                self.notice = Some(Notice::new("Login Failed", "Invalid Employee ID or Password."));
                false
            }
            Err(e) => {
                self.notice = Some(Notice::failure("Login Failed", &e));
                false
            }
        }
    }

    pub async fn dev_skip(&mut self, today: NaiveDate) {
        self.intents.send(OperatorEvent::DevSkip);
        self.settle();
        self.load_trips(today).await;
    }

    pub async fn load_trips(&mut self, today: NaiveDate) {
        if let Some(notice) = self.selection.load(self.api.as_ref(), today).await {
            self.notice = Some(notice);
        }
    }

    /// Confirmation accepted on the bus selection screen
    pub fn start_shift(&mut self) -> bool {
        let trip = match self.selection.confirm_start() {
            Some(trip) => trip,
            None => return false,
        };
        self.scanner = Some(Scanner::new(
            trip.trip_id.clone(),
            trip.booked_count,
            self.feedback_display,
        ));
        self.intents.send(OperatorEvent::StartShift(trip.trip_id));
        self.settle();
        true
    }

    pub async fn scan(&mut self, qr_token: &str, now: Instant) -> Option<ScanFeedback> {
        let scanner = self.scanner.as_mut()?;
        match scanner.scan(self.api.as_ref(), qr_token, now).await {
            Ok(feedback) => feedback,
            Err(notice) => {
                self.notice = Some(notice);
                None
            }
        }
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.scanner.as_mut().is_some_and(|s| s.tick(now))
    }

    pub fn view_passengers(&mut self) {
        self.intents.send(OperatorEvent::ViewPassengers);
        self.settle();
    }

    pub fn back(&mut self) {
        self.intents.send(OperatorEvent::Back);
        self.settle();
    }

    /// Passengers boarded so far on the running shift
    pub fn passengers(&self) -> &[Passenger] {
        self.scanner.as_ref().map(Scanner::boarded).unwrap_or(&[])
    }

    pub async fn report_incident(&mut self, form: &IncidentForm) -> bool {
        let trip_id = match self.navigator.active_trip() {
            Some(trip_id) => trip_id.to_string(),
            None => return false,
        };
        let (notice, sent) = match form.submit(self.api.as_ref(), &trip_id).await {
            Ok(notice) => (notice, true),
            Err(notice) => (notice, false),
        };
        self.notice = Some(notice);
        sent
    }

    pub fn end_shift(&mut self) {
        self.intents.send(OperatorEvent::EndShift);
        self.settle();
    }

    pub async fn logout(&mut self) {
        self.session.clear().await;
        self.intents.send(OperatorEvent::Logout);
        self.settle();
    }
}
