use std::sync::Arc;

use campusbus_core::{BusApi, Session};
use campusbus_nav::{StudentEvent, StudentNavigator, StudentScreen};
use chrono::NaiveDate;

use crate::auth::{AuthFlow, LoginForm, RegisterForm};
use crate::cancellation::{CancelOutcome, CancellationFlow, TicketView};
use crate::dashboard::{BookingOutcome, Dashboard};
use crate::error::Notice;
use crate::history::{HistoryEntry, HistoryStatus, TripHistory};
use crate::profile::{ProfileForm, StudentProfile};
use crate::store::Store;

/// The student app wired together: one store, the screens that post to it,
/// and the session-scoped data they share.
pub struct StudentApp {
    store: Store,
    auth: AuthFlow,
    cancellation: CancellationFlow,
    dashboard: Dashboard,
    history: TripHistory,
    profile: Option<StudentProfile>,
    notice: Option<Notice>,
}

impl StudentApp {
    pub fn new(api: Arc<dyn BusApi>, session: Session, today: NaiveDate) -> Self {
        let store = Store::new();
        Self {
            auth: AuthFlow::new(api.clone(), session, store.intents()),
            cancellation: CancellationFlow::new(api.clone(), store.intents()),
            dashboard: Dashboard::new(api, store.intents(), today),
            history: TripHistory::new(),
            profile: None,
            notice: None,
            store,
        }
    }

    pub fn screen(&self) -> StudentScreen {
        self.store.screen()
    }

    pub fn navigator(&self) -> &StudentNavigator {
        self.store.navigator()
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut Dashboard {
        &mut self.dashboard
    }

    pub fn history(&self) -> &TripHistory {
        &self.history
    }

    pub fn profile(&self) -> Option<&StudentProfile> {
        self.profile.as_ref()
    }

    /// Ticket for the active-trip screen
    pub fn ticket(&self) -> Option<TicketView> {
        self.store.navigator().booked_trip().map(TicketView::from_booking)
    }

    /// Latest notice from any screen, dashboard first
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take().or_else(|| self.dashboard.dismiss_notice())
    }

    /// Apply pending intents. Landing on the dashboard reloads its trip list.
    async fn settle(&mut self) {
        let steps = self.store.process_intents();
        // The booking modal belongs to one visit of the dashboard
        if steps.iter().any(|s| s.from != s.next) {
            self.dashboard.discard_modal();
        }
        let entered_dashboard = steps
            .iter()
            .any(|s| s.next == StudentScreen::Dashboard && s.from != StudentScreen::Dashboard);
        if entered_dashboard && self.store.screen() == StudentScreen::Dashboard {
            self.dashboard.refresh().await;
        }
    }

    /// Plain button presses: proceed, back, done, the dashboard menu items
    pub async fn navigate(&mut self, event: StudentEvent) {
        self.store.intents().send(event);
        self.settle().await;
    }

    pub async fn login(&mut self, form: &LoginForm) -> bool {
        let result = self.auth.login(form).await;
        self.finish(result).await
    }

    pub async fn register(&mut self, form: &RegisterForm) -> bool {
        let result = self.auth.register(form).await;
        self.finish(result).await
    }

    pub async fn dev_skip(&mut self) {
        self.auth.dev_skip();
        self.settle().await;
    }

    pub async fn submit_profile(&mut self, form: &ProfileForm) -> bool {
        let intents = self.store.intents();
        let result = form.submit(&intents).map(|(profile, notice)| {
            self.profile = Some(profile);
            self.notice = Some(notice);
        });
        self.finish(result).await
    }

    pub async fn logout(&mut self) {
        self.auth.logout().await;
        self.settle().await;
    }

    async fn finish(&mut self, result: Result<(), Notice>) -> bool {
        let ok = match result {
            Ok(()) => true,
            Err(notice) => {
                self.notice = Some(notice);
                false
            }
        };
        self.settle().await;
        ok
    }

    /// Bookings are only submitted from the dashboard, where the result can land
    pub async fn confirm_booking(&mut self) -> BookingOutcome {
        if self.store.screen() != StudentScreen::Dashboard {
            return BookingOutcome::Ignored;
        }
        let outcome = self.dashboard.confirm_booking().await;
        match &outcome {
            BookingOutcome::Confirmed { details, .. } => self.history.record(HistoryEntry {
                route: details.route,
                date: details.date.clone(),
                time: details.time.clone(),
                status: HistoryStatus::Confirmed,
            }),
            BookingOutcome::Waitlisted { draft, .. } => self.history.record(HistoryEntry {
                route: draft.route,
                date: draft.date.clone(),
                time: draft.time.clone(),
                status: HistoryStatus::Waitlisted,
            }),
            _ => {}
        }
        self.settle().await;
        outcome
    }

    /// Only the active-trip screen offers cancellation
    pub async fn cancel_trip(&mut self) -> CancelOutcome {
        if self.store.screen() != StudentScreen::MyTrip {
            return CancelOutcome::NoBooking;
        }
        let booked = self.store.navigator().booked_trip().cloned();
        let outcome = self.cancellation.cancel(booked.as_ref()).await;
        match &outcome {
            CancelOutcome::Cancelled(notice) => {
                if let Some(details) = booked {
                    self.history.record(HistoryEntry {
                        route: details.route,
                        date: details.date,
                        time: details.time,
                        status: HistoryStatus::Cancelled,
                    });
                }
                self.notice = Some(notice.clone());
            }
            CancelOutcome::Failed(notice) => self.notice = Some(notice.clone()),
            CancelOutcome::NoBooking => {}
        }
        self.settle().await;
        outcome
    }
}
