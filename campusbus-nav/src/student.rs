use serde::Serialize;

use crate::models::{BookedTripDetails, NavError, Transition};

/// Screens of the student app. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, Hash)]
pub enum StudentScreen {
    #[default]
    Splash,
    Auth,
    ProfileSetup,
    Dashboard,
    Profile,
    BookingConfirmation,
    TripHistory,
    MyTrip,
    Feedback,
    CancellationSuccess,
}

impl StudentScreen {
    pub fn name(&self) -> &'static str {
        match self {
            StudentScreen::Splash => "Splash",
            StudentScreen::Auth => "Auth",
            StudentScreen::ProfileSetup => "ProfileSetup",
            StudentScreen::Dashboard => "Dashboard",
            StudentScreen::Profile => "Profile",
            StudentScreen::BookingConfirmation => "BookingConfirmation",
            StudentScreen::TripHistory => "TripHistory",
            StudentScreen::MyTrip => "MyTrip",
            StudentScreen::Feedback => "Feedback",
            StudentScreen::CancellationSuccess => "CancellationSuccess",
        }
    }

    pub fn all() -> &'static [StudentScreen] {
        &[
            StudentScreen::Splash,
            StudentScreen::Auth,
            StudentScreen::ProfileSetup,
            StudentScreen::Dashboard,
            StudentScreen::Profile,
            StudentScreen::BookingConfirmation,
            StudentScreen::TripHistory,
            StudentScreen::MyTrip,
            StudentScreen::Feedback,
            StudentScreen::CancellationSuccess,
        ]
    }
}

/// Navigation intents emitted by student screens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentEvent {
    Proceed,
    LoginSuccess,
    DevSkip,
    ProfileComplete,
    SelectProfile,
    BookingConfirmed(BookedTripDetails),
    ViewHistory,
    ViewMyTrip,
    ViewFeedback,
    Logout,
    Back,
    Done,
    CancelConfirmed,
}

impl StudentEvent {
    pub fn name(&self) -> &'static str {
        match self {
            StudentEvent::Proceed => "proceed",
            StudentEvent::LoginSuccess => "loginSuccess",
            StudentEvent::DevSkip => "devSkip",
            StudentEvent::ProfileComplete => "profileComplete",
            StudentEvent::SelectProfile => "selectProfile",
            StudentEvent::BookingConfirmed(_) => "bookingConfirmed",
            StudentEvent::ViewHistory => "viewHistory",
            StudentEvent::ViewMyTrip => "viewMyTrip",
            StudentEvent::ViewFeedback => "viewFeedback",
            StudentEvent::Logout => "logout",
            StudentEvent::Back => "back",
            StudentEvent::Done => "done",
            StudentEvent::CancelConfirmed => "cancelConfirmed",
        }
    }
}

/// The declared transition table. `None` means the pair is undeclared.
pub fn next_screen(from: StudentScreen, event: &StudentEvent) -> Option<StudentScreen> {
    use StudentEvent as E;
    use StudentScreen as S;

    let next = match (from, event) {
        (S::Splash, E::Proceed) => S::Auth,
        (S::Auth, E::LoginSuccess) => S::ProfileSetup,
        (S::Auth, E::DevSkip) => S::Dashboard,
        (S::ProfileSetup, E::ProfileComplete) => S::Dashboard,
        (S::Dashboard, E::SelectProfile) => S::Profile,
        (S::Dashboard, E::BookingConfirmed(_)) => S::BookingConfirmation,
        (S::Dashboard, E::ViewHistory) => S::TripHistory,
        (S::Dashboard, E::ViewMyTrip) => S::MyTrip,
        (S::Dashboard, E::ViewFeedback) => S::Feedback,
        (S::Dashboard, E::Logout) => S::Auth,
        (S::Profile, E::Logout) => S::Auth,
        (S::Profile, E::Back) => S::Dashboard,
        (S::BookingConfirmation, E::Done) => S::Dashboard,
        (S::TripHistory, E::Back) => S::Dashboard,
        (S::MyTrip, E::CancelConfirmed) => S::CancellationSuccess,
        (S::MyTrip, E::Back) => S::Dashboard,
        (S::Feedback, E::Back) => S::Dashboard,
        (S::CancellationSuccess, E::Done) => S::Dashboard,
        _ => return None,
    };
    Some(next)
}

/// Pure transition function. Undeclared pairs fall back to `Splash`.
pub fn transition(from: StudentScreen, event: &StudentEvent) -> Transition<StudentScreen> {
    match next_screen(from, event) {
        Some(next) => Transition { from, next, declared: true },
        None => Transition { from, next: StudentScreen::Splash, declared: false },
    }
}

/// Owns the current student screen and the booked-trip payload
#[derive(Debug, Clone, Default)]
pub struct StudentNavigator {
    screen: StudentScreen,
    booked: Option<BookedTripDetails>,
}

impl StudentNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> StudentScreen {
        self.screen
    }

    pub fn booked_trip(&self) -> Option<&BookedTripDetails> {
        self.booked.as_ref()
    }

    /// Details for the confirmation screen. `None` outside that screen or
    /// when nothing was stored, in which case the front-end shows Splash.
    pub fn confirmation_details(&self) -> Option<&BookedTripDetails> {
        match self.screen {
            StudentScreen::BookingConfirmation => self.booked.as_ref(),
            _ => None,
        }
    }

    /// Apply an event. Never fails: undeclared events land on `Splash`.
    pub fn apply(&mut self, event: StudentEvent) -> Transition<StudentScreen> {
        let step = transition(self.screen, &event);
        if step.declared {
            self.commit(event, step.next);
        } else {
            tracing::warn!(
                from = self.screen.name(),
                event = event.name(),
                "Undeclared navigation event, falling back to Splash"
            );
            self.screen = step.next;
        }
        step
    }

    /// Strict variant of [`apply`](Self::apply): undeclared events are
    /// rejected and leave the navigator untouched.
    pub fn try_apply(&mut self, event: StudentEvent) -> Result<Transition<StudentScreen>, NavError> {
        let step = transition(self.screen, &event);
        if !step.declared {
            return Err(NavError::Undeclared {
                from: self.screen.name().to_string(),
                event: event.name().to_string(),
            });
        }
        self.commit(event, step.next);
        Ok(step)
    }

    fn commit(&mut self, event: StudentEvent, next: StudentScreen) {
        match event {
            StudentEvent::BookingConfirmed(details) => {
                tracing::info!(booking_id = %details.booking_id, "Stored booked trip");
                self.booked = Some(details);
            }
            StudentEvent::CancelConfirmed => {
                self.booked = None;
            }
            _ => {}
        }
        tracing::debug!(from = self.screen.name(), to = next.name(), "Navigate");
        self.screen = next;
    }
}
