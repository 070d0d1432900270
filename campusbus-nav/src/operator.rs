use serde::Serialize;

use crate::models::Transition;

/// Screens of the operator app
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, Hash)]
pub enum OperatorScreen {
    #[default]
    Login,
    BusSelection,
    Scanner,
    PassengerList,
}

impl OperatorScreen {
    pub fn name(&self) -> &'static str {
        match self {
            OperatorScreen::Login => "Login",
            OperatorScreen::BusSelection => "BusSelection",
            OperatorScreen::Scanner => "Scanner",
            OperatorScreen::PassengerList => "PassengerList",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorEvent {
    LoginSuccess,
    DevSkip,
    /// Bind this device to a trip for the shift
    StartShift(String),
    ViewPassengers,
    Back,
    EndShift,
    Logout,
}

impl OperatorEvent {
    pub fn name(&self) -> &'static str {
        match self {
            OperatorEvent::LoginSuccess => "loginSuccess",
            OperatorEvent::DevSkip => "devSkip",
            OperatorEvent::StartShift(_) => "startShift",
            OperatorEvent::ViewPassengers => "viewPassengers",
            OperatorEvent::Back => "back",
            OperatorEvent::EndShift => "endShift",
            OperatorEvent::Logout => "logout",
        }
    }
}

pub fn transition(from: OperatorScreen, event: &OperatorEvent) -> Transition<OperatorScreen> {
    use OperatorEvent as E;
    use OperatorScreen as S;

    let next = match (from, event) {
        (S::Login, E::LoginSuccess) | (S::Login, E::DevSkip) => Some(S::BusSelection),
        (S::BusSelection, E::StartShift(_)) => Some(S::Scanner),
        (S::BusSelection, E::Logout) => Some(S::Login),
        (S::Scanner, E::ViewPassengers) => Some(S::PassengerList),
        (S::Scanner, E::EndShift) => Some(S::BusSelection),
        (S::PassengerList, E::Back) => Some(S::Scanner),
        _ => None,
    };

    match next {
        Some(next) => Transition { from, next, declared: true },
        None => Transition { from, next: OperatorScreen::Login, declared: false },
    }
}

/// Owns the operator's current screen and the trip bound to the running shift
#[derive(Debug, Clone, Default)]
pub struct OperatorNavigator {
    screen: OperatorScreen,
    active_trip: Option<String>,
}

impl OperatorNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> OperatorScreen {
        self.screen
    }

    pub fn active_trip(&self) -> Option<&str> {
        self.active_trip.as_deref()
    }

    pub fn apply(&mut self, event: OperatorEvent) -> Transition<OperatorScreen> {
        let step = transition(self.screen, &event);

        if !step.declared {
            tracing::warn!(
                from = self.screen.name(),
                event = event.name(),
                "Undeclared operator event, falling back to Login"
            );
            self.active_trip = None;
            self.screen = step.next;
            return step;
        }

        match event {
            OperatorEvent::StartShift(trip_id) => {
                tracing::info!(trip_id = %trip_id, "Shift started");
                self.active_trip = Some(trip_id);
            }
            OperatorEvent::EndShift | OperatorEvent::Logout => {
                self.active_trip = None;
            }
            _ => {}
        }
        self.screen = step.next;
        step
    }
}
