use std::time::{Duration, Instant};

use serde::Serialize;

/// Overlay shown after a ticket scan
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub enum ScanFeedback {
    #[default]
    None,
    Valid { name: String },
    Invalid,
    Duplicate,
}

impl ScanFeedback {
    pub fn label(&self) -> &'static str {
        match self {
            ScanFeedback::None => "",
            ScanFeedback::Valid { .. } => "VALID",
            ScanFeedback::Invalid => "INVALID QR",
            ScanFeedback::Duplicate => "ALREADY SCANNED",
        }
    }
}

/// Scanner overlay state. Feedback clears itself once `display_for` has
/// elapsed; until then further scans are ignored.
///
/// Time is passed in by the caller so the panel stays a plain value.
#[derive(Debug, Clone)]
pub struct ScanPanel {
    feedback: ScanFeedback,
    shown_at: Option<Instant>,
    display_for: Duration,
}

impl ScanPanel {
    pub fn new(display_for: Duration) -> Self {
        Self {
            feedback: ScanFeedback::None,
            shown_at: None,
            display_for,
        }
    }

    pub fn feedback(&self) -> &ScanFeedback {
        &self.feedback
    }

    pub fn is_accepting(&self) -> bool {
        self.shown_at.is_none()
    }

    /// When the current feedback will clear, if any is showing
    pub fn clears_at(&self) -> Option<Instant> {
        self.shown_at.map(|at| at + self.display_for)
    }

    /// Show feedback for a scan. Returns `false` (and changes nothing) while
    /// earlier feedback is still on screen.
    pub fn show(&mut self, feedback: ScanFeedback, now: Instant) -> bool {
        if !self.is_accepting() || feedback == ScanFeedback::None {
            return false;
        }
        self.feedback = feedback;
        self.shown_at = Some(now);
        true
    }

    /// Timer hook. Returns `true` when this call cleared the feedback.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.clears_at() {
            Some(deadline) if now >= deadline => {
                self.feedback = ScanFeedback::None;
                self.shown_at = None;
                true
            }
            _ => false,
        }
    }
}
