use campusbus_core::CoreError;
use serde::Serialize;

/// A dismissible message shown to the user. Every failure a workflow can hit
/// ends up as one of these; nothing propagates further.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Describe a failed call under the caller's heading
    pub fn failure(title: &str, err: &CoreError) -> Self {
        let message = match err {
            CoreError::Transport(detail) => {
                tracing::error!("{}: {}", title, detail);
                "Unable to reach the server. Check your connection and try again.".to_string()
            }
            CoreError::Backend { status, message } => {
                tracing::warn!(status, "{}: {}", title, message);
                message.clone()
            }
            CoreError::Validation(message) => message.clone(),
            CoreError::Unauthenticated => "Please sign in again.".to_string(),
        };
        Self::new(title, message)
    }
}
