pub mod api;
pub mod session;
pub mod trips;
pub mod validation;

pub use api::BusApi;
pub use session::Session;

/// Every failure a client call can surface to the user.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    /// The request never produced an HTTP response (DNS, connect, timeout, decode).
    #[error("Network error: {0}")]
    Transport(String),
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Backend { status: u16, message: String },
    /// A required form field was blank or malformed; no request was sent.
    #[error("{0}")]
    Validation(String),
    #[error("You are not signed in")]
    Unauthenticated,
}

pub type CoreResult<T> = Result<T, CoreError>;
