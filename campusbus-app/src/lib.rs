pub mod auth;
pub mod cancellation;
pub mod dashboard;
pub mod error;
pub mod history;
pub mod operator;
pub mod profile;
pub mod store;
pub mod student;

pub use error::Notice;
pub use operator::OperatorApp;
pub use store::{intent_channel, IntentSender, Store};
pub use student::StudentApp;
