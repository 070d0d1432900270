pub mod models;
pub mod operator;
pub mod scan;
pub mod student;

pub use models::{BookedTripDetails, NavError, Transition};
pub use operator::{OperatorEvent, OperatorNavigator, OperatorScreen};
pub use scan::{ScanFeedback, ScanPanel};
pub use student::{StudentEvent, StudentNavigator, StudentScreen};
