pub mod models;
pub mod secret;

pub use secret::Secret;
