#![warn(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod report;
pub mod types;

pub use config::AppConfig;
pub use error::{AdSimError, AdSimResult};
