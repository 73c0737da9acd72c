#![warn(clippy::unwrap_used)]

pub mod account_rest;
pub mod auth;
pub mod error;
pub mod report_rest;
pub mod rest;
pub mod server;
pub mod swagger;
pub mod validation;

pub use error::{ApiError, FieldIssue};
pub use server::{shutdown_signal, ApiServer};
pub use swagger::ApiDoc;
