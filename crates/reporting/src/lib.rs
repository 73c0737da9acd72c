//! Report assembly: turns a validated query into aggregated, sorted and
//! paginated rows of synthetic performance metrics.

#![warn(clippy::unwrap_used)]

pub mod report_builder;

pub use report_builder::{ReportBuilder, DEFAULT_PAGE_SIZE};
