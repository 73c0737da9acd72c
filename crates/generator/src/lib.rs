//! Deterministic synthetic-data engine: seeded randomness, reference tables,
//! account hierarchy generation and per-cell metrics synthesis.

#![warn(clippy::unwrap_used)]

pub mod accounts;
pub mod benchmarks;
pub mod dates;
pub mod hierarchy;
pub mod metrics;
pub mod random;
pub mod templates;

pub use accounts::{all_accounts, find_account};
pub use hierarchy::generate_structure;
pub use metrics::{aggregate_metrics, derive_metrics, synthesize_base, MetricsContext};
pub use random::{create_seed, SeededRandom};
