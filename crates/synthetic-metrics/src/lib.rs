//! Deterministic synthetic sustainability time series.
//!
//! New tenants have no measurement history, so the backend fills the gap with
//! believable daily samples. This crate owns the generation maths and stays
//! independent of backend domain types so the same series can be produced by
//! the server, the seeding CLI and tests.
//!
//! A [`SeriesProfile`] describes the shape of one series: a baseline, a weekly
//! oscillation, bounded noise, a linear trend and clamping bounds. The
//! [`generate_series`] function turns a profile and a seed into one sample per
//! day. The same profile and seed always produce the same samples.
//!
//! # Example
//!
//! ```
//! use synthetic_metrics::{SeriesProfile, generate_series, seed_from_bytes};
//!
//! let profile = SeriesProfile {
//!     baseline: 120.0,
//!     amplitude: 15.0,
//!     noise: 5.0,
//!     trend_per_day: 0.1,
//!     floor: 0.0,
//!     ceiling: 500.0,
//! };
//! let seed = seed_from_bytes(b"tenant-a");
//! let first = generate_series(&profile, seed, 30).expect("profile is valid");
//! let second = generate_series(&profile, seed, 30).expect("profile is valid");
//!
//! assert_eq!(first.len(), 30);
//! assert_eq!(first, second);
//! ```

mod error;
mod generator;
mod profile;
mod seed;

pub use error::ProfileError;
pub use generator::{SyntheticSample, generate_series};
pub use profile::SeriesProfile;
pub use seed::{derive_seed, seed_from_bytes};
