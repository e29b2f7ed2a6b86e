//! Shared contract for fitness-tracker clients.
//!
//! Every concrete vendor client (Polar, Endomondo, ...) implements the
//! [`Tracker`] trait and embeds a [`TrackerCore`], which normalizes
//! credential storage, timezone handling and the lazily built
//! [`SportMapper`](sport::SportMapper). The core performs no network I/O and
//! persists nothing; vendor HTTP clients live in their own crates.

use thiserror::Error;

pub mod config;
pub mod logging;
pub mod sport;
pub mod tracker;

pub use config::TrackerConfig;
pub use logging::Logger;
pub use sport::{Sport, SportMapper};
pub use tracker::{Tracker, TrackerCore};

#[derive(Debug, Error)]
pub enum TrackerError {
    /// A required field was absent from the configuration record.
    /// Carries the dotted field path, e.g. `auth.username`.
    #[error("missing config field: {0}")]
    MissingConfigField(&'static str),
    /// A timezone identifier did not resolve to a known IANA zone.
    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),
    /// The configuration document itself could not be parsed.
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
    /// A vendor's sport-mapper construction hook failed, e.g. a missing
    /// mapping resource. Produced by hook implementations, never by the core.
    #[error("sport mapper error: {0}")]
    SportMapper(String),
}
