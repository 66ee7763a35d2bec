//! Matchpoint Tournament - Season scheduling and play
//!
//! This crate provides season infrastructure on top of `matchpoint-core`:
//! - Season configuration and formats
//! - Round-robin (circle method) and Swiss (backtracking) schedulers
//! - Season orchestration with an injectable observer
//! - Parallel batch runs of independent seasons
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: Season::run, run_seasons (orchestration)
//! - Level 2: run_*_week (one week of pairing and play)
//! - Level 3: round_robin_schedule, SwissPairer::pair, match resolution (steps)
//! - Level 4: snapshots, reports, configuration

mod batch;
mod config;
mod error;
mod observer;
mod round_robin;
mod schedule;
mod season;
mod swiss;

pub use batch::{run_season, run_seasons};
pub use config::{SearchBudget, SeasonConfig, SeasonFormat};
pub use error::SeasonError;
pub use observer::{NoopObserver, SeasonObserver, TracingObserver};
pub use round_robin::round_robin_schedule;
pub use schedule::{Pairing, WeekSchedule};
pub use season::{Season, SeasonReport};
pub use swiss::{PairingFailure, SwissPairer};
