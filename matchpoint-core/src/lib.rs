//! Matchpoint Core - Competitors, match simulation and standings
//!
//! This crate provides the core season model:
//! - Competitors with latent skill (and the bye used to pad odd rosters)
//! - Roster generation under several skill distributions
//! - Round-by-round match simulation with match-point conversion
//! - The standings ledger with median Buchholz tiebreaking

pub mod competitor;
pub mod error;
pub mod rng;
pub mod roster;
pub mod simulator;
pub mod standings;

// Re-exports for convenient access
pub use competitor::{skill_order, Competitor, CompetitorId, BYE_NAME, BYE_SKILL};
pub use error::ConfigError;
pub use rng::create_rng;
pub use roster::{prepare_roster, RosterBuilder, SkillMode};
pub use simulator::{
    expected_points, forfeit, match_points, simulate_match, win_probability, MatchFormat,
    MatchOutcome,
};
pub use standings::{Standing, StandingsEntry, StandingsLedger};
