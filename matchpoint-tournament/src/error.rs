//! Season errors

use matchpoint_core::ConfigError;

/// Error types for season play
#[derive(Debug, thiserror::Error)]
pub enum SeasonError {
    #[error("invalid season configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(
        "no pairing without repeat opponents exists for week {week} ({competitors} competitors)"
    )]
    SchedulingImpossible { week: usize, competitors: usize },

    #[error("pairing search for week {week} exceeded its budget after {nodes} nodes")]
    SearchBudgetExhausted { week: usize, nodes: u64 },
}
