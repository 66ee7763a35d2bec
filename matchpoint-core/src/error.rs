//! Configuration errors raised while building a roster

/// Error types for season construction
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("at least 2 competitors are required, got {count}")]
    TooFewCompetitors { count: usize },

    #[error("unknown skill mode: {0}")]
    UnknownSkillMode(String),

    #[error("a roster may contain at most one bye")]
    DuplicateBye,
}
