//! Configuration types for season play

use matchpoint_core::{Competitor, SkillMode};
use serde::{Deserialize, Serialize};

/// How weekly pairings are produced
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeasonFormat {
    /// Everyone plays everyone once, M - 1 weeks
    RoundRobin,
    /// Pair by standings, no repeat opponents
    Swiss { weeks: usize },
    /// Shuffled order each week, no repeat opponents
    Random { weeks: usize },
}

impl Default for SeasonFormat {
    fn default() -> Self {
        SeasonFormat::RoundRobin
    }
}

/// Limit on the Swiss pairing search
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchBudget {
    Unlimited,
    /// Maximum tentative pairings tried in one week's search
    Nodes(u64),
}

impl Default for SearchBudget {
    fn default() -> Self {
        SearchBudget::Unlimited
    }
}

impl SearchBudget {
    pub(crate) fn exceeded(self, nodes: u64) -> bool {
        match self {
            SearchBudget::Unlimited => false,
            SearchBudget::Nodes(limit) => nodes > limit,
        }
    }
}

/// Season configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonConfig {
    /// Season name
    pub name: String,
    /// Pre-built roster; generated from `count` and `skill_mode` when absent
    pub competitors: Option<Vec<Competitor>>,
    /// Number of competitors to generate
    pub count: usize,
    /// Skill distribution for generated competitors
    pub skill_mode: SkillMode,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
    /// Scheduling discipline
    pub format: SeasonFormat,
    /// Limit on each week's pairing search
    pub search_budget: SearchBudget,
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self {
            name: "Main".to_string(),
            competitors: None,
            count: 8,
            skill_mode: SkillMode::Linear,
            seed: None,
            format: SeasonFormat::RoundRobin,
            search_budget: SearchBudget::Unlimited,
        }
    }
}

impl SeasonConfig {
    /// Round-robin season over `count` generated competitors
    pub fn round_robin(count: usize) -> Self {
        Self {
            count,
            format: SeasonFormat::RoundRobin,
            ..Default::default()
        }
    }

    /// Swiss season lasting `weeks` weeks
    pub fn swiss(count: usize, weeks: usize) -> Self {
        Self {
            count,
            format: SeasonFormat::Swiss { weeks },
            ..Default::default()
        }
    }

    /// Randomly paired season lasting `weeks` weeks
    pub fn random(count: usize, weeks: usize) -> Self {
        Self {
            count,
            format: SeasonFormat::Random { weeks },
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_skill_mode(mut self, mode: SkillMode) -> Self {
        self.skill_mode = mode;
        self
    }

    /// Use a fixed roster instead of generating one
    pub fn with_competitors(mut self, competitors: Vec<Competitor>) -> Self {
        self.count = competitors.len();
        self.competitors = Some(competitors);
        self
    }

    pub fn with_search_budget(mut self, budget: SearchBudget) -> Self {
        self.search_budget = budget;
        self
    }
}
