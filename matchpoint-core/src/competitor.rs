//! Competitor - a named participant with a fixed latent skill

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Name given to the padding competitor
pub const BYE_NAME: &str = "Bye Week";

/// Sentinel skill for the bye, far below any generated skill
pub const BYE_SKILL: f64 = -999_999.0;

/// Stable identifier of a competitor within one season (its roster position)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompetitorId(pub usize);

impl CompetitorId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CompetitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A participant in a season
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub name: String,
    pub skill: f64,
    #[serde(default)]
    pub is_bye: bool,
}

impl Competitor {
    /// Create a regular competitor
    pub fn new(name: impl Into<String>, skill: f64) -> Self {
        Self {
            name: name.into(),
            skill,
            is_bye: false,
        }
    }

    /// Create the bye used to pad an odd roster
    pub fn bye() -> Self {
        Self {
            name: BYE_NAME.to_string(),
            skill: BYE_SKILL,
            is_bye: true,
        }
    }
}

/// Skill order: strongest first, bye last.
///
/// Only used for skill ranks; standings are ordered by [`crate::StandingsLedger::compare`].
pub fn skill_order(a: &Competitor, b: &Competitor) -> Ordering {
    match (a.is_bye, b.is_bye) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => b.skill.total_cmp(&a.skill),
    }
}
