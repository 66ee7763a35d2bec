//! Schedule types shared by the schedulers

use matchpoint_core::{CompetitorId, MatchFormat};
use serde::{Deserialize, Serialize};

/// One contest; `home` is the side whose round-win probability is modelled
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pairing {
    pub home: CompetitorId,
    pub away: CompetitorId,
}

impl Pairing {
    pub fn new(home: CompetitorId, away: CompetitorId) -> Self {
        Self { home, away }
    }

    /// Whether a competitor takes part in this pairing
    pub fn involves(&self, id: CompetitorId) -> bool {
        self.home == id || self.away == id
    }

    /// Unordered key, smaller id first
    pub fn key(&self) -> (CompetitorId, CompetitorId) {
        (self.home.min(self.away), self.home.max(self.away))
    }
}

/// Pairings played together in one week
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeekSchedule {
    /// Season week index (0-based)
    pub week: usize,
    pub format: MatchFormat,
    pub pairings: Vec<Pairing>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairing_key_is_unordered() {
        let a = Pairing::new(CompetitorId(3), CompetitorId(1));
        let b = Pairing::new(CompetitorId(1), CompetitorId(3));
        assert_eq!(a.key(), b.key());
        assert!(a.involves(CompetitorId(1)));
        assert!(!a.involves(CompetitorId(2)));
    }
}
