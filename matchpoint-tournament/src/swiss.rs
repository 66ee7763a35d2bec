//! Swiss pairing - constrained depth-first search
//!
//! Competitors arrive in rank order. The highest-ranked unpaired competitor
//! plays at home against the highest-ranked remaining competitor it has not
//! yet faced. When a partial pairing cannot be completed the search
//! backtracks to the most recent home competitor and tries its next
//! candidate. The first complete pairing found is returned.
//!
//! The search is an explicit stack over roster positions: pushing a pair
//! marks both sides used, popping releases them and resumes the home side's
//! candidate scan just past the away side that failed.

use matchpoint_core::{CompetitorId, StandingsLedger};

use crate::config::SearchBudget;
use crate::schedule::Pairing;

/// Why a week could not be paired
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairingFailure {
    /// Every branch was explored; no perfect matching avoids repeat opponents
    Exhausted { nodes: u64 },
    /// The node budget ran out before a pairing was found
    BudgetExceeded { nodes: u64 },
}

/// Swiss pairer with an optional search budget
#[derive(Clone, Copy, Debug, Default)]
pub struct SwissPairer {
    budget: SearchBudget,
}

impl SwissPairer {
    pub fn new(budget: SearchBudget) -> Self {
        Self { budget }
    }

    pub fn budget(&self) -> SearchBudget {
        self.budget
    }

    /// Pair `ranked` (best first) so that nobody meets a previous opponent.
    pub fn pair(
        &self,
        ranked: &[CompetitorId],
        ledger: &StandingsLedger,
    ) -> Result<Vec<Pairing>, PairingFailure> {
        let n = ranked.len();
        if n == 0 {
            return Ok(Vec::new());
        }
        if n % 2 == 1 {
            return Err(PairingFailure::Exhausted { nodes: 0 });
        }

        let faced = |a: usize, b: usize| ledger.has_faced(ranked[a], ranked[b]);

        let mut used = vec![false; n];
        // (home, away) positions in `ranked`
        let mut stack: Vec<(usize, usize)> = Vec::with_capacity(n / 2);
        let mut nodes = 0u64;
        let mut home = 0usize;
        let mut cursor = 1usize;

        loop {
            let candidate = (cursor..n).find(|&c| !used[c] && !faced(home, c));

            match candidate {
                Some(away) => {
                    nodes += 1;
                    if self.budget.exceeded(nodes) {
                        return Err(PairingFailure::BudgetExceeded { nodes });
                    }

                    used[home] = true;
                    used[away] = true;
                    stack.push((home, away));

                    match used.iter().position(|&u| !u) {
                        Some(next) => {
                            home = next;
                            cursor = next + 1;
                        }
                        None => {
                            tracing::trace!(nodes, pairs = stack.len(), "swiss pairing found");
                            return Ok(stack
                                .into_iter()
                                .map(|(h, a)| Pairing::new(ranked[h], ranked[a]))
                                .collect());
                        }
                    }
                }
                None => match stack.pop() {
                    Some((h, a)) => {
                        used[h] = false;
                        used[a] = false;
                        home = h;
                        cursor = a + 1;
                    }
                    None => return Err(PairingFailure::Exhausted { nodes }),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchpoint_core::Competitor;

    fn ledger(n: usize) -> StandingsLedger {
        StandingsLedger::new(
            (0..n)
                .map(|i| Competitor::new(format!("T{}", i), 0.0))
                .collect(),
        )
    }

    fn id(i: usize) -> CompetitorId {
        CompetitorId(i)
    }

    fn ids(n: usize) -> Vec<CompetitorId> {
        (0..n).map(CompetitorId).collect()
    }

    #[test]
    fn test_adjacent_ranks_pair_first() {
        let l = ledger(6);
        let pairs = SwissPairer::default().pair(&ids(6), &l).unwrap();
        assert_eq!(
            pairs,
            vec![
                Pairing::new(id(0), id(1)),
                Pairing::new(id(2), id(3)),
                Pairing::new(id(4), id(5)),
            ]
        );
    }

    #[test]
    fn test_follows_rank_order_not_ids() {
        let l = ledger(4);
        let ranked = vec![id(2), id(0), id(3), id(1)];
        let pairs = SwissPairer::default().pair(&ranked, &l).unwrap();
        assert_eq!(pairs, vec![Pairing::new(id(2), id(0)), Pairing::new(id(3), id(1))]);
    }

    #[test]
    fn test_skips_faced_opponent() {
        let mut l = ledger(4);
        l.record_pairing(id(0), id(1));
        let pairs = SwissPairer::default().pair(&ids(4), &l).unwrap();
        assert_eq!(pairs, vec![Pairing::new(id(0), id(2)), Pairing::new(id(1), id(3))]);
    }

    #[test]
    fn test_backtracks_when_greedy_fails() {
        // Greedy 0-1 leaves 2 and 3, who have already met
        let mut l = ledger(4);
        l.record_pairing(id(2), id(3));
        let pairs = SwissPairer::default().pair(&ids(4), &l).unwrap();
        assert_eq!(pairs, vec![Pairing::new(id(0), id(2)), Pairing::new(id(1), id(3))]);
    }

    #[test]
    fn test_deep_backtrack() {
        // 2 has already met 3, 4 and 5, so it must take 0 or 1
        let mut l = ledger(6);
        l.record_pairing(id(2), id(3));
        l.record_pairing(id(2), id(4));
        l.record_pairing(id(2), id(5));
        let pairs = SwissPairer::default().pair(&ids(6), &l).unwrap();
        assert_eq!(pairs.len(), 3);
        assert!(pairs.contains(&Pairing::new(id(0), id(2))));
        for p in &pairs {
            assert!(!l.has_faced(p.home, p.away));
        }
    }

    #[test]
    fn test_impossible_pairing() {
        // After a full round robin of four, nobody has a fresh opponent
        let mut l = ledger(4);
        for (a, b) in [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)] {
            l.record_pairing(id(a), id(b));
        }
        let err = SwissPairer::default().pair(&ids(4), &l).unwrap_err();
        assert!(matches!(err, PairingFailure::Exhausted { .. }));
    }

    #[test]
    fn test_isolated_competitor_is_impossible() {
        // 0 has already faced every other competitor
        let mut l = ledger(6);
        for b in 1..6 {
            l.record_pairing(id(0), id(b));
        }
        let err = SwissPairer::default().pair(&ids(6), &l).unwrap_err();
        assert_eq!(err, PairingFailure::Exhausted { nodes: 0 });
    }

    #[test]
    fn test_budget_exceeded() {
        let mut l = ledger(8);
        l.record_pairing(id(6), id(7));
        let err = SwissPairer::new(SearchBudget::Nodes(2)).pair(&ids(8), &l).unwrap_err();
        assert_eq!(err, PairingFailure::BudgetExceeded { nodes: 3 });

        // A generous budget finds it
        assert!(SwissPairer::new(SearchBudget::Nodes(1_000)).pair(&ids(8), &l).is_ok());
    }

    #[test]
    fn test_odd_and_empty_pools() {
        let l = ledger(3);
        assert_eq!(SwissPairer::default().pair(&[], &l).unwrap(), vec![]);
        assert!(SwissPairer::default().pair(&ids(3), &l).is_err());
    }
}
