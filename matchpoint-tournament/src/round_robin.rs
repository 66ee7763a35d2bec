//! Round-robin scheduling (circle method)
//!
//! Position 0 stays fixed while the other M - 1 positions rotate one step per
//! week. Each week position `i` meets position `M - 1 - i`.

use matchpoint_core::CompetitorId;

use crate::schedule::Pairing;

/// Full single round-robin for an even roster: M - 1 weeks of M / 2 pairings.
///
/// Returns no weeks for fewer than two competitors.
pub fn round_robin_schedule(ids: &[CompetitorId]) -> Vec<Vec<Pairing>> {
    let m = ids.len();
    if m < 2 {
        return Vec::new();
    }

    let fixed = ids[0];
    let mut rotating: Vec<CompetitorId> = ids[1..].to_vec();
    let mut weeks = Vec::with_capacity(m - 1);

    for _ in 0..m - 1 {
        let at = |pos: usize| if pos == 0 { fixed } else { rotating[pos - 1] };
        let week: Vec<Pairing> = (0..m / 2)
            .map(|i| Pairing::new(at(i), at(m - 1 - i)))
            .collect();
        weeks.push(week);
        rotating.rotate_left(1);
    }

    weeks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ids(n: usize) -> Vec<CompetitorId> {
        (0..n).map(CompetitorId).collect()
    }

    #[test]
    fn test_round_robin_four() {
        let weeks = round_robin_schedule(&ids(4));
        assert_eq!(weeks.len(), 3);
        let id = CompetitorId;
        assert_eq!(weeks[0], vec![Pairing::new(id(0), id(3)), Pairing::new(id(1), id(2))]);
        assert_eq!(weeks[1], vec![Pairing::new(id(0), id(1)), Pairing::new(id(2), id(3))]);
        assert_eq!(weeks[2], vec![Pairing::new(id(0), id(2)), Pairing::new(id(3), id(1))]);
    }

    #[test]
    fn test_every_pair_meets_once() {
        for m in [2usize, 4, 6, 8, 10, 16] {
            let weeks = round_robin_schedule(&ids(m));
            assert_eq!(weeks.len(), m - 1);

            let mut seen = HashSet::new();
            for week in &weeks {
                assert_eq!(week.len(), m / 2);
                let mut this_week = HashSet::new();
                for p in week {
                    assert_ne!(p.home, p.away);
                    assert!(this_week.insert(p.home));
                    assert!(this_week.insert(p.away));
                    assert!(seen.insert(p.key()), "pair {:?} repeated", p.key());
                }
                assert_eq!(this_week.len(), m);
            }
            assert_eq!(seen.len(), m * (m - 1) / 2);
        }
    }

    #[test]
    fn test_round_robin_empty() {
        assert!(round_robin_schedule(&[]).is_empty());
        assert!(round_robin_schedule(&ids(1)).is_empty());
    }
}
