//! Standings ledger - cumulative records, opponent history and ranking
//!
//! Entries are addressed by [`CompetitorId`] (roster position) and never move;
//! the ranking is kept as a separate order that is re-sorted on demand.

use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::competitor::{Competitor, CompetitorId};
use crate::simulator::MatchOutcome;

/// One competitor's cumulative season record
#[derive(Clone, Debug)]
pub struct StandingsEntry {
    pub competitor: Competitor,
    pub wins: u32,
    pub losses: u32,
    pub rounds_won: u32,
    pub rounds_lost: u32,
    pub match_points: u32,
    /// Opponents in the order they were faced, one per completed pairing
    opponents: Vec<CompetitorId>,
    faced: FxHashSet<CompetitorId>,
}

impl StandingsEntry {
    pub fn new(competitor: Competitor) -> Self {
        Self {
            competitor,
            wins: 0,
            losses: 0,
            rounds_won: 0,
            rounds_lost: 0,
            match_points: 0,
            opponents: Vec::new(),
            faced: FxHashSet::default(),
        }
    }

    /// Add one contest result to the record.
    ///
    /// Only counters change; opponent history is recorded separately by
    /// [`StandingsLedger::record_pairing`].
    pub fn apply(&mut self, outcome: &MatchOutcome) {
        if outcome.won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        self.rounds_won += outcome.rounds_won;
        self.rounds_lost += outcome.rounds_lost;
        self.match_points += outcome.match_points;
    }

    pub fn opponents(&self) -> &[CompetitorId] {
        &self.opponents
    }

    pub fn has_faced(&self, other: CompetitorId) -> bool {
        self.faced.contains(&other)
    }

    pub fn matches_played(&self) -> usize {
        self.opponents.len()
    }

    fn add_opponent(&mut self, other: CompetitorId) {
        self.opponents.push(other);
        self.faced.insert(other);
    }
}

/// Snapshot of one ranked entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based position in the standings
    pub rank: usize,
    pub id: CompetitorId,
    pub name: String,
    pub skill: f64,
    pub wins: u32,
    pub losses: u32,
    pub rounds_won: u32,
    pub rounds_lost: u32,
    pub match_points: u32,
    /// Opponents' points with the single highest and lowest removed
    pub median_buchholz: i64,
    pub is_bye: bool,
}

impl Standing {
    /// Win rate
    pub fn win_rate(&self) -> f32 {
        let played = self.wins + self.losses;
        if played == 0 {
            0.0
        } else {
            self.wins as f32 / played as f32
        }
    }
}

impl fmt::Display for Standing {
    /// `name,skill,W,L,RW,RL,MP`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{:.3},{},{},{},{},{}",
            self.name,
            self.skill,
            self.wins,
            self.losses,
            self.rounds_won,
            self.rounds_lost,
            self.match_points
        )
    }
}

/// All entries of a season plus the current ranking order
#[derive(Clone, Debug)]
pub struct StandingsLedger {
    entries: Vec<StandingsEntry>,
    order: Vec<CompetitorId>,
}

impl StandingsLedger {
    /// One entry per competitor, ranked in roster order until first sorted
    pub fn new(roster: Vec<Competitor>) -> Self {
        let entries: Vec<StandingsEntry> = roster.into_iter().map(StandingsEntry::new).collect();
        let order = (0..entries.len()).map(CompetitorId).collect();
        Self { entries, order }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// # Panics
    ///
    /// Panics if `id` is not from this ledger's roster.
    pub fn entry(&self, id: CompetitorId) -> &StandingsEntry {
        &self.entries[id.index()]
    }

    pub fn entries(&self) -> &[StandingsEntry] {
        &self.entries
    }

    /// Ids in roster (insertion) order
    pub fn ids(&self) -> impl Iterator<Item = CompetitorId> + '_ {
        (0..self.entries.len()).map(CompetitorId)
    }

    /// Current working order: ranked after [`sort`](Self::sort), shuffled after
    /// [`shuffle_order`](Self::shuffle_order)
    pub fn order(&self) -> &[CompetitorId] {
        &self.order
    }

    /// Credit one side of a contest
    ///
    /// # Panics
    ///
    /// Panics if `id` is not from this ledger's roster.
    pub fn apply(&mut self, id: CompetitorId, outcome: &MatchOutcome) {
        self.entries[id.index()].apply(outcome);
    }

    /// Record that two competitors have met (both directions)
    ///
    /// # Panics
    ///
    /// Panics if either id is not from this ledger's roster.
    pub fn record_pairing(&mut self, a: CompetitorId, b: CompetitorId) {
        self.entries[a.index()].add_opponent(b);
        self.entries[b.index()].add_opponent(a);
    }

    /// # Panics
    ///
    /// Panics if `a` is not from this ledger's roster.
    pub fn has_faced(&self, a: CompetitorId, b: CompetitorId) -> bool {
        self.entries[a.index()].has_faced(b)
    }

    /// Sum of faced opponents' current points minus the single highest and
    /// single lowest value. Not clamped; zero when nobody has been faced.
    pub fn median_buchholz(&self, id: CompetitorId) -> i64 {
        let points = self.entries[id.index()]
            .opponents
            .iter()
            .map(|&o| self.entries[o.index()].match_points as i64);

        let mut sum = 0i64;
        let mut max = i64::MIN;
        let mut min = i64::MAX;
        let mut seen = false;
        for p in points {
            sum += p;
            max = max.max(p);
            min = min.min(p);
            seen = true;
        }

        if seen {
            sum - max - min
        } else {
            0
        }
    }

    /// Ranking order: `Less` means `a` ranks above `b`.
    ///
    /// The bye is always last; then match points descending, median Buchholz
    /// descending, and finally roster position.
    pub fn compare(&self, a: CompetitorId, b: CompetitorId) -> Ordering {
        let ea = &self.entries[a.index()];
        let eb = &self.entries[b.index()];

        ea.competitor
            .is_bye
            .cmp(&eb.competitor.is_bye)
            .then_with(|| eb.match_points.cmp(&ea.match_points))
            .then_with(|| self.median_buchholz(b).cmp(&self.median_buchholz(a)))
            .then_with(|| a.cmp(&b))
    }

    /// Re-sort the working order by [`compare`](Self::compare)
    pub fn sort(&mut self) {
        let mut order = std::mem::take(&mut self.order);
        order.sort_by(|&a, &b| self.compare(a, b));
        self.order = order;
    }

    /// Shuffle the working order, keeping the bye (if any) at the end
    pub fn shuffle_order<R: Rng>(&mut self, rng: &mut R) {
        let bye = self
            .order
            .iter()
            .position(|&id| self.entries[id.index()].competitor.is_bye)
            .map(|pos| self.order.remove(pos));
        self.order.shuffle(rng);
        if let Some(id) = bye {
            self.order.push(id);
        }
    }

    /// Ids sorted by rank, independent of the working order
    pub fn ranked(&self) -> Vec<CompetitorId> {
        let mut ids: Vec<CompetitorId> = self.ids().collect();
        ids.sort_by(|&a, &b| self.compare(a, b));
        ids
    }

    /// 1-based rank of a competitor, `None` for an id outside the roster
    pub fn rank_of(&self, id: CompetitorId) -> Option<usize> {
        self.ranked().iter().position(|&r| r == id).map(|p| p + 1)
    }

    /// Full ranked snapshot
    pub fn standings(&self) -> Vec<Standing> {
        self.ranked()
            .into_iter()
            .enumerate()
            .map(|(pos, id)| {
                let e = &self.entries[id.index()];
                Standing {
                    rank: pos + 1,
                    id,
                    name: e.competitor.name.clone(),
                    skill: e.competitor.skill,
                    wins: e.wins,
                    losses: e.losses,
                    rounds_won: e.rounds_won,
                    rounds_lost: e.rounds_lost,
                    match_points: e.match_points,
                    median_buchholz: self.median_buchholz(id),
                    is_bye: e.competitor.is_bye,
                }
            })
            .collect()
    }

    /// One standings line per competitor, best first
    pub fn render(&self) -> String {
        self.standings()
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
