//! Season observers
//!
//! A season reports its progress to one observer. The default does nothing;
//! [`TracingObserver`] forwards events to `tracing`.

use matchpoint_core::{MatchOutcome, StandingsLedger};

use crate::schedule::{Pairing, WeekSchedule};

/// Receives season events. Every method defaults to a no-op.
pub trait SeasonObserver: Send {
    /// Pairings for a week were fixed
    fn week_scheduled(&mut self, _schedule: &WeekSchedule) {}

    /// One contest was resolved and applied
    fn match_played(
        &mut self,
        _week: usize,
        _pairing: &Pairing,
        _home: &MatchOutcome,
        _away: &MatchOutcome,
    ) {
    }

    /// All of a week's contests were applied and the standings re-sorted
    fn week_completed(&mut self, _week: usize, _ledger: &StandingsLedger) {}
}

/// Observer that ignores everything
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl SeasonObserver for NoopObserver {}

/// Observer that logs through `tracing`
#[derive(Clone, Debug)]
pub struct TracingObserver {
    season: String,
}

impl TracingObserver {
    pub fn new(season: impl Into<String>) -> Self {
        Self {
            season: season.into(),
        }
    }
}

impl SeasonObserver for TracingObserver {
    fn week_scheduled(&mut self, schedule: &WeekSchedule) {
        tracing::debug!(
            season = %self.season,
            week = schedule.week,
            format = ?schedule.format,
            pairings = schedule.pairings.len(),
            "scheduled"
        );
    }

    fn match_played(
        &mut self,
        week: usize,
        pairing: &Pairing,
        home: &MatchOutcome,
        away: &MatchOutcome,
    ) {
        tracing::debug!(
            season = %self.season,
            week,
            home = %pairing.home,
            away = %pairing.away,
            score = %format!("{}-{}", home.rounds_won, away.rounds_won),
            home_points = home.match_points,
            away_points = away.match_points,
            "match played"
        );
    }

    fn week_completed(&mut self, week: usize, ledger: &StandingsLedger) {
        if let Some(leader) = ledger.order().first() {
            let entry = ledger.entry(*leader);
            tracing::info!(
                season = %self.season,
                week,
                leader = %entry.competitor.name,
                points = entry.match_points,
                "week completed"
            );
        }
    }
}
