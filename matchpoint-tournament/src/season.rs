//! Season orchestration
//!
//! A [`Season`] owns the roster, the standings ledger and the season
//! generator. Weeks are strictly sequential: each week is paired, played,
//! recorded in opponent history and the standings re-sorted before the next.

use matchpoint_core::{
    create_rng, forfeit, prepare_roster, simulate_match, skill_order, CompetitorId, MatchFormat,
    MatchOutcome, RosterBuilder, Standing, StandingsLedger,
};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::{SearchBudget, SeasonConfig, SeasonFormat};
use crate::error::SeasonError;
use crate::observer::{NoopObserver, SeasonObserver};
use crate::round_robin::round_robin_schedule;
use crate::schedule::{Pairing, WeekSchedule};
use crate::swiss::{PairingFailure, SwissPairer};

/// Final or intermediate summary of a season
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeasonReport {
    pub name: String,
    pub weeks_played: usize,
    /// Standings sorted best first, bye last
    pub standings: Vec<Standing>,
    /// Per standings position (bye excluded): |table position - skill rank|
    pub distortions: Vec<usize>,
}

impl SeasonReport {
    /// Get winner (top standing)
    pub fn winner(&self) -> Option<&Standing> {
        self.standings.first()
    }

    /// Get top N performers
    pub fn top_n(&self, n: usize) -> &[Standing] {
        let n = n.min(self.standings.len());
        &self.standings[..n]
    }

    /// Get standing for a specific competitor
    pub fn standing_for(&self, id: CompetitorId) -> Option<&Standing> {
        self.standings.iter().find(|s| s.id == id)
    }

    pub fn mean_distortion(&self) -> f64 {
        mean(&self.distortions)
    }
}

/// One season of play
pub struct Season {
    name: String,
    ledger: StandingsLedger,
    format: SeasonFormat,
    pairer: SwissPairer,
    week: usize,
    /// Circle schedule, built on the first round-robin week
    round_robin: Vec<Vec<Pairing>>,
    /// Round-robin weeks played so far
    round_robin_week: usize,
    rng: ChaCha8Rng,
    history: Vec<WeekSchedule>,
    observer: Box<dyn SeasonObserver>,
}

impl Season {
    /// Build the roster and ledger for a configured season.
    ///
    /// A supplied roster is used in the given order (padded with a bye when
    /// odd); otherwise `count` competitors are generated and shuffled.
    pub fn new(config: &SeasonConfig) -> Result<Self, SeasonError> {
        let mut rng = create_rng(config.seed);
        let roster = match &config.competitors {
            Some(competitors) => prepare_roster(competitors.clone())?,
            None => RosterBuilder::new(config.count, config.skill_mode)?.build(&mut rng),
        };

        tracing::debug!(
            season = %config.name,
            competitors = roster.len(),
            format = ?config.format,
            "season created"
        );

        Ok(Self {
            name: config.name.clone(),
            ledger: StandingsLedger::new(roster),
            format: config.format,
            pairer: SwissPairer::new(config.search_budget),
            week: 0,
            round_robin: Vec::new(),
            round_robin_week: 0,
            rng,
            history: Vec::new(),
            observer: Box::new(NoopObserver),
        })
    }

    /// Replace the observer notified of every scheduled week and played match
    pub fn with_observer(mut self, observer: impl SeasonObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Weeks played so far
    pub fn week(&self) -> usize {
        self.week
    }

    pub fn format(&self) -> SeasonFormat {
        self.format
    }

    pub fn search_budget(&self) -> SearchBudget {
        self.pairer.budget()
    }

    pub fn ledger(&self) -> &StandingsLedger {
        &self.ledger
    }

    /// Every week's pairings, in play order
    pub fn schedule_history(&self) -> &[WeekSchedule] {
        &self.history
    }

    // ========================================================================
    // Level 1 - Orchestration
    // ========================================================================

    /// Play the whole configured season
    pub fn run(&mut self) -> Result<(), SeasonError> {
        match self.format {
            SeasonFormat::RoundRobin => self.run_round_robin(),
            SeasonFormat::Swiss { weeks } => self.run_swiss(weeks),
            SeasonFormat::Random { weeks } => self.run_random(weeks),
        }
    }

    /// Play every remaining round-robin week
    pub fn run_round_robin(&mut self) -> Result<(), SeasonError> {
        while self.run_round_robin_week()? {}
        Ok(())
    }

    /// Play `weeks` Swiss weeks
    pub fn run_swiss(&mut self, weeks: usize) -> Result<(), SeasonError> {
        for _ in 0..weeks {
            self.run_swiss_week()?;
        }
        Ok(())
    }

    /// Play `weeks` randomly paired weeks
    pub fn run_random(&mut self, weeks: usize) -> Result<(), SeasonError> {
        for _ in 0..weeks {
            self.run_random_week()?;
        }
        Ok(())
    }

    // ========================================================================
    // Level 2 - Weeks
    // ========================================================================

    /// Play the next round-robin week. Returns `false` once every week of the
    /// circle schedule has been played.
    pub fn run_round_robin_week(&mut self) -> Result<bool, SeasonError> {
        if self.round_robin_week == 0 {
            let ids: Vec<CompetitorId> = self.ledger.ids().collect();
            self.round_robin = round_robin_schedule(&ids);
        }

        let pairings = match self.round_robin.get(self.round_robin_week) {
            Some(pairings) => pairings.clone(),
            None => return Ok(false),
        };
        self.round_robin_week += 1;
        self.play_week(pairings);
        self.finish_week();
        Ok(true)
    }

    /// Pair by current standings and play one week
    pub fn run_swiss_week(&mut self) -> Result<(), SeasonError> {
        self.ledger.sort();
        let ranked = self.ledger.order().to_vec();
        let pairings = self
            .pairer
            .pair(&ranked, &self.ledger)
            .map_err(|failure| self.pairing_error(failure))?;

        self.play_week(pairings);
        self.finish_week();
        Ok(())
    }

    /// Shuffle the order (bye kept last) and pair it without repeat opponents
    pub fn run_random_week(&mut self) -> Result<(), SeasonError> {
        self.ledger.shuffle_order(&mut self.rng);
        let order = self.ledger.order().to_vec();
        let pairings = self
            .pairer
            .pair(&order, &self.ledger)
            .map_err(|failure| self.pairing_error(failure))?;

        self.play_week(pairings);
        self.finish_week();
        Ok(())
    }

    // ========================================================================
    // Level 3 - Steps
    // ========================================================================

    /// Record, resolve and apply every pairing of one week
    fn play_week(&mut self, pairings: Vec<Pairing>) {
        let schedule = WeekSchedule {
            week: self.week,
            format: MatchFormat::for_week(self.week),
            pairings,
        };
        self.observer.week_scheduled(&schedule);

        for pairing in &schedule.pairings {
            self.ledger.record_pairing(pairing.home, pairing.away);
            let (home, away) = self.resolve(pairing, schedule.format);
            self.ledger.apply(pairing.home, &home);
            self.ledger.apply(pairing.away, &away);
            self.observer.match_played(self.week, pairing, &home, &away);
        }

        self.history.push(schedule);
    }

    fn finish_week(&mut self) {
        self.ledger.sort();
        self.observer.week_completed(self.week, &self.ledger);
        self.week += 1;
    }

    /// Contests against the bye are forfeited, everything else is simulated
    fn resolve(&mut self, pairing: &Pairing, format: MatchFormat) -> (MatchOutcome, MatchOutcome) {
        let home = &self.ledger.entry(pairing.home).competitor;
        let away = &self.ledger.entry(pairing.away).competitor;

        if home.is_bye || away.is_bye {
            forfeit(home.is_bye)
        } else {
            let (home_skill, away_skill) = (home.skill, away.skill);
            simulate_match(home_skill, away_skill, format, &mut self.rng)
        }
    }

    fn pairing_error(&self, failure: PairingFailure) -> SeasonError {
        let competitors = self.ledger.len();
        match failure {
            PairingFailure::Exhausted { nodes } => {
                tracing::warn!(
                    season = %self.name,
                    week = self.week,
                    nodes,
                    "no pairing without repeat opponents"
                );
                SeasonError::SchedulingImpossible {
                    week: self.week,
                    competitors,
                }
            }
            PairingFailure::BudgetExceeded { nodes } => {
                tracing::warn!(
                    season = %self.name,
                    week = self.week,
                    nodes,
                    "pairing search budget exhausted"
                );
                SeasonError::SearchBudgetExhausted {
                    week: self.week,
                    nodes,
                }
            }
        }
    }

    // ========================================================================
    // Level 4 - Snapshots
    // ========================================================================

    /// Current standings, best first
    pub fn standings(&self) -> Vec<Standing> {
        self.ledger.standings()
    }

    /// One `name,skill,W,L,RW,RL,MP` line per competitor, best first
    pub fn render(&self) -> String {
        self.ledger.render()
    }

    /// 1-based league-table position
    pub fn rank_of(&self, id: CompetitorId) -> Option<usize> {
        self.ledger.rank_of(id)
    }

    /// 1-based skill rank of every competitor, indexed by id. The bye is last.
    pub fn skill_ranks(&self) -> Vec<usize> {
        let entries = self.ledger.entries();
        let mut by_skill: Vec<usize> = (0..entries.len()).collect();
        by_skill.sort_by(|&a, &b| {
            skill_order(&entries[a].competitor, &entries[b].competitor).then(a.cmp(&b))
        });

        let mut ranks = vec![0; entries.len()];
        for (pos, index) in by_skill.into_iter().enumerate() {
            ranks[index] = pos + 1;
        }
        ranks
    }

    /// |table position - skill rank| per standings position, bye excluded
    pub fn distortions(&self) -> Vec<usize> {
        let ranks = self.skill_ranks();
        self.ledger
            .ranked()
            .into_iter()
            .enumerate()
            .filter(|(_, id)| !self.ledger.entry(*id).competitor.is_bye)
            .map(|(pos, id)| (pos + 1).abs_diff(ranks[id.index()]))
            .collect()
    }

    pub fn mean_distortion(&self) -> f64 {
        mean(&self.distortions())
    }

    /// |home skill - away skill| of every pairing, one row per week in
    /// schedule order. Pairings with the bye carry the bye's sentinel gap.
    pub fn pairing_skill_gaps(&self) -> Vec<Vec<f64>> {
        let skill = |id: CompetitorId| self.ledger.entry(id).competitor.skill;
        self.history
            .iter()
            .map(|week| {
                week.pairings
                    .iter()
                    .map(|p| (skill(p.home) - skill(p.away)).abs())
                    .collect()
            })
            .collect()
    }

    pub fn report(&self) -> SeasonReport {
        SeasonReport {
            name: self.name.clone(),
            weeks_played: self.week,
            standings: self.standings(),
            distortions: self.distortions(),
        }
    }
}

fn mean(values: &[usize]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<usize>() as f64 / values.len() as f64
    }
}
