//! Match simulation - resolves one pairing into a scored outcome
//!
//! Each round is an independent Bernoulli trial won by the home side with
//! probability `1 / (1 + e^(-2n))`, where `n` is the skill differential.
//! Rounds are played until one side reaches the format's win threshold.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Scaling of the skill differential in the logistic round model
const ODDS_SCALING_FACTOR: f64 = 2.0;

/// Points shared between the two sides of every contest
const POINTS_PER_MATCH: u32 = 9;

/// Rounds needed to win a KOTH match; also the common reporting scale
const KOTH_THRESHOLD: u32 = 4;

/// Rounds needed to win a Stopwatch match
const STOPWATCH_THRESHOLD: u32 = 2;

/// Contest format
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchFormat {
    /// First to 4 rounds
    Koth,
    /// First to 2 rounds, tallies doubled when reported
    Stopwatch,
}

impl MatchFormat {
    /// Format played in a given week: even weeks are Stopwatch, odd weeks KOTH
    pub fn for_week(week: usize) -> Self {
        if week % 2 == 0 {
            MatchFormat::Stopwatch
        } else {
            MatchFormat::Koth
        }
    }

    /// Rounds a side must win to take the match
    pub fn win_threshold(self) -> u32 {
        match self {
            MatchFormat::Koth => KOTH_THRESHOLD,
            MatchFormat::Stopwatch => STOPWATCH_THRESHOLD,
        }
    }

    /// Multiplier applied to reported round tallies
    fn round_scale(self) -> u32 {
        match self {
            MatchFormat::Koth => 1,
            MatchFormat::Stopwatch => 2,
        }
    }
}

/// One side's view of a finished contest
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub won: bool,
    pub rounds_won: u32,
    pub rounds_lost: u32,
    pub match_points: u32,
}

impl MatchOutcome {
    /// The same contest seen from the other side
    pub fn mirrored(&self, match_points: u32) -> Self {
        Self {
            won: !self.won,
            rounds_won: self.rounds_lost,
            rounds_lost: self.rounds_won,
            match_points,
        }
    }
}

/// Probability that the home side wins any single round
pub fn win_probability(home_skill: f64, away_skill: f64) -> f64 {
    let diff = home_skill - away_skill;
    1.0 / (1.0 + (-ODDS_SCALING_FACTOR * diff).exp())
}

/// Simulate a contest, returning `(home, away)` outcomes
pub fn simulate_match<R: Rng>(
    home_skill: f64,
    away_skill: f64,
    format: MatchFormat,
    rng: &mut R,
) -> (MatchOutcome, MatchOutcome) {
    let p = win_probability(home_skill, away_skill);
    let limit = format.win_threshold();

    let mut home_rounds = 0u32;
    let mut away_rounds = 0u32;
    while home_rounds < limit && away_rounds < limit {
        if rng.gen::<f64>() < p {
            home_rounds += 1;
        } else {
            away_rounds += 1;
        }
    }

    // Points come from the raw tallies; only the reported rounds are rescaled
    let (home_points, away_points) = match_points(home_rounds, away_rounds);
    let scale = format.round_scale();

    let home = MatchOutcome {
        won: home_rounds > away_rounds,
        rounds_won: home_rounds * scale,
        rounds_lost: away_rounds * scale,
        match_points: home_points,
    };
    (home, home.mirrored(away_points))
}

/// Outcome of a contest against the bye: the real side wins 4-0 for full points
pub fn forfeit(home_is_bye: bool) -> (MatchOutcome, MatchOutcome) {
    let winner = MatchOutcome {
        won: true,
        rounds_won: KOTH_THRESHOLD,
        rounds_lost: 0,
        match_points: POINTS_PER_MATCH,
    };
    let loser = winner.mirrored(0);
    if home_is_bye {
        (loser, winner)
    } else {
        (winner, loser)
    }
}

/// Convert raw round tallies into `(home, away)` match points.
///
/// A side finishing on 4 rounds earns 6 plus 3 minus the loser's rounds, and
/// the loser keeps one point per round. Any other finish splits 9 points in
/// proportion to rounds won.
pub fn match_points(home_rounds: u32, away_rounds: u32) -> (u32, u32) {
    if home_rounds.max(away_rounds) == KOTH_THRESHOLD {
        if home_rounds > away_rounds {
            (6 + (3 - away_rounds.min(3)), away_rounds)
        } else {
            (home_rounds, 6 + (3 - home_rounds.min(3)))
        }
    } else {
        let total = (home_rounds + away_rounds).max(1);
        let home = (home_rounds as f64 / total as f64 * POINTS_PER_MATCH as f64).round() as u32;
        (home, POINTS_PER_MATCH - home)
    }
}

/// Deterministic expected `(home, away)` points for a pairing.
///
/// For each format the favourite's round share is snapped to the closest
/// share attainable in a finished match, and the implied tallies are scored.
/// The two formats are averaged.
pub fn expected_points(home_skill: f64, away_skill: f64) -> (f64, f64) {
    let p = win_probability(home_skill, away_skill);
    if p == 0.5 {
        let half = POINTS_PER_MATCH as f64 / 2.0;
        return (half, half);
    }

    let favourite = p.max(1.0 - p);
    let mut home_total = 0.0;
    let mut away_total = 0.0;
    let formats = [MatchFormat::Stopwatch, MatchFormat::Koth];

    for format in formats {
        let limit = format.win_threshold();
        let loser_rounds = closest_loser_rounds(favourite, limit);
        let (home_rounds, away_rounds) = if p > 0.5 {
            (limit, loser_rounds)
        } else {
            (loser_rounds, limit)
        };
        let (h, a) = match_points(home_rounds, away_rounds);
        home_total += h as f64;
        away_total += a as f64;
    }

    let n = formats.len() as f64;
    (home_total / n, away_total / n)
}

/// Loser's rounds whose winner share `limit / (limit + l)` is closest to `share`
fn closest_loser_rounds(share: f64, limit: u32) -> u32 {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for loser in 0..limit {
        let distance = (share - limit as f64 / (limit + loser) as f64).abs();
        if distance < best_distance {
            best = loser;
            best_distance = distance;
        }
    }
    best
}
