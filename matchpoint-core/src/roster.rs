//! Roster generation
//!
//! Builds the ordered competitor list for a season from a count and a skill
//! distribution, padding odd rosters with a single bye.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use statrs::distribution::Normal;
use std::fmt;
use std::str::FromStr;

use crate::competitor::Competitor;
use crate::error::ConfigError;

/// Lowest and highest skill of the spread and uniform distributions
const SKILL_RANGE: (f64, f64) = (-3.0, 3.0);

/// How skills are assigned to generated competitors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SkillMode {
    /// Every competitor has skill 0
    Constant,
    /// Evenly spaced across [-3, +3]
    Linear,
    /// Drawn from a standard normal distribution
    Normal,
    /// Drawn uniformly from [-3, +3)
    Uniform,
}

impl Default for SkillMode {
    fn default() -> Self {
        SkillMode::Linear
    }
}

impl SkillMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SkillMode::Constant => "constant",
            SkillMode::Linear => "linear",
            SkillMode::Normal => "normal",
            SkillMode::Uniform => "uniform",
        }
    }
}

impl fmt::Display for SkillMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "constant" | "identical" => Ok(SkillMode::Constant),
            "linear" | "spread" => Ok(SkillMode::Linear),
            "normal" => Ok(SkillMode::Normal),
            "uniform" | "random" => Ok(SkillMode::Uniform),
            _ => Err(ConfigError::UnknownSkillMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for SkillMode {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SkillMode> for String {
    fn from(mode: SkillMode) -> Self {
        mode.as_str().to_string()
    }
}

/// Builds season rosters
#[derive(Clone, Copy, Debug)]
pub struct RosterBuilder {
    count: usize,
    mode: SkillMode,
}

impl RosterBuilder {
    /// Validate the requested roster
    pub fn new(count: usize, mode: SkillMode) -> Result<Self, ConfigError> {
        if count < 2 {
            return Err(ConfigError::TooFewCompetitors { count });
        }
        Ok(Self { count, mode })
    }

    /// Generate, shuffle and pad the roster.
    ///
    /// The bye (if any) is always the last element.
    pub fn build<R: Rng>(&self, rng: &mut R) -> Vec<Competitor> {
        let mut roster = self.generate(rng);
        roster.shuffle(rng);
        pad_with_bye(&mut roster);
        roster
    }

    fn generate<R: Rng>(&self, rng: &mut R) -> Vec<Competitor> {
        let n = self.count;
        let (low, high) = SKILL_RANGE;

        match self.mode {
            SkillMode::Constant => (0..n).map(|i| team(i, 0.0)).collect(),
            SkillMode::Linear => (0..n)
                .map(|i| team(i, i as f64 / (n - 1) as f64 * (high - low) + low))
                .collect(),
            SkillMode::Normal => {
                let normal = standard_normal();
                (0..n).map(|i| team(i, rng.sample(normal))).collect()
            }
            SkillMode::Uniform => (0..n).map(|i| team(i, rng.gen_range(low..high))).collect(),
        }
    }
}

/// Accept a caller-supplied roster, padding it to an even size
pub fn prepare_roster(mut roster: Vec<Competitor>) -> Result<Vec<Competitor>, ConfigError> {
    let byes = roster.iter().filter(|c| c.is_bye).count();
    if byes > 1 {
        return Err(ConfigError::DuplicateBye);
    }
    let real = roster.len() - byes;
    if real < 2 {
        return Err(ConfigError::TooFewCompetitors { count: real });
    }
    // Keep the bye at the end
    if byes == 1 {
        roster.sort_by_key(|c| c.is_bye);
        if roster.len() % 2 == 1 {
            roster.pop();
        }
    }
    pad_with_bye(&mut roster);
    Ok(roster)
}

fn pad_with_bye(roster: &mut Vec<Competitor>) {
    if roster.len() % 2 == 1 {
        roster.push(Competitor::bye());
    }
}

fn team(i: usize, skill: f64) -> Competitor {
    Competitor::new(format!("Team {}", i), skill)
}

fn standard_normal() -> Normal {
    // Mean 0, sd 1 is always a valid parameterization
    match Normal::new(0.0, 1.0) {
        Ok(normal) => normal,
        Err(_) => unreachable!("standard normal parameters are valid"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::competitor::BYE_SKILL;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_rejects_small_rosters() {
        assert_eq!(
            RosterBuilder::new(1, SkillMode::Linear).unwrap_err(),
            ConfigError::TooFewCompetitors { count: 1 }
        );
        assert!(RosterBuilder::new(0, SkillMode::Constant).is_err());
        assert!(RosterBuilder::new(2, SkillMode::Constant).is_ok());
    }

    #[test]
    fn test_parse_skill_mode() {
        assert_eq!("linear".parse::<SkillMode>().unwrap(), SkillMode::Linear);
        assert_eq!("Identical".parse::<SkillMode>().unwrap(), SkillMode::Constant);
        assert_eq!(" normal ".parse::<SkillMode>().unwrap(), SkillMode::Normal);
        assert_eq!("random".parse::<SkillMode>().unwrap(), SkillMode::Uniform);
        assert_eq!(
            "bimodal".parse::<SkillMode>().unwrap_err(),
            ConfigError::UnknownSkillMode("bimodal".to_string())
        );
    }

    #[test]
    fn test_linear_spread_covers_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let roster = RosterBuilder::new(7, SkillMode::Linear).unwrap().build(&mut rng);
        let mut skills: Vec<f64> = roster.iter().filter(|c| !c.is_bye).map(|c| c.skill).collect();
        skills.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(skills.len(), 7);
        assert!((skills[0] + 3.0).abs() < 1e-12);
        assert!((skills[6] - 3.0).abs() < 1e-12);
        assert!((skills[3]).abs() < 1e-12);
    }

    #[test]
    fn test_odd_roster_gets_one_bye_at_end() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let roster = RosterBuilder::new(5, SkillMode::Normal).unwrap().build(&mut rng);
        assert_eq!(roster.len(), 6);
        assert_eq!(roster.iter().filter(|c| c.is_bye).count(), 1);
        assert!(roster[5].is_bye);
        assert_eq!(roster[5].skill, BYE_SKILL);

        let min_real = roster[..5].iter().map(|c| c.skill).fold(f64::INFINITY, f64::min);
        assert!(BYE_SKILL < min_real - 100.0);
    }

    #[test]
    fn test_even_roster_has_no_bye() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let roster = RosterBuilder::new(8, SkillMode::Uniform).unwrap().build(&mut rng);
        assert_eq!(roster.len(), 8);
        assert!(roster.iter().all(|c| !c.is_bye));
        assert!(roster.iter().all(|c| (-3.0..3.0).contains(&c.skill)));
    }

    #[test]
    fn test_constant_mode() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let roster = RosterBuilder::new(4, SkillMode::Constant).unwrap().build(&mut rng);
        assert!(roster.iter().all(|c| c.skill == 0.0));
    }

    #[test]
    fn test_same_seed_same_roster() {
        let builder = RosterBuilder::new(9, SkillMode::Normal).unwrap();
        let a = builder.build(&mut ChaCha8Rng::seed_from_u64(99));
        let b = builder.build(&mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_prepare_supplied_roster() {
        let roster = vec![
            Competitor::new("A", 1.0),
            Competitor::new("B", 0.0),
            Competitor::new("C", -1.0),
        ];
        let prepared = prepare_roster(roster).unwrap();
        assert_eq!(prepared.len(), 4);
        assert!(prepared[3].is_bye);
        assert_eq!(prepared[0].name, "A");

        let with_two_byes = vec![
            Competitor::new("A", 1.0),
            Competitor::bye(),
            Competitor::new("B", 0.0),
            Competitor::bye(),
        ];
        assert_eq!(prepare_roster(with_two_byes).unwrap_err(), ConfigError::DuplicateBye);

        let lonely = vec![Competitor::new("A", 1.0)];
        assert_eq!(
            prepare_roster(lonely).unwrap_err(),
            ConfigError::TooFewCompetitors { count: 1 }
        );
    }

    #[test]
    fn test_supplied_bye_is_moved_last_or_dropped() {
        // Three real competitors plus a bye: already even, bye goes last
        let roster = vec![
            Competitor::bye(),
            Competitor::new("A", 1.0),
            Competitor::new("B", 0.0),
            Competitor::new("C", -1.0),
        ];
        let prepared = prepare_roster(roster).unwrap();
        assert_eq!(prepared.len(), 4);
        assert!(prepared[3].is_bye);

        // Two real competitors plus a bye: the bye is unnecessary
        let roster = vec![Competitor::new("A", 1.0), Competitor::bye(), Competitor::new("B", 0.0)];
        let prepared = prepare_roster(roster).unwrap();
        assert_eq!(prepared.len(), 2);
        assert!(prepared.iter().all(|c| !c.is_bye));
    }

    #[test]
    fn test_skill_mode_serde_uses_parser() {
        let mode: SkillMode = serde_json::from_str("\"spread\"").unwrap();
        assert_eq!(mode, SkillMode::Linear);
        assert_eq!(serde_json::to_string(&SkillMode::Normal).unwrap(), "\"normal\"");
        let err = serde_json::from_str::<SkillMode>("\"zipf\"").unwrap_err();
        assert!(err.to_string().contains("unknown skill mode"));
    }
}
