//! Batch runner - many independent seasons, optionally in parallel

use rayon::prelude::*;

use crate::config::SeasonConfig;
use crate::error::SeasonError;
use crate::season::{Season, SeasonReport};

/// Build and play one season to completion
pub fn run_season(config: &SeasonConfig) -> Result<SeasonReport, SeasonError> {
    let mut season = Season::new(config)?;
    season.run()?;

    let report = season.report();
    tracing::debug!(
        season = %report.name,
        weeks = report.weeks_played,
        mean_distortion = report.mean_distortion(),
        "season finished"
    );
    Ok(report)
}

/// Run every config as its own season. Results keep the input order.
pub fn run_seasons(
    configs: &[SeasonConfig],
    parallel: bool,
) -> Vec<Result<SeasonReport, SeasonError>> {
    tracing::info!("Running {} seasons (parallel: {})", configs.len(), parallel);

    if parallel {
        configs.par_iter().map(run_season).collect()
    } else {
        configs.iter().map(run_season).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_season() {
        let report = run_season(&SeasonConfig::round_robin(8).with_seed(42)).unwrap();
        assert_eq!(report.weeks_played, 7);
        assert_eq!(report.standings.len(), 8);
        assert_eq!(report.distortions.len(), 8);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let configs: Vec<SeasonConfig> = (0..6)
            .map(|i| SeasonConfig::swiss(10, 3).with_seed(i).with_name(format!("S{}", i)))
            .collect();

        let sequential = run_seasons(&configs, false);
        let parallel = run_seasons(&configs, true);
        assert_eq!(sequential.len(), 6);

        for (i, (a, b)) in sequential.iter().zip(&parallel).enumerate() {
            let a = a.as_ref().unwrap();
            let b = b.as_ref().unwrap();
            assert_eq!(a.name, format!("S{}", i));
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_errors_are_per_season() {
        let configs = vec![
            SeasonConfig::round_robin(4).with_seed(1),
            SeasonConfig::round_robin(1),
            SeasonConfig::swiss(4, 5).with_seed(1),
        ];
        let results = run_seasons(&configs, true);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(SeasonError::Config(_))));
        assert!(matches!(
            results[2],
            Err(SeasonError::SchedulingImpossible { week: 3, .. })
        ));
    }
}
