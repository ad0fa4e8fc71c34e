//! Shared "fit pipeline" logic used by the `fit` subcommand and tests.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! point ingest -> candidate fits -> selection -> residuals -> outlier ranking

use crate::domain::{FitConfig, PointResidual};
use crate::error::AppError;
use crate::fit::session::{FitSession, fit_and_select};
use crate::io::ingest::{self, IngestedPoints};
use crate::report;

/// All computed outputs of a single `gfit fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedPoints,
    pub session: FitSession,
    pub residuals: Vec<PointResidual>,
    pub outliers: Vec<PointResidual>,
}

/// Execute the full fitting pipeline and return the computed outputs.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    let ingest = ingest::load_points(&config.input_path)?;
    run_fit_with_points(config, ingest)
}

/// Execute the fitting pipeline on pre-ingested points.
///
/// This is useful for tests where the CSV lives in memory.
pub fn run_fit_with_points(
    config: &FitConfig,
    ingest: IngestedPoints,
) -> Result<RunOutput, AppError> {
    let session = fit_and_select(&ingest.points, config.family, config.max_degree)?;

    let params = session
        .best
        .params
        .as_ref()
        .ok_or_else(|| AppError::new(4, "Winning candidate has no parameters."))?;
    let residuals = report::compute_residuals(&ingest.points, &ingest.ids, params);
    let outliers = report::rank_outliers(&residuals, config.top_n);

    Ok(RunOutput {
        ingest,
        session,
        residuals,
        outliers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FamilySpec;
    use crate::io::ingest::read_points;
    use std::path::PathBuf;

    #[test]
    fn pipeline_runs_end_to_end_from_csv_bytes() {
        let csv = "x,y\n0,1\n1,3\n2,5\n3,7\n4,9\n";
        let ingest = read_points(csv.as_bytes()).unwrap();
        let config = FitConfig {
            input_path: PathBuf::from("points.csv"),
            family: FamilySpec::Auto,
            max_degree: 3,
            top_n: 3,
            export_results: None,
            debug_bundle: false,
        };

        let run = run_fit_with_points(&config, ingest).unwrap();
        assert_eq!(run.session.best.fit.expression, "2.00x + 1.00");
        assert_eq!(run.residuals.len(), 5);
        assert!(run.outliers.len() <= 3);
    }

    #[test]
    fn pipeline_rejects_unfittable_family() {
        let csv = "x,y\n-3,-1\n-2,-2\n-1,-3\n";
        let ingest = read_points(csv.as_bytes()).unwrap();
        let config = FitConfig {
            input_path: PathBuf::from("points.csv"),
            family: FamilySpec::Logarithmic,
            max_degree: 3,
            top_n: 3,
            export_results: None,
            debug_bundle: false,
        };

        let err = run_fit_with_points(&config, ingest).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
