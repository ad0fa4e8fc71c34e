//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - ingests points (or generates synthetic samples)
//! - runs candidate fits + selection
//! - prints reports
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, FitArgs, SampleArgs};
use crate::domain::{FitConfig, SampleConfig, SampleFormat};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `gfit` binary.
pub fn run() -> Result<(), AppError> {
    // We want `gfit -f points.csv` to behave like `gfit fit -f points.csv`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args)?;
    let run = pipeline::run_fit(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&config, &run.ingest, &run.session)
    );
    if !run.outliers.is_empty() {
        println!("{}", crate::report::format_outliers(&run.outliers));
    }

    // Optional exports.
    if let Some(path) = &config.export_results {
        crate::io::export::write_results_csv(path, &run.residuals)?;
        println!("Results exported to {}", path.display());
    }
    if config.debug_bundle {
        let path = crate::debug::write_debug_bundle(&config, &run.ingest, &run.session)?;
        println!("Debug bundle written to {}", path.display());
    }

    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = sample_config_from_args(&args);
    let sample = crate::data::generate_sample(&config)?;
    match config.format {
        SampleFormat::Csv => crate::io::export::write_points_csv(&config.out_path, &sample.points)?,
        SampleFormat::Json => crate::io::points_json::write_points_json(
            &config.out_path,
            &sample.points,
            &sample.params,
            &sample.stats,
        )?,
    }

    println!(
        "Wrote {} points to {}",
        sample.points.len(),
        config.out_path.display()
    );
    println!(
        "True curve: f(x) = {}",
        crate::models::expression::render(&sample.params)
    );
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> Result<FitConfig, AppError> {
    if !(1..=8).contains(&args.max_degree) {
        return Err(AppError::new(
            2,
            format!(
                "--max-degree must be between 1 and 8 (got {}).",
                args.max_degree
            ),
        ));
    }
    Ok(FitConfig {
        input_path: args.file.clone(),
        family: args.family,
        max_degree: args.max_degree,
        top_n: args.top,
        export_results: args.export.clone(),
        debug_bundle: args.debug_bundle,
    })
}

pub fn sample_config_from_args(args: &SampleArgs) -> SampleConfig {
    SampleConfig {
        family: args.family,
        trig: args.trig,
        params: args.params.clone(),
        count: args.count,
        seed: args.seed,
        noise: args.noise,
        x_min: args.x_min,
        x_max: args.x_max,
        format: args.format,
        out_path: args.out.clone(),
    }
}

/// Rewrite argv so `gfit <flags>` defaults to `gfit fit <flags>`.
///
/// Rules:
/// - `gfit -f points.csv ...`   -> `gfit fit -f points.csv ...`
/// - `gfit --help/--version/-h` -> unchanged (show top-level help/version)
/// - `gfit fit/sample ...`      -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "fit" | "sample");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "fit flags".
    if arg1.starts_with('-') {
        argv.insert(1, "fit".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
