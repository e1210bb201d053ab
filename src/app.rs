//! Top-level application orchestration.
//!
//! `src/main.rs` stays tiny; this module is the "real main" that:
//! - installs logging
//! - parses CLI arguments
//! - picks a catalog source
//! - runs the analysis pipeline
//! - prints tables, plots or JSON and writes optional exports

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::{AnalyzeArgs, ChartArgs, Command};
use crate::data::{CATALOG_URL_ENV, CatalogSource, HttpCatalog, StaticCatalog};
use crate::domain::AnalysisConfig;
use crate::error::AppError;
use crate::io::FileCatalog;
use crate::report::{AptitudeReport, EnhancedTemporalAnalysis};

pub mod pipeline;

/// Entry point for the `saju` binary.
pub fn run() -> Result<(), AppError> {
    init_tracing();
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Pillars(args) => handle_pillars(args),
        Command::Analyze(args) => handle_analyze(args, OutputMode::Aptitude),
        Command::Temporal(args) => handle_analyze(args, OutputMode::Temporal),
    }
}

/// Logs go to stderr so stdout stays clean for reports and JSON.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Aptitude,
    Temporal,
}

fn handle_pillars(args: ChartArgs) -> Result<(), AppError> {
    let config = config_from_args(&args, None, AnalysisConfig::default().top_items)?;
    let request = request_from_args(&args, config);
    let chart = pipeline::compute_chart(&request)?;

    if args.json {
        println!("{}", to_json(&chart.features)?);
        return Ok(());
    }

    println!("{}", crate::report::format_chart(&chart.chart, &chart.features));
    if args.plot {
        println!(
            "{}",
            crate::plot::render_element_bars(&chart.features.distribution, args.width)
        );
    }
    Ok(())
}

fn handle_analyze(args: AnalyzeArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = config_from_args(&args.chart, args.as_of.as_deref(), args.top)?;
    let request = request_from_args(&args.chart, config);
    let source = catalog_source(&args)?;
    let run = pipeline::run_analysis(&request, source.as_ref())?;

    let report = AptitudeReport::from(&run.result);
    let enhanced = match mode {
        OutputMode::Temporal => Some(EnhancedTemporalAnalysis::build(&run.result, &run.temporal)),
        OutputMode::Aptitude => None,
    };

    if args.chart.json {
        let json = match &enhanced {
            Some(enhanced) => to_json(enhanced)?,
            None => to_json(&report)?,
        };
        println!("{json}");
    } else {
        println!("{}", crate::report::format_chart(&run.chart, &run.features));
        println!("{}", crate::report::format_result(&run.result));
        if mode == OutputMode::Temporal {
            println!(
                "{}",
                crate::report::format_temporal(&run.temporal, &run.recommendations)
            );
        }
        if args.chart.plot {
            println!(
                "{}",
                crate::plot::render_element_bars(&run.features.distribution, args.chart.width)
            );
            println!("{}", crate::plot::render_score_bars(&run.result, args.chart.width));
        }
    }

    if let Some(path) = &args.export {
        match &enhanced {
            Some(enhanced) => crate::io::write_json(path, enhanced)?,
            None => crate::io::write_json(path, &report)?,
        }
    }
    if let Some(path) = &args.export_csv {
        crate::io::write_scores_csv(path, &run.result)?;
    }

    Ok(())
}

/// Catalog precedence: `--catalog` file, `--catalog-url`, `SAJU_CATALOG_URL`
/// (environment or `.env`), then the built-in sample.
fn catalog_source(args: &AnalyzeArgs) -> Result<Box<dyn CatalogSource>, AppError> {
    if let Some(path) = &args.catalog {
        return Ok(Box::new(FileCatalog::open(path)));
    }
    if let Some(url) = &args.catalog_url {
        return Ok(Box::new(HttpCatalog::new(url.as_str())?));
    }
    dotenvy::dotenv().ok();
    if std::env::var_os(CATALOG_URL_ENV).is_some() {
        return Ok(Box::new(HttpCatalog::from_env()?));
    }
    debug!("no catalog configured; using the built-in sample");
    Ok(Box::new(StaticCatalog::sample()))
}

pub fn config_from_args(
    args: &ChartArgs,
    as_of: Option<&str>,
    top_items: usize,
) -> Result<AnalysisConfig, AppError> {
    let as_of = as_of.map(crate::calendar::parse_date).transpose()?;
    Ok(AnalysisConfig {
        day_anchor: args.day_anchor,
        lunar_offset_days: args.lunar_offset,
        top_items,
        as_of,
    })
}

fn request_from_args(args: &ChartArgs, config: AnalysisConfig) -> pipeline::AnalysisRequest {
    pipeline::AnalysisRequest {
        birth_date: args.date.clone(),
        birth_time: args.time.clone(),
        is_lunar: args.lunar,
        config,
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::new(4, format!("Failed to serialize output: {e}")))
}
