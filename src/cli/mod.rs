//! Command-line parsing for the saju calculator.
//!
//! Argument parsing and command dispatch stay separate from the calendar and
//! scoring code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::DayAnchor;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "saju",
    version,
    about = "Four-pillar chart calculator and aptitude scorer"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute the four pillars, ten gods and element balance of a birth moment.
    Pillars(ChartArgs),
    /// Score every catalog category against the chart.
    Analyze(AnalyzeArgs),
    /// Analyze and compare the chart with the pillars of a reference date.
    Temporal(AnalyzeArgs),
}

/// Birth moment and calendar conventions.
#[derive(Debug, Args, Clone)]
pub struct ChartArgs {
    /// Birth date, YYYY-MM-DD.
    #[arg(short = 'd', long)]
    pub date: String,

    /// Birth time, HH:MM (24h).
    #[arg(short = 't', long, default_value = "12:00")]
    pub time: String,

    /// Interpret the birth date as a lunar date.
    #[arg(long)]
    pub lunar: bool,

    /// Days added to a lunar date to approximate the solar date.
    #[arg(long, default_value_t = 11)]
    pub lunar_offset: i64,

    /// Anchor of the day-pillar cycle at 1900-01-01.
    #[arg(long, value_enum, default_value_t = DayAnchor::Legacy)]
    pub day_anchor: DayAnchor,

    /// Print JSON instead of tables.
    #[arg(long)]
    pub json: bool,

    /// Render ASCII bar charts.
    #[arg(long)]
    pub plot: bool,

    /// Bar chart width (columns).
    #[arg(long, default_value_t = 40)]
    pub width: usize,
}

/// Options for catalog analysis.
#[derive(Debug, Args, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub chart: ChartArgs,

    /// Reference date for temporal scores, YYYY-MM-DD (default: today).
    #[arg(long)]
    pub as_of: Option<String>,

    /// Catalog file (CSV, or JSON when the extension is .json).
    #[arg(long, value_name = "FILE", conflicts_with = "catalog_url")]
    pub catalog: Option<PathBuf>,

    /// Catalog endpoint returning JSON rows (falls back to SAJU_CATALOG_URL).
    #[arg(long, value_name = "URL")]
    pub catalog_url: Option<String>,

    /// Ranked items kept per category.
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// Export the report to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    /// Export per-category scores to CSV.
    #[arg(long = "export-csv", value_name = "CSV")]
    pub export_csv: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_analyze_flags() {
        let cli = Cli::parse_from([
            "saju",
            "analyze",
            "--date",
            "1990-05-15",
            "--time",
            "10:30",
            "--day-anchor",
            "sexagenary",
            "--top",
            "3",
            "--catalog",
            "catalog.csv",
        ]);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.chart.date, "1990-05-15");
        assert_eq!(args.chart.day_anchor, DayAnchor::Sexagenary);
        assert_eq!(args.chart.lunar_offset, 11);
        assert_eq!(args.top, 3);
        assert_eq!(args.catalog, Some(PathBuf::from("catalog.csv")));
    }

    #[test]
    fn catalog_sources_conflict() {
        let res = Cli::try_parse_from([
            "saju",
            "analyze",
            "-d",
            "1990-05-15",
            "--catalog",
            "a.csv",
            "--catalog-url",
            "http://x",
        ]);
        assert!(res.is_err());
    }
}
