//! Shared analysis pipeline used by every CLI command.
//!
//! Keeping the workflow in one place:
//! birth input -> pillars -> chart features -> catalog scoring -> temporal comparison
//!
//! Front-ends then only deal with presentation (tables, JSON, exports).

use tracing::info;

use crate::analysis::{TemporalAnalysis, analyze_temporal};
use crate::aptitude::{AptitudeResult, TemporalRecommendations, analyze_with_source, temporal_recommendations};
use crate::calendar::{BirthInput, PillarCalculator};
use crate::data::CatalogSource;
use crate::domain::{AnalysisConfig, CurrentPillars, FourPillars};
use crate::error::EngineError;
use crate::scoring::ChartFeatures;

/// Raw request as received from a caller.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub birth_date: String,
    pub birth_time: String,
    pub is_lunar: bool,
    pub config: AnalysisConfig,
}

/// A computed chart and its derived features.
#[derive(Debug, Clone)]
pub struct ChartOutput {
    pub input: BirthInput,
    pub chart: FourPillars,
    pub features: ChartFeatures,
}

/// All outputs of one analysis run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub input: BirthInput,
    pub chart: FourPillars,
    pub features: ChartFeatures,
    pub current: CurrentPillars,
    pub result: AptitudeResult,
    pub temporal: TemporalAnalysis,
    pub recommendations: TemporalRecommendations,
}

/// Validate the request and compute the chart.
pub fn compute_chart(request: &AnalysisRequest) -> Result<ChartOutput, EngineError> {
    let input = BirthInput::parse(&request.birth_date, &request.birth_time, request.is_lunar)?;
    let chart = PillarCalculator::new(&request.config).compute(&input)?;
    Ok(ChartOutput {
        input,
        features: ChartFeatures::from_chart(&chart),
        chart,
    })
}

/// Execute the full pipeline. Only input validation can fail; catalog
/// problems degrade the result instead.
pub fn run_analysis(
    request: &AnalysisRequest,
    source: &dyn CatalogSource,
) -> Result<RunOutput, EngineError> {
    let ChartOutput {
        input,
        chart,
        features,
    } = compute_chart(request)?;

    let as_of = request.config.as_of_or_today();
    let current = PillarCalculator::new(&request.config).current(as_of);
    info!(
        chart = %format!("{} {} {} {}", chart.year, chart.month, chart.day, chart.hour),
        %as_of,
        source = %source.describe(),
        "running analysis"
    );

    let result = analyze_with_source(&chart, source, &current, &request.config);
    let temporal = analyze_temporal(&chart, &current);
    let recommendations = temporal_recommendations(&result, &temporal);

    Ok(RunOutput {
        input,
        chart,
        features,
        current,
        result,
        temporal,
        recommendations,
    })
}
