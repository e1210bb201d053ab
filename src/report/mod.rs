//! Wire-format reports and terminal formatting.
//!
//! `AptitudeReport` is the documented JSON shape consumers depend on: item
//! names, 0–100 integer confidences and LOW/MEDIUM/HIGH risk levels. The richer
//! `AptitudeResult` stays internal to the engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::{FortuneTrend, PeriodInteractions, TemporalAnalysis};
use crate::aptitude::{AptitudeResult, RiskLevel, TemporalRecommendations, temporal_recommendations};
use crate::domain::CurrentPillars;

pub mod format;

pub use format::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositiveEntry {
    pub items: Vec<String>,
    /// 0–100.
    pub confidence: u8,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegativeEntry {
    pub items: Vec<String>,
    pub risk_level: RiskLevel,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AptitudeReport {
    pub positive: BTreeMap<String, PositiveEntry>,
    pub negative: BTreeMap<String, NegativeEntry>,
    /// 0–100.
    pub confidence: u8,
    pub summary: String,
}

/// `[0, 1]` → rounded `0..=100`.
pub fn to_percent(fraction: f64) -> u8 {
    if !fraction.is_finite() {
        return 50;
    }
    (fraction.clamp(0.0, 1.0) * 100.0).round() as u8
}

impl From<&AptitudeResult> for AptitudeReport {
    fn from(result: &AptitudeResult) -> Self {
        let positive = result
            .positive
            .iter()
            .map(|(name, outcome)| {
                (
                    name.clone(),
                    PositiveEntry {
                        items: outcome.score.item_names(),
                        confidence: to_percent(outcome.score.confidence_level),
                        reasoning: outcome.reasoning.clone(),
                    },
                )
            })
            .collect();
        let negative = result
            .negative
            .iter()
            .map(|(name, outcome)| {
                (
                    name.clone(),
                    NegativeEntry {
                        items: outcome.score.item_names(),
                        risk_level: outcome.risk_level.unwrap_or(RiskLevel::Low),
                        reasoning: outcome.reasoning.clone(),
                    },
                )
            })
            .collect();

        AptitudeReport {
            positive,
            negative,
            confidence: to_percent(result.overall_confidence),
            summary: result.summary.clone(),
        }
    }
}

/// Aptitude report extended with the current-period comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedTemporalAnalysis {
    #[serde(flatten)]
    pub report: AptitudeReport,
    pub current_pillars: CurrentPillars,
    pub interactions: PeriodInteractions,
    pub fortune_trends: FortuneTrend,
    pub temporal_recommendations: TemporalRecommendations,
}

impl EnhancedTemporalAnalysis {
    pub fn build(result: &AptitudeResult, temporal: &TemporalAnalysis) -> Self {
        Self {
            report: AptitudeReport::from(result),
            current_pillars: temporal.current_pillars,
            interactions: temporal.interactions.clone(),
            fortune_trends: temporal.fortune_trend,
            temporal_recommendations: temporal_recommendations(result, temporal),
        }
    }
}
