//! Aptitude analysis: score every catalog category against one chart.
//!
//! Categories are scored in parallel (each is a pure function of the shared
//! chart features) and collected into name-sorted maps, so the result is the
//! same regardless of scheduling.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::analysis::{TemporalAnalysis, Trend};
use crate::data::CatalogSource;
use crate::domain::{
    AnalysisConfig, CategoryTree, CurrentPillars, FourPillars, MajorType, TenGod,
};
use crate::scoring::{CategoryScore, ChartFeatures, score_category};

const CONFIDENCE_BASE: f64 = 0.7;
const BALANCE_BONUS: f64 = 0.2;
const STABILITY_BONUS: f64 = 0.1;
const CONFIDENCE_RANGE: (f64, f64) = (0.5, 0.95);

const RISK_HIGH: f64 = 2.5;
const RISK_MEDIUM: f64 = 1.5;

/// Risk classification of a negative category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// `item_count × confidence`: above 2.5 is high, above 1.5 medium.
    pub fn classify(item_count: usize, confidence: f64) -> RiskLevel {
        let exposure = item_count as f64 * confidence;
        if exposure > RISK_HIGH {
            RiskLevel::High
        } else if exposure > RISK_MEDIUM {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }

    pub fn korean(self) -> &'static str {
        match self {
            RiskLevel::Low => "낮음",
            RiskLevel::Medium => "보통",
            RiskLevel::High => "높음",
        }
    }
}

/// Whether the catalog could be consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coverage {
    Full,
    Reduced,
}

/// A scored category as it appears in the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryOutcome {
    pub score: CategoryScore,
    /// Only set for negative categories.
    pub risk_level: Option<RiskLevel>,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AptitudeResult {
    pub positive: BTreeMap<String, CategoryOutcome>,
    pub negative: BTreeMap<String, CategoryOutcome>,
    /// In `[0.5, 0.95]`.
    pub overall_confidence: f64,
    pub summary: String,
    pub coverage: Coverage,
}

impl AptitudeResult {
    pub fn category_count(&self) -> usize {
        self.positive.len() + self.negative.len()
    }
}

/// Score the whole catalog against a chart.
pub fn analyze(
    chart: &FourPillars,
    tree: &CategoryTree,
    current: &CurrentPillars,
    config: &AnalysisConfig,
) -> AptitudeResult {
    let features = ChartFeatures::from_chart(chart);
    info!(
        categories = tree.category_count(),
        day_master = chart.day_master().korean(),
        "scoring categories"
    );

    let categories: Vec<_> = tree.categories().collect();
    let scored: Vec<CategoryScore> = categories
        .par_iter()
        .map(|category| score_category(&features, current, category, config.top_items))
        .filter(|score| !score.ranked_items.is_empty())
        .collect();

    let mut positive = BTreeMap::new();
    let mut negative = BTreeMap::new();
    for score in scored {
        let name = score.category.clone();
        match score.major_type {
            MajorType::Positive => {
                let reasoning = positive_reasoning(&score);
                positive.insert(
                    name,
                    CategoryOutcome {
                        score,
                        risk_level: None,
                        reasoning,
                    },
                );
            }
            MajorType::Negative => {
                let risk = RiskLevel::classify(score.ranked_items.len(), score.confidence_level);
                let reasoning = negative_reasoning(&score, risk);
                negative.insert(
                    name,
                    CategoryOutcome {
                        score,
                        risk_level: Some(risk),
                        reasoning,
                    },
                );
            }
        }
    }
    debug!(
        positive = positive.len(),
        negative = negative.len(),
        "categories assembled"
    );

    let summary = narrative(&features, positive.len(), negative.len(), &positive);
    AptitudeResult {
        positive,
        negative,
        overall_confidence: overall_confidence(&features),
        summary,
        coverage: Coverage::Full,
    }
}

/// Load the catalog from `source` and analyze.
///
/// A failing or empty catalog never escapes: the result carries empty maps and
/// a summary that says coverage was reduced.
pub fn analyze_with_source(
    chart: &FourPillars,
    source: &dyn CatalogSource,
    current: &CurrentPillars,
    config: &AnalysisConfig,
) -> AptitudeResult {
    let tree = match source.list_categories() {
        Ok(entries) => CategoryTree::from_entries(&entries),
        Err(err) => {
            warn!(error = %err, "catalog unavailable; continuing with reduced coverage");
            return reduced_coverage(chart);
        }
    };
    if tree.is_empty() {
        warn!("catalog returned no usable categories; continuing with reduced coverage");
        return reduced_coverage(chart);
    }
    analyze(chart, &tree, current, config)
}

fn reduced_coverage(chart: &FourPillars) -> AptitudeResult {
    let features = ChartFeatures::from_chart(chart);
    AptitudeResult {
        positive: BTreeMap::new(),
        negative: BTreeMap::new(),
        overall_confidence: overall_confidence(&features),
        summary: format!(
            "{} 카테고리 정보를 불러오지 못해 분야별 분석은 제공되지 않습니다.",
            chart_sentence(&features)
        ),
        coverage: Coverage::Reduced,
    }
}

/// 0.7 + 0.2·balance + 0.1 when the day master sits in the balanced band.
pub fn overall_confidence(features: &ChartFeatures) -> f64 {
    let mut confidence = CONFIDENCE_BASE + BALANCE_BONUS * features.distribution.balance();
    if features.strength.is_well_balanced() {
        confidence += STABILITY_BONUS;
    }
    confidence.clamp(CONFIDENCE_RANGE.0, CONFIDENCE_RANGE.1)
}

fn chart_sentence(features: &ChartFeatures) -> String {
    let dm = features.chart.day_master();
    format!(
        "{}{}({}) 일간, {} 출생의 {} 사주입니다.",
        dm.korean(),
        dm.element().korean(),
        dm.element().display_name(),
        features.season().korean(),
        features.strength.tier().korean()
    )
}

fn narrative(
    features: &ChartFeatures,
    positive_count: usize,
    negative_count: usize,
    positive: &BTreeMap<String, CategoryOutcome>,
) -> String {
    let mut out = format!(
        "{} 재능 분야 {}개와 주의 분야 {}개를 분석했습니다.",
        chart_sentence(features),
        positive_count,
        negative_count
    );
    if let Some(best) = strongest(positive) {
        out.push_str(&format!(
            " 가장 두드러진 재능은 {}({:.0}점)입니다.",
            best.score.category, best.score.base_score
        ));
    }
    out
}

fn strongest(outcomes: &BTreeMap<String, CategoryOutcome>) -> Option<&CategoryOutcome> {
    let mut best: Option<&CategoryOutcome> = None;
    for outcome in outcomes.values() {
        if best.is_none_or(|b| outcome.score.base_score > b.score.base_score) {
            best = Some(outcome);
        }
    }
    best
}

fn gods_phrase(gods: &[TenGod]) -> String {
    gods.iter().map(|g| g.korean()).collect::<Vec<_>>().join("·")
}

fn positive_reasoning(score: &CategoryScore) -> String {
    let b = &score.breakdown;
    let mut out = format!(
        "오행 친화 {:.0}점, 십신 조화 {:.0}점, 일간 강약 {:.0}점, 계절 {:.0}점으로 종합 {:.0}점입니다.",
        b.element_affinity, b.ten_gods_harmony, b.pillar_strength, b.seasonal_bonus, score.base_score
    );
    if !score.matched_gods.is_empty() {
        out.push_str(&format!(" {} 기운이 이 분야를 뒷받침합니다.", gods_phrase(&score.matched_gods)));
    }
    out
}

fn negative_reasoning(score: &CategoryScore, risk: RiskLevel) -> String {
    let mut out = format!(
        "위험도 {:.0}점, 위험 수준 {}입니다.",
        score.base_score,
        risk.korean()
    );
    if score.matched_gods.is_empty() {
        out.push_str(" 이 분야를 보호하는 십신이 약해 주의가 필요합니다.");
    } else {
        out.push_str(&format!(
            " {} 기운이 위험을 완화합니다.",
            gods_phrase(&score.matched_gods)
        ));
    }
    out
}

/// Activity, caution and timing hints derived from a result and the current trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalRecommendations {
    pub favorable_activities: Vec<String>,
    pub caution_areas: Vec<String>,
    pub optimal_timing: String,
}

const RECOMMENDATION_LIMIT: usize = 3;

pub fn temporal_recommendations(
    result: &AptitudeResult,
    temporal: &TemporalAnalysis,
) -> TemporalRecommendations {
    let mut favorable: Vec<&CategoryOutcome> = result.positive.values().collect();
    favorable.sort_by(|a, b| {
        b.score
            .yearly_score
            .partial_cmp(&a.score.yearly_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let favorable_activities = favorable
        .into_iter()
        .take(RECOMMENDATION_LIMIT)
        .map(|o| match o.score.ranked_items.first() {
            Some(item) => format!("{} ({})", o.score.category, item.name),
            None => o.score.category.clone(),
        })
        .collect();

    let mut risks: Vec<&CategoryOutcome> = result.negative.values().collect();
    risks.sort_by(|a, b| {
        b.score
            .yearly_score
            .partial_cmp(&a.score.yearly_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let declining = temporal.fortune_trend.overall_trend == Trend::Declining;
    let mut caution_areas: Vec<String> = risks
        .iter()
        .filter(|o| o.risk_level.is_some_and(|r| r != RiskLevel::Low))
        .take(RECOMMENDATION_LIMIT)
        .map(|o| o.score.category.clone())
        .collect();
    if caution_areas.is_empty() && declining {
        caution_areas.extend(risks.first().map(|o| o.score.category.clone()));
    }

    let best = temporal.best_period();
    let optimal_timing = format!(
        "{}의 흐름이 가장 좋습니다 ({} {}). 전체 운세는 {} 추세입니다.",
        best.period.korean(),
        best.current_stem.korean(),
        best.tag,
        temporal.fortune_trend.overall_trend.korean()
    );

    TemporalRecommendations {
        favorable_activities,
        caution_areas,
        optimal_timing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_temporal;
    use crate::calendar::PillarCalculator;
    use crate::data::StaticCatalog;
    use crate::domain::CatalogEntry;
    use crate::error::EngineError;
    use chrono::NaiveDate;

    fn entry(major: MajorType, middle: &str, minor: &str) -> CatalogEntry {
        CatalogEntry {
            major_type: major,
            middle_name: middle.to_string(),
            icon: None,
            minor_name: minor.to_string(),
            base_weight: 1.0,
            confidence_factor: 0.9,
        }
    }

    fn entries() -> Vec<CatalogEntry> {
        vec![
            entry(MajorType::Positive, "연예", "배우"),
            entry(MajorType::Positive, "연예", "가수"),
            entry(MajorType::Positive, "학업", "연구원"),
            entry(MajorType::Negative, "건강", "위장 질환"),
            entry(MajorType::Negative, "건강", "호흡기 질환"),
            entry(MajorType::Negative, "건강", "피부 질환"),
            entry(MajorType::Negative, "사고", "교통사고"),
        ]
    }

    fn fixture() -> (FourPillars, CurrentPillars, AnalysisConfig) {
        let config = AnalysisConfig {
            as_of: NaiveDate::from_ymd_opt(2024, 6, 15),
            ..AnalysisConfig::default()
        };
        let calc = PillarCalculator::new(&config);
        let chart = calc
            .compute_solar(NaiveDate::from_ymd_opt(1990, 5, 15).unwrap(), 10)
            .unwrap();
        let current = calc.current(config.as_of_or_today());
        (chart, current, config)
    }

    /// Charts spread over several decades and every hour bucket.
    fn sweep_charts() -> Vec<FourPillars> {
        let calc = PillarCalculator::new(&AnalysisConfig::default());
        let start = NaiveDate::from_ymd_opt(1955, 3, 7).unwrap();
        (0..150)
            .map(|i| {
                calc.compute_solar(start + chrono::Duration::days(i * 151), (i % 24) as u32)
                    .unwrap()
            })
            .collect()
    }

    struct FailingCatalog;

    impl CatalogSource for FailingCatalog {
        fn list_categories(&self) -> Result<Vec<CatalogEntry>, EngineError> {
            Err(EngineError::catalog("connection refused"))
        }
    }

    #[test]
    fn assembles_sorted_maps_with_risk_levels() {
        let (chart, current, config) = fixture();
        let tree = CategoryTree::from_entries(&entries());
        let result = analyze(&chart, &tree, &current, &config);

        assert_eq!(result.coverage, Coverage::Full);
        assert_eq!(
            result.positive.keys().cloned().collect::<Vec<_>>(),
            vec!["연예".to_string(), "학업".to_string()]
        );
        assert_eq!(result.negative.len(), 2);
        for outcome in result.positive.values() {
            assert!(outcome.risk_level.is_none());
        }
        for outcome in result.negative.values() {
            let expected = RiskLevel::classify(
                outcome.score.ranked_items.len(),
                outcome.score.confidence_level,
            );
            assert_eq!(outcome.risk_level, Some(expected));
        }
        // One item can never exceed an exposure of 1.0.
        assert_eq!(result.negative["사고"].risk_level, Some(RiskLevel::Low));
        assert!((0.5..=0.95).contains(&result.overall_confidence));
        assert!(result.summary.contains("재능 분야 2개"));
    }

    #[test]
    fn analysis_is_deterministic() {
        let (chart, current, config) = fixture();
        let tree = CategoryTree::from_entries(&entries());
        let a = analyze(&chart, &tree, &current, &config);
        let b = analyze(&chart, &tree, &current, &config);
        assert_eq!(a, b);
    }

    #[test]
    fn categories_without_ranked_items_are_left_out() {
        let (chart, current, mut config) = fixture();
        config.top_items = 0;
        let tree = CategoryTree::from_entries(&entries());
        let result = analyze(&chart, &tree, &current, &config);
        assert!(result.positive.is_empty());
        assert!(result.negative.is_empty());
        assert_eq!(result.coverage, Coverage::Full);
    }

    #[test]
    fn catalog_failure_degrades_instead_of_failing() {
        let (chart, current, config) = fixture();
        let result = analyze_with_source(&chart, &FailingCatalog, &current, &config);
        assert_eq!(result.coverage, Coverage::Reduced);
        assert!(result.positive.is_empty() && result.negative.is_empty());
        assert!(result.summary.contains("불러오지 못해"));

        let empty = analyze_with_source(&chart, &StaticCatalog::new(Vec::new()), &current, &config);
        assert_eq!(empty.coverage, Coverage::Reduced);

        let full = analyze_with_source(&chart, &StaticCatalog::new(entries()), &current, &config);
        assert_eq!(full.coverage, Coverage::Full);
        assert_eq!(full.category_count(), 4);
    }

    #[test]
    fn risk_level_never_drops_as_risk_score_rises() {
        let (_, current, config) = fixture();
        let tree = CategoryTree::from_entries(&[
            CatalogEntry {
                confidence_factor: 0.95,
                ..entry(MajorType::Negative, "건강", "위장 질환")
            },
            CatalogEntry {
                confidence_factor: 0.95,
                ..entry(MajorType::Negative, "건강", "호흡기 질환")
            },
            CatalogEntry {
                confidence_factor: 0.95,
                ..entry(MajorType::Negative, "건강", "피부 질환")
            },
        ]);

        let mut scored: Vec<(f64, RiskLevel)> = sweep_charts()
            .iter()
            .map(|chart| {
                let result = analyze(chart, &tree, &current, &config);
                let outcome = &result.negative["건강"];
                assert_eq!(outcome.score.ranked_items.len(), 3);
                (outcome.score.base_score, outcome.risk_level.unwrap())
            })
            .collect();
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));

        for pair in scored.windows(2) {
            assert!(
                pair[0].1 <= pair[1].1,
                "risk {} labelled {:?} but risk {} labelled {:?}",
                pair[0].0,
                pair[0].1,
                pair[1].0,
                pair[1].1
            );
        }
    }

    #[test]
    fn overall_confidence_stays_in_bounds() {
        let (_, current, config) = fixture();
        let tree = CategoryTree::from_entries(&entries());
        for chart in sweep_charts() {
            let result = analyze(&chart, &tree, &current, &config);
            assert!(
                (0.5..=0.95).contains(&result.overall_confidence),
                "{}: {}",
                chart.day.label(),
                result.overall_confidence
            );
            let reduced = analyze_with_source(&chart, &FailingCatalog, &current, &config);
            assert!((0.5..=0.95).contains(&reduced.overall_confidence));
        }
    }

    #[test]
    fn risk_thresholds() {
        assert_eq!(RiskLevel::classify(5, 0.6), RiskLevel::High);
        assert_eq!(RiskLevel::classify(5, 0.5), RiskLevel::Medium);
        assert_eq!(RiskLevel::classify(3, 0.5), RiskLevel::Low);
        assert_eq!(RiskLevel::classify(0, 1.0), RiskLevel::Low);
    }

    #[test]
    fn recommendations_follow_result() {
        let (chart, current, config) = fixture();
        let tree = CategoryTree::from_entries(&entries());
        let result = analyze(&chart, &tree, &current, &config);
        let temporal = analyze_temporal(&chart, &current);
        let recs = temporal_recommendations(&result, &temporal);

        assert_eq!(recs.favorable_activities.len(), 2);
        assert!(recs.optimal_timing.contains(temporal.best_period().period.korean()));
        for area in &recs.caution_areas {
            assert!(result.negative.contains_key(area));
        }
    }
}
