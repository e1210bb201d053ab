//! Category scoring.
//!
//! A category's base score is the sum of four capped components:
//!
//! | component         | cap | driven by                                         |
//! |-------------------|-----|---------------------------------------------------|
//! | element affinity  | 40  | category element vs day master, element presence  |
//! | ten-gods harmony  | 30  | suitable ten gods present in the chart, diversity |
//! | pillar strength   | 20  | day-master strength tier, seasonal influence      |
//! | seasonal bonus    | 10  | birth season vs the category's favored seasons    |
//!
//! Daily, monthly and yearly variants add the current-period relation score
//! weighted 0.2 / 0.3 / 0.5. Negative (risk) categories are scored as safety
//! and every one of the four scores is inverted (`100 − v`) at the end.

use serde::{Deserialize, Serialize};

use crate::analysis::{
    ElementDistribution, Period, StrengthProfile, TenGodProfile, element_distribution,
    stem_relation_score, strength_profile,
};
use crate::domain::{
    Category, CurrentPillars, Element, ElementRelation, FourPillars, MajorType, Season, TenGod,
};
use crate::error::invariant_violation;
use crate::scoring::items::{RankedItem, rank_items};
use crate::scoring::rules::{CategoryProfile, profile_for};

pub const ELEMENT_AFFINITY_CAP: f64 = 40.0;
pub const TEN_GODS_HARMONY_CAP: f64 = 30.0;
pub const PILLAR_STRENGTH_CAP: f64 = 20.0;
pub const SEASONAL_BONUS_CAP: f64 = 10.0;

/// Ranked items kept per category unless configured otherwise.
pub const DEFAULT_TOP_ITEMS: usize = 5;

/// Substituted for any score that fails an invariant.
const NEUTRAL_SCORE: f64 = 50.0;
/// Affinity for categories without an associated element.
const NEUTRAL_AFFINITY: f64 = 10.0;
const DIVERSITY_BONUS: f64 = 5.0;

/// Everything the scoring engine needs from a chart, computed once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFeatures {
    pub chart: FourPillars,
    pub distribution: ElementDistribution,
    pub strength: StrengthProfile,
    pub ten_gods: TenGodProfile,
}

impl ChartFeatures {
    pub fn from_chart(chart: &FourPillars) -> Self {
        Self {
            chart: *chart,
            distribution: element_distribution(chart),
            strength: strength_profile(chart, chart.birth_month),
            ten_gods: TenGodProfile::from_chart(chart),
        }
    }

    pub fn day_master_element(&self) -> Element {
        self.chart.day_master().element()
    }

    pub fn season(&self) -> Season {
        self.strength.season
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub element_affinity: f64,
    pub ten_gods_harmony: f64,
    pub pillar_strength: f64,
    pub seasonal_bonus: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.element_affinity + self.ten_gods_harmony + self.pillar_strength + self.seasonal_bonus
    }
}

/// Base score and its three temporal variants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodScores {
    pub base: f64,
    pub daily: f64,
    pub monthly: f64,
    pub yearly: f64,
}

impl PeriodScores {
    fn inverted(self) -> Self {
        Self {
            base: 100.0 - self.base,
            daily: 100.0 - self.daily,
            monthly: 100.0 - self.monthly,
            yearly: 100.0 - self.yearly,
        }
    }
}

/// Score of one middle category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    pub major_type: MajorType,
    pub element: Option<Element>,
    pub base_score: f64,
    pub daily_score: f64,
    pub monthly_score: f64,
    pub yearly_score: f64,
    pub breakdown: ScoreBreakdown,
    /// Scores before the risk inversion (identical to the above for positive categories).
    pub pre_inversion: PeriodScores,
    pub confidence_level: f64,
    pub matched_gods: Vec<TenGod>,
    pub ranked_items: Vec<RankedItem>,
}

impl CategoryScore {
    pub fn item_names(&self) -> Vec<String> {
        self.ranked_items.iter().map(|i| i.name.clone()).collect()
    }
}

/// Score a category against a chart.
pub fn score(chart: &FourPillars, current: &CurrentPillars, category: &Category) -> CategoryScore {
    score_category(&ChartFeatures::from_chart(chart), current, category, DEFAULT_TOP_ITEMS)
}

/// Score a category with precomputed chart features.
pub fn score_category(
    features: &ChartFeatures,
    current: &CurrentPillars,
    category: &Category,
    top_items: usize,
) -> CategoryScore {
    let profile = profile_for(category.major_type, &category.name);
    let (ten_gods_harmony, matched_gods) = ten_gods_harmony(&profile, &features.ten_gods);

    let breakdown = ScoreBreakdown {
        element_affinity: checked(element_affinity(&profile, features), "element affinity"),
        ten_gods_harmony: checked(ten_gods_harmony, "ten-gods harmony"),
        pillar_strength: checked(pillar_strength(&features.strength), "pillar strength"),
        seasonal_bonus: seasonal_bonus(&profile, features.season()),
    };

    let base = breakdown.total().clamp(0.0, 100.0);
    let dm = features.chart.day_master();
    let variant = |period: Period| {
        let delta = stem_relation_score(dm, period.stem_of(current)) * period.weight();
        (base + delta).clamp(0.0, 100.0)
    };
    let pre_inversion = PeriodScores {
        base,
        daily: variant(Period::Day),
        monthly: variant(Period::Month),
        yearly: variant(Period::Year),
    };
    let scores = match category.major_type {
        MajorType::Positive => pre_inversion,
        MajorType::Negative => pre_inversion.inverted(),
    };

    // Uses the reported (post-inversion) base: risk direction for negatives.
    let confidence_level = checked(
        category.confidence_factor() * (0.6 + 0.4 * scores.base / 100.0),
        "confidence",
    )
    .clamp(0.0, 1.0);

    let present: Vec<TenGod> = features.ten_gods.present().into_iter().collect();
    let ranked_items = rank_items(
        &category.items,
        features.day_master_element(),
        &present,
        top_items,
    );

    CategoryScore {
        category: category.name.clone(),
        major_type: category.major_type,
        element: profile.element,
        base_score: scores.base,
        daily_score: scores.daily,
        monthly_score: scores.monthly,
        yearly_score: scores.yearly,
        breakdown,
        pre_inversion,
        confidence_level,
        matched_gods,
        ranked_items,
    }
}

fn element_affinity(profile: &CategoryProfile, features: &ChartFeatures) -> f64 {
    let Some(element) = profile.element else {
        return NEUTRAL_AFFINITY;
    };
    let relation_points = match ElementRelation::between(features.day_master_element(), element) {
        ElementRelation::Same => 15.0,
        ElementRelation::Generates => 12.0,
        ElementRelation::GeneratedBy => 10.0,
        ElementRelation::Restrains => 6.0,
        ElementRelation::RestrainedBy => 3.0,
    };
    let presence = (features.distribution.get(element) * 2.5).min(8.0);
    (relation_points + presence).clamp(0.0, ELEMENT_AFFINITY_CAP)
}

/// Harmony and the suitable gods that matched.
///
/// The diversity adjustment (+5 at ≥6 distinct labels, −5 at ≤3) never pulls
/// the result below the single best matched bonus.
fn ten_gods_harmony(profile: &CategoryProfile, gods: &TenGodProfile) -> (f64, Vec<TenGod>) {
    let present = gods.present();
    let mut matched = Vec::new();
    let mut sum = 0.0;
    let mut best: f64 = 0.0;
    for god in &present {
        if let Some(bonus) = profile.god_bonus(*god) {
            matched.push(*god);
            sum += bonus;
            best = best.max(bonus);
        }
    }

    let diversity = match present.len() {
        n if n >= 6 => DIVERSITY_BONUS,
        n if n <= 3 => -DIVERSITY_BONUS,
        _ => 0.0,
    };
    let harmony = (sum + diversity).max(best).clamp(0.0, TEN_GODS_HARMONY_CAP);
    (harmony, matched)
}

fn pillar_strength(strength: &StrengthProfile) -> f64 {
    let s = strength.day_master_strength;
    let tier_points = if s >= 8.0 {
        10.0
    } else if s >= 6.0 {
        8.0
    } else if s >= 4.5 {
        6.0
    } else if s >= 3.0 {
        4.0
    } else {
        2.0
    };
    let seasonal = (strength.seasonal_influence * 5.0).min(10.0);
    (tier_points + seasonal).min(PILLAR_STRENGTH_CAP)
}

fn seasonal_bonus(profile: &CategoryProfile, season: Season) -> f64 {
    if profile.seasons.is_empty() {
        5.0
    } else if profile.seasons.contains(&season) {
        SEASONAL_BONUS_CAP
    } else {
        2.0
    }
}

fn checked(value: f64, what: &str) -> f64 {
    if value.is_finite() {
        value
    } else {
        invariant_violation(&format!("non-finite {what}"));
        NEUTRAL_SCORE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::PillarCalculator;
    use crate::domain::{AnalysisConfig, Branch, CatalogItem, Pillar, Stem};
    use chrono::NaiveDate;

    fn category(major: MajorType, name: &str, items: &[&str]) -> Category {
        Category {
            major_type: major,
            name: name.to_string(),
            icon: None,
            items: items
                .iter()
                .map(|n| CatalogItem {
                    name: n.to_string(),
                    base_weight: 1.0,
                    confidence_factor: 0.9,
                })
                .collect(),
        }
    }

    fn now() -> CurrentPillars {
        PillarCalculator::new(&AnalysisConfig::default())
            .current(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
    }

    /// Fire day master with 기 (yin Earth) in the hour stem → 상관.
    fn fire_chart() -> FourPillars {
        FourPillars {
            year: Pillar::new(Stem::Gyeong, Branch::O),
            month: Pillar::new(Stem::Im, Branch::O),
            day: Pillar::new(Stem::Byeong, Branch::In),
            hour: Pillar::new(Stem::Gi, Branch::Sa),
            birth_month: 5,
        }
    }

    fn sample_charts() -> Vec<FourPillars> {
        let calc = PillarCalculator::new(&AnalysisConfig::default());
        let start = NaiveDate::from_ymd_opt(1960, 1, 1).unwrap();
        (0..120)
            .map(|i| {
                calc.compute_solar(start + chrono::Duration::days(i * 197), (i % 24) as u32)
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn entertainment_harmony_covers_matched_god_bonus() {
        let chart = fire_chart();
        let features = ChartFeatures::from_chart(&chart);
        assert!(features.ten_gods.contains(TenGod::SangGwan));

        let cat = category(MajorType::Positive, "연예", &["배우", "가수"]);
        let s = score_category(&features, &now(), &cat, 5);
        assert!(s.matched_gods.contains(&TenGod::SangGwan));
        assert!(s.breakdown.ten_gods_harmony >= 22.0, "{:?}", s.breakdown);
        assert_eq!(s.element, Some(Element::Fire));
        // Same element as the day master: 15 + presence bonus.
        assert!(s.breakdown.element_affinity >= 15.0);
    }

    #[test]
    fn breakdown_caps_and_sum_hold_for_many_charts() {
        let current = now();
        let cats = [
            category(MajorType::Positive, "연예", &["배우"]),
            category(MajorType::Positive, "학업", &["연구원"]),
            category(MajorType::Positive, "알 수 없는 분야", &["무언가"]),
            category(MajorType::Negative, "건강", &["위장 질환"]),
        ];
        for chart in sample_charts() {
            let features = ChartFeatures::from_chart(&chart);
            for cat in &cats {
                let s = score_category(&features, &current, cat, 5);
                let b = s.breakdown;
                assert!((0.0..=ELEMENT_AFFINITY_CAP).contains(&b.element_affinity));
                assert!((0.0..=TEN_GODS_HARMONY_CAP).contains(&b.ten_gods_harmony));
                assert!((0.0..=PILLAR_STRENGTH_CAP).contains(&b.pillar_strength));
                assert!((0.0..=SEASONAL_BONUS_CAP).contains(&b.seasonal_bonus));
                assert!((s.pre_inversion.base - b.total().clamp(0.0, 100.0)).abs() < 1e-9);
                for v in [s.base_score, s.daily_score, s.monthly_score, s.yearly_score] {
                    assert!((0.0..=100.0).contains(&v));
                }
                assert!((0.0..=1.0).contains(&s.confidence_level));
            }
        }
    }

    #[test]
    fn negative_categories_invert_all_four_scores() {
        let current = now();
        for chart in sample_charts().into_iter().take(20) {
            let s = score(&chart, &current, &category(MajorType::Negative, "건강", &["위장 질환"]));
            let p = s.pre_inversion;
            assert!((s.base_score - (100.0 - p.base)).abs() < 1e-9);
            assert!((s.daily_score - (100.0 - p.daily)).abs() < 1e-9);
            assert!((s.monthly_score - (100.0 - p.monthly)).abs() < 1e-9);
            assert!((s.yearly_score - (100.0 - p.yearly)).abs() < 1e-9);

            let pos = score(&chart, &current, &category(MajorType::Positive, "건강", &["위장 질환"]));
            assert_eq!(pos.base_score, pos.pre_inversion.base);
            assert_eq!(pos.pre_inversion, s.pre_inversion);
        }
    }

    #[test]
    fn temporal_variants_follow_period_weights() {
        let chart = fire_chart();
        let current = now();
        let s = score(&chart, &current, &category(MajorType::Positive, "연예", &["배우"]));
        let dm = chart.day_master();
        let expect = |stem: Stem, w: f64| {
            (s.base_score + stem_relation_score(dm, stem) * w).clamp(0.0, 100.0)
        };
        assert!((s.daily_score - expect(current.day.stem, 0.2)).abs() < 1e-9);
        assert!((s.monthly_score - expect(current.month.stem, 0.3)).abs() < 1e-9);
        assert!((s.yearly_score - expect(current.year.stem, 0.5)).abs() < 1e-9);
    }

    #[test]
    fn neutral_profile_and_seasons() {
        let chart = fire_chart();
        let s = score(&chart, &now(), &category(MajorType::Positive, "정체불명", &["x"]));
        assert_eq!(s.element, None);
        assert_eq!(s.breakdown.element_affinity, NEUTRAL_AFFINITY);
        assert_eq!(s.breakdown.seasonal_bonus, 5.0);
        assert!(s.matched_gods.is_empty());

        // Born in May (spring): 예술 favors spring, 연예 favors summer.
        let art = score(&chart, &now(), &category(MajorType::Positive, "예술", &["화가"]));
        assert_eq!(art.breakdown.seasonal_bonus, 10.0);
        let ent = score(&chart, &now(), &category(MajorType::Positive, "연예", &["배우"]));
        assert_eq!(ent.breakdown.seasonal_bonus, 2.0);
    }

    #[test]
    fn pillar_strength_tiers() {
        let mut s = StrengthProfile {
            season: Season::Spring,
            seasonal_influence: 2.0,
            supporting_elements: 6.0,
            monthly_influence: 1.5,
            day_master_strength: 9.5,
        };
        assert_eq!(pillar_strength(&s), 20.0);
        s.day_master_strength = 2.5;
        s.seasonal_influence = 0.5;
        assert_eq!(pillar_strength(&s), 4.5);
    }
}
