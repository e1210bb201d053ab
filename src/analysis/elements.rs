//! Element distribution and day-master strength.
//!
//! Each pillar contributes 1.0 to its stem's element and 0.8 to its branch's
//! element, so every chart carries the same total mass (7.2); only the spread
//! across the five elements differs.

use serde::{Deserialize, Serialize};

use crate::domain::{Element, FourPillars, Season};

pub const STEM_WEIGHT: f64 = 1.0;
pub const BRANCH_WEIGHT: f64 = 0.8;

/// Total mass of any chart's distribution.
pub const TOTAL_MASS: f64 = 4.0 * (STEM_WEIGHT + BRANCH_WEIGHT);

/// Monthly influence when the month branch feeds the day master, and otherwise.
const MONTH_SUPPORT: f64 = 1.5;
const MONTH_NEUTRAL: f64 = 0.5;

/// Seasonal multiplier, rows by element (목 화 토 금 수), columns by season
/// (봄 여름 가을 겨울). Peak 2.0, rising 1.5, resting 1.0, confined 0.8, dormant 0.5.
const SEASONAL_STRENGTH: [[f64; 4]; 5] = [
    [2.0, 1.0, 0.5, 1.5],
    [1.5, 2.0, 0.8, 0.5],
    [0.5, 1.5, 1.0, 0.8],
    [0.8, 0.5, 2.0, 1.0],
    [1.0, 0.8, 1.5, 2.0],
];

/// Strength band treated as well balanced.
pub const BALANCED_BAND: (f64, f64) = (4.0, 7.0);

/// Element → weight, indexed by `Element::index()`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementDistribution {
    pub weights: [f64; 5],
}

impl ElementDistribution {
    pub fn get(&self, element: Element) -> f64 {
        self.weights[element.index()]
    }

    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Element with the largest weight (earliest in cycle order on ties).
    pub fn dominant(&self) -> Element {
        let mut best = Element::Wood;
        for e in Element::ALL {
            if self.get(e) > self.get(best) {
                best = e;
            }
        }
        best
    }

    /// Elements with no weight at all.
    pub fn missing(&self) -> Vec<Element> {
        Element::ALL.into_iter().filter(|e| self.get(*e) == 0.0).collect()
    }

    /// Evenness of the spread in `[0, 1]`: 1 when every element carries the
    /// same weight, 0 when all mass sits on one element.
    pub fn balance(&self) -> f64 {
        let total = self.total();
        if total <= 0.0 {
            return 0.0;
        }
        let n = self.weights.len() as f64;
        let mean = total / n;
        let deviation: f64 = self.weights.iter().map(|w| (w - mean).abs()).sum();
        let max_deviation = 2.0 * total * (1.0 - 1.0 / n);
        (1.0 - deviation / max_deviation).clamp(0.0, 1.0)
    }
}

/// Sum stem and branch contributions of the four pillars.
pub fn element_distribution(chart: &FourPillars) -> ElementDistribution {
    let mut dist = ElementDistribution::default();
    for pillar in chart.as_array() {
        dist.weights[pillar.stem.element().index()] += STEM_WEIGHT;
        dist.weights[pillar.branch.element().index()] += BRANCH_WEIGHT;
    }
    dist
}

/// Seasonal multiplier for an element.
pub fn seasonal_strength(element: Element, season: Season) -> f64 {
    SEASONAL_STRENGTH[element.index()][season.index()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthTier {
    Weak,
    Balanced,
    Strong,
}

impl StrengthTier {
    pub fn korean(self) -> &'static str {
        match self {
            StrengthTier::Weak => "신약",
            StrengthTier::Balanced => "중화",
            StrengthTier::Strong => "신강",
        }
    }
}

/// Day-master strength estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrengthProfile {
    pub season: Season,
    /// Seasonal multiplier of the day-master element.
    pub seasonal_influence: f64,
    /// Distribution weight already carried by the day-master element.
    pub supporting_elements: f64,
    /// 1.5 when the month branch feeds the day master, else 0.5.
    pub monthly_influence: f64,
    pub day_master_strength: f64,
}

impl StrengthProfile {
    pub fn tier(&self) -> StrengthTier {
        if self.day_master_strength >= BALANCED_BAND.1 {
            StrengthTier::Strong
        } else if self.day_master_strength >= BALANCED_BAND.0 {
            StrengthTier::Balanced
        } else {
            StrengthTier::Weak
        }
    }

    pub fn is_well_balanced(&self) -> bool {
        (BALANCED_BAND.0..=BALANCED_BAND.1).contains(&self.day_master_strength)
    }
}

/// Estimate day-master strength for a chart born in `month` (1..=12).
pub fn strength_profile(chart: &FourPillars, month: u32) -> StrengthProfile {
    let dm = chart.day_master().element();
    let season = Season::from_month(month);
    let seasonal_influence = seasonal_strength(dm, season);
    let supporting_elements = element_distribution(chart).get(dm);
    let monthly_influence = if chart.month.branch.element().generates() == dm {
        MONTH_SUPPORT
    } else {
        MONTH_NEUTRAL
    };

    StrengthProfile {
        season,
        seasonal_influence,
        supporting_elements,
        monthly_influence,
        day_master_strength: seasonal_influence + supporting_elements + monthly_influence,
    }
}
