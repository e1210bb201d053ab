//! Temporal comparison: the personal day master against the pillars of "now".
//!
//! Each current-period stem is classified with the same five relations the
//! ten-god resolver uses, mapped to a fixed fortune score, and folded into a
//! weighted trend (year 0.5, month 0.3, day 0.2).

use serde::{Deserialize, Serialize};

use crate::domain::{CurrentPillars, ElementRelation, FourPillars, Stem};

/// Trend above this is rising, below its negation declining.
const TREND_THRESHOLD: f64 = 20.0;

/// Reference period of a current pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Year,
    Month,
    Day,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Year, Period::Month, Period::Day];

    /// Contribution to the overall trend and to the temporal score variants.
    pub fn weight(self) -> f64 {
        match self {
            Period::Year => 0.5,
            Period::Month => 0.3,
            Period::Day => 0.2,
        }
    }

    pub fn korean(self) -> &'static str {
        match self {
            Period::Year => "세운",
            Period::Month => "월운",
            Period::Day => "일운",
        }
    }

    pub fn stem_of(self, current: &CurrentPillars) -> Stem {
        match self {
            Period::Year => current.year.stem,
            Period::Month => current.month.stem,
            Period::Day => current.day.stem,
        }
    }
}

/// Fortune score of a relation, in `[-50, 70]`.
pub fn relation_score(relation: ElementRelation) -> f64 {
    match relation {
        ElementRelation::GeneratedBy => 70.0,
        ElementRelation::Same => 30.0,
        ElementRelation::Generates => 10.0,
        ElementRelation::Restrains => 0.0,
        ElementRelation::RestrainedBy => -50.0,
    }
}

/// Fortune score of a current stem against the day master.
pub fn stem_relation_score(day_master: Stem, current: Stem) -> f64 {
    relation_score(ElementRelation::between(day_master.element(), current.element()))
}

/// Short machine tag of a relation.
pub fn relation_tag(relation: ElementRelation) -> &'static str {
    match relation {
        ElementRelation::GeneratedBy => "generative",
        ElementRelation::Same => "harmonious",
        ElementRelation::Generates => "expressive",
        ElementRelation::Restrains => "controlling",
        ElementRelation::RestrainedBy => "restraining",
    }
}

fn relation_text(relation: ElementRelation) -> &'static str {
    match relation {
        ElementRelation::GeneratedBy => "생조: 성장과 도움이 따르는 시기",
        ElementRelation::Same => "비화: 힘이 모이고 자신감이 커지는 시기",
        ElementRelation::Generates => "설기: 표현과 활동이 늘지만 소모도 큰 시기",
        ElementRelation::Restrains => "재성: 노력한 만큼 성과를 거두는 시기",
        ElementRelation::RestrainedBy => "극입: 절제와 신중함이 요구되는 시기",
    }
}

/// Day master vs one current-period stem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub period: Period,
    pub current_stem: Stem,
    pub relation: ElementRelation,
    pub tag: String,
    pub score: f64,
    pub summary: String,
}

/// Classify a current-period stem against the personal day master.
pub fn interaction_summary(day_master: Stem, current_stem: Stem, period: Period) -> Interaction {
    let relation = ElementRelation::between(day_master.element(), current_stem.element());
    Interaction {
        period,
        current_stem,
        relation,
        tag: relation_tag(relation).to_string(),
        score: relation_score(relation),
        summary: format!(
            "{} {}({}): {}",
            period.korean(),
            current_stem.korean(),
            current_stem.element().korean(),
            relation_text(relation)
        ),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Stable,
    Declining,
}

impl Trend {
    pub fn from_score(overall: f64) -> Trend {
        if overall > TREND_THRESHOLD {
            Trend::Rising
        } else if overall < -TREND_THRESHOLD {
            Trend::Declining
        } else {
            Trend::Stable
        }
    }

    pub fn korean(self) -> &'static str {
        match self {
            Trend::Rising => "상승",
            Trend::Stable => "안정",
            Trend::Declining => "하강",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FortuneTrend {
    pub year_score: f64,
    pub month_score: f64,
    pub day_score: f64,
    pub overall_score: f64,
    pub overall_trend: Trend,
}

/// Weighted fortune trend of a day master against current pillars.
pub fn fortune_trend(day_master: Stem, current: &CurrentPillars) -> FortuneTrend {
    let year_score = stem_relation_score(day_master, current.year.stem);
    let month_score = stem_relation_score(day_master, current.month.stem);
    let day_score = stem_relation_score(day_master, current.day.stem);
    let overall_score = year_score * Period::Year.weight()
        + month_score * Period::Month.weight()
        + day_score * Period::Day.weight();

    FortuneTrend {
        year_score,
        month_score,
        day_score,
        overall_score,
        overall_trend: Trend::from_score(overall_score),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodInteractions {
    pub year: Interaction,
    pub month: Interaction,
    pub day: Interaction,
}

/// Personal chart compared with the pillars of a reference date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalAnalysis {
    pub personal_chart: FourPillars,
    pub current_pillars: CurrentPillars,
    pub interactions: PeriodInteractions,
    pub fortune_trend: FortuneTrend,
}

impl TemporalAnalysis {
    /// The period whose stem is most favorable (year wins ties, then month).
    pub fn best_period(&self) -> &Interaction {
        let mut best = &self.interactions.year;
        for candidate in [&self.interactions.month, &self.interactions.day] {
            if candidate.score > best.score {
                best = candidate;
            }
        }
        best
    }
}

pub fn analyze_temporal(chart: &FourPillars, current: &CurrentPillars) -> TemporalAnalysis {
    let dm = chart.day_master();
    TemporalAnalysis {
        personal_chart: *chart,
        current_pillars: *current,
        interactions: PeriodInteractions {
            year: interaction_summary(dm, current.year.stem, Period::Year),
            month: interaction_summary(dm, current.month.stem, Period::Month),
            day: interaction_summary(dm, current.day.stem, Period::Day),
        },
        fortune_trend: fortune_trend(dm, current),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Branch, Pillar};
    use chrono::NaiveDate;

    fn current(year: Stem, month: Stem, day: Stem) -> CurrentPillars {
        CurrentPillars {
            as_of: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            year: Pillar::new(year, Branch::Jin),
            month: Pillar::new(month, Branch::O),
            day: Pillar::new(day, Branch::Ja),
        }
    }

    #[test]
    fn scores_stay_in_range() {
        for dm in Stem::ALL {
            for cur in Stem::ALL {
                let s = stem_relation_score(dm, cur);
                assert!((-50.0..=70.0).contains(&s));
            }
        }
    }

    #[test]
    fn interaction_labels() {
        // 갑 (Wood) in an 임 (Water) year: water feeds wood.
        let i = interaction_summary(Stem::Gap, Stem::Im, Period::Year);
        assert_eq!(i.relation, ElementRelation::GeneratedBy);
        assert_eq!(i.tag, "generative");
        assert_eq!(i.score, 70.0);
        assert_eq!(i.summary, "세운 임(수): 생조: 성장과 도움이 따르는 시기");

        let i = interaction_summary(Stem::Gap, Stem::Gyeong, Period::Day);
        assert_eq!(i.tag, "restraining");
        assert_eq!(i.score, -50.0);
        assert_eq!(i.summary, "일운 경(금): 극입: 절제와 신중함이 요구되는 시기");

        for dm in Stem::ALL {
            for cur in Stem::ALL {
                let i = interaction_summary(dm, cur, Period::Month);
                assert!(!i.summary.contains('\u{2014}'), "{}", i.summary);
            }
        }
    }

    #[test]
    fn trend_thresholds() {
        // Fire day master: Wood year (+70), Fire month (+30), Water day (−50).
        let t = fortune_trend(Stem::Byeong, &current(Stem::Gap, Stem::Jeong, Stem::Im));
        assert!((t.overall_score - (35.0 + 9.0 - 10.0)).abs() < 1e-9);
        assert_eq!(t.overall_trend, Trend::Rising);

        // All destructive.
        let t = fortune_trend(Stem::Byeong, &current(Stem::Im, Stem::Gye, Stem::Im));
        assert!((t.overall_score + 50.0).abs() < 1e-9);
        assert_eq!(t.overall_trend, Trend::Declining);

        // All neutral (Fire restrains Metal).
        let t = fortune_trend(Stem::Byeong, &current(Stem::Gyeong, Stem::Sin, Stem::Gyeong));
        assert_eq!(t.overall_trend, Trend::Stable);
        assert_eq!(Trend::from_score(20.0), Trend::Stable);
        assert_eq!(Trend::from_score(-20.0), Trend::Stable);
    }

    #[test]
    fn best_period_prefers_highest_score() {
        let chart = FourPillars {
            year: Pillar::new(Stem::Gap, Branch::Ja),
            month: Pillar::new(Stem::Gap, Branch::Ja),
            day: Pillar::new(Stem::Byeong, Branch::O),
            hour: Pillar::new(Stem::Gap, Branch::Ja),
            birth_month: 1,
        };
        let analysis = analyze_temporal(&chart, &current(Stem::Im, Stem::Byeong, Stem::Gap));
        assert_eq!(analysis.best_period().period, Period::Day);
        assert_eq!(analysis.interactions.year.score, -50.0);
    }
}
