//! Formatted terminal output.
//!
//! Formatting lives here so the engine stays free of presentation concerns and
//! output changes stay localized.

use crate::analysis::{StrengthProfile, TemporalAnalysis, TenGodProfile};
use crate::aptitude::{AptitudeResult, CategoryOutcome, TemporalRecommendations};
use crate::domain::{Element, FourPillars};
use crate::scoring::ChartFeatures;

const PILLAR_LABELS: [&str; 4] = ["year", "month", "day", "hour"];

/// Pillar table with ten gods, plus element counts and day-master strength.
pub fn format_chart(chart: &FourPillars, features: &ChartFeatures) -> String {
    let mut out = String::new();
    out.push_str("=== saju - Four Pillars ===\n");
    out.push_str(&format_pillar_table(chart, &features.ten_gods));
    out.push('\n');

    out.push_str("Elements:\n");
    for element in Element::ALL {
        out.push_str(&format!(
            "  {} {:<6} {:>4.1}\n",
            element.korean(),
            element.display_name(),
            features.distribution.get(element)
        ));
    }
    let missing = features.distribution.missing();
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|e| e.korean()).collect();
        out.push_str(&format!("  missing: {}\n", names.join(", ")));
    }
    out.push('\n');
    out.push_str(&format_strength(&features.strength));
    out
}

fn format_pillar_table(chart: &FourPillars, gods: &TenGodProfile) -> String {
    let pillars = chart.as_array();
    let mut out = String::new();
    out.push_str(&format!("{:<8} {:<6} {:<6} {:<6}\n", "pillar", "ganji", "stem", "branch"));
    out.push_str(&format!("{:-<8} {:-<6} {:-<6} {:-<6}\n", "", "", "", ""));
    for (i, pillar) in pillars.iter().enumerate() {
        out.push_str(
            format!(
                "{:<8} {:<6} {:<6} {:<6}\n",
                PILLAR_LABELS[i],
                pillar.label(),
                gods.stems[i].korean(),
                gods.branches[i].korean()
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

fn format_strength(strength: &StrengthProfile) -> String {
    format!(
        "Day master strength: {:.2} ({}) | season={} x{:.1} | support={:.1} | month={:.1}\n",
        strength.day_master_strength,
        strength.tier().korean(),
        strength.season.korean(),
        strength.seasonal_influence,
        strength.supporting_elements,
        strength.monthly_influence
    )
}

/// Category tables and the narrative summary.
pub fn format_result(result: &AptitudeResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Confidence: {:.0}%\n{}\n\n",
        result.overall_confidence * 100.0,
        result.summary
    ));

    out.push_str("Talents (positive):\n");
    out.push_str(&format_table(result.positive.values()));
    out.push('\n');
    out.push_str("Risks (negative):\n");
    out.push_str(&format_table(result.negative.values()));
    out
}

fn format_table<'a>(outcomes: impl Iterator<Item = &'a CategoryOutcome>) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<12} {:>6} {:>6} {:>6} {:>6} {:>5} {:<6} {}\n",
            "category", "base", "day", "month", "year", "conf", "risk", "top items"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<12} {:-<6} {:-<6} {:-<6} {:-<6} {:-<5} {:-<6} {:-<9}\n",
            "", "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for outcome in outcomes {
        let s = &outcome.score;
        let items: Vec<String> = s.ranked_items.iter().take(3).map(|i| i.name.clone()).collect();
        out.push_str(
            format!(
                "{:<12} {:>6.1} {:>6.1} {:>6.1} {:>6.1} {:>5.2} {:<6} {}\n",
                truncate(&s.category, 12),
                s.base_score,
                s.daily_score,
                s.monthly_score,
                s.yearly_score,
                s.confidence_level,
                outcome.risk_level.map(|r| r.as_str()).unwrap_or("-"),
                items.join(", ")
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

/// Current-period interactions, fortune trend and recommendations.
pub fn format_temporal(temporal: &TemporalAnalysis, recs: &TemporalRecommendations) -> String {
    let mut out = String::new();
    let current = &temporal.current_pillars;
    out.push_str(&format!(
        "=== As of {} ({} / {} / {}) ===\n",
        current.as_of,
        current.year.label(),
        current.month.label(),
        current.day.label()
    ));
    for interaction in [
        &temporal.interactions.year,
        &temporal.interactions.month,
        &temporal.interactions.day,
    ] {
        out.push_str(&format!("{:>+6.0}  {}\n", interaction.score, interaction.summary));
    }
    let trend = &temporal.fortune_trend;
    out.push_str(&format!(
        "Trend: {:+.1} ({})\n\n",
        trend.overall_score,
        trend.overall_trend.korean()
    ));

    out.push_str("Favorable:\n");
    for activity in &recs.favorable_activities {
        out.push_str(&format!("  + {activity}\n"));
    }
    out.push_str("Caution:\n");
    if recs.caution_areas.is_empty() {
        out.push_str("  (none)\n");
    }
    for area in &recs.caution_areas {
        out.push_str(&format!("  ! {area}\n"));
    }
    out.push_str(&format!("Timing: {}\n", recs.optimal_timing));
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Branch, Pillar, Stem};

    fn chart() -> FourPillars {
        FourPillars {
            year: Pillar::new(Stem::Gyeong, Branch::O),
            month: Pillar::new(Stem::Im, Branch::O),
            day: Pillar::new(Stem::Byeong, Branch::In),
            hour: Pillar::new(Stem::Gi, Branch::Sa),
            birth_month: 5,
        }
    }

    #[test]
    fn pillar_table_snapshot() {
        let chart = chart();
        let gods = TenGodProfile::from_chart(&chart);
        let expected = concat!(
            "pillar   ganji  stem   branch\n",
            "-------- ------ ------ ------\n",
            "year     경오     편재     비견\n",
            "month    임오     편관     비견\n",
            "day      병인     일간     편인\n",
            "hour     기사     상관     겁재\n",
        );
        assert_eq!(format_pillar_table(&chart, &gods), expected);
    }

    #[test]
    fn chart_summary_mentions_strength_and_elements() {
        let chart = chart();
        let features = ChartFeatures::from_chart(&chart);
        let text = format_chart(&chart, &features);
        assert!(text.contains("화 Fire    3.4"));
        assert!(text.contains("Day master strength"));
        assert!(!text.contains("missing"));
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("법적 분쟁", 12), "법적 분쟁");
        assert_eq!(truncate("abcdefghijklmnop", 6), "abcde.");
    }
}
