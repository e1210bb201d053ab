//! ASCII bar charts for terminal output.
//!
//! Fixed-width and deterministic, so the output can be pinned by golden tests.
//! Bars are `#` on a blank track between `|` rails, followed by the value.

use crate::analysis::ElementDistribution;
use crate::aptitude::AptitudeResult;
use crate::domain::Element;

/// Element weights scaled so the dominant element fills the track.
pub fn render_element_bars(dist: &ElementDistribution, width: usize) -> String {
    let rows: Vec<(String, f64)> = Element::ALL
        .iter()
        .map(|e| (format!("{} {}", e.korean(), e.display_name()), dist.get(*e)))
        .collect();
    let title = format!("Element distribution (total {:.1})", dist.total());
    render_bars(&title, &rows, dist.get(dist.dominant()), width)
}

/// Base scores of every category on a 0–100 scale, positives first.
pub fn render_score_bars(result: &AptitudeResult, width: usize) -> String {
    let rows: Vec<(String, f64)> = result
        .positive
        .values()
        .chain(result.negative.values())
        .map(|o| (o.score.category.clone(), o.score.base_score))
        .collect();
    render_bars("Category scores (0-100)", &rows, 100.0, width)
}

pub fn render_bars(title: &str, rows: &[(String, f64)], scale_max: f64, width: usize) -> String {
    let width = width.max(5);
    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    for (label, value) in rows {
        let filled = bar_len(*value, scale_max, width);
        out.push_str(&format!(
            "{label:<label_width$} |{}{}| {value:.1}\n",
            "#".repeat(filled),
            " ".repeat(width - filled)
        ));
    }
    out
}

fn bar_len(value: f64, scale_max: f64, width: usize) -> usize {
    if !(value.is_finite() && scale_max.is_finite() && scale_max > 0.0) {
        return 0;
    }
    ((value / scale_max).clamp(0.0, 1.0) * width as f64).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::element_distribution;
    use crate::domain::{Branch, FourPillars, Pillar, Stem};

    #[test]
    fn element_bars_golden_snapshot() {
        let chart = FourPillars {
            year: Pillar::new(Stem::Gyeong, Branch::O),
            month: Pillar::new(Stem::Im, Branch::O),
            day: Pillar::new(Stem::Byeong, Branch::In),
            hour: Pillar::new(Stem::Gi, Branch::Sa),
            birth_month: 5,
        };
        let txt = render_element_bars(&element_distribution(&chart), 20);
        let expected = concat!(
            "Element distribution (total 7.2)\n",
            "목 Wood  |#####               | 0.8\n",
            "화 Fire  |####################| 3.4\n",
            "토 Earth |######              | 1.0\n",
            "금 Metal |######              | 1.0\n",
            "수 Water |######              | 1.0\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn bars_clamp_and_ignore_bad_values() {
        let rows = vec![
            ("over".to_string(), 150.0),
            ("neg".to_string(), -3.0),
            ("nan".to_string(), f64::NAN),
        ];
        let txt = render_bars("t", &rows, 100.0, 5);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines[1], "over |#####| 150.0");
        assert_eq!(lines[2], "neg  |     | -3.0");
        assert_eq!(lines[3], "nan  |     | NaN");
    }
}
