//! Export analysis results.
//!
//! JSON exports carry the wire report; the CSV export flattens every category
//! score into one row for spreadsheets or downstream scripts.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::aptitude::AptitudeResult;
use crate::error::AppError;

/// Pretty-print any serializable report to a JSON file.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, value)
        .map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))
}

#[derive(Debug, Serialize)]
struct ScoreRow<'a> {
    major_type: &'a str,
    category: &'a str,
    base: String,
    daily: String,
    monthly: String,
    yearly: String,
    element_affinity: String,
    ten_gods_harmony: String,
    pillar_strength: String,
    seasonal_bonus: String,
    confidence: String,
    risk_level: &'a str,
    items: String,
}

/// Write one row per scored category.
pub fn write_scores_csv(path: &Path, result: &AptitudeResult) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    let sides = [("positive", &result.positive), ("negative", &result.negative)];
    for (major_type, outcomes) in sides {
        for outcome in outcomes.values() {
            let s = &outcome.score;
            let b = &s.breakdown;
            writer
                .serialize(ScoreRow {
                    major_type,
                    category: &s.category,
                    base: format!("{:.2}", s.base_score),
                    daily: format!("{:.2}", s.daily_score),
                    monthly: format!("{:.2}", s.monthly_score),
                    yearly: format!("{:.2}", s.yearly_score),
                    element_affinity: format!("{:.2}", b.element_affinity),
                    ten_gods_harmony: format!("{:.2}", b.ten_gods_harmony),
                    pillar_strength: format!("{:.2}", b.pillar_strength),
                    seasonal_bonus: format!("{:.2}", b.seasonal_bonus),
                    confidence: format!("{:.4}", s.confidence_level),
                    risk_level: outcome.risk_level.map(|r| r.as_str()).unwrap_or(""),
                    items: s.item_names().join("|"),
                })
                .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
        }
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::{AnalysisRequest, run_analysis};
    use crate::data::StaticCatalog;
    use crate::domain::AnalysisConfig;
    use chrono::NaiveDate;

    fn sample_result() -> AptitudeResult {
        let request = AnalysisRequest {
            birth_date: "1990-05-15".to_string(),
            birth_time: "10:30".to_string(),
            is_lunar: false,
            config: AnalysisConfig {
                as_of: NaiveDate::from_ymd_opt(2024, 6, 15),
                ..AnalysisConfig::default()
            },
        };
        run_analysis(&request, &StaticCatalog::sample()).unwrap().result
    }

    #[test]
    fn scores_csv_has_one_row_per_category() {
        let result = sample_result();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.csv");
        write_scores_csv(&path, &result).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "major_type");
        assert_eq!(&headers[11], "risk_level");

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), result.category_count());
        let negative = rows.iter().find(|r| &r[0] == "negative").unwrap();
        assert!(["LOW", "MEDIUM", "HIGH"].contains(&&negative[11]));
    }

    #[test]
    fn json_export_round_trips() {
        let result = sample_result();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        write_json(&path, &result).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let back: AptitudeResult = serde_json::from_str(&text).unwrap();
        assert_eq!(back.summary, result.summary);
        assert_eq!(back.positive.len(), result.positive.len());
    }
}
