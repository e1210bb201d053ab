//! Per-item ranking inside a category.
//!
//! Score = 50 + base_weight·15, plus 10 when the item name resonates with the
//! day-master element and 5 per present ten god whose keywords it matches
//! (at most 15). Clamped to `[0, 100]`.

use serde::{Deserialize, Serialize};

use crate::domain::{CatalogItem, Element, TenGod};
use crate::scoring::rules::{element_keywords, matches_any, ten_god_keywords};

const BASE: f64 = 50.0;
const WEIGHT_SCALE: f64 = 15.0;
const ELEMENT_BONUS: f64 = 10.0;
const GOD_BONUS: f64 = 5.0;
const GOD_BONUS_CAP: f64 = 15.0;

/// A catalog item with its individual score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedItem {
    pub name: String,
    pub score: f64,
    pub confidence: f64,
    pub rationale: String,
}

/// Score, rank and keep the top `limit` items (stable on ties: catalog order).
pub fn rank_items(
    items: &[CatalogItem],
    day_master: Element,
    present_gods: &[TenGod],
    limit: usize,
) -> Vec<RankedItem> {
    let mut ranked: Vec<RankedItem> = items
        .iter()
        .map(|item| score_item(item, day_master, present_gods))
        .collect();
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(limit);
    ranked
}

fn score_item(item: &CatalogItem, day_master: Element, present_gods: &[TenGod]) -> RankedItem {
    let element_match = matches_any(&item.name, element_keywords(day_master));
    let god_matches: Vec<TenGod> = present_gods
        .iter()
        .copied()
        .filter(|g| matches_any(&item.name, ten_god_keywords(*g)))
        .collect();

    let mut score = BASE + item.base_weight * WEIGHT_SCALE;
    if element_match {
        score += ELEMENT_BONUS;
    }
    score += (god_matches.len() as f64 * GOD_BONUS).min(GOD_BONUS_CAP);
    let score = if score.is_finite() { score.clamp(0.0, 100.0) } else { BASE };

    let rationale = if element_match {
        format!(
            "{}({}) 일간의 기질과 잘 맞는 분야",
            day_master.korean(),
            day_master.display_name()
        )
    } else if let Some(god) = god_matches.first() {
        format!("{} 기운이 뒷받침하는 분야", god.korean())
    } else {
        "기본 가중치에 따른 추천".to_string()
    };

    RankedItem {
        name: item.name.clone(),
        score,
        confidence: (item.confidence_factor * score / 100.0).clamp(0.0, 1.0),
        rationale,
    }
}
