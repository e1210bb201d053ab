//! Category catalog reference data.
//!
//! The catalog arrives as flat rows (one per minor item) from whatever store
//! owns it. `CategoryTree::from_entries` folds those rows once into a read-only
//! major → middle → minor tree so scoring never re-joins anything.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Talent vs risk grouping of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MajorType {
    Positive,
    Negative,
}

impl MajorType {
    pub fn parse(s: &str) -> Option<MajorType> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" | "pos" | "+" | "긍정" => Some(MajorType::Positive),
            "negative" | "neg" | "-" | "부정" => Some(MajorType::Negative),
            _ => None,
        }
    }
}

/// One flat catalog row as listed by the catalog collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub major_type: MajorType,
    pub middle_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub minor_name: String,
    #[serde(default = "default_base_weight")]
    pub base_weight: f64,
    #[serde(default = "default_confidence_factor")]
    pub confidence_factor: f64,
}

fn default_base_weight() -> f64 {
    1.0
}

fn default_confidence_factor() -> f64 {
    0.8
}

/// A minor item inside a middle category.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub name: String,
    pub base_weight: f64,
    pub confidence_factor: f64,
}

/// A middle category with its items.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub major_type: MajorType,
    pub name: String,
    pub icon: Option<String>,
    pub items: Vec<CatalogItem>,
}

impl Category {
    /// Mean confidence factor of the items (0.8 when empty).
    pub fn confidence_factor(&self) -> f64 {
        mean(self.items.iter().map(|i| i.confidence_factor)).unwrap_or(0.8)
    }
}

/// Read-only catalog tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTree {
    positive: BTreeMap<String, Category>,
    negative: BTreeMap<String, Category>,
}

impl CategoryTree {
    /// Group flat rows by (major type, middle name).
    ///
    /// Rows with a blank middle or minor name are dropped; non-finite weights
    /// fall back to the defaults and confidence factors are clamped to `[0, 1]`.
    pub fn from_entries(entries: &[CatalogEntry]) -> Self {
        let mut tree = CategoryTree::default();
        for entry in entries {
            let middle = entry.middle_name.trim();
            let minor = entry.minor_name.trim();
            if middle.is_empty() || minor.is_empty() {
                continue;
            }

            let side = match entry.major_type {
                MajorType::Positive => &mut tree.positive,
                MajorType::Negative => &mut tree.negative,
            };
            let category = side.entry(middle.to_string()).or_insert_with(|| Category {
                major_type: entry.major_type,
                name: middle.to_string(),
                icon: None,
                items: Vec::new(),
            });
            if category.icon.is_none() {
                category.icon = entry.icon.clone().filter(|s| !s.trim().is_empty());
            }

            let base_weight = if entry.base_weight.is_finite() {
                entry.base_weight
            } else {
                default_base_weight()
            };
            let confidence_factor = if entry.confidence_factor.is_finite() {
                entry.confidence_factor.clamp(0.0, 1.0)
            } else {
                default_confidence_factor()
            };

            category.items.push(CatalogItem {
                name: minor.to_string(),
                base_weight,
                confidence_factor,
            });
        }
        tree
    }

    pub fn positive(&self) -> impl Iterator<Item = &Category> {
        self.positive.values()
    }

    pub fn negative(&self) -> impl Iterator<Item = &Category> {
        self.negative.values()
    }

    /// All categories, positive first, each side sorted by name.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.positive().chain(self.negative())
    }

    pub fn get(&self, major: MajorType, name: &str) -> Option<&Category> {
        match major {
            MajorType::Positive => self.positive.get(name),
            MajorType::Negative => self.negative.get(name),
        }
    }

    pub fn category_count(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.category_count() == 0
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { None } else { Some(sum / n as f64) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(major: MajorType, middle: &str, minor: &str, weight: f64) -> CatalogEntry {
        CatalogEntry {
            major_type: major,
            middle_name: middle.to_string(),
            icon: None,
            minor_name: minor.to_string(),
            base_weight: weight,
            confidence_factor: 0.9,
        }
    }

    #[test]
    fn groups_rows_by_major_and_middle() {
        let entries = vec![
            entry(MajorType::Positive, "연예", "배우", 1.2),
            entry(MajorType::Positive, "연예", "가수", 1.0),
            entry(MajorType::Negative, "건강", "위장 질환", 0.8),
            entry(MajorType::Positive, " ", "무시됨", 1.0),
        ];
        let tree = CategoryTree::from_entries(&entries);

        assert_eq!(tree.category_count(), 2);
        let ent = tree.get(MajorType::Positive, "연예").unwrap();
        assert_eq!(ent.items.len(), 2);
        assert_eq!(ent.items[0].base_weight, 1.2);
        assert!(tree.get(MajorType::Negative, "건강").is_some());
        assert!(tree.get(MajorType::Positive, "건강").is_none());
    }

    #[test]
    fn sanitizes_weights() {
        let mut e = entry(MajorType::Positive, "학업", "수학", f64::NAN);
        e.confidence_factor = 3.0;
        let tree = CategoryTree::from_entries(&[e]);
        let item = &tree.get(MajorType::Positive, "학업").unwrap().items[0];
        assert_eq!(item.base_weight, 1.0);
        assert_eq!(item.confidence_factor, 1.0);
    }

    #[test]
    fn major_type_parses_common_spellings() {
        assert_eq!(MajorType::parse("Positive"), Some(MajorType::Positive));
        assert_eq!(MajorType::parse("부정"), Some(MajorType::Negative));
        assert_eq!(MajorType::parse("maybe"), None);
    }
}
