//! The catalog boundary.
//!
//! Anything that can list flat catalog rows implements `CatalogSource`. The
//! analyzer folds those rows into a `CategoryTree` once per load; long-lived
//! callers keep the tree in a `SharedCatalog` and swap it whole on reload.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::domain::{CatalogEntry, CategoryTree};
use crate::error::EngineError;

/// A supplier of catalog rows.
pub trait CatalogSource: Send + Sync {
    fn list_categories(&self) -> Result<Vec<CatalogEntry>, EngineError>;

    /// Short label for logs.
    fn describe(&self) -> String {
        "catalog".to_string()
    }
}

/// Rows held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: Vec<CatalogEntry>,
}

impl StaticCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// The built-in catalog.
    pub fn sample() -> Self {
        Self::new(crate::data::sample_catalog())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CatalogSource for StaticCatalog {
    fn list_categories(&self) -> Result<Vec<CatalogEntry>, EngineError> {
        Ok(self.entries.clone())
    }

    fn describe(&self) -> String {
        format!("static catalog ({} rows)", self.entries.len())
    }
}

/// A category tree shared across concurrent analyses.
///
/// Readers take an `Arc` snapshot and never observe a half-replaced tree.
#[derive(Debug, Default)]
pub struct SharedCatalog {
    tree: RwLock<Arc<CategoryTree>>,
}

impl SharedCatalog {
    pub fn new(tree: CategoryTree) -> Self {
        Self {
            tree: RwLock::new(Arc::new(tree)),
        }
    }

    pub fn snapshot(&self) -> Arc<CategoryTree> {
        Arc::clone(&self.tree.read())
    }

    /// Install a new tree, returning the previous one.
    pub fn replace(&self, tree: CategoryTree) -> Arc<CategoryTree> {
        std::mem::replace(&mut *self.tree.write(), Arc::new(tree))
    }

    /// Rebuild from `source`. On error the current tree stays in place.
    pub fn reload(&self, source: &dyn CatalogSource) -> Result<usize, EngineError> {
        let entries = source.list_categories()?;
        let tree = CategoryTree::from_entries(&entries);
        let count = tree.category_count();
        self.replace(tree);
        info!(source = %source.describe(), categories = count, "catalog reloaded");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MajorType;

    fn entry(middle: &str, minor: &str) -> CatalogEntry {
        CatalogEntry {
            major_type: MajorType::Positive,
            middle_name: middle.to_string(),
            icon: None,
            minor_name: minor.to_string(),
            base_weight: 1.0,
            confidence_factor: 0.8,
        }
    }

    struct Broken;

    impl CatalogSource for Broken {
        fn list_categories(&self) -> Result<Vec<CatalogEntry>, EngineError> {
            Err(EngineError::catalog("timeout"))
        }
    }

    #[test]
    fn static_catalog_lists_its_rows() {
        let catalog = StaticCatalog::new(vec![entry("연예", "배우")]);
        assert_eq!(catalog.list_categories().unwrap().len(), 1);
        assert!(catalog.describe().contains("1 rows"));
        assert!(!StaticCatalog::sample().is_empty());
    }

    #[test]
    fn snapshots_survive_replacement() {
        let shared = SharedCatalog::new(CategoryTree::from_entries(&[entry("연예", "배우")]));
        let before = shared.snapshot();

        let old = shared.replace(CategoryTree::from_entries(&[
            entry("연예", "배우"),
            entry("학업", "연구원"),
        ]));
        assert!(Arc::ptr_eq(&before, &old));
        assert_eq!(before.category_count(), 1);
        assert_eq!(shared.snapshot().category_count(), 2);
    }

    #[test]
    fn failed_reload_keeps_current_tree() {
        let shared = SharedCatalog::new(CategoryTree::from_entries(&[entry("연예", "배우")]));
        let err = shared.reload(&Broken).unwrap_err();
        assert!(matches!(err, EngineError::CatalogUnavailable(_)));
        assert_eq!(shared.snapshot().category_count(), 1);

        let count = shared.reload(&StaticCatalog::new(vec![entry("기술", "개발자")])).unwrap();
        assert_eq!(count, 1);
        assert!(shared.snapshot().get(MajorType::Positive, "기술").is_some());
    }
}
