//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the sexagenary vocabulary (`Element`, `Stem`, `Branch`, `Pillar`, `TenGod`)
//! - charts (`FourPillars`, `CurrentPillars`) and run configuration (`AnalysisConfig`)
//! - the category catalog tree (`CatalogEntry`, `CategoryTree`)

pub mod catalog;
pub mod types;

pub use catalog::*;
pub use types::*;
