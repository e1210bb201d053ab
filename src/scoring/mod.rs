//! Category scoring: component rules, the four-part engine, item ranking.

pub mod engine;
pub mod items;
pub mod rules;

pub use engine::{
    CategoryScore, ChartFeatures, DEFAULT_TOP_ITEMS, PeriodScores, ScoreBreakdown, score,
    score_category,
};
pub use items::{RankedItem, rank_items};
pub use rules::{CategoryProfile, profile_for};
