//! Chart analysis: pure functions of a computed chart.
//!
//! - element distribution and day-master strength (`elements`)
//! - ten-god relations (`ten_gods`)
//! - comparison against the pillars of a reference date (`temporal`)

pub mod elements;
pub mod temporal;
pub mod ten_gods;

pub use elements::*;
pub use temporal::*;
pub use ten_gods::*;
