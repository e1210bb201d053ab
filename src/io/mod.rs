//! Input/output helpers.
//!
//! - catalog files, CSV or JSON (`catalog`)
//! - report exports, JSON or CSV (`export`)

pub mod catalog;
pub mod export;

pub use catalog::*;
pub use export::*;
