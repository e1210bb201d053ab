//! Sexagenary calendar arithmetic.
//!
//! - pillar calculation for charts and reference dates (`pillars`)
//! - lunar → solar adjustment (`lunar`)

pub mod lunar;
pub mod pillars;

pub use lunar::*;
pub use pillars::*;
