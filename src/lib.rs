//! `saju-aptitude` library crate.
//!
//! The binary (`saju`) is a thin wrapper around this library so that:
//!
//! - the calendar and scoring engine is testable without spawning processes
//! - the engine can be embedded behind other front-ends (services, batch jobs)
//! - presentation stays out of the pure computation modules

pub mod analysis;
pub mod app;
pub mod aptitude;
pub mod calendar;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
pub mod scoring;
