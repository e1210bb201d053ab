//! Catalog collaborators.
//!
//! - the `CatalogSource` boundary, in-memory and shared catalogs (`catalog`)
//! - remote catalog over HTTP (`http`)
//! - built-in catalog used when nothing else is configured (`sample`)

pub mod catalog;
pub mod http;
pub mod sample;

pub use catalog::*;
pub use http::*;
pub use sample::*;
