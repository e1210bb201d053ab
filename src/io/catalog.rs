//! Catalog files on disk.
//!
//! CSV catalogs have one row per minor item. Required columns are
//! `major_type`, `middle_name` and `minor_name` (short aliases accepted);
//! `icon`, `base_weight` and `confidence_factor` are optional. Bad rows are
//! skipped and logged, not fatal. JSON catalogs are an array of the same rows.

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use tracing::{debug, warn};

use crate::data::CatalogSource;
use crate::domain::{CatalogEntry, MajorType};
use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Csv,
    Json,
}

impl CatalogFormat {
    /// `.json` files are JSON; everything else is read as CSV.
    pub fn from_path(path: &Path) -> CatalogFormat {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => CatalogFormat::Json,
            _ => CatalogFormat::Csv,
        }
    }
}

/// A catalog file, re-read on every `list_categories` call.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
    format: CatalogFormat,
}

impl FileCatalog {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = CatalogFormat::from_path(&path);
        Self { path, format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for FileCatalog {
    fn list_categories(&self) -> Result<Vec<CatalogEntry>, EngineError> {
        match self.format {
            CatalogFormat::Csv => read_catalog_csv(&self.path),
            CatalogFormat::Json => read_catalog_json(&self.path),
        }
    }

    fn describe(&self) -> String {
        format!("file catalog ({})", self.path.display())
    }
}

/// A skipped CSV row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

pub fn read_catalog_json(path: &Path) -> Result<Vec<CatalogEntry>, EngineError> {
    let file = File::open(path)
        .map_err(|e| EngineError::catalog(format!("failed to open catalog '{}': {e}", path.display())))?;
    serde_json::from_reader(file)
        .map_err(|e| EngineError::catalog(format!("invalid catalog JSON '{}': {e}", path.display())))
}

pub fn read_catalog_csv(path: &Path) -> Result<Vec<CatalogEntry>, EngineError> {
    let file = File::open(path)
        .map_err(|e| EngineError::catalog(format!("failed to open catalog '{}': {e}", path.display())))?;
    let (entries, row_errors) = parse_catalog_csv(file)?;
    for err in &row_errors {
        warn!(line = err.line, message = %err.message, "skipping catalog row");
    }
    debug!(rows = entries.len(), skipped = row_errors.len(), path = %path.display(), "catalog CSV loaded");
    Ok(entries)
}

/// Parse catalog CSV from any reader, returning kept rows and skipped-row errors.
pub fn parse_catalog_csv<R: std::io::Read>(
    reader: R,
) -> Result<(Vec<CatalogEntry>, Vec<RowError>), EngineError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| EngineError::catalog(format!("failed to read catalog CSV headers: {e}")))?
        .clone();
    let columns = Columns::resolve(&headers)?;

    let mut entries = Vec::new();
    let mut row_errors = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        let parsed = result
            .map_err(|e| format!("CSV parse error: {e}"))
            .and_then(|record| columns.parse_row(&record));
        match parsed {
            Ok(entry) => entries.push(entry),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }
    Ok((entries, row_errors))
}

struct Columns {
    major: usize,
    middle: usize,
    minor: usize,
    icon: Option<usize>,
    base_weight: Option<usize>,
    confidence: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, EngineError> {
        let map: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (normalize_header_name(name), idx))
            .collect();
        let find = |aliases: &[&str]| aliases.iter().find_map(|a| map.get(*a).copied());
        let require = |aliases: &[&str]| {
            find(aliases).ok_or_else(|| {
                EngineError::catalog(format!("catalog CSV is missing required column '{}'", aliases[0]))
            })
        };

        Ok(Self {
            major: require(&["major_type", "major", "type"])?,
            middle: require(&["middle_name", "middle", "category"])?,
            minor: require(&["minor_name", "minor", "item"])?,
            icon: find(&["icon"]),
            base_weight: find(&["base_weight", "weight"]),
            confidence: find(&["confidence_factor", "confidence"]),
        })
    }

    fn parse_row(&self, record: &StringRecord) -> Result<CatalogEntry, String> {
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();
        let optional = |idx: Option<usize>| idx.map(field).filter(|s| !s.is_empty());

        let raw_major = field(self.major);
        let major_type = MajorType::parse(raw_major)
            .ok_or_else(|| format!("unknown major type '{raw_major}'"))?;
        let middle_name = field(self.middle);
        let minor_name = field(self.minor);
        if middle_name.is_empty() || minor_name.is_empty() {
            return Err("blank category or item name".to_string());
        }

        Ok(CatalogEntry {
            major_type,
            middle_name: middle_name.to_string(),
            icon: optional(self.icon).map(str::to_string),
            minor_name: minor_name.to_string(),
            base_weight: parse_number(optional(self.base_weight), 1.0, "base_weight")?,
            confidence_factor: parse_number(optional(self.confidence), 0.8, "confidence_factor")?,
        })
    }
}

fn parse_number(raw: Option<&str>, default: f64, name: &str) -> Result<f64, String> {
    match raw {
        None => Ok(default),
        Some(s) => match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(format!("invalid {name} '{s}'")),
        },
    }
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a BOM.
    name.trim()
        .trim_start_matches('\u{feff}')
        .to_ascii_lowercase()
        .replace([' ', '-'], "_")
}
