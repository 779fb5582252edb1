use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Source column names
// ---------------------------------------------------------------------------

pub const COL_MODEL: &str = "Model";
pub const COL_RELEASE_DATE: &str = "Release date";
pub const COL_DIMENSIONS: &str = "Dimensions";
pub const COL_WEIGHT: &str = "Weight (inc. batteries)";
pub const COL_PRICE: &str = "Price";
pub const COL_STORAGE: &str = "Storage included";
pub const COL_EFFECTIVE_PIXELS: &str = "Effective pixels";
pub const COL_ZOOM_WIDE: &str = "Zoom wide (W)";
pub const COL_ZOOM_TELE: &str = "Zoom tele (T)";

/// Every column the input table must carry, in source order.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    COL_MODEL,
    COL_RELEASE_DATE,
    COL_DIMENSIONS,
    COL_WEIGHT,
    COL_PRICE,
    COL_STORAGE,
    COL_EFFECTIVE_PIXELS,
    COL_ZOOM_WIDE,
    COL_ZOOM_TELE,
];

/// Return the required columns absent from `present`.
pub fn missing_columns<S: AsRef<str>>(present: &[S]) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|req| !present.iter().any(|p| p.as_ref() == **req))
        .map(|req| req.to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("no usable rows left after cleaning")]
    NoUsableRows,
    #[error("no record carries a release year")]
    NoReleaseYears,
    #[error("no record has a defined zoom ratio")]
    NoZoomRatios,
}

// ---------------------------------------------------------------------------
// Year cells
// ---------------------------------------------------------------------------

/// A year read as a number: whole values only (`2001` or `2001.0`).
pub fn whole_year(v: f64) -> Option<i32> {
    (v.is_finite() && v.fract() == 0.0 && v.abs() <= i32::MAX as f64).then_some(v as i32)
}

/// Read a year cell as any number, then keep it only if it is whole.
fn year_option<'de, D: Deserializer<'de>>(de: D) -> Result<Option<i32>, D::Error> {
    let value: Option<f64> = csv::invalid_option(de)?;
    Ok(value.and_then(whole_year))
}

// ---------------------------------------------------------------------------
// RawCameraRow – one untyped-ish row straight from the file
// ---------------------------------------------------------------------------

/// One row as read from the source table.  Every cell may be missing; a
/// value that does not parse as the column's type is read as missing too.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCameraRow {
    #[serde(rename = "Model", default, deserialize_with = "csv::invalid_option")]
    pub model: Option<String>,
    #[serde(rename = "Release date", default, deserialize_with = "year_option")]
    pub release_year: Option<i32>,
    #[serde(rename = "Dimensions", default, deserialize_with = "csv::invalid_option")]
    pub dimensions: Option<f64>,
    #[serde(
        rename = "Weight (inc. batteries)",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub weight: Option<f64>,
    #[serde(rename = "Price", default, deserialize_with = "csv::invalid_option")]
    pub price: Option<f64>,
    #[serde(rename = "Storage included", default, deserialize_with = "csv::invalid_option")]
    pub storage_included: Option<f64>,
    #[serde(rename = "Effective pixels", default, deserialize_with = "csv::invalid_option")]
    pub effective_pixels: Option<f64>,
    #[serde(rename = "Zoom wide (W)", default, deserialize_with = "csv::invalid_option")]
    pub zoom_wide: Option<f64>,
    #[serde(rename = "Zoom tele (T)", default, deserialize_with = "csv::invalid_option")]
    pub zoom_tele: Option<f64>,
}

// ---------------------------------------------------------------------------
// CameraRecord – a cleaned row plus derived columns
// ---------------------------------------------------------------------------

/// A cleaned camera row.  The four required columns are guaranteed positive;
/// `brand` is guaranteed non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRecord {
    /// Position of the record in the cleaned dataset; used as its identity.
    pub id: usize,
    pub model: String,
    pub release_year: Option<i32>,
    pub dimensions: f64,
    pub weight: f64,
    pub price: f64,
    pub storage_included: f64,
    pub effective_pixels: Option<f64>,
    pub zoom_wide: Option<f64>,
    pub zoom_tele: Option<f64>,
    /// `zoom_tele / zoom_wide`, `None` when undefined.
    pub zoom_ratio: Option<f64>,
    /// First whitespace-delimited token of the model name.
    pub brand: String,
}

// ---------------------------------------------------------------------------
// ControlDomain – bounds offered by the filter widgets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ControlDomain {
    /// Observed (min, max) release year.  Both equal for a single-year dataset.
    pub years: (i32, i32),
    /// Distinct brands, sorted.
    pub brands: Vec<String>,
    /// Observed (min, max) of the defined zoom ratios.
    pub zoom: (f64, f64),
}

impl ControlDomain {
    /// Whether the year control collapses to a fixed value.
    pub fn single_year(&self) -> bool {
        self.years.0 == self.years.1
    }
}

// ---------------------------------------------------------------------------
// CameraDataset – the complete cleaned and derived dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CameraDataset {
    pub records: Vec<CameraRecord>,
    pub domain: ControlDomain,
    /// File the dataset was read from.
    pub source: PathBuf,
    /// Number of source rows dropped during cleaning.
    pub dropped: usize,
}

impl CameraDataset {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}
