use std::fmt;

use super::model::{CameraDataset, CameraRecord, ControlDomain};

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// Label of the brand wildcard in the selector.
pub const ALL_BRANDS: &str = "All";

/// Brand selector value: the wildcard or one exact brand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BrandSelection {
    #[default]
    All,
    Brand(String),
}

impl BrandSelection {
    pub fn matches(&self, brand: &str) -> bool {
        match self {
            BrandSelection::All => true,
            BrandSelection::Brand(b) => b == brand,
        }
    }
}

impl fmt::Display for BrandSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrandSelection::All => write!(f, "{ALL_BRANDS}"),
            BrandSelection::Brand(b) => write!(f, "{b}"),
        }
    }
}

/// The three user-controlled criteria.  Both ranges are inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub years: (i32, i32),
    pub brand: BrandSelection,
    pub zoom: (f64, f64),
}

impl FilterCriteria {
    /// Widest settings: the whole observed domain, every brand.
    pub fn widest(domain: &ControlDomain) -> Self {
        Self {
            years: domain.years,
            brand: BrandSelection::All,
            zoom: domain.zoom,
        }
    }

    /// Whether a record satisfies all three predicates.
    ///
    /// A record without a release year or zoom ratio fails the corresponding
    /// range predicate.
    pub fn accepts(&self, record: &CameraRecord) -> bool {
        let year_ok = record
            .release_year
            .is_some_and(|y| y >= self.years.0 && y <= self.years.1);
        let zoom_ok = record
            .zoom_ratio
            .is_some_and(|z| z >= self.zoom.0 && z <= self.zoom.1);
        year_ok && self.brand.matches(&record.brand) && zoom_ok
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return the records passing `criteria`, in dataset order.
pub fn filter_records<'a>(
    dataset: &'a CameraDataset,
    criteria: &FilterCriteria,
) -> Vec<&'a CameraRecord> {
    dataset
        .records
        .iter()
        .filter(|r| criteria.accepts(r))
        .collect()
}

/// Brand selector options: the wildcard followed by every brand, sorted.
pub fn brand_options(domain: &ControlDomain) -> Vec<BrandSelection> {
    std::iter::once(BrandSelection::All)
        .chain(domain.brands.iter().cloned().map(BrandSelection::Brand))
        .collect()
}
