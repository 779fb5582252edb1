use std::path::Path;

use super::model::{CameraDataset, CameraRecord, ControlDomain, DatasetError, RawCameraRow};

// ---------------------------------------------------------------------------
// Clean: drop rows with missing or non-positive required values
// ---------------------------------------------------------------------------

fn positive(v: Option<f64>) -> bool {
    matches!(v, Some(x) if x > 0.0)
}

/// Whether a raw row survives cleaning.
///
/// Dimensions, weight, price and storage must be present and positive, and
/// the model must yield a brand.
pub fn is_clean(row: &RawCameraRow) -> bool {
    positive(row.dimensions)
        && positive(row.weight)
        && positive(row.price)
        && positive(row.storage_included)
        && row.model.as_deref().and_then(brand_of).is_some()
}

/// Keep only the rows that pass [`is_clean`], in source order.
pub fn clean_rows(rows: Vec<RawCameraRow>) -> Vec<RawCameraRow> {
    rows.into_iter().filter(is_clean).collect()
}

// ---------------------------------------------------------------------------
// Derive: zoom ratio and brand
// ---------------------------------------------------------------------------

/// First whitespace-delimited token of a model name.
pub fn brand_of(model: &str) -> Option<&str> {
    model.split_whitespace().next()
}

/// `tele / wide`, or `None` when either side is missing, wide is not
/// positive, or the quotient is not finite.
pub fn zoom_ratio(wide: Option<f64>, tele: Option<f64>) -> Option<f64> {
    let (wide, tele) = (wide?, tele?);
    if wide <= 0.0 || !wide.is_finite() {
        return None;
    }
    let ratio = tele / wide;
    ratio.is_finite().then_some(ratio)
}

/// Build a typed record from a row that already passed [`is_clean`].
fn to_record(id: usize, row: RawCameraRow) -> Option<CameraRecord> {
    let model = row.model?;
    let brand = brand_of(&model)?.to_string();
    Some(CameraRecord {
        id,
        release_year: row.release_year,
        dimensions: row.dimensions?,
        weight: row.weight?,
        price: row.price?,
        storage_included: row.storage_included?,
        effective_pixels: row.effective_pixels,
        zoom_wide: row.zoom_wide,
        zoom_tele: row.zoom_tele,
        zoom_ratio: zoom_ratio(row.zoom_wide, row.zoom_tele),
        brand,
        model,
    })
}

/// Clean raw rows and derive a record from each survivor; ids follow the
/// cleaned order.
pub fn derive_records(rows: Vec<RawCameraRow>) -> Vec<CameraRecord> {
    clean_rows(rows)
        .into_iter()
        .enumerate()
        .filter_map(|(i, row)| to_record(i, row))
        .collect()
}

// ---------------------------------------------------------------------------
// Control domain
// ---------------------------------------------------------------------------

/// Observed bounds for the three filter widgets.
pub fn control_domain(records: &[CameraRecord]) -> Result<ControlDomain, DatasetError> {
    if records.is_empty() {
        return Err(DatasetError::NoUsableRows);
    }

    let years = records
        .iter()
        .filter_map(|r| r.release_year)
        .fold(None, |acc: Option<(i32, i32)>, y| match acc {
            None => Some((y, y)),
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
        })
        .ok_or(DatasetError::NoReleaseYears)?;

    let zoom = records
        .iter()
        .filter_map(|r| r.zoom_ratio)
        .fold(None, |acc: Option<(f64, f64)>, z| match acc {
            None => Some((z, z)),
            Some((lo, hi)) => Some((lo.min(z), hi.max(z))),
        })
        .ok_or(DatasetError::NoZoomRatios)?;

    let mut brands: Vec<String> = records.iter().map(|r| r.brand.clone()).collect();
    brands.sort();
    brands.dedup();

    Ok(ControlDomain { years, brands, zoom })
}

/// Clean, derive and index a set of raw rows into a dataset.
pub fn build_dataset(rows: Vec<RawCameraRow>, source: &Path) -> Result<CameraDataset, DatasetError> {
    let total = rows.len();
    let records = derive_records(rows);
    let domain = control_domain(&records)?;
    Ok(CameraDataset {
        dropped: total - records.len(),
        records,
        domain,
        source: source.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::raw;

    #[test]
    fn brand_is_first_token() {
        assert_eq!(brand_of("Canon PowerShot A10"), Some("Canon"));
        assert_eq!(brand_of("  Nikon   Coolpix"), Some("Nikon"));
        assert_eq!(brand_of("   "), None);
    }

    #[test]
    fn zoom_ratio_divides_tele_by_wide() {
        assert_eq!(zoom_ratio(Some(4.0), Some(16.0)), Some(4.0));
        assert_eq!(zoom_ratio(Some(0.0), Some(0.0)), None);
        assert_eq!(zoom_ratio(Some(0.0), Some(105.0)), None);
        assert_eq!(zoom_ratio(None, Some(105.0)), None);
        assert_eq!(zoom_ratio(Some(35.0), None), None);
    }

    #[test]
    fn derive_sets_brand_and_ratio() {
        let recs = derive_records(vec![raw("Canon PowerShot A10", 2001, 375.0, 4.0, 16.0)]);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].brand, "Canon");
        assert_eq!(recs[0].zoom_ratio, Some(4.0));
    }

    #[test]
    fn derive_takes_raw_rows_and_numbers_survivors() {
        let rows = vec![
            raw("Kodak DC200", 1999, 0.0, 39.0, 39.0),
            raw("Canon PowerShot A10", 2001, 375.0, 35.0, 105.0),
            raw("Kodak DC210", 1999, 0.0, 39.0, 78.0),
            raw("Nikon Coolpix 995", 2001, 400.0, 38.0, 152.0),
        ];
        let recs = derive_records(rows);
        let got: Vec<(usize, &str)> = recs.iter().map(|r| (r.id, r.model.as_str())).collect();
        assert_eq!(got, vec![(0, "Canon PowerShot A10"), (1, "Nikon Coolpix 995")]);
    }

    #[test]
    fn cleaning_drops_missing_and_non_positive() {
        let good = raw("Canon PowerShot A10", 2001, 375.0, 35.0, 105.0);
        let zero_weight = raw("Kodak DC200", 1999, 0.0, 39.0, 39.0);
        let mut no_price = raw("Sony DSC-P1", 2000, 250.0, 39.0, 117.0);
        no_price.price = None;
        let mut negative_storage = raw("Fujifilm FinePix", 2002, 200.0, 36.0, 108.0);
        negative_storage.storage_included = Some(-8.0);
        let mut blank_model = raw("x", 2003, 300.0, 35.0, 105.0);
        blank_model.model = Some("   ".to_string());

        let kept = clean_rows(vec![
            good.clone(),
            zero_weight,
            no_price,
            negative_storage,
            blank_model,
        ]);
        assert_eq!(kept, vec![good]);
    }

    #[test]
    fn cleaning_is_idempotent() {
        let mut rows = vec![
            raw("Canon PowerShot A10", 2001, 375.0, 35.0, 105.0),
            raw("Kodak DC200", 1999, 0.0, 39.0, 39.0),
            raw("Nikon Coolpix 995", 2001, 400.0, 38.0, 152.0),
        ];
        rows[2].dimensions = None;
        let once = clean_rows(rows);
        let twice = clean_rows(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn zero_zoom_wide_is_kept_without_ratio() {
        let rows = vec![
            raw("Canon PowerShot A10", 2001, 375.0, 35.0, 105.0),
            raw("Leica Digilux", 2002, 300.0, 0.0, 0.0),
        ];
        let ds = build_dataset(rows, Path::new("cams.csv")).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].zoom_ratio, None);
        assert_eq!(ds.domain.zoom, (3.0, 3.0));
    }

    #[test]
    fn domain_tracks_years_brands_and_zoom() {
        let rows = vec![
            raw("Nikon Coolpix 995", 2001, 400.0, 38.0, 152.0),
            raw("Canon PowerShot A10", 1999, 375.0, 35.0, 105.0),
            raw("Canon PowerShot G2", 2004, 510.0, 34.0, 102.0),
            raw("Kodak DC200", 2000, 0.0, 39.0, 39.0),
        ];
        let ds = build_dataset(rows, Path::new("cams.csv")).unwrap();
        assert_eq!(ds.dropped, 1);
        assert_eq!(ds.domain.years, (1999, 2004));
        assert_eq!(ds.domain.brands, vec!["Canon", "Nikon"]);
        assert_eq!(ds.domain.zoom, (3.0, 4.0));
        let ids: Vec<usize> = ds.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn single_year_collapses_domain() {
        let rows = vec![
            raw("Canon PowerShot A10", 2005, 375.0, 35.0, 105.0),
            raw("Nikon Coolpix 995", 2005, 400.0, 38.0, 152.0),
        ];
        let ds = build_dataset(rows, Path::new("cams.csv")).unwrap();
        assert!(ds.domain.single_year());
        assert_eq!(ds.domain.years, (2005, 2005));
    }

    #[test]
    fn degenerate_datasets_are_rejected() {
        let all_bad = vec![raw("Kodak DC200", 1999, 0.0, 39.0, 39.0)];
        assert!(matches!(
            build_dataset(all_bad, Path::new("a.csv")),
            Err(DatasetError::NoUsableRows)
        ));

        let no_zoom = vec![raw("Leica Digilux", 2002, 300.0, 0.0, 0.0)];
        assert!(matches!(
            build_dataset(no_zoom, Path::new("a.csv")),
            Err(DatasetError::NoZoomRatios)
        ));

        let mut undated = raw("Canon PowerShot A10", 2001, 375.0, 35.0, 105.0);
        undated.release_year = None;
        assert!(matches!(
            build_dataset(vec![undated], Path::new("a.csv")),
            Err(DatasetError::NoReleaseYears)
        ));
    }
}
