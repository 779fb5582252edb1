//! Shared builders for data-layer tests.

use std::path::Path;

use super::clean::build_dataset;
use super::model::{CameraDataset, RawCameraRow};

pub fn raw(model: &str, year: i32, weight: f64, wide: f64, tele: f64) -> RawCameraRow {
    RawCameraRow {
        model: Some(model.to_string()),
        release_year: Some(year),
        dimensions: Some(95.0),
        weight: Some(weight),
        price: Some(179.0),
        storage_included: Some(16.0),
        effective_pixels: Some(4.0),
        zoom_wide: Some(wide),
        zoom_tele: Some(tele),
    }
}

/// Same as [`raw`] with an explicit price.
pub fn priced(model: &str, year: i32, weight: f64, zoom: f64, price: f64) -> RawCameraRow {
    RawCameraRow {
        price: Some(price),
        ..raw(model, year, weight, 10.0, 10.0 * zoom)
    }
}

/// A small mixed dataset: three brands, 1998–2004, zoom 1x–10x.
pub fn sample_dataset() -> CameraDataset {
    let rows = vec![
        priced("Canon PowerShot A10", 2001, 375.0, 3.0, 179.0),
        priced("Canon PowerShot G2", 2001, 510.0, 3.0, 799.0),
        priced("Canon PowerShot S1 IS", 2004, 370.0, 10.0, 499.0),
        priced("Nikon Coolpix 995", 2001, 400.0, 4.0, 899.0),
        priced("Nikon Coolpix 2100", 2003, 190.0, 3.0, 149.0),
        priced("Nikon Coolpix 5700", 2002, 480.0, 8.0, 1099.0),
        priced("Kodak DC200", 1998, 330.0, 1.0, 299.0),
        priced("Kodak EasyShare CX4200", 2003, 200.0, 1.0, 129.0),
        priced("Kodak DX6490", 2003, 360.0, 10.0, 499.0),
        priced("Sony DSC-F717", 2002, 650.0, 5.0, 999.0),
    ];
    build_dataset(rows, Path::new("camera_dataset.csv")).expect("sample dataset is valid")
}
