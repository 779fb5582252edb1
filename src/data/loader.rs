use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::clean::build_dataset;
use super::model::{
    missing_columns, whole_year, CameraDataset, DatasetError, RawCameraRow, COL_DIMENSIONS,
    COL_EFFECTIVE_PIXELS, COL_MODEL, COL_PRICE, COL_RELEASE_DATE, COL_STORAGE, COL_WEIGHT,
    COL_ZOOM_TELE, COL_ZOOM_WIDE,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load, clean and derive a camera dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the source column names (extra columns ignored)
/// * `.json`    – `[{ "Model": "...", "Price": 179.0, ... }, ...]`
/// * `.parquet` – one column per source column
pub fn load_file(path: &Path) -> Result<CameraDataset> {
    let rows = read_rows(path)?;
    let dataset = build_dataset(rows, path)
        .with_context(|| format!("building dataset from {}", path.display()))?;
    log::info!(
        "Loaded {} cameras from {} ({} rows dropped, {} brands)",
        dataset.len(),
        path.display(),
        dataset.dropped,
        dataset.domain.brands.len()
    );
    Ok(dataset)
}

/// Read the raw rows of a file without cleaning them.
pub fn read_rows(path: &Path) -> Result<Vec<RawCameraRow>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => read_csv(path),
        "json" => read_json(path),
        "parquet" | "pq" => read_parquet(path),
        other => Err(DatasetError::UnsupportedExtension(other.to_string()).into()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn read_csv(path: &Path) -> Result<Vec<RawCameraRow>> {
    // Short rows read their absent trailing cells as missing.
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let missing = missing_columns(&headers);
    if !missing.is_empty() {
        return Err(DatasetError::MissingColumns(missing).into());
    }

    reader
        .deserialize()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV row {row_no}")))
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`).  The column check
/// runs against the keys of the first record.
fn read_json(path: &Path) -> Result<Vec<RawCameraRow>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    if let Some(first) = records.first() {
        let obj = first.as_object().context("Row 0 is not a JSON object")?;
        let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        let missing = missing_columns(&keys);
        if !missing.is_empty() {
            return Err(DatasetError::MissingColumns(missing).into());
        }
    }

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            serde_json::from_value(rec.clone()).with_context(|| format!("JSON row {i}"))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Every source column, cast to the type the row struct wants.
struct ParquetColumns {
    model: StringArray,
    release: Float64Array,
    dimensions: Float64Array,
    weight: Float64Array,
    price: Float64Array,
    storage: Float64Array,
    pixels: Float64Array,
    zoom_wide: Float64Array,
    zoom_tele: Float64Array,
}

fn read_parquet(path: &Path) -> Result<Vec<RawCameraRow>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let field_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let missing = missing_columns(&field_names);
    if !missing.is_empty() {
        return Err(DatasetError::MissingColumns(missing).into());
    }

    let reader = builder.build().context("building parquet reader")?;
    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let column = |name: &str| -> Result<Arc<dyn Array>> {
            let idx = batch
                .schema()
                .index_of(name)
                .with_context(|| format!("Parquet batch missing '{name}' column"))?;
            Ok(batch.column(idx).clone())
        };

        let cols = ParquetColumns {
            model: as_strings(&column(COL_MODEL)?)?,
            release: as_floats(&column(COL_RELEASE_DATE)?)?,
            dimensions: as_floats(&column(COL_DIMENSIONS)?)?,
            weight: as_floats(&column(COL_WEIGHT)?)?,
            price: as_floats(&column(COL_PRICE)?)?,
            storage: as_floats(&column(COL_STORAGE)?)?,
            pixels: as_floats(&column(COL_EFFECTIVE_PIXELS)?)?,
            zoom_wide: as_floats(&column(COL_ZOOM_WIDE)?)?,
            zoom_tele: as_floats(&column(COL_ZOOM_TELE)?)?,
        };

        for row in 0..batch.num_rows() {
            rows.push(RawCameraRow {
                model: (!cols.model.is_null(row)).then(|| cols.model.value(row).to_string()),
                release_year: float_at(&cols.release, row).and_then(whole_year),
                dimensions: float_at(&cols.dimensions, row),
                weight: float_at(&cols.weight, row),
                price: float_at(&cols.price, row),
                storage_included: float_at(&cols.storage, row),
                effective_pixels: float_at(&cols.pixels, row),
                zoom_wide: float_at(&cols.zoom_wide, row),
                zoom_tele: float_at(&cols.zoom_tele, row),
            });
        }
    }

    Ok(rows)
}

// -- Parquet / Arrow helpers --

/// Cast any column to `Float64`; values that cannot be cast become null.
fn as_floats(col: &Arc<dyn Array>) -> Result<Float64Array> {
    let casted = cast(col, &DataType::Float64)
        .with_context(|| format!("casting {:?} column to Float64", col.data_type()))?;
    casted
        .as_any()
        .downcast_ref::<Float64Array>()
        .cloned()
        .context("expected Float64Array after cast")
}

fn as_strings(col: &Arc<dyn Array>) -> Result<StringArray> {
    let casted = cast(col, &DataType::Utf8)
        .with_context(|| format!("casting {:?} column to Utf8", col.data_type()))?;
    casted
        .as_any()
        .downcast_ref::<StringArray>()
        .cloned()
        .context("expected StringArray after cast")
}

fn float_at(arr: &Float64Array, row: usize) -> Option<f64> {
    (!arr.is_null(row)).then(|| arr.value(row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::TempDir;

    use crate::data::fixtures::raw;

    const HEADER: &str = "Model,Release date,Max resolution,Dimensions,Weight (inc. batteries),\
Price,Storage included,Effective pixels,Zoom wide (W),Zoom tele (T)";

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn csv_loads_and_cleans() {
        let dir = TempDir::new().unwrap();
        let csv = format!(
            "{HEADER}\n\
             Agfa ePhoto 1280,1997,1024,93,420,179,0,0,38,114\n\
             Canon PowerShot A10,2001,1280,95,375,179,8,1,35,105\n\
             Kodak DC200,1999,1152,110,0,299,4,1,39,39\n\
             Nikon Coolpix 995,2001,2048,,400,899,16,3,38,152\n\
             Sony DSC-P1,2000,2048,113,250,n/a,8,3,39,117\n\
             Leica Digilux Zoom,2000,1280,98,360,549,4,1,0,0\n"
        );
        let path = write(&dir, "cams.csv", &csv);

        let ds = load_file(&path).unwrap();
        let models: Vec<&str> = ds.records.iter().map(|r| r.model.as_str()).collect();
        assert_eq!(models, vec!["Canon PowerShot A10", "Leica Digilux Zoom"]);
        assert_eq!(ds.dropped, 4);
        assert_eq!(ds.records[0].zoom_ratio, Some(3.0));
        assert_eq!(ds.records[1].zoom_ratio, None);
        assert_eq!(ds.records[1].brand, "Leica");
    }

    #[test]
    fn csv_short_rows_are_dropped_not_fatal() {
        let dir = TempDir::new().unwrap();
        let csv = format!(
            "{HEADER}\n\
             Canon PowerShot A10,2001,1280,95,375,179,8,1,35,105\n\
             Kodak DC200,1999,1152,110\n"
        );
        let path = write(&dir, "cams.csv", &csv);

        let rows = read_rows(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].dimensions, Some(110.0));
        assert_eq!(rows[1].weight, None);

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.dropped, 1);
    }

    #[test]
    fn csv_float_years_are_whole_years() {
        let dir = TempDir::new().unwrap();
        let csv = format!(
            "{HEADER}\n\
             Canon PowerShot A10,2001.0,1280,95,375,179,8,1,35,105\n\
             Nikon Coolpix 995,2001.5,2048,98,400,899,16,3,38,152\n"
        );
        let path = write(&dir, "cams.csv", &csv);

        let rows = read_rows(&path).unwrap();
        assert_eq!(rows[0].release_year, Some(2001));
        assert_eq!(rows[1].release_year, None);
    }

    #[test]
    fn csv_missing_columns_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "cams.csv", "Model,Price\nCanon A10,179\n");
        let err = load_file(&path).unwrap_err();
        match err.downcast_ref::<DatasetError>() {
            Some(DatasetError::MissingColumns(cols)) => {
                assert!(cols.contains(&"Zoom wide (W)".to_string()));
                assert!(!cols.contains(&"Price".to_string()));
                assert_eq!(cols.len(), 7);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(load_file(&dir.path().join("absent.csv")).is_err());
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "cams.xlsx", "");
        let err = read_rows(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::UnsupportedExtension(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn json_records_load() {
        let dir = TempDir::new().unwrap();
        let rows = vec![
            raw("Canon PowerShot A10", 2001, 375.0, 35.0, 105.0),
            raw("Nikon Coolpix 995", 2002, 400.0, 38.0, 152.0),
        ];
        let path = write(&dir, "cams.json", &serde_json::to_string(&rows).unwrap());

        assert_eq!(read_rows(&path).unwrap(), rows);
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.domain.years, (2001, 2002));
    }

    #[test]
    fn json_float_years_are_whole_years() {
        let dir = TempDir::new().unwrap();
        let json = r#"[
            {"Model": "Canon PowerShot A10", "Release date": 2001.0, "Dimensions": 95,
             "Weight (inc. batteries)": 375, "Price": 179, "Storage included": 8,
             "Effective pixels": 1, "Zoom wide (W)": 35, "Zoom tele (T)": 105},
            {"Model": "Nikon Coolpix 995", "Release date": 2002, "Dimensions": 98,
             "Weight (inc. batteries)": 400, "Price": 899, "Storage included": 16,
             "Effective pixels": 3, "Zoom wide (W)": 38, "Zoom tele (T)": 152}
        ]"#;
        let path = write(&dir, "cams.json", json);

        let rows = read_rows(&path).unwrap();
        assert_eq!(rows[0].release_year, Some(2001));
        assert_eq!(rows[1].release_year, Some(2002));
        assert_eq!(load_file(&path).unwrap().domain.years, (2001, 2002));
    }

    #[test]
    fn json_missing_columns_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "cams.json", r#"[{"Model": "Canon A10", "Price": 179}]"#);
        let err = read_rows(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::MissingColumns(_))
        ));
    }

    #[test]
    fn parquet_loads_with_casts() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cams.parquet");

        let float_field = |name: &str| Field::new(name, DataType::Float64, true);
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_MODEL, DataType::Utf8, true),
            Field::new(COL_RELEASE_DATE, DataType::Int64, true),
            float_field(COL_DIMENSIONS),
            float_field(COL_WEIGHT),
            float_field(COL_PRICE),
            float_field(COL_STORAGE),
            float_field(COL_EFFECTIVE_PIXELS),
            float_field(COL_ZOOM_WIDE),
            float_field(COL_ZOOM_TELE),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec![
                    Some("Canon PowerShot A10"),
                    Some("Kodak DC200"),
                ])),
                Arc::new(Int64Array::from(vec![2001, 1999])),
                Arc::new(Float64Array::from(vec![95.0, 110.0])),
                Arc::new(Float64Array::from(vec![375.0, 0.0])),
                Arc::new(Float64Array::from(vec![179.0, 299.0])),
                Arc::new(Float64Array::from(vec![8.0, 4.0])),
                Arc::new(Float64Array::from(vec![Some(1.0), None])),
                Arc::new(Float64Array::from(vec![35.0, 39.0])),
                Arc::new(Float64Array::from(vec![105.0, 39.0])),
            ],
        )
        .unwrap();
        let mut writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let rows = read_rows(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].release_year, Some(2001));
        assert_eq!(rows[1].effective_pixels, None);

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].brand, "Canon");
    }
}
