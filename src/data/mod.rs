/// Data layer: core types, loading, cleaning, filtering and view derivation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<RawCameraRow>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  drop bad rows, derive zoom ratio + brand → CameraDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterCriteria predicates → filtered subset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  views    │  four chart derivations → ViewState
///   └──────────┘
/// ```

pub mod clean;
pub mod filter;
pub mod loader;
pub mod model;
pub mod views;

#[cfg(test)]
pub(crate) mod fixtures;
