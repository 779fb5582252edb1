use std::collections::{BTreeMap, HashSet};

use super::filter::{filter_records, FilterCriteria};
use super::model::{CameraDataset, CameraRecord};
use crate::config::DASHBOARD;

// ---------------------------------------------------------------------------
// ViewData – per-view result with an explicit empty state
// ---------------------------------------------------------------------------

/// Output of one view derivation.  `NoData` is produced for an empty filtered
/// subset instead of aggregating over zero rows.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewData<T> {
    NoData,
    Data(T),
}

impl<T> ViewData<T> {
    fn from_subset(subset: &[&CameraRecord], derive: impl FnOnce(&[&CameraRecord]) -> T) -> Self {
        if subset.is_empty() {
            ViewData::NoData
        } else {
            ViewData::Data(derive(subset))
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ViewData::NoData => None,
            ViewData::Data(d) => Some(d),
        }
    }
}

// ---------------------------------------------------------------------------
// Launches per year
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// Count records per release year, ascending by year.
pub fn launches_per_year(subset: &[&CameraRecord]) -> Vec<YearCount> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for year in subset.iter().filter_map(|r| r.release_year) {
        *counts.entry(year).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

// ---------------------------------------------------------------------------
// Price vs resolution
// ---------------------------------------------------------------------------

/// One scatter point: x = effective pixels, y = price, colour = brand,
/// marker size = storage included.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub id: usize,
    pub model: String,
    pub brand: String,
    pub effective_pixels: f64,
    pub price: f64,
    pub storage_included: f64,
}

/// One point per record that has an effective pixel count.
pub fn price_vs_resolution(subset: &[&CameraRecord]) -> Vec<ScatterPoint> {
    subset
        .iter()
        .filter_map(|r| {
            Some(ScatterPoint {
                id: r.id,
                model: r.model.clone(),
                brand: r.brand.clone(),
                effective_pixels: r.effective_pixels?,
                price: r.price,
                storage_included: r.storage_included,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Weight extremes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightClass {
    Heaviest,
    Lightest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightBar {
    pub id: usize,
    pub model: String,
    pub brand: String,
    pub weight: f64,
    pub class: WeightClass,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightExtremes {
    /// Ids of the `n` heaviest records, heaviest first.
    pub heaviest: Vec<usize>,
    /// Ids of the `n` lightest records, lightest first.
    pub lightest: Vec<usize>,
    /// Union of both selections, each record at most once.
    pub bars: Vec<WeightBar>,
}

/// Select the `n` heaviest and `n` lightest records and union them by
/// record identity.  Ties keep subset order.
pub fn weight_extremes(subset: &[&CameraRecord], n: usize) -> WeightExtremes {
    let mut by_weight: Vec<&CameraRecord> = subset.to_vec();
    by_weight.sort_by(|a, b| a.weight.total_cmp(&b.weight));
    let lightest: Vec<&CameraRecord> = by_weight.iter().take(n).copied().collect();

    by_weight.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    let heaviest: Vec<&CameraRecord> = by_weight.iter().take(n).copied().collect();

    let mut seen = HashSet::new();
    let bars = heaviest
        .iter()
        .map(|r| (r, WeightClass::Heaviest))
        .chain(lightest.iter().map(|r| (r, WeightClass::Lightest)))
        .filter(|(r, _)| seen.insert(r.id))
        .map(|(r, class)| WeightBar {
            id: r.id,
            model: r.model.clone(),
            brand: r.brand.clone(),
            weight: r.weight,
            class,
        })
        .collect();

    WeightExtremes {
        heaviest: heaviest.iter().map(|r| r.id).collect(),
        lightest: lightest.iter().map(|r| r.id).collect(),
        bars,
    }
}

// ---------------------------------------------------------------------------
// Price distribution by zoom bucket
// ---------------------------------------------------------------------------

/// Five-number summary plus whiskers and outliers of a sample.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Smallest value within `q1 - 1.5 * IQR`.
    pub lower_whisker: f64,
    /// Largest value within `q3 + 1.5 * IQR`.
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

/// Linear-interpolated quantile of sorted, non-empty data.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

impl BoxStats {
    /// `None` for an empty sample.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25);
        let q3 = quantile(&sorted, 0.75);
        let fence = 1.5 * (q3 - q1);
        let (lo_fence, hi_fence) = (q1 - fence, q3 + fence);

        let lower_whisker = sorted.iter().copied().find(|v| *v >= lo_fence).unwrap_or(q1);
        let upper_whisker = sorted.iter().rev().copied().find(|v| *v <= hi_fence).unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < lo_fence || *v > hi_fence)
            .collect();

        Some(BoxStats {
            min: sorted[0],
            q1,
            median: quantile(&sorted, 0.5),
            q3,
            max: sorted[sorted.len() - 1],
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}

/// One zoom-ratio interval `(lower, upper]` and the prices falling in it.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomBucket {
    pub lower: f64,
    pub upper: f64,
    pub label: String,
    /// Ids of the records in this bucket.
    pub members: Vec<usize>,
    pub prices: Vec<f64>,
    /// `None` when no record falls in the bucket.
    pub stats: Option<BoxStats>,
}

/// Split `[min, max]` into `count` equal-width right-closed intervals.
///
/// The first edge is lowered by 0.1% of the range so `min` lands in the
/// first interval.  A zero-width range is first widened by 0.1% of |value|
/// (0.001 for zero) on each side.
pub fn bucket_edges(min: f64, max: f64, count: usize) -> Vec<f64> {
    let count = count.max(1);
    if min == max {
        let adj = if min == 0.0 { 0.001 } else { 0.001 * min.abs() };
        let (lo, hi) = (min - adj, max + adj);
        let width = (hi - lo) / count as f64;
        return (0..=count).map(|i| lo + width * i as f64).collect();
    }

    let width = (max - min) / count as f64;
    let mut edges: Vec<f64> = (0..=count).map(|i| min + width * i as f64).collect();
    edges[count] = max;
    edges[0] -= 0.001 * (max - min);
    edges
}

/// Interval label with edges at three decimals, trailing zeros trimmed:
/// `(0.991, 3.25]`.
fn interval_label(lower: f64, upper: f64) -> String {
    fn edge(v: f64) -> String {
        let text = format!("{v:.3}");
        let text = text.trim_end_matches('0').trim_end_matches('.');
        match text {
            "-0" => "0".to_string(),
            other => other.to_string(),
        }
    }
    format!("({}, {}]", edge(lower), edge(upper))
}

/// Index of the right-closed interval holding `value`; values past the last
/// edge clamp to the last interval.
fn bucket_index(edges: &[f64], value: f64) -> usize {
    let last = edges.len().saturating_sub(2);
    edges[1..]
        .iter()
        .position(|upper| value <= *upper)
        .unwrap_or(last)
        .min(last)
}

/// Bin the subset by zoom ratio into `count` buckets spanning the subset's own
/// zoom range and summarise the price in each.
pub fn price_by_zoom_bucket(subset: &[&CameraRecord], count: usize) -> Vec<ZoomBucket> {
    let zoomed: Vec<(&CameraRecord, f64)> = subset
        .iter()
        .filter_map(|r| r.zoom_ratio.map(|z| (*r, z)))
        .collect();
    let Some((min, max)) = zoomed.iter().fold(None, |acc: Option<(f64, f64)>, (_, z)| {
        Some(match acc {
            None => (*z, *z),
            Some((lo, hi)) => (lo.min(*z), hi.max(*z)),
        })
    }) else {
        return Vec::new();
    };

    let edges = bucket_edges(min, max, count);
    let mut buckets: Vec<ZoomBucket> = edges
        .windows(2)
        .map(|w| ZoomBucket {
            lower: w[0],
            upper: w[1],
            label: interval_label(w[0], w[1]),
            members: Vec::new(),
            prices: Vec::new(),
            stats: None,
        })
        .collect();

    for (record, zoom) in zoomed {
        let bucket = &mut buckets[bucket_index(&edges, zoom)];
        bucket.members.push(record.id);
        bucket.prices.push(record.price);
    }
    for bucket in &mut buckets {
        bucket.stats = BoxStats::from_values(&bucket.prices);
    }
    buckets
}

// ---------------------------------------------------------------------------
// ViewState – the complete output of one render pass
// ---------------------------------------------------------------------------

/// Everything the four charts need for one filter selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub criteria: FilterCriteria,
    /// Number of records in the filtered subset.
    pub visible: usize,
    pub launches: ViewData<Vec<YearCount>>,
    pub price_vs_resolution: ViewData<Vec<ScatterPoint>>,
    pub weight_extremes: ViewData<WeightExtremes>,
    pub price_by_zoom: ViewData<Vec<ZoomBucket>>,
}

/// Filter the dataset and derive all four views.  Pure: the same inputs
/// always give the same state.
pub fn render(dataset: &CameraDataset, criteria: &FilterCriteria) -> ViewState {
    let subset = filter_records(dataset, criteria);
    log::debug!("Rendering {} of {} cameras for {criteria:?}", subset.len(), dataset.len());

    ViewState {
        criteria: criteria.clone(),
        visible: subset.len(),
        launches: ViewData::from_subset(&subset, launches_per_year),
        price_vs_resolution: ViewData::from_subset(&subset, price_vs_resolution),
        weight_extremes: ViewData::from_subset(&subset, |s| weight_extremes(s, DASHBOARD.top_n)),
        price_by_zoom: ViewData::from_subset(&subset, |s| {
            price_by_zoom_bucket(s, DASHBOARD.zoom_buckets)
        }),
    }
}
