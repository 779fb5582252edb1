use crate::color::BrandColors;
use crate::config::DASHBOARD;
use crate::data::filter::{BrandSelection, FilterCriteria};
use crate::data::model::CameraDataset;
use crate::data::views::{render, ViewState};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset.
    pub dataset: CameraDataset,

    /// Current filter selection, edited by the side panel widgets.
    pub criteria: FilterCriteria,

    /// Views derived from `criteria` (cached until the criteria change).
    pub view: ViewState,

    /// Colour per brand, shared by every chart.
    pub brand_colors: BrandColors,

    /// Optional `file://` URI of the page background image.
    pub background_uri: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: CameraDataset, background_uri: Option<String>) -> Self {
        let criteria = FilterCriteria::widest(&dataset.domain);
        let view = render(&dataset, &criteria);
        let brand_colors = BrandColors::new(&dataset.domain.brands);
        Self {
            dataset,
            criteria,
            view,
            brand_colors,
            background_uri,
            status_message: None,
        }
    }

    /// Replace the dataset, resetting filters and colours.
    pub fn set_dataset(&mut self, dataset: CameraDataset) {
        self.criteria = FilterCriteria::widest(&dataset.domain);
        self.brand_colors = BrandColors::new(&dataset.domain.brands);
        self.view = render(&dataset, &self.criteria);
        self.dataset = dataset;
        self.status_message = None;
    }

    /// Re-derive the views if the criteria changed since the last pass.
    pub fn refresh(&mut self) {
        if self.view.criteria != self.criteria {
            self.view = render(&self.dataset, &self.criteria);
        }
    }

    /// Set the year range, keeping `min <= max` inside the observed domain.
    pub fn set_years(&mut self, min: i32, max: i32) {
        let (lo, hi) = self.dataset.domain.years;
        let min = min.clamp(lo, hi);
        self.criteria.years = (min, max.clamp(min, hi));
    }

    /// Set the zoom range, keeping `min <= max` inside the observed domain.
    ///
    /// A value within one slider step of a domain bound snaps onto it, so an
    /// off-grid bound such as 10.833 stays selectable with a 0.1 step.
    pub fn set_zoom(&mut self, min: f64, max: f64) {
        let (lo, hi) = self.dataset.domain.zoom;
        let step = DASHBOARD.zoom_step;
        let snap = |v: f64| {
            if v < lo + step {
                lo
            } else if v > hi - step {
                hi
            } else {
                v
            }
        };
        let min = snap(min.clamp(lo, hi));
        self.criteria.zoom = (min, snap(max.clamp(min, hi)).max(min));
    }

    pub fn set_brand(&mut self, brand: BrandSelection) {
        self.criteria.brand = brand;
    }

    /// Back to the widest settings.
    pub fn reset_filters(&mut self) {
        self.criteria = FilterCriteria::widest(&self.dataset.domain);
    }
}
