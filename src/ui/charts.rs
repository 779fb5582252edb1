use eframe::egui::{self, Color32, RichText, Stroke, Ui};
use egui_plot::{
    uniform_grid_spacer, Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot,
    PlotPoints, Points,
};

use crate::color::generate_palette;
use crate::config::DASHBOARD;
use crate::data::views::{ScatterPoint, ViewData, WeightClass, WeightExtremes, YearCount, ZoomBucket};
use crate::state::AppState;

const NO_DATA: &str = "No data for selected filters.";

// ---------------------------------------------------------------------------
// Shared chart chrome
// ---------------------------------------------------------------------------

/// Subheader, translucent dark frame, and the empty-state notice when the
/// view has no data.
fn chart_card<T>(ui: &mut Ui, subheader: &str, view: &ViewData<T>, draw: impl FnOnce(&mut Ui, &T)) {
    ui.heading(RichText::new(subheader).color(DASHBOARD.colors.text));
    egui::Frame::default()
        .fill(DASHBOARD.colors.plot_background)
        .inner_margin(8.0)
        .show(ui, |ui: &mut Ui| match view.data() {
            None => {
                ui.set_min_height(DASHBOARD.chart_height);
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.label(RichText::new(NO_DATA).color(DASHBOARD.colors.empty_notice));
                });
            }
            Some(data) => draw(ui, data),
        });
}

fn base_plot(id: &str) -> Plot<'_> {
    Plot::new(id)
        .height(DASHBOARD.chart_height)
        .show_background(false)
        .allow_scroll(false)
        .allow_boxed_zoom(true)
}

/// Label integer grid marks from `labels`; blank anything in between.
fn index_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Cameras released per year
// ---------------------------------------------------------------------------

pub fn launches_chart(ui: &mut Ui, state: &AppState) {
    let title = format!(
        "Camera Launches Over the Years ({})",
        state.view.criteria.brand
    );
    chart_card(ui, "Cameras Released Per Year", &state.view.launches, |ui, counts: &Vec<YearCount>| {
        ui.label(RichText::new(title).strong());
        let pts: Vec<[f64; 2]> = counts
            .iter()
            .map(|c| [c.year as f64, c.count as f64])
            .collect();

        base_plot("launches_plot")
            .x_axis_label("Release date")
            .y_axis_label("Camera Count")
            .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
            .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from(pts.clone()))
                        .color(Color32::LIGHT_BLUE)
                        .width(2.0),
                );
                plot_ui.points(Points::new(PlotPoints::from(pts)).radius(4.0).color(Color32::LIGHT_BLUE));
            });
    });
}

// ---------------------------------------------------------------------------
// Price vs effective pixels
// ---------------------------------------------------------------------------

/// Marker radius grows with the square root of storage, so area tracks it.
fn marker_radius(storage: f64, max_storage: f64) -> f32 {
    if max_storage <= 0.0 {
        return 3.0;
    }
    (2.0 + 8.0 * (storage / max_storage).sqrt()) as f32
}

pub fn price_resolution_chart(ui: &mut Ui, state: &AppState) {
    chart_card(ui, "Price vs Resolution", &state.view.price_vs_resolution, |ui, points: &Vec<ScatterPoint>| {
        ui.label(RichText::new("Price vs Effective Pixels").strong());
        let max_storage = points.iter().map(|p| p.storage_included).fold(0.0, f64::max);
        let hover: Vec<(f64, f64, String)> = points
            .iter()
            .map(|p| (p.effective_pixels, p.price, p.model.clone()))
            .collect();

        base_plot("price_resolution_plot")
            .legend(Legend::default())
            .x_axis_label("Effective Pixels (MP)")
            .y_axis_label("Price")
            .label_formatter(move |_brand, value| {
                hover
                    .iter()
                    .min_by(|a, b| {
                        let da = (a.0 - value.x).powi(2) + (a.1 - value.y).powi(2);
                        let db = (b.0 - value.x).powi(2) + (b.1 - value.y).powi(2);
                        da.total_cmp(&db)
                    })
                    .map(|(mp, price, model)| format!("{model}\n{mp} MP, {price:.0}"))
                    .unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                for p in points {
                    plot_ui.points(
                        Points::new(PlotPoints::from(vec![[p.effective_pixels, p.price]]))
                            .name(&p.brand)
                            .color(state.brand_colors.color_for(&p.brand))
                            .radius(marker_radius(p.storage_included, max_storage))
                            .filled(true),
                    );
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Heaviest & lightest
// ---------------------------------------------------------------------------

pub fn weight_chart(ui: &mut Ui, state: &AppState) {
    chart_card(ui, "Top 10 Heaviest & Lightest Cameras", &state.view.weight_extremes, |ui, ext: &WeightExtremes| {
        ui.label(RichText::new("Heaviest & Lightest Cameras").strong());

        // Heaviest at the top: bar i sits at y = n - 1 - i.
        let n = ext.bars.len();
        let mut labels = vec![String::new(); n];
        let mut by_brand: Vec<(String, Vec<Bar>)> = Vec::new();
        for (i, bar) in ext.bars.iter().enumerate() {
            let y = n - 1 - i;
            labels[y] = bar.model.clone();
            let tag = match bar.class {
                WeightClass::Heaviest => "heaviest",
                WeightClass::Lightest => "lightest",
            };
            let item = Bar::new(y as f64, bar.weight)
                .name(format!("{} ({tag})", bar.model))
                .width(0.7);
            match by_brand.iter_mut().find(|(b, _)| *b == bar.brand) {
                Some((_, bars)) => bars.push(item),
                None => by_brand.push((bar.brand.clone(), vec![item])),
            }
        }

        base_plot("weight_plot")
            .legend(Legend::default())
            .x_axis_label("Weight (inc. batteries)")
            .y_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
            .y_axis_formatter(move |mark, _range| index_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                for (brand, bars) in by_brand {
                    plot_ui.bar_chart(
                        BarChart::new(bars)
                            .horizontal()
                            .color(state.brand_colors.color_for(&brand))
                            .name(brand),
                    );
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Price distribution by zoom bucket
// ---------------------------------------------------------------------------

pub fn zoom_price_chart(ui: &mut Ui, state: &AppState) {
    chart_card(ui, "Price Distribution by Zoom Ratio", &state.view.price_by_zoom, |ui, buckets: &Vec<ZoomBucket>| {
        ui.label(RichText::new("Price Distribution across Zoom Levels").strong());
        let labels: Vec<String> = buckets.iter().map(|b| b.label.clone()).collect();
        let colors = generate_palette(buckets.len());

        base_plot("zoom_price_plot")
            .legend(Legend::default())
            .x_axis_label("Zoom Bin")
            .y_axis_label("Price")
            .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 2.0, 4.0]))
            .x_axis_formatter(move |mark, _range| index_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                for (i, (bucket, color)) in buckets.iter().zip(colors).enumerate() {
                    let Some(stats) = &bucket.stats else {
                        continue;
                    };
                    let x = i as f64;
                    let elem = BoxElem::new(
                        x,
                        BoxSpread::new(
                            stats.lower_whisker,
                            stats.q1,
                            stats.median,
                            stats.q3,
                            stats.upper_whisker,
                        ),
                    )
                    .name(&bucket.label)
                    .box_width(0.5)
                    .fill(color.gamma_multiply(0.4))
                    .stroke(Stroke::new(1.5, color));
                    plot_ui.box_plot(BoxPlot::new(vec![elem]).name(&bucket.label).color(color));

                    if !stats.outliers.is_empty() {
                        let outliers: Vec<[f64; 2]> = stats.outliers.iter().map(|&p| [x, p]).collect();
                        plot_ui.points(
                            Points::new(PlotPoints::from(outliers))
                                .name(&bucket.label)
                                .color(color)
                                .radius(3.0),
                        );
                    }
                }
            });
    });
}
