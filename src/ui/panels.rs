use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::config::DASHBOARD;
use crate::data::filter::{brand_options, BrandSelection};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🎛 Filters");
    ui.separator();

    let domain = state.dataset.domain.clone();

    // ---- Release year ----
    ui.strong("Release date");
    if domain.single_year() {
        ui.label(format!("{} (only year in dataset)", domain.years.0));
    } else {
        let (mut from, mut to) = state.criteria.years;
        let range = domain.years.0..=domain.years.1;
        ui.add(Slider::new(&mut from, range.clone()).text("from"));
        ui.add(Slider::new(&mut to, range).text("to"));
        if (from, to) != state.criteria.years {
            // Dragging `from` past `to` pushes `to` along.
            state.set_years(from, to.max(from));
        }
    }
    ui.separator();

    // ---- Brand ----
    ui.strong("Brand");
    let current = state.criteria.brand.clone();
    egui::ComboBox::from_id_salt("brand_select")
        .selected_text(current.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for option in brand_options(&domain) {
                let text = RichText::new(option.to_string());
                let text = match &option {
                    BrandSelection::Brand(b) => {
                        text.color(state.brand_colors.color_for(b))
                    }
                    BrandSelection::All => text,
                };
                if ui.selectable_label(current == option, text).clicked() {
                    state.set_brand(option);
                }
            }
        });
    ui.separator();

    // ---- Zoom ratio ----
    ui.strong("Zoom Ratio");
    let (mut lo, mut hi) = state.criteria.zoom;
    let range = domain.zoom.0..=domain.zoom.1;
    ui.add(
        Slider::new(&mut lo, range.clone())
            .step_by(DASHBOARD.zoom_step)
            .text("min"),
    );
    ui.add(
        Slider::new(&mut hi, range)
            .step_by(DASHBOARD.zoom_step)
            .text("max"),
    );
    if (lo, hi) != state.criteria.zoom {
        state.set_zoom(lo, hi.max(lo));
    }
    ui.separator();

    if ui.button("Reset filters").clicked() {
        state.reset_filters();
    }

    // Recompute the views after any widget change.
    state.refresh();
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} cameras loaded, {} visible",
            state.dataset.len(),
            state.view.visible
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Footer
// ---------------------------------------------------------------------------

pub fn footer(ui: &mut Ui, state: &AppState) {
    ui.separator();
    let source = state
        .dataset
        .source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| state.dataset.source.display().to_string());
    ui.label(
        RichText::new(format!(
            "Data source: {source} ({} cameras after cleaning, {} rows dropped)",
            state.dataset.len(),
            state.dataset.dropped
        ))
        .small(),
    );
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open camera dataset")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => state.set_dataset(dataset),
            Err(e) => {
                log::warn!("Failed to load {}: {e:#}", path.display());
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
