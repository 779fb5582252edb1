use eframe::egui::{self, ScrollArea, Ui};

use crate::config::DASHBOARD;
use crate::data::model::CameraDataset;
use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CameraDashboardApp {
    pub state: AppState,
}

impl CameraDashboardApp {
    pub fn new(dataset: CameraDataset, background_uri: Option<String>) -> Self {
        Self {
            state: AppState::new(dataset, background_uri),
        }
    }
}

impl eframe::App for CameraDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .frame(egui::Frame::side_top_panel(&ctx.style()).fill(DASHBOARD.colors.panel_background))
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: 2×2 chart grid ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(uri) = &self.state.background_uri {
                egui::Image::new(uri.as_str()).paint_at(ui, ui.max_rect());
            }

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.heading("Evolution of Camera Technology & Pricing");
                    ui.add_space(8.0);

                    let state = &self.state;
                    ui.columns(2, |cols| {
                        charts::launches_chart(&mut cols[0], state);
                        charts::price_resolution_chart(&mut cols[1], state);
                    });
                    ui.add_space(12.0);
                    ui.columns(2, |cols| {
                        charts::weight_chart(&mut cols[0], state);
                        charts::zoom_price_chart(&mut cols[1], state);
                    });

                    panels::footer(ui, state);
                });
        });
    }
}
