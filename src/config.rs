use eframe::egui::Color32;

/// Chart colours for legibility over a background image.
#[derive(Clone, Copy)]
pub struct ThemeColors {
    /// Plot area fill, black at 60% opacity.
    pub plot_background: Color32,
    /// Text, axes and grid labels.
    pub text: Color32,
    /// Translucent wash behind the panels.
    pub panel_background: Color32,
    pub empty_notice: Color32,
}

/// Dashboard-wide settings.
#[derive(Clone, Copy)]
pub struct DashboardConfig {
    pub colors: ThemeColors,
    /// Records shown at each end of the weight chart.
    pub top_n: usize,
    /// Number of equal-width zoom-ratio intervals.
    pub zoom_buckets: usize,
    /// Zoom slider granularity.
    pub zoom_step: f64,
    pub chart_height: f32,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

pub static DASHBOARD: DashboardConfig = DashboardConfig {
    colors: ThemeColors {
        plot_background: Color32::from_rgba_premultiplied(0, 0, 0, 153),
        text: Color32::WHITE,
        panel_background: Color32::from_rgba_premultiplied(0, 0, 0, 51),
        empty_notice: Color32::from_rgb(120, 180, 255),
    },
    top_n: 10,
    zoom_buckets: 4,
    zoom_step: 0.1,
    chart_height: 320.0,
    window_size: [1400.0, 900.0],
    min_window_size: [800.0, 600.0],
};

/// Default dataset path, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "camera_dataset.csv";
