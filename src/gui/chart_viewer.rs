//! Chart Viewer Widget
//! Central panel displaying the current trend series as a line chart.

use crate::charts::TrendPlotter;
use crate::data::{TrendSeries, ViewMode};
use egui::RichText;

/// Holds and draws the series produced by the latest query.
pub struct ChartViewer {
    series: Option<TrendSeries>,
    view: ViewMode,
}

impl Default for ChartViewer {
    fn default() -> Self {
        Self {
            series: None,
            view: ViewMode::default(),
        }
    }
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the displayed series (e.g. when a new file starts loading).
    pub fn clear(&mut self) {
        self.series = None;
    }

    /// Replace the displayed series. The view mode controls the x-axis
    /// label format.
    pub fn set_series(&mut self, series: TrendSeries, view: ViewMode) {
        self.series = Some(series);
        self.view = view;
    }

    /// Draw the chart area
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(series) = &self.series else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ui.vertical(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new(&series.title).size(18.0).strong());
            ui.add_space(8.0);
            TrendPlotter::draw_trend_chart(ui, series, self.view);
        });
    }
}
