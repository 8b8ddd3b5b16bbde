//! Chart Plotter Module
//! Renders a trend series as an interactive line chart using egui_plot.

use chrono::DateTime;
use egui::Color32;
use egui_plot::{Line, Plot, PlotPoints, Points};

use crate::data::{TrendSeries, ViewMode};

/// Series color
pub const LINE_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

/// Draws the single dashboard chart.
pub struct TrendPlotter;

impl TrendPlotter {
    /// Draw the series as a line with point markers and a time-formatted
    /// x axis. Points with a null timestamp or value are skipped, leaving
    /// gaps the same way the source plots render NaNs.
    pub fn draw_trend_chart(ui: &mut egui::Ui, series: &TrendSeries, view: ViewMode) {
        let points: Vec<[f64; 2]> = series
            .points
            .iter()
            .filter_map(|p| {
                let stamp = p.stamp?;
                let value = p.value?;
                Some([stamp.and_utc().timestamp() as f64, value])
            })
            .collect();

        let label_format = match view {
            ViewMode::Hourly => "%d-%m %H:%M",
            ViewMode::Daily => "%d-%m-%Y",
        };

        Plot::new("trend_chart")
            .allow_zoom(true)
            .allow_drag(true)
            .allow_scroll(false)
            .x_axis_label("Time")
            .y_axis_label("Concentration")
            .x_axis_formatter(move |mark, _range| {
                DateTime::from_timestamp(mark.value as i64, 0)
                    .map(|dt| dt.naive_utc().format(label_format).to_string())
                    .unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(LINE_COLOR)
                        .width(1.5)
                        .name(&series.title),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(3.0)
                        .color(LINE_COLOR),
                );
            });
    }
}
