//! Control Panel Widget
//! Left side panel with the file picker and the four trend filters.

use crate::data::{ViewMode, POLLUTANTS};
use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;

/// Current dropdown selection driving the chart
#[derive(Clone)]
pub struct TrendSelection {
    pub csv_path: Option<PathBuf>,
    pub location: String,
    pub time: String,
    pub pollutant: String,
    pub view: ViewMode,
}

impl Default for TrendSelection {
    fn default() -> Self {
        Self {
            csv_path: None,
            location: String::new(),
            time: String::new(),
            pollutant: "PM2.5".to_string(),
            view: ViewMode::default(),
        }
    }
}

/// Left side control panel with file selection and trend filters.
pub struct ControlPanel {
    pub selection: TrendSelection,
    pub locations: Vec<String>,
    pub times: Vec<String>,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            selection: TrendSelection::default(),
            locations: Vec::new(),
            times: Vec::new(),
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update dropdown choices after a dataset load. Keeps the current
    /// location/time when they still exist, otherwise falls back to the
    /// first available choice.
    pub fn update_choices(&mut self, locations: Vec<String>, times: Vec<String>) {
        self.locations = locations;
        self.times = times;

        if !self.locations.contains(&self.selection.location) {
            self.selection.location = self.locations.first().cloned().unwrap_or_default();
        }
        if !self.times.contains(&self.selection.time) {
            self.selection.time = self.times.first().cloned().unwrap_or_default();
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌫 AirTrend")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Air Quality Dashboard")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .selection
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.selection.csv_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Trend Filters Section =====
        ui.label(RichText::new("🔧 Trend Filters").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 110.0;
        let combo_width = 150.0;

        // Location - aligned
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Location:"));
            ComboBox::from_id_salt("location")
                .width(combo_width)
                .selected_text(&self.selection.location)
                .show_ui(ui, |ui| {
                    for loc in &self.locations {
                        if ui
                            .selectable_label(self.selection.location == *loc, loc)
                            .clicked()
                        {
                            self.selection.location = loc.clone();
                            action = ControlPanelAction::SelectionChanged;
                        }
                    }
                });
        });

        ui.add_space(5.0);

        // Time label - aligned
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Time:"));
            ComboBox::from_id_salt("time")
                .width(combo_width)
                .selected_text(&self.selection.time)
                .show_ui(ui, |ui| {
                    for time in &self.times {
                        if ui
                            .selectable_label(self.selection.time == *time, time)
                            .clicked()
                        {
                            self.selection.time = time.clone();
                            action = ControlPanelAction::SelectionChanged;
                        }
                    }
                });
        });

        ui.add_space(5.0);

        // Pollutant - the fixed list, independent of the loaded columns
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Pollutant:"));
            ComboBox::from_id_salt("pollutant")
                .width(combo_width)
                .selected_text(&self.selection.pollutant)
                .show_ui(ui, |ui| {
                    for pollutant in POLLUTANTS {
                        if ui
                            .selectable_label(self.selection.pollutant == pollutant, pollutant)
                            .clicked()
                        {
                            self.selection.pollutant = pollutant.to_string();
                            action = ControlPanelAction::SelectionChanged;
                        }
                    }
                });
        });

        ui.add_space(5.0);

        // View mode
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("View Type:"));
            ComboBox::from_id_salt("view_mode")
                .width(combo_width)
                .selected_text(self.selection.view.label())
                .show_ui(ui, |ui| {
                    for view in [ViewMode::Hourly, ViewMode::Daily] {
                        if ui
                            .selectable_label(self.selection.view == view, view.label())
                            .clicked()
                        {
                            self.selection.view = view;
                            action = ControlPanelAction::SelectionChanged;
                        }
                    }
                });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.label(RichText::new("📊 Status").size(14.0).strong());
        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set the status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    SelectionChanged,
}
