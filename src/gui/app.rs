//! AirTrend Main Application
//! Main window with control panel and chart viewer.

use crate::data::{self, AirQualityDataset};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// CSV loading result from background thread
enum LoadResult {
    Progress(String),
    Complete {
        dataset: AirQualityDataset,
        row_count: usize,
    },
    Error(String),
}

/// Main application window.
pub struct AirTrendApp {
    dataset: Option<AirQualityDataset>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl AirTrendApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, initial_csv: Option<PathBuf>) -> Self {
        let mut app = Self {
            dataset: None,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            load_rx: None,
            is_loading: false,
        };

        if let Some(path) = initial_csv {
            app.control_panel.selection.csv_path = Some(path.clone());
            app.start_load(path);
        }

        app
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return; // Already loading
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.control_panel.selection.csv_path = Some(path.clone());
            self.start_load(path);
        }
    }

    /// Load and normalize the CSV in a background thread
    fn start_load(&mut self, path: PathBuf) {
        self.chart_viewer.clear();
        self.control_panel.set_status("Loading CSV file...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress("Reading CSV file...".to_string()));

            match data::load_dataset(&path) {
                Ok(dataset) => {
                    let row_count = dataset.len();
                    let _ = tx.send(LoadResult::Complete { dataset, row_count });
                }
                Err(e) => {
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_status(&status);
                    }
                    LoadResult::Complete { dataset, row_count } => {
                        log::info!(
                            "loaded {} readings across {} locations",
                            row_count,
                            dataset.locations.len()
                        );
                        self.control_panel
                            .update_choices(dataset.locations.clone(), dataset.times.clone());
                        self.control_panel.set_status(&format!(
                            "Loaded {} readings, {} locations",
                            row_count,
                            dataset.locations.len()
                        ));
                        self.dataset = Some(dataset);
                        self.is_loading = false;
                        should_keep_receiver = false;
                        self.refresh_chart();
                    }
                    LoadResult::Error(error) => {
                        log::error!("failed to load CSV: {error}");
                        self.control_panel.set_status(&format!("Error: {}", error));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Re-run the trend query for the current selection. Queries are pure
    /// and cheap, so they run synchronously on the UI thread.
    fn refresh_chart(&mut self) {
        let Some(dataset) = &self.dataset else {
            return;
        };

        let selection = &self.control_panel.selection;
        let series = data::pollutant_trend(
            dataset,
            &selection.location,
            &selection.time,
            &selection.pollutant,
            selection.view,
        );
        self.chart_viewer.set_series(series, selection.view);
    }
}

impl eframe::App for AirTrendApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::SelectionChanged => self.refresh_chart(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
