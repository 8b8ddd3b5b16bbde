//! Trend Query Module
//! Pure mapping from (dataset, selection) to the series behind the chart.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeMap;

use super::model::AirQualityDataset;

/// Chart view mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Raw readings matching one time label, plotted over their timestamps.
    Hourly,
    /// Per-date mean across all time labels.
    Daily,
}

impl Default for ViewMode {
    fn default() -> Self {
        ViewMode::Hourly
    }
}

impl ViewMode {
    /// Dropdown label.
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Hourly => "Hourly Trend",
            ViewMode::Daily => "Daily Trend",
        }
    }
}

/// One chart point. Either side can be null (unparseable timestamp, missing
/// concentration, all-null daily mean); the plotter skips incomplete points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    pub stamp: Option<NaiveDateTime>,
    pub value: Option<f64>,
}

/// Ordered points plus a chart title, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub title: String,
    pub points: Vec<TrendPoint>,
}

impl TrendSeries {
    fn empty(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            points: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Compute the series for one dropdown selection.
///
/// Pure function of its inputs: no interior state, safe to call repeatedly
/// and from any thread holding a dataset reference. Degraded selections
/// (unknown location or pollutant) return an empty series with an
/// explanatory title rather than an error, since this runs on every UI
/// interaction.
pub fn pollutant_trend(
    dataset: &AirQualityDataset,
    location: &str,
    time_label: &str,
    pollutant: &str,
    view: ViewMode,
) -> TrendSeries {
    let rows: Vec<_> = dataset
        .readings
        .iter()
        .filter(|r| r.location.as_deref() == Some(location))
        .collect();

    if rows.is_empty() {
        return TrendSeries::empty("No Data Available");
    }
    if !dataset.has_value_column(pollutant) {
        return TrendSeries::empty(format!("No data available for {pollutant}"));
    }

    match view {
        ViewMode::Hourly => {
            let points = rows
                .iter()
                .filter(|r| r.time.as_deref() == Some(time_label))
                .map(|r| TrendPoint {
                    stamp: r.stamp,
                    value: r.values.get(pollutant).copied().flatten(),
                })
                .collect();
            TrendSeries {
                title: format!("{pollutant} Levels at {location} ({time_label})"),
                points,
            }
        }
        ViewMode::Daily => {
            // (sum, non-null count) per date; a date appears as soon as any
            // reading lands on it, even if every value is null.
            let mut by_date: BTreeMap<NaiveDate, (f64, u32)> = BTreeMap::new();
            for r in &rows {
                let Some(date) = r.date else { continue };
                let entry = by_date.entry(date).or_insert((0.0, 0));
                if let Some(v) = r.values.get(pollutant).copied().flatten() {
                    entry.0 += v;
                    entry.1 += 1;
                }
            }
            let points = by_date
                .into_iter()
                .map(|(date, (sum, count))| TrendPoint {
                    stamp: Some(date.and_time(NaiveTime::MIN)),
                    value: (count > 0).then(|| sum / f64::from(count)),
                })
                .collect();
            TrendSeries {
                title: format!("Daily Average {pollutant} in {location}"),
                points,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Reading;

    fn reading(
        ymd: (i32, u32, u32),
        time: &str,
        location: &str,
        pm25: Option<f64>,
    ) -> Reading {
        let date = NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap();
        let tod = NaiveTime::parse_from_str(time, "%H:%M").unwrap();
        Reading {
            date: Some(date),
            time: Some(time.to_string()),
            location: Some(location.to_string()),
            stamp: Some(date.and_time(tod)),
            values: BTreeMap::from([("PM2.5".to_string(), pm25)]),
        }
    }

    fn dataset(readings: Vec<Reading>) -> AirQualityDataset {
        AirQualityDataset::from_readings(readings, vec!["PM2.5".to_string()])
    }

    fn stamp(ymd: (i32, u32, u32), h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn example_dataset() -> AirQualityDataset {
        dataset(vec![
            reading((2024, 1, 1), "10:00", "A", Some(10.0)),
            reading((2024, 1, 1), "14:00", "A", Some(20.0)),
            reading((2024, 1, 2), "10:00", "A", Some(30.0)),
        ])
    }

    #[test]
    fn hourly_keeps_rows_matching_location_and_time() {
        let series =
            pollutant_trend(&example_dataset(), "A", "10:00", "PM2.5", ViewMode::Hourly);

        assert_eq!(series.title, "PM2.5 Levels at A (10:00)");
        assert_eq!(
            series.points,
            vec![
                TrendPoint {
                    stamp: Some(stamp((2024, 1, 1), 10, 0)),
                    value: Some(10.0),
                },
                TrendPoint {
                    stamp: Some(stamp((2024, 1, 2), 10, 0)),
                    value: Some(30.0),
                },
            ]
        );
    }

    #[test]
    fn daily_averages_per_date_ascending() {
        let series = pollutant_trend(&example_dataset(), "A", "10:00", "PM2.5", ViewMode::Daily);

        assert_eq!(series.title, "Daily Average PM2.5 in A");
        assert_eq!(
            series.points,
            vec![
                TrendPoint {
                    stamp: Some(stamp((2024, 1, 1), 0, 0)),
                    value: Some(15.0),
                },
                TrendPoint {
                    stamp: Some(stamp((2024, 1, 2), 0, 0)),
                    value: Some(30.0),
                },
            ]
        );
    }

    #[test]
    fn daily_sorts_unordered_dates() {
        let ds = dataset(vec![
            reading((2024, 1, 3), "10:00", "A", Some(3.0)),
            reading((2024, 1, 1), "10:00", "A", Some(1.0)),
            reading((2024, 1, 2), "10:00", "A", Some(2.0)),
        ]);
        let series = pollutant_trend(&ds, "A", "10:00", "PM2.5", ViewMode::Daily);

        let stamps: Vec<_> = series.points.iter().map(|p| p.stamp.unwrap()).collect();
        assert_eq!(
            stamps,
            vec![
                stamp((2024, 1, 1), 0, 0),
                stamp((2024, 1, 2), 0, 0),
                stamp((2024, 1, 3), 0, 0),
            ]
        );
    }

    #[test]
    fn daily_mean_skips_nulls_but_keeps_the_date() {
        let ds = dataset(vec![
            reading((2024, 1, 1), "10:00", "A", Some(10.0)),
            reading((2024, 1, 1), "14:00", "A", None),
            reading((2024, 1, 2), "10:00", "A", None),
        ]);
        let series = pollutant_trend(&ds, "A", "10:00", "PM2.5", ViewMode::Daily);

        // 2024-01-01: mean of the single non-null value; 2024-01-02: null mean.
        assert_eq!(series.points.len(), 2);
        assert_eq!(series.points[0].value, Some(10.0));
        assert_eq!(series.points[1].value, None);
    }

    #[test]
    fn hourly_series_length_matches_row_count_even_with_nulls() {
        let ds = dataset(vec![
            reading((2024, 1, 1), "10:00", "A", Some(10.0)),
            reading((2024, 1, 2), "10:00", "A", None),
            reading((2024, 1, 2), "14:00", "A", Some(5.0)),
        ]);
        let series = pollutant_trend(&ds, "A", "10:00", "PM2.5", ViewMode::Hourly);

        assert_eq!(series.points.len(), 2);
        assert_eq!(series.points[1].value, None);
    }

    #[test]
    fn unknown_location_is_no_data_available() {
        let series =
            pollutant_trend(&example_dataset(), "Nowhere", "10:00", "PM2.5", ViewMode::Hourly);

        assert!(series.is_empty());
        assert_eq!(series.title, "No Data Available");
    }

    #[test]
    fn unknown_pollutant_degrades_with_explanatory_title() {
        for view in [ViewMode::Hourly, ViewMode::Daily] {
            let series = pollutant_trend(&example_dataset(), "A", "10:00", "Ozone", view);
            assert!(series.is_empty());
            assert_eq!(series.title, "No data available for Ozone");
        }
    }

    #[test]
    fn other_locations_do_not_leak_into_the_series() {
        let ds = dataset(vec![
            reading((2024, 1, 1), "10:00", "A", Some(10.0)),
            reading((2024, 1, 1), "10:00", "B", Some(99.0)),
        ]);
        let series = pollutant_trend(&ds, "A", "10:00", "PM2.5", ViewMode::Hourly);

        assert_eq!(series.points.len(), 1);
        assert_eq!(series.points[0].value, Some(10.0));
    }
}
