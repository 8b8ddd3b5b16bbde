//! Dataset Model Module
//! In-memory representation of the air-quality readings after normalization.

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::collections::BTreeMap;

/// Columns that must be present (after header trimming) for a CSV to load.
pub const REQUIRED_COLUMNS: [&str; 3] = ["Date", "Time", "Location"];

/// Pollutants offered in the selection dropdown. The CSV may carry a subset;
/// querying an absent one degrades to an empty series.
pub const POLLUTANTS: [&str; 9] = [
    "PM2.5", "PM10", "NO", "NO2", "NOx", "NH3", "SO2", "CO", "Ozone",
];

/// Input format of the `Date` column.
const DATE_FORMAT: &str = "%d-%m-%Y";

/// One sensor observation. Any field can be null: unparseable cells degrade
/// to `None` and forward-fill only repairs them when a prior row had a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// Calendar day, parsed from the `Date` column.
    pub date: Option<NaiveDate>,
    /// Raw time-of-day label, e.g. "14:00".
    pub time: Option<String>,
    /// Station name from the `Location` column.
    pub location: Option<String>,
    /// Combined date + time label. Derived before forward-fill, then filled
    /// as its own column; never recomputed from the filled date.
    pub stamp: Option<NaiveDateTime>,
    /// Concentration per value column (every column besides Date/Time/Location).
    pub values: BTreeMap<String, Option<f64>>,
}

/// The complete normalized dataset. Built once at load time and never
/// mutated afterwards, so it can be shared read-only across threads.
#[derive(Debug, Clone)]
pub struct AirQualityDataset {
    /// All readings, in file order.
    pub readings: Vec<Reading>,
    /// Value-column names, in CSV column order.
    pub value_columns: Vec<String>,
    /// Distinct locations in first-appearance order (dropdown choices).
    pub locations: Vec<String>,
    /// Distinct time labels in first-appearance order (dropdown choices).
    pub times: Vec<String>,
}

impl AirQualityDataset {
    /// Build a dataset from already-normalized readings, deriving the
    /// distinct location/time lists.
    pub fn from_readings(readings: Vec<Reading>, value_columns: Vec<String>) -> Self {
        let mut locations: Vec<String> = Vec::new();
        let mut times: Vec<String> = Vec::new();

        for reading in &readings {
            if let Some(loc) = &reading.location {
                if !locations.contains(loc) {
                    locations.push(loc.clone());
                }
            }
            if let Some(time) = &reading.time {
                if !times.contains(time) {
                    times.push(time.clone());
                }
            }
        }

        Self {
            readings,
            value_columns,
            locations,
            times,
        }
    }

    /// Normalize a raw DataFrame (trimmed headers, required columns present)
    /// into readings: parse dates, derive timestamps, forward-fill.
    pub fn from_dataframe(df: &DataFrame) -> PolarsResult<Self> {
        let height = df.height();

        let date_col = df.column("Date")?;
        let time_col = df.column("Time")?;
        let location_col = df.column("Location")?;

        let mut dates: Vec<Option<NaiveDate>> = Vec::with_capacity(height);
        let mut times: Vec<Option<String>> = Vec::with_capacity(height);
        let mut locations: Vec<Option<String>> = Vec::with_capacity(height);

        for i in 0..height {
            let date = cell_str(date_col, i)
                .and_then(|s| NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok());
            dates.push(date);
            times.push(cell_str(time_col, i));
            locations.push(cell_str(location_col, i));
        }

        // Timestamps come from the pre-fill date and time cells.
        let mut stamps: Vec<Option<NaiveDateTime>> = (0..height)
            .map(|i| combine_stamp(dates[i], times[i].as_deref()))
            .collect();

        // Every non-core column is a value column; non-numeric cells null out.
        let mut value_columns: Vec<String> = Vec::new();
        let mut value_cells: Vec<Vec<Option<f64>>> = Vec::new();

        for col in df.get_columns() {
            let name = col.name().to_string();
            if REQUIRED_COLUMNS.contains(&name.as_str()) {
                continue;
            }
            let as_f64 = col.cast(&DataType::Float64)?;
            let ca = as_f64.f64()?;
            let cells: Vec<Option<f64>> =
                (0..height).map(|i| ca.get(i).filter(|v| !v.is_nan())).collect();
            value_columns.push(name);
            value_cells.push(cells);
        }

        // Positional forward-fill, per column, across the whole file.
        forward_fill(&mut dates);
        forward_fill(&mut times);
        forward_fill(&mut locations);
        forward_fill(&mut stamps);
        for cells in &mut value_cells {
            forward_fill(cells);
        }

        let mut readings = Vec::with_capacity(height);
        for i in 0..height {
            let mut values = BTreeMap::new();
            for (name, cells) in value_columns.iter().zip(&value_cells) {
                values.insert(name.clone(), cells[i]);
            }
            readings.push(Reading {
                date: dates[i],
                time: times[i].clone(),
                location: locations[i].clone(),
                stamp: stamps[i],
                values,
            });
        }

        Ok(Self::from_readings(readings, value_columns))
    }

    /// Whether the dataset carries the named value column.
    pub fn has_value_column(&self, name: &str) -> bool {
        self.value_columns.iter().any(|c| c == name)
    }

    /// Number of readings.
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

/// Read one cell as a trimmed string, null-aware.
fn cell_str(col: &Column, i: usize) -> Option<String> {
    let val = col.get(i).ok()?;
    if val.is_null() {
        None
    } else {
        Some(val.to_string().trim_matches('"').to_string())
    }
}

/// Parse the date's ISO form concatenated with the raw time label.
fn combine_stamp(date: Option<NaiveDate>, time: Option<&str>) -> Option<NaiveDateTime> {
    let date = date?;
    let time = time?;
    let joined = format!("{} {}", date.format("%Y-%m-%d"), time.trim());
    NaiveDateTime::parse_from_str(&joined, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(&joined, "%Y-%m-%d %H:%M"))
        .ok()
}

/// Replace each null with the nearest preceding non-null value in the same
/// column. Leading nulls stay null.
fn forward_fill<T: Clone>(cells: &mut [Option<T>]) {
    let mut last: Option<T> = None;
    for cell in cells.iter_mut() {
        match cell {
            Some(value) => last = Some(value.clone()),
            None => *cell = last.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_df() -> DataFrame {
        DataFrame::new(vec![
            Column::new(
                "Date".into(),
                vec![
                    Some("01-01-2024"),
                    Some("01-01-2024"),
                    None,
                    Some("02-01-2024"),
                ],
            ),
            Column::new(
                "Time".into(),
                vec![Some("10:00"), Some("14:00"), Some("18:00"), Some("10:00")],
            ),
            Column::new(
                "Location".into(),
                vec![Some("Khadakpada"), None, Some("Airoli"), Some("Airoli")],
            ),
            Column::new(
                "PM2.5".into(),
                vec![Some(12.5), None, Some(30.0), Some(18.0)],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn parses_dates_and_derives_stamps() {
        let ds = AirQualityDataset::from_dataframe(&sample_df()).unwrap();

        assert_eq!(ds.readings[0].date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(
            ds.readings[0].stamp,
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .map(|d| d.and_hms_opt(10, 0, 0).unwrap())
        );
    }

    #[test]
    fn forward_fill_is_positional_across_locations() {
        let ds = AirQualityDataset::from_dataframe(&sample_df()).unwrap();

        // Row 1's missing location takes row 0's, regardless of station.
        assert_eq!(ds.readings[1].location.as_deref(), Some("Khadakpada"));
        // Row 1's missing PM2.5 takes row 0's value.
        assert_eq!(ds.readings[1].values["PM2.5"], Some(12.5));
    }

    #[test]
    fn stamp_fills_from_prior_row_not_from_filled_date() {
        let ds = AirQualityDataset::from_dataframe(&sample_df()).unwrap();

        // Row 2 has no date, so its own stamp is unparseable. The filled
        // stamp is row 1's (14:00), not a recomputation with the 18:00 label.
        assert_eq!(ds.readings[2].date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(
            ds.readings[2].stamp,
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .map(|d| d.and_hms_opt(14, 0, 0).unwrap())
        );
    }

    #[test]
    fn malformed_date_degrades_to_null() {
        let df = DataFrame::new(vec![
            Column::new("Date".into(), vec!["2024/01/01"]),
            Column::new("Time".into(), vec!["10:00"]),
            Column::new("Location".into(), vec!["Airoli"]),
        ])
        .unwrap();
        let ds = AirQualityDataset::from_dataframe(&df).unwrap();

        assert_eq!(ds.readings[0].date, None);
        assert_eq!(ds.readings[0].stamp, None);
    }

    #[test]
    fn distinct_choices_keep_first_appearance_order() {
        let ds = AirQualityDataset::from_dataframe(&sample_df()).unwrap();

        assert_eq!(ds.locations, vec!["Khadakpada", "Airoli"]);
        assert_eq!(ds.times, vec!["10:00", "14:00", "18:00"]);
        assert_eq!(ds.value_columns, vec!["PM2.5"]);
        assert!(ds.has_value_column("PM2.5"));
        assert!(!ds.has_value_column("PM10"));
    }

    #[test]
    fn forward_fill_leaves_leading_nulls() {
        let mut cells = vec![None, Some(1.0), None, None, Some(2.0), None];
        forward_fill(&mut cells);
        assert_eq!(
            cells,
            vec![None, Some(1.0), Some(1.0), Some(1.0), Some(2.0), Some(2.0)]
        );
    }
}
