//! CSV Data Loader Module
//! Reads the sensor CSV with Polars and normalizes it into a dataset.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::model::{AirQualityDataset, REQUIRED_COLUMNS};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),
    #[error("missing required columns {missing:?}; available columns: {available:?}")]
    SchemaMismatch {
        missing: Vec<String>,
        available: Vec<String>,
    },
    #[error("failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// Load and normalize a sensor CSV.
///
/// Missing file and missing required columns are fatal; malformed cells
/// degrade to nulls inside the dataset instead.
pub fn load_dataset(path: &Path) -> Result<AirQualityDataset, LoaderError> {
    if !path.exists() {
        return Err(LoaderError::NotFound(path.to_path_buf()));
    }

    // Lazy scan for memory efficiency, then collect
    let mut df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10000))
        .with_ignore_errors(true)
        .finish()?
        .collect()?;

    // Header cells may carry padding whitespace; the schema check and all
    // column lookups run against the trimmed names.
    let trimmed: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.trim().to_string())
        .collect();
    df.set_column_names(trimmed.iter().map(|name| name.as_str()))?;

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !trimmed.iter().any(|have| have == *required))
        .map(|required| required.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoaderError::SchemaMismatch {
            missing,
            available: trimmed,
        });
    }

    Ok(AirQualityDataset::from_dataframe(&df)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_csv(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readings.csv");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_dataset(Path::new("/no/such/readings.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::NotFound(_)));
    }

    #[test]
    fn missing_required_column_is_schema_mismatch() {
        let (_dir, path) = write_csv("Date,Time,PM2.5\n01-01-2024,10:00,12.5\n");
        let err = load_dataset(&path).unwrap_err();
        match err {
            LoaderError::SchemaMismatch { missing, available } => {
                assert_eq!(missing, vec!["Location"]);
                assert!(available.contains(&"PM2.5".to_string()));
            }
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn padded_headers_are_trimmed() {
        let (_dir, path) =
            write_csv("Date ,Time, Location ,PM2.5\n01-01-2024,10:00,Airoli,12.5\n");
        let ds = load_dataset(&path).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.locations, vec!["Airoli"]);
        assert_eq!(ds.value_columns, vec!["PM2.5"]);
    }

    #[test]
    fn malformed_dates_do_not_fail_the_load() {
        let (_dir, path) = write_csv(
            "Date,Time,Location,PM2.5\n\
             not-a-date,10:00,Airoli,12.5\n\
             02-01-2024,14:00,Airoli,20.0\n",
        );
        let ds = load_dataset(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.readings[0].date, None);
        assert!(ds.readings[1].date.is_some());
    }

    #[test]
    fn loads_values_and_fills_gaps() {
        let (_dir, path) = write_csv(
            "Date,Time,Location,PM2.5,PM10\n\
             01-01-2024,10:00,Airoli,12.5,40.0\n\
             01-01-2024,14:00,Airoli,,\n",
        );
        let ds = load_dataset(&path).unwrap();
        assert_eq!(ds.readings[1].values["PM2.5"], Some(12.5));
        assert_eq!(ds.readings[1].values["PM10"], Some(40.0));
    }
}
