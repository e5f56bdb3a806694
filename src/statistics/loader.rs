//! Load historical price series from CSV
//!
//! Expects a `date,value` header (`Date` is accepted too). Rows with an
//! empty value are skipped.

use chrono::NaiveDate;
use csv::Reader;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, SimError};

/// One observation of a price series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Raw CSV row
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "Date")]
    date: NaiveDate,
    #[serde(alias = "Value", alias = "average", alias = "Close")]
    value: Option<f64>,
}

/// Load a price series from a CSV file
pub fn load_price_series<P: AsRef<Path>>(path: P) -> Result<Vec<PricePoint>> {
    let reader = Reader::from_path(path)?;
    collect_rows(reader)
}

/// Load a price series from any reader (e.g., string buffer, network stream)
pub fn load_price_series_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<PricePoint>> {
    collect_rows(Reader::from_reader(reader))
}

fn collect_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<PricePoint>> {
    let mut series = Vec::new();
    let mut skipped = 0usize;

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        match row.value {
            Some(value) if value.is_finite() => series.push(PricePoint { date: row.date, value }),
            _ => skipped += 1,
        }
    }

    if series.windows(2).any(|w| w[1].date < w[0].date) {
        return Err(SimError::Parse("price series dates must be ascending".to_string()));
    }

    debug!("loaded {} prices ({} rows without a value)", series.len(), skipped);
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_reader() {
        let data = "date,value\n2023-01-02,\n2023-01-03,101.5\n2023-01-04,99.0\n";
        let series = load_price_series_from_reader(data.as_bytes()).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2023, 1, 3).unwrap());
        assert_eq!(series[1].value, 99.0);
    }

    #[test]
    fn test_capitalised_header() {
        let data = "Date,Close\n2023-01-03,10\n";
        let series = load_price_series_from_reader(data.as_bytes()).unwrap();
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_bad_date_is_error() {
        let data = "date,value\nnot-a-date,1.0\n";
        assert!(load_price_series_from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn test_unsorted_dates_rejected() {
        let data = "date,value\n2023-01-04,1.0\n2023-01-03,2.0\n";
        assert!(load_price_series_from_reader(data.as_bytes()).is_err());
    }
}
