//! CSV bar loading.
//!
//! Expected header: `date,open,high,low,close,volume,percent_change` with an
//! optional trailing `turnover_rate`. Empty numeric cells become NaN, which
//! downstream aggregates count as zero contributions.

use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::DailyBar;

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("read failed: {0}")]
    Read(String),

    #[error("parse failed: {0}")]
    Parse(String),

    #[error("empty series: {0}")]
    Empty(String),
}

/// One CSV row. Numeric fields are optional so sparse feeds deserialize
/// cleanly; a missing cell becomes NaN on the bar.
#[derive(Debug, Deserialize)]
struct CsvBar {
    date: NaiveDate,
    open: Option<f64>,
    high: Option<f64>,
    low: Option<f64>,
    close: Option<f64>,
    volume: Option<f64>,
    percent_change: Option<f64>,
    #[serde(default)]
    turnover_rate: Option<f64>,
}

impl From<CsvBar> for DailyBar {
    fn from(row: CsvBar) -> Self {
        DailyBar {
            date: row.date,
            open: row.open.unwrap_or(f64::NAN),
            high: row.high.unwrap_or(f64::NAN),
            low: row.low.unwrap_or(f64::NAN),
            close: row.close.unwrap_or(f64::NAN),
            volume: row.volume.unwrap_or(f64::NAN),
            percent_change: row.percent_change.unwrap_or(f64::NAN),
            turnover_rate: row.turnover_rate,
        }
    }
}

/// Load a bar series from a CSV file, sorted ascending by date.
pub fn load_csv(path: &Path) -> Result<Vec<DailyBar>, DataError> {
    let mut reader = ::csv::Reader::from_path(path).map_err(|e| DataError::Read(e.to_string()))?;

    let mut bars: Vec<DailyBar> = Vec::new();
    for row in reader.deserialize::<CsvBar>() {
        let row = row.map_err(|e| DataError::Parse(e.to_string()))?;
        bars.push(row.into());
    }

    if bars.is_empty() {
        return Err(DataError::Empty(path.display().to_string()));
    }

    // The engine assumes ascending order; sorting here is stable, so bars
    // sharing a date keep their file order.
    bars.sort_by_key(|b| b.date);
    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_and_sorts_rows() {
        let file = write_temp(
            "date,open,high,low,close,volume,percent_change\n\
             2024-01-03,101.0,103.0,100.0,102.0,1200,1.0\n\
             2024-01-02,100.0,102.0,99.0,101.0,1000,0.5\n",
        );
        let bars = load_csv(file.path()).unwrap();

        assert_eq!(bars.len(), 2);
        assert!(bars[0].date < bars[1].date);
        assert_eq!(bars[0].close, 101.0);
        assert_eq!(bars[1].volume, 1200.0);
        assert_eq!(bars[0].turnover_rate, None);
    }

    #[test]
    fn empty_cells_become_nan() {
        let file = write_temp(
            "date,open,high,low,close,volume,percent_change\n\
             2024-01-02,100.0,102.0,99.0,,1000,\n",
        );
        let bars = load_csv(file.path()).unwrap();

        assert!(bars[0].close.is_nan());
        assert!(bars[0].percent_change.is_nan());
        assert_eq!(bars[0].open, 100.0);
    }

    #[test]
    fn header_only_file_is_empty_error() {
        let file = write_temp("date,open,high,low,close,volume,percent_change\n");
        let result = load_csv(file.path());
        assert!(matches!(result, Err(DataError::Empty(_))));
    }

    #[test]
    fn missing_file_is_read_error() {
        let result = load_csv(Path::new("/nonexistent/bars.csv"));
        assert!(matches!(result, Err(DataError::Read(_))));
    }

    #[test]
    fn bad_date_is_parse_error() {
        let file = write_temp(
            "date,open,high,low,close,volume,percent_change\n\
             not-a-date,1,2,0,1,10,0\n",
        );
        let result = load_csv(file.path());
        assert!(matches!(result, Err(DataError::Parse(_))));
    }
}
