//! Hourly record import from CSV.
//!
//! Expected header: `year,month,day,hour,price,production`. A blank
//! `production` cell is a data gap and reads as 0.0.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::sim::types::HourlyRecord;

/// Failure to turn a CSV file into hourly records.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot open \"{path}\": {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },
    #[error("line {line}: {year}-{month:02}-{day:02} is not a calendar date")]
    InvalidDate {
        line: u64,
        year: i32,
        month: u32,
        day: u32,
    },
    #[error("line {line}: hour {hour} is outside 1-24")]
    InvalidHour { line: u64, hour: u8 },
    #[error("line {line}: price {price} is not finite")]
    InvalidPrice { line: u64, price: f64 },
    #[error("line {line}: production {production} must be finite and >= 0")]
    InvalidProduction { line: u64, production: f64 },
}

#[derive(Debug, Deserialize)]
struct Row {
    year: i32,
    month: u32,
    day: u32,
    hour: u8,
    price: f64,
    #[serde(default)]
    production: Option<f64>,
}

impl Row {
    fn into_record(self, line: u64) -> Result<HourlyRecord, ImportError> {
        let date = NaiveDate::from_ymd_opt(self.year, self.month, self.day).ok_or(
            ImportError::InvalidDate {
                line,
                year: self.year,
                month: self.month,
                day: self.day,
            },
        )?;
        if !(1..=24).contains(&self.hour) {
            return Err(ImportError::InvalidHour { line, hour: self.hour });
        }
        if !self.price.is_finite() {
            return Err(ImportError::InvalidPrice { line, price: self.price });
        }
        let production = self.production.unwrap_or(0.0);
        if !production.is_finite() || production < 0.0 {
            return Err(ImportError::InvalidProduction { line, production });
        }
        Ok(HourlyRecord {
            date,
            hour: self.hour,
            price: self.price,
            solar_production: production,
        })
    }
}

/// Reads records from a CSV file in file order.
///
/// # Errors
///
/// Returns an [`ImportError`] if the file cannot be opened or any row is
/// malformed.
pub fn read_records_csv(path: &Path) -> Result<Vec<HourlyRecord>, ImportError> {
    let file = File::open(path).map_err(|source| ImportError::Open {
        path: path.display().to_string(),
        source,
    })?;
    read_records(io::BufReader::new(file))
}

/// Reads records from any CSV source in input order.
///
/// # Errors
///
/// Returns the first row that fails to parse or validate, with its line number.
pub fn read_records(reader: impl Read) -> Result<Vec<HourlyRecord>, ImportError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|source| ImportError::Csv { line: 1, source })?
        .clone();
    let mut records = Vec::new();
    let mut raw = csv::StringRecord::new();

    loop {
        let line = rdr.position().line();
        let more = rdr
            .read_record(&mut raw)
            .map_err(|source| ImportError::Csv { line, source })?;
        if !more {
            break;
        }
        let line = raw.position().map_or(line, csv::Position::line);
        let row: Row = raw
            .deserialize(Some(&headers))
            .map_err(|source| ImportError::Csv { line, source })?;
        records.push(row.into_record(line)?);
    }

    Ok(records)
}

/// Sorts records by date and hour and drops duplicate hours.
///
/// When the same `(date, hour)` appears more than once the last occurrence in
/// input order is kept.
pub fn normalize(mut records: Vec<HourlyRecord>) -> Vec<HourlyRecord> {
    // Stable sort keeps input order within a key, so the last of a run wins.
    records.sort_by_key(|r| (r.date, r.hour));
    let mut out: Vec<HourlyRecord> = Vec::with_capacity(records.len());
    for record in records {
        match out.last_mut() {
            Some(prev) if (prev.date, prev.hour) == (record.date, record.hour) => *prev = record,
            _ => out.push(record),
        }
    }
    out
}

/// Keeps records dated within `[start, end]`. Either bound may be open.
pub fn filter_date_range(
    records: Vec<HourlyRecord>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<HourlyRecord> {
    records
        .into_iter()
        .filter(|r| start.is_none_or(|s| r.date >= s) && end.is_none_or(|e| r.date <= e))
        .collect()
}
