//! CSV export of the hourly ledger.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use chrono::Datelike;

use crate::sim::types::LedgerEntry;

const HEADER: &str = "year,month,day,hour,price,solar_production,charge,discharge,\
                      state_of_charge,net_balance,solar_only_revenue,\
                      with_battery_revenue,difference";

/// Exports the ledger to a CSV file at the given path.
///
/// Writes a header row followed by one row per entry. Produces deterministic
/// output for identical inputs.
///
/// # Arguments
///
/// * `ledger` - Entries from a simulation run
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_ledger_csv(ledger: &[LedgerEntry], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_ledger_csv(ledger, buf)
}

/// Writes the ledger as CSV to any writer.
///
/// Prices and revenues are written with 2 decimals, energies with 4.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_ledger_csv(ledger: &[LedgerEntry], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for e in ledger {
        wtr.write_record(&[
            e.date.year().to_string(),
            e.date.month().to_string(),
            e.date.day().to_string(),
            e.hour.to_string(),
            format!("{:.2}", e.price),
            format!("{:.4}", e.solar_production),
            format!("{:.4}", e.charge),
            format!("{:.4}", e.discharge),
            format!("{:.4}", e.state_of_charge),
            format!("{:.4}", e.net_balance),
            format!("{:.2}", e.solar_only_revenue),
            format!("{:.2}", e.with_battery_revenue),
            format!("{:.2}", e.difference()),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(hour: u8, charge: f64, discharge: f64) -> LedgerEntry {
        let price = 40.0;
        let solar = 2.0;
        let net = solar - charge + discharge;
        LedgerEntry {
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            hour,
            price,
            solar_production: solar,
            charge,
            discharge,
            state_of_charge: charge,
            net_balance: net,
            solar_only_revenue: solar * price,
            with_battery_revenue: net * price,
        }
    }

    #[test]
    fn header_and_row_count() {
        let ledger = vec![entry(1, 1.0, 0.0), entry(2, 0.0, 0.5)];
        let mut buf = Vec::new();
        write_ledger_csv(&ledger, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("year,month,day,hour,price"));
        assert!(lines[0].ends_with("with_battery_revenue,difference"));
        assert_eq!(lines[0].split(',').count(), lines[1].split(',').count());
    }

    #[test]
    fn formats_values() {
        let mut buf = Vec::new();
        write_ledger_csv(&[entry(7, 1.0, 0.0)], &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let row = out.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "2024,6,3,7,40.00,2.0000,1.0000,0.0000,1.0000,1.0000,80.00,40.00,-40.00"
        );
    }

    #[test]
    fn deterministic() {
        let ledger = vec![entry(1, 1.0, 0.0), entry(5, 0.0, 0.9)];
        let mut a = Vec::new();
        let mut b = Vec::new();
        write_ledger_csv(&ledger, &mut a).unwrap();
        write_ledger_csv(&ledger, &mut b).unwrap();
        assert_eq!(a, b);
    }
}
