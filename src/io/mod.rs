//! CSV input of hourly records and CSV output of the ledger.

pub mod export;
pub mod import;

pub use export::{export_ledger_csv, write_ledger_csv};
pub use import::{ImportError, filter_date_range, normalize, read_records, read_records_csv};
