//! CSV results tables.

mod read;

pub(crate) use read::read_records_csv;
pub use read::records_from_csv_str;
