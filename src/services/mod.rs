// Service exports
pub mod roster_csv;

pub use roster_csv::{load_roster, parse_records, IngestError};
