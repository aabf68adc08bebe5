//! Data models for the catalog.

mod record;
mod record_set;

pub use record::Record;
pub use record_set::RecordSet;
