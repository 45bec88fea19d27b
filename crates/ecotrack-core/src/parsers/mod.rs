//! Parsers for ecotrack input files

pub mod filters;
pub mod records;

pub use filters::RecordFilter;
pub use records::RecordsParser;
