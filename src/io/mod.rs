//! Moving tables in and out of files.
//!
//! Reading is schema-driven: callers supply the [`crate::types::Schema`] and every cell is
//! parsed into that field's type. Schemas are never inferred.

pub mod csv;

pub use self::csv::{read_csv_from_path, read_csv_from_reader, write_csv_to_path, write_csv_to_writer};
