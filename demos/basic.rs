//! Clean a tiny table with the default configuration and print the result.
//!
//! Run with: cargo run --example basic

use std::sync::Arc;

use rust_data_cleaner::cleaning::{Cleaner, StdErrObserver};
use rust_data_cleaner::io::write_csv_to_writer;
use rust_data_cleaner::types::{DataSet, DataType, Field, Schema, Value};
use rust_data_cleaner::CleanerResult;

fn main() -> CleanerResult<()> {
    let ds = DataSet::new(
        Schema::new(vec![
            Field::new("A", DataType::Float64),
            Field::new("B", DataType::Utf8),
        ]),
        vec![
            vec![Value::Float64(1.0), Value::Utf8("x".to_string())],
            vec![Value::Float64(2.0), Value::Null],
            vec![Value::Null, Value::Utf8("y".to_string())],
        ],
    );

    let mut cleaner = Cleaner::default().with_observer(Arc::new(StdErrObserver));
    let cleaned = cleaner.fit_transform(&ds)?;

    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    write_csv_to_writer(&cleaned, &mut wtr)?;

    if let Some(encoder) = cleaner.label_encoders().get("b") {
        println!("b classes: {:?}", encoder.classes());
    }
    Ok(())
}
