//! CSV reading and writing.

use std::io::{Read, Write};
use std::path::Path;

use crate::error::{CleanerError, CleanerResult};
use crate::types::{DataSet, DataType, Schema, Value};

/// Read a CSV file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - CSV must have headers.
/// - Headers must contain all schema fields (order can differ); extra columns are ignored.
/// - Each value is parsed according to the schema field type; empty cells become [`Value::Null`].
pub fn read_csv_from_path(path: impl AsRef<Path>, schema: &Schema) -> CleanerResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    read_csv_from_reader(&mut rdr, schema)
}

/// Read CSV data from an existing CSV reader.
pub fn read_csv_from_reader<R: Read>(
    rdr: &mut csv::Reader<R>,
    schema: &Schema,
) -> CleanerResult<DataSet> {
    let headers = rdr.headers()?.clone();

    let mut col_idxs = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        match headers.iter().position(|h| h == field.name) {
            Some(idx) => col_idxs.push(idx),
            None => {
                return Err(CleanerError::SchemaMismatch {
                    message: format!(
                        "missing required column '{field}'. headers={:?}",
                        headers.iter().collect::<Vec<_>>(),
                        field = field.name
                    ),
                });
            }
        }
    }

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // 1-based, plus the header line.
        let user_row = row_idx0 + 2;
        let record = result?;

        let mut row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for (field, &csv_idx) in schema.fields.iter().zip(col_idxs.iter()) {
            let raw = record.get(csv_idx).unwrap_or("");
            row.push(parse_typed_value(user_row, &field.name, field.data_type, raw)?);
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema.clone(), rows))
}

/// Write `dataset` as CSV with a header row. Missing values are written as empty cells.
pub fn write_csv_to_path(dataset: &DataSet, path: impl AsRef<Path>) -> CleanerResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    write_csv_to_writer(dataset, &mut wtr)
}

/// Write `dataset` to an existing CSV writer and flush it.
pub fn write_csv_to_writer<W: Write>(dataset: &DataSet, wtr: &mut csv::Writer<W>) -> CleanerResult<()> {
    wtr.write_record(dataset.schema.field_names())?;
    for row in &dataset.rows {
        wtr.write_record(row.iter().map(|v| v.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

fn parse_typed_value(
    row: usize,
    column: &str,
    data_type: DataType,
    raw: &str,
) -> CleanerResult<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }

    let parse_error = |message: String| CleanerError::ParseError {
        row,
        column: column.to_owned(),
        raw: raw.to_owned(),
        message,
    };

    match data_type {
        DataType::Utf8 => Ok(Value::Utf8(trimmed.to_owned())),
        DataType::Int64 => trimmed
            .parse::<i64>()
            .map(Value::Int64)
            .map_err(|e| parse_error(e.to_string())),
        DataType::Float64 => trimmed
            .parse::<f64>()
            .map(Value::Float64)
            .map_err(|e| parse_error(e.to_string())),
        DataType::Bool => parse_bool(trimmed).map(Value::Bool).map_err(parse_error),
    }
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Ok(true),
        "false" | "f" | "0" | "no" | "n" => Ok(false),
        _ => Err("expected bool (true/false/1/0/yes/no)".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Field;

    #[test]
    fn parse_typed_value_maps_blank_to_null() {
        assert_eq!(parse_typed_value(2, "a", DataType::Int64, "  ").unwrap(), Value::Null);
        assert_eq!(
            parse_typed_value(2, "a", DataType::Bool, "Yes").unwrap(),
            Value::Bool(true)
        );
        let err = parse_typed_value(3, "a", DataType::Float64, "abc").unwrap_err();
        assert!(err.to_string().contains("row 3 column 'a'"));
    }

    #[test]
    fn writer_emits_header_and_empty_cells() {
        let ds = DataSet::new(
            Schema::new(vec![
                Field::new("id", DataType::Int64),
                Field::new("name", DataType::Utf8),
            ]),
            vec![
                vec![Value::Int64(1), Value::Null],
                vec![Value::Int64(2), Value::Utf8("Grace".to_string())],
            ],
        );
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_csv_to_writer(&ds, &mut wtr).unwrap();
        let bytes = wtr.into_inner().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "id,name\n1,\n2,Grace\n");
    }
}
