//! Duplicate-row removal.

use std::collections::HashSet;

use crate::error::{CleanerError, CleanerResult};
use crate::types::{DataSet, Value};

/// Hashable view of a cell. Missing cells (including `NaN`) compare equal to each other.
#[derive(Debug, PartialEq, Eq, Hash)]
enum CellKey<'a> {
    Missing,
    Int(i64),
    Float(u64),
    Bool(bool),
    Text(&'a str),
}

impl<'a> From<&'a Value> for CellKey<'a> {
    fn from(v: &'a Value) -> Self {
        match v {
            v if v.is_missing() => CellKey::Missing,
            Value::Int64(i) => CellKey::Int(*i),
            // -0.0 and 0.0 are the same value.
            Value::Float64(f) => CellKey::Float(if *f == 0.0 { 0 } else { f.to_bits() }),
            Value::Bool(b) => CellKey::Bool(*b),
            Value::Utf8(s) => CellKey::Text(s),
            Value::Null => CellKey::Missing,
        }
    }
}

/// Resolve `subset` to column indexes, or all columns when `None`.
fn key_columns(dataset: &DataSet, subset: Option<&[String]>) -> CleanerResult<Vec<usize>> {
    match subset {
        None => Ok((0..dataset.column_count()).collect()),
        Some(names) => names
            .iter()
            .map(|name| {
                dataset
                    .schema
                    .index_of(name)
                    .ok_or_else(|| CleanerError::MissingColumn {
                        column: name.clone(),
                        available: dataset.column_names().iter().map(|s| s.to_string()).collect(),
                    })
            })
            .collect(),
    }
}

/// Returns a new [`DataSet`] without rows that repeat an earlier row.
///
/// Rows are compared over `subset` (or every column when `None`). The first occurrence of each
/// group is kept and row order is preserved.
///
/// # Errors
///
/// [`CleanerError::MissingColumn`] if `subset` names a column absent from `dataset`.
pub fn drop_duplicates(dataset: &DataSet, subset: Option<&[String]>) -> CleanerResult<DataSet> {
    let cols = key_columns(dataset, subset)?;
    let mut seen: HashSet<Vec<CellKey<'_>>> = HashSet::with_capacity(dataset.row_count());
    let mut rows = Vec::with_capacity(dataset.row_count());
    for row in &dataset.rows {
        let key: Vec<CellKey<'_>> = cols.iter().map(|&i| CellKey::from(&row[i])).collect();
        if seen.insert(key) {
            rows.push(row.clone());
        }
    }

    Ok(DataSet::new(dataset.schema.clone(), rows))
}

#[cfg(test)]
mod tests {
    use super::drop_duplicates;
    use crate::error::CleanerError;
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn ab(rows: Vec<(Value, &str)>) -> DataSet {
        DataSet::new(
            Schema::new(vec![
                Field::new("a", DataType::Int64),
                Field::new("b", DataType::Utf8),
            ]),
            rows.into_iter()
                .map(|(a, b)| vec![a, Value::Utf8(b.to_string())])
                .collect(),
        )
    }

    #[test]
    fn keeps_first_occurrence_of_full_row_duplicates() {
        let ds = ab(vec![
            (Value::Int64(1), "x"),
            (Value::Int64(1), "x"),
            (Value::Int64(2), "y"),
        ]);
        let out = drop_duplicates(&ds, None).unwrap();
        assert_eq!(out.row_count(), 2);
        assert_eq!(out.rows[0], ds.rows[0]);
        assert_eq!(out.rows[1], ds.rows[2]);
    }

    #[test]
    fn interleaved_duplicates_keep_row_order_and_schema() {
        let ds = ab(vec![
            (Value::Int64(3), "z"),
            (Value::Int64(1), "x"),
            (Value::Int64(3), "z"),
            (Value::Int64(2), "y"),
            (Value::Int64(1), "x"),
        ]);
        let out = drop_duplicates(&ds, None).unwrap();
        assert_eq!(out.schema, ds.schema);
        assert_eq!(out.rows, vec![ds.rows[0].clone(), ds.rows[1].clone(), ds.rows[3].clone()]);
    }

    #[test]
    fn subset_compares_only_named_columns() {
        let ds = ab(vec![
            (Value::Int64(1), "x"),
            (Value::Int64(1), "y"),
            (Value::Int64(2), "x"),
        ]);
        let out = drop_duplicates(&ds, Some(&["a".to_string()])).unwrap();
        assert_eq!(out.row_count(), 2);
        assert_eq!(out.rows[1][1], Value::Utf8("x".to_string()));
        assert_eq!(out.rows[1][0], Value::Int64(2));
    }

    #[test]
    fn missing_cells_are_equal_for_duplicate_detection() {
        let schema = Schema::new(vec![Field::new("v", DataType::Float64)]);
        let ds = DataSet::new(
            schema,
            vec![
                vec![Value::Null],
                vec![Value::Float64(f64::NAN)],
                vec![Value::Float64(0.0)],
                vec![Value::Float64(-0.0)],
            ],
        );
        let out = drop_duplicates(&ds, None).unwrap();
        assert_eq!(out.row_count(), 2);
    }

    #[test]
    fn unknown_subset_column_is_lookup_error() {
        let ds = ab(vec![(Value::Int64(1), "x")]);
        let err = drop_duplicates(&ds, Some(&["zzz".to_string()])).unwrap_err();
        match err {
            CleanerError::MissingColumn { column, available } => {
                assert_eq!(column, "zzz");
                assert_eq!(available, vec!["a".to_string(), "b".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
