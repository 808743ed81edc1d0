//! Core data model types.
//!
//! Cleaning operates on an in-memory [`DataSet`]: a [`Schema`] (a list of typed [`Field`]s) plus
//! row-major storage of typed [`Value`]s.

use std::fmt;

/// Logical data type for a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
}

impl DataType {
    /// `true` for [`DataType::Int64`] and [`DataType::Float64`].
    pub fn is_numeric(self) -> bool {
        matches!(self, DataType::Int64 | DataType::Float64)
    }

    /// `true` for columns treated as categorical text ([`DataType::Utf8`]).
    ///
    /// Booleans are neither numeric nor categorical: they are never imputed or encoded.
    pub fn is_categorical(self) -> bool {
        matches!(self, DataType::Utf8)
    }
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// An ordered list of fields describing the shape of a [`DataSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    ///
    /// If several fields share the name, the first one wins.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A single typed value in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// `true` for [`Value::Null`] and for a `NaN` float.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float64(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Numeric view of the value, if it is a non-missing number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    /// String form used when a value is treated as a category label.
    ///
    /// Returns `None` for missing values.
    pub fn to_category_string(&self) -> Option<String> {
        match self {
            v if v.is_missing() => None,
            Value::Utf8(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Utf8(s) => f.write_str(s),
        }
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the dataset.
    pub fn column_count(&self) -> usize {
        self.schema.fields.len()
    }

    /// Column names in schema order.
    pub fn column_names(&self) -> Vec<&str> {
        self.schema.field_names().collect()
    }

    /// Iterate the cells of the column named `name`, or `None` if there is no such column.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Value>> {
        let idx = self.schema.index_of(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Create a new dataset containing only rows that match `predicate`.
    ///
    /// The returned dataset preserves the original schema.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Rename every column through `rename`, in place.
    ///
    /// Returns the `(old, new)` pairs for names that actually changed.
    pub fn rename_columns<F>(&mut self, mut rename: F) -> Vec<(String, String)>
    where
        F: FnMut(&str) -> String,
    {
        let mut changed = Vec::new();
        for field in &mut self.schema.fields {
            let new_name = rename(&field.name);
            if new_name != field.name {
                let old = std::mem::replace(&mut field.name, new_name.clone());
                changed.push((old, new_name));
            }
        }
        changed
    }

    /// Remove the column at `idx`, returning its field.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds.
    pub fn drop_column(&mut self, idx: usize) -> Field {
        for row in &mut self.rows {
            row.remove(idx);
        }
        self.schema.fields.remove(idx)
    }

    /// Append a column at the end of the schema.
    ///
    /// # Panics
    ///
    /// Panics if `values.len()` differs from the row count.
    pub fn push_column(&mut self, field: Field, values: Vec<Value>) {
        assert!(
            values.len() == self.rows.len(),
            "column '{}' has {} values but dataset has {} rows",
            field.name,
            values.len(),
            self.rows.len()
        );
        for (row, v) in self.rows.iter_mut().zip(values) {
            row.push(v);
        }
        self.schema.fields.push(field);
    }
}

#[cfg(test)]
mod tests {
    use super::{DataSet, DataType, Field, Schema, Value};

    fn sample_dataset() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new("active", DataType::Bool),
            Field::new("name", DataType::Utf8),
        ]);

        let rows = vec![
            vec![Value::Int64(1), Value::Bool(true), Value::Utf8("a".to_string())],
            vec![Value::Int64(2), Value::Bool(false), Value::Null],
            vec![Value::Int64(3), Value::Bool(true), Value::Utf8("c".to_string())],
        ];

        DataSet::new(schema, rows)
    }

    #[test]
    fn schema_index_of_works() {
        let ds = sample_dataset();
        assert_eq!(ds.schema.index_of("id"), Some(0));
        assert_eq!(ds.schema.index_of("name"), Some(2));
        assert_eq!(ds.schema.index_of("missing"), None);
    }

    #[test]
    fn missing_values_include_nan() {
        assert!(Value::Null.is_missing());
        assert!(Value::Float64(f64::NAN).is_missing());
        assert!(!Value::Float64(0.0).is_missing());
        assert!(!Value::Utf8(String::new()).is_missing());
        assert_eq!(Value::Float64(f64::NAN).as_f64(), None);
        assert_eq!(Value::Int64(4).as_f64(), Some(4.0));
    }

    #[test]
    fn category_strings() {
        assert_eq!(Value::Int64(3).to_category_string().as_deref(), Some("3"));
        assert_eq!(Value::Float64(2.5).to_category_string().as_deref(), Some("2.5"));
        assert_eq!(Value::Bool(true).to_category_string().as_deref(), Some("true"));
        assert_eq!(Value::Null.to_category_string(), None);
    }

    #[test]
    fn column_iterates_cells() {
        let ds = sample_dataset();
        let names: Vec<&Value> = ds.column("name").unwrap().collect();
        assert_eq!(names.len(), 3);
        assert_eq!(names[1], &Value::Null);
        assert!(ds.column("nope").is_none());
    }

    #[test]
    fn rename_columns_reports_changes_only() {
        let mut ds = sample_dataset();
        let changed = ds.rename_columns(|n| if n == "id" { "ID".to_string() } else { n.to_string() });
        assert_eq!(changed, vec![("id".to_string(), "ID".to_string())]);
        assert_eq!(ds.column_names(), vec!["ID", "active", "name"]);
    }

    #[test]
    fn drop_and_push_columns_keep_rows_aligned() {
        let mut ds = sample_dataset();
        let dropped = ds.drop_column(1);
        assert_eq!(dropped.name, "active");
        assert_eq!(ds.rows[0], vec![Value::Int64(1), Value::Utf8("a".to_string())]);

        ds.push_column(
            Field::new("flag", DataType::Bool),
            vec![Value::Bool(true), Value::Bool(false), Value::Bool(true)],
        );
        assert_eq!(ds.column_count(), 3);
        assert_eq!(ds.rows[1][2], Value::Bool(false));
    }

    #[test]
    fn filter_rows_preserves_schema_and_original() {
        let ds = sample_dataset();
        let out = ds.filter_rows(|row| matches!(row[0], Value::Int64(v) if v > 1));
        assert_eq!(out.schema, ds.schema);
        assert_eq!(out.row_count(), 2);
        assert_eq!(ds.row_count(), 3);
    }
}
