//! Categorical encoding: label codes and one-hot indicator columns.

use std::collections::{BTreeSet, HashMap};

use crate::error::{CleanerError, CleanerResult};
use crate::types::{DataSet, DataType, Field, Value};

/// Placeholder category substituted for missing cells before label encoding.
pub const MISSING_SENTINEL: &str = "__MISSING__";

/// Category string for a cell: its string form, or [`MISSING_SENTINEL`] when missing.
pub fn category_key(value: &Value) -> String {
    value
        .to_category_string()
        .unwrap_or_else(|| MISSING_SENTINEL.to_string())
}

/// Sorted distinct non-missing categories of a column.
pub fn distinct_categories<'a>(values: impl IntoIterator<Item = &'a Value>) -> BTreeSet<String> {
    values
        .into_iter()
        .filter_map(Value::to_category_string)
        .collect()
}

/// Bijection between category strings and integer codes.
///
/// Codes are assigned in ascending order of the category strings, so fitting the same values
/// always yields the same codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoder {
    classes: Vec<String>,
    codes: HashMap<String, i64>,
}

impl LabelEncoder {
    /// Fit on the cells of a column. Missing cells contribute [`MISSING_SENTINEL`].
    pub fn fit<'a>(values: impl IntoIterator<Item = &'a Value>) -> Self {
        Self::fit_with_extra(values, std::iter::empty::<String>())
    }

    /// Fit on the cells of a column plus additional categories.
    pub fn fit_with_extra<'a>(
        values: impl IntoIterator<Item = &'a Value>,
        extra: impl IntoIterator<Item = String>,
    ) -> Self {
        let set: BTreeSet<String> = values.into_iter().map(category_key).chain(extra).collect();
        let classes: Vec<String> = set.into_iter().collect();
        let codes = classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i as i64))
            .collect();
        Self { classes, codes }
    }

    /// Known categories, in code order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of known categories.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// `true` if the encoder knows no category.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Code of `category`, if it was seen during fit.
    pub fn encode(&self, category: &str) -> Option<i64> {
        self.codes.get(category).copied()
    }

    /// Category for `code`, if the code is in range.
    pub fn decode(&self, code: i64) -> Option<&str> {
        usize::try_from(code)
            .ok()
            .and_then(|i| self.classes.get(i))
            .map(String::as_str)
    }

    /// Replace the column at `idx` with its integer codes, in place.
    ///
    /// # Errors
    ///
    /// [`CleanerError::UnseenCategory`] on the first value unknown to the encoder. The dataset
    /// is left unchanged in that case.
    pub fn encode_column(&self, dataset: &mut DataSet, idx: usize) -> CleanerResult<()> {
        let codes = dataset
            .rows
            .iter()
            .map(|row| {
                let key = category_key(&row[idx]);
                self.encode(&key).ok_or_else(|| CleanerError::UnseenCategory {
                    column: dataset.schema.fields[idx].name.clone(),
                    value: key,
                })
            })
            .collect::<CleanerResult<Vec<i64>>>()?;

        for (row, code) in dataset.rows.iter_mut().zip(codes) {
            row[idx] = Value::Int64(code);
        }
        dataset.schema.fields[idx].data_type = DataType::Int64;
        Ok(())
    }
}

/// Expand categorical columns into boolean indicator columns.
///
/// `vocabularies` pairs a column name with the categories that get an indicator column named
/// `{column}_{category}`. Each listed column is dropped; indicator columns are appended after
/// the remaining columns, grouped by source column in the order given. A cell whose category is
/// not in the vocabulary (or is missing) yields `false` in every indicator. Names absent from
/// `dataset` are skipped.
///
/// Returns the names of the added columns.
pub fn one_hot_encode(dataset: &mut DataSet, vocabularies: &[(String, Vec<String>)]) -> Vec<String> {
    let mut drop_idxs = Vec::new();
    let mut indicators: Vec<(Field, Vec<Value>)> = Vec::new();

    for (column, categories) in vocabularies {
        let Some(idx) = dataset.schema.index_of(column) else {
            continue;
        };
        let keys: Vec<Option<String>> = dataset
            .rows
            .iter()
            .map(|row| row[idx].to_category_string())
            .collect();
        for category in categories {
            let values = keys
                .iter()
                .map(|k| Value::Bool(k.as_deref() == Some(category.as_str())))
                .collect();
            indicators.push((Field::new(format!("{column}_{category}"), DataType::Bool), values));
        }
        drop_idxs.push(idx);
    }

    drop_idxs.sort_unstable();
    drop_idxs.dedup();
    for idx in drop_idxs.into_iter().rev() {
        dataset.drop_column(idx);
    }

    let mut added = Vec::with_capacity(indicators.len());
    for (field, values) in indicators {
        added.push(field.name.clone());
        dataset.push_column(field, values);
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Schema;

    fn colors(xs: &[Option<&str>]) -> DataSet {
        DataSet::new(
            Schema::new(vec![
                Field::new("id", DataType::Int64),
                Field::new("color", DataType::Utf8),
            ]),
            xs.iter()
                .enumerate()
                .map(|(i, c)| {
                    vec![
                        Value::Int64(i as i64),
                        c.map(|s| Value::Utf8(s.to_string())).unwrap_or(Value::Null),
                    ]
                })
                .collect(),
        )
    }

    #[test]
    fn label_codes_follow_sorted_order() {
        let ds = colors(&[Some("red"), Some("blue"), Some("red")]);
        let enc = LabelEncoder::fit(ds.column("color").unwrap());
        assert_eq!(enc.classes(), &["blue".to_string(), "red".to_string()]);
        assert_eq!(enc.encode("blue"), Some(0));
        assert_eq!(enc.encode("red"), Some(1));
        assert_eq!(enc.decode(1), Some("red"));
        assert_eq!(enc.decode(-1), None);
        assert_eq!(enc.encode("green"), None);
    }

    #[test]
    fn missing_cells_use_the_sentinel() {
        let ds = colors(&[Some("red"), None]);
        let enc = LabelEncoder::fit(ds.column("color").unwrap());
        assert!(enc.encode(MISSING_SENTINEL).is_some());
        assert_eq!(enc.len(), 2);

        let mut out = ds.clone();
        enc.encode_column(&mut out, 1).unwrap();
        assert_eq!(out.schema.fields[1].data_type, DataType::Int64);
        assert_eq!(out.rows[1][1], Value::Int64(enc.encode(MISSING_SENTINEL).unwrap()));
    }

    #[test]
    fn extra_categories_join_the_vocabulary() {
        let ds = colors(&[Some("red")]);
        let enc = LabelEncoder::fit_with_extra(ds.column("color").unwrap(), ["Unknown".to_string()]);
        assert_eq!(enc.classes(), &["Unknown".to_string(), "red".to_string()]);
    }

    #[test]
    fn unseen_value_fails_and_leaves_column_unchanged() {
        let fit_ds = colors(&[Some("red"), Some("blue")]);
        let enc = LabelEncoder::fit(fit_ds.column("color").unwrap());

        let mut ds = colors(&[Some("red"), Some("green")]);
        let before = ds.clone();
        let err = enc.encode_column(&mut ds, 1).unwrap_err();
        match err {
            CleanerError::UnseenCategory { column, value } => {
                assert_eq!(column, "color");
                assert_eq!(value, "green");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(ds, before);
    }

    #[test]
    fn one_hot_replaces_column_with_indicators() {
        let mut ds = colors(&[Some("red"), Some("blue"), None]);
        let vocab = distinct_categories(ds.column("color").unwrap());
        let added = one_hot_encode(&mut ds, &[("color".to_string(), vocab.into_iter().collect())]);

        assert_eq!(added, vec!["color_blue".to_string(), "color_red".to_string()]);
        assert_eq!(ds.column_names(), vec!["id", "color_blue", "color_red"]);
        assert_eq!(ds.rows[0], vec![Value::Int64(0), Value::Bool(false), Value::Bool(true)]);
        assert_eq!(ds.rows[2], vec![Value::Int64(2), Value::Bool(false), Value::Bool(false)]);
        assert!(ds.schema.fields[1..].iter().all(|f| f.data_type == DataType::Bool));
    }

    #[test]
    fn one_hot_with_fixed_vocabulary_ignores_unknown_values() {
        let mut ds = colors(&[Some("green")]);
        one_hot_encode(&mut ds, &[("color".to_string(), vec!["red".to_string()])]);
        assert_eq!(ds.column_names(), vec!["id", "color_red"]);
        assert_eq!(ds.rows[0][1], Value::Bool(false));
    }
}
