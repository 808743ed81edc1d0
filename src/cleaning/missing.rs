//! Missing-value statistics, imputation and row dropping.

use std::collections::BTreeMap;

use crate::config::{CategoricalStrategy, NumericStrategy};
use crate::types::{DataSet, DataType, Value};

/// Mean of the non-missing numeric cells, or `None` when there are none.
pub fn mean<'a>(values: impl IntoIterator<Item = &'a Value>) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .filter_map(Value::as_f64)
        .fold((0.0_f64, 0_usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Median of the non-missing numeric cells, or `None` when there are none.
///
/// With an even count this is the mean of the two middle values.
pub fn median<'a>(values: impl IntoIterator<Item = &'a Value>) -> Option<f64> {
    let mut xs: Vec<f64> = values.into_iter().filter_map(Value::as_f64).collect();
    if xs.is_empty() {
        return None;
    }
    xs.sort_by(f64::total_cmp);
    let mid = xs.len() / 2;
    if xs.len() % 2 == 0 {
        Some((xs[mid - 1] + xs[mid]) / 2.0)
    } else {
        Some(xs[mid])
    }
}

/// Most frequent non-missing category, or `None` when there is none.
///
/// Ties resolve to the smallest value in lexicographic order.
pub fn mode<'a>(values: impl IntoIterator<Item = &'a Value>) -> Option<String> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for s in values.into_iter().filter_map(Value::to_category_string) {
        *counts.entry(s).or_default() += 1;
    }
    let mut best: Option<(String, usize)> = None;
    for (value, count) in counts {
        if best.as_ref().is_none_or(|(_, c)| count > *c) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Fill values learned from a table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillValues {
    /// Numeric column name → fill scalar.
    pub numeric: BTreeMap<String, f64>,
    /// Categorical column name → fill string.
    pub categorical: BTreeMap<String, String>,
}

/// Learn per-column fill values from `dataset`.
///
/// Numeric columns without any non-missing value learn nothing. Categorical columns without any
/// non-missing value fall back to `constant_fill_value`. Boolean columns are skipped.
///
/// When several columns share a name only the first one is learned from, since lookups by
/// name always resolve to it.
pub fn learn_fill_values(
    dataset: &DataSet,
    numeric_strategy: NumericStrategy,
    categorical_strategy: CategoricalStrategy,
    constant_fill_value: &str,
) -> FillValues {
    let mut out = FillValues::default();
    for (idx, field) in dataset.schema.fields.iter().enumerate() {
        if dataset.schema.index_of(&field.name) != Some(idx) {
            continue;
        }
        let cells = dataset.rows.iter().map(|row| &row[idx]);
        if field.data_type.is_numeric() {
            let value = match numeric_strategy {
                NumericStrategy::Mean => mean(cells),
                NumericStrategy::Median => median(cells),
            };
            if let Some(v) = value {
                out.numeric.insert(field.name.clone(), v);
            }
        } else if field.data_type.is_categorical() {
            let value = match categorical_strategy {
                CategoricalStrategy::Mode => {
                    mode(cells).unwrap_or_else(|| constant_fill_value.to_string())
                }
                CategoricalStrategy::Constant => constant_fill_value.to_string(),
            };
            out.categorical.insert(field.name.clone(), value);
        }
    }
    out
}

/// Replace missing cells of every column named in `fills`, in place.
///
/// Numeric fills apply to numeric columns and categorical fills to text columns; a name whose
/// column has a different type, or that is absent, is skipped. An integer column filled with a
/// non-integral value is promoted to [`DataType::Float64`].
///
/// Returns the number of cells that were filled.
pub fn apply_fill_values(dataset: &mut DataSet, fills: &FillValues) -> usize {
    let mut filled = 0;

    for (name, &value) in &fills.numeric {
        let Some(idx) = dataset.schema.index_of(name) else {
            continue;
        };
        let data_type = dataset.schema.fields[idx].data_type;
        if !data_type.is_numeric() || !dataset.rows.iter().any(|r| r[idx].is_missing()) {
            continue;
        }
        let fill = if data_type == DataType::Int64 && value.fract() == 0.0 {
            Value::Int64(value as i64)
        } else {
            if data_type == DataType::Int64 {
                promote_to_float(dataset, idx);
            }
            Value::Float64(value)
        };
        filled += fill_column(dataset, idx, &fill);
    }

    for (name, value) in &fills.categorical {
        let Some(idx) = dataset.schema.index_of(name) else {
            continue;
        };
        if dataset.schema.fields[idx].data_type.is_categorical() {
            filled += fill_column(dataset, idx, &Value::Utf8(value.clone()));
        }
    }

    filled
}

fn fill_column(dataset: &mut DataSet, idx: usize, fill: &Value) -> usize {
    let mut n = 0;
    for row in &mut dataset.rows {
        if row[idx].is_missing() {
            row[idx] = fill.clone();
            n += 1;
        }
    }
    n
}

fn promote_to_float(dataset: &mut DataSet, idx: usize) {
    for row in &mut dataset.rows {
        if let Value::Int64(v) = row[idx] {
            row[idx] = Value::Float64(v as f64);
        }
    }
    dataset.schema.fields[idx].data_type = DataType::Float64;
}

/// Returns a new [`DataSet`] without rows that hold a missing value in any column.
pub fn drop_missing_rows(dataset: &DataSet) -> DataSet {
    dataset.filter_rows(|row| !row.iter().any(Value::is_missing))
}
