//! Column-name standardization.

use crate::config::TargetCase;
use crate::types::DataSet;

/// Convert a column name to `snake_case`.
///
/// Trims whitespace, replaces every run of characters outside `[0-9a-zA-Z]` with a single `_`,
/// lowercases, and strips leading/trailing underscores. The function is idempotent.
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}

/// Trim whitespace and lowercase.
pub fn to_lower_case(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Apply `case` to a single name.
pub fn standardize_name(name: &str, case: TargetCase) -> String {
    match case {
        TargetCase::Snake => to_snake_case(name),
        TargetCase::Lower => to_lower_case(name),
    }
}

/// Rename every column of `dataset` in place.
///
/// Returns the `(old, new)` pairs of renamed columns. Two names that standardize to the same
/// result are not disambiguated.
pub fn standardize_columns(dataset: &mut DataSet, case: TargetCase) -> Vec<(String, String)> {
    dataset.rename_columns(|name| standardize_name(name, case))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataType, Field, Schema};

    #[test]
    fn snake_case_examples() {
        assert_eq!(to_snake_case("First Name"), "first_name");
        assert_eq!(to_snake_case("Last-Name"), "last_name");
        assert_eq!(to_snake_case("  Total $ Amount (USD) "), "total_amount_usd");
        assert_eq!(to_snake_case("__already__snake__"), "already_snake");
        assert_eq!(to_snake_case("CamelCase"), "camelcase");
        assert_eq!(to_snake_case("über"), "ber");
        assert_eq!(to_snake_case("---"), "");
    }

    #[test]
    fn snake_case_is_idempotent() {
        for name in ["First Name", "a__b", " x-y-z ", "Ärger 2", "", "_", "A1 b2__C3"] {
            let once = to_snake_case(name);
            assert_eq!(to_snake_case(&once), once, "not idempotent for {name:?}");
        }
    }

    #[test]
    fn lower_case_only_trims_and_lowercases() {
        assert_eq!(to_lower_case("  First Name "), "first name");
        assert_eq!(to_lower_case("Last-Name"), "last-name");
        let once = to_lower_case(" ÄB c ");
        assert_eq!(to_lower_case(&once), once);
    }

    #[test]
    fn standardize_columns_renames_schema() {
        let mut ds = DataSet::new(
            Schema::new(vec![
                Field::new("First Name", DataType::Utf8),
                Field::new("age", DataType::Int64),
            ]),
            vec![],
        );
        let changed = standardize_columns(&mut ds, TargetCase::Snake);
        assert_eq!(ds.column_names(), vec!["first_name", "age"]);
        assert_eq!(changed, vec![("First Name".to_string(), "first_name".to_string())]);
    }
}
