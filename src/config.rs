//! Cleaner configuration.
//!
//! [`CleanerConfig`] is a plain record with a [`Default`] for every option. Options that select a
//! behavior are closed enums; each parses from its lowercase name via [`std::str::FromStr`], and
//! an unknown name is a [`CleanerError::Configuration`].
//!
//! ```rust
//! use rust_data_cleaner::config::{CategoryEncoding, CleanerConfig, NumericStrategy};
//!
//! let config = CleanerConfig {
//!     numeric_strategy: NumericStrategy::Mean,
//!     encode_categories: "onehot".parse().unwrap(),
//!     ..Default::default()
//! };
//! assert_eq!(config.encode_categories, CategoryEncoding::OneHot);
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{CleanerError, CleanerResult};

/// How missing values are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingStrategy {
    /// Learn per-column fill values during fit and substitute them during transform.
    #[default]
    Simple,
    /// Remove every row that holds a missing value.
    Drop,
    /// Leave missing values in place.
    None,
}

/// Statistic used to fill numeric columns under [`MissingStrategy::Simple`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericStrategy {
    Mean,
    #[default]
    Median,
}

/// Fill value used for categorical columns under [`MissingStrategy::Simple`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoricalStrategy {
    /// Most frequent non-missing value.
    #[default]
    Mode,
    /// Always [`CleanerConfig::constant_fill_value`].
    Constant,
}

/// Target form for standardized column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetCase {
    #[default]
    Snake,
    Lower,
}

/// How categorical columns are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryEncoding {
    /// Replace each value by a stable integer code learned during fit.
    #[default]
    Label,
    /// Expand each column into boolean indicator columns.
    OneHot,
    /// Leave categorical columns as text.
    None,
}

fn parse_choice<T: Copy>(
    option: &'static str,
    expected: &'static str,
    choices: &[(&str, T)],
    raw: &str,
) -> CleanerResult<T> {
    let wanted = raw.trim().to_ascii_lowercase();
    choices
        .iter()
        .find(|(name, _)| *name == wanted)
        .map(|(_, v)| *v)
        .ok_or_else(|| CleanerError::Configuration {
            option,
            value: raw.to_string(),
            expected,
        })
}

impl FromStr for MissingStrategy {
    type Err = CleanerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(
            "handle_missing",
            "simple, drop, none",
            &[("simple", Self::Simple), ("drop", Self::Drop), ("none", Self::None)],
            s,
        )
    }
}

impl FromStr for NumericStrategy {
    type Err = CleanerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(
            "numeric_strategy",
            "mean, median",
            &[("mean", Self::Mean), ("median", Self::Median)],
            s,
        )
    }
}

impl FromStr for CategoricalStrategy {
    type Err = CleanerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(
            "categorical_strategy",
            "mode, constant",
            &[("mode", Self::Mode), ("constant", Self::Constant)],
            s,
        )
    }
}

impl FromStr for TargetCase {
    type Err = CleanerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(
            "target_case",
            "snake, lower",
            &[("snake", Self::Snake), ("lower", Self::Lower)],
            s,
        )
    }
}

impl FromStr for CategoryEncoding {
    type Err = CleanerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(
            "encode_categories",
            "label, onehot, none",
            &[("label", Self::Label), ("onehot", Self::OneHot), ("none", Self::None)],
            s,
        )
    }
}

impl fmt::Display for MissingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Simple => "simple",
            Self::Drop => "drop",
            Self::None => "none",
        })
    }
}

impl fmt::Display for NumericStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mean => "mean",
            Self::Median => "median",
        })
    }
}

impl fmt::Display for CategoricalStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mode => "mode",
            Self::Constant => "constant",
        })
    }
}

impl fmt::Display for TargetCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Snake => "snake",
            Self::Lower => "lower",
        })
    }
}

impl fmt::Display for CategoryEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Label => "label",
            Self::OneHot => "onehot",
            Self::None => "none",
        })
    }
}

/// Options controlling a [`crate::cleaning::Cleaner`].
///
/// Use [`Default`] for common cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanerConfig {
    /// Remove rows that repeat an earlier row.
    pub drop_duplicates: bool,
    /// Columns compared when detecting duplicates (post-standardization names).
    ///
    /// `None` compares all columns.
    pub duplicate_subset: Option<Vec<String>>,

    /// How missing cells are handled.
    pub handle_missing: MissingStrategy,
    /// Statistic used to fill numeric columns.
    pub numeric_strategy: NumericStrategy,
    /// How categorical fill values are chosen.
    pub categorical_strategy: CategoricalStrategy,
    /// Fill value for [`CategoricalStrategy::Constant`], and the fallback for categorical
    /// columns with no non-missing value.
    pub constant_fill_value: String,

    /// Rewrite column names before any other step.
    pub standardize_columns: bool,
    /// Naming style used when `standardize_columns` is set.
    pub target_case: TargetCase,

    /// Encoding applied to categorical columns.
    pub encode_categories: CategoryEncoding,
    /// Categorical columns with more distinct non-missing values than this are left unencoded.
    pub max_unique_for_encoding: usize,
    /// Learn the one-hot vocabulary during fit and reuse it in transform.
    ///
    /// When `false`, one-hot columns are derived from the values present in each transformed
    /// table, so the output columns can differ between calls.
    pub freeze_onehot_categories: bool,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            drop_duplicates: true,
            duplicate_subset: None,
            handle_missing: MissingStrategy::Simple,
            numeric_strategy: NumericStrategy::Median,
            categorical_strategy: CategoricalStrategy::Mode,
            constant_fill_value: "Unknown".to_string(),
            standardize_columns: true,
            target_case: TargetCase::Snake,
            encode_categories: CategoryEncoding::Label,
            max_unique_for_encoding: 30,
            freeze_onehot_categories: false,
        }
    }
}

/// JSON shape of a [`CleanerConfig`]; enum options arrive as strings and are parsed afterwards.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawCleanerConfig {
    drop_duplicates: Option<bool>,
    duplicate_subset: Option<Vec<String>>,
    handle_missing: Option<String>,
    numeric_strategy: Option<String>,
    categorical_strategy: Option<String>,
    constant_fill_value: Option<String>,
    standardize_columns: Option<bool>,
    target_case: Option<String>,
    encode_categories: Option<String>,
    max_unique_for_encoding: Option<usize>,
    freeze_onehot_categories: Option<bool>,
}

fn parse_or<T: FromStr<Err = CleanerError>>(raw: Option<String>, default: T) -> CleanerResult<T> {
    match raw {
        Some(s) => s.parse(),
        None => Ok(default),
    }
}

impl CleanerConfig {
    /// Load a configuration from a JSON object.
    ///
    /// Absent keys take their defaults. Unknown keys are a [`CleanerError::Json`] error; an enum
    /// option holding an unknown name is a [`CleanerError::Configuration`] error.
    ///
    /// ```rust
    /// use rust_data_cleaner::config::{CleanerConfig, MissingStrategy};
    ///
    /// let config = CleanerConfig::from_json_str(r#"{"handle_missing": "drop"}"#).unwrap();
    /// assert_eq!(config.handle_missing, MissingStrategy::Drop);
    /// assert!(config.drop_duplicates);
    /// ```
    pub fn from_json_str(input: &str) -> CleanerResult<Self> {
        let raw: RawCleanerConfig = serde_json::from_str(input)?;
        let d = Self::default();
        Ok(Self {
            drop_duplicates: raw.drop_duplicates.unwrap_or(d.drop_duplicates),
            duplicate_subset: raw.duplicate_subset.or(d.duplicate_subset),
            handle_missing: parse_or(raw.handle_missing, d.handle_missing)?,
            numeric_strategy: parse_or(raw.numeric_strategy, d.numeric_strategy)?,
            categorical_strategy: parse_or(raw.categorical_strategy, d.categorical_strategy)?,
            constant_fill_value: raw.constant_fill_value.unwrap_or(d.constant_fill_value),
            standardize_columns: raw.standardize_columns.unwrap_or(d.standardize_columns),
            target_case: parse_or(raw.target_case, d.target_case)?,
            encode_categories: parse_or(raw.encode_categories, d.encode_categories)?,
            max_unique_for_encoding: raw
                .max_unique_for_encoding
                .unwrap_or(d.max_unique_for_encoding),
            freeze_onehot_categories: raw
                .freeze_onehot_categories
                .unwrap_or(d.freeze_onehot_categories),
        })
    }

    /// Load a configuration from a JSON file. See [`Self::from_json_str`].
    pub fn from_json_path(path: impl AsRef<Path>) -> CleanerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
