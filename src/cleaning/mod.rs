//! The fit/transform cleaner.
//!
//! A [`Cleaner`] learns fill values and categorical encoders from one table ([`Cleaner::fit`])
//! and applies them to that or any later table ([`Cleaner::transform`]). Each call works on a
//! private copy of its input; the caller's [`DataSet`] is never mutated.
//!
//! Both phases run the same preparation first:
//!
//! 1. column-name standardization ([`columns`])
//! 2. duplicate-row removal ([`duplicates`])
//!
//! then missing-value handling ([`missing`]) and categorical encoding ([`encoding`]).
//!
//! ## Example
//!
//! ```rust
//! use rust_data_cleaner::cleaning::Cleaner;
//! use rust_data_cleaner::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let ds = DataSet::new(
//!     Schema::new(vec![
//!         Field::new("Unit Price", DataType::Float64),
//!         Field::new("Color", DataType::Utf8),
//!     ]),
//!     vec![
//!         vec![Value::Float64(1.0), Value::Utf8("red".to_string())],
//!         vec![Value::Null, Value::Utf8("blue".to_string())],
//!         vec![Value::Float64(3.0), Value::Null],
//!     ],
//! );
//!
//! let mut cleaner = Cleaner::default();
//! let out = cleaner.fit_transform(&ds)?;
//!
//! assert_eq!(out.column_names(), vec!["unit_price", "color"]);
//! assert_eq!(out.rows[1][0], Value::Float64(2.0));
//! // Codes follow sorted order: "__MISSING__" = 0, "blue" = 1, "red" = 2. The missing color
//! // was filled with the mode ("blue" wins the tie) before encoding.
//! assert_eq!(out.rows[0][1], Value::Int64(2));
//! assert_eq!(out.rows[2][1], Value::Int64(1));
//! # Ok::<(), rust_data_cleaner::CleanerError>(())
//! ```

pub mod columns;
pub mod duplicates;
pub mod encoding;
pub mod missing;
pub mod observer;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::config::{CategoryEncoding, CleanerConfig, MissingStrategy};
use crate::error::{CleanerError, CleanerResult};
use crate::types::DataSet;

pub use columns::{standardize_columns, to_lower_case, to_snake_case};
pub use duplicates::drop_duplicates;
pub use encoding::{LabelEncoder, MISSING_SENTINEL, one_hot_encode};
pub use missing::{FillValues, apply_fill_values, drop_missing_rows, learn_fill_values};
pub use observer::{
    CleaningEvent, CleaningObserver, CleaningPhase, CompositeObserver, FileObserver, StdErrObserver,
};

/// Everything a successful [`Cleaner::fit`] learns.
#[derive(Debug, Clone, Default, PartialEq)]
struct FittedState {
    fills: FillValues,
    label_encoders: BTreeMap<String, LabelEncoder>,
    /// Frozen one-hot vocabularies, in column order.
    onehot_categories: Vec<(String, Vec<String>)>,
}

/// Stateful table cleaner configured by a [`CleanerConfig`].
#[derive(Clone, Default)]
pub struct Cleaner {
    config: CleanerConfig,
    state: FittedState,
    fitted: bool,
    observer: Option<Arc<dyn CleaningObserver>>,
}

impl fmt::Debug for Cleaner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cleaner")
            .field("config", &self.config)
            .field("fitted", &self.fitted)
            .field("numeric_fill_values", &self.state.fills.numeric)
            .field("categorical_fill_values", &self.state.fills.categorical)
            .field("label_encoders", &self.state.label_encoders.len())
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl Cleaner {
    /// Create an unfitted cleaner.
    pub fn new(config: CleanerConfig) -> Self {
        Self {
            config,
            state: FittedState::default(),
            fitted: false,
            observer: None,
        }
    }

    /// Attach an observer for cleaning events (logging/metrics).
    pub fn with_observer(mut self, observer: Arc<dyn CleaningObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    /// `true` once [`Self::fit`] has succeeded.
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Learned numeric fill values, keyed by standardized column name.
    pub fn numeric_fill_values(&self) -> &BTreeMap<String, f64> {
        &self.state.fills.numeric
    }

    /// Learned categorical fill values, keyed by standardized column name.
    pub fn categorical_fill_values(&self) -> &BTreeMap<String, String> {
        &self.state.fills.categorical
    }

    /// Learned label encoders, keyed by standardized column name.
    pub fn label_encoders(&self) -> &BTreeMap<String, LabelEncoder> {
        &self.state.label_encoders
    }

    /// Frozen one-hot vocabularies (only with `freeze_onehot_categories`).
    pub fn onehot_categories(&self) -> &[(String, Vec<String>)] {
        &self.state.onehot_categories
    }

    /// Learn fill values and encoders from `dataset`.
    ///
    /// Replaces any previously learned state. On error the previous state is kept.
    ///
    /// # Errors
    ///
    /// [`CleanerError::MissingColumn`] if `duplicate_subset` names a column absent from the
    /// standardized table.
    pub fn fit(&mut self, dataset: &DataSet) -> CleanerResult<&mut Self> {
        match self.fit_state(dataset) {
            Ok(state) => {
                self.state = state;
                self.fitted = true;
                Ok(self)
            }
            Err(e) => {
                self.report_error(CleaningPhase::Fit, &e);
                Err(e)
            }
        }
    }

    /// Clean a copy of `dataset` using the learned state.
    ///
    /// # Errors
    ///
    /// - [`CleanerError::NotFitted`] if [`Self::fit`] never succeeded.
    /// - [`CleanerError::MissingColumn`] for an absent `duplicate_subset` column.
    /// - [`CleanerError::UnseenCategory`] when label encoding meets a value unknown at fit time.
    pub fn transform(&self, dataset: &DataSet) -> CleanerResult<DataSet> {
        let result = self.transform_fitted(dataset);
        if let Err(e) = &result {
            self.report_error(CleaningPhase::Transform, e);
        }
        result
    }

    /// [`Self::fit`] followed by [`Self::transform`] on the same table.
    pub fn fit_transform(&mut self, dataset: &DataSet) -> CleanerResult<DataSet> {
        self.fit(dataset)?.transform(dataset)
    }

    fn fit_state(&self, dataset: &DataSet) -> CleanerResult<FittedState> {
        let start = Instant::now();
        self.emit(CleaningEvent::FitStarted {
            rows: dataset.row_count(),
            columns: dataset.column_count(),
        });

        let mut ds = self.prepare(dataset, CleaningPhase::Fit)?;
        let mut state = FittedState::default();

        match self.config.handle_missing {
            MissingStrategy::Simple => {
                state.fills = learn_fill_values(
                    &ds,
                    self.config.numeric_strategy,
                    self.config.categorical_strategy,
                    &self.config.constant_fill_value,
                );
                for (column, &value) in &state.fills.numeric {
                    self.emit(CleaningEvent::NumericFillLearned {
                        column: column.clone(),
                        value,
                    });
                }
                for (column, value) in &state.fills.categorical {
                    self.emit(CleaningEvent::CategoricalFillLearned {
                        column: column.clone(),
                        value: value.clone(),
                    });
                }
            }
            MissingStrategy::Drop => ds = self.drop_missing(&ds, CleaningPhase::Fit),
            MissingStrategy::None => {}
        }

        match self.config.encode_categories {
            CategoryEncoding::Label => {
                for (column, extra) in self.encodable_columns(&ds, &state.fills, CleaningPhase::Fit) {
                    let cells = ds.column(&column).into_iter().flatten();
                    let encoder = LabelEncoder::fit_with_extra(cells, extra);
                    self.emit(CleaningEvent::EncoderFitted {
                        column: column.clone(),
                        classes: encoder.len(),
                    });
                    state.label_encoders.insert(column, encoder);
                }
            }
            CategoryEncoding::OneHot if self.config.freeze_onehot_categories => {
                state.onehot_categories =
                    self.onehot_vocabularies(&ds, &state.fills, CleaningPhase::Fit);
            }
            CategoryEncoding::OneHot | CategoryEncoding::None => {}
        }

        self.emit(CleaningEvent::FitFinished {
            elapsed: start.elapsed(),
        });
        Ok(state)
    }

    fn transform_fitted(&self, dataset: &DataSet) -> CleanerResult<DataSet> {
        if !self.fitted {
            return Err(CleanerError::NotFitted);
        }
        let start = Instant::now();
        self.emit(CleaningEvent::TransformStarted {
            rows: dataset.row_count(),
            columns: dataset.column_count(),
        });

        let mut ds = self.prepare(dataset, CleaningPhase::Transform)?;

        match self.config.handle_missing {
            MissingStrategy::Simple => {
                let filled = apply_fill_values(&mut ds, &self.state.fills);
                self.emit(CleaningEvent::CellsImputed { filled });
            }
            MissingStrategy::Drop => ds = self.drop_missing(&ds, CleaningPhase::Transform),
            MissingStrategy::None => {}
        }

        match self.config.encode_categories {
            CategoryEncoding::Label => {
                for (column, encoder) in &self.state.label_encoders {
                    if let Some(idx) = ds.schema.index_of(column) {
                        encoder.encode_column(&mut ds, idx)?;
                    }
                }
            }
            CategoryEncoding::OneHot => {
                let vocabularies = if self.config.freeze_onehot_categories {
                    self.state.onehot_categories.clone()
                } else {
                    self.onehot_vocabularies(&ds, &FillValues::default(), CleaningPhase::Transform)
                };
                let columns = one_hot_encode(&mut ds, &vocabularies);
                self.emit(CleaningEvent::OneHotExpanded { columns });
            }
            CategoryEncoding::None => {}
        }

        self.emit(CleaningEvent::TransformFinished {
            rows: ds.row_count(),
            columns: ds.column_count(),
            elapsed: start.elapsed(),
        });
        Ok(ds)
    }

    /// Copy, standardize column names, then drop duplicate rows.
    fn prepare(&self, dataset: &DataSet, phase: CleaningPhase) -> CleanerResult<DataSet> {
        let mut ds = dataset.clone();

        if self.config.standardize_columns {
            let renamed = standardize_columns(&mut ds, self.config.target_case);
            if !renamed.is_empty() {
                self.emit(CleaningEvent::ColumnsRenamed { phase, renamed });
            }
        }

        if self.config.drop_duplicates {
            let before = ds.row_count();
            ds = drop_duplicates(&ds, self.config.duplicate_subset.as_deref())?;
            self.emit(CleaningEvent::DuplicatesDropped {
                phase,
                removed: before - ds.row_count(),
            });
        }

        Ok(ds)
    }

    fn drop_missing(&self, ds: &DataSet, phase: CleaningPhase) -> DataSet {
        let out = drop_missing_rows(ds);
        self.emit(CleaningEvent::MissingRowsDropped {
            phase,
            removed: ds.row_count() - out.row_count(),
        });
        out
    }

    /// Categorical columns within `max_unique_for_encoding`, each paired with the fill value
    /// that imputation will substitute at transform time.
    fn encodable_columns(
        &self,
        ds: &DataSet,
        fills: &FillValues,
        phase: CleaningPhase,
    ) -> Vec<(String, Option<String>)> {
        let mut out = Vec::new();
        for field in &ds.schema.fields {
            if !field.data_type.is_categorical() {
                continue;
            }
            let distinct = ds
                .column(&field.name)
                .map(encoding::distinct_categories)
                .unwrap_or_default()
                .len();
            if distinct > self.config.max_unique_for_encoding {
                self.emit(CleaningEvent::EncodingSkipped {
                    phase,
                    column: field.name.clone(),
                    distinct,
                });
                continue;
            }
            out.push((field.name.clone(), fills.categorical.get(&field.name).cloned()));
        }
        out
    }

    fn onehot_vocabularies(
        &self,
        ds: &DataSet,
        fills: &FillValues,
        phase: CleaningPhase,
    ) -> Vec<(String, Vec<String>)> {
        self.encodable_columns(ds, fills, phase)
            .into_iter()
            .map(|(column, extra)| {
                let mut vocab = ds
                    .column(&column)
                    .map(encoding::distinct_categories)
                    .unwrap_or_default();
                vocab.extend(extra);
                (column, vocab.into_iter().collect())
            })
            .collect()
    }

    fn emit(&self, event: CleaningEvent) {
        if let Some(obs) = &self.observer {
            obs.on_event(&event);
        }
    }

    fn report_error(&self, phase: CleaningPhase, error: &CleanerError) {
        if let Some(obs) = &self.observer {
            obs.on_error(phase, error);
        }
    }
}
