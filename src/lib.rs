//! `rust-data-cleaner` is a small fit/transform library for cleaning in-memory tables.
//!
//! A [`cleaning::Cleaner`] learns cleaning parameters from a training [`types::DataSet`] and
//! applies them consistently to later tables:
//!
//! - **Column names**: standardized to `snake_case` (or trimmed lowercase).
//! - **Duplicates**: repeated rows removed, over all columns or a configured subset.
//! - **Missing values**: imputed with learned mean/median/mode (or a constant), dropped, or kept.
//! - **Categories**: text columns label-encoded to stable integer codes, or one-hot expanded.
//!
//! Behavior is selected through a [`config::CleanerConfig`]. Every call works on a private copy
//! of its input, and every failure is reported as a [`CleanerError`].
//!
//! ## Quick example
//!
//! ```rust
//! use rust_data_cleaner::cleaning::Cleaner;
//! use rust_data_cleaner::config::{CategoryEncoding, CleanerConfig};
//! use rust_data_cleaner::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let train = DataSet::new(
//!     Schema::new(vec![
//!         Field::new("A", DataType::Float64),
//!         Field::new("B", DataType::Utf8),
//!     ]),
//!     vec![
//!         vec![Value::Float64(1.0), Value::Utf8("x".to_string())],
//!         vec![Value::Float64(2.0), Value::Null],
//!         vec![Value::Null, Value::Utf8("y".to_string())],
//!     ],
//! );
//!
//! let mut cleaner = Cleaner::new(CleanerConfig {
//!     encode_categories: CategoryEncoding::OneHot,
//!     ..Default::default()
//! });
//! let cleaned = cleaner.fit_transform(&train)?;
//!
//! assert_eq!(cleaned.column_names(), vec!["a", "b_x", "b_y"]);
//! assert_eq!(cleaned.rows[2][0], Value::Float64(1.5));
//! # Ok::<(), rust_data_cleaner::CleanerError>(())
//! ```
//!
//! ## Fit once, transform many
//!
//! State learned by `fit` (fill values, label encoders) is reused by every later `transform`.
//! Label encoding rejects categories that were not seen during fit:
//!
//! ```rust
//! use rust_data_cleaner::cleaning::Cleaner;
//! use rust_data_cleaner::types::{DataSet, DataType, Field, Schema, Value};
//! use rust_data_cleaner::CleanerError;
//!
//! let table = |colors: &[&str]| {
//!     DataSet::new(
//!         Schema::new(vec![Field::new("color", DataType::Utf8)]),
//!         colors.iter().map(|c| vec![Value::Utf8(c.to_string())]).collect(),
//!     )
//! };
//!
//! let mut cleaner = Cleaner::default();
//! cleaner.fit(&table(&["red", "blue"]))?;
//!
//! let err = cleaner.transform(&table(&["green"])).unwrap_err();
//! assert!(matches!(err, CleanerError::UnseenCategory { .. }));
//! # Ok::<(), CleanerError>(())
//! ```
//!
//! ## Modules
//!
//! - [`cleaning`]: the [`cleaning::Cleaner`] and its sub-policies and observer hooks
//! - [`config`]: configuration record and option enums
//! - [`types`]: schema + in-memory dataset types
//! - [`io`]: CSV reading/writing
//! - [`error`]: the crate error type

pub mod cleaning;
pub mod config;
pub mod error;
pub mod io;
pub mod types;

pub use cleaning::Cleaner;
pub use config::CleanerConfig;
pub use error::{CleanerError, CleanerResult};
