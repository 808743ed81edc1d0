use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::CleanerError;

/// Which public operation an event or failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleaningPhase {
    Fit,
    Transform,
}

impl fmt::Display for CleaningPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CleaningPhase::Fit => "fit",
            CleaningPhase::Transform => "transform",
        })
    }
}

/// Events emitted by a [`crate::cleaning::Cleaner`].
#[derive(Debug, Clone, PartialEq)]
pub enum CleaningEvent {
    /// `fit` received a table of this shape.
    FitStarted { rows: usize, columns: usize },
    /// `transform` received a table of this shape.
    TransformStarted { rows: usize, columns: usize },
    /// Column names changed by standardization, as `(old, new)` pairs.
    ColumnsRenamed { phase: CleaningPhase, renamed: Vec<(String, String)> },
    /// Rows removed as repeats of an earlier row.
    DuplicatesDropped { phase: CleaningPhase, removed: usize },
    /// Rows removed because they held a missing value.
    MissingRowsDropped { phase: CleaningPhase, removed: usize },
    /// Fill value learned for a numeric column.
    NumericFillLearned { column: String, value: f64 },
    /// Fill value learned for a categorical column.
    CategoricalFillLearned { column: String, value: String },
    /// Label encoder learned for a column, with its number of classes.
    EncoderFitted { column: String, classes: usize },
    /// A categorical column exceeded `max_unique_for_encoding` and stays as text.
    EncodingSkipped { phase: CleaningPhase, column: String, distinct: usize },
    /// Missing cells replaced by learned fill values.
    CellsImputed { filled: usize },
    /// Indicator columns added by one-hot encoding.
    OneHotExpanded { columns: Vec<String> },
    /// `fit` completed.
    FitFinished { elapsed: Duration },
    /// `transform` completed with a table of this shape.
    TransformFinished { rows: usize, columns: usize, elapsed: Duration },
}

/// Observer hook for cleaning events.
///
/// Implementors can record metrics, write logs, or raise alerts.
pub trait CleaningObserver: Send + Sync {
    fn on_event(&self, event: &CleaningEvent);

    /// Called when a fit or transform fails. The error is still returned to the caller.
    fn on_error(&self, _phase: CleaningPhase, _error: &CleanerError) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn CleaningObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn CleaningObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl CleaningObserver for CompositeObserver {
    fn on_event(&self, event: &CleaningEvent) {
        for o in &self.observers {
            o.on_event(event);
        }
    }

    fn on_error(&self, phase: CleaningPhase, error: &CleanerError) {
        for o in &self.observers {
            o.on_error(phase, error);
        }
    }
}

/// Logs cleaning events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl CleaningObserver for StdErrObserver {
    fn on_event(&self, event: &CleaningEvent) {
        eprintln!("[cleaner] {event:?}");
    }

    fn on_error(&self, phase: CleaningPhase, error: &CleanerError) {
        eprintln!("[cleaner][{phase}][error] {error}");
    }
}

/// Appends cleaning events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl CleaningObserver for FileObserver {
    fn on_event(&self, event: &CleaningEvent) {
        self.append_line(&format!("{} event {event:?}", unix_ts()));
    }

    fn on_error(&self, phase: CleaningPhase, error: &CleanerError) {
        self.append_line(&format!("{} fail phase={phase} err={error}", unix_ts()));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counting {
        events: Mutex<usize>,
        errors: Mutex<usize>,
    }

    impl CleaningObserver for Counting {
        fn on_event(&self, _event: &CleaningEvent) {
            *self.events.lock().unwrap() += 1;
        }

        fn on_error(&self, _phase: CleaningPhase, _error: &CleanerError) {
            *self.errors.lock().unwrap() += 1;
        }
    }

    #[test]
    fn composite_fans_out_to_every_observer() {
        let a = Arc::new(Counting::default());
        let b = Arc::new(Counting::default());
        let a_dyn: Arc<dyn CleaningObserver> = a.clone();
        let b_dyn: Arc<dyn CleaningObserver> = b.clone();
        let composite = CompositeObserver::new(vec![a_dyn, b_dyn]);

        composite.on_event(&CleaningEvent::CellsImputed { filled: 3 });
        composite.on_error(CleaningPhase::Transform, &CleanerError::NotFitted);

        for o in [&a, &b] {
            assert_eq!(*o.events.lock().unwrap(), 1);
            assert_eq!(*o.errors.lock().unwrap(), 1);
        }
    }

    #[test]
    fn file_observer_appends_lines() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("rust-data-cleaner-observer-{nanos}.log"));
        let obs = FileObserver::new(&path);

        obs.on_event(&CleaningEvent::DuplicatesDropped {
            phase: CleaningPhase::Fit,
            removed: 1,
        });
        obs.on_error(CleaningPhase::Transform, &CleanerError::NotFitted);

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("DuplicatesDropped"));
        assert!(lines[1].contains("phase=transform"));
        let _ = std::fs::remove_file(&path);
    }
}
