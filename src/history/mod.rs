//! Run history backed by `SQLite`.

mod sqlite;

pub use sqlite::{HistoryStore, NewRun, Run, RunKind, RunSummary};
