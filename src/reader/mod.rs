// src/reader/mod.rs
mod cursor;
mod progress;
mod curve_set;
#[cfg(feature = "stream")]
mod streaming;

pub use cursor::{CursorState, LogDataReader, RowBatch};
pub use progress::{progress_of, ProgressEstimator};
pub use curve_set::CurveSet;
#[cfg(feature = "stream")]
pub use streaming::{read_all, read_all_with_options};
