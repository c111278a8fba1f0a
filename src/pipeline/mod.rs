//! Batch conversion pipeline.

mod batch;

pub use batch::{BatchSummary, Config, Pipeline};
