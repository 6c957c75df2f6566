//! Frequency and selection engine.
//!
//! Computes number selections from draw history:
//! - Exact per-number frequency tables
//! - Hot and cold rankings over frequency buckets
//! - Periodic lookback picks
//! - Draw windows and merging of several algorithms' results

pub mod filter;
pub mod frequency;
pub mod merge;
pub mod periodic;
pub mod ranking;

pub use filter::{DrawFilter, MIN_DRAWS_TO_COUNT};
pub use frequency::FrequencyTable;
pub use merge::{merge, MergeMode};
pub use periodic::{periodic_lag, periodic_pick, BallKind};
pub use ranking::{buckets, frequency_report, rank, FrequencyBucket, Temperature};

use thiserror::Error;

/// Errors raised while computing a selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("Draw history unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("Insufficient history: periodic lookup needs {needed} draws, only {available} available")]
    InsufficientHistory { needed: usize, available: usize },

    #[error("Cannot compute a periodic lag for range {range} with {ball_count} balls")]
    InvalidLag { range: u32, ball_count: usize },

    #[error("No algorithm selected")]
    NoAlgorithmSelected,
}
