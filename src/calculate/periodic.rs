//! Periodic lookback.
//!
//! With `range` numbers and `ball_count` balls per draw, a uniform process
//! cycles through every number in about `range / ball_count` draws. The
//! periodic pick is the draw that many periods back in the raw history.

use std::collections::BTreeSet;

use super::AnalysisError;
use crate::models::DrawRecord;

/// Regular numbers or the bonus ball of a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallKind {
    /// The regular numbers
    Numbers,
    /// The bonus ball only
    Bonus,
}

/// Number of draws to look back: `floor(range / ball_count)`.
pub fn periodic_lag(range: u32, ball_count: usize) -> Result<usize, AnalysisError> {
    let lag = match ball_count {
        0 => 0,
        balls => range as usize / balls,
    };
    if lag == 0 {
        return Err(AnalysisError::InvalidLag { range, ball_count });
    }
    Ok(lag)
}

/// Read the draw `lag` periods back. `history[0]` is the most recent draw.
///
/// A draw without a bonus ball yields an empty set for [`BallKind::Bonus`].
pub fn periodic_pick(
    ball_count: usize,
    range: u32,
    history: &[DrawRecord],
    target: BallKind,
) -> Result<BTreeSet<u32>, AnalysisError> {
    let lag = periodic_lag(range, ball_count)?;

    let draw = history
        .get(lag - 1)
        .ok_or(AnalysisError::InsufficientHistory {
            needed: lag,
            available: history.len(),
        })?;

    Ok(match target {
        BallKind::Numbers => draw.numbers.iter().copied().collect(),
        BallKind::Bonus => draw.bonus.into_iter().collect(),
    })
}
