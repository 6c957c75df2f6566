//! Exact draw-frequency ratios.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Write};

/// Fractional digits shown when a ratio is displayed.
const DISPLAY_DIGITS: usize = 16;

/// How often a number has been drawn: `occurrences` out of `trials` draws.
///
/// Equality is field identity, so `1/2` and `2/4` are different ratios even
/// though they have the same value. Use [`FrequencyRatio::cmp_value`] to
/// order by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrequencyRatio {
    occurrences: u32,
    trials: u32,
}

impl FrequencyRatio {
    /// The ratio of a number that has not been seen in any draw yet.
    pub const ZERO: FrequencyRatio = FrequencyRatio {
        occurrences: 0,
        trials: 0,
    };

    /// Create a ratio. `occurrences` must not exceed `trials`.
    pub fn new(occurrences: u32, trials: u32) -> Self {
        debug_assert!(occurrences <= trials, "{occurrences}/{trials}");
        Self {
            occurrences,
            trials,
        }
    }

    pub fn occurrences(&self) -> u32 {
        self.occurrences
    }

    pub fn trials(&self) -> u32 {
        self.trials
    }

    /// The number was drawn once more.
    pub fn record_occurrence(self) -> Self {
        Self {
            occurrences: self.occurrences + 1,
            trials: self.trials + 1,
        }
    }

    /// One more draw went by without the number.
    pub fn record_absence(self) -> Self {
        Self {
            occurrences: self.occurrences,
            trials: self.trials + 1,
        }
    }

    /// Approximate value for display and sorting hints. Zero trials is 0.0.
    pub fn value(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.occurrences as f64 / self.trials as f64
        }
    }

    /// Compare exact values by cross-multiplication.
    pub fn cmp_value(&self, other: &Self) -> Ordering {
        // A zero-trial ratio counts as 0/1.
        let lhs_den = u64::from(self.trials.max(1));
        let rhs_den = u64::from(other.trials.max(1));
        (u64::from(self.occurrences) * rhs_den).cmp(&(u64::from(other.occurrences) * lhs_den))
    }

    /// Numeric equality, regardless of how the fraction is written.
    pub fn same_value(&self, other: &Self) -> bool {
        self.cmp_value(other) == Ordering::Equal
    }
}

impl Default for FrequencyRatio {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for FrequencyRatio {
    /// Exact decimal expansion, truncated (not rounded).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.trials == 0 {
            return f.write_char('0');
        }

        let trials = u64::from(self.trials);
        let mut remainder = u64::from(self.occurrences) % trials;
        write!(f, "{}", u64::from(self.occurrences) / trials)?;
        if remainder == 0 {
            return Ok(());
        }

        f.write_char('.')?;
        for _ in 0..DISPLAY_DIGITS {
            remainder *= 10;
            write!(f, "{}", remainder / trials)?;
            remainder %= trials;
            if remainder == 0 {
                break;
            }
        }
        Ok(())
    }
}
