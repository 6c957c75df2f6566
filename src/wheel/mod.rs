//! Combinatorial wheel generation.
//!
//! A wheel lists every selection of `size` numbers from a candidate set,
//! optionally crossed with bonus values, rendered one line per selection.

pub mod bonus;
pub mod combinator;
pub mod format;

pub use bonus::BonusSet;
pub use combinator::{check_selection, combination_count, Combinations};
pub use format::{render, render_plain, render_wheel, wheel_lines, write_wheel};

use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors raised while building a wheel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WheelError {
    #[error("Cannot select {size} from {available} numbers (repetition allowed: {repetition})")]
    InvalidSelectionSize {
        size: usize,
        available: usize,
        repetition: bool,
    },
}

/// Candidate numbers plus how many to pick per line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WheelSpec {
    /// Sorted, distinct, positive
    numbers: Vec<u32>,
    size: usize,
    repetition: bool,
}

impl WheelSpec {
    /// Sorts and de-duplicates the numbers; zero is dropped.
    pub fn new<I: IntoIterator<Item = u32>>(numbers: I, size: usize, repetition: bool) -> Self {
        let numbers: BTreeSet<u32> = numbers.into_iter().filter(|&n| n > 0).collect();
        Self {
            numbers: numbers.into_iter().collect(),
            size,
            repetition,
        }
    }

    pub fn numbers(&self) -> &[u32] {
        &self.numbers
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn repetition(&self) -> bool {
        self.repetition
    }

    pub fn validate(&self) -> Result<(), WheelError> {
        check_selection(self.numbers.len(), self.size, self.repetition)
    }

    /// Lazy stream of every selection.
    pub fn combinations(&self) -> Result<Combinations<'_>, WheelError> {
        Combinations::new(&self.numbers, self.size, self.repetition)
    }

    /// Number of lines the wheel produces before bonus values are attached.
    pub fn line_count(&self) -> Option<u128> {
        combination_count(self.numbers.len(), self.size, self.repetition)
    }
}
