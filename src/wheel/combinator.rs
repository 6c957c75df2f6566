//! Lazy enumeration of k-subsets and k-multisets.
//!
//! The enumeration is the classic recursive wheel: pick an element at each
//! depth, then recurse on the remainder starting at the same index (with
//! repetition) or the next one (without). Here the recursion is unrolled
//! onto an explicit stack holding the index chosen at each depth, so
//! combinations are produced one at a time in the same lexicographic order.

use super::WheelError;

/// Check that `size` numbers can be selected from `available`.
pub fn check_selection(available: usize, size: usize, repetition: bool) -> Result<(), WheelError> {
    if size == 0 || available == 0 || (!repetition && size > available) {
        return Err(WheelError::InvalidSelectionSize {
            size,
            available,
            repetition,
        });
    }
    Ok(())
}

/// Number of combinations a wheel produces: C(n,k) without repetition,
/// C(n+k-1,k) with it. `None` when the count does not fit in a `u128`.
pub fn combination_count(n: usize, k: usize, repetition: bool) -> Option<u128> {
    let (n, k) = if repetition {
        if n == 0 {
            return Some(u128::from(k == 0));
        }
        (n as u128 + k as u128 - 1, k as u128)
    } else {
        (n as u128, k as u128)
    };

    if k > n {
        return Some(0);
    }

    let limit = k.min(n - k);
    let mut result = 1u128;
    for i in 0..limit {
        // result * (n - i) is always divisible by (i + 1)
        result = result.checked_mul(n - i)? / (i + 1);
    }
    Some(result)
}

/// Iterator over every selection of `size` numbers from a sorted slice.
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    numbers: &'a [u32],
    repetition: bool,
    /// Index chosen at each recursion depth
    stack: Vec<usize>,
    started: bool,
    finished: bool,
}

impl<'a> Combinations<'a> {
    /// `numbers` must be sorted ascending and distinct.
    pub fn new(numbers: &'a [u32], size: usize, repetition: bool) -> Result<Self, WheelError> {
        check_selection(numbers.len(), size, repetition)?;

        let stack = (0..size)
            .map(|depth| if repetition { 0 } else { depth })
            .collect();

        Ok(Self {
            numbers,
            repetition,
            stack,
            started: false,
            finished: false,
        })
    }

    /// Highest index the given depth may take.
    fn bound(&self, depth: usize) -> usize {
        let n = self.numbers.len();
        if self.repetition {
            n - 1
        } else {
            // leave room for the depths still to fill
            n - (self.stack.len() - depth)
        }
    }

    /// Move to the next selection; false once every depth is exhausted.
    fn advance(&mut self) -> bool {
        for depth in (0..self.stack.len()).rev() {
            if self.stack[depth] < self.bound(depth) {
                self.stack[depth] += 1;
                for deeper in depth + 1..self.stack.len() {
                    let previous = self.stack[deeper - 1];
                    self.stack[deeper] = if self.repetition {
                        previous
                    } else {
                        previous + 1
                    };
                }
                return true;
            }
        }
        false
    }
}

impl Iterator for Combinations<'_> {
    type Item = Vec<u32>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if self.started {
            if !self.advance() {
                self.finished = true;
                return None;
            }
        } else {
            self.started = true;
        }

        Some(self.stack.iter().map(|&i| self.numbers[i]).collect())
    }
}
