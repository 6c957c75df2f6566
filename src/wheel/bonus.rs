//! Bonus values attached to wheel lines.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Separator between a wheel line and its bonus value.
pub const BONUS_SEPARATOR: &str = " | ";

/// Ascending, distinct, positive bonus values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BonusSet(Vec<u32>);

impl BonusSet {
    /// Sorts and de-duplicates; zero is dropped.
    pub fn new<I: IntoIterator<Item = u32>>(values: I) -> Self {
        let values: BTreeSet<u32> = values.into_iter().filter(|&v| v > 0).collect();
        Self(values.into_iter().collect())
    }

    pub fn values(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a bonus value to every line.
    ///
    /// One value is appended in place. With several values, the input
    /// lines are repeated once per value in ascending order, so the result
    /// holds `lines.len() * max(1, m)` lines.
    pub fn cross(&self, mut lines: Vec<String>) -> Vec<String> {
        match self.0.as_slice() {
            [] => lines,
            [bonus] => {
                for line in &mut lines {
                    append_bonus(line, *bonus);
                }
                lines
            }
            values => {
                let mut result = Vec::with_capacity(lines.len() * values.len());
                for &bonus in values {
                    result.extend(lines.iter().map(|line| {
                        let mut line = line.clone();
                        append_bonus(&mut line, bonus);
                        line
                    }));
                }
                result
            }
        }
    }
}

impl From<BTreeSet<u32>> for BonusSet {
    fn from(values: BTreeSet<u32>) -> Self {
        Self::new(values)
    }
}

pub(crate) fn append_bonus(line: &mut String, bonus: u32) {
    line.push_str(BONUS_SEPARATOR);
    line.push_str(&bonus.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines() -> Vec<String> {
        vec!["1 2 3".to_string(), "1 2 4".to_string(), "1 3 4".to_string()]
    }

    #[test]
    fn test_new_sorts_and_dedups() {
        let bonus = BonusSet::new([20, 10, 20, 0, 5]);
        assert_eq!(bonus.values(), &[5, 10, 20]);
        assert_eq!(bonus.len(), 3);
        assert!(BonusSet::new([0]).is_empty());
    }

    #[test]
    fn test_cross_empty_leaves_lines() {
        assert_eq!(BonusSet::default().cross(lines()), lines());
    }

    #[test]
    fn test_cross_single_value() {
        let crossed = BonusSet::new([7]).cross(lines());
        assert_eq!(crossed, vec!["1 2 3 | 7", "1 2 4 | 7", "1 3 4 | 7"]);
    }

    #[test]
    fn test_cross_several_values_grouped_by_bonus() {
        let crossed = BonusSet::new([20, 10]).cross(lines());
        assert_eq!(
            crossed,
            vec![
                "1 2 3 | 10",
                "1 2 4 | 10",
                "1 3 4 | 10",
                "1 2 3 | 20",
                "1 2 4 | 20",
                "1 3 4 | 20",
            ]
        );
    }

    #[test]
    fn test_cross_line_count() {
        for m in 1..=5u32 {
            let bonus = BonusSet::new(1..=m);
            assert_eq!(bonus.cross(lines()).len(), lines().len() * m as usize);
        }
    }

    #[test]
    fn test_from_btreeset() {
        let bonus: BonusSet = BTreeSet::from([3, 1]).into();
        assert_eq!(bonus.values(), &[1, 3]);
    }
}
