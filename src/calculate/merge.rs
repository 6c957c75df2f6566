//! Combining the results of several selection algorithms.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// How per-algorithm number sets are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    /// Numbers picked by any algorithm
    #[default]
    Inclusive,
    /// Numbers picked by every algorithm
    Exclusive,
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeMode::Inclusive => write!(f, "inclusive"),
            MergeMode::Exclusive => write!(f, "exclusive"),
        }
    }
}

/// Union (inclusive) or intersection (exclusive) of the given sets.
/// Merging no sets gives an empty set in either mode.
pub fn merge<'a, I>(mode: MergeMode, sets: I) -> BTreeSet<u32>
where
    I: IntoIterator<Item = &'a BTreeSet<u32>>,
{
    let mut sets = sets.into_iter();
    let Some(first) = sets.next() else {
        return BTreeSet::new();
    };

    match mode {
        MergeMode::Inclusive => sets.fold(first.clone(), |mut acc, set| {
            acc.extend(set);
            acc
        }),
        MergeMode::Exclusive => sets.fold(first.clone(), |acc, set| {
            acc.intersection(set).copied().collect()
        }),
    }
}
