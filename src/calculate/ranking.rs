//! Hot and cold number ranking.
//!
//! Numbers are grouped into buckets of identical frequency ratio. Buckets
//! are consumed whole, so a ranking may return more numbers than asked for.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::fmt::Write;

use super::FrequencyTable;
use crate::models::FrequencyRatio;

/// Which end of the frequency ranking to take numbers from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temperature {
    /// Most frequently drawn first
    Hot,
    /// Least frequently drawn first
    Cold,
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temperature::Hot => write!(f, "hot"),
            Temperature::Cold => write!(f, "cold"),
        }
    }
}

/// All numbers sharing one exact frequency ratio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyBucket {
    pub ratio: FrequencyRatio,
    pub numbers: BTreeSet<u32>,
}

/// Group the table into buckets, ordered for the given temperature.
///
/// Buckets with the same value but different trial counts are ordered by
/// trials, so the cold order is always the exact reverse of the hot order.
pub fn buckets(table: &FrequencyTable, temperature: Temperature) -> Vec<FrequencyBucket> {
    let mut grouped: HashMap<FrequencyRatio, BTreeSet<u32>> = HashMap::new();
    for (number, ratio) in table.iter() {
        grouped.entry(ratio).or_default().insert(number);
    }

    let mut buckets: Vec<FrequencyBucket> = grouped
        .into_iter()
        .map(|(ratio, numbers)| FrequencyBucket { ratio, numbers })
        .collect();

    buckets.sort_by(|a, b| {
        a.ratio
            .cmp_value(&b.ratio)
            .then_with(|| a.ratio.trials().cmp(&b.ratio.trials()))
    });

    if temperature == Temperature::Hot {
        buckets.reverse();
    }
    buckets
}

/// Select at least `need` numbers from the hot or cold end of the table.
///
/// Whole buckets are added until the result holds `need` numbers; anything
/// outside `1..=max` is dropped after each bucket. Returns fewer than `need`
/// numbers only when the table has no more valid numbers.
pub fn rank(
    table: &FrequencyTable,
    temperature: Temperature,
    need: usize,
    max: u32,
) -> BTreeSet<u32> {
    let mut result = BTreeSet::new();

    for bucket in buckets(table, temperature) {
        if result.len() >= need {
            break;
        }
        result.extend(bucket.numbers);
        result.retain(|&n| n > 0 && n <= max);
    }

    result
}

/// Diagnostic dump of ratio -> numbers, hottest bucket first.
pub fn frequency_report(table: &FrequencyTable) -> String {
    let mut out = String::new();

    for bucket in buckets(table, Temperature::Hot) {
        let numbers: Vec<String> = bucket.numbers.iter().map(|n| n.to_string()).collect();
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "{} ({}/{})",
            bucket.ratio,
            bucket.ratio.occurrences(),
            bucket.ratio.trials()
        );
        let _ = writeln!(out, "[{}]", numbers.join(", "));
        out.push('\n');
    }

    out
}
