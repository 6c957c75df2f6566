//! # Lotto Wheel
//!
//! Lottery draw frequency analysis and combinatorial wheel generation.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (games, draws, frequency ratios)
//! - **calculate**: Frequency tables, hot/cold/periodic selection, merging
//! - **wheel**: Combination enumeration, bonus crossing and text output
//! - **analyze**: Request orchestration over a draw source
//! - **storage**: JSONL draw history
//! - **config**: Configuration loading and validation

pub mod analyze;
pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;
pub mod wheel;

pub use models::*;

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Extract every positive integer from free text (e.g. "3, 17 and 42").
///
/// Zeros, duplicates and values too large for a `u32` are dropped.
pub fn parse_numbers(text: &str) -> BTreeSet<u32> {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    let re = DIGITS.get_or_init(|| Regex::new(r"\d+").expect("literal pattern"));

    re.find_iter(text)
        .filter_map(|m| m.as_str().parse::<u32>().ok())
        .filter(|&n| n > 0)
        .collect()
}
