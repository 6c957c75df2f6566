//! Draw selection: count window plus jackpot and payout filters.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::DrawRecord;

/// A non-zero window smaller than this is rounded up to it.
pub const MIN_DRAWS_TO_COUNT: usize = 15;

/// Which historical draws take part in frequency counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DrawFilter {
    /// Most recent draws to consider (0 = all)
    pub window: usize,

    /// Keep only draws where the jackpot was won
    pub jackpot_only: bool,

    /// Keep only draws that paid at least this much
    pub min_payout: u64,
}

impl DrawFilter {
    /// Window size actually used for a history of `available` draws.
    pub fn effective_window(&self, available: usize) -> usize {
        match self.window {
            0 => available,
            w if w < MIN_DRAWS_TO_COUNT => MIN_DRAWS_TO_COUNT.min(available),
            w => w.min(available),
        }
    }

    /// Take the window from the front of `history` (most recent first), then
    /// apply the jackpot and payout filters within it.
    pub fn apply(&self, history: &[DrawRecord]) -> Vec<DrawRecord> {
        let window = self.effective_window(history.len());

        let selected: Vec<DrawRecord> = history[..window]
            .iter()
            .filter(|d| !self.jackpot_only || d.jackpot_winner)
            .filter(|d| d.payout >= self.min_payout)
            .cloned()
            .collect();

        debug!(
            "Selected {} of {} draws (window {}, jackpot_only {}, min_payout {})",
            selected.len(),
            history.len(),
            window,
            self.jackpot_only,
            self.min_payout
        );

        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Game;
    use chrono::{Duration, NaiveDate};

    fn history(count: usize) -> Vec<DrawRecord> {
        let latest = NaiveDate::from_ymd_opt(2015, 6, 1).unwrap();
        (0..count)
            .map(|i| {
                DrawRecord::new(
                    Game::WaLotto,
                    latest - Duration::days(i as i64),
                    vec![1, 2, 3, 4, 5, 6],
                )
                .with_jackpot(i % 3 == 0)
                .with_payout(i as u64 * 1000)
            })
            .collect()
    }

    #[test]
    fn test_default_keeps_everything() {
        let history = history(40);
        assert_eq!(DrawFilter::default().apply(&history), history);
    }

    #[test]
    fn test_window_takes_most_recent() {
        let history = history(40);
        let filter = DrawFilter {
            window: 20,
            ..Default::default()
        };

        let selected = filter.apply(&history);
        assert_eq!(selected.len(), 20);
        assert_eq!(selected[0], history[0]);
        assert_eq!(selected[19], history[19]);
    }

    #[test]
    fn test_small_window_rounds_up() {
        let filter = DrawFilter {
            window: 3,
            ..Default::default()
        };
        assert_eq!(filter.effective_window(100), MIN_DRAWS_TO_COUNT);
        assert_eq!(filter.effective_window(10), 10);
        assert_eq!(filter.apply(&history(40)).len(), MIN_DRAWS_TO_COUNT);
    }

    #[test]
    fn test_oversized_window_uses_all() {
        let filter = DrawFilter {
            window: 500,
            ..Default::default()
        };
        assert_eq!(filter.apply(&history(40)).len(), 40);
    }

    #[test]
    fn test_jackpot_and_payout_apply_within_window() {
        let history = history(40);
        let filter = DrawFilter {
            window: 15,
            jackpot_only: true,
            min_payout: 3000,
        };

        let selected = filter.apply(&history);
        // Indices 0..15 with i % 3 == 0 and i >= 3: 3, 6, 9, 12
        assert_eq!(selected.len(), 4);
        assert!(selected.iter().all(|d| d.jackpot_winner && d.payout >= 3000));
    }

    #[test]
    fn test_empty_history() {
        let filter = DrawFilter {
            window: 10,
            jackpot_only: true,
            min_payout: 0,
        };
        assert!(filter.apply(&[]).is_empty());
    }
}
