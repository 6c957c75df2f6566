//! Per-number draw frequency tables.

use tracing::debug;

use crate::models::{DrawRecord, FrequencyRatio};

/// Frequency of every number `1..=range` over a set of draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    /// Index `i` holds the ratio of number `i + 1`
    ratios: Vec<FrequencyRatio>,
    draws_processed: usize,
}

impl FrequencyTable {
    /// Count how often each regular number was drawn.
    pub fn count(draws: &[DrawRecord], range: u32) -> Self {
        let mismatched = draws.iter().filter(|d| d.number_range != range).count();
        if mismatched > 0 {
            debug!(
                "{} draws were held under a different range; counting over 1..={}",
                mismatched, range
            );
        }
        Self::tally(draws, range, |draw, number| draw.contains(number))
    }

    /// Count how often each bonus value was drawn.
    pub fn count_bonus(draws: &[DrawRecord], bonus_range: u32) -> Self {
        Self::tally(draws, bonus_range, |draw, number| {
            draw.bonus == Some(number)
        })
    }

    /// Each number's ratio is accumulated on its own, with no shared counters.
    fn tally<F>(draws: &[DrawRecord], range: u32, drawn: F) -> Self
    where
        F: Fn(&DrawRecord, u32) -> bool,
    {
        let ratios = (1..=range)
            .map(|number| {
                draws.iter().fold(FrequencyRatio::ZERO, |ratio, draw| {
                    if drawn(draw, number) {
                        ratio.record_occurrence()
                    } else {
                        ratio.record_absence()
                    }
                })
            })
            .collect();

        debug!("Counted {} draws over 1..={}", draws.len(), range);

        Self {
            ratios,
            draws_processed: draws.len(),
        }
    }

    /// Highest number in the table.
    pub fn range(&self) -> u32 {
        self.ratios.len() as u32
    }

    pub fn draws_processed(&self) -> usize {
        self.draws_processed
    }

    pub fn get(&self, number: u32) -> Option<FrequencyRatio> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        self.ratios.get(index).copied()
    }

    /// `(number, ratio)` pairs in ascending number order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, FrequencyRatio)> + '_ {
        self.ratios
            .iter()
            .enumerate()
            .map(|(i, ratio)| (i as u32 + 1, *ratio))
    }

    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Game;
    use chrono::NaiveDate;

    fn draw(day: u32, numbers: &[u32]) -> DrawRecord {
        DrawRecord::new(
            Game::WaLotto,
            NaiveDate::from_ymd_opt(2015, 1, day).unwrap(),
            numbers.to_vec(),
        )
    }

    fn four_draws() -> Vec<DrawRecord> {
        vec![
            draw(1, &[1, 2, 3, 4, 5, 6]),
            draw(2, &[3, 7, 8, 9, 10, 11]),
            draw(3, &[3, 12, 13, 14, 15, 16]),
            draw(4, &[1, 3, 17, 18, 19, 20]),
        ]
    }

    #[test]
    fn test_table_has_exactly_the_range() {
        for range in [1, 6, 49] {
            let table = FrequencyTable::count(&four_draws(), range);
            let keys: Vec<u32> = table.iter().map(|(n, _)| n).collect();
            assert_eq!(keys, (1..=range).collect::<Vec<_>>());
            assert_eq!(table.range(), range);
            assert!(table.get(0).is_none());
            assert!(table.get(range + 1).is_none());
        }
    }

    #[test]
    fn test_trials_equal_draws_processed() {
        let draws = four_draws();
        let table = FrequencyTable::count(&draws, 49);

        assert_eq!(table.draws_processed(), 4);
        for (_, ratio) in table.iter() {
            assert_eq!(ratio.trials(), 4);
        }
    }

    #[test]
    fn test_number_drawn_every_time() {
        let table = FrequencyTable::count(&four_draws(), 49);

        assert_eq!(table.get(3), Some(FrequencyRatio::new(4, 4)));
        assert_eq!(table.get(1), Some(FrequencyRatio::new(2, 4)));
        assert_eq!(table.get(7), Some(FrequencyRatio::new(1, 4)));
        assert_eq!(table.get(49), Some(FrequencyRatio::new(0, 4)));
    }

    #[test]
    fn test_no_draws_gives_zero_ratios() {
        let table = FrequencyTable::count(&[], 10);

        assert_eq!(table.len(), 10);
        assert_eq!(table.draws_processed(), 0);
        assert!(table.iter().all(|(_, r)| r == FrequencyRatio::ZERO));
    }

    #[test]
    fn test_bonus_count() {
        let date = |d| NaiveDate::from_ymd_opt(2015, 1, d).unwrap();
        let draws = vec![
            DrawRecord::new(Game::MegaMillions, date(2), vec![1, 2, 3, 4, 5]).with_bonus(7),
            DrawRecord::new(Game::MegaMillions, date(6), vec![6, 7, 8, 9, 10]).with_bonus(7),
            DrawRecord::new(Game::MegaMillions, date(9), vec![1, 2, 3, 4, 5]).with_bonus(15),
        ];

        let table = FrequencyTable::count_bonus(&draws, 15);

        assert_eq!(table.len(), 15);
        assert_eq!(table.get(7), Some(FrequencyRatio::new(2, 3)));
        assert_eq!(table.get(15), Some(FrequencyRatio::new(1, 3)));
        assert_eq!(table.get(1), Some(FrequencyRatio::new(0, 3)));
    }

    #[test]
    fn test_draws_under_other_range_counted_over_given_range() {
        let old = draw(1, &[1, 2, 3, 4, 5, 6]).with_ranges(54, 0);
        let table = FrequencyTable::count(&[old], 49);

        assert_eq!(table.len(), 49);
        assert_eq!(table.get(6), Some(FrequencyRatio::new(1, 1)));
    }
}
