//! Historical draw record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{DrawId, Game};

/// Reasons a draw record is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawValidationError {
    #[error("Expected {expected} numbers, got {actual}")]
    WrongBallCount { expected: usize, actual: usize },

    #[error("Number {number} out of range (1-{range})")]
    NumberOutOfRange { number: u32, range: u32 },

    #[error("Duplicate number: {0}")]
    DuplicateNumber(u32),

    #[error("Bonus ball {bonus} out of range (1-{range})")]
    BonusOutOfRange { bonus: u32, range: u32 },

    #[error("{0} draws a bonus ball but none was given")]
    MissingBonus(Game),

    #[error("{0} has no bonus ball")]
    UnexpectedBonus(Game),
}

/// One historical drawing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRecord {
    /// Game this draw belongs to
    pub game: Game,

    /// Date of the draw
    pub date: NaiveDate,

    /// Numbers drawn, in draw order
    pub numbers: Vec<u32>,

    /// Bonus ball drawn, if the game has one
    #[serde(default)]
    pub bonus: Option<u32>,

    /// Whether the top prize was won
    #[serde(default)]
    pub jackpot_winner: bool,

    /// Total payout of the draw
    #[serde(default)]
    pub payout: u64,

    /// Number range in force on this draw
    pub number_range: u32,

    /// Bonus range in force on this draw (0 when the game has none)
    #[serde(default)]
    pub bonus_range: u32,
}

impl DrawRecord {
    /// Create a draw using the game's current ranges.
    pub fn new(game: Game, date: NaiveDate, numbers: Vec<u32>) -> Self {
        let params = game.params();
        Self {
            game,
            date,
            numbers,
            bonus: None,
            jackpot_winner: false,
            payout: 0,
            number_range: params.range,
            bonus_range: params.bonus.map(|b| b.range).unwrap_or(0),
        }
    }

    /// Builder method to set the bonus ball.
    pub fn with_bonus(mut self, bonus: u32) -> Self {
        self.bonus = Some(bonus);
        self
    }

    /// Builder method to set the jackpot flag.
    pub fn with_jackpot(mut self, jackpot_winner: bool) -> Self {
        self.jackpot_winner = jackpot_winner;
        self
    }

    /// Builder method to set the payout.
    pub fn with_payout(mut self, payout: u64) -> Self {
        self.payout = payout;
        self
    }

    /// Builder method for draws held under older ranges.
    pub fn with_ranges(mut self, number_range: u32, bonus_range: u32) -> Self {
        self.number_range = number_range;
        self.bonus_range = bonus_range;
        self
    }

    /// Deterministic ID from game and date.
    pub fn id(&self) -> DrawId {
        DrawId::generate(&[self.game.slug(), &self.date.to_string()])
    }

    /// Date label as shown to users.
    pub fn label(&self) -> String {
        self.date.format("%b %d %Y").to_string().to_uppercase()
    }

    pub fn contains(&self, number: u32) -> bool {
        self.numbers.contains(&number)
    }

    /// Check the record against its own ranges and the game's ball counts.
    pub fn validate(&self) -> Result<(), DrawValidationError> {
        let params = self.game.params();

        if self.numbers.len() != params.ball_count {
            return Err(DrawValidationError::WrongBallCount {
                expected: params.ball_count,
                actual: self.numbers.len(),
            });
        }

        for (i, &number) in self.numbers.iter().enumerate() {
            if number == 0 || number > self.number_range {
                return Err(DrawValidationError::NumberOutOfRange {
                    number,
                    range: self.number_range,
                });
            }
            if self.numbers[..i].contains(&number) {
                return Err(DrawValidationError::DuplicateNumber(number));
            }
        }

        match (params.bonus, self.bonus) {
            (Some(_), None) => Err(DrawValidationError::MissingBonus(self.game)),
            (None, Some(_)) => Err(DrawValidationError::UnexpectedBonus(self.game)),
            (Some(_), Some(bonus)) if bonus == 0 || bonus > self.bonus_range => {
                Err(DrawValidationError::BonusOutOfRange {
                    bonus,
                    range: self.bonus_range,
                })
            }
            _ => Ok(()),
        }
    }
}
