//! Supported games and their ball parameters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bonus ball parameters for games that draw one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusParams {
    /// Highest bonus value, inclusive
    pub range: u32,

    /// Bonus balls per draw
    pub ball_count: usize,
}

/// Ball parameters of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameParams {
    /// Highest number, inclusive
    pub range: u32,

    /// Numbers per draw
    pub ball_count: usize,

    /// Bonus ball parameters, if the game has one
    pub bonus: Option<BonusParams>,
}

impl GameParams {
    pub fn has_bonus(&self) -> bool {
        self.bonus.is_some()
    }

    /// Whether `number` is a valid regular number for this game.
    pub fn in_range(&self, number: u32) -> bool {
        (1..=self.range).contains(&number)
    }
}

/// A lottery game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Game {
    /// Washington Lotto: 6 of 49
    #[default]
    WaLotto,
    /// Mega Millions: 5 of 75 plus 1 of 15
    MegaMillions,
    /// Powerball: 5 of 59 plus 1 of 35
    Powerball,
}

impl Game {
    pub const ALL: [Game; 3] = [Game::WaLotto, Game::MegaMillions, Game::Powerball];

    pub fn params(&self) -> GameParams {
        match self {
            Game::WaLotto => GameParams {
                range: 49,
                ball_count: 6,
                bonus: None,
            },
            Game::MegaMillions => GameParams {
                range: 75,
                ball_count: 5,
                bonus: Some(BonusParams {
                    range: 15,
                    ball_count: 1,
                }),
            },
            Game::Powerball => GameParams {
                range: 59,
                ball_count: 5,
                bonus: Some(BonusParams {
                    range: 35,
                    ball_count: 1,
                }),
            },
        }
    }

    /// Short identifier used on the command line and in file names.
    pub fn slug(&self) -> &'static str {
        match self {
            Game::WaLotto => "wa-lotto",
            Game::MegaMillions => "mega-millions",
            Game::Powerball => "powerball",
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Game::WaLotto => write!(f, "WA Lotto"),
            Game::MegaMillions => write!(f, "Mega Millions"),
            Game::Powerball => write!(f, "Powerball"),
        }
    }
}

impl FromStr for Game {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        Game::ALL
            .into_iter()
            .find(|game| game.slug() == key)
            .ok_or_else(|| {
                format!(
                    "Unknown game: {}. Use one of: wa-lotto, mega-millions, powerball",
                    s
                )
            })
    }
}
