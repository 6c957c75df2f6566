//! Draw history storage.
//!
//! History lives in the data directory as one JSONL file per game:
//! - `draws/<game>.jsonl`, one `DrawRecord` per line
//!
//! Analysis reads history through the [`DrawSource`] trait, so the engine
//! never touches the filesystem itself.

pub mod jsonl;

pub use jsonl::{record_draw, JsonlDrawSource, JsonlReader, JsonlWriter};

use std::path::PathBuf;
use thiserror::Error;

use crate::models::{DrawRecord, DrawValidationError, Game};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Invalid draw: {0}")]
    InvalidDraw(#[from] DrawValidationError),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn draws_dir(&self) -> PathBuf {
        self.data_dir.join("draws")
    }

    /// History file of one game.
    pub fn draws_path(&self, game: Game) -> PathBuf {
        self.draws_dir().join(format!("{}.jsonl", game.slug()))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

/// Source of historical draws.
pub trait DrawSource {
    /// All draws of `game`, most recent first.
    fn load(&self, game: Game) -> Result<Vec<DrawRecord>, StorageError>;
}

/// Most recent first; draws on the same date keep their stored order.
pub(crate) fn sort_recent_first(draws: &mut [DrawRecord]) {
    draws.sort_by(|a, b| b.date.cmp(&a.date));
}

/// In-memory history.
#[derive(Debug, Clone, Default)]
pub struct MemoryDrawSource {
    draws: Vec<DrawRecord>,
}

impl MemoryDrawSource {
    pub fn new(draws: Vec<DrawRecord>) -> Self {
        Self { draws }
    }

    pub fn push(&mut self, draw: DrawRecord) {
        self.draws.push(draw);
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }
}

impl DrawSource for MemoryDrawSource {
    fn load(&self, game: Game) -> Result<Vec<DrawRecord>, StorageError> {
        let mut draws: Vec<DrawRecord> = self
            .draws
            .iter()
            .filter(|d| d.game == game)
            .cloned()
            .collect();
        sort_recent_first(&mut draws);
        Ok(draws)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draw(game: Game, day: u32) -> DrawRecord {
        let numbers = (1..=game.params().ball_count as u32).collect();
        DrawRecord::new(game, NaiveDate::from_ymd_opt(2015, 1, day).unwrap(), numbers)
    }

    #[test]
    fn test_storage_config_paths() {
        let config = StorageConfig::new(PathBuf::from("/data"));

        assert_eq!(config.draws_dir(), PathBuf::from("/data/draws"));
        assert_eq!(
            config.draws_path(Game::MegaMillions),
            PathBuf::from("/data/draws/mega-millions.jsonl")
        );
    }

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }

    #[test]
    fn test_memory_source_sorts_and_filters() {
        let mut source = MemoryDrawSource::new(vec![
            draw(Game::WaLotto, 3),
            draw(Game::Powerball, 4),
            draw(Game::WaLotto, 10),
        ]);
        source.push(draw(Game::WaLotto, 7));

        assert_eq!(source.len(), 4);

        let loaded = source.load(Game::WaLotto).unwrap();
        let days: Vec<String> = loaded.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(days, vec!["2015-01-10", "2015-01-07", "2015-01-03"]);
    }

    #[test]
    fn test_memory_source_empty() {
        let source = MemoryDrawSource::default();
        assert!(source.is_empty());
        assert!(source.load(Game::Powerball).unwrap().is_empty());
    }
}
