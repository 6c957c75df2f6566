//! JSONL (JSON Lines) storage.
//!
//! Each line of a history file is one serialized `DrawRecord`.

use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use super::{sort_recent_first, DrawSource, StorageConfig, StorageError};
use crate::models::{DrawRecord, Game};

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Append a single entity to the file.
    pub fn append(&self, entity: &T) -> Result<(), StorageError> {
        self.ensure_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        let json = serde_json::to_string(entity)?;
        writeln!(writer, "{}", json)?;
        writer.flush()?;

        debug!("Appended entity to {:?}", self.path);
        Ok(())
    }

    /// Write entities, replacing the entire file.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);

        for entity in entities {
            let json = serde_json::to_string(entity)?;
            writeln!(writer, "{}", json)?;
        }

        writer.flush()?;
        info!("Wrote {} entities to {:?}", entities.len(), self.path);

        Ok(entities.len())
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read all entities from the file. Lines that fail to parse are
    /// logged and skipped; a missing file reads as empty.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut entities = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(entity) => entities.push(entity),
                Err(e) => {
                    warn!(
                        "Failed to parse line {} in {:?}: {}",
                        index + 1,
                        self.path,
                        e
                    );
                }
            }
        }

        debug!("Read {} entities from {:?}", entities.len(), self.path);
        Ok(entities)
    }
}

/// Draw history backed by one JSONL file per game.
#[derive(Debug, Clone)]
pub struct JsonlDrawSource {
    config: StorageConfig,
}

impl JsonlDrawSource {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }
}

impl DrawSource for JsonlDrawSource {
    fn load(&self, game: Game) -> Result<Vec<DrawRecord>, StorageError> {
        let path = self.config.draws_path(game);
        let reader: JsonlReader<DrawRecord> = JsonlReader::new(path.clone());
        if !reader.exists() {
            return Err(StorageError::PathNotFound(path));
        }

        let mut draws: Vec<DrawRecord> = reader
            .read_all()?
            .into_iter()
            .filter(|draw| {
                if draw.game != game {
                    warn!("Skipping {} draw {} in {:?}", draw.game, draw.label(), path);
                    return false;
                }
                if let Err(e) = draw.validate() {
                    warn!("Skipping invalid draw {} in {:?}: {}", draw.label(), path, e);
                    return false;
                }
                true
            })
            .collect();

        sort_recent_first(&mut draws);
        info!("Loaded {} {} draws", draws.len(), game);
        Ok(draws)
    }
}

/// Append a draw to its game's history.
///
/// Returns `false` without writing when a draw with the same ID is already
/// stored.
pub fn record_draw(config: &StorageConfig, draw: &DrawRecord) -> Result<bool, StorageError> {
    draw.validate()?;

    let path = config.draws_path(draw.game);
    let existing: HashSet<String> = JsonlReader::<DrawRecord>::new(path.clone())
        .read_all()?
        .iter()
        .map(|d| d.id().as_str().to_string())
        .collect();

    let id = draw.id();
    if existing.contains(id.as_str()) {
        debug!("Draw {} already recorded", id);
        return Ok(false);
    }

    JsonlWriter::new(path).append(draw)?;
    info!("Recorded {} draw {}", draw.game, draw.label());
    Ok(true)
}
