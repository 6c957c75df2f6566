//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::calculate::{DrawFilter, MergeMode};
use crate::models::Game;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// A number selection algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Hot,
    Cold,
    Periodic,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Hot => write!(f, "hot"),
            Algorithm::Cold => write!(f, "cold"),
            Algorithm::Periodic => write!(f, "periodic"),
        }
    }
}

/// Which algorithms a request runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlgorithmSelection {
    #[serde(default)]
    pub hot: bool,

    #[serde(default)]
    pub cold: bool,

    #[serde(default)]
    pub periodic: bool,
}

impl AlgorithmSelection {
    pub fn any(&self) -> bool {
        self.hot || self.cold || self.periodic
    }

    /// Selected algorithms in a fixed order: hot, cold, periodic.
    pub fn selected(&self) -> Vec<Algorithm> {
        [
            (self.hot, Algorithm::Hot),
            (self.cold, Algorithm::Cold),
            (self.periodic, Algorithm::Periodic),
        ]
        .into_iter()
        .filter_map(|(on, algorithm)| on.then_some(algorithm))
        .collect()
    }
}

/// Options of one analysis request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub game: Game,

    #[serde(default)]
    pub algorithms: AlgorithmSelection,

    /// How results of several algorithms are combined
    #[serde(default)]
    pub merge: MergeMode,

    /// Wheel the result instead of listing it
    #[serde(default = "default_wheel")]
    pub wheel: bool,

    /// Allow a number to repeat within a wheel line
    #[serde(default)]
    pub allow_repetition: bool,

    /// Most recent draws to count (0 = all)
    #[serde(default)]
    pub draw_window: usize,

    /// Count only draws where the jackpot was won
    #[serde(default)]
    pub jackpot_only: bool,

    /// Count only draws that paid at least this much
    #[serde(default)]
    pub min_payout: u64,

    /// Numbers added to every result
    #[serde(default)]
    pub always_include: BTreeSet<u32>,
}

fn default_wheel() -> bool {
    true
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            game: Game::default(),
            algorithms: AlgorithmSelection::default(),
            merge: MergeMode::default(),
            wheel: default_wheel(),
            allow_repetition: false,
            draw_window: 0,
            jackpot_only: false,
            min_payout: 0,
            always_include: BTreeSet::new(),
        }
    }
}

impl AnalysisConfig {
    /// Draw selection derived from these options.
    pub fn filter(&self) -> DrawFilter {
        DrawFilter {
            window: self.draw_window,
            jackpot_only: self.jackpot_only,
            min_payout: self.min_payout,
        }
    }

    /// Validate the options.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.always_include.contains(&0) {
            return Err(ConfigError::ValidationError(
                "always_include numbers must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for AnalysisConfig {
    /// Settings summary shown above results.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let algorithms: Vec<String> = self
            .algorithms
            .selected()
            .iter()
            .map(|a| a.to_string())
            .collect();
        let lucky: Vec<String> = self.always_include.iter().map(|n| n.to_string()).collect();

        writeln!(f, "Game Selected:       {}", self.game)?;
        writeln!(
            f,
            "Algorithms Selected: {}",
            if algorithms.is_empty() {
                "none".to_string()
            } else {
                algorithms.join(", ")
            }
        )?;
        writeln!(
            f,
            "Algorithms Should:   {}",
            match self.merge {
                MergeMode::Inclusive => "Add",
                MergeMode::Exclusive => "Intersect",
            }
        )?;
        match self.draw_window {
            0 => writeln!(f, "Draws to Count:      all")?,
            n => writeln!(f, "Draws to Count:      {}", n)?,
        }
        writeln!(
            f,
            "Your Lucky Numbers:  {}",
            if lucky.is_empty() {
                "none".to_string()
            } else {
                lucky.join(", ")
            }
        )?;
        if self.min_payout > 0 {
            writeln!(f, "Use Drawings That Paid: ${}", self.min_payout)?;
        }
        if self.jackpot_only {
            writeln!(f, "Use Only Jackpot Winning Drawings")?;
        }
        Ok(())
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub analysis: AnalysisConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "log_level must not be empty".to_string(),
            ));
        }

        self.analysis.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.analysis.game, Game::WaLotto);
        assert!(config.analysis.wheel);
        assert!(!config.analysis.algorithms.any());
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_zero_lucky_number() {
        let mut config = AppConfig::default();
        config.analysis.always_include.insert(0);

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_log_level() {
        let mut config = AppConfig::default();
        config.log_level = " ".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_algorithm_selection() {
        let selection = AlgorithmSelection {
            hot: true,
            cold: false,
            periodic: true,
        };

        assert!(selection.any());
        assert_eq!(
            selection.selected(),
            vec![Algorithm::Hot, Algorithm::Periodic]
        );
        assert!(!AlgorithmSelection::default().any());
    }

    #[test]
    fn test_filter_from_config() {
        let config = AnalysisConfig {
            draw_window: 30,
            jackpot_only: true,
            min_payout: 500,
            ..Default::default()
        };

        assert_eq!(
            config.filter(),
            DrawFilter {
                window: 30,
                jackpot_only: true,
                min_payout: 500,
            }
        );
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
data_dir = "/tmp/draws"

[analysis]
game = "powerball"
merge = "exclusive"
wheel = false
draw_window = 50
always_include = [7, 11]

[analysis.algorithms]
hot = true
periodic = true
"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/draws"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.analysis.game, Game::Powerball);
        assert_eq!(config.analysis.merge, MergeMode::Exclusive);
        assert!(!config.analysis.wheel);
        assert_eq!(config.analysis.draw_window, 50);
        assert_eq!(config.analysis.always_include, BTreeSet::from([7, 11]));
        assert_eq!(
            config.analysis.algorithms.selected(),
            vec![Algorithm::Hot, Algorithm::Periodic]
        );
    }

    #[test]
    fn test_from_file_rejects_bad_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "analysis = 3").unwrap();

        assert!(matches!(
            AppConfig::from_file(file.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_from_file_missing() {
        let result = AppConfig::from_file(Path::new("/nonexistent/lotto.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }

    #[test]
    fn test_settings_summary() {
        let config = AnalysisConfig {
            game: Game::MegaMillions,
            algorithms: AlgorithmSelection {
                hot: true,
                cold: true,
                periodic: false,
            },
            min_payout: 1000,
            jackpot_only: true,
            always_include: BTreeSet::from([3, 21]),
            ..Default::default()
        };

        let expected = "\
Game Selected:       Mega Millions
Algorithms Selected: hot, cold
Algorithms Should:   Add
Draws to Count:      all
Your Lucky Numbers:  3, 21
Use Drawings That Paid: $1000
Use Only Jackpot Winning Drawings
";
        assert_eq!(config.to_string(), expected);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        // Should be parseable
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.data_dir, parsed.data_dir);
        assert_eq!(config.analysis, parsed.analysis);
    }
}
