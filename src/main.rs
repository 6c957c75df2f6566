use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lotto_wheel::analyze::{analyze, raw_report};
use lotto_wheel::calculate::{BallKind, MergeMode};
use lotto_wheel::config::{AnalysisConfig, AppConfig};
use lotto_wheel::parse_numbers;
use lotto_wheel::storage::{record_draw, JsonlDrawSource, StorageConfig};
use lotto_wheel::wheel::{write_wheel, BonusSet, WheelSpec};
use lotto_wheel::{DrawRecord, Game};

/// Config file read when `--config` is not given, if it exists.
const DEFAULT_CONFIG: &str = "./lotto.toml";

#[derive(Parser)]
#[command(name = "lotto-wheel")]
#[command(about = "Lottery frequency analysis and combinatorial wheels")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Data directory path
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick numbers from draw history and wheel them
    Analyze {
        #[command(flatten)]
        selection: SelectionArgs,

        #[command(flatten)]
        filter: FilterArgs,

        /// Print the settings summary above the results
        #[arg(long)]
        summary: bool,
    },

    /// Print the raw frequency table
    Raw {
        /// Game to analyze
        #[arg(long)]
        game: Option<Game>,

        /// Show the bonus ball table instead of the numbers
        #[arg(long)]
        bonus: bool,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Wheel numbers given on the command line
    Wheel {
        /// Numbers to wheel (e.g. "3,7,12,19,25,33,41")
        numbers: String,

        /// Numbers per line (defaults to the game's ball count)
        #[arg(long)]
        size: Option<usize>,

        /// Game whose ball count sets the line size
        #[arg(long)]
        game: Option<Game>,

        /// Bonus values appended to every line (e.g. "4,9")
        #[arg(long)]
        bonus: Option<String>,

        /// Allow a number to repeat within a line
        #[arg(long)]
        repetition: bool,

        /// List the numbers instead of wheeling them
        #[arg(long)]
        no_wheel: bool,
    },

    /// Append a draw to a game's history
    Record {
        /// Game the draw belongs to
        #[arg(long)]
        game: Game,

        /// Draw date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Numbers drawn (e.g. "5 12 23 40 51")
        numbers: String,

        /// Bonus ball drawn
        #[arg(long)]
        bonus: Option<u32>,

        /// The jackpot was won
        #[arg(long)]
        jackpot: bool,

        /// Total payout of the draw
        #[arg(long, default_value = "0")]
        payout: u64,
    },

    /// List supported games
    Games,
}

#[derive(Args)]
struct SelectionArgs {
    /// Game to analyze
    #[arg(long)]
    game: Option<Game>,

    /// Most frequently drawn numbers
    #[arg(long)]
    hot: bool,

    /// Least frequently drawn numbers
    #[arg(long)]
    cold: bool,

    /// Numbers of the draw one period back
    #[arg(long)]
    periodic: bool,

    /// Keep only numbers every algorithm picked
    #[arg(long)]
    exclusive: bool,

    /// List the numbers instead of wheeling them
    #[arg(long)]
    no_wheel: bool,

    /// Allow a number to repeat within a wheel line
    #[arg(long)]
    repetition: bool,

    /// Numbers always added to the result (e.g. "7, 11")
    #[arg(long)]
    include: Option<String>,
}

#[derive(Args)]
struct FilterArgs {
    /// Most recent draws to count (0 = all)
    #[arg(long)]
    window: Option<usize>,

    /// Count only draws where the jackpot was won
    #[arg(long)]
    jackpot_only: bool,

    /// Count only draws that paid at least this much
    #[arg(long)]
    min_payout: Option<u64>,
}

impl SelectionArgs {
    fn apply(&self, config: &mut AnalysisConfig) {
        if let Some(game) = self.game {
            config.game = game;
        }
        // Algorithm flags replace the configured selection as a whole.
        if self.hot || self.cold || self.periodic {
            config.algorithms.hot = self.hot;
            config.algorithms.cold = self.cold;
            config.algorithms.periodic = self.periodic;
        }
        if self.exclusive {
            config.merge = MergeMode::Exclusive;
        }
        if self.no_wheel {
            config.wheel = false;
        }
        if self.repetition {
            config.allow_repetition = true;
        }
        if let Some(include) = &self.include {
            config.always_include = parse_numbers(include);
        }
    }
}

impl FilterArgs {
    fn apply(&self, config: &mut AnalysisConfig) {
        if let Some(window) = self.window {
            config.draw_window = window;
        }
        if self.jackpot_only {
            config.jackpot_only = true;
        }
        if let Some(min_payout) = self.min_payout {
            config.min_payout = min_payout;
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None if Path::new(DEFAULT_CONFIG).exists() => AppConfig::from_file(Path::new(DEFAULT_CONFIG))
            .with_context(|| format!("Failed to load config from {}", DEFAULT_CONFIG)),
        None => Ok(AppConfig::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded = load_config(cli.config.as_deref());

    // Initialize tracing
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| loaded.as_ref().ok().map(|c| c.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }

    tracing::debug!("Starting lotto-wheel v{}", env!("CARGO_PKG_VERSION"));

    let mut config = loaded?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    let storage = StorageConfig::new(config.data_dir.clone());

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command {
        Commands::Analyze {
            selection,
            filter,
            summary,
        } => {
            let mut analysis = config.analysis;
            selection.apply(&mut analysis);
            filter.apply(&mut analysis);
            analysis.validate()?;

            let source = JsonlDrawSource::new(storage);
            let report = analyze(&analysis, &source)?;

            if summary {
                writeln!(out, "{}", analysis)?;
            }
            report.write_to(&mut out)?;
            writeln!(out)?;
        }

        Commands::Raw {
            game,
            bonus,
            filter,
        } => {
            let mut analysis = config.analysis;
            if let Some(game) = game {
                analysis.game = game;
            }
            filter.apply(&mut analysis);

            let kind = if bonus {
                BallKind::Bonus
            } else {
                BallKind::Numbers
            };
            if bonus && !analysis.game.params().has_bonus() {
                bail!("{} has no bonus ball", analysis.game);
            }

            let source = JsonlDrawSource::new(storage);
            write!(out, "{}", raw_report(&analysis, &source, kind)?)?;
        }

        Commands::Wheel {
            numbers,
            size,
            game,
            bonus,
            repetition,
            no_wheel,
        } => {
            let game = game.unwrap_or(config.analysis.game);
            let size = size.unwrap_or(game.params().ball_count);
            let spec = WheelSpec::new(parse_numbers(&numbers), size, repetition);
            let bonus = bonus.map(|b| BonusSet::from(parse_numbers(&b)));

            write_wheel(&mut out, &spec, bonus.as_ref(), !no_wheel)?;
            writeln!(out)?;
        }

        Commands::Record {
            game,
            date,
            numbers,
            bonus,
            jackpot,
            payout,
        } => {
            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .with_context(|| format!("Invalid --date (expected YYYY-MM-DD): {}", date))?;
            // Draw order matters here, so the numbers are not collected into a set.
            let numbers: Vec<u32> = numbers
                .split(|c: char| !c.is_ascii_digit())
                .filter(|s| !s.is_empty())
                .map(|s| s.parse::<u32>())
                .collect::<Result<_, _>>()
                .context("Invalid draw numbers")?;

            let mut draw = DrawRecord::new(game, date, numbers)
                .with_jackpot(jackpot)
                .with_payout(payout);
            if let Some(bonus) = bonus {
                draw = draw.with_bonus(bonus);
            }

            if record_draw(&storage, &draw)? {
                writeln!(out, "Recorded {} draw {} ({})", game, draw.label(), draw.id())?;
            } else {
                writeln!(out, "{} draw {} already recorded", game, draw.label())?;
            }
        }

        Commands::Games => {
            for game in Game::ALL {
                let params = game.params();
                let bonus = match params.bonus {
                    Some(b) => format!("{} of 1-{}", b.ball_count, b.range),
                    None => "none".to_string(),
                };
                writeln!(
                    out,
                    "{:<14} {:<14} {} of 1-{}, bonus {}",
                    game.slug(),
                    game.to_string(),
                    params.ball_count,
                    params.range,
                    bonus
                )?;
            }
        }
    }

    out.flush()?;
    Ok(())
}
