//! Request orchestration.
//!
//! Runs the selected algorithms over a game's history, merges their picks,
//! adds the caller's lucky numbers and collects bonus picks for games that
//! draw a bonus ball. An algorithm that fails is reported next to the
//! results of the others instead of aborting the request.

use std::collections::BTreeSet;
use std::fmt;
use std::io::{self, Write};

use tracing::{debug, info, warn};

use crate::calculate::{
    frequency_report, merge, periodic_pick, rank, AnalysisError, BallKind, FrequencyTable,
    Temperature,
};
use crate::config::{Algorithm, AnalysisConfig};
use crate::models::{DrawRecord, Game, GameParams};
use crate::storage::DrawSource;
use crate::wheel::{self, BonusSet, WheelSpec};

/// An algorithm that could not produce a pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmFailure {
    pub algorithm: Algorithm,
    pub error: AnalysisError,
}

impl fmt::Display for AlgorithmFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.algorithm, self.error)
    }
}

/// Outcome of one analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    pub game: Game,

    /// Draws that passed the window and filters
    pub draws_counted: usize,

    /// Merged picks plus the always-include numbers
    pub numbers: BTreeSet<u32>,

    /// Bonus picks; `None` for games without a bonus ball
    pub bonus: Option<BonusSet>,

    pub failures: Vec<AlgorithmFailure>,

    spec: WheelSpec,
    wheel: bool,
}

impl AnalysisReport {
    /// Wheel built from the picked numbers.
    pub fn wheel_spec(&self) -> &WheelSpec {
        &self.spec
    }

    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Result text followed by the `Errors:` block, if any.
    pub fn render(&self) -> String {
        let mut out = wheel::render(&self.spec, self.bonus.as_ref(), self.wheel);
        out.push_str(&self.errors_block());
        out
    }

    /// Stream the same text as [`AnalysisReport::render`].
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        wheel::write_wheel(out, &self.spec, self.bonus.as_ref(), self.wheel)?;
        out.write_all(self.errors_block().as_bytes())?;
        out.flush()
    }

    fn errors_block(&self) -> String {
        if self.failures.is_empty() {
            return String::new();
        }

        let mut block = String::from("\n\nErrors:\n");
        for failure in &self.failures {
            block.push_str(&failure.to_string());
            block.push('\n');
        }
        block
    }
}

/// Numbers and bonus values picked by one algorithm.
#[derive(Debug, Clone, Default)]
struct Pick {
    numbers: BTreeSet<u32>,
    bonus: BTreeSet<u32>,
}

/// Frequency tables of the counted draws.
struct Tables {
    numbers: FrequencyTable,
    bonus: Option<FrequencyTable>,
}

impl Tables {
    fn count(draws: &[DrawRecord], params: &GameParams) -> Self {
        Self {
            numbers: FrequencyTable::count(draws, params.range),
            bonus: params
                .bonus
                .map(|b| FrequencyTable::count_bonus(draws, b.range)),
        }
    }
}

/// Run the configured request against `source`.
pub fn analyze<S: DrawSource + ?Sized>(
    config: &AnalysisConfig,
    source: &S,
) -> Result<AnalysisReport, AnalysisError> {
    let algorithms = config.algorithms.selected();
    if algorithms.is_empty() {
        return Err(AnalysisError::NoAlgorithmSelected);
    }

    let game = config.game;
    let params = game.params();
    let history = load_history(source, game)?;
    let counted = config.filter().apply(&history);

    info!(
        "Analyzing {} with {} of {} draws",
        game,
        counted.len(),
        history.len()
    );

    let tables = Tables::count(&counted, &params);

    let mut picks = Vec::new();
    let mut failures = Vec::new();
    for algorithm in algorithms {
        match run(algorithm, &params, &tables, &history) {
            Ok(pick) => {
                debug!("{} picked {:?} bonus {:?}", algorithm, pick.numbers, pick.bonus);
                picks.push(pick);
            }
            Err(error) => {
                warn!("{} algorithm failed: {}", algorithm, error);
                failures.push(AlgorithmFailure { algorithm, error });
            }
        }
    }

    if picks.is_empty() {
        return Err(match failures.into_iter().next() {
            Some(failure) => failure.error,
            None => AnalysisError::NoAlgorithmSelected,
        });
    }

    let mut numbers = merge(config.merge, picks.iter().map(|p| &p.numbers));
    numbers.extend(
        config
            .always_include
            .iter()
            .copied()
            .filter(|&n| params.in_range(n)),
    );

    let bonus = params
        .bonus
        .map(|_| BonusSet::new(picks.iter().flat_map(|p| p.bonus.iter().copied())));

    info!(
        "Selected {} numbers ({} merge), {} failed algorithms",
        numbers.len(),
        config.merge,
        failures.len()
    );

    let spec = WheelSpec::new(
        numbers.iter().copied(),
        params.ball_count,
        config.allow_repetition,
    );

    Ok(AnalysisReport {
        game,
        draws_counted: counted.len(),
        numbers,
        bonus,
        failures,
        spec,
        wheel: config.wheel,
    })
}

/// Frequency dump of the counted draws, hottest bucket first.
///
/// Asking for the bonus table of a game without a bonus ball gives an
/// empty report.
pub fn raw_report<S: DrawSource + ?Sized>(
    config: &AnalysisConfig,
    source: &S,
    kind: BallKind,
) -> Result<String, AnalysisError> {
    let params = config.game.params();
    let history = load_history(source, config.game)?;
    let counted = config.filter().apply(&history);

    let table = match (kind, params.bonus) {
        (BallKind::Numbers, _) => FrequencyTable::count(&counted, params.range),
        (BallKind::Bonus, Some(bonus)) => FrequencyTable::count_bonus(&counted, bonus.range),
        (BallKind::Bonus, None) => {
            info!("{} has no bonus ball", config.game);
            return Ok(String::new());
        }
    };

    Ok(frequency_report(&table))
}

fn load_history<S: DrawSource + ?Sized>(
    source: &S,
    game: Game,
) -> Result<Vec<DrawRecord>, AnalysisError> {
    source
        .load(game)
        .map_err(|e| AnalysisError::DataSourceUnavailable(e.to_string()))
}

fn run(
    algorithm: Algorithm,
    params: &GameParams,
    tables: &Tables,
    history: &[DrawRecord],
) -> Result<Pick, AnalysisError> {
    match algorithm {
        Algorithm::Hot => Ok(ranked(Temperature::Hot, params, tables)),
        Algorithm::Cold => Ok(ranked(Temperature::Cold, params, tables)),
        Algorithm::Periodic => {
            let numbers =
                periodic_pick(params.ball_count, params.range, history, BallKind::Numbers)?;
            // The bonus comes from the same lagged draw as the numbers.
            let bonus = if params.has_bonus() {
                periodic_pick(params.ball_count, params.range, history, BallKind::Bonus)?
            } else {
                BTreeSet::new()
            };
            Ok(Pick { numbers, bonus })
        }
    }
}

fn ranked(temperature: Temperature, params: &GameParams, tables: &Tables) -> Pick {
    let numbers = rank(&tables.numbers, temperature, params.ball_count, params.range);
    let bonus = match (params.bonus, &tables.bonus) {
        (Some(bonus), Some(table)) => rank(table, temperature, bonus.ball_count, bonus.range),
        _ => BTreeSet::new(),
    };
    Pick { numbers, bonus }
}
