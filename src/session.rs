use crate::config::Config;
use crate::error::GameError;
use crate::grid::{total_distance, Coordinate, Grid};
use crate::history::{push_capped, HistoryRecord, HistoryStore, HISTORY_LIMIT};
use crate::random::RandomSource;
use crate::solver::find_optimal;
use crate::targets::{generate, TargetRange, TargetSet};
use std::fmt;

/// Where the controller is in the round cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    #[strum(to_string = "not started")]
    NotStarted,
    #[strum(to_string = "in a round")]
    InRound,
    #[strum(to_string = "scored")]
    Scored,
    #[strum(to_string = "ended")]
    Ended,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub grid: Grid,
    pub total_rounds: usize,
    pub targets: TargetRange,
    pub history_limit: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            grid: Grid::default(),
            total_rounds: 10,
            targets: TargetRange::default(),
            history_limit: HISTORY_LIMIT,
        }
    }
}

impl From<&Config> for SessionSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            grid: Grid::new(cfg.cols, cfg.rows),
            total_rounds: cfg.total_rounds,
            targets: TargetRange {
                min: cfg.min_targets,
                max: cfg.max_targets,
            },
            history_limit: cfg.history_limit,
        }
    }
}

/// State of the round currently on the board
#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    pub round_number: usize,
    pub targets: TargetSet,
    pub player_choice: Option<Coordinate>,
    pub optimal_choice: Option<Coordinate>,
}

impl RoundState {
    fn new(round_number: usize, targets: TargetSet) -> Self {
        Self {
            round_number,
            targets,
            player_choice: None,
            optimal_choice: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionStats {
    pub total_difference: f64,
    pub perfect_hits: u32,
    pub rounds_played: u32,
}

impl SessionStats {
    pub fn average_difference(&self) -> Option<f64> {
        match self.rounds_played {
            0 => None,
            n => Some(self.total_difference / n as f64),
        }
    }
}

/// Result of scoring one pick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoundOutcome {
    Perfect {
        user_total: f64,
    },
    NearMiss {
        user_total: f64,
        correct_total: f64,
        difference: f64,
    },
}

impl RoundOutcome {
    pub fn is_perfect(&self) -> bool {
        matches!(self, RoundOutcome::Perfect { .. })
    }

    pub fn user_total(&self) -> f64 {
        match *self {
            RoundOutcome::Perfect { user_total } => user_total,
            RoundOutcome::NearMiss { user_total, .. } => user_total,
        }
    }

    pub fn difference(&self) -> f64 {
        match *self {
            RoundOutcome::Perfect { .. } => 0.0,
            RoundOutcome::NearMiss { difference, .. } => difference,
        }
    }
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundOutcome::Perfect { user_total } => write!(
                f,
                "Perfect! You found the best cell. Total distance: {:.2}.",
                user_total
            ),
            RoundOutcome::NearMiss {
                user_total,
                correct_total,
                difference,
            } => write!(
                f,
                "Your answer: {:.2} | Best answer: {:.2} | Difference: {:.2}",
                user_total, correct_total, difference
            ),
        }
    }
}

/// Drives rounds, scoring and the session history.
///
/// All mutable game state lives here; the UI only calls methods and reads
/// accessors.
#[derive(Debug)]
pub struct Session<R: RandomSource, H: HistoryStore> {
    settings: SessionSettings,
    source: R,
    store: H,
    phase: Phase,
    round: Option<RoundState>,
    stats: SessionStats,
    outcome: Option<RoundOutcome>,
    history: Vec<HistoryRecord>,
}

impl<R: RandomSource, H: HistoryStore> Session<R, H> {
    pub fn new(settings: SessionSettings, source: R, store: H) -> Self {
        let history = store.load();
        Self {
            settings,
            source,
            store,
            phase: Phase::NotStarted,
            round: None,
            stats: SessionStats::default(),
            outcome: None,
            history,
        }
    }

    /// Reset counters and deal the first round. Allowed from any phase.
    pub fn start_session(&mut self) {
        self.stats = SessionStats::default();
        self.outcome = None;
        self.deal_round(1);
        log::info!(
            "session started: {} rounds on a {}x{} grid",
            self.settings.total_rounds,
            self.settings.grid.cols,
            self.settings.grid.rows
        );
    }

    fn deal_round(&mut self, round_number: usize) {
        let targets = generate(self.settings.grid, self.settings.targets, &mut self.source);
        log::debug!("round {} dealt with {} targets", round_number, targets.len());
        self.round = Some(RoundState::new(round_number, targets));
        self.phase = Phase::InRound;
    }

    /// Swap the current round's targets for a fixed set, clearing any selection.
    ///
    /// Meant for fixed boards in tests and replays. An empty set is accepted,
    /// in which case the next `submit_choice` fails with `NoEligibleCell` and
    /// the round stays open.
    pub fn load_targets(&mut self, targets: TargetSet) -> Result<(), GameError> {
        self.expect_phase(Phase::InRound, "load_targets")?;
        let grid = self.settings.grid;
        if let Some(outside) = targets.iter().find(|c| !grid.contains(**c)) {
            return Err(GameError::OutOfBounds(*outside));
        }
        let round = self.round_mut()?;
        round.targets = targets;
        round.player_choice = None;
        Ok(())
    }

    /// Record the tentative pick, replacing any earlier one
    pub fn select_cell(&mut self, cell: Coordinate) -> Result<(), GameError> {
        self.expect_phase(Phase::InRound, "select_cell")?;
        if !self.settings.grid.contains(cell) {
            return Err(GameError::OutOfBounds(cell));
        }
        let round = self.round_mut()?;
        if round.targets.contains(cell) {
            return Err(GameError::TargetSelected(cell));
        }
        round.player_choice = Some(cell);
        Ok(())
    }

    /// Score the tentative pick against the optimal cell
    pub fn submit_choice(&mut self) -> Result<RoundOutcome, GameError> {
        self.expect_phase(Phase::InRound, "submit_choice")?;
        let grid = self.settings.grid;
        let round = self.round_mut()?;
        let choice = round.player_choice.ok_or(GameError::NoSelection)?;

        let optimum = find_optimal(grid, &round.targets)?;
        let user_total = total_distance(choice, &round.targets);
        let correct_total = optimum.total_distance;
        let difference = (user_total - correct_total).abs();
        round.optimal_choice = Some(optimum.cell);
        let round_number = round.round_number;

        let outcome = if choice == optimum.cell {
            self.stats.perfect_hits += 1;
            RoundOutcome::Perfect { user_total }
        } else {
            RoundOutcome::NearMiss {
                user_total,
                correct_total,
                difference,
            }
        };
        self.stats.total_difference += difference;
        self.stats.rounds_played += 1;
        self.outcome = Some(outcome);
        self.phase = Phase::Scored;

        log::debug!(
            "round {} scored: picked {}, best {}, difference {:.4}",
            round_number,
            choice,
            optimum.cell,
            difference
        );
        Ok(outcome)
    }

    /// Move on to the next round, or close the session once the round
    /// number reaches `total_rounds`. Round `total_rounds` itself is never
    /// dealt, so a session scores `total_rounds - 1` rounds (at least one).
    pub fn advance_round(&mut self) -> Result<Phase, GameError> {
        self.expect_phase(Phase::Scored, "advance_round")?;
        let next = self.round_mut()?.round_number + 1;
        self.outcome = None;

        if next < self.settings.total_rounds {
            self.deal_round(next);
        } else {
            self.finish();
        }
        Ok(self.phase)
    }

    fn finish(&mut self) {
        self.phase = Phase::Ended;
        let record = HistoryRecord::new(self.stats.total_difference, self.stats.perfect_hits);
        log::info!(
            "session ended: difference {}, perfect hits {}",
            record.difference,
            record.hits
        );

        let mut history = self.store.load();
        push_capped(&mut history, record, self.settings.history_limit);
        if let Err(e) = self.store.save(&history) {
            log::warn!("could not save session history: {}", e);
        }
        self.history = history;
    }

    fn expect_phase(&self, wanted: Phase, operation: &'static str) -> Result<(), GameError> {
        if self.phase == wanted {
            Ok(())
        } else {
            Err(GameError::InvalidState {
                operation,
                phase: self.phase,
            })
        }
    }

    fn round_mut(&mut self) -> Result<&mut RoundState, GameError> {
        let phase = self.phase;
        self.round.as_mut().ok_or(GameError::InvalidState {
            operation: "round access",
            phase,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn targets(&self) -> Option<&TargetSet> {
        self.round.as_ref().map(|r| &r.targets)
    }

    pub fn selection(&self) -> Option<Coordinate> {
        self.round.as_ref().and_then(|r| r.player_choice)
    }

    /// Known once the round has been scored
    pub fn optimal(&self) -> Option<Coordinate> {
        self.round.as_ref().and_then(|r| r.optimal_choice)
    }

    pub fn outcome(&self) -> Option<&RoundOutcome> {
        self.outcome.as_ref()
    }

    /// (current, total) for display
    pub fn round_counter(&self) -> (usize, usize) {
        let current = self.round.as_ref().map_or(0, |r| r.round_number);
        (current, self.settings.total_rounds)
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Finished sessions, newest first
    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    pub fn store(&self) -> &H {
        &self.store
    }
}
