use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::GameError;
use crate::grid::{Coordinate, Grid};
use crate::history::HistoryStore;
use crate::random::RandomSource;
use crate::session::{Phase, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Player intent, decoupled from the key that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    /// Mark the cell under the cursor
    Select,
    /// Submit when a round is open, advance once it is scored
    Confirm,
    NewSession,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Command::Move(Direction::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::Move(Direction::Down)),
        KeyCode::Left | KeyCode::Char('h') => Some(Command::Move(Direction::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(Command::Move(Direction::Right)),
        KeyCode::Char(' ') => Some(Command::Select),
        KeyCode::Enter | KeyCode::Char('c') | KeyCode::Char('n') => Some(Command::Confirm),
        KeyCode::Char('r') => Some(Command::NewSession),
        _ => None,
    }
}

/// Cursor one step in `dir`, stopping at the grid edge
pub fn step_cursor(cursor: Coordinate, dir: Direction, grid: Grid) -> Coordinate {
    match dir {
        Direction::Up => Coordinate::new(cursor.x, cursor.y.saturating_sub(1)),
        Direction::Down => Coordinate::new(cursor.x, (cursor.y + 1).min(grid.rows - 1)),
        Direction::Left => Coordinate::new(cursor.x.saturating_sub(1), cursor.y),
        Direction::Right => Coordinate::new((cursor.x + 1).min(grid.cols - 1), cursor.y),
    }
}

/// A session plus the cursor and feedback line the player sees
#[derive(Debug)]
pub struct Play<R: RandomSource, H: HistoryStore> {
    pub session: Session<R, H>,
    pub cursor: Coordinate,
    /// Feedback shown under the board
    pub message: Option<String>,
}

impl<R: RandomSource, H: HistoryStore> Play<R, H> {
    pub fn new(session: Session<R, H>) -> Self {
        Self {
            session,
            cursor: Coordinate::new(0, 0),
            message: None,
        }
    }

    pub fn handle(&mut self, cmd: Command) -> Flow {
        let result = match cmd {
            Command::Quit => return Flow::Quit,
            Command::Move(dir) => {
                self.cursor = step_cursor(self.cursor, dir, self.session.settings().grid);
                Ok(())
            }
            Command::Select => self.select(),
            Command::Confirm => self.confirm(),
            Command::NewSession => {
                if matches!(self.session.phase(), Phase::NotStarted | Phase::Ended) {
                    self.session.start_session();
                    self.message = None;
                }
                Ok(())
            }
        };

        if let Err(e) = result {
            if !e.is_recoverable() {
                log::error!("{}", e);
            }
            self.message = Some(feedback_for(&e));
        }
        Flow::Continue
    }

    fn select(&mut self) -> Result<(), GameError> {
        if self.session.phase() != Phase::InRound {
            return Ok(());
        }
        self.session.select_cell(self.cursor)?;
        self.message = None;
        Ok(())
    }

    fn confirm(&mut self) -> Result<(), GameError> {
        match self.session.phase() {
            Phase::NotStarted | Phase::Ended => {
                self.session.start_session();
                self.message = None;
            }
            Phase::InRound => {
                let outcome = self.session.submit_choice()?;
                self.message = Some(outcome.to_string());
            }
            Phase::Scored => {
                self.session.advance_round()?;
                self.message = None;
            }
        }
        Ok(())
    }
}

fn feedback_for(e: &GameError) -> String {
    match e {
        GameError::NoSelection => "Select a cell first!".to_string(),
        GameError::TargetSelected(_) => "Targets cannot be picked, choose another cell.".to_string(),
        other => other.to_string(),
    }
}
