use crate::grid::Coordinate;
use crate::session::Phase;

/// Errors raised by the game controller and its collaborators
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GameError {
    #[error("select a cell first")]
    NoSelection,
    #[error("`{operation}` is not allowed while the session is {phase}")]
    InvalidState {
        operation: &'static str,
        phase: Phase,
    },
    #[error("no eligible cell: every cell is a target or there are no targets")]
    NoEligibleCell,
    #[error("cell {0} is outside the grid")]
    OutOfBounds(Coordinate),
    #[error("cell {0} is a target and cannot be picked")]
    TargetSelected(Coordinate),
    #[error("duplicate target at {0}")]
    DuplicateTarget(Coordinate),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GameError {
    /// Input mistakes the player can simply correct
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GameError::NoSelection | GameError::OutOfBounds(_) | GameError::TargetSelected(_)
        )
    }
}

/// Errors from the durable history store
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("malformed history payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
