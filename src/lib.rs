// Library surface for headless/integration tests and reuse.
// The terminal UI lives with the binary in main.rs.
pub mod app_dirs;
pub mod config;
pub mod controls;
pub mod error;
pub mod grid;
pub mod history;
pub mod logging;
pub mod random;
pub mod runtime;
pub mod session;
pub mod session_log;
pub mod solver;
pub mod targets;

pub use error::{GameError, StoreError};
pub use grid::{Coordinate, Grid};
pub use session::{Phase, RoundOutcome, Session, SessionSettings, SessionStats};
