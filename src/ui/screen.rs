use pinpoint::Phase;
use ratatui::Frame;

use crate::{ui::summary::render_summary, App};

/// A UI Screen boundary: responsible for rendering one phase of the game
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

/// Board screen - renders the grid using the App widget
pub struct BoardScreen;

impl Screen for BoardScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        f.render_widget(app, f.area());
    }
}

/// End-of-session screen with final stats and history
pub struct SummaryScreen;

impl Screen for SummaryScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_summary(app, f);
    }
}

/// Helper to construct the appropriate screen for the current phase
pub fn current_screen(phase: Phase) -> Box<dyn Screen> {
    match phase {
        Phase::Ended => Box::new(SummaryScreen),
        Phase::NotStarted | Phase::InRound | Phase::Scored => Box::new(BoardScreen),
    }
}
