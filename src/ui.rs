pub mod charting;
pub mod screen;
pub mod summary;

use pinpoint::{Coordinate, Phase};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;
/// Columns used by one board cell
const CELL_WIDTH: u16 = 3;

/// What a board cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    Target,
    Selected,
    Optimal,
    /// Player picked the optimal cell
    Hit,
}

impl CellKind {
    fn glyph(&self) -> &'static str {
        match self {
            CellKind::Empty => "·",
            CellKind::Target => "●",
            CellKind::Selected => "■",
            CellKind::Optimal => "◆",
            CellKind::Hit => "★",
        }
    }

    fn style(&self) -> Style {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        match self {
            CellKind::Empty => Style::default().add_modifier(Modifier::DIM),
            CellKind::Target => bold.fg(Color::Green),
            CellKind::Selected => bold.fg(Color::Cyan),
            CellKind::Optimal => bold.fg(Color::Yellow),
            CellKind::Hit => bold.fg(Color::Magenta),
        }
    }
}

pub fn cell_kind(app: &App, cell: Coordinate) -> CellKind {
    let session = &app.play.session;
    let is_target = session.targets().is_some_and(|t| t.contains(cell));
    let selected = session.selection() == Some(cell);
    let optimal = session.optimal() == Some(cell);

    match (is_target, selected, optimal) {
        (true, _, _) => CellKind::Target,
        (false, true, true) => CellKind::Hit,
        (false, false, true) => CellKind::Optimal,
        (false, true, false) => CellKind::Selected,
        (false, false, false) => CellKind::Empty,
    }
}

fn board_lines(app: &App) -> Vec<Line<'static>> {
    let grid = app.play.session.settings().grid;
    (0..grid.rows)
        .map(|y| {
            let spans = (0..grid.cols)
                .map(|x| {
                    let cell = Coordinate::new(x, y);
                    let kind = cell_kind(app, cell);
                    let mut style = kind.style();
                    if cell == app.play.cursor {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    Span::styled(format!(" {} ", kind.glyph()), style)
                })
                .collect::<Vec<Span>>();
            Line::from(spans)
        })
        .collect()
}

fn help_text(phase: Phase) -> &'static str {
    match phase {
        Phase::InRound => "(arrows/hjkl) move / (space) select / (enter) check / (esc)ape",
        Phase::Scored => "(enter) next round / (esc)ape",
        Phase::NotStarted | Phase::Ended => "(enter) start / (esc)ape",
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.play.session;
        let grid = session.settings().grid;
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let board_height = grid.rows as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // round counter
                Constraint::Length(1), // instruction
                Constraint::Length(1), // padding
                Constraint::Length(board_height),
                Constraint::Length(1), // padding
                Constraint::Min(2),    // feedback
                Constraint::Length(1), // legend
            ])
            .split(area);

        let (current, total) = session.round_counter();
        Paragraph::new(Span::styled(format!("Round {}/{}", current, total), bold_style))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        if current <= 1 && session.phase() == Phase::InRound {
            Paragraph::new(Span::styled(
                "Pick the cell with the smallest total distance to all green targets",
                italic_style,
            ))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);
        }

        // center the board by hand so cells stay aligned
        let board_width = grid.cols as u16 * CELL_WIDTH;
        let board_area = Rect {
            x: chunks[3].x + chunks[3].width.saturating_sub(board_width) / 2,
            width: board_width.min(chunks[3].width),
            ..chunks[3]
        };
        Paragraph::new(board_lines(self)).render(board_area, buf);

        if let Some(message) = &self.play.message {
            let style = match session.outcome() {
                Some(o) if o.is_perfect() => bold_style.fg(Color::Green),
                Some(_) => bold_style.fg(Color::Yellow),
                None => bold_style.fg(Color::Red),
            };
            let alignment = if message.width() <= chunks[5].width as usize {
                Alignment::Center
            } else {
                Alignment::Left
            };
            Paragraph::new(Span::styled(message.clone(), style))
                .alignment(alignment)
                .wrap(Wrap { trim: true })
                .render(chunks[5], buf);
        }

        Paragraph::new(Span::styled(help_text(session.phase()), italic_style))
            .render(chunks[6], buf);
    }
}
