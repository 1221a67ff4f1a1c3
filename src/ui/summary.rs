use pinpoint::history::{average_difference, HistoryRecord};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::{ui::charting, App};

/// Pure presenter for a single history row
pub fn present_row(position: usize, record: &HistoryRecord, latest: bool) -> Row<'static> {
    let style = if latest {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    Row::new(vec![
        Cell::from(position.to_string()),
        Cell::from(record.difference.clone()),
        Cell::from(record.hits.to_string()),
    ])
    .style(style)
}

/// Render the end-of-session screen
pub fn render_summary(app: &App, f: &mut Frame) {
    let session = &app.play.session;
    let stats = session.stats();
    let history = session.history();
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(5), // Title and final stats
            Constraint::Min(6),    // History table
            Constraint::Length(8), // Chart
            Constraint::Length(1), // Instructions
        ])
        .split(area);

    let mut lines = vec![
        Line::from(format!("Your score: {:.2}", stats.total_difference)),
        Line::from(format!("Perfect hits: {}", stats.perfect_hits)),
    ];
    if let Some(avg) = average_difference(history) {
        lines.push(Line::from(format!(
            "Average over the last {} sessions: {:.2}",
            history.len(),
            avg
        )));
    }
    let title = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Game over!"))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    if history.is_empty() {
        let no_data = Paragraph::new("No sessions recorded yet.")
            .block(Block::default().borders(Borders::ALL).title("Last results"))
            .alignment(Alignment::Center);
        f.render_widget(no_data, chunks[1]);
    } else {
        let header = Row::new(vec![
            Cell::from("#"),
            Cell::from("Difference"),
            Cell::from("Perfect hits"),
        ])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
        let rows: Vec<Row> = history
            .iter()
            .enumerate()
            .map(|(idx, rec)| present_row(idx + 1, rec, idx == 0))
            .collect();
        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Length(12),
                Constraint::Length(14),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Last {} results", history.len())),
        );
        f.render_widget(table, chunks[1]);

        let bars = charting::history_bars(history);
        let bars: Vec<Bar> = bars
            .into_iter()
            .map(|(label, value)| {
                Bar::default()
                    .value(value)
                    .label(Line::from(label))
                    .text_value(charting::format_label(value))
            })
            .collect();
        let chart = BarChart::default()
            .block(Block::default().borders(Borders::ALL).title("Difference"))
            .bar_width(6)
            .bar_gap(1)
            .bar_style(Style::default().fg(Color::Magenta))
            .data(BarGroup::default().bars(&bars));
        f.render_widget(chart, chunks[2]);
    }

    let instructions = Paragraph::new("(r) or (enter) new session / (esc)ape")
        .style(Style::default().add_modifier(Modifier::ITALIC))
        .alignment(Alignment::Center);
    f.render_widget(instructions, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinpoint::controls::{Command, Play};
    use pinpoint::history::{HistoryStore, MemoryHistoryStore};
    use pinpoint::random::RngSource;
    use pinpoint::{Coordinate, Phase, Session, SessionSettings};
    use ratatui::{backend::TestBackend, Terminal};

    fn finished_app(previous: Vec<HistoryRecord>) -> App {
        let settings = SessionSettings {
            total_rounds: 1,
            ..SessionSettings::default()
        };
        let store: Box<dyn HistoryStore> = Box::new(MemoryHistoryStore::with_records(previous));
        let mut session = Session::new(settings, RngSource::seeded(11), store);
        session.start_session();
        let targets = session.targets().unwrap().clone();
        let free = session
            .settings()
            .grid
            .cells()
            .find(|c| !targets.contains(*c))
            .unwrap();

        let mut play = Play::new(session);
        play.cursor = Coordinate::new(free.x, free.y);
        play.handle(Command::Select);
        play.handle(Command::Confirm);
        play.handle(Command::Confirm);
        assert_eq!(play.session.phase(), Phase::Ended);
        App {
            play,
            session_log: None,
        }
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        terminal.draw(|f| render_summary(app, f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn summary_lists_history_newest_first() {
        let app = finished_app(vec![HistoryRecord::new(42.0, 7)]);
        let text = draw(&app);
        assert!(text.contains("Game over!"));
        assert!(text.contains("Perfect hits:"));
        assert!(text.contains("Last 2 results"));
        assert!(text.contains("42.00"));
        assert_eq!(app.play.session.history()[1].difference, "42.00");
    }

    #[test]
    fn summary_mentions_own_score() {
        let app = finished_app(Vec::new());
        let expected = format!("Your score: {:.2}", app.play.session.stats().total_difference);
        assert!(draw(&app).contains(&expected));
    }
}
