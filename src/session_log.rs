use crate::session::SessionStats;
use chrono::Local;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

/// One line of the append-only session log
#[derive(Debug, Serialize)]
struct LogRow {
    date: String,
    rounds: u32,
    total_difference: String,
    perfect_hits: u32,
    avg_difference: String,
}

/// Append a finished session to the CSV log at `path`, writing the header on first use
pub fn append_session(path: &Path, stats: &SessionStats) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let needs_header = !path.exists();
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_header)
        .from_writer(file);

    writer
        .serialize(LogRow {
            date: Local::now().format("%c").to_string(),
            rounds: stats.rounds_played,
            total_difference: format!("{:.2}", stats.total_difference),
            perfect_hits: stats.perfect_hits,
            avg_difference: stats
                .average_difference()
                .map_or(String::new(), |avg| format!("{:.2}", avg)),
        })
        .map_err(io::Error::other)?;
    writer.flush()
}
