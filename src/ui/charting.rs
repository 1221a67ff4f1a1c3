use pinpoint::history::HistoryRecord;

/// Bars for the history chart, oldest session on the left.
/// Values are hundredths of a distance unit so two decimals survive as integers.
pub fn history_bars(history: &[HistoryRecord]) -> Vec<(String, u64)> {
    history
        .iter()
        .enumerate()
        .rev()
        .map(|(idx, rec)| {
            let value = rec.difference_value().unwrap_or(0.0).max(0.0);
            (format!("#{}", idx + 1), (value * 100.0).round() as u64)
        })
        .collect()
}

/// Format a bar value (hundredths) back into a distance label
pub fn format_label(hundredths: u64) -> String {
    let val = hundredths as f64 / 100.0;
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
