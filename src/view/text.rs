//! Terminal line formatting

use crossterm::style::Stylize;

use super::RenderRecord;
use crate::types::TimestampMode;

/// Whether lines carry terminal styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextStyle {
    /// Dim unchanged bytes and rows without new traffic
    #[default]
    Ansi,
    /// No escape sequences, for logs and non-terminal consumers
    Plain,
}

/// Format one record as a terminal line.
///
/// Layout: `Dt: <delta>` or `Timestamp: <abs>`, then bus, identifier and the
/// payload tokens separated by single spaces. A dim row is dimmed as a whole;
/// otherwise each unchanged byte is dimmed on its own.
pub fn format_line(record: &RenderRecord, mode: TimestampMode, style: TextStyle) -> String {
    let timestamp_label = match mode {
        TimestampMode::Absolute => "Timestamp",
        TimestampMode::Delta => "Dt",
    };

    let styled_bytes = style == TextStyle::Ansi && !record.dim;
    let data = record
        .data
        .iter()
        .map(|cell| {
            if styled_bytes && cell.dim {
                cell.text.as_str().dim().to_string()
            } else {
                cell.text.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    let line = format!(
        "{}: {}    Bus: {:5}    Id: {}    Data: {}",
        timestamp_label, record.timestamp, record.bus, record.id, data
    );
    let line = line.trim_end();

    if style == TextStyle::Ansi && record.dim {
        line.dim().to_string()
    } else {
        line.to_string()
    }
}
