//! Structured table output for live web dashboards
//!
//! A [`TableSnapshot`] is what a push-style client receives on each update: the
//! wall-clock time it was rendered, column labels that follow the current display
//! modes, and one row per visible message. It serializes to JSON as
//! `{"time": ..., "tableHeaders": {...}, "tableData": [...]}`.

use serde::Serialize;

use super::{DataCell, RenderRecord};
use crate::types::{DisplayConfig, TimestampMode};

/// Column labels, keyed by row field name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableHeaders {
    pub timestamp: String,
    pub bus: String,
    pub id: String,
    pub data: String,
    pub count: String,
}

impl TableHeaders {
    /// Labels reflecting the configured display modes
    pub fn for_config(config: &DisplayConfig) -> Self {
        let timestamp = match config.timestamp_mode {
            TimestampMode::Absolute => "Timestamp",
            TimestampMode::Delta => "Dt",
        };
        Self {
            timestamp: timestamp.to_string(),
            bus: "Bus".to_string(),
            id: format!("Id ({})", config.id_radix.label()),
            data: format!("Data ({})", config.data_radix.label()),
            count: "Count".to_string(),
        }
    }
}

/// One visible message as field/value pairs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub timestamp: String,
    pub bus: String,
    pub id: String,
    pub data: Vec<DataCell>,
    /// True when no frame arrived since the previous render
    pub dim: bool,
    pub count: u64,
}

impl From<RenderRecord> for TableRow {
    fn from(record: RenderRecord) -> Self {
        Self {
            timestamp: record.timestamp.trim().to_string(),
            bus: record.bus,
            id: record.id.trim().to_string(),
            data: record
                .data
                .into_iter()
                .map(|cell| DataCell { text: cell.text.trim().to_string(), dim: cell.dim })
                .collect(),
            dim: record.dim,
            count: record.count,
        }
    }
}

/// A complete table update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSnapshot {
    /// Local wall-clock render time, `HH:MM:SS.mmm`
    pub time: String,
    #[serde(rename = "tableHeaders")]
    pub headers: TableHeaders,
    #[serde(rename = "tableData")]
    pub rows: Vec<TableRow>,
}

impl TableSnapshot {
    /// Stamp a rendered table with the current local time
    pub fn new(headers: TableHeaders, rows: Vec<TableRow>) -> Self {
        let time = chrono::Local::now().format("%H:%M:%S%.3f").to_string();
        Self { time, headers, rows }
    }

    /// Serialize as a JSON message body
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Frame, Radix};
    use crate::{MessageStore, ViewBuilder};

    #[test]
    fn headers_follow_display_modes() {
        let headers = TableHeaders::for_config(&DisplayConfig::default());
        assert_eq!(headers.timestamp, "Dt");
        assert_eq!(headers.id, "Id (hex)");
        assert_eq!(headers.data, "Data (hex)");

        let config = DisplayConfig::default()
            .with_timestamp_mode(TimestampMode::Absolute)
            .with_id_radix(Radix::Dec)
            .with_data_radix(Radix::Dec);
        let headers = TableHeaders::for_config(&config);
        assert_eq!(headers.timestamp, "Timestamp");
        assert_eq!(headers.id, "Id (dec)");
        assert_eq!(headers.data, "Data (dec)");
    }

    #[test]
    fn rows_carry_trimmed_values_and_dim_flags() {
        let store = MessageStore::new();
        store.record(Frame::new("can0", 0x10, [0x01, 0x02], 1.0));
        store.record(Frame::new("can0", 0x10, [0x01, 0x03], 1.5));

        let table = ViewBuilder::new(&store, DisplayConfig::default()).table(1.5);
        let row = &table.rows[0];

        assert_eq!(row.timestamp, "0.500");
        assert_eq!(row.id, "10");
        assert_eq!(row.bus, "can0");
        assert_eq!(row.count, 2);
        assert!(!row.dim);
        assert_eq!(
            row.data,
            vec![
                DataCell { text: "01".into(), dim: true },
                DataCell { text: "03".into(), dim: false }
            ]
        );
    }

    #[test]
    fn snapshot_serializes_with_feed_field_names() {
        let store = MessageStore::new();
        store.record(Frame::new("can1", 0x7E8, [0x41], 2.0));

        let table = ViewBuilder::new(&store, DisplayConfig::default()).table(2.0);
        let json: serde_json::Value = serde_json::from_str(&table.to_json().unwrap()).unwrap();

        assert_eq!(json["tableHeaders"]["id"], "Id (hex)");
        assert_eq!(json["tableData"][0]["bus"], "can1");
        assert_eq!(json["tableData"][0]["id"], "7E8");
        assert_eq!(json["tableData"][0]["data"][0]["text"], "41");
        assert_eq!(json["time"].as_str().unwrap().len(), "12:34:56.789".len());
    }
}
