//! Sorted, filtered views of the message store.
//!
//! A [`ViewBuilder`] turns the store into an ordered list of [`RenderRecord`]s,
//! one per message that is not stale. Building a view is a render pass: every
//! visible message has its freshness flag cleared, so a second build without new
//! traffic shows its rows dimmed.
//!
//! The records are then shaped for two consumers:
//! - [`text`]: terminal lines, ANSI styled or plain
//! - [`table`]: header labels plus field/value rows for a live web table
//!
//! # Example
//!
//! ```rust
//! use canscope::{DisplayConfig, Frame, MessageStore, ViewBuilder};
//!
//! let store = MessageStore::new();
//! store.record(Frame::new("can0", 0x100, [0x01, 0x02], 10.0));
//!
//! let view = ViewBuilder::new(&store, DisplayConfig::default());
//! let lines = view.plain_lines(10.5);
//! assert_eq!(lines, vec!["Dt:  0.000    Bus: can0     Id: 100    Data: 01 02"]);
//! ```

pub mod table;
pub mod text;

use serde::Serialize;

use crate::store::MessageStore;
use crate::types::{DisplayConfig, MessageKey, MessageState, Radix, SortMode, TimestampMode};

pub use table::{TableHeaders, TableRow, TableSnapshot};
pub use text::{TextStyle, format_line};

/// One formatted payload byte
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataCell {
    /// Byte rendered in the configured radix
    pub text: String,
    /// True when the byte did not change or the whole row is not fresh
    pub dim: bool,
}

/// One visible message, formatted for display
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRecord {
    /// Slot this record was rendered from
    pub key: MessageKey,
    /// Fixed-width timestamp column (absolute time or delta)
    pub timestamp: String,
    /// Bus label
    pub bus: String,
    /// Identifier column in the configured radix
    pub id: String,
    /// Payload tokens with per-byte dim flags
    pub data: Vec<DataCell>,
    /// True when no frame arrived since the previous render
    pub dim: bool,
    /// Receipt time of the last frame
    pub received_at: f64,
    /// Seconds between the two most recent frames
    pub delta: f64,
    /// Per-byte change flags of the last frame
    pub byte_changed: Vec<bool>,
    /// Frames recorded for the key so far
    pub count: u64,
}

/// Builds render records from a store with a fixed display configuration
#[derive(Debug, Clone, Copy)]
pub struct ViewBuilder<'a> {
    store: &'a MessageStore,
    config: DisplayConfig,
}

impl<'a> ViewBuilder<'a> {
    pub fn new(store: &'a MessageStore, config: DisplayConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Render pass at time `now` (same clock as the frame timestamps).
    ///
    /// Drops messages more than `staleness_timeout` seconds old, sorts the rest and
    /// marks them rendered.
    pub fn build(&self, now: f64) -> Vec<RenderRecord> {
        let mut visible = self.store.take_visible(now, self.config.staleness_timeout);
        sort_visible(&mut visible, self.config.sort_mode);
        visible.into_iter().map(|(key, state)| self.record_for(key, &state)).collect()
    }

    /// Render pass producing ANSI styled terminal lines
    pub fn styled_lines(&self, now: f64) -> Vec<String> {
        self.lines(now, TextStyle::Ansi)
    }

    /// Render pass producing lines without escape sequences
    pub fn plain_lines(&self, now: f64) -> Vec<String> {
        self.lines(now, TextStyle::Plain)
    }

    /// Render pass producing one terminal line per record
    pub fn lines(&self, now: f64, style: TextStyle) -> Vec<String> {
        let mode = self.config.timestamp_mode;
        self.build(now).iter().map(|record| text::format_line(record, mode, style)).collect()
    }

    /// Render pass producing a table snapshot for programmatic consumers
    pub fn table(&self, now: f64) -> TableSnapshot {
        let headers = TableHeaders::for_config(&self.config);
        let rows = self.build(now).into_iter().map(TableRow::from).collect();
        TableSnapshot::new(headers, rows)
    }

    fn record_for(&self, key: MessageKey, state: &MessageState) -> RenderRecord {
        let fresh = state.seen_since_last_render();
        let frame = state.last_frame();
        let data = frame
            .data
            .iter()
            .enumerate()
            .map(|(i, byte)| DataCell {
                text: format_byte(*byte, self.config.data_radix),
                dim: !fresh || !state.byte_changed().get(i).copied().unwrap_or(false),
            })
            .collect();

        RenderRecord {
            timestamp: format_timestamp(state, self.config.timestamp_mode),
            bus: key.bus().to_string(),
            id: format_id(key.id(), self.config.id_radix),
            key,
            data,
            dim: !fresh,
            received_at: state.last_received_at(),
            delta: state.last_delta(),
            byte_changed: state.byte_changed().to_vec(),
            count: state.count(),
        }
    }
}

/// Stable sort of a render pass by the configured mode.
///
/// Identifiers always compare as numbers, never as their rendered text.
pub fn sort_visible(visible: &mut [(MessageKey, MessageState)], mode: SortMode) {
    match mode {
        SortMode::None => {}
        SortMode::ById => visible.sort_by_key(|(key, _)| key.id()),
        SortMode::ByBus => visible.sort_by(|(a, _), (b, _)| a.bus().cmp(b.bus())),
        SortMode::ByBusThenId => visible.sort_by(|(a, _), (b, _)| a.cmp(b)),
    }
}

/// Timestamp column: absolute seconds (`{:15.3}`) or delta seconds (`{:6.3}`)
pub fn format_timestamp(state: &MessageState, mode: TimestampMode) -> String {
    match mode {
        TimestampMode::Absolute => format!("{:15.3}", state.last_received_at()),
        TimestampMode::Delta => format!("{:6.3}", state.last_delta()),
    }
}

/// Identifier column: `{:3X}` in hex, `{:4}` in decimal
pub fn format_id(id: u32, radix: Radix) -> String {
    match radix {
        Radix::Hex => format!("{:3X}", id),
        Radix::Dec => format!("{:4}", id),
    }
}

/// Payload byte token: `{:02X}` in hex, `{:3}` in decimal
pub fn format_byte(byte: u8, radix: Radix) -> String {
    match radix {
        Radix::Hex => format!("{:02X}", byte),
        Radix::Dec => format!("{:3}", byte),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Frame;

    fn store_with(frames: &[(&str, u32, &[u8], f64)]) -> MessageStore {
        let store = MessageStore::new();
        for (bus, id, data, t) in frames {
            store.record(Frame::new(*bus, *id, data.to_vec(), *t));
        }
        store
    }

    fn order(records: &[RenderRecord]) -> Vec<(String, u32)> {
        records.iter().map(|r| (r.key.bus().to_string(), r.key.id())).collect()
    }

    #[test]
    fn by_bus_then_id_sorts_ids_numerically() {
        let store = store_with(&[("B", 5, &[], 0.0), ("A", 10, &[], 0.0), ("A", 2, &[], 0.0)]);
        let config = DisplayConfig::default().with_sort_mode(SortMode::ByBusThenId);

        let records = ViewBuilder::new(&store, config).build(0.0);

        // Lexicographic order of the rendered ids would put "10" before "2"
        assert_eq!(
            order(&records),
            vec![("A".into(), 2), ("A".into(), 10), ("B".into(), 5)]
        );
    }

    #[test]
    fn by_bus_then_id_is_numeric_in_decimal_display_too() {
        let store = store_with(&[("A", 100, &[], 0.0), ("A", 9, &[], 0.0), ("A", 20, &[], 0.0)]);
        let config = DisplayConfig::default().with_id_radix(Radix::Dec);

        let ids: Vec<_> =
            ViewBuilder::new(&store, config).build(0.0).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["   9", "  20", " 100"]);
    }

    #[test]
    fn sort_none_keeps_first_seen_order() {
        let store =
            store_with(&[("can1", 3, &[], 0.0), ("can0", 7, &[], 0.0), ("can0", 1, &[], 0.0)]);
        let config = DisplayConfig::default().with_sort_mode(SortMode::None);

        let records = ViewBuilder::new(&store, config).build(0.0);
        assert_eq!(
            order(&records),
            vec![("can1".into(), 3), ("can0".into(), 7), ("can0".into(), 1)]
        );
    }

    #[test]
    fn sort_by_id_interleaves_buses() {
        let store = store_with(&[
            ("can1", 0x200, &[], 0.0),
            ("can0", 0x300, &[], 0.0),
            ("can0", 0x100, &[], 0.0),
            ("can1", 0x100, &[], 0.0),
        ]);
        let config = DisplayConfig::default().with_sort_mode(SortMode::ById);

        let records = ViewBuilder::new(&store, config).build(0.0);
        assert_eq!(
            order(&records),
            vec![
                ("can0".into(), 0x100),
                ("can1".into(), 0x100),
                ("can1".into(), 0x200),
                ("can0".into(), 0x300)
            ]
        );
    }

    #[test]
    fn sort_by_bus_keeps_first_seen_order_within_bus() {
        let store =
            store_with(&[("can1", 1, &[], 0.0), ("can0", 9, &[], 0.0), ("can0", 2, &[], 0.0)]);
        let config = DisplayConfig::default().with_sort_mode(SortMode::ByBus);

        let records = ViewBuilder::new(&store, config).build(0.0);
        assert_eq!(
            order(&records),
            vec![("can0".into(), 9), ("can0".into(), 2), ("can1".into(), 1)]
        );
    }

    #[test]
    fn staleness_boundary_is_inclusive() {
        let store = store_with(&[("can0", 1, &[], 0.0), ("can0", 2, &[], 5.0)]);
        let config = DisplayConfig::default().with_staleness_timeout(10.0);
        let view = ViewBuilder::new(&store, config);

        // Exactly 10 s old: still shown
        assert_eq!(order(&view.build(10.0)).len(), 2);
        // Just past the timeout: hidden
        assert_eq!(order(&view.build(10.5)), vec![("can0".into(), 2)]);
    }

    #[test]
    fn second_render_without_traffic_is_dim() {
        let store = store_with(&[("can0", 1, &[0xAA], 0.0)]);
        let view = ViewBuilder::new(&store, DisplayConfig::default());

        let first = view.build(0.0);
        let second = view.build(0.0);

        assert!(!first[0].dim);
        assert!(second[0].dim);
        assert!(second[0].data.iter().all(|cell| cell.dim));
    }

    #[test]
    fn only_changed_bytes_are_highlighted() {
        let store = store_with(&[
            ("can0", 1, &[0x01, 0x02, 0x03], 0.0),
            ("can0", 1, &[0x01, 0x05, 0x03], 0.1),
        ]);
        let records = ViewBuilder::new(&store, DisplayConfig::default()).build(0.1);

        let dims: Vec<bool> = records[0].data.iter().map(|cell| cell.dim).collect();
        assert_eq!(dims, vec![true, false, true]);
        assert!(!records[0].dim);
    }

    #[test]
    fn timestamp_columns_are_fixed_width() {
        let store = store_with(&[
            ("can0", 1, &[], 1_436_509_052.25),
            ("can0", 1, &[], 1_436_509_052.5),
        ]);

        let absolute = DisplayConfig::default().with_timestamp_mode(TimestampMode::Absolute);
        let record = &ViewBuilder::new(&store, absolute).build(1_436_509_052.5)[0];
        assert_eq!(record.timestamp, " 1436509052.500");
        assert_eq!(format!("{:15.3}", 1.5), "          1.500");

        let delta = DisplayConfig::default().with_timestamp_mode(TimestampMode::Delta);
        let record = &ViewBuilder::new(&store, delta).build(1_436_509_052.5)[0];
        assert_eq!(record.timestamp, " 0.250");
    }

    #[test]
    fn radix_formatting() {
        assert_eq!(format_id(0x7E8, Radix::Hex), "7E8");
        assert_eq!(format_id(0x10, Radix::Hex), " 10");
        assert_eq!(format_id(0x18DAF110, Radix::Hex), "18DAF110");
        assert_eq!(format_id(16, Radix::Dec), "  16");
        assert_eq!(format_byte(0x0F, Radix::Hex), "0F");
        assert_eq!(format_byte(15, Radix::Dec), " 15");
    }

    #[test]
    fn empty_store_renders_nothing() {
        let store = MessageStore::new();
        assert!(ViewBuilder::new(&store, DisplayConfig::default()).build(0.0).is_empty());
    }
}
