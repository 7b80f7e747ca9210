//! Concurrent message store
//!
//! Holds one [`MessageState`] per [`MessageKey`] ever seen. Frames arrive from one
//! delivery task per bus while views are rendered on a separate schedule, so the
//! store is shared behind an `Arc` and synchronizes internally:
//!
//! - an `RwLock` guards the key index; it is only write-locked when a new key
//!   appears
//! - every slot has its own `Mutex`, so updates to different keys do not contend
//!   and readers never see a half-applied update
//! - a render pass snapshots a slot and clears its freshness flag under the slot's
//!   lock, so a frame racing with a render either shows up in that render or leaves
//!   the flag set for the next one
//!
//! Keys are never evicted; staleness is decided when rendering.

use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, trace};

use crate::types::{Frame, MessageKey, MessageState};

/// One tracked slot
#[derive(Debug)]
struct Slot {
    key: MessageKey,
    state: Mutex<MessageState>,
}

/// Slots in first-seen order plus a key index
#[derive(Debug, Default)]
struct Slots {
    index: HashMap<MessageKey, usize>,
    entries: Vec<Slot>,
}

/// Shared store of the latest state per (bus, identifier)
#[derive(Debug)]
pub struct MessageStore {
    slots: RwLock<Slots>,

    /// Change generation, bumped on every recorded frame
    updates: watch::Sender<u64>,
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageStore {
    /// Create an empty store
    pub fn new() -> Self {
        let (updates, _) = watch::channel(0);
        Self { slots: RwLock::new(Slots::default()), updates }
    }

    /// Record a newly arrived frame.
    ///
    /// Creates the slot on first sight of the key, otherwise folds the frame into
    /// the existing state. Never fails and never validates the frame.
    pub fn record(&self, frame: Frame) {
        let key = frame.key();

        {
            let slots = self.slots.read();
            if let Some(&i) = slots.index.get(&key) {
                slots.entries[i].state.lock().update(frame);
                trace!(%key, "Frame recorded");
                drop(slots);
                self.notify();
                return;
            }
        }

        let mut slots = self.slots.write();
        // Another source may have inserted the key between the two locks
        if let Some(&i) = slots.index.get(&key) {
            slots.entries[i].state.lock().update(frame);
        } else {
            debug!(%key, dlc = frame.dlc(), "New message");
            let i = slots.entries.len();
            let state = Mutex::new(MessageState::first(frame));
            slots.entries.push(Slot { key: key.clone(), state });
            slots.index.insert(key, i);
        }
        drop(slots);
        self.notify();
    }

    /// Snapshot of the state for `key`, or `None` if it was never recorded
    pub fn get(&self, key: &MessageKey) -> Option<MessageState> {
        let slots = self.slots.read();
        slots.index.get(key).map(|&i| slots.entries[i].state.lock().clone())
    }

    /// All keys ever recorded, stale or not
    pub fn keys(&self) -> BTreeSet<MessageKey> {
        self.slots.read().entries.iter().map(|slot| slot.key.clone()).collect()
    }

    /// Number of tracked keys
    pub fn len(&self) -> usize {
        self.slots.read().entries.len()
    }

    /// True if no frame was ever recorded
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render pass: snapshot every non-stale slot and mark it rendered.
    ///
    /// Returns slots in first-seen order. Each snapshot carries the freshness flag
    /// as it was before this pass cleared it. Stale slots are skipped and keep
    /// their flags.
    pub fn take_visible(&self, now: f64, timeout: f64) -> Vec<(MessageKey, MessageState)> {
        let slots = self.slots.read();
        slots
            .entries
            .iter()
            .filter_map(|slot| {
                let mut state = slot.state.lock();
                if state.is_stale(now, timeout) {
                    return None;
                }
                let snapshot = state.clone();
                state.mark_rendered();
                Some((slot.key.clone(), snapshot))
            })
            .collect()
    }

    /// Frame callback for push-style sources.
    ///
    /// Every call records the frame into this store.
    pub fn callback(self: &Arc<Self>) -> impl Fn(Frame) + Clone + Send + Sync + 'static {
        let store = Arc::clone(self);
        move |frame| store.record(frame)
    }

    /// Watch the change generation, which increases with every recorded frame
    pub fn subscribe_updates(&self) -> watch::Receiver<u64> {
        self.updates.subscribe()
    }

    /// Current change generation
    pub fn generation(&self) -> u64 {
        *self.updates.borrow()
    }

    fn notify(&self) {
        self.updates.send_modify(|generation| *generation = generation.wrapping_add(1));
    }
}
