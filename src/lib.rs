//! Live CAN bus analyzer core.
//!
//! canscope tracks traffic on one or more CAN buses and renders it as a live
//! dashboard. For every (bus, identifier) pair it keeps the latest frame, the time
//! since the previous frame and which payload bytes changed, and it renders sorted
//! snapshots for a terminal or a web table.
//!
//! # Features
//!
//! - **Concurrent tracking**: one delivery task per bus feeding a shared store
//! - **Change highlighting**: per-byte change flags and a per-row freshness flag
//! - **Deterministic views**: staleness filtering and numeric identifier sorting
//! - **Two outputs**: ANSI terminal lines and JSON-ready table snapshots
//!
//! # Quick Start
//!
//! ```rust
//! use canscope::{Analyzer, DisplayConfig, sources::channel, wall_clock_seconds};
//!
//! #[tokio::main]
//! async fn main() -> canscope::Result<()> {
//!     let mut analyzer = Analyzer::new();
//!     let (can0, source) = channel("can0");
//!     analyzer.attach(source);
//!
//!     can0.send_data(0x100, [0x01, 0x02], wall_clock_seconds())?;
//!
//!     let mut updates = analyzer.store().subscribe_updates();
//!     updates.wait_for(|generation| *generation >= 1).await.ok();
//!
//!     for line in analyzer.render_plain_text(&DisplayConfig::default()) {
//!         println!("{}", line);
//!     }
//!     analyzer.shutdown().await;
//!     Ok(())
//! }
//! ```
//!
//! On Linux with the `socketcan` feature, `sources::SocketCanSource::open("can0")`
//! attaches a real interface the same way.

// Core tracking
pub mod change;
mod error;
pub mod store;
pub mod types;
pub mod view;

// Frame delivery
pub mod driver;
pub mod source;
pub mod sources;
pub mod stream;

// Ambient layers
pub mod config;
pub mod dashboard;

#[cfg_attr(any(test, feature = "benchmark"), path = "test_utils.rs")]
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;

// Core exports
pub use error::*;
pub use store::MessageStore;
pub use types::*;
pub use view::{RenderRecord, TableSnapshot, ViewBuilder};

// Delivery and ambient exports
pub use config::AnalyzerConfig;
pub use dashboard::TerminalDashboard;
pub use driver::{Driver, DriverHandle};
pub use source::FrameSource;

use futures::{Stream, StreamExt};
use std::sync::Arc;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use stream::ThrottleExt;

/// Process-level wiring of frame sources, the shared store and the views.
///
/// An `Analyzer` owns one [`MessageStore`] and one delivery task per attached
/// source. Dropping it cancels the delivery tasks.
#[derive(Debug)]
pub struct Analyzer {
    store: Arc<MessageStore>,
    drivers: Vec<DriverHandle>,
    cancel: CancellationToken,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Create an analyzer with an empty store and no sources
    pub fn new() -> Self {
        Self {
            store: Arc::new(MessageStore::new()),
            drivers: Vec::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Start delivering frames from `source` into the store.
    ///
    /// Must be called from within a tokio runtime.
    pub fn attach<S: FrameSource>(&mut self, source: S) {
        info!(bus = %source.bus(), "Attaching frame source");
        let handle = Driver::spawn(source, Arc::clone(&self.store), self.cancel.child_token());
        self.drivers.push(handle);
    }

    /// The shared message store
    pub fn store(&self) -> &Arc<MessageStore> {
        &self.store
    }

    /// Buses with an attached source, in attach order
    pub fn buses(&self) -> Vec<&str> {
        self.drivers.iter().map(DriverHandle::bus).collect()
    }

    /// A token cancelled when the analyzer shuts down
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.child_token()
    }

    /// View builder over the store
    pub fn view(&self, config: &DisplayConfig) -> ViewBuilder<'_> {
        ViewBuilder::new(&self.store, *config)
    }

    /// Render ANSI styled terminal lines as of the wall clock
    pub fn render_text(&self, config: &DisplayConfig) -> Vec<String> {
        self.view(config).styled_lines(wall_clock_seconds())
    }

    /// Render plain terminal lines as of the wall clock
    pub fn render_plain_text(&self, config: &DisplayConfig) -> Vec<String> {
        self.view(config).plain_lines(wall_clock_seconds())
    }

    /// Render a table snapshot as of the wall clock
    pub fn render_table(&self, config: &DisplayConfig) -> TableSnapshot {
        self.view(config).table(wall_clock_seconds())
    }

    /// Live table feed for push-style clients.
    ///
    /// Yields a snapshot right away and then whenever new frames arrive, at most
    /// once per `rate` interval. The feed ends when the analyzer is dropped.
    pub fn table_feed(
        &self,
        config: DisplayConfig,
        rate: UpdateRate,
    ) -> impl Stream<Item = TableSnapshot> + Send + 'static {
        table_feed(Arc::clone(&self.store), config, rate, self.cancel.child_token())
    }

    /// Stop all delivery tasks and wait for them.
    ///
    /// Returns the total number of frames recorded.
    pub async fn shutdown(mut self) -> u64 {
        self.cancel.cancel();
        let mut total = 0;
        for handle in std::mem::take(&mut self.drivers) {
            total += handle.join().await;
        }
        info!("Analyzer stopped after {} frames", total);
        total
    }
}

impl Drop for Analyzer {
    fn drop(&mut self) {
        debug!("Dropping analyzer");
        // Cancel tasks on drop for clean shutdown
        self.cancel.cancel();
    }
}

/// Live table feed over any store. See [`Analyzer::table_feed`].
pub fn table_feed(
    store: Arc<MessageStore>,
    config: DisplayConfig,
    rate: UpdateRate,
    cancel: CancellationToken,
) -> impl Stream<Item = TableSnapshot> + Send + 'static {
    let changes = WatchStream::new(store.subscribe_updates())
        .take_until(cancel.cancelled_owned())
        .map(|_| ());

    let ticks = match rate.throttle_interval() {
        None => changes.boxed(),
        Some(interval) => changes.throttle(interval).boxed(),
    };

    ticks.map(move |()| ViewBuilder::new(&store, config).table(wall_clock_seconds()))
}
