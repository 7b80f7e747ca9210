//! In-process channel source
//!
//! Bridges any transport that produces frames outside the async runtime (a
//! vendor callback, a blocking reader thread, a test) into a [`FrameSource`].

use tokio::sync::mpsc;
use tracing::debug;

use crate::source::FrameSource;
use crate::types::Frame;
use crate::{AnalyzerError, Result};

/// Create a connected sender/source pair for one bus
pub fn channel(bus: impl Into<String>) -> (FrameSender, ChannelSource) {
    let bus = bus.into();
    let (tx, rx) = mpsc::unbounded_channel();
    (FrameSender { bus: bus.clone(), tx }, ChannelSource { bus, rx })
}

/// Sending half: pushes frames into the paired [`ChannelSource`]
#[derive(Debug, Clone)]
pub struct FrameSender {
    bus: String,
    tx: mpsc::UnboundedSender<Frame>,
}

impl FrameSender {
    /// Bus name frames built by [`send_data`](Self::send_data) are tagged with
    pub fn bus(&self) -> &str {
        &self.bus
    }

    /// Deliver a frame as-is. Fails once the source has been dropped.
    pub fn send(&self, frame: Frame) -> Result<()> {
        self.tx
            .send(frame)
            .map_err(|_| AnalyzerError::source_failed(self.bus.clone(), "frame source closed"))
    }

    /// Deliver a frame on this sender's bus
    pub fn send_data(&self, id: u32, data: impl Into<Vec<u8>>, timestamp: f64) -> Result<()> {
        self.send(Frame::new(self.bus.clone(), id, data, timestamp))
    }

    /// True once the receiving source has been dropped
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving half: a [`FrameSource`] that ends when every sender is dropped
#[derive(Debug)]
pub struct ChannelSource {
    bus: String,
    rx: mpsc::UnboundedReceiver<Frame>,
}

#[async_trait::async_trait]
impl FrameSource for ChannelSource {
    fn bus(&self) -> &str {
        &self.bus
    }

    async fn next_frame(&mut self) -> Result<Option<Frame>> {
        let frame = self.rx.recv().await;
        if frame.is_none() {
            debug!(bus = %self.bus, "All senders dropped");
        }
        Ok(frame)
    }
}
