//! Frame source trait

use crate::Result;
use crate::types::Frame;

/// Trait for CAN frame sources
///
/// A source abstracts over one physical (or virtual) bus and delivers frames in
/// receipt order. The [`Driver`](crate::driver::Driver) owns each source in its own
/// task and records everything it yields into the shared store, so there is no
/// ordering between different sources.
#[async_trait::async_trait]
pub trait FrameSource: Send + 'static {
    /// Name of the bus this source reads, used for logging
    fn bus(&self) -> &str;

    /// Wait for the next received frame
    ///
    /// Returns:
    /// - `Ok(Some(frame))` - A frame was received
    /// - `Ok(None)` - Source ended (normal termination)
    /// - `Err(e)` - A read failed; the driver retries with backoff
    async fn next_frame(&mut self) -> Result<Option<Frame>>;
}
