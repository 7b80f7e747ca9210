//! Driver spawns and manages frame delivery tasks

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

use crate::source::FrameSource;
use crate::store::MessageStore;

/// Consecutive read errors after which a source is abandoned
const MAX_ERRORS: u32 = 10;

/// Handle to one running delivery task
#[derive(Debug)]
pub struct DriverHandle {
    bus: String,
    task: JoinHandle<u64>,
}

impl DriverHandle {
    /// Bus the task reads
    pub fn bus(&self) -> &str {
        &self.bus
    }

    /// True once the task has ended (source finished, failed or cancelled)
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the task to end and return how many frames it recorded
    pub async fn join(self) -> u64 {
        match self.task.await {
            Ok(frames) => frames,
            Err(e) => {
                warn!(bus = %self.bus, "Delivery task did not finish cleanly: {}", e);
                0
            }
        }
    }
}

/// Driver spawns one delivery task per frame source
///
/// Each task owns its source and records every frame into the shared store.
/// Tasks for different buses run independently; the store handles concurrent
/// updates.
pub struct Driver;

impl Driver {
    /// Spawn a delivery task for `source`
    ///
    /// The task runs until the source ends, fails [`MAX_ERRORS`] times in a row,
    /// or `cancel` is triggered. Must be called from within a tokio runtime.
    pub fn spawn<S>(source: S, store: Arc<MessageStore>, cancel: CancellationToken) -> DriverHandle
    where
        S: FrameSource,
    {
        let bus = source.bus().to_string();
        let task = tokio::spawn(Self::delivery_task(source, store, cancel));
        DriverHandle { bus, task }
    }

    /// Delivery task - reads frames and records them until told to stop
    async fn delivery_task<S>(
        mut source: S,
        store: Arc<MessageStore>,
        cancel: CancellationToken,
    ) -> u64
    where
        S: FrameSource,
    {
        let bus = source.bus().to_string();
        info!(bus = %bus, "Delivery task started");
        let mut frame_count = 0u64;
        let mut error_count = 0u32;

        loop {
            // Allow cancellation while waiting on the source
            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    info!(bus = %bus, "Delivery task cancelled");
                    break;
                }
                result = source.next_frame() => result,
            };

            match result {
                Ok(Some(frame)) => {
                    frame_count += 1;
                    error_count = 0;
                    trace!(bus = %bus, id = frame.id, dlc = frame.dlc(), "Frame {}", frame_count);
                    store.record(frame);
                }
                Ok(None) => {
                    debug!(bus = %bus, "Source ended after {} frames", frame_count);
                    break;
                }
                Err(e) => {
                    // Don't give up on transient failures
                    error_count += 1;
                    error!(bus = %bus, "Source error ({}/{}): {}", error_count, MAX_ERRORS, e);

                    if error_count >= MAX_ERRORS || !e.is_retryable() {
                        error!(bus = %bus, "Giving up on source");
                        break;
                    }

                    // Exponential backoff: 100ms, 200ms, 400ms, ... capped at 3.2s
                    let backoff = Duration::from_millis(50 * (1 << error_count.min(6)));
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = tokio::time::sleep(backoff) => {}
                    }
                }
            }
        }

        info!(bus = %bus, "Delivery task ended (recorded {} frames)", frame_count);
        frame_count
    }
}
