//! Live SocketCAN source for Linux

use crate::Result;

#[cfg(all(target_os = "linux", feature = "socketcan"))]
use {
    crate::AnalyzerError,
    crate::source::FrameSource,
    crate::types::{Frame, wall_clock_seconds},
    socketcan::{CanFrame, CanSocket, EmbeddedFrame as _, Frame as _, Socket as _},
    std::io,
    std::time::Duration,
    tokio::sync::mpsc,
    tracing::{debug, info, trace, warn},
};

/// Read timeout that lets the reader thread notice a dropped source
#[cfg(all(target_os = "linux", feature = "socketcan"))]
const READ_TIMEOUT: Duration = Duration::from_millis(500);

/// Frame source reading a SocketCAN interface (e.g. `can0`, `vcan0`)
///
/// The socket is read on a dedicated blocking thread that forwards frames into
/// the async side. Frames are stamped with wall-clock receipt time, so views over
/// this source should be rendered against [`wall_clock_seconds`].
#[cfg(all(target_os = "linux", feature = "socketcan"))]
pub struct SocketCanSource {
    bus: String,
    rx: mpsc::UnboundedReceiver<io::Result<Frame>>,
}

#[cfg(all(target_os = "linux", feature = "socketcan"))]
impl SocketCanSource {
    /// Open an interface. The interface must already be up with its bitrate set.
    pub fn open(interface: &str) -> Result<Self> {
        let socket = CanSocket::open(interface).map_err(|e| {
            AnalyzerError::source_failed_with(interface, "failed to open interface", Box::new(e))
        })?;
        socket.set_read_timeout(Some(READ_TIMEOUT)).map_err(|e| {
            AnalyzerError::source_failed_with(interface, "failed to set read timeout", Box::new(e))
        })?;

        let (tx, rx) = mpsc::unbounded_channel();
        let bus = interface.to_string();
        let thread_bus = bus.clone();
        std::thread::Builder::new()
            .name(format!("canscope-{}", interface))
            .spawn(move || reader_thread(socket, thread_bus, tx))
            .map_err(|e| {
                AnalyzerError::source_failed_with(interface, "failed to spawn reader", Box::new(e))
            })?;

        info!(bus = %bus, "SocketCAN interface opened");
        Ok(Self { bus, rx })
    }
}

#[cfg(all(target_os = "linux", feature = "socketcan"))]
fn reader_thread(socket: CanSocket, bus: String, tx: mpsc::UnboundedSender<io::Result<Frame>>) {
    loop {
        let result = match socket.read_frame() {
            Ok(CanFrame::Error(_)) => {
                trace!(bus = %bus, "Skipping error frame");
                continue;
            }
            Ok(frame) => Ok(Frame::new(
                bus.clone(),
                frame.raw_id(),
                frame.data().to_vec(),
                wall_clock_seconds(),
            )
            .with_extended(frame.is_extended())),
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                if tx.is_closed() {
                    break;
                }
                continue;
            }
            Err(e) => Err(e),
        };

        let failed = result.is_err();
        if tx.send(result).is_err() {
            break;
        }
        if failed {
            // Avoid spinning on a persistently failing socket
            std::thread::sleep(READ_TIMEOUT);
        }
    }
    debug!(bus = %bus, "SocketCAN reader thread exiting");
}

#[cfg(all(target_os = "linux", feature = "socketcan"))]
#[async_trait::async_trait]
impl FrameSource for SocketCanSource {
    fn bus(&self) -> &str {
        &self.bus
    }

    async fn next_frame(&mut self) -> Result<Option<Frame>> {
        match self.rx.recv().await {
            Some(Ok(frame)) => Ok(Some(frame)),
            Some(Err(e)) => {
                warn!(bus = %self.bus, "SocketCAN read failed: {}", e);
                Err(AnalyzerError::source_failed_with(self.bus.clone(), "read failed", Box::new(e)))
            }
            None => Ok(None),
        }
    }
}

// Stub for platforms or builds without SocketCAN support
#[cfg(not(all(target_os = "linux", feature = "socketcan")))]
pub struct SocketCanSource {
    _private: (),
}

#[cfg(not(all(target_os = "linux", feature = "socketcan")))]
impl SocketCanSource {
    /// Always fails: SocketCAN needs Linux and the `socketcan` feature.
    /// Use a [`ChannelSource`](crate::sources::ChannelSource) to feed frames from
    /// another transport.
    pub fn open(_interface: &str) -> Result<Self> {
        Err(crate::AnalyzerError::unsupported_platform(
            "SocketCAN",
            "Linux with the `socketcan` feature",
        ))
    }
}
