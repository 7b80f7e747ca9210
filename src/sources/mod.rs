//! Frame source implementations

pub mod channel;
pub mod socketcan;

pub use channel::{ChannelSource, FrameSender, channel};
pub use self::socketcan::SocketCanSource;
