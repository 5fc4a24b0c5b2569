//! `sm-channel` - Directional blocking FIFO channels for stream-matmul.
//!
//! This crate provides:
//! - `InputChannel` / `OutputChannel` endpoint pairs with blocking read/write
//! - The `ChannelRead` / `ChannelWrite` traits the kernel is generic over
//! - `TraceLog` for recording the global order of operations across endpoints

pub mod endpoint;
pub mod error;
pub mod trace;

pub use endpoint::{bounded, channel, unbounded, ChannelCapacity, ChannelRead, ChannelWrite};
pub use endpoint::{Disconnected, InputChannel, OutputChannel};
pub use error::{ChannelError, Result};
pub use trace::{Op, TraceEvent, TraceLog, Traced};
