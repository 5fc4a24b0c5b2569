use std::marker::PhantomData;

use async_channel::{Receiver, Sender};

use crate::error::{ChannelError, Result};

/// Read side of a channel, as seen by its consumer.
///
/// `read` removes and returns the oldest unread value, blocking until one is
/// available. There is no peek and no re-read.
pub trait ChannelRead {
    /// Element type carried by the channel.
    type Item;

    /// Blocking read of the next value in FIFO order.
    fn read(&mut self) -> Result<Self::Item>;
}

/// Write side of a channel, as seen by its producer.
pub trait ChannelWrite {
    /// Element type carried by the channel.
    type Item;

    /// Append `value` to the channel, blocking while a bounded channel is full.
    fn write(&mut self, value: Self::Item) -> Result<()>;
}

impl<E: ChannelRead + ?Sized> ChannelRead for &mut E {
    type Item = E::Item;

    fn read(&mut self) -> Result<Self::Item> {
        (**self).read()
    }
}

impl<E: ChannelWrite + ?Sized> ChannelWrite for &mut E {
    type Item = E::Item;

    fn write(&mut self, value: Self::Item) -> Result<()> {
        (**self).write(value)
    }
}

/// How many values a channel can hold before `write` blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelCapacity {
    /// Writes never block.
    #[default]
    Unbounded,
    /// Writes block while this many values are queued.
    Bounded(usize),
}

/// Read-only endpoint of a point-to-point channel.
///
/// The endpoint is not `Clone`: a channel has exactly one consumer.
#[derive(Debug)]
pub struct InputChannel<T> {
    receiver: Receiver<T>,
    transferred: usize,
}

/// Write-only endpoint of a point-to-point channel.
///
/// The endpoint is not `Clone`: a channel has exactly one producer.
#[derive(Debug)]
pub struct OutputChannel<T> {
    sender: Sender<T>,
    transferred: usize,
}

/// Create an unbounded channel, returning its `(write, read)` endpoints.
pub fn unbounded<T>() -> (OutputChannel<T>, InputChannel<T>) {
    let (sender, receiver) = async_channel::unbounded();
    wrap(sender, receiver)
}

/// Create a bounded channel holding at most `capacity` queued values.
///
/// # Errors
/// Returns `ChannelError::InvalidCapacity` if `capacity` is zero.
pub fn bounded<T>(capacity: usize) -> Result<(OutputChannel<T>, InputChannel<T>)> {
    if capacity == 0 {
        return Err(ChannelError::InvalidCapacity(capacity));
    }
    let (sender, receiver) = async_channel::bounded(capacity);
    Ok(wrap(sender, receiver))
}

/// Create a channel with the given capacity.
pub fn channel<T>(capacity: ChannelCapacity) -> Result<(OutputChannel<T>, InputChannel<T>)> {
    match capacity {
        ChannelCapacity::Unbounded => Ok(unbounded()),
        ChannelCapacity::Bounded(n) => bounded(n),
    }
}

fn wrap<T>(sender: Sender<T>, receiver: Receiver<T>) -> (OutputChannel<T>, InputChannel<T>) {
    (
        OutputChannel {
            sender,
            transferred: 0,
        },
        InputChannel {
            receiver,
            transferred: 0,
        },
    )
}

impl<T> InputChannel<T> {
    /// Number of values queued and not yet read.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Returns true if no values are currently queued.
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Number of values this endpoint has read so far.
    pub fn transferred(&self) -> usize {
        self.transferred
    }

    /// Close the channel. Pending values stay readable; further writes fail.
    pub fn close(&self) -> bool {
        self.receiver.close()
    }
}

impl<T> OutputChannel<T> {
    /// Number of values written but not yet consumed by the reader.
    pub fn len(&self) -> usize {
        self.sender.len()
    }

    /// Returns true if every written value has been consumed.
    pub fn is_empty(&self) -> bool {
        self.sender.is_empty()
    }

    /// Number of values this endpoint has written so far.
    pub fn transferred(&self) -> usize {
        self.transferred
    }

    /// Close the channel. Values already written stay readable.
    pub fn close(&self) -> bool {
        self.sender.close()
    }
}

/// Endpoint with no peer: every read and write fails with `Closed`.
///
/// Stands in for a port a block declares but never uses.
#[derive(Debug)]
pub struct Disconnected<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Disconnected<T> {
    pub fn new() -> Self {
        Disconnected {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for Disconnected<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ChannelRead for Disconnected<T> {
    type Item = T;

    fn read(&mut self) -> Result<T> {
        Err(ChannelError::Closed)
    }
}

impl<T> ChannelWrite for Disconnected<T> {
    type Item = T;

    fn write(&mut self, _value: T) -> Result<()> {
        Err(ChannelError::Closed)
    }
}

impl<T> ChannelRead for InputChannel<T> {
    type Item = T;

    fn read(&mut self) -> Result<T> {
        match self.receiver.recv_blocking() {
            Ok(value) => {
                self.transferred += 1;
                Ok(value)
            }
            Err(_) => {
                log::debug!(
                    "read on closed channel after {} values",
                    self.transferred
                );
                Err(ChannelError::Closed)
            }
        }
    }
}

impl<T> ChannelWrite for OutputChannel<T> {
    type Item = T;

    fn write(&mut self, value: T) -> Result<()> {
        match self.sender.send_blocking(value) {
            Ok(()) => {
                self.transferred += 1;
                Ok(())
            }
            Err(_) => {
                log::debug!(
                    "write on closed channel after {} values",
                    self.transferred
                );
                Err(ChannelError::Closed)
            }
        }
    }
}
