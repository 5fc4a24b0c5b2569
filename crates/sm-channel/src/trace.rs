use std::sync::{Arc, Mutex, MutexGuard};

use crate::endpoint::{ChannelRead, ChannelWrite};
use crate::error::Result;

/// Kind of channel operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Read,
    Write,
}

/// One completed channel operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEvent {
    /// Name the endpoint was registered under.
    pub channel: &'static str,
    pub op: Op,
}

/// Shared, ordered log of operations performed on several endpoints.
///
/// Cloning a `TraceLog` yields another handle to the same log, so every
/// endpoint wrapped through it appends to one global sequence. Only
/// successful operations are recorded.
#[derive(Debug, Clone, Default)]
pub struct TraceLog {
    events: Arc<Mutex<Vec<TraceEvent>>>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap `endpoint` so its operations are recorded under `channel`.
    pub fn wrap<E>(&self, channel: &'static str, endpoint: E) -> Traced<E> {
        Traced {
            inner: endpoint,
            channel,
            log: self.clone(),
        }
    }

    /// Snapshot of all events recorded so far, oldest first.
    pub fn events(&self) -> Vec<TraceEvent> {
        self.lock().clone()
    }

    /// Number of `op` operations recorded on `channel`.
    pub fn count(&self, channel: &str, op: Op) -> usize {
        self.lock()
            .iter()
            .filter(|e| e.channel == channel && e.op == op)
            .count()
    }

    /// Index of the first event on `channel`, if any.
    pub fn first_index(&self, channel: &str) -> Option<usize> {
        self.lock().iter().position(|e| e.channel == channel)
    }

    /// Index of the last event on `channel`, if any.
    pub fn last_index(&self, channel: &str) -> Option<usize> {
        self.lock().iter().rposition(|e| e.channel == channel)
    }

    /// Total number of recorded events.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Discard every recorded event.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn record(&self, channel: &'static str, op: Op) {
        self.lock().push(TraceEvent { channel, op });
    }

    fn lock(&self) -> MutexGuard<'_, Vec<TraceEvent>> {
        // A panic while holding the lock cannot leave the Vec half-updated.
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// An endpoint whose successful operations are appended to a `TraceLog`.
#[derive(Debug)]
pub struct Traced<E> {
    inner: E,
    channel: &'static str,
    log: TraceLog,
}

impl<E> Traced<E> {
    /// Name this endpoint records under.
    pub fn channel(&self) -> &'static str {
        self.channel
    }

    pub fn get_ref(&self) -> &E {
        &self.inner
    }

    /// Unwrap, returning the underlying endpoint.
    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: ChannelRead> ChannelRead for Traced<E> {
    type Item = E::Item;

    fn read(&mut self) -> Result<Self::Item> {
        let value = self.inner.read()?;
        self.log.record(self.channel, Op::Read);
        Ok(value)
    }
}

impl<E: ChannelWrite> ChannelWrite for Traced<E> {
    type Item = E::Item;

    fn write(&mut self, value: Self::Item) -> Result<()> {
        self.inner.write(value)?;
        self.log.record(self.channel, Op::Write);
        Ok(())
    }
}
