//! Delivery queue
//!
//! Unbounded multi-producer FIFO. Producers never block beyond the short
//! critical section of a push; the consumer may block until work arrives.

use super::LogEntry;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;

#[derive(Debug, Default)]
struct Inner {
    entries: VecDeque<LogEntry>,
    closed: bool,
}

#[derive(Debug, Default)]
pub struct DeliveryQueue {
    inner: Mutex<Inner>,
    available: Condvar,
}

impl DeliveryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an entry. Never validates, never blocks on capacity.
    pub fn enqueue(&self, entry: LogEntry) {
        self.inner.lock().entries.push_back(entry);
        self.available.notify_one();
    }

    /// Pop the oldest entry, if any
    pub fn try_pop(&self) -> Option<LogEntry> {
        self.inner.lock().entries.pop_front()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    /// Block until an entry is queued or the queue is closed.
    ///
    /// Returns `false` once the queue is closed and drained. The entry is not
    /// popped here: the caller pops under the dispatcher lock to keep FIFO
    /// order across concurrent drainers.
    pub fn wait_for_entry(&self) -> bool {
        let mut inner = self.inner.lock();
        while inner.entries.is_empty() && !inner.closed {
            self.available.wait(&mut inner);
        }
        !inner.entries.is_empty()
    }

    /// Wake every waiter; further waits return immediately when empty
    pub fn close(&self) {
        self.inner.lock().closed = true;
        self.available.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }
}
