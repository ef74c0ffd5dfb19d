//! The event channel seam.
//!
//! The pod layout never talks to a socket directly. It is handed an
//! [`EventChannel`] and drains it once per frame; the demo provides a
//! WebSocket implementation, tests use [`MemoryChannel`].

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::ChannelError;
use crate::protocol::{ClientEvent, ServerEvent};

/// Bidirectional pub/sub link to the cluster event server.
pub trait EventChannel: Send + Sync {
    /// Queue an event for the server. Does not wait for delivery.
    fn publish(&mut self, event: ClientEvent) -> Result<(), ChannelError>;

    /// Take the next inbound event, if any (non-blocking).
    fn poll(&mut self) -> Option<ServerEvent>;
}

#[derive(Default)]
struct MemoryQueues {
    inbound: VecDeque<ServerEvent>,
    published: Vec<ClientEvent>,
    closed: bool,
}

/// In-memory channel. Clones share the same queues, so a test can keep one
/// handle while the app owns another.
#[derive(Clone, Default)]
pub struct MemoryChannel {
    queues: Arc<Mutex<MemoryQueues>>,
}

impl MemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event as if the server had sent it.
    pub fn push_inbound(&self, event: ServerEvent) {
        self.queues.lock().inbound.push_back(event);
    }

    /// Everything published so far, oldest first.
    pub fn published(&self) -> Vec<ClientEvent> {
        self.queues.lock().published.clone()
    }

    /// Make further publishes fail with [`ChannelError::Closed`].
    pub fn close(&self) {
        self.queues.lock().closed = true;
    }
}

impl EventChannel for MemoryChannel {
    fn publish(&mut self, event: ClientEvent) -> Result<(), ChannelError> {
        let mut queues = self.queues.lock();
        if queues.closed {
            return Err(ChannelError::Closed);
        }
        queues.published.push(event);
        Ok(())
    }

    fn poll(&mut self) -> Option<ServerEvent> {
        self.queues.lock().inbound.pop_front()
    }
}
