//! Lifecycle event handlers.
//!
//! Handlers are plain function pointers, like shell commands, so the registry
//! needs no heap. Each event kind has an ordered list of persistent handlers
//! and an ordered list of one-shot handlers.

use super::MAX_HANDLERS;
use super::error::Error;
use super::packet::{ConnAckPacket, ConnectPacket};
use heapless::Vec;

/// Names of the lifecycle events a client fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Fired just before CONNECT is written.
    Connect,
    /// Fired after an accepted CONNACK.
    Connected,
}

const EVENT_KINDS: usize = 2;

impl EventKind {
    const fn index(self) -> usize {
        match self {
            EventKind::Connect => 0,
            EventKind::Connected => 1,
        }
    }
}

/// An event together with its payload.
#[derive(Debug)]
pub enum Event<'a> {
    /// The outgoing CONNECT. Handlers may edit it before it is sent; edits
    /// are kept for later reconnects.
    Connect(&'a mut ConnectPacket),
    /// The CONNACK that accepted the connection.
    Connected(&'a ConnAckPacket),
}

impl Event<'_> {
    /// The kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Connect(_) => EventKind::Connect,
            Event::Connected(_) => EventKind::Connected,
        }
    }
}

/// Signature of an event handler. Returning an error stops the dispatch.
pub type EventHandler = fn(&mut Event<'_>) -> Result<(), Error>;

#[derive(Debug, Default)]
struct Handlers {
    persistent: Vec<EventHandler, MAX_HANDLERS>,
    once: Vec<EventHandler, MAX_HANDLERS>,
}

/// Per-client event handler registry.
#[derive(Debug, Default)]
pub struct EventRegistry {
    handlers: [Handlers; EVENT_KINDS],
}

impl EventRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler that runs on every dispatch of `kind`.
    pub fn on(&mut self, kind: EventKind, handler: EventHandler) -> Result<(), Error> {
        self.handlers[kind.index()]
            .persistent
            .push(handler)
            .map_err(|_| Error::HandlerFailed)
    }

    /// Append a handler that runs on the next dispatch of `kind` only.
    pub fn once(&mut self, kind: EventKind, handler: EventHandler) -> Result<(), Error> {
        self.handlers[kind.index()]
            .once
            .push(handler)
            .map_err(|_| Error::HandlerFailed)
    }

    /// Run the handlers registered for this event's kind: persistent ones
    /// first, then one-shot ones, each list in registration order.
    ///
    /// A one-shot handler is removed as soon as it has run. The first error
    /// aborts the dispatch and is returned; handlers after it do not run.
    pub fn dispatch(&mut self, event: &mut Event<'_>) -> Result<(), Error> {
        let handlers = &mut self.handlers[event.kind().index()];
        for handler in handlers.persistent.iter() {
            handler(event)?;
        }
        while !handlers.once.is_empty() {
            let handler = handlers.once.remove(0);
            handler(event)?;
        }
        Ok(())
    }

    /// Number of handlers, persistent and one-shot, waiting on `kind`.
    pub fn handler_count(&self, kind: EventKind) -> usize {
        let handlers = &self.handlers[kind.index()];
        handlers.persistent.len() + handlers.once.len()
    }

    /// Remove every handler for every event.
    pub fn clear(&mut self) {
        for handlers in self.handlers.iter_mut() {
            handlers.persistent.clear();
            handlers.once.clear();
        }
    }
}
