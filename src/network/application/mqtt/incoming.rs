//! Receiver side of the QoS 2 handshake.

use super::MAX_INCOMING_QOS2;
use super::error::Error;
use super::packet::PublishPacket;
use heapless::Vec;

/// QoS 2 publishes received from the broker and held back until PUBREL.
///
/// A message stored here is invisible to the application. It is released
/// exactly once, when the matching PUBREL arrives.
#[derive(Debug, Default)]
pub struct IncomingQos2 {
    held: Vec<(u16, PublishPacket), MAX_INCOMING_QOS2>,
}

impl IncomingQos2 {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self { held: Vec::new() }
    }

    /// Hold `publish` until its PUBREL. A redelivery with the same identifier
    /// replaces the stored copy.
    pub fn store(&mut self, packet_id: u16, publish: PublishPacket) -> Result<(), Error> {
        if let Some((_, held)) = self.held.iter_mut().find(|(id, _)| *id == packet_id) {
            *held = publish;
            return Ok(());
        }
        self.held
            .push((packet_id, publish))
            .map_err(|_| Error::QueueFull)
    }

    /// Handle PUBREL: hand back the held message, or `None` if the
    /// identifier is unknown (already released or never stored).
    pub fn release(&mut self, packet_id: u16) -> Option<PublishPacket> {
        let index = self.held.iter().position(|(id, _)| *id == packet_id)?;
        Some(self.held.remove(index).1)
    }

    /// Whether a message is held under `packet_id`.
    pub fn contains(&self, packet_id: u16) -> bool {
        self.held.iter().any(|(id, _)| *id == packet_id)
    }

    /// Number of held messages.
    pub fn len(&self) -> usize {
        self.held.len()
    }

    /// Whether nothing is held.
    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Drop every held message.
    pub fn clear(&mut self) {
        self.held.clear();
    }
}
