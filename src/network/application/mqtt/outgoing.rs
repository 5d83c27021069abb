//! Sender side of QoS 1 and QoS 2 delivery.

use super::MAX_INFLIGHT;
use super::error::Error;
use super::packet::PublishPacket;
use heapless::Vec;

/// An outbound publish awaiting its terminal acknowledgment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPublish {
    /// Identifier the broker will acknowledge.
    pub packet_id: u16,
    /// The message as it goes on the wire; `dup` is set once replayed.
    pub publish: PublishPacket,
    /// PUBREC has been seen and PUBREL sent (QoS 2 only).
    pub released: bool,
}

/// Unacknowledged QoS 1 and QoS 2 publishes, in registration order.
///
/// An entry is added when the publish is issued and removed exactly once, by
/// PUBACK (QoS 1) or PUBCOMP (QoS 2). PUBREC never removes an entry.
#[derive(Debug, Default)]
pub struct OutgoingTracker {
    pending: Vec<PendingPublish, MAX_INFLIGHT>,
}

impl OutgoingTracker {
    /// Create an empty tracker.
    pub const fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Record `publish` as in flight under `packet_id`.
    ///
    /// Must be called before the publish is written to the transport.
    pub fn register(&mut self, packet_id: u16, mut publish: PublishPacket) -> Result<(), Error> {
        publish.packet_id = Some(packet_id);
        if let Some(entry) = self.find_mut(packet_id) {
            entry.publish = publish;
            entry.released = false;
            return Ok(());
        }
        self.pending
            .push(PendingPublish {
                packet_id,
                publish,
                released: false,
            })
            .map_err(|_| Error::InflightFull)
    }

    /// Handle PUBACK. Returns whether an entry was retired.
    pub fn on_puback(&mut self, packet_id: u16) -> bool {
        self.retire(packet_id)
    }

    /// Handle PUBREC. Returns whether the caller must send PUBREL.
    ///
    /// The entry stays tracked until PUBCOMP.
    pub fn on_pubrec(&mut self, packet_id: u16) -> bool {
        match self.find_mut(packet_id) {
            Some(entry) => {
                entry.released = true;
                true
            }
            None => false,
        }
    }

    /// Handle PUBCOMP. Returns whether an entry was retired.
    pub fn on_pubcomp(&mut self, packet_id: u16) -> bool {
        self.retire(packet_id)
    }

    /// Mark every entry as a duplicate and return them in original order for
    /// retransmission. Identifiers are unchanged.
    pub fn prepare_replay(&mut self) -> impl Iterator<Item = &PendingPublish> {
        for entry in self.pending.iter_mut() {
            entry.publish.dup = true;
        }
        self.pending.iter()
    }

    /// Whether `packet_id` is attached to an unacknowledged publish.
    pub fn contains(&self, packet_id: u16) -> bool {
        self.pending.iter().any(|entry| entry.packet_id == packet_id)
    }

    /// Look up a pending entry.
    pub fn get(&self, packet_id: u16) -> Option<&PendingPublish> {
        self.pending.iter().find(|entry| entry.packet_id == packet_id)
    }

    /// Pending entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &PendingPublish> {
        self.pending.iter()
    }

    /// Number of unacknowledged publishes.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is in flight.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Whether another publish can be registered.
    pub fn is_full(&self) -> bool {
        self.pending.is_full()
    }

    /// Forget every pending publish.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    fn find_mut(&mut self, packet_id: u16) -> Option<&mut PendingPublish> {
        self.pending
            .iter_mut()
            .find(|entry| entry.packet_id == packet_id)
    }

    fn retire(&mut self, packet_id: u16) -> bool {
        match self
            .pending
            .iter()
            .position(|entry| entry.packet_id == packet_id)
        {
            Some(index) => {
                // Order-preserving removal keeps replay in issue order.
                self.pending.remove(index);
                true
            }
            None => false,
        }
    }
}
