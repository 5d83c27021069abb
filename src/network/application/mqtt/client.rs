//! MQTT 3.1.1 client session engine.
//!
//! The [`Client`] owns the connection lifecycle and all session state: the
//! outgoing in-flight window, held QoS 2 receptions, granted subscriptions,
//! the inbound application queue and the lifecycle event handlers.
//!
//! Everything runs on the caller's thread. Operations that need an answer
//! from the broker (connect, subscribe, unsubscribe, ping) drive the message
//! pump themselves until the answer arrives or the response deadline passes.
//! Sharing a client between threads means wrapping the whole client in one
//! mutex, which serializes every state change the pump makes.
//!
//! # Examples
//!
//! ```rust,no_run
//! # #[cfg(feature = "std")]
//! # fn main() -> Result<(), libmqtt::network::application::mqtt::Error> {
//! use libmqtt::network::application::mqtt::{Client, Options, Packet, QoS, StdTimeSource};
//! use libmqtt::network::tcp::TcpConnector;
//!
//! let options = Options::new("test.mosquitto.org", "sensor_device_01");
//! let mut client = Client::with_time_source(TcpConnector::new(), StdTimeSource::new());
//! client.connect(&options)?;
//!
//! client.subscribe("commands/+", QoS::AtLeastOnce)?;
//! client.publish("sensors/temperature", b"23.5", QoS::AtLeastOnce, false)?;
//!
//! loop {
//!     if let Packet::Publish(message) = client.next_message()? {
//!         // handle message.topic / message.payload
//! #       let _ = message;
//! #       break;
//!     }
//! }
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "std"))]
//! # fn main() {}
//! ```

use super::config::Options;
use super::error::{DecodeError, Error};
use super::events::{Event, EventHandler, EventKind, EventRegistry};
use super::identifier::PacketIdAllocator;
use super::incoming::IncomingQos2;
use super::outgoing::OutgoingTracker;
use super::packet::{
    ConnAckPacket, ConnectPacket, ConnectReturnCode, Packet, PublishPacket, QoS, SUBACK_FAILURE,
    SubscribePacket, UnsubscribePacket,
};
use super::subscriptions::SubscriptionTable;
use super::time::{Deadline, DummyTimeSource, TimeSource};
use super::transport::Transport;
use super::{MAX_FILTERS, MAX_HOST_LEN, MAX_INBOUND, MAX_PACKET_SIZE};
use crate::network::Connect;
use crate::network::error::Error as NetworkError;
use core::time::Duration;
use heapless::{Deque, String, Vec};

/// Where and how to reach the broker; fixed per connection attempt.
#[derive(Debug, Clone)]
struct Endpoint {
    host: String<MAX_HOST_LEN>,
    port: u16,
    connect_timeout_ms: u32,
    response_timeout_ms: u32,
    max_packet_size: usize,
}

/// An MQTT 3.1.1 client session.
///
/// # Type Parameters
///
/// * `N` - the [`Connect`]or used to open (and re-open) the transport
/// * `T` - the clock used for response deadlines
pub struct Client<N: Connect, T: TimeSource = DummyTimeSource> {
    connector: N,
    time: T,
    endpoint: Option<Endpoint>,
    connect_packet: Option<ConnectPacket>,
    transport: Option<Transport<N::Connection>>,
    tx: [u8; MAX_PACKET_SIZE],
    ids: PacketIdAllocator,
    outgoing: OutgoingTracker,
    incoming: IncomingQos2,
    subscriptions: SubscriptionTable,
    inbound: Deque<Packet, MAX_INBOUND>,
    events: EventRegistry,
    pending_request: Option<u16>,
}

impl<N: Connect, T: TimeSource> core::fmt::Debug for Client<N, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Client")
            .field("connected", &self.transport.is_some())
            .field("in_flight", &self.outgoing.len())
            .field("held_qos2", &self.incoming.len())
            .field("subscriptions", &self.subscriptions.len())
            .field("inbound", &self.inbound.len())
            .finish_non_exhaustive()
    }
}

impl<N: Connect> Client<N, DummyTimeSource> {
    /// Create a disconnected client whose handshakes wait without a deadline.
    pub fn new(connector: N) -> Self {
        Self::with_time_source(connector, DummyTimeSource)
    }
}

impl<N: Connect, T: TimeSource> Client<N, T> {
    /// Create a disconnected client that enforces response deadlines with
    /// `time`.
    pub fn with_time_source(connector: N, time: T) -> Self {
        Self {
            connector,
            time,
            endpoint: None,
            connect_packet: None,
            transport: None,
            tx: [0; MAX_PACKET_SIZE],
            ids: PacketIdAllocator::new(),
            outgoing: OutgoingTracker::new(),
            incoming: IncomingQos2::new(),
            subscriptions: SubscriptionTable::new(),
            inbound: Deque::new(),
            events: EventRegistry::new(),
            pending_request: None,
        }
    }

    /// Establish an MQTT session with the broker.
    ///
    /// Builds a CONNECT from `options` and keeps it for later reconnects,
    /// opens the transport, clears the inbound queue, fires
    /// [`EventKind::Connect`] (handlers may edit the CONNECT), sends it and
    /// reads the broker's first packet, which must be a CONNACK. Any failure
    /// after the transport opened closes it again.
    ///
    /// An accepted clean session starts from scratch: in-flight publishes,
    /// held QoS 2 messages and recorded subscriptions are dropped.
    ///
    /// # Errors
    ///
    /// * [`Error::Transport`] - the connection could not be opened or failed
    /// * [`Error::InvalidResponse`] - the first response was not a CONNACK
    /// * [`Error::ConnectionRejected`] - the broker refused the session
    /// * [`Error::Timeout`] - no response within `response_timeout_ms`
    pub fn connect(&mut self, options: &Options<'_>) -> Result<ConnAckPacket, Error> {
        options.validate()?;
        self.connect_packet = Some(options.connect_packet()?);
        self.endpoint = Some(Endpoint {
            host: String::try_from(options.host).map_err(|_| Error::InvalidOptions)?,
            port: options.port,
            connect_timeout_ms: options.connect_timeout_ms,
            response_timeout_ms: options.response_timeout_ms,
            max_packet_size: options.max_packet_size,
        });

        self.open()?;
        self.inbound.clear();
        self.handshake()
    }

    /// Resume the session after a connection loss.
    ///
    /// Re-opens the transport if needed and resends the stored CONNECT with
    /// `clean_session = false`. When the broker reports the session as
    /// present, every unacknowledged publish is retransmitted in its original
    /// order with the duplicate flag set and its original identifier. When it
    /// does not, pending publishes are kept but not retransmitted.
    pub fn reconnect(&mut self) -> Result<ConnAckPacket, Error> {
        let connect = self.connect_packet.as_mut().ok_or(Error::NotConnected)?;
        connect.clean_session = false;

        if self.transport.is_none() {
            self.open()?;
        }
        let ack = self.handshake()?;

        if ack.session_present {
            self.replay()?;
        } else if !self.outgoing.is_empty() {
            warn!(
                "session not present, {} publishes left pending",
                self.outgoing.len()
            );
        }
        Ok(ack)
    }

    /// Publish a message.
    ///
    /// QoS 0 messages are sent untracked and `Ok(None)` is returned. QoS 1
    /// and 2 messages get a packet identifier and are registered as in
    /// flight before they are written, so a failed write leaves them queued
    /// for [`reconnect`](Self::reconnect). The identifier is returned.
    ///
    /// # Errors
    ///
    /// * [`Error::NotConnected`] - no open transport
    /// * [`Error::InflightFull`] - too many unacknowledged publishes
    /// * [`Error::BufferOverflow`] - topic or payload too long
    /// * [`Error::Transport`] - the write failed
    pub fn publish(
        &mut self,
        topic: &str,
        payload: &[u8],
        qos: QoS,
        retain: bool,
    ) -> Result<Option<u16>, Error> {
        if self.transport.is_none() {
            return Err(Error::NotConnected);
        }
        let mut publish = PublishPacket::new(topic, payload, qos)?;
        publish.retain = retain;

        if qos == QoS::AtMostOnce {
            self.send(&Packet::Publish(publish))?;
            return Ok(None);
        }

        if self.outgoing.is_full() {
            return Err(Error::InflightFull);
        }
        let packet_id = self.allocate_id()?;
        self.outgoing.register(packet_id, publish)?;
        let packet = self
            .outgoing
            .get(packet_id)
            .map(|entry| Packet::Publish(entry.publish.clone()))
            .ok_or(Error::InflightFull)?;
        self.send(&packet)?;
        trace!("published id {}", packet_id);
        Ok(Some(packet_id))
    }

    /// Subscribe to one topic filter.
    ///
    /// Returns the granted QoS, or `None` if the broker rejected the filter.
    pub fn subscribe(&mut self, filter: &str, qos: QoS) -> Result<Option<QoS>, Error> {
        let granted = self.subscribe_many(&[(filter, qos)])?;
        Ok(granted.first().copied().flatten())
    }

    /// Subscribe to several topic filters with one SUBSCRIBE.
    ///
    /// Blocks until the SUBACK carrying the request's identifier arrives;
    /// other packets seen meanwhile stay in the inbound queue. Each filter is
    /// recorded with its granted QoS, or left out if its return code is
    /// `0x80`. The result lists the outcome per filter, in request order.
    pub fn subscribe_many(
        &mut self,
        filters: &[(&str, QoS)],
    ) -> Result<Vec<Option<QoS>, MAX_FILTERS>, Error> {
        let mut granted = Vec::new();
        if filters.is_empty() {
            return Ok(granted);
        }
        if self.transport.is_none() {
            return Err(Error::NotConnected);
        }

        let packet_id = self.allocate_id()?;
        let mut request = SubscribePacket {
            packet_id,
            filters: Vec::new(),
        };
        for (filter, qos) in filters {
            let filter = String::try_from(*filter).map_err(|_| Error::BufferOverflow)?;
            request
                .filters
                .push((filter, *qos))
                .map_err(|_| Error::BufferOverflow)?;
        }

        let response = self.request(packet_id, &Packet::Subscribe(request))?;
        let Packet::SubAck(ack) = response else {
            return Err(Error::InvalidResponse);
        };

        for (index, (filter, _)) in filters.iter().enumerate() {
            let code = ack
                .return_codes
                .get(index)
                .copied()
                .unwrap_or(SUBACK_FAILURE);
            let outcome = self.subscriptions.apply(filter, code)?;
            if outcome.is_none() {
                warn!("subscription to {} rejected", *filter);
            }
            // `filters.len()` is bounded by the request capacity above.
            let _ = granted.push(outcome);
        }
        Ok(granted)
    }

    /// Unsubscribe from one topic filter.
    pub fn unsubscribe(&mut self, filter: &str) -> Result<(), Error> {
        self.unsubscribe_many(&[filter])
    }

    /// Unsubscribe from several topic filters with one UNSUBSCRIBE and wait
    /// for the matching UNSUBACK, then drop them from the subscription table.
    pub fn unsubscribe_many(&mut self, filters: &[&str]) -> Result<(), Error> {
        if filters.is_empty() {
            return Ok(());
        }
        if self.transport.is_none() {
            return Err(Error::NotConnected);
        }

        let packet_id = self.allocate_id()?;
        let mut request = UnsubscribePacket {
            packet_id,
            filters: Vec::new(),
        };
        for filter in filters {
            let filter = String::try_from(*filter).map_err(|_| Error::BufferOverflow)?;
            request
                .filters
                .push(filter)
                .map_err(|_| Error::BufferOverflow)?;
        }

        match self.request(packet_id, &Packet::Unsubscribe(request))? {
            Packet::UnsubAck(_) => {
                for filter in filters {
                    self.subscriptions.remove(filter);
                }
                Ok(())
            }
            _ => Err(Error::InvalidResponse),
        }
    }

    /// Send PINGREQ and wait for PINGRESP.
    pub fn ping(&mut self) -> Result<(), Error> {
        self.send(&Packet::PingReq)?;
        let deadline = self.deadline()?;
        self.wait_for(deadline, |packet| matches!(packet, Packet::PingResp))?;
        Ok(())
    }

    /// Send DISCONNECT and close the transport.
    ///
    /// Session state (in-flight publishes, held QoS 2 messages,
    /// subscriptions, handlers) is kept for a later
    /// [`reconnect`](Self::reconnect).
    pub fn disconnect(&mut self) -> Result<(), Error> {
        if self.transport.is_none() {
            return Ok(());
        }
        let sent = self.send(&Packet::Disconnect);
        let closed = match self.transport.take() {
            Some(transport) => transport.close(),
            None => Ok(()),
        };
        info!("disconnected");
        sent.and(closed)
    }

    /// Read and process exactly one packet from the transport.
    ///
    /// Acknowledgments are consumed, QoS 2 handshakes advanced, and any
    /// application-visible packet is appended to the inbound queue.
    ///
    /// # Errors
    ///
    /// `Error::Transport(Timeout)` when nothing arrived within the
    /// transport's read timeout; any other transport error also marks the
    /// client disconnected.
    pub fn recv(&mut self) -> Result<(), Error> {
        if let Some(packet) = self.pump()? {
            self.enqueue(packet)?;
        }
        Ok(())
    }

    /// Return the oldest inbound packet, pumping the transport until one is
    /// available.
    pub fn next_message(&mut self) -> Result<Packet, Error> {
        loop {
            if let Some(packet) = self.inbound.pop_front() {
                return Ok(packet);
            }
            match self.recv() {
                Ok(()) | Err(Error::Transport(NetworkError::Timeout)) => {}
                Err(e) => return Err(e),
            }
        }
    }

    /// Non-blocking variant of [`next_message`](Self::next_message): pumps
    /// at most one packet and returns `Ok(None)` if nothing is queued.
    pub fn poll(&mut self) -> Result<Option<Packet>, Error> {
        if self.inbound.is_empty() {
            match self.recv() {
                Ok(()) | Err(Error::Transport(NetworkError::Timeout)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(self.inbound.pop_front())
    }

    /// Register a persistent handler for `kind`.
    pub fn on(&mut self, kind: EventKind, handler: EventHandler) -> Result<(), Error> {
        self.events.on(kind, handler)
    }

    /// Register a handler that runs on the next `kind` event only.
    pub fn once(&mut self, kind: EventKind, handler: EventHandler) -> Result<(), Error> {
        self.events.once(kind, handler)
    }

    /// Remove every event handler.
    pub fn clear_handlers(&mut self) {
        self.events.clear();
    }

    /// The event handler registry.
    pub fn events_mut(&mut self) -> &mut EventRegistry {
        &mut self.events
    }

    /// Whether a transport is open.
    pub fn is_connected(&self) -> bool {
        self.transport.is_some()
    }

    /// Number of unacknowledged outgoing publishes.
    pub fn pending_count(&self) -> usize {
        self.outgoing.len()
    }

    /// Whether the publish with `packet_id` still awaits its terminal
    /// acknowledgment.
    pub fn is_pending(&self, packet_id: u16) -> bool {
        self.outgoing.contains(packet_id)
    }

    /// Outgoing in-flight window.
    pub fn outgoing(&self) -> &OutgoingTracker {
        &self.outgoing
    }

    /// QoS 2 messages received but not yet released.
    pub fn incoming(&self) -> &IncomingQos2 {
        &self.incoming
    }

    /// Granted subscriptions.
    pub fn subscriptions(&self) -> &SubscriptionTable {
        &self.subscriptions
    }

    /// Number of packets waiting in the inbound queue.
    pub fn inbound_len(&self) -> usize {
        self.inbound.len()
    }

    /// The CONNECT sent on the last (re)connect.
    pub fn connect_packet(&self) -> Option<&ConnectPacket> {
        self.connect_packet.as_ref()
    }

    /// The open connection, if any.
    pub fn connection(&self) -> Option<&N::Connection> {
        self.transport.as_ref().map(Transport::connection)
    }

    /// Mutable access to the open connection, if any.
    pub fn connection_mut(&mut self) -> Option<&mut N::Connection> {
        self.transport.as_mut().map(Transport::connection_mut)
    }

    fn open(&mut self) -> Result<(), Error> {
        let endpoint = self.endpoint.as_ref().ok_or(Error::NotConnected)?;
        // A previous stream, if any, is abandoned.
        // (Inlined `close_transport` so the borrow of `endpoint` stays disjoint.)
        if let Some(transport) = self.transport.take() {
            let _ = transport.close();
        }
        info!("connecting to {}:{}", endpoint.host.as_str(), endpoint.port);
        let connection = self
            .connector
            .connect(
                &endpoint.host,
                endpoint.port,
                Duration::from_millis(u64::from(endpoint.connect_timeout_ms)),
            )
            .map_err(|e| {
                let e: NetworkError = e.into();
                error!("connect failed: {}", e);
                Error::Transport(e)
            })?;
        self.transport = Some(Transport::new(connection, endpoint.max_packet_size));
        Ok(())
    }

    fn handshake(&mut self) -> Result<ConnAckPacket, Error> {
        let connect = self.connect_packet.as_mut().ok_or(Error::NotConnected)?;
        self.events.dispatch(&mut Event::Connect(connect))?;
        let clean_session = connect.clean_session;
        let packet = Packet::Connect(connect.clone());
        self.send(&packet)?;

        let deadline = self.deadline()?;
        let ack = match self.read_connack(deadline) {
            Ok(ack) => ack,
            Err(e) => {
                self.close_transport();
                return Err(e);
            }
        };

        if ack.return_code != ConnectReturnCode::Accepted {
            warn!("connection rejected: {}", ack.return_code);
            self.close_transport();
            return Err(Error::ConnectionRejected(ack.return_code));
        }

        info!("connected, session present: {}", ack.session_present);
        if clean_session {
            self.outgoing.clear();
            self.incoming.clear();
            self.subscriptions.clear();
        }
        self.events.dispatch(&mut Event::Connected(&ack))?;
        Ok(ack)
    }

    /// Read frames until the first packet arrives; it must be a CONNACK.
    /// Nothing read here is acknowledged or queued.
    fn read_connack(&mut self, deadline: Deadline) -> Result<ConnAckPacket, Error> {
        loop {
            if deadline.expired(&self.time) {
                warn!("no CONNACK before the deadline");
                return Err(Error::Timeout);
            }
            match self.read_frame() {
                Ok(Packet::ConnAck(ack)) => return Ok(ack),
                Ok(other) => {
                    warn!("expected CONNACK, got {}", other.packet_type());
                    return Err(Error::InvalidResponse);
                }
                Err(Error::Transport(NetworkError::Timeout)) => {}
                Err(e) => return Err(e),
            }
        }
    }

    fn replay(&mut self) -> Result<(), Error> {
        let transport = self.transport.as_mut().ok_or(Error::NotConnected)?;
        let mut failure = None;
        let mut replayed = 0usize;
        for entry in self.outgoing.prepare_replay() {
            let written = Packet::Publish(entry.publish.clone())
                .encode(&mut self.tx)
                .and_then(|len| transport.write_packet(&self.tx[..len]));
            if let Err(e) = written {
                failure = Some(e);
                break;
            }
            replayed += 1;
        }
        info!("replayed {} pending publishes", replayed);
        match failure {
            Some(e) => {
                self.note_failure(e);
                Err(e)
            }
            None => Ok(()),
        }
    }

    /// Send `packet` as a request correlated by `packet_id` and wait for the
    /// acknowledgment carrying the same identifier.
    fn request(&mut self, packet_id: u16, packet: &Packet) -> Result<Packet, Error> {
        self.pending_request = Some(packet_id);
        let result = self.send(packet).and_then(|()| {
            let deadline = self.deadline()?;
            self.wait_for(deadline, |response| match response {
                Packet::SubAck(ack) => ack.packet_id == packet_id,
                Packet::UnsubAck(id) => *id == packet_id,
                _ => false,
            })
        });
        self.pending_request = None;
        result
    }

    /// Pump until `matches` accepts a classified packet. Everything else
    /// goes to the inbound queue; while that is full, inbound messages are
    /// dropped unacknowledged and the wait goes on.
    fn wait_for(
        &mut self,
        deadline: Deadline,
        mut matches: impl FnMut(&Packet) -> bool,
    ) -> Result<Packet, Error> {
        loop {
            if deadline.expired(&self.time) {
                warn!("response deadline passed");
                return Err(Error::Timeout);
            }
            match self.pump() {
                Ok(Some(packet)) if matches(&packet) => return Ok(packet),
                Ok(Some(packet)) => {
                    // `enqueue` logs the drop.
                    let _ = self.enqueue(packet);
                }
                Ok(None) | Err(Error::Transport(NetworkError::Timeout)) => {}
                Err(Error::QueueFull) => warn!("inbound message dropped during a wait"),
                Err(e) => return Err(e),
            }
        }
    }

    /// Read, decode and classify one packet.
    ///
    /// Publishes become visible by being queued here directly; the return
    /// value carries any other packet the caller should see.
    fn pump(&mut self) -> Result<Option<Packet>, Error> {
        let packet = self.read_frame()?;
        trace!("received {}", packet.packet_type());

        match packet {
            Packet::Publish(publish) => {
                self.on_publish(publish)?;
                Ok(None)
            }
            Packet::PubAck(packet_id) => {
                if !self.outgoing.on_puback(packet_id) {
                    debug!("PUBACK for unknown id {}", packet_id);
                }
                Ok(None)
            }
            Packet::PubRec(packet_id) => {
                if self.outgoing.on_pubrec(packet_id) {
                    self.send(&Packet::PubRel(packet_id))?;
                } else {
                    debug!("PUBREC for unknown id {}", packet_id);
                }
                Ok(None)
            }
            Packet::PubComp(packet_id) => {
                if !self.outgoing.on_pubcomp(packet_id) {
                    debug!("PUBCOMP for unknown id {}", packet_id);
                }
                Ok(None)
            }
            Packet::PubRel(packet_id) => {
                self.on_pubrel(packet_id)?;
                Ok(None)
            }
            Packet::SubAck(ack) if self.pending_request != Some(ack.packet_id) => {
                warn!("SUBACK for unknown id {}", ack.packet_id);
                Ok(None)
            }
            Packet::UnsubAck(packet_id) if self.pending_request != Some(packet_id) => {
                warn!("UNSUBACK for unknown id {}", packet_id);
                Ok(None)
            }
            other => Ok(Some(other)),
        }
    }

    fn read_frame(&mut self) -> Result<Packet, Error> {
        let decoded = self
            .transport
            .as_mut()
            .ok_or(Error::NotConnected)?
            .read_packet()
            .and_then(|frame| Packet::decode(frame).map_err(Error::from));
        if let Err(e) = decoded {
            self.note_failure(e);
        }
        decoded
    }

    fn on_publish(&mut self, publish: PublishPacket) -> Result<(), Error> {
        match (publish.qos, publish.packet_id) {
            (QoS::AtMostOnce, _) => self.deliver(publish),
            (QoS::AtLeastOnce, Some(packet_id)) => {
                if self.inbound.is_full() {
                    return Err(Error::QueueFull);
                }
                self.send(&Packet::PubAck(packet_id))?;
                self.deliver(publish)
            }
            (QoS::ExactlyOnce, Some(packet_id)) => {
                self.incoming.store(packet_id, publish)?;
                self.send(&Packet::PubRec(packet_id))
            }
            (_, None) => Err(Error::Malformed(DecodeError::Incomplete)),
        }
    }

    fn on_pubrel(&mut self, packet_id: u16) -> Result<(), Error> {
        if !self.incoming.contains(packet_id) {
            debug!("PUBREL for unknown id {}", packet_id);
            return Ok(());
        }
        if self.inbound.is_full() {
            return Err(Error::QueueFull);
        }
        if let Some(publish) = self.incoming.release(packet_id) {
            self.deliver(publish)?;
        }
        self.send(&Packet::PubComp(packet_id))
    }

    fn deliver(&mut self, publish: PublishPacket) -> Result<(), Error> {
        self.enqueue(Packet::Publish(publish))
    }

    fn enqueue(&mut self, packet: Packet) -> Result<(), Error> {
        self.inbound.push_back(packet).map_err(|_| {
            warn!("inbound queue full");
            Error::QueueFull
        })
    }

    fn send(&mut self, packet: &Packet) -> Result<(), Error> {
        let len = packet.encode(&mut self.tx)?;
        let transport = self.transport.as_mut().ok_or(Error::NotConnected)?;
        if let Err(e) = transport.write_packet(&self.tx[..len]) {
            self.note_failure(e);
            return Err(e);
        }
        Ok(())
    }

    fn allocate_id(&mut self) -> Result<u16, Error> {
        let outgoing = &self.outgoing;
        let pending_request = self.pending_request;
        self.ids
            .next(|id| outgoing.contains(id) || pending_request == Some(id))
            .ok_or(Error::NoPacketId)
    }

    fn deadline(&self) -> Result<Deadline, Error> {
        let endpoint = self.endpoint.as_ref().ok_or(Error::NotConnected)?;
        Ok(Deadline::after(&self.time, endpoint.response_timeout_ms))
    }

    fn close_transport(&mut self) {
        if let Some(transport) = self.transport.take() {
            let _ = transport.close();
        }
    }

    /// Drop the transport after an error that leaves it unusable.
    fn note_failure(&mut self, e: Error) {
        if let Error::Transport(net) = e {
            if !net.is_transient() {
                error!("transport failed: {}", net);
                self.transport = None;
            }
        }
    }
}
