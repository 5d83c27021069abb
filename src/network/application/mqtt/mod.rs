//! MQTT 3.1.1 client session engine for embedded systems.
//!
//! This module provides an MQTT 3.1.1 client that runs in `no_std`
//! environments on top of any byte [`Connection`](crate::network::Connection).
//! MQTT is a lightweight publish-subscribe protocol: clients publish messages
//! to topics and a broker routes them to every client subscribed to a
//! matching topic filter.
//!
//! # Key Features
//!
//! - QoS 0, 1 and 2 delivery in both directions
//! - Session resumption with in-order, duplicate-flagged retransmission
//! - Subscription bookkeeping from SUBACK return codes
//! - `connect`/`connected` lifecycle event handlers
//! - Fixed-capacity state, no heap allocation
//!
//! # Usage
//!
//! The main entry point is the [`Client`]. It is created from a
//! [`Connect`](crate::network::Connect)or and connected with a set of
//! [`Options`].
//!
//! ```rust,no_run
//! use libmqtt::network::application::mqtt::{Client, Options, QoS};
//! use libmqtt::network::error::Error as NetworkError;
//! use libmqtt::network::{Close, Connect, Connection, Read, Write};
//! # use core::time::Duration;
//! # struct MockConnection;
//! # impl Connection for MockConnection {}
//! # impl Read for MockConnection {
//! #     type Error = NetworkError;
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl Write for MockConnection {
//! #     type Error = NetworkError;
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl Close for MockConnection {
//! #     type Error = NetworkError;
//! #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockConnector;
//! # impl Connect for MockConnector {
//! #     type Connection = MockConnection;
//! #     type Error = NetworkError;
//! #     fn connect(&mut self, _: &str, _: u16, _: Duration) -> Result<MockConnection, NetworkError> {
//! #         Ok(MockConnection)
//! #     }
//! # }
//!
//! # fn main() -> Result<(), libmqtt::network::application::mqtt::Error> {
//! let options = Options::new("broker.local", "iot_device_123");
//! let mut client = Client::new(MockConnector);
//!
//! client.connect(&options)?;
//! client.subscribe("sensors/+", QoS::AtLeastOnce)?;
//! client.publish("status", b"online", QoS::AtMostOnce, false)?;
//! # Ok(())
//! # }
//! ```

/// The session engine.
pub mod client;
/// Session options.
pub mod config;
/// Error types.
pub mod error;
/// Lifecycle event handlers.
pub mod events;
pub mod identifier;
pub mod incoming;
pub mod outgoing;
/// Control packet model and wire codec.
pub mod packet;
pub mod subscriptions;
pub mod time;
pub mod transport;

pub use client::Client;
pub use config::{LastWill, Options};
pub use error::{DecodeError, Error};
pub use events::{Event, EventHandler, EventKind, EventRegistry};
pub use packet::{
    ConnAckPacket, ConnectPacket, ConnectReturnCode, Packet, PacketType, PublishPacket, QoS,
    SubAckPacket, SubscribePacket, UnsubscribePacket, Will,
};
#[cfg(feature = "std")]
pub use time::StdTimeSource;
pub use time::{DummyTimeSource, TimeSource};
pub use transport::Transport;

/// Longest topic name or topic filter, in bytes.
pub const MAX_TOPIC_LEN: usize = 256;
/// Largest publish payload, in bytes.
pub const MAX_PAYLOAD_LEN: usize = 1024;
/// Largest last-will payload, in bytes.
pub const MAX_WILL_PAYLOAD_LEN: usize = 256;
/// Longest client identifier, in bytes.
pub const MAX_CLIENT_ID_LEN: usize = 64;
/// Longest user name or password, in bytes.
pub const MAX_CREDENTIAL_LEN: usize = 128;
/// Longest broker host name, in bytes.
pub const MAX_HOST_LEN: usize = 128;
/// Topic filters per SUBSCRIBE or UNSUBSCRIBE.
pub const MAX_FILTERS: usize = 8;
/// Unacknowledged outgoing QoS 1/2 publishes.
pub const MAX_INFLIGHT: usize = 16;
/// Inbound QoS 2 publishes held until PUBREL.
pub const MAX_INCOMING_QOS2: usize = 8;
/// Packets waiting for the application.
pub const MAX_INBOUND: usize = 8;
/// Handlers per event kind, per list.
pub const MAX_HANDLERS: usize = 4;
/// Granted subscriptions. Must be a power of two.
pub const MAX_SUBSCRIPTIONS: usize = 32;
/// Largest encoded packet, in either direction.
pub const MAX_PACKET_SIZE: usize = 4096;
