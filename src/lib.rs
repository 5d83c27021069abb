//! # libmqtt - MQTT 3.1.1 client session engine
//!
//! An MQTT 3.1.1 client for devices that talk to a broker over any
//! byte-stream connection. The library is designed for embedded systems and
//! supports `no_std` environments: every buffer and table has a fixed
//! capacity and nothing is heap allocated.
//!
//! ## Features
//!
//! - **Session lifecycle**: connect, resume after a connection loss,
//!   disconnect
//! - **Delivery guarantees**: QoS 0, 1 and 2 in both directions, with
//!   in-order retransmission of unacknowledged publishes on resume
//! - **Subscriptions**: granted QoS tracked per topic filter
//! - **Lifecycle hooks**: persistent and one-shot `connect`/`connected`
//!   handlers
//! - **Configuration**: options as a struct literal or loaded from JSON
//!
//! ## Crate features
//!
//! - `std`: the `std::net` TCP connector and an `Instant` based clock
//! - `defmt`: log through [`defmt`](https://docs.rs/defmt)
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! libmqtt = "0.1.0"
//! ```
//!
//! ### Bringing your own connection
//!
//! ```rust,no_run
//! use libmqtt::network::application::mqtt::{Client, Options, Packet, QoS};
//! use libmqtt::network::error::Error as NetworkError;
//! use libmqtt::network::{Close, Connect, Connection, Read, Write};
//! use core::time::Duration;
//! # struct ModemSocket;
//! # impl Connection for ModemSocket {}
//! # impl Read for ModemSocket {
//! #     type Error = NetworkError;
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Err(NetworkError::Timeout) }
//! # }
//! # impl Write for ModemSocket {
//! #     type Error = NetworkError;
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl Close for ModemSocket {
//! #     type Error = NetworkError;
//! #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//!
//! struct Modem;
//!
//! impl Connect for Modem {
//!     type Connection = ModemSocket;
//!     type Error = NetworkError;
//!
//!     fn connect(&mut self, host: &str, port: u16, timeout: Duration) -> Result<ModemSocket, NetworkError> {
//!         // dial host:port through the modem
//! #       let _ = (host, port, timeout);
//! #       Ok(ModemSocket)
//!     }
//! }
//!
//! # fn main() -> Result<(), libmqtt::network::application::mqtt::Error> {
//! let options = Options::from_json(r#"{"host":"broker.local","client_id":"meter_7"}"#)?;
//! let mut client = Client::new(Modem);
//! client.connect(&options)?;
//! client.subscribe("meters/7/cmd", QoS::ExactlyOnce)?;
//!
//! while let Packet::Publish(message) = client.next_message()? {
//!     client.publish("meters/7/ack", &message.payload, QoS::AtLeastOnce, false)?;
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

#[macro_use]
mod fmt;

/// Network abstraction layer and the MQTT protocol implementation.
///
/// Connections are abstracted behind small traits so the session engine runs
/// over whatever transport the platform provides.
pub mod network;
