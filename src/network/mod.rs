//! A network abstraction layer for embedded systems
//!
//! This module provides the small set of traits the MQTT session engine needs
//! from the platform: a byte-oriented [`Connection`] and a [`Connect`]or able
//! to open one with a timeout. Anything that implements them (a `smoltcp`
//! socket, an `embedded-io` adapter, `std::net::TcpStream`, a test double)
//! can carry an MQTT session.

#![deny(unsafe_code)]

use core::time::Duration;

/// Common error types for network operations
pub mod error;

/// Protocol-specific client implementations
pub mod application;

/// TCP connector backed by `std::net`
#[cfg(feature = "std")]
pub mod tcp;

/// Re-exports of common traits
pub mod prelude {
    pub use super::{Close, Connect, Connection, Read, Write};
}

/// Byte source half of a connection.
pub trait Read {
    /// Associated error type
    type Error: core::fmt::Debug + Into<error::Error>;
    /// Read data from the connection
    ///
    /// Returning `Ok(0)` means the peer closed the stream.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// Byte sink half of a connection.
pub trait Write {
    /// Associated error type
    type Error: core::fmt::Debug + Into<error::Error>;
    /// Write data to the connection
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error>;
    /// Flush the write buffer
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Orderly shutdown of a connection.
pub trait Close {
    /// Associated error type
    type Error: core::fmt::Debug + Into<error::Error>;
    /// Close the connection
    fn close(self) -> Result<(), Self::Error>;
}

/// A synchronous connection
pub trait Connection: Read + Write + Close {}

/// A synchronous connector (client)
pub trait Connect {
    /// Associated connection type
    type Connection: Connection;
    /// Associated error type
    type Error: core::fmt::Debug + Into<error::Error>;
    /// Open a connection to `host:port`, giving up after `timeout`
    fn connect(
        &mut self,
        host: &str,
        port: u16,
        timeout: Duration,
    ) -> Result<Self::Connection, Self::Error>;
}
