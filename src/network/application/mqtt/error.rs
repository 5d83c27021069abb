//! Error types for the MQTT session engine.

use super::packet::ConnectReturnCode;
use crate::network::error::Error as NetworkError;
use core::fmt;

/// Reasons a frame could not be turned into a [`Packet`](super::packet::Packet).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DecodeError {
    /// The frame ended before the packet did.
    Incomplete,
    /// The remaining length field is longer than four bytes or out of range.
    InvalidRemainingLength,
    /// The control packet type nibble is reserved.
    InvalidPacketType(u8),
    /// The fixed header flags are not the ones mandated for this packet type.
    InvalidFlags(u8),
    /// A QoS field holds 3.
    InvalidQoS(u8),
    /// The CONNACK return code is outside 0..=5.
    InvalidReturnCode(u8),
    /// A string field is not valid UTF-8.
    InvalidUtf8,
    /// A field does not fit the fixed-capacity buffer it decodes into.
    CapacityExceeded,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Incomplete => write!(f, "incomplete packet"),
            DecodeError::InvalidRemainingLength => write!(f, "invalid remaining length"),
            DecodeError::InvalidPacketType(t) => write!(f, "invalid packet type {t:#04x}"),
            DecodeError::InvalidFlags(h) => write!(f, "invalid fixed header flags {h:#04x}"),
            DecodeError::InvalidQoS(q) => write!(f, "invalid QoS {q}"),
            DecodeError::InvalidReturnCode(c) => write!(f, "invalid CONNACK return code {c}"),
            DecodeError::InvalidUtf8 => write!(f, "string is not valid UTF-8"),
            DecodeError::CapacityExceeded => write!(f, "field exceeds buffer capacity"),
        }
    }
}

/// Errors surfaced by the MQTT [`Client`](super::Client).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The transport failed to connect, send or receive.
    Transport(NetworkError),
    /// A handshake received a packet of the wrong kind.
    InvalidResponse,
    /// The broker answered CONNECT with a non-zero return code.
    ConnectionRejected(ConnectReturnCode),
    /// No terminal response arrived before the response deadline.
    Timeout,
    /// The operation needs an open transport.
    NotConnected,
    /// An inbound frame could not be decoded.
    Malformed(DecodeError),
    /// A frame exceeds the configured maximum packet size.
    PacketTooLarge,
    /// An outgoing packet does not fit the encode buffer or a field capacity.
    BufferOverflow,
    /// The outgoing in-flight window is full.
    InflightFull,
    /// The inbound queue or the QoS 2 receive store is full.
    QueueFull,
    /// Every packet identifier is currently in use.
    NoPacketId,
    /// An event handler could not register or reported failure.
    HandlerFailed,
    /// The options are inconsistent.
    InvalidOptions,
}

impl From<NetworkError> for Error {
    fn from(e: NetworkError) -> Self {
        Error::Transport(e)
    }
}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Self {
        Error::Malformed(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "transport error: {e}"),
            Error::InvalidResponse => write!(f, "unexpected packet during handshake"),
            Error::ConnectionRejected(code) => write!(f, "connection rejected: {code:?}"),
            Error::Timeout => write!(f, "timed out waiting for the broker"),
            Error::NotConnected => write!(f, "not connected"),
            Error::Malformed(e) => write!(f, "malformed packet: {e}"),
            Error::PacketTooLarge => write!(f, "packet exceeds maximum size"),
            Error::BufferOverflow => write!(f, "buffer overflow"),
            Error::InflightFull => write!(f, "in-flight window is full"),
            Error::QueueFull => write!(f, "inbound queue is full"),
            Error::NoPacketId => write!(f, "no free packet identifier"),
            Error::HandlerFailed => write!(f, "event handler failed"),
            Error::InvalidOptions => write!(f, "invalid options"),
        }
    }
}

impl core::error::Error for Error {}

#[cfg(feature = "defmt")]
impl defmt::Format for DecodeError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            DecodeError::Incomplete => defmt::write!(f, "Incomplete"),
            DecodeError::InvalidRemainingLength => defmt::write!(f, "InvalidRemainingLength"),
            DecodeError::InvalidPacketType(t) => defmt::write!(f, "InvalidPacketType({=u8:#x})", t),
            DecodeError::InvalidFlags(h) => defmt::write!(f, "InvalidFlags({=u8:#x})", h),
            DecodeError::InvalidQoS(q) => defmt::write!(f, "InvalidQoS({=u8})", q),
            DecodeError::InvalidReturnCode(c) => defmt::write!(f, "InvalidReturnCode({=u8})", c),
            DecodeError::InvalidUtf8 => defmt::write!(f, "InvalidUtf8"),
            DecodeError::CapacityExceeded => defmt::write!(f, "CapacityExceeded"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Transport(e) => defmt::write!(f, "Transport({})", e),
            Error::InvalidResponse => defmt::write!(f, "InvalidResponse"),
            Error::ConnectionRejected(code) => defmt::write!(f, "ConnectionRejected({})", code),
            Error::Timeout => defmt::write!(f, "Timeout"),
            Error::NotConnected => defmt::write!(f, "NotConnected"),
            Error::Malformed(e) => defmt::write!(f, "Malformed({})", e),
            Error::PacketTooLarge => defmt::write!(f, "PacketTooLarge"),
            Error::BufferOverflow => defmt::write!(f, "BufferOverflow"),
            Error::InflightFull => defmt::write!(f, "InflightFull"),
            Error::QueueFull => defmt::write!(f, "QueueFull"),
            Error::NoPacketId => defmt::write!(f, "NoPacketId"),
            Error::HandlerFailed => defmt::write!(f, "HandlerFailed"),
            Error::InvalidOptions => defmt::write!(f, "InvalidOptions"),
        }
    }
}
