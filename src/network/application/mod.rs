//! # Application Layer Network Protocols
//!
//! Application layer (OSI Layer 7) protocols built on the core network traits.
//! Every client here is connection agnostic: it works with any type
//! implementing [`Connection`](crate::network::Connection) and uses fixed-size
//! buffers so it runs without a heap.
//!
//! ## Available Protocols
//!
//! - **[`mqtt`]**: MQTT 3.1.1 client session engine with QoS 0/1/2 delivery,
//!   session resumption and replay of unacknowledged publishes

/// MQTT client implementation.
///
/// Provides an MQTT 3.1.1 client for lightweight publish-subscribe messaging,
/// commonly used in IoT applications.
pub mod mqtt;
