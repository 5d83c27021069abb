//! Session configuration.

use super::error::Error;
use super::packet::{ConnectPacket, QoS, Will};
use super::MAX_PACKET_SIZE;
use heapless::{String, Vec};
use serde::{Deserialize, Deserializer};

/// Standard unencrypted MQTT port.
pub const DEFAULT_PORT: u16 = 1883;
/// Keep-alive used when none is configured.
pub const DEFAULT_KEEP_ALIVE_SECONDS: u16 = 60;
/// TCP connect timeout used when none is configured.
pub const DEFAULT_CONNECT_TIMEOUT_MS: u32 = 5_000;
/// Handshake response timeout used when none is configured.
pub const DEFAULT_RESPONSE_TIMEOUT_MS: u32 = 10_000;

/// Last will registered at connect time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LastWill<'a> {
    /// Topic the broker publishes the will to.
    pub topic: &'a str,
    /// Will message body. In JSON it is given as a string.
    #[serde(deserialize_with = "str_as_bytes")]
    pub payload: &'a [u8],
    /// Delivery guarantee for the will.
    #[serde(default = "default_will_qos")]
    pub qos: QoS,
    /// Whether the broker retains the will.
    #[serde(default)]
    pub retain: bool,
}

/// Configuration options for an MQTT client session.
///
/// Options are immutable for the lifetime of a connection attempt. They can
/// be written as a struct literal or loaded from JSON:
///
/// ```rust
/// use libmqtt::network::application::mqtt::Options;
///
/// let options = Options::from_json(
///     r#"{"host":"broker.local","client_id":"sensor_01","clean_session":false}"#,
/// )
/// .unwrap();
///
/// assert_eq!(options.host, "broker.local");
/// assert_eq!(options.port, 1883);
/// assert!(!options.clean_session);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Options<'a> {
    /// Broker host name or address.
    pub host: &'a str,

    /// Broker port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// The client identifier, must be unique within the broker.
    ///
    /// May be empty only together with `clean_session = true`, in which case
    /// the broker assigns one.
    pub client_id: &'a str,

    /// The keep-alive time interval in seconds. 0 disables keep-alive.
    #[serde(default = "default_keep_alive")]
    pub keep_alive_seconds: u16,

    /// Whether to start a clean session on the first connect.
    ///
    /// Reconnects always ask to resume the session.
    #[serde(default = "default_clean_session")]
    pub clean_session: bool,

    /// Optional user name passed through in CONNECT.
    #[serde(borrow, default)]
    pub username: Option<&'a str>,

    /// Optional password passed through in CONNECT.
    #[serde(borrow, default)]
    pub password: Option<&'a str>,

    /// Optional last will.
    #[serde(borrow, default)]
    pub will: Option<LastWill<'a>>,

    /// How long the transport may take to open the TCP connection.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u32,

    /// How long connect, subscribe, unsubscribe and ping wait for the broker.
    #[serde(default = "default_response_timeout")]
    pub response_timeout_ms: u32,

    /// Largest inbound frame accepted by the transport.
    #[serde(default = "default_max_packet_size")]
    pub max_packet_size: usize,
}

impl<'a> Options<'a> {
    /// Options for `client_id` at `host`, everything else at its default.
    pub fn new(host: &'a str, client_id: &'a str) -> Self {
        Self {
            host,
            client_id,
            ..Self::default()
        }
    }

    /// Parse options from a JSON document.
    ///
    /// Strings are borrowed from `json`, so they must not contain escapes.
    pub fn from_json(json: &'a str) -> Result<Self, Error> {
        let (options, _) =
            serde_json_core::from_str::<Options<'a>>(json).map_err(|_| Error::InvalidOptions)?;
        options.validate()?;
        Ok(options)
    }

    /// Check the options for inconsistencies.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidOptions`] if the client id is empty while asking for
    /// a persistent session, if the client id is too long, or if
    /// `max_packet_size` is outside `2..=MAX_PACKET_SIZE`.
    pub fn validate(&self) -> Result<(), Error> {
        if self.client_id.is_empty() && !self.clean_session {
            return Err(Error::InvalidOptions);
        }
        if self.client_id.len() > super::MAX_CLIENT_ID_LEN {
            return Err(Error::InvalidOptions);
        }
        if self.max_packet_size < 2 || self.max_packet_size > MAX_PACKET_SIZE {
            return Err(Error::InvalidOptions);
        }
        Ok(())
    }

    /// Build the CONNECT packet these options describe.
    pub fn connect_packet(&self) -> Result<ConnectPacket, Error> {
        let will = match &self.will {
            Some(will) => Some(Will {
                topic: String::try_from(will.topic).map_err(|_| Error::BufferOverflow)?,
                payload: Vec::from_slice(will.payload).map_err(|_| Error::BufferOverflow)?,
                qos: will.qos,
                retain: will.retain,
            }),
            None => None,
        };
        Ok(ConnectPacket {
            client_id: String::try_from(self.client_id).map_err(|_| Error::BufferOverflow)?,
            keep_alive: self.keep_alive_seconds,
            clean_session: self.clean_session,
            username: self
                .username
                .map(String::try_from)
                .transpose()
                .map_err(|_| Error::BufferOverflow)?,
            password: self
                .password
                .map(|p| Vec::from_slice(p.as_bytes()))
                .transpose()
                .map_err(|_| Error::BufferOverflow)?,
            will,
        })
    }
}

impl Default for Options<'_> {
    fn default() -> Self {
        Self {
            host: "localhost",
            port: DEFAULT_PORT,
            client_id: "",
            keep_alive_seconds: DEFAULT_KEEP_ALIVE_SECONDS,
            clean_session: true,
            username: None,
            password: None,
            will: None,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            response_timeout_ms: DEFAULT_RESPONSE_TIMEOUT_MS,
            max_packet_size: MAX_PACKET_SIZE,
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_keep_alive() -> u16 {
    DEFAULT_KEEP_ALIVE_SECONDS
}

fn default_clean_session() -> bool {
    true
}

fn default_connect_timeout() -> u32 {
    DEFAULT_CONNECT_TIMEOUT_MS
}

fn default_response_timeout() -> u32 {
    DEFAULT_RESPONSE_TIMEOUT_MS
}

fn default_max_packet_size() -> usize {
    MAX_PACKET_SIZE
}

fn default_will_qos() -> QoS {
    QoS::AtMostOnce
}

fn str_as_bytes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<&'de [u8], D::Error> {
    <&'de str>::deserialize(deserializer).map(str::as_bytes)
}
