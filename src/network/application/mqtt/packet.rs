//! MQTT 3.1.1 control packets and their wire encoding.
//!
//! Every control packet the client sends or receives is a variant of the
//! closed [`Packet`] enum. Encoding writes into a caller-supplied buffer and
//! decoding reads one complete frame, so the codec never allocates.

use super::error::{DecodeError, Error};
use super::{
    MAX_CLIENT_ID_LEN, MAX_CREDENTIAL_LEN, MAX_FILTERS, MAX_PAYLOAD_LEN, MAX_TOPIC_LEN,
    MAX_WILL_PAYLOAD_LEN,
};
use heapless::{String, Vec};

/// Protocol name carried in every CONNECT.
const PROTOCOL_NAME: &str = "MQTT";
/// MQTT protocol level for version 3.1.1.
const PROTOCOL_LEVEL: u8 = 4;

/// Largest value the remaining length field can carry.
pub const MAX_REMAINING_LENGTH: usize = 268_435_455;

/// SUBACK return code marking a rejected filter.
pub const SUBACK_FAILURE: u8 = 0x80;

/// Quality of Service levels for MQTT messages.
///
/// ```rust
/// use libmqtt::network::application::mqtt::QoS;
///
/// assert_eq!(QoS::AtMostOnce as u8, 0);
/// assert_eq!(QoS::from_u8(2), Some(QoS::ExactlyOnce));
/// assert_eq!(QoS::from_u8(3), None);
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord, serde::Deserialize)]
#[serde(try_from = "u8")]
#[repr(u8)]
pub enum QoS {
    /// **QoS 0**: fire and forget.
    AtMostOnce = 0,
    /// **QoS 1**: acknowledged with PUBACK, duplicates possible.
    AtLeastOnce = 1,
    /// **QoS 2**: four-step PUBLISH/PUBREC/PUBREL/PUBCOMP handshake.
    ExactlyOnce = 2,
}

impl QoS {
    /// Map a wire value to a QoS level.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(QoS::AtMostOnce),
            1 => Some(QoS::AtLeastOnce),
            2 => Some(QoS::ExactlyOnce),
            _ => None,
        }
    }
}

impl TryFrom<u8> for QoS {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        QoS::from_u8(value).ok_or(DecodeError::InvalidQoS(value))
    }
}

/// CONNACK return codes.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum ConnectReturnCode {
    /// Connection accepted.
    Accepted = 0,
    /// The broker does not support protocol level 4.
    UnacceptableProtocolVersion = 1,
    /// The client identifier is not allowed.
    IdentifierRejected = 2,
    /// The MQTT service is unavailable.
    ServerUnavailable = 3,
    /// Malformed user name or password.
    BadUserNameOrPassword = 4,
    /// The client is not authorized to connect.
    NotAuthorized = 5,
}

impl ConnectReturnCode {
    /// Map a wire value to a return code.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Accepted),
            1 => Some(Self::UnacceptableProtocolVersion),
            2 => Some(Self::IdentifierRejected),
            3 => Some(Self::ServerUnavailable),
            4 => Some(Self::BadUserNameOrPassword),
            5 => Some(Self::NotAuthorized),
            _ => None,
        }
    }
}

/// Control packet type, the high nibble of the first header byte.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum PacketType {
    /// Client request to connect.
    Connect = 1,
    /// Connect acknowledgment.
    ConnAck = 2,
    /// Application message.
    Publish = 3,
    /// QoS 1 acknowledgment.
    PubAck = 4,
    /// QoS 2 receipt.
    PubRec = 5,
    /// QoS 2 release.
    PubRel = 6,
    /// QoS 2 completion.
    PubComp = 7,
    /// Subscribe request.
    Subscribe = 8,
    /// Subscribe acknowledgment.
    SubAck = 9,
    /// Unsubscribe request.
    Unsubscribe = 10,
    /// Unsubscribe acknowledgment.
    UnsubAck = 11,
    /// Ping request.
    PingReq = 12,
    /// Ping response.
    PingResp = 13,
    /// Client is disconnecting.
    Disconnect = 14,
}

impl PacketType {
    /// Decode the type nibble of a fixed header byte.
    pub const fn from_header(header: u8) -> Option<Self> {
        match header >> 4 {
            1 => Some(Self::Connect),
            2 => Some(Self::ConnAck),
            3 => Some(Self::Publish),
            4 => Some(Self::PubAck),
            5 => Some(Self::PubRec),
            6 => Some(Self::PubRel),
            7 => Some(Self::PubComp),
            8 => Some(Self::Subscribe),
            9 => Some(Self::SubAck),
            10 => Some(Self::Unsubscribe),
            11 => Some(Self::UnsubAck),
            12 => Some(Self::PingReq),
            13 => Some(Self::PingResp),
            14 => Some(Self::Disconnect),
            _ => None,
        }
    }

    /// Flags mandated by MQTT 3.1.1 for every type except PUBLISH.
    const fn required_flags(self) -> u8 {
        match self {
            Self::PubRel | Self::Subscribe | Self::Unsubscribe => 0b0010,
            _ => 0b0000,
        }
    }
}

/// Last will registered with the broker at connect time.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Will {
    /// Topic the will is published to.
    pub topic: String<MAX_TOPIC_LEN>,
    /// Will message body.
    pub payload: Vec<u8, MAX_WILL_PAYLOAD_LEN>,
    /// Delivery guarantee for the will.
    pub qos: QoS,
    /// Whether the broker retains the will.
    pub retain: bool,
}

/// CONNECT request.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ConnectPacket {
    /// Client identifier.
    pub client_id: String<MAX_CLIENT_ID_LEN>,
    /// Keep-alive interval in seconds.
    pub keep_alive: u16,
    /// Discard any previous session state.
    pub clean_session: bool,
    /// Optional user name.
    pub username: Option<String<MAX_CREDENTIAL_LEN>>,
    /// Optional password.
    pub password: Option<Vec<u8, MAX_CREDENTIAL_LEN>>,
    /// Optional last will.
    pub will: Option<Will>,
}

/// CONNACK response.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ConnAckPacket {
    /// The broker resumed stored session state.
    pub session_present: bool,
    /// Outcome of the connect request.
    pub return_code: ConnectReturnCode,
}

/// An application message travelling in either direction.
///
/// ```rust
/// use libmqtt::network::application::mqtt::{PublishPacket, QoS};
///
/// let packet = PublishPacket::new("sensors/temperature", b"23.5", QoS::AtMostOnce).unwrap();
/// assert_eq!(packet.topic.as_str(), "sensors/temperature");
/// assert_eq!(&packet.payload[..], b"23.5");
/// assert_eq!(packet.packet_id, None);
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PublishPacket {
    /// The topic on which the message was published.
    pub topic: String<MAX_TOPIC_LEN>,
    /// The message payload data.
    pub payload: Vec<u8, MAX_PAYLOAD_LEN>,
    /// Delivery guarantee.
    pub qos: QoS,
    /// Broker should retain the message.
    pub retain: bool,
    /// Retransmission marker.
    pub dup: bool,
    /// Correlation identifier, present iff `qos` is above QoS 0.
    pub packet_id: Option<u16>,
}

impl PublishPacket {
    /// Build an untracked publish; the client assigns the identifier later.
    pub fn new(topic: &str, payload: &[u8], qos: QoS) -> Result<Self, Error> {
        Ok(Self {
            topic: String::try_from(topic).map_err(|_| Error::BufferOverflow)?,
            payload: Vec::from_slice(payload).map_err(|_| Error::BufferOverflow)?,
            qos,
            retain: false,
            dup: false,
            packet_id: None,
        })
    }
}

/// SUBSCRIBE request.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SubscribePacket {
    /// Correlation identifier.
    pub packet_id: u16,
    /// Requested filters with their maximum QoS, in request order.
    pub filters: Vec<(String<MAX_TOPIC_LEN>, QoS), MAX_FILTERS>,
}

/// SUBACK response.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SubAckPacket {
    /// Identifier of the SUBSCRIBE being answered.
    pub packet_id: u16,
    /// One code per requested filter: a granted QoS or [`SUBACK_FAILURE`].
    pub return_codes: Vec<u8, MAX_FILTERS>,
}

/// UNSUBSCRIBE request.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct UnsubscribePacket {
    /// Correlation identifier.
    pub packet_id: u16,
    /// Filters to remove.
    pub filters: Vec<String<MAX_TOPIC_LEN>, MAX_FILTERS>,
}

/// A decoded MQTT control packet.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Packet {
    /// CONNECT
    Connect(ConnectPacket),
    /// CONNACK
    ConnAck(ConnAckPacket),
    /// PUBLISH
    Publish(PublishPacket),
    /// PUBACK carrying its packet identifier
    PubAck(u16),
    /// PUBREC carrying its packet identifier
    PubRec(u16),
    /// PUBREL carrying its packet identifier
    PubRel(u16),
    /// PUBCOMP carrying its packet identifier
    PubComp(u16),
    /// SUBSCRIBE
    Subscribe(SubscribePacket),
    /// SUBACK
    SubAck(SubAckPacket),
    /// UNSUBSCRIBE
    Unsubscribe(UnsubscribePacket),
    /// UNSUBACK carrying its packet identifier
    UnsubAck(u16),
    /// PINGREQ
    PingReq,
    /// PINGRESP
    PingResp,
    /// DISCONNECT
    Disconnect,
}

impl Packet {
    /// The control packet type of this packet.
    pub fn packet_type(&self) -> PacketType {
        match self {
            Packet::Connect(_) => PacketType::Connect,
            Packet::ConnAck(_) => PacketType::ConnAck,
            Packet::Publish(_) => PacketType::Publish,
            Packet::PubAck(_) => PacketType::PubAck,
            Packet::PubRec(_) => PacketType::PubRec,
            Packet::PubRel(_) => PacketType::PubRel,
            Packet::PubComp(_) => PacketType::PubComp,
            Packet::Subscribe(_) => PacketType::Subscribe,
            Packet::SubAck(_) => PacketType::SubAck,
            Packet::Unsubscribe(_) => PacketType::Unsubscribe,
            Packet::UnsubAck(_) => PacketType::UnsubAck,
            Packet::PingReq => PacketType::PingReq,
            Packet::PingResp => PacketType::PingResp,
            Packet::Disconnect => PacketType::Disconnect,
        }
    }

    fn header_byte(&self) -> u8 {
        let packet_type = self.packet_type();
        let flags = match self {
            Packet::Publish(p) => {
                (u8::from(p.dup) << 3) | ((p.qos as u8) << 1) | u8::from(p.retain)
            }
            _ => packet_type.required_flags(),
        };
        ((packet_type as u8) << 4) | flags
    }

    fn remaining_length(&self) -> usize {
        match self {
            Packet::Connect(c) => {
                let mut len = 2 + PROTOCOL_NAME.len() + 1 + 1 + 2;
                len += 2 + c.client_id.len();
                if let Some(will) = &c.will {
                    len += 2 + will.topic.len() + 2 + will.payload.len();
                }
                if let Some(username) = &c.username {
                    len += 2 + username.len();
                }
                if let Some(password) = &c.password {
                    len += 2 + password.len();
                }
                len
            }
            Packet::ConnAck(_) => 2,
            Packet::Publish(p) => {
                let id_len = if p.qos == QoS::AtMostOnce { 0 } else { 2 };
                2 + p.topic.len() + id_len + p.payload.len()
            }
            Packet::PubAck(_)
            | Packet::PubRec(_)
            | Packet::PubRel(_)
            | Packet::PubComp(_)
            | Packet::UnsubAck(_) => 2,
            Packet::Subscribe(s) => {
                2 + s
                    .filters
                    .iter()
                    .map(|(filter, _)| 2 + filter.len() + 1)
                    .sum::<usize>()
            }
            Packet::SubAck(s) => 2 + s.return_codes.len(),
            Packet::Unsubscribe(u) => {
                2 + u.filters.iter().map(|filter| 2 + filter.len()).sum::<usize>()
            }
            Packet::PingReq | Packet::PingResp | Packet::Disconnect => 0,
        }
    }

    /// Encode the packet into `buf`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// * [`Error::BufferOverflow`] - `buf` is too small, or a QoS > 0 publish
    ///   has no packet identifier
    /// * [`Error::PacketTooLarge`] - the body exceeds [`MAX_REMAINING_LENGTH`]
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, Error> {
        let remaining = self.remaining_length();
        let mut w = Writer::new(buf);
        w.put_u8(self.header_byte())?;
        w.put_remaining_length(remaining)?;

        match self {
            Packet::Connect(c) => {
                w.put_str(PROTOCOL_NAME)?;
                w.put_u8(PROTOCOL_LEVEL)?;
                let mut flags = 0u8;
                if c.clean_session {
                    flags |= 0x02;
                }
                if let Some(will) = &c.will {
                    flags |= 0x04 | ((will.qos as u8) << 3);
                    if will.retain {
                        flags |= 0x20;
                    }
                }
                if c.password.is_some() {
                    flags |= 0x40;
                }
                if c.username.is_some() {
                    flags |= 0x80;
                }
                w.put_u8(flags)?;
                w.put_u16(c.keep_alive)?;
                w.put_str(&c.client_id)?;
                if let Some(will) = &c.will {
                    w.put_str(&will.topic)?;
                    w.put_binary(&will.payload)?;
                }
                if let Some(username) = &c.username {
                    w.put_str(username)?;
                }
                if let Some(password) = &c.password {
                    w.put_binary(password)?;
                }
            }
            Packet::ConnAck(c) => {
                w.put_u8(u8::from(c.session_present))?;
                w.put_u8(c.return_code as u8)?;
            }
            Packet::Publish(p) => {
                w.put_str(&p.topic)?;
                if p.qos != QoS::AtMostOnce {
                    w.put_u16(p.packet_id.ok_or(Error::BufferOverflow)?)?;
                }
                w.put_bytes(&p.payload)?;
            }
            Packet::PubAck(id)
            | Packet::PubRec(id)
            | Packet::PubRel(id)
            | Packet::PubComp(id)
            | Packet::UnsubAck(id) => w.put_u16(*id)?,
            Packet::Subscribe(s) => {
                w.put_u16(s.packet_id)?;
                for (filter, qos) in &s.filters {
                    w.put_str(filter)?;
                    w.put_u8(*qos as u8)?;
                }
            }
            Packet::SubAck(s) => {
                w.put_u16(s.packet_id)?;
                w.put_bytes(&s.return_codes)?;
            }
            Packet::Unsubscribe(u) => {
                w.put_u16(u.packet_id)?;
                for filter in &u.filters {
                    w.put_str(filter)?;
                }
            }
            Packet::PingReq | Packet::PingResp | Packet::Disconnect => {}
        }

        Ok(w.pos)
    }

    /// Decode exactly one complete frame.
    pub fn decode(frame: &[u8]) -> Result<Self, DecodeError> {
        let header = *frame.first().ok_or(DecodeError::Incomplete)?;
        let packet_type =
            PacketType::from_header(header).ok_or(DecodeError::InvalidPacketType(header))?;
        let flags = header & 0x0F;
        if packet_type != PacketType::Publish && flags != packet_type.required_flags() {
            return Err(DecodeError::InvalidFlags(header));
        }

        let (remaining, len_bytes) = read_remaining_length(&frame[1..])?;
        let start = 1 + len_bytes;
        let body = frame
            .get(start..start + remaining)
            .ok_or(DecodeError::Incomplete)?;
        let mut r = Reader::new(body);

        let packet = match packet_type {
            PacketType::Connect => Packet::Connect(decode_connect(&mut r)?),
            PacketType::ConnAck => {
                let ack_flags = r.u8()?;
                let code = r.u8()?;
                Packet::ConnAck(ConnAckPacket {
                    session_present: ack_flags & 0x01 != 0,
                    return_code: ConnectReturnCode::from_u8(code)
                        .ok_or(DecodeError::InvalidReturnCode(code))?,
                })
            }
            PacketType::Publish => {
                let qos = QoS::try_from((flags >> 1) & 0x03)?;
                let topic = to_string(r.str()?)?;
                let packet_id = match qos {
                    QoS::AtMostOnce => None,
                    _ => Some(r.u16()?),
                };
                Packet::Publish(PublishPacket {
                    topic,
                    payload: Vec::from_slice(r.rest())
                        .map_err(|_| DecodeError::CapacityExceeded)?,
                    qos,
                    retain: flags & 0x01 != 0,
                    dup: flags & 0x08 != 0,
                    packet_id,
                })
            }
            PacketType::PubAck => Packet::PubAck(r.u16()?),
            PacketType::PubRec => Packet::PubRec(r.u16()?),
            PacketType::PubRel => Packet::PubRel(r.u16()?),
            PacketType::PubComp => Packet::PubComp(r.u16()?),
            PacketType::UnsubAck => Packet::UnsubAck(r.u16()?),
            PacketType::Subscribe => {
                let packet_id = r.u16()?;
                let mut filters = Vec::new();
                while !r.is_empty() {
                    let filter = to_string(r.str()?)?;
                    let qos = QoS::try_from(r.u8()?)?;
                    filters
                        .push((filter, qos))
                        .map_err(|_| DecodeError::CapacityExceeded)?;
                }
                Packet::Subscribe(SubscribePacket { packet_id, filters })
            }
            PacketType::SubAck => {
                let packet_id = r.u16()?;
                Packet::SubAck(SubAckPacket {
                    packet_id,
                    return_codes: Vec::from_slice(r.rest())
                        .map_err(|_| DecodeError::CapacityExceeded)?,
                })
            }
            PacketType::Unsubscribe => {
                let packet_id = r.u16()?;
                let mut filters = Vec::new();
                while !r.is_empty() {
                    filters
                        .push(to_string(r.str()?)?)
                        .map_err(|_| DecodeError::CapacityExceeded)?;
                }
                Packet::Unsubscribe(UnsubscribePacket { packet_id, filters })
            }
            PacketType::PingReq => Packet::PingReq,
            PacketType::PingResp => Packet::PingResp,
            PacketType::Disconnect => Packet::Disconnect,
        };
        Ok(packet)
    }
}

fn decode_connect(r: &mut Reader<'_>) -> Result<ConnectPacket, DecodeError> {
    if r.str()? != PROTOCOL_NAME {
        return Err(DecodeError::InvalidPacketType(0x10));
    }
    let _level = r.u8()?;
    let flags = r.u8()?;
    let keep_alive = r.u16()?;
    let client_id = to_string(r.str()?)?;
    let will = if flags & 0x04 != 0 {
        let topic = to_string(r.str()?)?;
        let payload =
            Vec::from_slice(r.binary()?).map_err(|_| DecodeError::CapacityExceeded)?;
        Some(Will {
            topic,
            payload,
            qos: QoS::try_from((flags >> 3) & 0x03)?,
            retain: flags & 0x20 != 0,
        })
    } else {
        None
    };
    let username = if flags & 0x80 != 0 {
        Some(to_string(r.str()?)?)
    } else {
        None
    };
    let password = if flags & 0x40 != 0 {
        Some(Vec::from_slice(r.binary()?).map_err(|_| DecodeError::CapacityExceeded)?)
    } else {
        None
    };
    Ok(ConnectPacket {
        client_id,
        keep_alive,
        clean_session: flags & 0x02 != 0,
        username,
        password,
        will,
    })
}

fn to_string<const N: usize>(s: &str) -> Result<String<N>, DecodeError> {
    String::try_from(s).map_err(|_| DecodeError::CapacityExceeded)
}

/// Decode a remaining length field, returning `(value, bytes consumed)`.
pub fn read_remaining_length(bytes: &[u8]) -> Result<(usize, usize), DecodeError> {
    let mut value = 0usize;
    let mut shift = 0u32;
    for (i, &byte) in bytes.iter().enumerate() {
        if i == 4 {
            return Err(DecodeError::InvalidRemainingLength);
        }
        value |= usize::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
        shift += 7;
    }
    if bytes.len() >= 4 {
        Err(DecodeError::InvalidRemainingLength)
    } else {
        Err(DecodeError::Incomplete)
    }
}

struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn put_bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let end = self.pos + bytes.len();
        self.buf
            .get_mut(self.pos..end)
            .ok_or(Error::BufferOverflow)?
            .copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }

    fn put_u8(&mut self, value: u8) -> Result<(), Error> {
        self.put_bytes(&[value])
    }

    fn put_u16(&mut self, value: u16) -> Result<(), Error> {
        self.put_bytes(&value.to_be_bytes())
    }

    fn put_binary(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let len = u16::try_from(bytes.len()).map_err(|_| Error::BufferOverflow)?;
        self.put_u16(len)?;
        self.put_bytes(bytes)
    }

    fn put_str(&mut self, s: &str) -> Result<(), Error> {
        self.put_binary(s.as_bytes())
    }

    fn put_remaining_length(&mut self, mut len: usize) -> Result<(), Error> {
        if len > MAX_REMAINING_LENGTH {
            return Err(Error::PacketTooLarge);
        }
        loop {
            let mut byte = (len % 128) as u8;
            len /= 128;
            if len > 0 {
                byte |= 0x80;
            }
            self.put_u8(byte)?;
            if len == 0 {
                return Ok(());
            }
        }
    }
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let bytes = self
            .buf
            .get(self.pos..self.pos + n)
            .ok_or(DecodeError::Incomplete)?;
        self.pos += n;
        Ok(bytes)
    }

    fn u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, DecodeError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn binary(&mut self) -> Result<&'a [u8], DecodeError> {
        let len = usize::from(self.u16()?);
        self.take(len)
    }

    fn str(&mut self) -> Result<&'a str, DecodeError> {
        core::str::from_utf8(self.binary()?).map_err(|_| DecodeError::InvalidUtf8)
    }

    fn rest(&mut self) -> &'a [u8] {
        let rest = &self.buf[self.pos.min(self.buf.len())..];
        self.pos = self.buf.len();
        rest
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for QoS {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "QoS{=u8}", *self as u8)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConnectReturnCode {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Accepted => defmt::write!(f, "Accepted"),
            Self::UnacceptableProtocolVersion => defmt::write!(f, "UnacceptableProtocolVersion"),
            Self::IdentifierRejected => defmt::write!(f, "IdentifierRejected"),
            Self::ServerUnavailable => defmt::write!(f, "ServerUnavailable"),
            Self::BadUserNameOrPassword => defmt::write!(f, "BadUserNameOrPassword"),
            Self::NotAuthorized => defmt::write!(f, "NotAuthorized"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PacketType {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Connect => defmt::write!(f, "CONNECT"),
            Self::ConnAck => defmt::write!(f, "CONNACK"),
            Self::Publish => defmt::write!(f, "PUBLISH"),
            Self::PubAck => defmt::write!(f, "PUBACK"),
            Self::PubRec => defmt::write!(f, "PUBREC"),
            Self::PubRel => defmt::write!(f, "PUBREL"),
            Self::PubComp => defmt::write!(f, "PUBCOMP"),
            Self::Subscribe => defmt::write!(f, "SUBSCRIBE"),
            Self::SubAck => defmt::write!(f, "SUBACK"),
            Self::Unsubscribe => defmt::write!(f, "UNSUBSCRIBE"),
            Self::UnsubAck => defmt::write!(f, "UNSUBACK"),
            Self::PingReq => defmt::write!(f, "PINGREQ"),
            Self::PingResp => defmt::write!(f, "PINGRESP"),
            Self::Disconnect => defmt::write!(f, "DISCONNECT"),
        }
    }
}
