//! Packet framing over a byte [`Connection`].

use super::MAX_PACKET_SIZE;
use super::error::Error;
use crate::network::error::Error as NetworkError;
use crate::network::{Close, Connection, Read, Write};

/// Consecutive timeouts tolerated once a frame is partly transferred.
const MAX_STALLS: usize = 64;

/// Frames MQTT packets on top of a byte stream.
///
/// Each [`read_packet`](Self::read_packet) yields exactly one complete frame,
/// and each [`write_packet`](Self::write_packet) writes and flushes one.
pub struct Transport<C: Connection> {
    connection: C,
    rx: [u8; MAX_PACKET_SIZE],
    max_packet_size: usize,
}

impl<C: Connection> core::fmt::Debug for Transport<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Transport")
            .field("max_packet_size", &self.max_packet_size)
            .finish_non_exhaustive()
    }
}

impl<C: Connection> Transport<C> {
    /// Wrap `connection`, accepting inbound frames up to `max_packet_size`
    /// bytes (clamped to the receive buffer).
    pub fn new(connection: C, max_packet_size: usize) -> Self {
        Self {
            connection,
            rx: [0; MAX_PACKET_SIZE],
            max_packet_size: max_packet_size.min(MAX_PACKET_SIZE),
        }
    }

    /// Read one whole frame.
    ///
    /// # Errors
    ///
    /// * `Error::Transport(Timeout)` - nothing arrived; no bytes were consumed
    /// * [`Error::PacketTooLarge`] - the frame was discarded, the stream is
    ///   still aligned on the next frame
    /// * other `Error::Transport(_)` - the connection is unusable
    pub fn read_packet(&mut self) -> Result<&[u8], Error> {
        let mut header = [0u8; 1];
        match self.connection.read(&mut header) {
            Ok(0) => return Err(NetworkError::ConnectionClosed.into()),
            Ok(_) => {}
            Err(e) => return Err(Error::Transport(e.into())),
        }

        let mut remaining = 0usize;
        let mut len_bytes = 0usize;
        loop {
            if len_bytes == 4 {
                return Err(Error::Transport(NetworkError::ProtocolError));
            }
            let mut byte = [0u8; 1];
            read_exact(&mut self.connection, &mut byte)?;
            remaining |= usize::from(byte[0] & 0x7F) << (7 * len_bytes);
            self.rx[1 + len_bytes] = byte[0];
            len_bytes += 1;
            if byte[0] & 0x80 == 0 {
                break;
            }
        }

        let start = 1 + len_bytes;
        let total = start + remaining;
        if total > self.max_packet_size {
            self.discard(remaining)?;
            return Err(Error::PacketTooLarge);
        }

        self.rx[0] = header[0];
        read_exact(&mut self.connection, &mut self.rx[start..total])?;
        Ok(&self.rx[..total])
    }

    /// Write one encoded frame and flush it.
    pub fn write_packet(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let mut written = 0;
        let mut stalls = 0;
        while written < bytes.len() {
            match self.connection.write(&bytes[written..]) {
                Ok(0) => return Err(NetworkError::WriteError.into()),
                Ok(n) => {
                    written += n;
                    stalls = 0;
                }
                Err(e) => {
                    let e: NetworkError = e.into();
                    stalls += 1;
                    if !e.is_transient() || stalls > MAX_STALLS {
                        return Err(e.into());
                    }
                }
            }
        }
        self.connection
            .flush()
            .map_err(|e| Error::Transport(e.into()))
    }

    /// Close the underlying connection.
    pub fn close(self) -> Result<(), Error> {
        self.connection.close().map_err(|e| Error::Transport(e.into()))
    }

    /// The underlying connection.
    pub fn connection(&self) -> &C {
        &self.connection
    }

    /// Mutable access to the underlying connection.
    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.connection
    }

    fn discard(&mut self, mut remaining: usize) -> Result<(), Error> {
        let mut scratch = [0u8; 64];
        while remaining > 0 {
            let n = remaining.min(scratch.len());
            read_exact(&mut self.connection, &mut scratch[..n])?;
            remaining -= n;
        }
        Ok(())
    }
}

fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<(), Error> {
    let mut filled = 0;
    let mut stalls = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => return Err(NetworkError::ConnectionClosed.into()),
            Ok(n) => {
                filled += n;
                stalls = 0;
            }
            Err(e) => {
                let e: NetworkError = e.into();
                stalls += 1;
                // Mid-frame: a timeout must not lose framing.
                if !e.is_transient() {
                    return Err(e.into());
                }
                if stalls > MAX_STALLS {
                    return Err(NetworkError::ReadError.into());
                }
            }
        }
    }
    Ok(())
}
