//! Blocking TCP transport for hosted targets.

use super::error::Error;
use super::{Close, Connect, Connection, Read, Write};
use core::time::Duration;
use std::io::{self, Read as _, Write as _};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};

/// Read timeout applied to every opened stream unless overridden.
///
/// The session engine treats a read timeout as "nothing arrived yet" and uses
/// it to re-check its own response deadline.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Opens [`TcpConnection`]s with `std::net`.
#[derive(Debug, Clone)]
pub struct TcpConnector {
    poll_interval: Duration,
}

impl TcpConnector {
    /// Create a connector using [`DEFAULT_POLL_INTERVAL`].
    pub fn new() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Use a different socket read timeout.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

impl Default for TcpConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl Connect for TcpConnector {
    type Connection = TcpConnection;
    type Error = Error;

    fn connect(
        &mut self,
        host: &str,
        port: u16,
        timeout: Duration,
    ) -> Result<Self::Connection, Self::Error> {
        let addrs = (host, port)
            .to_socket_addrs()
            .map_err(|_| Error::InvalidAddress)?;

        let mut last_error = Error::InvalidAddress;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, timeout) {
                Ok(stream) => {
                    stream
                        .set_read_timeout(Some(self.poll_interval))
                        .map_err(map_io_error)?;
                    stream.set_nodelay(true).map_err(map_io_error)?;
                    return Ok(TcpConnection { stream });
                }
                Err(e) => last_error = map_io_error(e),
            }
        }
        Err(last_error)
    }
}

/// A connected TCP stream.
#[derive(Debug)]
pub struct TcpConnection {
    stream: TcpStream,
}

impl TcpConnection {
    /// Wrap an already connected stream.
    pub fn from_stream(stream: TcpStream) -> Self {
        Self { stream }
    }
}

fn map_io_error(e: io::Error) -> Error {
    match e.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => Error::Timeout,
        io::ErrorKind::ConnectionRefused => Error::ConnectionRefused,
        io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::BrokenPipe
        | io::ErrorKind::UnexpectedEof => Error::ConnectionClosed,
        io::ErrorKind::NotConnected => Error::NotOpen,
        _ => Error::ReadError,
    }
}

impl Read for TcpConnection {
    type Error = Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.stream.read(buf).map_err(map_io_error)
    }
}

impl Write for TcpConnection {
    type Error = Error;

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.stream.write(buf).map_err(|e| match map_io_error(e) {
            Error::ReadError => Error::WriteError,
            other => other,
        })
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.stream.flush().map_err(|_| Error::WriteError)
    }
}

impl Close for TcpConnection {
    type Error = Error;

    fn close(self) -> Result<(), Self::Error> {
        match self.stream.shutdown(Shutdown::Both) {
            Ok(()) => Ok(()),
            // Already torn down by the peer.
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            Err(e) => Err(map_io_error(e)),
        }
    }
}

impl Connection for TcpConnection {}
