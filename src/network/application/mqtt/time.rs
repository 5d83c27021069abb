//! Time abstraction for response deadlines.

/// Monotonic millisecond clock.
pub trait TimeSource {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_millis(&self) -> u64;
}

/// Clock that never advances.
///
/// With it, response deadlines never expire and handshakes wait for as long
/// as the transport does. Useful on targets without a timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DummyTimeSource;

impl TimeSource for DummyTimeSource {
    fn now_millis(&self) -> u64 {
        0
    }
}

/// `std::time::Instant` backed clock.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct StdTimeSource {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdTimeSource {
    /// Start counting from now.
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl TimeSource for StdTimeSource {
    fn now_millis(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

/// Point in time after which a wait gives up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Deadline {
    at: u64,
}

impl Deadline {
    pub(crate) fn after(time: &impl TimeSource, timeout_ms: u32) -> Self {
        Self {
            at: time.now_millis().saturating_add(u64::from(timeout_ms)),
        }
    }

    pub(crate) fn expired(&self, time: &impl TimeSource) -> bool {
        time.now_millis() > self.at
    }
}
