//! Packet identifier allocation.

/// Hands out nonzero 16-bit packet identifiers.
///
/// Identifiers come from a counter that wraps from 65535 back to 1; values
/// still attached to an unresolved request are skipped, so a live identifier
/// is never handed out twice.
#[derive(Debug, Clone)]
pub struct PacketIdAllocator {
    last: u16,
}

impl PacketIdAllocator {
    /// Create an allocator whose first identifier is 1.
    pub const fn new() -> Self {
        Self { last: 0 }
    }

    /// Allocate the next identifier for which `in_use` returns `false`.
    ///
    /// Returns `None` only when all 65535 identifiers are in use.
    pub fn next(&mut self, mut in_use: impl FnMut(u16) -> bool) -> Option<u16> {
        let mut candidate = self.last;
        for _ in 0..u16::MAX {
            candidate = if candidate == u16::MAX { 1 } else { candidate + 1 };
            if !in_use(candidate) {
                self.last = candidate;
                return Some(candidate);
            }
        }
        None
    }
}

impl Default for PacketIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
