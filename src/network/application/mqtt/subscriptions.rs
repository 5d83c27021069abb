//! Granted subscriptions.

use super::error::Error;
use super::packet::{QoS, SUBACK_FAILURE};
use super::{MAX_SUBSCRIPTIONS, MAX_TOPIC_LEN};
use heapless::{FnvIndexMap, String};

/// Topic filter to granted QoS, as acknowledged by the broker.
///
/// Filters the broker rejected are never stored.
#[derive(Debug, Default)]
pub struct SubscriptionTable {
    granted: FnvIndexMap<String<MAX_TOPIC_LEN>, QoS, MAX_SUBSCRIPTIONS>,
}

impl SubscriptionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            granted: FnvIndexMap::new(),
        }
    }

    /// Apply one SUBACK return code to `filter`.
    ///
    /// Returns the granted QoS, or `None` if the broker rejected the filter.
    pub fn apply(&mut self, filter: &str, return_code: u8) -> Result<Option<QoS>, Error> {
        if return_code == SUBACK_FAILURE {
            return Ok(None);
        }
        let qos = QoS::from_u8(return_code).ok_or(Error::InvalidResponse)?;
        let key = String::try_from(filter).map_err(|_| Error::BufferOverflow)?;
        self.granted
            .insert(key, qos)
            .map_err(|_| Error::BufferOverflow)?;
        Ok(Some(qos))
    }

    /// Forget `filter`. Returns whether it was present.
    pub fn remove(&mut self, filter: &str) -> bool {
        let Ok(key) = String::<MAX_TOPIC_LEN>::try_from(filter) else {
            return false;
        };
        self.granted.remove(&key).is_some()
    }

    /// Granted QoS for `filter`.
    pub fn get(&self, filter: &str) -> Option<QoS> {
        let key = String::<MAX_TOPIC_LEN>::try_from(filter).ok()?;
        self.granted.get(&key).copied()
    }

    /// All granted filters.
    pub fn iter(&self) -> impl Iterator<Item = (&str, QoS)> {
        self.granted.iter().map(|(filter, qos)| (filter.as_str(), *qos))
    }

    /// Number of granted filters.
    pub fn len(&self) -> usize {
        self.granted.len()
    }

    /// Whether no filter is granted.
    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }

    /// Drop every subscription.
    pub fn clear(&mut self) {
        self.granted.clear();
    }
}
