//! Streaming buffer statistics

use crate::Timestamp;
use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// Rows ingested through the streaming path that have not yet been merged
/// into managed storage.
///
/// Every statistic is independently optional; the service omits them while
/// the buffer is being flushed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StreamingBuffer {
    estimated_rows: Option<u64>,
    estimated_bytes: Option<u64>,
    oldest_entry_time: Option<i64>,
}

impl StreamingBuffer {
    /// `oldest_entry_time` is epoch milliseconds.
    pub fn new(
        estimated_rows: Option<u64>,
        estimated_bytes: Option<u64>,
        oldest_entry_time: Option<i64>,
    ) -> Self {
        Self {
            estimated_rows,
            estimated_bytes,
            oldest_entry_time,
        }
    }

    pub fn estimated_rows(&self) -> Option<u64> {
        self.estimated_rows
    }

    pub fn estimated_bytes(&self) -> Option<u64> {
        self.estimated_bytes
    }

    /// Epoch milliseconds of the oldest buffered entry.
    pub fn oldest_entry_time(&self) -> Option<i64> {
        self.oldest_entry_time
    }

    /// Oldest buffered entry as a UTC timestamp. `None` when unset or out of range.
    pub fn oldest_entry_timestamp(&self) -> Option<Timestamp> {
        self.oldest_entry_time.and_then(DateTime::from_timestamp_millis)
    }

    /// True when the service reported no statistics at all.
    pub fn is_empty(&self) -> bool {
        self.estimated_rows.is_none()
            && self.estimated_bytes.is_none()
            && self.oldest_entry_time.is_none()
    }
}
