//! Partitioning and clustering directives

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// TIME PARTITIONING
// ============================================================================

/// Granularity of time-unit partitioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimePartitioningType {
    Day,
    Hour,
    Month,
    Year,
}

impl TimePartitioningType {
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            TimePartitioningType::Day => "DAY",
            TimePartitioningType::Hour => "HOUR",
            TimePartitioningType::Month => "MONTH",
            TimePartitioningType::Year => "YEAR",
        }
    }

    /// Parse from the wire tag. Matching is exact; anything else is `None`.
    pub fn from_wire_str(s: &str) -> Option<Self> {
        match s {
            "DAY" => Some(TimePartitioningType::Day),
            "HOUR" => Some(TimePartitioningType::Hour),
            "MONTH" => Some(TimePartitioningType::Month),
            "YEAR" => Some(TimePartitioningType::Year),
            _ => None,
        }
    }
}

impl fmt::Display for TimePartitioningType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire_str())
    }
}

/// Time-unit partitioning of a table.
///
/// When `field` is absent the table is partitioned on ingestion time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimePartitioning {
    partitioning_type: TimePartitioningType,
    expiration_ms: Option<i64>,
    field: Option<String>,
    require_partition_filter: Option<bool>,
}

impl TimePartitioning {
    /// Partitioning with no expiration.
    pub fn of(partitioning_type: TimePartitioningType) -> Self {
        Self {
            partitioning_type,
            expiration_ms: None,
            field: None,
            require_partition_filter: None,
        }
    }

    /// Partitioning whose partitions expire after `expiration_ms`.
    pub fn with_expiration(partitioning_type: TimePartitioningType, expiration_ms: i64) -> Self {
        Self {
            expiration_ms: Some(expiration_ms),
            ..Self::of(partitioning_type)
        }
    }

    /// Partition on a column instead of ingestion time.
    pub fn on_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn requiring_partition_filter(mut self, required: bool) -> Self {
        self.require_partition_filter = Some(required);
        self
    }

    pub fn partitioning_type(&self) -> TimePartitioningType {
        self.partitioning_type
    }

    pub fn expiration_ms(&self) -> Option<i64> {
        self.expiration_ms
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn require_partition_filter(&self) -> Option<bool> {
        self.require_partition_filter
    }
}

// ============================================================================
// RANGE PARTITIONING
// ============================================================================

/// Integer bucket bounds: `[start, end)` split into `interval`-wide ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartitionRange {
    pub start: i64,
    pub end: i64,
    pub interval: i64,
}

impl PartitionRange {
    pub fn new(start: i64, end: i64, interval: i64) -> Self {
        Self {
            start,
            end,
            interval,
        }
    }

    /// Number of buckets the range produces, excluding the overflow partition.
    pub fn bucket_count(&self) -> i64 {
        if self.interval <= 0 || self.end <= self.start {
            return 0;
        }
        let span = self.end.saturating_sub(self.start);
        span / self.interval + i64::from(span % self.interval != 0)
    }
}

/// Integer-range partitioning on a single column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangePartitioning {
    field: String,
    range: PartitionRange,
}

impl RangePartitioning {
    pub fn new(field: impl Into<String>, range: PartitionRange) -> Self {
        Self {
            field: field.into(),
            range,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn range(&self) -> PartitionRange {
        self.range
    }
}

// ============================================================================
// CLUSTERING
// ============================================================================

/// Ordered clustering columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clustering {
    fields: Vec<String>,
}

impl Clustering {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}
