//! tabledef Core - Table Definition Types
//!
//! Immutable value types describing a warehouse table: schema, storage
//! statistics, streaming buffer, partitioning and clustering. These are the
//! application-facing side of the wire codec in `tabledef-wire`; this crate
//! has no knowledge of the wire format.

use chrono::{DateTime, Utc};

mod config;
mod definition;
mod error;
mod identity;
mod partitioning;
mod schema;
mod streaming;

pub use config::{CodecConfig, DEFAULT_MAX_NESTING_DEPTH};
pub use definition::{
    MaterializedViewDefinition, StandardTableDefinition, StandardTableDefinitionBuilder,
    TableDefinition, ViewDefinition,
};
pub use error::{CodecError, CodecResult, ConfigError, TableDefError, TableDefResult};
pub use identity::{TableId, TableType, TableTypeParseError};
pub use partitioning::{
    Clustering, PartitionRange, RangePartitioning, TimePartitioning, TimePartitioningType,
};
pub use schema::{Field, FieldBuilder, FieldMode, FieldTypeParseError, LegacySqlTypeName, Schema};
pub use streaming::StreamingBuffer;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_values_are_thread_safe() {
        assert_send_sync::<StandardTableDefinition>();
        assert_send_sync::<TableDefinition>();
        assert_send_sync::<CodecError>();
    }

    #[test]
    fn test_definition_serde_snapshot_roundtrip() {
        let def = StandardTableDefinition::builder()
            .schema(Schema::of([Field::of("id", LegacySqlTypeName::Integer)]))
            .location("EU")
            .streaming_buffer(StreamingBuffer::new(None, Some(7), None))
            .build();
        let json = serde_json::to_string(&def).expect("serialize");
        let back: StandardTableDefinition = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(def, back);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// Property: overriding the location then restoring it yields the original.
        #[test]
        fn prop_location_override_reverts(
            original in proptest::option::of("[A-Z]{2}"),
            replacement in "[a-z\\-]{1,12}",
            rows in proptest::option::of(any::<u64>()),
        ) {
            let mut builder = StandardTableDefinition::builder();
            if let Some(loc) = &original {
                builder = builder.location(loc.clone());
            }
            if let Some(rows) = rows {
                builder = builder.num_rows(rows);
            }
            let def = builder.build();

            let moved = def.to_builder().location(replacement.clone()).build();
            prop_assert_eq!(moved.location(), Some(replacement.as_str()));

            let restored = match &original {
                Some(loc) => moved.to_builder().location(loc.clone()).build(),
                None => moved.to_builder().clear_location().build(),
            };
            prop_assert_eq!(def, restored);
        }

        /// Property: overriding every optional numeric, schema and range
        /// field then restoring the originals yields the original.
        #[test]
        fn prop_optional_fields_override_revert(
            with_schema in any::<bool>(),
            num_bytes in proptest::option::of(any::<i64>()),
            num_long_term_bytes in proptest::option::of(any::<i64>()),
            num_rows in proptest::option::of(any::<u64>()),
            range_start in proptest::option::of(-1000i64..1000),
        ) {
            let schema = Schema::of([Field::of("id", LegacySqlTypeName::Integer)]);
            let range = range_start.map(|start| {
                RangePartitioning::new("id", PartitionRange::new(start, start + 100, 10))
            });

            let mut builder = StandardTableDefinition::builder();
            if with_schema {
                builder = builder.schema(schema.clone());
            }
            if let Some(value) = num_bytes {
                builder = builder.num_bytes(value);
            }
            if let Some(value) = num_long_term_bytes {
                builder = builder.num_long_term_bytes(value);
            }
            if let Some(value) = num_rows {
                builder = builder.num_rows(value);
            }
            if let Some(range) = &range {
                builder = builder.range_partitioning(range.clone());
            }
            let def = builder.build();

            let moved = def
                .to_builder()
                .schema(Schema::of([Field::of("other", LegacySqlTypeName::String)]))
                .num_bytes(1)
                .num_long_term_bytes(2)
                .num_rows(3)
                .range_partitioning(RangePartitioning::new("x", PartitionRange::new(0, 5000, 1)))
                .build();

            let mut restore = moved.to_builder();
            restore = if with_schema {
                restore.schema(schema)
            } else {
                restore.clear_schema()
            };
            restore = match num_bytes {
                Some(value) => restore.num_bytes(value),
                None => restore.clear_num_bytes(),
            };
            restore = match num_long_term_bytes {
                Some(value) => restore.num_long_term_bytes(value),
                None => restore.clear_num_long_term_bytes(),
            };
            restore = match num_rows {
                Some(value) => restore.num_rows(value),
                None => restore.clear_num_rows(),
            };
            restore = match range {
                Some(range) => restore.range_partitioning(range),
                None => restore.clear_range_partitioning(),
            };
            prop_assert_eq!(def, restore.build());
        }
    }
}
