//! tabledef Test Utilities
//!
//! Shared test infrastructure for the tabledef workspace:
//! - Fixtures for a fully-populated and a schema-only table definition
//! - Proptest generators for every definition type
//! - Tracing initialisation for tests

pub use tabledef_core::{
    Clustering, Field, FieldMode, LegacySqlTypeName, MaterializedViewDefinition, PartitionRange,
    RangePartitioning, Schema, StandardTableDefinition, StreamingBuffer, TableDefinition,
    TimePartitioning, TimePartitioningType, ViewDefinition,
};

use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing_subscriber::EnvFilter;

// ============================================================================
// FIXTURES
// ============================================================================

pub const NUM_BYTES: i64 = 42;
pub const NUM_LONG_TERM_BYTES: i64 = 18;
pub const NUM_ROWS: u64 = 43;
pub const LOCATION: &str = "US";

pub fn string_field() -> Field {
    Field::builder("StringField", LegacySqlTypeName::String)
        .mode(FieldMode::Nullable)
        .description("FieldDescription1")
        .build()
}

pub fn integer_field() -> Field {
    Field::builder("IntegerField", LegacySqlTypeName::Integer)
        .mode(FieldMode::Repeated)
        .description("FieldDescription2")
        .build()
}

pub fn record_field() -> Field {
    Field::builder("RecordField", LegacySqlTypeName::Record)
        .mode(FieldMode::Required)
        .description("FieldDescription3")
        .sub_fields([string_field(), integer_field()])
        .build()
}

/// Three top-level fields, the last a RECORD nesting the first two.
pub fn table_schema() -> Schema {
    Schema::of([string_field(), integer_field(), record_field()])
}

pub fn streaming_buffer() -> StreamingBuffer {
    StreamingBuffer::new(Some(1), Some(2), Some(3))
}

pub fn time_partitioning() -> TimePartitioning {
    TimePartitioning::with_expiration(TimePartitioningType::Day, 42)
}

pub fn clustering() -> Clustering {
    Clustering::new(["Foo", "Bar"])
}

/// Standard definition with every commonly-set member present.
pub fn full_table_definition() -> StandardTableDefinition {
    StandardTableDefinition::builder()
        .location(LOCATION)
        .num_bytes(NUM_BYTES)
        .num_rows(NUM_ROWS)
        .num_long_term_bytes(NUM_LONG_TERM_BYTES)
        .streaming_buffer(streaming_buffer())
        .schema(table_schema())
        .time_partitioning(time_partitioning())
        .clustering(clustering())
        .build()
}

/// Hash a value with the std hasher, for equality/hash consistency checks.
pub fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Install a test-writer subscriber filtered by `RUST_LOG`. Safe to call
/// from every test; only the first call installs.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// GENERATORS
// ============================================================================

/// Strategy for column names.
pub fn field_name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,15}"
}

/// Strategy for non-RECORD column types.
pub fn leaf_type_strategy() -> impl Strategy<Value = LegacySqlTypeName> {
    prop_oneof![
        Just(LegacySqlTypeName::Bytes),
        Just(LegacySqlTypeName::String),
        Just(LegacySqlTypeName::Integer),
        Just(LegacySqlTypeName::Float),
        Just(LegacySqlTypeName::Numeric),
        Just(LegacySqlTypeName::BigNumeric),
        Just(LegacySqlTypeName::Boolean),
        Just(LegacySqlTypeName::Timestamp),
        Just(LegacySqlTypeName::Date),
        Just(LegacySqlTypeName::Time),
        Just(LegacySqlTypeName::Datetime),
        Just(LegacySqlTypeName::Geography),
        Just(LegacySqlTypeName::Json),
        Just(LegacySqlTypeName::Interval),
        Just(LegacySqlTypeName::Range),
    ]
}

pub fn field_mode_strategy() -> impl Strategy<Value = Option<FieldMode>> {
    proptest::option::of(prop_oneof![
        Just(FieldMode::Nullable),
        Just(FieldMode::Required),
        Just(FieldMode::Repeated),
    ])
}

fn leaf_field_strategy() -> impl Strategy<Value = Field> {
    (
        field_name_strategy(),
        leaf_type_strategy(),
        field_mode_strategy(),
        proptest::option::of("[ -~]{0,32}"),
    )
        .prop_map(|(name, field_type, mode, description)| {
            let mut builder = Field::builder(name, field_type);
            if let Some(mode) = mode {
                builder = builder.mode(mode);
            }
            if let Some(description) = description {
                builder = builder.description(description);
            }
            builder.build()
        })
}

/// Strategy for fields, including RECORDs nested up to four levels.
pub fn field_strategy() -> impl Strategy<Value = Field> {
    leaf_field_strategy().prop_recursive(3, 24, 4, |inner| {
        (
            field_name_strategy(),
            field_mode_strategy(),
            prop::collection::vec(inner, 1..4),
        )
            .prop_map(|(name, mode, sub_fields)| {
                let mut builder =
                    Field::builder(name, LegacySqlTypeName::Record).sub_fields(sub_fields);
                if let Some(mode) = mode {
                    builder = builder.mode(mode);
                }
                builder.build()
            })
    })
}

pub fn schema_strategy() -> impl Strategy<Value = Schema> {
    prop::collection::vec(field_strategy(), 0..6).prop_map(Schema::of)
}

pub fn streaming_buffer_strategy() -> impl Strategy<Value = StreamingBuffer> {
    (
        proptest::option::of(any::<u64>()),
        proptest::option::of(any::<u64>()),
        proptest::option::of(any::<i64>()),
    )
        .prop_map(|(rows, bytes, oldest)| StreamingBuffer::new(rows, bytes, oldest))
}

pub fn time_partitioning_strategy() -> impl Strategy<Value = TimePartitioning> {
    (
        prop_oneof![
            Just(TimePartitioningType::Day),
            Just(TimePartitioningType::Hour),
            Just(TimePartitioningType::Month),
            Just(TimePartitioningType::Year),
        ],
        proptest::option::of(any::<i64>()),
        proptest::option::of(field_name_strategy()),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(|(kind, expiration, field, require_filter)| {
            let mut partitioning = match expiration {
                Some(ms) => TimePartitioning::with_expiration(kind, ms),
                None => TimePartitioning::of(kind),
            };
            if let Some(field) = field {
                partitioning = partitioning.on_field(field);
            }
            if let Some(required) = require_filter {
                partitioning = partitioning.requiring_partition_filter(required);
            }
            partitioning
        })
}

pub fn range_partitioning_strategy() -> impl Strategy<Value = RangePartitioning> {
    (field_name_strategy(), any::<i64>(), any::<i64>(), 1..=i64::MAX).prop_map(
        |(field, start, end, interval)| {
            RangePartitioning::new(field, PartitionRange::new(start, end, interval))
        },
    )
}

pub fn clustering_strategy() -> impl Strategy<Value = Clustering> {
    prop::collection::vec(field_name_strategy(), 0..5).prop_map(Clustering::new)
}

/// Strategy for standard definitions with every member independently present
/// or absent.
pub fn standard_definition_strategy() -> impl Strategy<Value = StandardTableDefinition> {
    (
        proptest::option::of(schema_strategy()),
        proptest::option::of("[A-Za-z0-9\\-]{1,20}"),
        proptest::option::of(any::<i64>()),
        proptest::option::of(any::<i64>()),
        proptest::option::of(any::<u64>()),
        proptest::option::of(streaming_buffer_strategy()),
        proptest::option::of(time_partitioning_strategy()),
        proptest::option::of(range_partitioning_strategy()),
        proptest::option::of(clustering_strategy()),
    )
        .prop_map(
            |(schema, location, bytes, long_term, rows, buffer, time, range, clustering)| {
                let mut builder = StandardTableDefinition::builder();
                if let Some(schema) = schema {
                    builder = builder.schema(schema);
                }
                if let Some(location) = location {
                    builder = builder.location(location);
                }
                if let Some(bytes) = bytes {
                    builder = builder.num_bytes(bytes);
                }
                if let Some(long_term) = long_term {
                    builder = builder.num_long_term_bytes(long_term);
                }
                if let Some(rows) = rows {
                    builder = builder.num_rows(rows);
                }
                if let Some(buffer) = buffer {
                    builder = builder.streaming_buffer(buffer);
                }
                if let Some(time) = time {
                    builder = builder.time_partitioning(time);
                }
                if let Some(range) = range {
                    builder = builder.range_partitioning(range);
                }
                if let Some(clustering) = clustering {
                    builder = builder.clustering(clustering);
                }
                builder.build()
            },
        )
}

/// Strategy over every decodable definition kind.
pub fn table_definition_strategy() -> impl Strategy<Value = TableDefinition> {
    prop_oneof![
        4 => standard_definition_strategy().prop_map(TableDefinition::Standard),
        1 => ("SELECT [a-z]{1,10}", proptest::option::of(any::<bool>())).prop_map(
            |(query, legacy)| {
                let view = ViewDefinition::of(query);
                TableDefinition::View(match legacy {
                    Some(legacy) => view.with_legacy_sql(legacy),
                    None => view,
                })
            }
        ),
        1 => (
            "SELECT [a-z]{1,10}",
            proptest::option::of(any::<bool>()),
            proptest::option::of(any::<i64>()),
        )
            .prop_map(|(query, refresh, interval)| {
                let mut view = MaterializedViewDefinition::of(query);
                if let Some(refresh) = refresh {
                    view = view.with_enable_refresh(refresh);
                }
                if let Some(interval) = interval {
                    view = view.with_refresh_interval_ms(interval);
                }
                TableDefinition::MaterializedView(view)
            }),
    ]
}
