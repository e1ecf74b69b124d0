//! Standard table definition: builder, equality and wire conversion
//!
//! Covers the value contract (builder, `to_builder`, structural equality and
//! hashing) and the decode failures a malformed service response can cause.

use tabledef_core::{
    CodecError, StandardTableDefinition, StreamingBuffer, TableDefinition, TableId, TableType,
};
use tabledef_test_utils::{
    clustering, full_table_definition, hash_of, init_test_tracing, streaming_buffer,
    table_schema, time_partitioning, LOCATION, NUM_BYTES, NUM_LONG_TERM_BYTES, NUM_ROWS,
};
use tabledef_wire::model::{self, Streamingbuffer, Table, TableReference};
use tabledef_wire::{from_wire, FromWire, ToWire};

// ============================================================================
// HELPERS
// ============================================================================

fn compare_standard_table_definition(
    expected: &StandardTableDefinition,
    value: &StandardTableDefinition,
) {
    assert_eq!(expected, value);
    assert_eq!(expected.schema(), value.schema());
    assert_eq!(expected.table_type(), value.table_type());
    assert_eq!(expected.num_bytes(), value.num_bytes());
    assert_eq!(expected.num_long_term_bytes(), value.num_long_term_bytes());
    assert_eq!(expected.num_rows(), value.num_rows());
    assert_eq!(expected.location(), value.location());
    assert_eq!(expected.streaming_buffer(), value.streaming_buffer());
    assert_eq!(expected.time_partitioning(), value.time_partitioning());
    assert_eq!(expected.range_partitioning(), value.range_partitioning());
    assert_eq!(expected.clustering(), value.clustering());
    assert_eq!(hash_of(expected), hash_of(value));
}

fn decode_standard(table: &Table) -> StandardTableDefinition {
    match from_wire(table) {
        Ok(TableDefinition::Standard(def)) => def,
        other => panic!("expected a standard definition, got {:?}", other),
    }
}

// ============================================================================
// BUILDER
// ============================================================================

#[test]
fn test_to_builder() {
    let definition = full_table_definition();
    compare_standard_table_definition(&definition, &definition.to_builder().build());

    let moved = definition.to_builder().location("EU").build();
    assert_eq!(moved.location(), Some("EU"));

    let reverted = moved.to_builder().location(LOCATION).build();
    compare_standard_table_definition(&definition, &reverted);
}

#[test]
fn test_to_builder_incomplete() {
    let definition = StandardTableDefinition::of(table_schema());
    assert_eq!(definition, definition.to_builder().build());
}

#[test]
fn test_builder() {
    let definition = full_table_definition();
    assert_eq!(definition.table_type(), TableType::Table);
    assert_eq!(definition.schema(), Some(&table_schema()));
    assert_eq!(definition.location(), Some(LOCATION));
    assert_eq!(definition.num_bytes(), Some(NUM_BYTES));
    assert_eq!(definition.num_long_term_bytes(), Some(NUM_LONG_TERM_BYTES));
    assert_eq!(definition.num_rows(), Some(NUM_ROWS));
    assert_eq!(definition.streaming_buffer(), Some(&streaming_buffer()));
    assert_eq!(definition.time_partitioning(), Some(&time_partitioning()));
    assert_eq!(definition.clustering(), Some(&clustering()));
}

#[test]
fn test_of() {
    let definition = StandardTableDefinition::of(table_schema());
    assert_eq!(definition.table_type(), TableType::Table);
    assert_eq!(definition.schema(), Some(&table_schema()));
    assert_eq!(definition.location(), None);
    assert_eq!(definition.num_bytes(), None);
    assert_eq!(definition.num_long_term_bytes(), None);
    assert_eq!(definition.num_rows(), None);
    assert_eq!(definition.streaming_buffer(), None);
    assert_eq!(definition.time_partitioning(), None);
    assert_eq!(definition.clustering(), None);
}

// ============================================================================
// WIRE CONVERSION
// ============================================================================

#[test]
fn test_to_and_from_wire() {
    init_test_tracing();

    let definition = full_table_definition();
    let decoded = decode_standard(&definition.to_wire());
    compare_standard_table_definition(&definition, &decoded);

    let minimal = StandardTableDefinition::of(table_schema());
    let decoded = decode_standard(&minimal.to_wire());
    compare_standard_table_definition(&minimal, &decoded);
}

#[test]
fn test_to_wire_populates_only_present_members() {
    let table = StandardTableDefinition::of(table_schema()).to_wire();
    assert_eq!(table.table_type.as_deref(), Some("TABLE"));
    assert!(table.schema.is_some());
    assert_eq!(table.location, None);
    assert_eq!(table.num_bytes, None);
    assert_eq!(table.num_long_term_bytes, None);
    assert_eq!(table.num_rows, None);
    assert_eq!(table.streaming_buffer, None);
    assert_eq!(table.time_partitioning, None);
    assert_eq!(table.range_partitioning, None);
    assert_eq!(table.clustering, None);
    assert_eq!(table.table_reference, None);
}

#[test]
fn test_from_wire_with_unexpected_time_partitioning_type_raises_invalid_argument() {
    init_test_tracing();

    let invalid_table = Table {
        table_type: Some("TABLE".to_string()),
        table_reference: Some(TableReference::new(
            "ILLEGAL_ARG_TEST_PROJECT",
            "ILLEGAL_ARG_TEST_DATASET",
            "ILLEGAL_ARG_TEST_TABLE",
        )),
        time_partitioning: Some(model::TimePartitioning {
            partitioning_type: Some("GHURRY".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    };

    let err = StandardTableDefinition::from_wire(&invalid_table)
        .expect_err("unknown partitioning type must be rejected");
    assert!(matches!(err, CodecError::InvalidArgument { .. }));
    assert_eq!(
        err.table(),
        &TableId::new(
            "ILLEGAL_ARG_TEST_PROJECT",
            "ILLEGAL_ARG_TEST_DATASET",
            "ILLEGAL_ARG_TEST_TABLE"
        )
    );

    let msg = err.to_string();
    assert!(msg.contains("Illegal Argument - Got unexpected time partitioning"));
    assert!(msg.contains("GHURRY"));
    assert!(msg.contains("ILLEGAL_ARG_TEST_PROJECT"));
    assert!(msg.contains("ILLEGAL_ARG_TEST_DATASET"));
    assert!(msg.contains("ILLEGAL_ARG_TEST_TABLE"));
}

#[test]
fn test_from_wire_with_null_estimated_rows_and_bytes() {
    let mut table = full_table_definition().to_wire();
    table.streaming_buffer = Some(Streamingbuffer::default());

    let decoded = StandardTableDefinition::from_wire(&table).expect("empty buffer decodes");
    assert_eq!(
        decoded.streaming_buffer(),
        Some(&StreamingBuffer::new(None, None, None))
    );
}

#[test]
fn test_streaming_buffer_with_null_fields_to_wire() {
    let wire = StreamingBuffer::new(None, None, None).to_wire();
    assert_eq!(wire, Streamingbuffer::default());
}

#[test]
fn test_streaming_buffer_partial_fields_survive() {
    let buffer = StreamingBuffer::new(Some(5), None, Some(1_700_000_000_000));
    let definition = full_table_definition()
        .to_builder()
        .streaming_buffer(buffer)
        .build();
    let decoded = decode_standard(&definition.to_wire());
    assert_eq!(decoded.streaming_buffer(), Some(&buffer));
}

#[test]
fn test_from_json_response() {
    let json = r#"{
        "kind": "bigquery#table",
        "id": "p:d.t",
        "type": "TABLE",
        "tableReference": {"projectId": "p", "datasetId": "d", "tableId": "t"},
        "schema": {"fields": [
            {"name": "StringField", "type": "STRING", "mode": "NULLABLE", "description": "FieldDescription1"},
            {"name": "IntegerField", "type": "INTEGER", "mode": "REPEATED", "description": "FieldDescription2"},
            {"name": "RecordField", "type": "RECORD", "mode": "REQUIRED", "description": "FieldDescription3",
             "fields": [
                {"name": "StringField", "type": "STRING", "mode": "NULLABLE", "description": "FieldDescription1"},
                {"name": "IntegerField", "type": "INTEGER", "mode": "REPEATED", "description": "FieldDescription2"}
             ]}
        ]},
        "location": "US",
        "numBytes": "42",
        "numLongTermBytes": "18",
        "numRows": "43",
        "streamingBuffer": {"estimatedRows": "1", "estimatedBytes": "2", "oldestEntryTime": "3"},
        "timePartitioning": {"type": "DAY", "expirationMs": "42"},
        "clustering": {"fields": ["Foo", "Bar"]}
    }"#;

    let table = Table::from_json(json).expect("valid json");
    let decoded = StandardTableDefinition::from_wire(&table).expect("valid table");
    compare_standard_table_definition(&full_table_definition(), &decoded);
}
