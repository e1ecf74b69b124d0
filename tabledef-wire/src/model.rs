//! Table resource as exchanged with the REST API

use serde::{Deserialize, Serialize};

// ============================================================================
// TABLE
// ============================================================================

/// Table resource. Only the members the definition codec reads or writes are
/// modelled; unknown keys are ignored on input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub table_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_reference: Option<TableReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<TableSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, with = "crate::int64", skip_serializing_if = "Option::is_none")]
    pub num_bytes: Option<i64>,
    #[serde(default, with = "crate::int64", skip_serializing_if = "Option::is_none")]
    pub num_long_term_bytes: Option<i64>,
    #[serde(default, with = "crate::int64", skip_serializing_if = "Option::is_none")]
    pub num_rows: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streaming_buffer: Option<Streamingbuffer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_partitioning: Option<TimePartitioning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_partitioning: Option<RangePartitioning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clustering: Option<Clustering>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<ViewDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materialized_view: Option<MaterializedViewDefinition>,
}

impl Table {
    /// Parse a table resource from response JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize to request JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
}

impl TableReference {
    pub fn new(
        project_id: impl Into<String>,
        dataset_id: impl Into<String>,
        table_id: impl Into<String>,
    ) -> Self {
        Self {
            project_id: Some(project_id.into()),
            dataset_id: Some(dataset_id.into()),
            table_id: Some(table_id.into()),
        }
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    #[serde(default)]
    pub fields: Vec<TableFieldSchema>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableFieldSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<TableFieldSchema>>,
}

// ============================================================================
// STATISTICS AND LAYOUT
// ============================================================================

/// Streaming buffer statistics. The casing of the type name follows the REST
/// discovery document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streamingbuffer {
    #[serde(default, with = "crate::int64", skip_serializing_if = "Option::is_none")]
    pub estimated_rows: Option<u64>,
    #[serde(default, with = "crate::int64", skip_serializing_if = "Option::is_none")]
    pub estimated_bytes: Option<u64>,
    #[serde(default, with = "crate::int64", skip_serializing_if = "Option::is_none")]
    pub oldest_entry_time: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimePartitioning {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub partitioning_type: Option<String>,
    #[serde(default, with = "crate::int64", skip_serializing_if = "Option::is_none")]
    pub expiration_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_partition_filter: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangePartitioning {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<RangePartitioningRange>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangePartitioningRange {
    #[serde(default, with = "crate::int64", skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    #[serde(default, with = "crate::int64", skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    #[serde(default, with = "crate::int64", skip_serializing_if = "Option::is_none")]
    pub interval: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clustering {
    #[serde(default)]
    pub fields: Vec<String>,
}

// ============================================================================
// VIEWS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_legacy_sql: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterializedViewDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_refresh: Option<bool>,
    #[serde(default, with = "crate::int64", skip_serializing_if = "Option::is_none")]
    pub refresh_interval_ms: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response_json() {
        let json = r#"{
            "kind": "bigquery#table",
            "type": "TABLE",
            "tableReference": {"projectId": "p", "datasetId": "d", "tableId": "t"},
            "schema": {"fields": [
                {"name": "id", "type": "INTEGER", "mode": "REQUIRED"},
                {"name": "rec", "type": "RECORD", "fields": [{"name": "x", "type": "STRING"}]}
            ]},
            "numBytes": "42",
            "numRows": "43",
            "streamingBuffer": {"estimatedRows": "1", "oldestEntryTime": "3"},
            "timePartitioning": {"type": "DAY", "expirationMs": "42"},
            "clustering": {"fields": ["Foo", "Bar"]}
        }"#;
        let table = Table::from_json(json).expect("valid table json");
        assert_eq!(table.table_type.as_deref(), Some("TABLE"));
        assert_eq!(
            table.table_reference,
            Some(TableReference::new("p", "d", "t"))
        );
        assert_eq!(table.num_bytes, Some(42));
        assert_eq!(table.num_rows, Some(43));
        let buffer = table.streaming_buffer.expect("buffer present");
        assert_eq!(buffer.estimated_rows, Some(1));
        assert_eq!(buffer.estimated_bytes, None);
        assert_eq!(buffer.oldest_entry_time, Some(3));
        let schema = table.schema.expect("schema present");
        assert_eq!(schema.fields.len(), 2);
        assert_eq!(schema.fields[1].fields.as_ref().map(Vec::len), Some(1));
        assert_eq!(
            table.time_partitioning.and_then(|p| p.partitioning_type),
            Some("DAY".to_string())
        );
    }

    #[test]
    fn test_empty_members_are_omitted() {
        let table = Table {
            table_type: Some("TABLE".to_string()),
            streaming_buffer: Some(Streamingbuffer::default()),
            ..Default::default()
        };
        assert_eq!(
            table.to_json().expect("serialize"),
            r#"{"type":"TABLE","streamingBuffer":{}}"#
        );
    }

    #[test]
    fn test_int64_members_written_as_strings() {
        let table = Table {
            num_long_term_bytes: Some(18),
            time_partitioning: Some(TimePartitioning {
                partitioning_type: Some("HOUR".to_string()),
                expiration_ms: Some(1000),
                ..Default::default()
            }),
            ..Default::default()
        };
        let json = table.to_json().expect("serialize");
        assert!(json.contains(r#""numLongTermBytes":"18""#));
        assert!(json.contains(r#""expirationMs":"1000""#));
        assert_eq!(Table::from_json(&json).expect("parse"), table);
    }
}
