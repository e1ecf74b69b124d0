//! Table definitions: the immutable values decoded from table resources

use crate::{Clustering, RangePartitioning, Schema, StreamingBuffer, TableType, TimePartitioning};
use serde::{Deserialize, Serialize};

// ============================================================================
// STANDARD TABLE DEFINITION
// ============================================================================

/// Definition of a native table with managed storage.
///
/// Constructed through [`StandardTableDefinition::builder`] or
/// [`StandardTableDefinition::of`]; immutable afterwards. Use
/// [`to_builder`](StandardTableDefinition::to_builder) to derive a modified copy.
///
/// Equality and hashing cover every field. An absent value never equals a
/// present one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StandardTableDefinition {
    schema: Option<Schema>,
    location: Option<String>,
    num_bytes: Option<i64>,
    num_long_term_bytes: Option<i64>,
    num_rows: Option<u64>,
    streaming_buffer: Option<StreamingBuffer>,
    time_partitioning: Option<TimePartitioning>,
    range_partitioning: Option<RangePartitioning>,
    clustering: Option<Clustering>,
}

impl StandardTableDefinition {
    /// Definition with only a schema; every other field is absent.
    pub fn of(schema: Schema) -> Self {
        Self::builder().schema(schema).build()
    }

    pub fn builder() -> StandardTableDefinitionBuilder {
        StandardTableDefinitionBuilder::default()
    }

    /// Builder seeded with every field of this definition.
    pub fn to_builder(&self) -> StandardTableDefinitionBuilder {
        StandardTableDefinitionBuilder {
            schema: self.schema.clone(),
            location: self.location.clone(),
            num_bytes: self.num_bytes,
            num_long_term_bytes: self.num_long_term_bytes,
            num_rows: self.num_rows,
            streaming_buffer: self.streaming_buffer,
            time_partitioning: self.time_partitioning.clone(),
            range_partitioning: self.range_partitioning.clone(),
            clustering: self.clustering.clone(),
        }
    }

    /// Always [`TableType::Table`].
    pub fn table_type(&self) -> TableType {
        TableType::Table
    }

    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn num_bytes(&self) -> Option<i64> {
        self.num_bytes
    }

    /// Bytes in partitions untouched for 90 days, billed at the long-term rate.
    pub fn num_long_term_bytes(&self) -> Option<i64> {
        self.num_long_term_bytes
    }

    pub fn num_rows(&self) -> Option<u64> {
        self.num_rows
    }

    pub fn streaming_buffer(&self) -> Option<&StreamingBuffer> {
        self.streaming_buffer.as_ref()
    }

    pub fn time_partitioning(&self) -> Option<&TimePartitioning> {
        self.time_partitioning.as_ref()
    }

    pub fn range_partitioning(&self) -> Option<&RangePartitioning> {
        self.range_partitioning.as_ref()
    }

    pub fn clustering(&self) -> Option<&Clustering> {
        self.clustering.as_ref()
    }
}

/// Staging builder for [`StandardTableDefinition`].
///
/// Setters take values; the `clear_*` methods reset a field to absent.
#[derive(Debug, Clone, Default)]
pub struct StandardTableDefinitionBuilder {
    schema: Option<Schema>,
    location: Option<String>,
    num_bytes: Option<i64>,
    num_long_term_bytes: Option<i64>,
    num_rows: Option<u64>,
    streaming_buffer: Option<StreamingBuffer>,
    time_partitioning: Option<TimePartitioning>,
    range_partitioning: Option<RangePartitioning>,
    clustering: Option<Clustering>,
}

impl StandardTableDefinitionBuilder {
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn num_bytes(mut self, num_bytes: i64) -> Self {
        self.num_bytes = Some(num_bytes);
        self
    }

    pub fn num_long_term_bytes(mut self, num_long_term_bytes: i64) -> Self {
        self.num_long_term_bytes = Some(num_long_term_bytes);
        self
    }

    pub fn num_rows(mut self, num_rows: u64) -> Self {
        self.num_rows = Some(num_rows);
        self
    }

    pub fn streaming_buffer(mut self, streaming_buffer: StreamingBuffer) -> Self {
        self.streaming_buffer = Some(streaming_buffer);
        self
    }

    pub fn time_partitioning(mut self, time_partitioning: TimePartitioning) -> Self {
        self.time_partitioning = Some(time_partitioning);
        self
    }

    pub fn range_partitioning(mut self, range_partitioning: RangePartitioning) -> Self {
        self.range_partitioning = Some(range_partitioning);
        self
    }

    pub fn clustering(mut self, clustering: Clustering) -> Self {
        self.clustering = Some(clustering);
        self
    }

    pub fn clear_schema(mut self) -> Self {
        self.schema = None;
        self
    }

    pub fn clear_location(mut self) -> Self {
        self.location = None;
        self
    }

    pub fn clear_num_bytes(mut self) -> Self {
        self.num_bytes = None;
        self
    }

    pub fn clear_num_long_term_bytes(mut self) -> Self {
        self.num_long_term_bytes = None;
        self
    }

    pub fn clear_num_rows(mut self) -> Self {
        self.num_rows = None;
        self
    }

    pub fn clear_streaming_buffer(mut self) -> Self {
        self.streaming_buffer = None;
        self
    }

    pub fn clear_time_partitioning(mut self) -> Self {
        self.time_partitioning = None;
        self
    }

    pub fn clear_range_partitioning(mut self) -> Self {
        self.range_partitioning = None;
        self
    }

    pub fn clear_clustering(mut self) -> Self {
        self.clustering = None;
        self
    }

    pub fn build(self) -> StandardTableDefinition {
        StandardTableDefinition {
            schema: self.schema,
            location: self.location,
            num_bytes: self.num_bytes,
            num_long_term_bytes: self.num_long_term_bytes,
            num_rows: self.num_rows,
            streaming_buffer: self.streaming_buffer,
            time_partitioning: self.time_partitioning,
            range_partitioning: self.range_partitioning,
            clustering: self.clustering,
        }
    }
}

// ============================================================================
// VIEWS
// ============================================================================

/// Logical view over a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewDefinition {
    query: String,
    schema: Option<Schema>,
    use_legacy_sql: Option<bool>,
}

impl ViewDefinition {
    pub fn of(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            schema: None,
            use_legacy_sql: None,
        }
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_legacy_sql(mut self, use_legacy_sql: bool) -> Self {
        self.use_legacy_sql = Some(use_legacy_sql);
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    pub fn use_legacy_sql(&self) -> Option<bool> {
        self.use_legacy_sql
    }
}

/// View whose results are precomputed and refreshed by the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterializedViewDefinition {
    query: String,
    schema: Option<Schema>,
    enable_refresh: Option<bool>,
    refresh_interval_ms: Option<i64>,
}

impl MaterializedViewDefinition {
    pub fn of(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            schema: None,
            enable_refresh: None,
            refresh_interval_ms: None,
        }
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_enable_refresh(mut self, enable_refresh: bool) -> Self {
        self.enable_refresh = Some(enable_refresh);
        self
    }

    /// Minimum time between automatic refreshes. Independent of
    /// [`enable_refresh`](Self::enable_refresh).
    pub fn with_refresh_interval_ms(mut self, refresh_interval_ms: i64) -> Self {
        self.refresh_interval_ms = Some(refresh_interval_ms);
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    pub fn enable_refresh(&self) -> Option<bool> {
        self.enable_refresh
    }

    pub fn refresh_interval_ms(&self) -> Option<i64> {
        self.refresh_interval_ms
    }
}

// ============================================================================
// POLYMORPHIC DEFINITION
// ============================================================================

/// Any table definition the codec can decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableDefinition {
    Standard(StandardTableDefinition),
    View(ViewDefinition),
    MaterializedView(MaterializedViewDefinition),
}

impl TableDefinition {
    pub fn table_type(&self) -> TableType {
        match self {
            TableDefinition::Standard(_) => TableType::Table,
            TableDefinition::View(_) => TableType::View,
            TableDefinition::MaterializedView(_) => TableType::MaterializedView,
        }
    }

    pub fn schema(&self) -> Option<&Schema> {
        match self {
            TableDefinition::Standard(def) => def.schema(),
            TableDefinition::View(def) => def.schema(),
            TableDefinition::MaterializedView(def) => def.schema(),
        }
    }

    pub fn as_standard(&self) -> Option<&StandardTableDefinition> {
        match self {
            TableDefinition::Standard(def) => Some(def),
            _ => None,
        }
    }

    pub fn into_standard(self) -> Option<StandardTableDefinition> {
        match self {
            TableDefinition::Standard(def) => Some(def),
            _ => None,
        }
    }
}

impl From<StandardTableDefinition> for TableDefinition {
    fn from(def: StandardTableDefinition) -> Self {
        TableDefinition::Standard(def)
    }
}

impl From<ViewDefinition> for TableDefinition {
    fn from(def: ViewDefinition) -> Self {
        TableDefinition::View(def)
    }
}

impl From<MaterializedViewDefinition> for TableDefinition {
    fn from(def: MaterializedViewDefinition) -> Self {
        TableDefinition::MaterializedView(def)
    }
}
