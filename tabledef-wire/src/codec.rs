//! Conversion between table definitions and table resources
//!
//! Encoding is infallible: every domain value has a wire shape and absent
//! members are simply left unset. Decoding validates every enumerated tag the
//! service sends (table type, field type and mode, partitioning granularity)
//! and fails fast with a [`CodecError`] naming the offending table.

use crate::model;
use tabledef_core::{
    Clustering, CodecConfig, CodecError, CodecResult, Field, FieldMode, LegacySqlTypeName,
    MaterializedViewDefinition, PartitionRange, RangePartitioning, Schema,
    StandardTableDefinition, StreamingBuffer, TableDefResult, TableDefinition, TableId, TableType,
    TimePartitioning, TimePartitioningType, ViewDefinition,
};
use tracing::{debug, warn};

// ============================================================================
// ENCODE
// ============================================================================

/// Conversion of a domain value into its wire shape.
pub trait ToWire {
    type Wire;

    fn to_wire(&self) -> Self::Wire;
}

/// Construction of a domain value from a table resource, using the default
/// [`CodecConfig`].
pub trait FromWire: Sized {
    fn from_wire(table: &model::Table) -> CodecResult<Self>;
}

impl ToWire for Field {
    type Wire = model::TableFieldSchema;

    fn to_wire(&self) -> model::TableFieldSchema {
        let sub_fields = self.sub_fields();
        model::TableFieldSchema {
            name: self.name().to_string(),
            field_type: self.field_type().as_wire_str().to_string(),
            mode: self.mode().map(|m| m.as_wire_str().to_string()),
            description: self.description().map(str::to_string),
            fields: if sub_fields.is_empty() {
                None
            } else {
                Some(sub_fields.iter().map(ToWire::to_wire).collect())
            },
        }
    }
}

impl ToWire for Schema {
    type Wire = model::TableSchema;

    fn to_wire(&self) -> model::TableSchema {
        model::TableSchema {
            fields: self.fields().iter().map(ToWire::to_wire).collect(),
        }
    }
}

impl ToWire for StreamingBuffer {
    type Wire = model::Streamingbuffer;

    fn to_wire(&self) -> model::Streamingbuffer {
        model::Streamingbuffer {
            estimated_rows: self.estimated_rows(),
            estimated_bytes: self.estimated_bytes(),
            oldest_entry_time: self.oldest_entry_time(),
        }
    }
}

impl ToWire for TimePartitioning {
    type Wire = model::TimePartitioning;

    fn to_wire(&self) -> model::TimePartitioning {
        model::TimePartitioning {
            partitioning_type: Some(self.partitioning_type().as_wire_str().to_string()),
            expiration_ms: self.expiration_ms(),
            field: self.field().map(str::to_string),
            require_partition_filter: self.require_partition_filter(),
        }
    }
}

impl ToWire for RangePartitioning {
    type Wire = model::RangePartitioning;

    fn to_wire(&self) -> model::RangePartitioning {
        let range = self.range();
        model::RangePartitioning {
            field: Some(self.field().to_string()),
            range: Some(model::RangePartitioningRange {
                start: Some(range.start),
                end: Some(range.end),
                interval: Some(range.interval),
            }),
        }
    }
}

impl ToWire for Clustering {
    type Wire = model::Clustering;

    fn to_wire(&self) -> model::Clustering {
        model::Clustering {
            fields: self.fields().to_vec(),
        }
    }
}

impl ToWire for StandardTableDefinition {
    type Wire = model::Table;

    fn to_wire(&self) -> model::Table {
        model::Table {
            table_type: Some(TableType::Table.as_wire_str().to_string()),
            schema: self.schema().map(ToWire::to_wire),
            location: self.location().map(str::to_string),
            num_bytes: self.num_bytes(),
            num_long_term_bytes: self.num_long_term_bytes(),
            num_rows: self.num_rows(),
            streaming_buffer: self.streaming_buffer().map(ToWire::to_wire),
            time_partitioning: self.time_partitioning().map(ToWire::to_wire),
            range_partitioning: self.range_partitioning().map(ToWire::to_wire),
            clustering: self.clustering().map(ToWire::to_wire),
            ..Default::default()
        }
    }
}

impl ToWire for ViewDefinition {
    type Wire = model::Table;

    fn to_wire(&self) -> model::Table {
        model::Table {
            table_type: Some(TableType::View.as_wire_str().to_string()),
            schema: self.schema().map(ToWire::to_wire),
            view: Some(model::ViewDefinition {
                query: Some(self.query().to_string()),
                use_legacy_sql: self.use_legacy_sql(),
            }),
            ..Default::default()
        }
    }
}

impl ToWire for MaterializedViewDefinition {
    type Wire = model::Table;

    fn to_wire(&self) -> model::Table {
        model::Table {
            table_type: Some(TableType::MaterializedView.as_wire_str().to_string()),
            schema: self.schema().map(ToWire::to_wire),
            materialized_view: Some(model::MaterializedViewDefinition {
                query: Some(self.query().to_string()),
                enable_refresh: self.enable_refresh(),
                refresh_interval_ms: self.refresh_interval_ms(),
            }),
            ..Default::default()
        }
    }
}

impl ToWire for TableDefinition {
    type Wire = model::Table;

    fn to_wire(&self) -> model::Table {
        match self {
            TableDefinition::Standard(def) => def.to_wire(),
            TableDefinition::View(def) => def.to_wire(),
            TableDefinition::MaterializedView(def) => def.to_wire(),
        }
    }
}

// ============================================================================
// DECODE
// ============================================================================

/// Identifier of the table a resource describes. Missing reference members
/// become empty strings.
pub fn table_id(table: &model::Table) -> TableId {
    match &table.table_reference {
        Some(reference) => TableId::new(
            reference.project_id.clone().unwrap_or_default(),
            reference.dataset_id.clone().unwrap_or_default(),
            reference.table_id.clone().unwrap_or_default(),
        ),
        None => TableId::default(),
    }
}

/// Decode a table resource with the default configuration.
pub fn from_wire(table: &model::Table) -> CodecResult<TableDefinition> {
    TableDefinitionCodec::default().decode(table)
}

impl FromWire for TableDefinition {
    fn from_wire(table: &model::Table) -> CodecResult<Self> {
        TableDefinitionCodec::default().decode(table)
    }
}

impl FromWire for StandardTableDefinition {
    fn from_wire(table: &model::Table) -> CodecResult<Self> {
        TableDefinitionCodec::default().decode_standard(table)
    }
}

/// Converts table definitions to and from table resources.
#[derive(Debug, Clone, Default)]
pub struct TableDefinitionCodec {
    config: CodecConfig,
}

impl TableDefinitionCodec {
    /// Create a codec, validating the configuration first.
    pub fn new(config: CodecConfig) -> TableDefResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode any definition into a table resource.
    pub fn encode(&self, definition: &TableDefinition) -> model::Table {
        debug!(table_type = %definition.table_type(), "encoding table definition");
        definition.to_wire()
    }

    /// Decode a table resource into whichever definition its type tag names.
    pub fn decode(&self, table: &model::Table) -> CodecResult<TableDefinition> {
        let id = table_id(table);
        self.decode_any(table, &id).inspect_err(|err| {
            warn!(table = %id, error = %err, "rejected table resource");
        })
    }

    /// Decode a table resource that must be a standard table.
    pub fn decode_standard(&self, table: &model::Table) -> CodecResult<StandardTableDefinition> {
        let id = table_id(table);
        let result = match resolve_type(table, &id) {
            Ok(TableType::Table) => self.decode_standard_body(table, &id),
            Ok(actual) => Err(CodecError::DefinitionMismatch {
                expected: TableType::Table,
                actual,
                table: id.clone(),
            }),
            Err(err) => Err(err),
        };
        result.inspect_err(|err| {
            warn!(table = %id, error = %err, "rejected table resource");
        })
    }

    fn decode_any(&self, table: &model::Table, id: &TableId) -> CodecResult<TableDefinition> {
        let table_type = resolve_type(table, id)?;
        debug!(table = %id, table_type = %table_type, "decoding table definition");

        match table_type {
            TableType::Table => self.decode_standard_body(table, id).map(Into::into),
            TableType::View => self.decode_view(table, id).map(Into::into),
            TableType::MaterializedView => self.decode_materialized_view(table, id).map(Into::into),
            TableType::External | TableType::Snapshot | TableType::Model => {
                Err(CodecError::UnsupportedTableType {
                    table_type,
                    table: id.clone(),
                })
            }
        }
    }

    fn decode_standard_body(
        &self,
        table: &model::Table,
        id: &TableId,
    ) -> CodecResult<StandardTableDefinition> {
        let mut builder = StandardTableDefinition::builder();

        if let Some(schema) = &table.schema {
            builder = builder.schema(self.decode_schema(schema, id)?);
        }
        if let Some(location) = &table.location {
            builder = builder.location(location.clone());
        }
        if let Some(num_bytes) = table.num_bytes {
            builder = builder.num_bytes(num_bytes);
        }
        if let Some(num_long_term_bytes) = table.num_long_term_bytes {
            builder = builder.num_long_term_bytes(num_long_term_bytes);
        }
        if let Some(num_rows) = table.num_rows {
            builder = builder.num_rows(num_rows);
        }
        if let Some(buffer) = &table.streaming_buffer {
            builder = builder.streaming_buffer(decode_streaming_buffer(buffer));
        }
        if let Some(partitioning) = &table.time_partitioning {
            builder = builder.time_partitioning(decode_time_partitioning(partitioning, id)?);
        }
        if let Some(partitioning) = &table.range_partitioning {
            builder = builder.range_partitioning(decode_range_partitioning(partitioning, id)?);
        }
        if let Some(clustering) = &table.clustering {
            builder = builder.clustering(Clustering::new(clustering.fields.iter().cloned()));
        }

        Ok(builder.build())
    }

    fn decode_view(&self, table: &model::Table, id: &TableId) -> CodecResult<ViewDefinition> {
        let view = table.view.as_ref();
        let query = view
            .and_then(|v| v.query.clone())
            .ok_or_else(|| CodecError::MissingField {
                field: "view.query",
                table: id.clone(),
            })?;

        let mut definition = ViewDefinition::of(query);
        if let Some(use_legacy_sql) = view.and_then(|v| v.use_legacy_sql) {
            definition = definition.with_legacy_sql(use_legacy_sql);
        }
        if let Some(schema) = &table.schema {
            definition = definition.with_schema(self.decode_schema(schema, id)?);
        }
        Ok(definition)
    }

    fn decode_materialized_view(
        &self,
        table: &model::Table,
        id: &TableId,
    ) -> CodecResult<MaterializedViewDefinition> {
        let view = table.materialized_view.as_ref();
        let query = view
            .and_then(|v| v.query.clone())
            .ok_or_else(|| CodecError::MissingField {
                field: "materializedView.query",
                table: id.clone(),
            })?;

        let mut definition = MaterializedViewDefinition::of(query);
        if let Some(enable_refresh) = view.and_then(|v| v.enable_refresh) {
            definition = definition.with_enable_refresh(enable_refresh);
        }
        if let Some(interval) = view.and_then(|v| v.refresh_interval_ms) {
            definition = definition.with_refresh_interval_ms(interval);
        }
        if let Some(schema) = &table.schema {
            definition = definition.with_schema(self.decode_schema(schema, id)?);
        }
        Ok(definition)
    }

    fn decode_schema(&self, schema: &model::TableSchema, id: &TableId) -> CodecResult<Schema> {
        let fields = schema
            .fields
            .iter()
            .map(|field| self.decode_field(field, 1, id))
            .collect::<CodecResult<Vec<_>>>()?;
        Ok(Schema::of(fields))
    }

    fn decode_field(
        &self,
        field: &model::TableFieldSchema,
        depth: usize,
        id: &TableId,
    ) -> CodecResult<Field> {
        let max = self.config.max_nesting_depth;
        if depth > max {
            return Err(CodecError::NestingTooDeep {
                field: field.name.clone(),
                depth,
                max,
                table: id.clone(),
            });
        }

        let mut builder = Field::builder(field.name.clone(), self.decode_field_type(field, id)?);

        if let Some(mode) = &field.mode {
            let mode = FieldMode::from_wire_str(mode).ok_or_else(|| CodecError::UnknownFieldMode {
                field: field.name.clone(),
                mode: mode.clone(),
                table: id.clone(),
            })?;
            builder = builder.mode(mode);
        }
        if let Some(description) = &field.description {
            builder = builder.description(description.clone());
        }
        if let Some(sub_fields) = &field.fields {
            let sub_fields = sub_fields
                .iter()
                .map(|sub| self.decode_field(sub, depth + 1, id))
                .collect::<CodecResult<Vec<_>>>()?;
            builder = builder.sub_fields(sub_fields);
        }

        Ok(builder.build())
    }

    fn decode_field_type(
        &self,
        field: &model::TableFieldSchema,
        id: &TableId,
    ) -> CodecResult<LegacySqlTypeName> {
        let tag = field.field_type.as_str();
        LegacySqlTypeName::from_wire_str(tag)
            .ok()
            .or_else(|| {
                if self.config.accept_type_aliases {
                    LegacySqlTypeName::from_standard_sql_alias(tag)
                } else {
                    None
                }
            })
            .ok_or_else(|| CodecError::UnknownFieldType {
                field: field.name.clone(),
                type_name: tag.to_string(),
                table: id.clone(),
            })
    }
}

fn resolve_type(table: &model::Table, id: &TableId) -> CodecResult<TableType> {
    let tag = table
        .table_type
        .as_deref()
        .ok_or_else(|| CodecError::MissingTableType { table: id.clone() })?;
    TableType::from_wire_str(tag).map_err(|_| CodecError::UnknownTableType {
        type_tag: tag.to_string(),
        table: id.clone(),
    })
}

fn decode_streaming_buffer(buffer: &model::Streamingbuffer) -> StreamingBuffer {
    StreamingBuffer::new(
        buffer.estimated_rows,
        buffer.estimated_bytes,
        buffer.oldest_entry_time,
    )
}

fn decode_time_partitioning(
    partitioning: &model::TimePartitioning,
    id: &TableId,
) -> CodecResult<TimePartitioning> {
    let partitioning_type = partitioning
        .partitioning_type
        .as_deref()
        .and_then(TimePartitioningType::from_wire_str)
        .ok_or_else(|| CodecError::InvalidArgument {
            partitioning_type: partitioning.partitioning_type.clone(),
            table: id.clone(),
        })?;

    let mut decoded = match partitioning.expiration_ms {
        Some(ms) => TimePartitioning::with_expiration(partitioning_type, ms),
        None => TimePartitioning::of(partitioning_type),
    };
    if let Some(field) = &partitioning.field {
        decoded = decoded.on_field(field.clone());
    }
    if let Some(required) = partitioning.require_partition_filter {
        decoded = decoded.requiring_partition_filter(required);
    }
    Ok(decoded)
}

fn decode_range_partitioning(
    partitioning: &model::RangePartitioning,
    id: &TableId,
) -> CodecResult<RangePartitioning> {
    let missing = |field: &'static str| CodecError::MissingField {
        field,
        table: id.clone(),
    };

    let field = partitioning
        .field
        .clone()
        .ok_or_else(|| missing("rangePartitioning.field"))?;
    let range = partitioning
        .range
        .as_ref()
        .ok_or_else(|| missing("rangePartitioning.range"))?;
    let start = range.start.ok_or_else(|| missing("rangePartitioning.range.start"))?;
    let end = range.end.ok_or_else(|| missing("rangePartitioning.range.end"))?;
    let interval = range
        .interval
        .ok_or_else(|| missing("rangePartitioning.range.interval"))?;

    Ok(RangePartitioning::new(
        field,
        PartitionRange::new(start, end, interval),
    ))
}
