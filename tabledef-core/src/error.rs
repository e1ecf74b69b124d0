//! Error types for table definition decoding and configuration

use crate::{TableId, TableType};
use thiserror::Error;

/// Failures while decoding a wire table resource into a definition.
///
/// All variants are local validation failures. They indicate skew between
/// what the service sent and what this client understands, so retrying the
/// same input cannot succeed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The time-partitioning type tag is absent or not a known granularity.
    #[error(
        "Illegal Argument - Got unexpected time partitioning {} in project {} in dataset {} in table {}",
        .partitioning_type.as_deref().unwrap_or("null"),
        .table.project,
        .table.dataset,
        .table.table
    )]
    InvalidArgument {
        partitioning_type: Option<String>,
        table: TableId,
    },

    #[error("Unknown field type {type_name} for field {field} in table {table}")]
    UnknownFieldType {
        field: String,
        type_name: String,
        table: TableId,
    },

    #[error("Unknown field mode {mode} for field {field} in table {table}")]
    UnknownFieldMode {
        field: String,
        mode: String,
        table: TableId,
    },

    #[error("Field {field} in table {table} is nested {depth} levels deep, maximum is {max}")]
    NestingTooDeep {
        field: String,
        depth: usize,
        max: usize,
        table: TableId,
    },

    #[error("Missing table type in table {table}")]
    MissingTableType { table: TableId },

    #[error("Unknown table type {type_tag} in table {table}")]
    UnknownTableType { type_tag: String, table: TableId },

    #[error("Table type {table_type} is not supported by this client (table {table})")]
    UnsupportedTableType { table_type: TableType, table: TableId },

    #[error("Expected a {expected} definition but table {table} is {actual}")]
    DefinitionMismatch {
        expected: TableType,
        actual: TableType,
        table: TableId,
    },

    #[error("Required field {field} missing in table {table}")]
    MissingField { field: &'static str, table: TableId },
}

impl CodecError {
    /// Identifier of the table the failure refers to.
    pub fn table(&self) -> &TableId {
        match self {
            CodecError::InvalidArgument { table, .. }
            | CodecError::UnknownFieldType { table, .. }
            | CodecError::UnknownFieldMode { table, .. }
            | CodecError::NestingTooDeep { table, .. }
            | CodecError::MissingTableType { table }
            | CodecError::UnknownTableType { table, .. }
            | CodecError::UnsupportedTableType { table, .. }
            | CodecError::DefinitionMismatch { table, .. }
            | CodecError::MissingField { table, .. } => table,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for tabledef operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableDefError {
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for decode operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Result type alias for tabledef operations.
pub type TableDefResult<T> = Result<T, TableDefError>;

// =============================================================================
// TESTS
// =============================================================================
