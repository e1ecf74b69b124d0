//! Identity types for warehouse tables

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// TABLE ID
// ============================================================================

/// Fully-qualified table identifier.
///
/// Rendered as `project:dataset.table`. Components may be empty when the
/// wire resource carried no reference; the identifier is still usable in
/// error messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableId {
    pub project: String,
    pub dataset: String,
    pub table: String,
}

impl TableId {
    pub fn new(
        project: impl Into<String>,
        dataset: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            dataset: dataset.into(),
            table: table.into(),
        }
    }

    /// True when no component is known.
    pub fn is_unknown(&self) -> bool {
        self.project.is_empty() && self.dataset.is_empty() && self.table.is_empty()
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}.{}", self.project, self.dataset, self.table)
    }
}

// ============================================================================
// TABLE TYPE
// ============================================================================

/// Kind of table resource, as carried in the wire `type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableType {
    /// Native table with managed storage
    Table,
    /// Logical view defined by a query
    View,
    /// Precomputed view refreshed by the service
    MaterializedView,
    /// Table backed by external storage
    External,
    /// Point-in-time table snapshot
    Snapshot,
    /// Trained model exposed as a table
    Model,
}

impl TableType {
    /// Convert to the wire tag.
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            TableType::Table => "TABLE",
            TableType::View => "VIEW",
            TableType::MaterializedView => "MATERIALIZED_VIEW",
            TableType::External => "EXTERNAL",
            TableType::Snapshot => "SNAPSHOT",
            TableType::Model => "MODEL",
        }
    }

    /// Parse from the wire tag. Tags are matched exactly.
    pub fn from_wire_str(s: &str) -> Result<Self, TableTypeParseError> {
        match s {
            "TABLE" => Ok(TableType::Table),
            "VIEW" => Ok(TableType::View),
            "MATERIALIZED_VIEW" => Ok(TableType::MaterializedView),
            "EXTERNAL" => Ok(TableType::External),
            "SNAPSHOT" => Ok(TableType::Snapshot),
            "MODEL" => Ok(TableType::Model),
            _ => Err(TableTypeParseError(s.to_string())),
        }
    }
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire_str())
    }
}

impl FromStr for TableType {
    type Err = TableTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire_str(s)
    }
}

/// Error when parsing an invalid table type tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableTypeParseError(pub String);

impl fmt::Display for TableTypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid table type: {}", self.0)
    }
}

impl std::error::Error for TableTypeParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_id_display() {
        let id = TableId::new("proj", "ds", "tbl");
        assert_eq!(id.to_string(), "proj:ds.tbl");
        assert!(!id.is_unknown());
        assert!(TableId::default().is_unknown());
    }

    #[test]
    fn test_table_type_wire_tags() {
        for ty in [
            TableType::Table,
            TableType::View,
            TableType::MaterializedView,
            TableType::External,
            TableType::Snapshot,
            TableType::Model,
        ] {
            assert_eq!(TableType::from_wire_str(ty.as_wire_str()), Ok(ty));
        }
    }

    #[test]
    fn test_table_type_rejects_lowercase() {
        let err = "table".parse::<TableType>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid table type: table");
    }
}
