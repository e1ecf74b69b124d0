//! Table schema: ordered, typed, moded field descriptors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// FIELD TYPES
// ============================================================================

/// Column type names as reported by the service's legacy type system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegacySqlTypeName {
    Bytes,
    String,
    Integer,
    Float,
    Numeric,
    BigNumeric,
    Boolean,
    Timestamp,
    Date,
    Time,
    Datetime,
    Geography,
    /// Nested record; the only type that carries sub-fields
    Record,
    Json,
    Interval,
    Range,
}

impl LegacySqlTypeName {
    /// Convert to the wire tag.
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            LegacySqlTypeName::Bytes => "BYTES",
            LegacySqlTypeName::String => "STRING",
            LegacySqlTypeName::Integer => "INTEGER",
            LegacySqlTypeName::Float => "FLOAT",
            LegacySqlTypeName::Numeric => "NUMERIC",
            LegacySqlTypeName::BigNumeric => "BIGNUMERIC",
            LegacySqlTypeName::Boolean => "BOOLEAN",
            LegacySqlTypeName::Timestamp => "TIMESTAMP",
            LegacySqlTypeName::Date => "DATE",
            LegacySqlTypeName::Time => "TIME",
            LegacySqlTypeName::Datetime => "DATETIME",
            LegacySqlTypeName::Geography => "GEOGRAPHY",
            LegacySqlTypeName::Record => "RECORD",
            LegacySqlTypeName::Json => "JSON",
            LegacySqlTypeName::Interval => "INTERVAL",
            LegacySqlTypeName::Range => "RANGE",
        }
    }

    /// Parse from a legacy wire tag. Only the legacy spellings are accepted.
    pub fn from_wire_str(s: &str) -> Result<Self, FieldTypeParseError> {
        match s {
            "BYTES" => Ok(LegacySqlTypeName::Bytes),
            "STRING" => Ok(LegacySqlTypeName::String),
            "INTEGER" => Ok(LegacySqlTypeName::Integer),
            "FLOAT" => Ok(LegacySqlTypeName::Float),
            "NUMERIC" => Ok(LegacySqlTypeName::Numeric),
            "BIGNUMERIC" => Ok(LegacySqlTypeName::BigNumeric),
            "BOOLEAN" => Ok(LegacySqlTypeName::Boolean),
            "TIMESTAMP" => Ok(LegacySqlTypeName::Timestamp),
            "DATE" => Ok(LegacySqlTypeName::Date),
            "TIME" => Ok(LegacySqlTypeName::Time),
            "DATETIME" => Ok(LegacySqlTypeName::Datetime),
            "GEOGRAPHY" => Ok(LegacySqlTypeName::Geography),
            "RECORD" => Ok(LegacySqlTypeName::Record),
            "JSON" => Ok(LegacySqlTypeName::Json),
            "INTERVAL" => Ok(LegacySqlTypeName::Interval),
            "RANGE" => Ok(LegacySqlTypeName::Range),
            _ => Err(FieldTypeParseError(s.to_string())),
        }
    }

    /// Map a standard-SQL spelling onto its legacy name.
    pub fn from_standard_sql_alias(s: &str) -> Option<Self> {
        match s {
            "INT64" => Some(LegacySqlTypeName::Integer),
            "FLOAT64" => Some(LegacySqlTypeName::Float),
            "BOOL" => Some(LegacySqlTypeName::Boolean),
            "STRUCT" => Some(LegacySqlTypeName::Record),
            "DECIMAL" => Some(LegacySqlTypeName::Numeric),
            "BIGDECIMAL" => Some(LegacySqlTypeName::BigNumeric),
            _ => None,
        }
    }
}

impl fmt::Display for LegacySqlTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire_str())
    }
}

impl FromStr for LegacySqlTypeName {
    type Err = FieldTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire_str(s)
    }
}

/// Error when parsing an invalid field type tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTypeParseError(pub String);

impl fmt::Display for FieldTypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid field type: {}", self.0)
    }
}

impl std::error::Error for FieldTypeParseError {}

// ============================================================================
// FIELD MODE
// ============================================================================

/// Nullability / cardinality of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldMode {
    Nullable,
    Required,
    Repeated,
}

impl FieldMode {
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            FieldMode::Nullable => "NULLABLE",
            FieldMode::Required => "REQUIRED",
            FieldMode::Repeated => "REPEATED",
        }
    }

    pub fn from_wire_str(s: &str) -> Option<Self> {
        match s {
            "NULLABLE" => Some(FieldMode::Nullable),
            "REQUIRED" => Some(FieldMode::Required),
            "REPEATED" => Some(FieldMode::Repeated),
            _ => None,
        }
    }
}

impl fmt::Display for FieldMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire_str())
    }
}

// ============================================================================
// FIELD
// ============================================================================

/// A single column descriptor. RECORD fields carry ordered sub-fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    name: String,
    field_type: LegacySqlTypeName,
    mode: Option<FieldMode>,
    description: Option<String>,
    sub_fields: Vec<Field>,
}

impl Field {
    /// Shorthand for a field with no mode, description or sub-fields.
    pub fn of(name: impl Into<String>, field_type: LegacySqlTypeName) -> Self {
        Self::builder(name, field_type).build()
    }

    pub fn builder(name: impl Into<String>, field_type: LegacySqlTypeName) -> FieldBuilder {
        FieldBuilder {
            name: name.into(),
            field_type,
            mode: None,
            description: None,
            sub_fields: Vec::new(),
        }
    }

    pub fn to_builder(&self) -> FieldBuilder {
        FieldBuilder {
            name: self.name.clone(),
            field_type: self.field_type,
            mode: self.mode,
            description: self.description.clone(),
            sub_fields: self.sub_fields.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> LegacySqlTypeName {
        self.field_type
    }

    pub fn mode(&self) -> Option<FieldMode> {
        self.mode
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn sub_fields(&self) -> &[Field] {
        &self.sub_fields
    }

    /// Nesting depth of this field: 1 for a leaf, 1 + deepest child otherwise.
    pub fn depth(&self) -> usize {
        1 + self.sub_fields.iter().map(Field::depth).max().unwrap_or(0)
    }
}

/// Staging builder for [`Field`].
#[derive(Debug, Clone)]
pub struct FieldBuilder {
    name: String,
    field_type: LegacySqlTypeName,
    mode: Option<FieldMode>,
    description: Option<String>,
    sub_fields: Vec<Field>,
}

impl FieldBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn field_type(mut self, field_type: LegacySqlTypeName) -> Self {
        self.field_type = field_type;
        self
    }

    pub fn mode(mut self, mode: FieldMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn sub_fields(mut self, sub_fields: impl IntoIterator<Item = Field>) -> Self {
        self.sub_fields = sub_fields.into_iter().collect();
        self
    }

    pub fn build(self) -> Field {
        Field {
            name: self.name,
            field_type: self.field_type,
            mode: self.mode,
            description: self.description,
            sub_fields: self.sub_fields,
        }
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

/// Ordered list of top-level fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn of(fields: impl IntoIterator<Item = Field>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a top-level field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Deepest RECORD nesting across all fields (0 for an empty schema).
    pub fn max_depth(&self) -> usize {
        self.fields.iter().map(Field::depth).max().unwrap_or(0)
    }
}
