//! tabledef Wire - REST table resources and the definition codec
//!
//! [`model`] mirrors the JSON shape of a table resource. [`TableDefinitionCodec`]
//! maps it to and from the immutable values in `tabledef-core`.
//!
//! ```
//! use tabledef_core::{Field, LegacySqlTypeName, Schema, StandardTableDefinition};
//! use tabledef_wire::{FromWire, ToWire};
//!
//! let definition = StandardTableDefinition::of(Schema::of([
//!     Field::of("id", LegacySqlTypeName::Integer),
//! ]));
//! let table = definition.to_wire();
//! assert_eq!(table.table_type.as_deref(), Some("TABLE"));
//! assert_eq!(StandardTableDefinition::from_wire(&table).unwrap(), definition);
//! ```

mod codec;
mod int64;
pub mod model;

pub use codec::{from_wire, table_id, FromWire, TableDefinitionCodec, ToWire};
pub use model::Table;
