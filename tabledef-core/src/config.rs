//! Codec configuration
//!
//! Loaded from environment variables with defaults that match the service's
//! documented limits.

use crate::{ConfigError, TableDefResult};

/// Deepest RECORD nesting the service accepts.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 15;

/// Upper bound accepted for `max_nesting_depth`.
const MAX_NESTING_DEPTH_LIMIT: usize = 64;

/// Decode-time settings for the table definition codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Reject schemas whose RECORD fields nest deeper than this.
    pub max_nesting_depth: usize,

    /// Accept standard-SQL type spellings (INT64, BOOL, STRUCT, ...) and map
    /// them to their legacy names.
    pub accept_type_aliases: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            accept_type_aliases: true,
        }
    }
}

impl CodecConfig {
    /// Create CodecConfig from environment variables.
    ///
    /// Environment variables:
    /// - `TABLEDEF_MAX_NESTING_DEPTH`: Maximum RECORD depth (default: 15)
    /// - `TABLEDEF_ACCEPT_TYPE_ALIASES`: true/false, 1/0, yes/no or on/off,
    ///   case-insensitive (default: true)
    ///
    /// Unparseable values fall back to the default; call
    /// [`validate`](Self::validate) before use.
    pub fn from_env() -> Self {
        let max_nesting_depth = std::env::var("TABLEDEF_MAX_NESTING_DEPTH")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_MAX_NESTING_DEPTH);

        let accept_type_aliases = std::env::var("TABLEDEF_ACCEPT_TYPE_ALIASES")
            .ok()
            .and_then(|s| parse_flag(&s))
            .unwrap_or(true);

        Self {
            max_nesting_depth,
            accept_type_aliases,
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> TableDefResult<()> {
        if self.max_nesting_depth == 0 || self.max_nesting_depth > MAX_NESTING_DEPTH_LIMIT {
            return Err(ConfigError::InvalidValue {
                field: "max_nesting_depth".to_string(),
                value: self.max_nesting_depth.to_string(),
                reason: format!("must be between 1 and {}", MAX_NESTING_DEPTH_LIMIT),
            }
            .into());
        }

        Ok(())
    }

    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    pub fn with_type_aliases(mut self, accept: bool) -> Self {
        self.accept_type_aliases = accept;
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
