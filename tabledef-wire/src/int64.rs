//! 64-bit integers on the wire.
//!
//! The REST surface writes int64/uint64 values as decimal strings. Responses
//! are accepted as either strings or JSON numbers; an empty string reads as
//! absent.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    match value {
        Some(v) => serializer.collect_str(v),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: FromStr,
    T::Err: Display,
    D: Deserializer<'de>,
{
    let text = match Option::<Repr>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Repr::Text(s)) if s.trim().is_empty() => return Ok(None),
        Some(Repr::Text(s)) => s,
        Some(Repr::Signed(n)) => n.to_string(),
        Some(Repr::Unsigned(n)) => n.to_string(),
    };
    text.trim()
        .parse()
        .map(Some)
        .map_err(|e| D::Error::custom(format!("invalid 64-bit integer {:?}: {}", text, e)))
}
