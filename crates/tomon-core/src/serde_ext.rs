//! Serde helpers for the platform's loosely-typed JSON
//!
//! The platform freely sends `null` for empty arrays and strings, `""` for
//! absent ids, and timestamps in more than one shape. These helpers are used
//! through `#[serde(deserialize_with = "...")]` so an unusual field never
//! drops the whole payload.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

use crate::value_objects::Snowflake;

/// Decode `null` as `T::default()`.
///
/// Pair with `#[serde(default)]` so a missing field behaves the same way.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode an optional id where `null` and `""` both mean "no id".
pub fn optional_snowflake<'de, D>(deserializer: D) -> Result<Option<Snowflake>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OptionalSnowflakeVisitor;

    impl<'de> Visitor<'de> for OptionalSnowflakeVisitor {
        type Value = Option<Snowflake>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a snowflake id, an empty string, or null")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2>(self, deserializer: D2) -> Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(Some(Snowflake::new(value)))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            i64::try_from(value)
                .map(|v| Some(Snowflake::new(v)))
                .map_err(|_| E::custom("snowflake out of range"))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            if value.trim().is_empty() {
                return Ok(None);
            }
            Snowflake::parse(value).map(Some).map_err(E::custom)
        }
    }

    deserializer.deserialize_any(OptionalSnowflakeVisitor)
}

/// Decode an RFC 3339 timestamp, yielding `None` for `null` or anything unparseable.
pub fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    })
}
