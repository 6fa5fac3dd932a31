//! Snowflake ID - 64-bit identifier used for every Tomon entity
//!
//! The platform sends ids as decimal strings, occasionally as bare numbers.
//! Both forms are accepted on input; output is always a string so the value
//! survives JavaScript number precision on the other side.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Platform-wide 64-bit entity identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    /// Create a new Snowflake from a raw i64 value
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Check if the Snowflake is zero (the platform's "no id")
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        s.trim()
            .parse::<i64>()
            .map(Snowflake)
            .map_err(|_| SnowflakeParseError::InvalidFormat(s.to_string()))
    }
}

/// Error when parsing a Snowflake from string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("invalid snowflake format: {0:?}")]
    InvalidFormat(String),
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Snowflake {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl std::str::FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Snowflake::parse(s)
    }
}

// Serialize as string for JSON (JavaScript BigInt safety)
impl Serialize for Snowflake {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

// Deserialize from string or number
impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(SnowflakeVisitor)
    }
}

pub(crate) struct SnowflakeVisitor;

impl<'de> serde::de::Visitor<'de> for SnowflakeVisitor {
    type Value = Snowflake;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string or integer representing a snowflake ID")
    }

    fn visit_i64<E>(self, value: i64) -> Result<Snowflake, E>
    where
        E: serde::de::Error,
    {
        Ok(Snowflake(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Snowflake, E>
    where
        E: serde::de::Error,
    {
        i64::try_from(value)
            .map(Snowflake)
            .map_err(|_| E::custom("snowflake out of range"))
    }

    fn visit_str<E>(self, value: &str) -> Result<Snowflake, E>
    where
        E: serde::de::Error,
    {
        Snowflake::parse(value).map_err(E::custom)
    }
}
