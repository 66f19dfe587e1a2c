//! Serde adapters storing Discord snowflakes as JSON strings.
//!
//! Snowflakes exceed the integer precision of JavaScript clients, so collections and
//! DTOs keep them as strings. Deserialization also accepts plain numbers.

use serde::{de, Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw {
    Text(String),
    Number(u64),
}

impl Raw {
    /// Discord never issues a zero snowflake.
    fn into_id<E: de::Error>(self) -> Result<u64, E> {
        let id = match self {
            Raw::Number(id) => id,
            Raw::Text(text) => text.trim().parse().map_err(E::custom)?,
        };

        if id == 0 {
            return Err(E::custom("snowflake must not be zero"));
        }
        Ok(id)
    }
}

pub fn serialize<S: Serializer>(id: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(id)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Raw::deserialize(deserializer)?.into_id()
}

/// `Option<u64>` variant; pair with `#[serde(default)]`.
pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(id: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
        match id {
            Some(id) => serializer.collect_str(id),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u64>, D::Error> {
        match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Text(text)) if text.trim().is_empty() => Ok(None),
            Some(raw) => raw.into_id().map(Some),
            None => Ok(None),
        }
    }
}

/// `Vec<u64>` variant; pair with `#[serde(default)]`.
pub mod list {
    use super::*;

    pub fn serialize<S: Serializer>(ids: &[u64], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(ids.iter().map(|id| id.to_string()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u64>, D::Error> {
        Vec::<Raw>::deserialize(deserializer)?
            .into_iter()
            .map(Raw::into_id)
            .collect()
    }
}
