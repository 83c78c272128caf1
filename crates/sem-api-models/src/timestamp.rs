//! Serde adapter for optional Unix timestamps.
//!
//! The API encodes `int64` timestamps as decimal strings on the JSON wire,
//! while hand-written manifests usually carry plain integers. Both are
//! accepted; output always uses the string form.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;

#[allow(clippy::ref_option)]
pub(crate) fn serialize<S>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(seconds) => serializer.serialize_str(&seconds.to_string()),
        None => serializer.serialize_none(),
    }
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(TimestampVisitor)
}

struct TimestampVisitor;

impl<'de> Visitor<'de> for TimestampVisitor {
    type Value = Option<i64>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a Unix timestamp as an integer or decimal string")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Some(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        i64::try_from(value)
            .map(Some)
            .map_err(|_| E::custom(format!("timestamp {value} is out of range")))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse::<i64>()
            .map(Some)
            .map_err(|_| E::custom(format!("invalid timestamp '{value}'")))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(Self)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    struct Stamped {
        #[serde(default, skip_serializing_if = "Option::is_none", with = "super")]
        at: Option<i64>,
    }

    #[test]
    fn accepts_strings_and_integers() -> anyhow::Result<()> {
        let from_string: Stamped = serde_json::from_str(r#"{"at":"1700000000"}"#)?;
        let from_integer: Stamped = serde_json::from_str(r#"{"at":1700000000}"#)?;
        assert_eq!(from_string, from_integer);
        assert_eq!(from_string.at, Some(1_700_000_000));

        let from_yaml: Stamped = serde_yaml::from_str("at: 1700000000\n")?;
        assert_eq!(from_yaml.at, Some(1_700_000_000));
        Ok(())
    }

    #[test]
    fn empty_and_null_values_map_to_none() -> anyhow::Result<()> {
        let empty: Stamped = serde_json::from_str(r#"{"at":""}"#)?;
        let null: Stamped = serde_json::from_str(r#"{"at":null}"#)?;
        let missing: Stamped = serde_json::from_str("{}")?;
        assert_eq!(empty.at, None);
        assert_eq!(null.at, None);
        assert_eq!(missing.at, None);
        Ok(())
    }

    #[test]
    fn serializes_as_decimal_string() -> anyhow::Result<()> {
        let text = serde_json::to_string(&Stamped { at: Some(42) })?;
        assert_eq!(text, r#"{"at":"42"}"#);
        assert_eq!(serde_json::to_string(&Stamped { at: None })?, "{}");
        Ok(())
    }

    #[test]
    fn rejects_garbage() {
        assert!(serde_json::from_str::<Stamped>(r#"{"at":"yesterday"}"#).is_err());
    }
}
