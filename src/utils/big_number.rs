//! JSON handling for scaled integers.
//!
//! Cached pools store every BigInt in the `{ "type": "BigNumber", "hex": "0x…" }`
//! shape. The serde helpers here write that shape and read it back, along with
//! the plain decimal strings and integers the subgraph itself returns.

use log::debug;
use num_bigint::BigInt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::conversion::{parse_big_int, to_hex_string};

/// Type tag marking a serialized big number object.
pub const BIG_NUMBER_TYPE: &str = "BigNumber";

#[derive(Serialize)]
struct TaggedBigNumber<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    hex: String,
}

/// Read a big number out of any JSON representation we accept.
pub fn big_int_from_value(value: &Value) -> Option<BigInt> {
    match value {
        Value::String(s) => parse_big_int(s),
        Value::Number(n) => n
            .as_u64()
            .map(BigInt::from)
            .or_else(|| n.as_i64().map(BigInt::from)),
        Value::Object(map) if is_tagged_big_number(map) => map
            .get("hex")
            .or_else(|| map.get("_hex"))
            .and_then(Value::as_str)
            .and_then(parse_big_int),
        _ => None,
    }
}

fn is_tagged_big_number(map: &Map<String, Value>) -> bool {
    map.get("type").and_then(Value::as_str) == Some(BIG_NUMBER_TYPE)
        || map.get("_isBigNumber").and_then(Value::as_bool) == Some(true)
}

// ============================================
// Cache Deserialization
// ============================================

/// Recursively rewrite every serialized big number in a JSON tree.
///
/// Objects tagged `type: "BigNumber"` (inside objects or arrays, at any depth)
/// become the decimal string of their value. Anything that fails to parse is
/// left as it was, so a damaged cache entry still yields usable data.
///
/// `Value` is an owned tree, so the walk always terminates.
pub fn deserialize_big_numbers(data: Value) -> Value {
    match data {
        Value::Array(items) => Value::Array(items.into_iter().map(deserialize_big_numbers).collect()),
        Value::Object(map) if is_tagged_big_number(&map) => {
            let value = Value::Object(map);
            match big_int_from_value(&value) {
                Some(parsed) => Value::String(parsed.to_string()),
                None => {
                    debug!("leaving unparseable big number untouched: {value}");
                    value
                }
            }
        }
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, deserialize_big_numbers(value)))
                .collect(),
        ),
        other => other,
    }
}

// ============================================
// Serde field helpers
// ============================================

/// `#[serde(with = "...")]` helpers for `BigInt` fields.
pub mod required {
    use super::*;
    use serde::de::Error as _;

    pub fn serialize<S: Serializer>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error> {
        TaggedBigNumber { kind: BIG_NUMBER_TYPE, hex: to_hex_string(value) }.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigInt, D::Error> {
        let value = Value::deserialize(deserializer)?;
        big_int_from_value(&value)
            .ok_or_else(|| D::Error::custom(format!("invalid big number: {value}")))
    }
}

/// `#[serde(with = "...")]` helpers for `Option<BigInt>` fields.
pub mod optional {
    use super::*;
    use serde::de::Error as _;

    pub fn serialize<S: Serializer>(
        value: &Option<BigInt>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => super::required::serialize(v, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<BigInt>, D::Error> {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => big_int_from_value(&value)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid big number: {value}"))),
        }
    }
}
