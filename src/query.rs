use serde::Serialize;
use serde_json::Value as JsonValue;
use url::form_urlencoded;

use crate::{ArenaError, Result};

/// A single query/form value.
///
/// Only primitives are emitted. `Null` is skipped, lists are joined with `,`
/// after dropping their non-primitive elements.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryValue {
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    List(Vec<QueryValue>),
}

impl QueryValue {
    fn primitive_text(&self) -> Option<String> {
        match self {
            Self::Text(value) => Some(value.clone()),
            Self::Integer(value) => Some(value.to_string()),
            Self::Float(value) => Some(value.to_string()),
            Self::Bool(value) => Some(value.to_string()),
            Self::Null | Self::List(_) => None,
        }
    }

    /// Text form of the value, or `None` when the key must be omitted.
    fn encoded(&self) -> Option<String> {
        match self {
            Self::List(items) => {
                let joined = items
                    .iter()
                    .filter_map(Self::primitive_text)
                    .collect::<Vec<_>>()
                    .join(",");
                (!joined.is_empty()).then_some(joined)
            }
            other => other.primitive_text(),
        }
    }

    /// Converts JSON; objects have no query representation.
    fn from_json(value: JsonValue) -> Option<Self> {
        match value {
            JsonValue::Null => Some(Self::Null),
            JsonValue::Bool(value) => Some(Self::Bool(value)),
            JsonValue::Number(number) => number
                .as_i64()
                .map(Self::Integer)
                .or_else(|| number.as_f64().map(Self::Float)),
            JsonValue::String(value) => Some(Self::Text(value)),
            JsonValue::Array(items) => Some(Self::List(
                items.into_iter().filter_map(Self::from_json).collect(),
            )),
            JsonValue::Object(_) => None,
        }
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<QueryValue>> From<Vec<T>> for QueryValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// Ordered key/value mapping encoded as a URL query string or a
/// form-urlencoded body.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query {
    pairs: Vec<(String, QueryValue)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a query from any serializable struct or map.
    ///
    /// Top-level values that are objects are dropped, like other non-primitives.
    pub fn from_serialize<T: Serialize + ?Sized>(input: &T) -> Result<Self> {
        let value = serde_json::to_value(input)
            .map_err(|err| ArenaError::Encode(format!("invalid query input: {err}")))?;
        match value {
            JsonValue::Object(map) => Ok(map
                .into_iter()
                .filter_map(|(key, value)| QueryValue::from_json(value).map(|value| (key, value)))
                .collect()),
            JsonValue::Null => Ok(Self::new()),
            other => Err(ArenaError::Encode(format!(
                "query input must serialize to an object, got {other}"
            ))),
        }
    }

    /// Sets `key`, replacing an earlier value in place.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encodes as `application/x-www-form-urlencoded`, skipping omitted keys.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            if let Some(text) = value.encoded() {
                serializer.append_pair(key, &text);
            }
        }
        serializer.finish()
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Self::new();
        for (key, value) in iter {
            query.insert(key, value);
        }
        query
    }
}
