//! Attribute values for structured log records

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Value type for structured logging attributes
///
/// Maps keep insertion order so flattened and encoded output follows the
/// order in which fields were declared.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
    Seq(Vec<FieldValue>),
    Map(Vec<(String, FieldValue)>),
}

impl FieldValue {
    /// Build a map value from key/value pairs, keeping their order
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        FieldValue::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Describe any serializable record as a value
    ///
    /// Structs become maps with their fields in declaration order.
    /// `#[serde(rename = "...")]` and `#[serde(skip)]` control which keys
    /// appear. Values that fail to serialize are rendered as their error text.
    ///
    /// ```
    /// use logfacade::FieldValue;
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct User {
    ///     #[serde(rename = "user_name")]
    ///     name: String,
    ///     #[serde(skip)]
    ///     password: String,
    /// }
    ///
    /// let value = FieldValue::record(&User { name: "alice".into(), password: "x".into() });
    /// assert_eq!(value, FieldValue::map([("user_name", "alice")]));
    /// ```
    pub fn record<T: Serialize + ?Sized>(record: &T) -> Self {
        match serde_json::to_value(record) {
            Ok(value) => value.into(),
            Err(e) => FieldValue::String(format!("!ERROR: {}", e)),
        }
    }

    /// Render an error through its `Display` implementation
    pub fn error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        FieldValue::String(err.to_string())
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self, FieldValue::Seq(_) | FieldValue::Map(_))
    }

    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::Null => serde_json::Value::Null,
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Int(i) => serde_json::Value::from(*i),
            FieldValue::Uint(u) => serde_json::Value::from(*u),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(f.to_string())),
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Seq(items) => {
                serde_json::Value::Array(items.iter().map(FieldValue::to_json_value).collect())
            }
            FieldValue::Map(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json_value()))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for FieldValue {
    /// Canonical text form: strings verbatim, containers as compact JSON
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Uint(u) => write!(f, "{}", u),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Seq(_) | FieldValue::Map(_) => write!(f, "{}", self.to_json_value()),
        }
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FieldValue::Null,
            serde_json::Value::Bool(b) => FieldValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    FieldValue::Uint(u)
                } else {
                    FieldValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => FieldValue::String(s),
            serde_json::Value::Array(items) => {
                FieldValue::Seq(items.into_iter().map(FieldValue::from).collect())
            }
            serde_json::Value::Object(map) => {
                FieldValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::String(s.clone())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for FieldValue {
            fn from(i: $t) -> Self {
                FieldValue::Int(i as i64)
            }
        }
    )*};
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for FieldValue {
            fn from(u: $t) -> Self {
                FieldValue::Uint(u as u64)
            }
        }
    )*};
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for FieldValue {
    fn from(f: f32) -> Self {
        FieldValue::Float(f64::from(f))
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        FieldValue::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<FieldValue>> From<BTreeMap<String, V>> for FieldValue {
    fn from(map: BTreeMap<String, V>) -> Self {
        FieldValue::map(map)
    }
}

impl<V: Into<FieldValue>> From<HashMap<String, V>> for FieldValue {
    /// Hash maps have no stable order; entries are sorted by key
    fn from(map: HashMap<String, V>) -> Self {
        let mut entries: Vec<(String, V)> = map.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        FieldValue::map(entries)
    }
}

/// A single key/value pair attached to a record or bound into a logger
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub key: String,
    pub value: FieldValue,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Attribute holding a serializable record, see [`FieldValue::record`]
    pub fn record<T: Serialize + ?Sized>(key: impl Into<String>, record: &T) -> Self {
        Self {
            key: key.into(),
            value: FieldValue::record(record),
        }
    }

    /// The conventional `error` attribute
    pub fn error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        Self {
            key: "error".to_string(),
            value: FieldValue::error(err),
        }
    }
}

impl<K: Into<String>, V: Into<FieldValue>> From<(K, V)> for Attr {
    fn from((key, value): (K, V)) -> Self {
        Attr::new(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Request {
        method: String,
        #[serde(rename = "url")]
        path: String,
        #[serde(skip)]
        #[allow(dead_code)]
        token: String,
        retries: u32,
    }

    #[test]
    fn test_record_keeps_declaration_order_and_tags() {
        let req = Request {
            method: "GET".to_string(),
            path: "/health".to_string(),
            token: "secret".to_string(),
            retries: 2,
        };

        let value = FieldValue::record(&req);
        assert_eq!(
            value,
            FieldValue::Map(vec![
                ("method".to_string(), FieldValue::from("GET")),
                ("url".to_string(), FieldValue::from("/health")),
                ("retries".to_string(), FieldValue::Int(2)),
            ])
        );
    }

    #[test]
    fn test_display_canonical_text() {
        assert_eq!(FieldValue::from(30).to_string(), "30");
        assert_eq!(FieldValue::from(1.5).to_string(), "1.5");
        assert_eq!(FieldValue::from(3.0).to_string(), "3");
        assert_eq!(FieldValue::from(true).to_string(), "true");
        assert_eq!(FieldValue::Null.to_string(), "null");
        assert_eq!(FieldValue::from(vec![1, 2]).to_string(), "[1,2]");
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(FieldValue::from(None::<i32>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some("x")), FieldValue::from("x"));
    }

    #[test]
    fn test_hash_map_sorted_by_key() {
        let mut map = HashMap::new();
        map.insert("b".to_string(), 2);
        map.insert("a".to_string(), 1);
        assert_eq!(FieldValue::from(map), FieldValue::map([("a", 1), ("b", 2)]));
    }

    #[test]
    fn test_attr_from_tuple() {
        let attr: Attr = ("user", "alice").into();
        assert_eq!(attr.key, "user");
        assert_eq!(attr.value, FieldValue::from("alice"));
    }
}
