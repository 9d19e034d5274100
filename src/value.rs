//! Dynamic value representation for TOON documents.
//!
//! This module provides the [`Value`] enum which represents any valid TOON
//! value, plus the [`Number`] wrapper that carries the format's numeric
//! rendering rules.
//!
//! ## Core Types
//!
//! - [`Value`]: a tagged sum over null, bool, number, string, array, object
//! - [`Number`]: an IEEE-754 double with TOON's textual rendering
//!
//! ## Creating Values
//!
//! ```rust
//! use toon_codec::{toon, Value};
//!
//! let null = Value::Null;
//! let flag = Value::from(true);
//! let count = Value::from(42);
//! let name = Value::from("Alice");
//!
//! let user = toon!({
//!     "name": "Alice",
//!     "age": 30
//! });
//! assert!(user.is_object());
//! ```
//!
//! ## Decode asymmetry
//!
//! Encoding renders every variant in its natural textual form, but decoding
//! deliberately maps unquoted scalars back to [`Value::String`] unless they
//! are the literals `true`, `false`, or `null`. A document round-trip
//! therefore turns `Value::Number(n)` into `Value::String(render(n))`:
//!
//! ```rust
//! use toon_codec::{decode, encode, toon, Value};
//!
//! let encoded = encode(&toon!({"age": 30}));
//! let back = decode(&encoded).unwrap();
//! assert_eq!(back["age"], Value::from("30"));
//! ```

use crate::map::Map;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Index;

/// A dynamically-typed representation of any valid TOON value.
///
/// Object fields keep their insertion order; see [`Map`] for the ordering
/// guarantees that tabular encoding relies on.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{Number, Value};
///
/// let null = Value::Null;
/// let num = Value::Number(Number::from(42));
/// let text = Value::String("hello".to_string());
///
/// assert!(null.is_null());
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

/// A TOON number: an IEEE-754 double with the format's rendering rules.
///
/// Rendering normalizes `-0` to `0`, prints integral values without a decimal
/// point, renders non-finite values as `null`, and otherwise uses the shortest
/// decimal string that recovers the double (Rust's `Display` for `f64`, which
/// never emits exponent notation).
///
/// # Examples
///
/// ```rust
/// use toon_codec::Number;
///
/// assert_eq!(Number::from(30).to_string(), "30");
/// assert_eq!(Number::from(2.5).to_string(), "2.5");
/// assert_eq!(Number::from(-0.0).to_string(), "0");
/// assert_eq!(Number::from(f64::NAN).to_string(), "null");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Number(f64);

impl Number {
    /// Returns the underlying double.
    #[inline]
    #[must_use]
    pub const fn as_f64(&self) -> f64 {
        self.0
    }

    /// Returns `true` if the value is finite and has no fractional part.
    ///
    /// Integral numbers render without a decimal point.
    #[inline]
    #[must_use]
    pub fn is_integral(&self) -> bool {
        self.0.is_finite() && self.0.fract() == 0.0
    }

    /// Converts to an `i64` when the value is integral and in range.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        if self.is_integral() && self.0 >= i64::MIN as f64 && self.0 <= i64::MAX as f64 {
            Some(self.0 as i64)
        } else {
            None
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.0.is_finite() {
            // NaN and infinities have no TOON spelling
            return f.write_str("null");
        }
        if self.0 == 0.0 {
            // covers -0
            return f.write_str("0");
        }
        write!(f, "{}", self.0)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number(value)
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number(value as f64)
    }
}

macro_rules! number_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number(value as f64)
                }
            }
        )*
    };
}

number_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl Value {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns `true` if the value is an object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns `true` if the value is a primitive (not an array or object).
    ///
    /// Array shape selection is driven entirely by this predicate on the
    /// array's direct children.
    #[inline]
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        !matches!(self, Value::Array(_) | Value::Object(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a number, returns it as an `f64`. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an array, returns a slice of it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the value is an object, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a field of an object value.
    ///
    /// Returns `None` when the value is not an object or the key is absent.
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }
}

/// Renders the value as a TOON document with default options.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::encode(self))
    }
}

/// Panics when the key is absent or the value is not an object, in the style
/// of slice indexing. Use [`Value::get`] for fallible lookup.
impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get(key)
            .unwrap_or_else(|| panic!("no field {key:?} in value"))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

macro_rules! value_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::from(value))
                }
            }
        )*
    };
}

value_from_number!(i8, i16, i32, i64, u8, u16, u32, f32, f64);

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Object(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serializer.serialize_f64(n.as_f64()),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid TOON value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::from(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::from(value as f64)))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::from(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = Map::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(Value::Object(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_rendering() {
        assert_eq!(Number::from(30).to_string(), "30");
        assert_eq!(Number::from(30.0).to_string(), "30");
        assert_eq!(Number::from(-7).to_string(), "-7");
        assert_eq!(Number::from(2.5).to_string(), "2.5");
        assert_eq!(Number::from(0).to_string(), "0");
        assert_eq!(Number::from(-0.0).to_string(), "0");
        assert_eq!(Number::from(1e21).to_string(), "1000000000000000000000");
    }

    #[test]
    fn number_rendering_non_finite() {
        assert_eq!(Number::from(f64::NAN).to_string(), "null");
        assert_eq!(Number::from(f64::INFINITY).to_string(), "null");
        assert_eq!(Number::from(f64::NEG_INFINITY).to_string(), "null");
    }

    #[test]
    fn number_accessors() {
        assert!(Number::from(42).is_integral());
        assert!(!Number::from(2.5).is_integral());
        assert!(!Number::from(f64::NAN).is_integral());
        assert_eq!(Number::from(42).as_i64(), Some(42));
        assert_eq!(Number::from(42.5).as_i64(), None);
        assert_eq!(Number::from(3.0).as_f64(), 3.0);
    }

    #[test]
    fn value_type_predicates() {
        assert!(Value::Null.is_null());
        assert!(Value::from(true).is_bool());
        assert!(Value::from(1).is_number());
        assert!(Value::from("x").is_string());
        assert!(Value::Array(vec![]).is_array());
        assert!(Value::Object(Map::new()).is_object());

        assert!(Value::Null.is_primitive());
        assert!(Value::from("x").is_primitive());
        assert!(!Value::Array(vec![]).is_primitive());
        assert!(!Value::Object(Map::new()).is_primitive());
    }

    #[test]
    fn value_accessors() {
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from(1.5).as_f64(), Some(1.5));
        assert_eq!(Value::from("hi").as_str(), Some("hi"));
        assert_eq!(Value::from(1).as_str(), None);

        let arr = Value::Array(vec![Value::from(1)]);
        assert_eq!(arr.as_array().map(<[Value]>::len), Some(1));

        let mut map = Map::new();
        map.insert("k".to_string(), Value::from(7));
        let obj = Value::Object(map);
        assert_eq!(obj.get("k"), Some(&Value::from(7)));
        assert_eq!(obj["k"], Value::from(7));
        assert_eq!(obj.get("missing"), None);
    }

    #[test]
    fn from_option() {
        assert_eq!(Value::from(Some(3)), Value::from(3));
        assert_eq!(Value::from(None::<i32>), Value::Null);
    }

    #[test]
    fn display_uses_default_encoding() {
        let mut map = Map::new();
        map.insert("name".to_string(), Value::from("Alice"));
        assert_eq!(Value::Object(map).to_string(), "name: Alice");
        assert_eq!(Value::from(true).to_string(), "true");
    }
}
