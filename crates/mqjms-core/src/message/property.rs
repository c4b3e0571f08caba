//! User properties: a closed set of primitive kinds plus explicit coercions.
//!
//! Reads go through a string round-trip: the stored value is rendered with
//! `Display` and parsed as the requested type. An `int` stored property can
//! therefore be read as `long` or `String`, and a numeric string can be read
//! as a number, while `i64::MAX` read as `i32` fails with a coercion error.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoercionSource, JmsError, Result};

const ALLOWED_KINDS: &str = "boolean, byte, short, int, long, float, double or string";

/// A property (or map body entry) value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
}

impl PropertyValue {
    pub fn kind(&self) -> &'static str {
        match self {
            PropertyValue::Bool(_) => "boolean",
            PropertyValue::Byte(_) => "byte",
            PropertyValue::Short(_) => "short",
            PropertyValue::Int(_) => "int",
            PropertyValue::Long(_) => "long",
            PropertyValue::Float(_) => "float",
            PropertyValue::Double(_) => "double",
            PropertyValue::String(_) => "string",
        }
    }

    /// Accept a dynamically typed value if it is a boolean, number or string.
    ///
    /// Integral numbers become `Long`, other numbers `Double`.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(PropertyValue::Bool(*b)),
            Value::String(s) => Ok(PropertyValue::String(s.clone())),
            Value::Number(n) => {
                if let Some(v) = n.as_i64() {
                    Ok(PropertyValue::Long(v))
                } else if let Some(v) = n.as_f64() {
                    Ok(PropertyValue::Double(v))
                } else {
                    Err(JmsError::InvalidArgument(format!(
                        "number {n} out of range; value should be {ALLOWED_KINDS}"
                    )))
                }
            }
            other => Err(JmsError::InvalidArgument(format!(
                "value should be {ALLOWED_KINDS}, got {}",
                json_kind(other)
            ))),
        }
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(v) => write!(f, "{v}"),
            PropertyValue::Byte(v) => write!(f, "{v}"),
            PropertyValue::Short(v) => write!(f, "{v}"),
            PropertyValue::Int(v) => write!(f, "{v}"),
            PropertyValue::Long(v) => write!(f, "{v}"),
            // Debug keeps the fraction ("5.0"), so integral floats do not
            // parse as integers.
            PropertyValue::Float(v) => write!(f, "{v:?}"),
            PropertyValue::Double(v) => write!(f, "{v:?}"),
            PropertyValue::String(v) => f.write_str(v),
        }
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for PropertyValue {
                fn from(v: $ty) -> Self {
                    PropertyValue::$variant(v)
                }
            }
        )*
    };
}

impl_from_primitive!(
    bool => Bool,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    String => String,
);

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::String(v.to_owned())
    }
}

/// Types a property can be read as.
pub trait FromProperty: Sized {
    /// Name used in coercion errors.
    const KIND: &'static str;

    /// Returned when the property does not exist.
    fn zero() -> Self;

    fn parse_property(raw: &str) -> std::result::Result<Self, CoercionSource>;
}

macro_rules! impl_from_property_numeric {
    ($($ty:ty => $kind:literal, $zero:expr);* $(;)?) => {
        $(
            impl FromProperty for $ty {
                const KIND: &'static str = $kind;

                fn zero() -> Self {
                    $zero
                }

                fn parse_property(raw: &str) -> std::result::Result<Self, CoercionSource> {
                    raw.parse::<$ty>().map_err(Into::into)
                }
            }
        )*
    };
}

impl_from_property_numeric!(
    i8 => "byte", 0;
    i16 => "short", 0;
    i32 => "int", 0;
    i64 => "long", 0;
    f32 => "float", 0.0;
    f64 => "double", 0.0;
);

impl FromProperty for bool {
    const KIND: &'static str = "boolean";

    fn zero() -> Self {
        false
    }

    // Case-insensitive "true"/"false"; anything else is a coercion error.
    fn parse_property(raw: &str) -> std::result::Result<Self, CoercionSource> {
        raw.to_ascii_lowercase().parse::<bool>().map_err(Into::into)
    }
}

impl FromProperty for String {
    const KIND: &'static str = "string";

    fn zero() -> Self {
        String::new()
    }

    fn parse_property(raw: &str) -> std::result::Result<Self, CoercionSource> {
        Ok(raw.to_owned())
    }
}

/// Coerce a stored property into `T` through its string form.
pub(crate) fn coerce<T: FromProperty>(name: &str, value: &PropertyValue) -> Result<T> {
    T::parse_property(&value.to_string()).map_err(|source| JmsError::TypeCoercion {
        name: name.to_owned(),
        target: T::KIND,
        source,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn float_renders_without_loss() {
        let v = PropertyValue::Float(0.1);
        assert_eq!(coerce::<f32>("p", &v).unwrap(), 0.1f32);
    }

    #[test]
    fn integral_double_keeps_fraction() {
        assert_eq!(PropertyValue::Double(5.0).to_string(), "5.0");
        assert_eq!(PropertyValue::Float(1e20).to_string(), "1e20");
        assert!(coerce::<i32>("p", &PropertyValue::Double(5.0)).is_err());
        assert_eq!(coerce::<f64>("p", &PropertyValue::Double(1e20)).unwrap(), 1e20);
    }

    #[test]
    fn bool_parse_ignores_case() {
        let v = PropertyValue::from("TRUE");
        assert!(coerce::<bool>("p", &v).unwrap());
        let err = coerce::<bool>("p", &PropertyValue::from("yes")).unwrap_err();
        assert_eq!(err.code().as_str(), "TYPE_COERCION");
    }

    #[test]
    fn nested_json_rejected() {
        let err = PropertyValue::from_json(&serde_json::json!({"a": 1})).unwrap_err();
        assert_eq!(err.code().as_str(), "INVALID_ARGUMENT");
        assert!(err.to_string().contains("boolean, byte, short"));
    }
}
