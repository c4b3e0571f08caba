//! Message body variants.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde_json::Value;

use crate::error::{JmsError, Result};
use crate::message::property::PropertyValue;

/// Map body: named primitive entries.
pub type MapBody = BTreeMap<String, PropertyValue>;

/// Typed message payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Text(String),
    Bytes(Bytes),
    Map(MapBody),
    /// Any serializable value, kept in its JSON data model.
    Object(Value),
}

impl Body {
    pub fn kind(&self) -> BodyKind {
        match self {
            Body::Text(_) => BodyKind::Text,
            Body::Bytes(_) => BodyKind::Bytes,
            Body::Map(_) => BodyKind::Map,
            Body::Object(_) => BodyKind::Object,
        }
    }
}

/// Discriminant of [`Body`], carried alongside encoded payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Text,
    Bytes,
    Map,
    Object,
}

impl BodyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BodyKind::Text => "text",
            BodyKind::Bytes => "bytes",
            BodyKind::Map => "map",
            BodyKind::Object => "object",
        }
    }
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyKind {
    type Err = JmsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(BodyKind::Text),
            "bytes" => Ok(BodyKind::Bytes),
            "map" => Ok(BodyKind::Map),
            "object" => Ok(BodyKind::Object),
            other => Err(JmsError::InvalidArgument(format!("unknown body kind: {other}"))),
        }
    }
}

/// Types a body can be extracted as. Extraction never converts between
/// variants: a text body is not readable as bytes.
pub trait FromBody: Sized {
    /// Name used in errors.
    const TYPE_NAME: &'static str;

    fn from_body(body: &Body) -> Option<Self>;
}

impl FromBody for String {
    const TYPE_NAME: &'static str = "String";

    fn from_body(body: &Body) -> Option<Self> {
        match body {
            Body::Text(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromBody for Bytes {
    const TYPE_NAME: &'static str = "Bytes";

    fn from_body(body: &Body) -> Option<Self> {
        match body {
            Body::Bytes(b) => Some(b.clone()),
            _ => None,
        }
    }
}

impl FromBody for Vec<u8> {
    const TYPE_NAME: &'static str = "Vec<u8>";

    fn from_body(body: &Body) -> Option<Self> {
        match body {
            Body::Bytes(b) => Some(b.to_vec()),
            _ => None,
        }
    }
}

impl FromBody for MapBody {
    const TYPE_NAME: &'static str = "MapBody";

    fn from_body(body: &Body) -> Option<Self> {
        match body {
            Body::Map(m) => Some(m.clone()),
            _ => None,
        }
    }
}

impl FromBody for Value {
    const TYPE_NAME: &'static str = "serde_json::Value";

    fn from_body(body: &Body) -> Option<Self> {
        match body {
            Body::Object(v) => Some(v.clone()),
            _ => None,
        }
    }
}
