//! Reserved header identifiers and loosely typed header values.
//!
//! Header values are written by the transport layer in whatever shape the
//! vendor message provides (numbers may arrive as strings, destinations as
//! `queue://...` text). The `as_*` conversions below are the only coercions
//! the envelope performs on them; none of them fail, they yield `None`.

use std::fmt;
use std::str::FromStr;

use crate::error::{JmsError, Result};
use crate::message::destination::Destination;

/// Provider-assigned header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeaderName {
    MessageId,
    Timestamp,
    CorrelationId,
    ReplyTo,
    Destination,
    DeliveryMode,
    Redelivered,
    Type,
    Expiration,
    Priority,
    DeliveryTime,
}

impl HeaderName {
    pub const ALL: [HeaderName; 11] = [
        HeaderName::MessageId,
        HeaderName::Timestamp,
        HeaderName::CorrelationId,
        HeaderName::ReplyTo,
        HeaderName::Destination,
        HeaderName::DeliveryMode,
        HeaderName::Redelivered,
        HeaderName::Type,
        HeaderName::Expiration,
        HeaderName::Priority,
        HeaderName::DeliveryTime,
    ];

    /// Key used when the header travels as a string-keyed property.
    pub fn as_str(self) -> &'static str {
        match self {
            HeaderName::MessageId => "JMSMessageID",
            HeaderName::Timestamp => "JMSTimestamp",
            HeaderName::CorrelationId => "JMSCorrelationID",
            HeaderName::ReplyTo => "JMSReplyTo",
            HeaderName::Destination => "JMSDestination",
            HeaderName::DeliveryMode => "JMSDeliveryMode",
            HeaderName::Redelivered => "JMSRedelivered",
            HeaderName::Type => "JMSType",
            HeaderName::Expiration => "JMSExpiration",
            HeaderName::Priority => "JMSPriority",
            HeaderName::DeliveryTime => "JMSDeliveryTime",
        }
    }

    /// Value reported when the header was never populated.
    pub fn default_value(self) -> HeaderValue {
        match self {
            HeaderName::MessageId
            | HeaderName::CorrelationId
            | HeaderName::ReplyTo
            | HeaderName::Destination
            | HeaderName::Type => HeaderValue::Null,
            HeaderName::Timestamp | HeaderName::Expiration | HeaderName::DeliveryTime => {
                HeaderValue::Long(0)
            }
            HeaderName::DeliveryMode => HeaderValue::Int(0),
            HeaderName::Priority => HeaderValue::Int(5),
            HeaderName::Redelivered => HeaderValue::Bool(false),
        }
    }
}

impl fmt::Display for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeaderName {
    type Err = JmsError;

    fn from_str(s: &str) -> Result<Self> {
        HeaderName::ALL
            .into_iter()
            .find(|h| h.as_str() == s)
            .ok_or_else(|| JmsError::InvalidArgument(format!("unknown header: {s}")))
    }
}

/// Loosely typed header value as stored by the transport layer.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Str(String),
    Destination(Destination),
}

impl HeaderValue {
    pub fn is_null(&self) -> bool {
        matches!(self, HeaderValue::Null)
    }

    pub fn as_string(&self) -> Option<String> {
        match self {
            HeaderValue::Null => None,
            HeaderValue::Bool(b) => Some(b.to_string()),
            HeaderValue::Int(v) => Some(v.to_string()),
            HeaderValue::Long(v) => Some(v.to_string()),
            HeaderValue::Str(s) => Some(s.clone()),
            HeaderValue::Destination(d) => Some(d.to_string()),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            HeaderValue::Int(v) => Some(i64::from(*v)),
            HeaderValue::Long(v) => Some(*v),
            HeaderValue::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            HeaderValue::Int(v) => Some(*v),
            HeaderValue::Long(v) => i32::try_from(*v).ok(),
            HeaderValue::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            HeaderValue::Bool(b) => Some(*b),
            HeaderValue::Str(s) => s.trim().to_ascii_lowercase().parse().ok(),
            _ => None,
        }
    }

    pub fn as_destination(&self) -> Option<Destination> {
        match self {
            HeaderValue::Destination(d) => Some(d.clone()),
            HeaderValue::Str(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl From<bool> for HeaderValue {
    fn from(v: bool) -> Self {
        HeaderValue::Bool(v)
    }
}

impl From<i32> for HeaderValue {
    fn from(v: i32) -> Self {
        HeaderValue::Int(v)
    }
}

impl From<i64> for HeaderValue {
    fn from(v: i64) -> Self {
        HeaderValue::Long(v)
    }
}

impl From<String> for HeaderValue {
    fn from(v: String) -> Self {
        HeaderValue::Str(v)
    }
}

impl From<&str> for HeaderValue {
    fn from(v: &str) -> Self {
        HeaderValue::Str(v.to_owned())
    }
}

impl From<Destination> for HeaderValue {
    fn from(v: Destination) -> Self {
        HeaderValue::Destination(v)
    }
}
