//! The message envelope.
//!
//! Lifecycle:
//! - Writable: after construction or `clear_body()`. The body may be replaced.
//! - ReadOnly: after the transport layer populated the message for delivery
//!   (`set_read_only()`). Body replacement fails with `NotWritable` until
//!   `clear_body()` is called.
//!
//! Reserved headers are provider-assigned: every user-facing header setter
//! fails with `UnsupportedOperation`. The transport layer writes them through
//! `set_header`.

use std::collections::HashMap;
use std::fmt;
use std::iter::FusedIterator;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;

use crate::error::{JmsError, Result};
use crate::message::body::{Body, FromBody, MapBody};
use crate::message::destination::Destination;
use crate::message::header::{HeaderName, HeaderValue};
use crate::message::property::{self, FromProperty, PropertyValue};

/// Headers, properties and an optional body.
#[derive(Clone, PartialEq)]
pub struct Message {
    headers: HashMap<HeaderName, HeaderValue>,
    properties: HashMap<String, PropertyValue>,
    body: Option<Body>,
    write_only: bool,
}

impl Default for Message {
    fn default() -> Self {
        Self::new()
    }
}

impl Message {
    /// Empty, writable message.
    pub fn new() -> Self {
        Self {
            headers: HashMap::new(),
            properties: HashMap::new(),
            body: None,
            write_only: true,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::with_body(Body::Text(text.into()))
    }

    pub fn bytes(bytes: impl Into<Bytes>) -> Self {
        Self::with_body(Body::Bytes(bytes.into()))
    }

    pub fn map(entries: MapBody) -> Self {
        Self::with_body(Body::Map(entries))
    }

    /// Object message from any serializable value.
    pub fn object<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self::with_body(Body::Object(to_object(value)?)))
    }

    fn with_body(body: Body) -> Self {
        let mut msg = Self::new();
        msg.body = Some(body);
        msg
    }

    // ---------------------------------------------------------------------
    // Transport-facing API
    // ---------------------------------------------------------------------

    /// Overwrite a header. Reserved for the transport layer.
    pub fn set_header(&mut self, name: HeaderName, value: impl Into<HeaderValue>) {
        self.headers.insert(name, value.into());
    }

    pub fn header(&self, name: HeaderName) -> Option<&HeaderValue> {
        self.headers.get(&name)
    }

    pub fn header_exists(&self, name: HeaderName) -> bool {
        self.headers.contains_key(&name)
    }

    pub fn headers(&self) -> &HashMap<HeaderName, HeaderValue> {
        &self.headers
    }

    pub fn properties(&self) -> &HashMap<String, PropertyValue> {
        &self.properties
    }

    /// Replace the whole property map. Reserved for the transport layer.
    pub fn set_properties(&mut self, properties: HashMap<String, PropertyValue>) {
        self.properties = properties;
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// Install a delivered body without the write-only guard, then seal the
    /// message. Used by the transport layer when materializing a received
    /// message.
    pub fn deliver_body(&mut self, body: Option<Body>) {
        self.body = body;
        self.set_read_only();
    }

    /// Transition Writable -> ReadOnly.
    pub fn set_read_only(&mut self) {
        self.write_only = false;
    }

    pub fn is_write_only(&self) -> bool {
        self.write_only
    }

    // ---------------------------------------------------------------------
    // Headers
    // ---------------------------------------------------------------------

    /// Stored header value, or the field's default when absent.
    pub fn get_header(&self, name: HeaderName) -> HeaderValue {
        self.headers
            .get(&name)
            .cloned()
            .unwrap_or_else(|| name.default_value())
    }

    /// Read a header through `conv`, falling back to `default` when it is
    /// absent or cannot be coerced.
    fn header_as<T>(
        &self,
        name: HeaderName,
        conv: impl FnOnce(&HeaderValue) -> Option<T>,
        default: T,
    ) -> T {
        let Some(value) = self.headers.get(&name) else {
            return default;
        };
        if value.is_null() {
            return default;
        }
        match conv(value) {
            Some(v) => v,
            None => {
                tracing::warn!(header = %name, value = ?value, "header not coercible, using default");
                default
            }
        }
    }

    pub fn message_id(&self) -> Option<String> {
        self.header_as(HeaderName::MessageId, |v| v.as_string().map(Some), None)
    }

    pub fn timestamp(&self) -> i64 {
        self.header_as(HeaderName::Timestamp, HeaderValue::as_i64, 0)
    }

    pub fn correlation_id(&self) -> Option<String> {
        self.header_as(HeaderName::CorrelationId, |v| v.as_string().map(Some), None)
    }

    /// Correlation id as bytes: base64-decoded when possible, otherwise the
    /// raw bytes of the stored string.
    pub fn correlation_id_as_bytes(&self) -> Option<Vec<u8>> {
        let id = self.correlation_id()?;
        match BASE64.decode(id.as_bytes()) {
            Ok(bytes) => Some(bytes),
            Err(_) => Some(id.into_bytes()),
        }
    }

    pub fn reply_to(&self) -> Option<Destination> {
        self.header_as(HeaderName::ReplyTo, |v| v.as_destination().map(Some), None)
    }

    pub fn destination(&self) -> Option<Destination> {
        self.header_as(HeaderName::Destination, |v| v.as_destination().map(Some), None)
    }

    pub fn delivery_mode(&self) -> i32 {
        self.header_as(HeaderName::DeliveryMode, HeaderValue::as_i32, 0)
    }

    pub fn redelivered(&self) -> bool {
        self.header_as(HeaderName::Redelivered, HeaderValue::as_bool, false)
    }

    pub fn jms_type(&self) -> Option<String> {
        self.header_as(HeaderName::Type, |v| v.as_string().map(Some), None)
    }

    pub fn expiration(&self) -> i64 {
        self.header_as(HeaderName::Expiration, HeaderValue::as_i64, 0)
    }

    pub fn priority(&self) -> i32 {
        self.header_as(HeaderName::Priority, HeaderValue::as_i32, 5)
    }

    pub fn delivery_time(&self) -> Result<i64> {
        Err(JmsError::NotImplemented("delivery time"))
    }

    pub fn set_message_id(&mut self, _id: &str) -> Result<()> {
        Err(provider_assigned(HeaderName::MessageId))
    }

    pub fn set_timestamp(&mut self, _timestamp: i64) -> Result<()> {
        Err(provider_assigned(HeaderName::Timestamp))
    }

    pub fn set_correlation_id(&mut self, _id: &str) -> Result<()> {
        Err(provider_assigned(HeaderName::CorrelationId))
    }

    /// Store `id` base64 encoded as the correlation id.
    pub fn set_correlation_id_as_bytes(&mut self, id: &[u8]) {
        self.set_header(HeaderName::CorrelationId, BASE64.encode(id));
    }

    pub fn set_reply_to(&mut self, _reply_to: Destination) -> Result<()> {
        Err(provider_assigned(HeaderName::ReplyTo))
    }

    pub fn set_destination(&mut self, _destination: Destination) -> Result<()> {
        Err(provider_assigned(HeaderName::Destination))
    }

    pub fn set_delivery_mode(&mut self, _mode: i32) -> Result<()> {
        Err(provider_assigned(HeaderName::DeliveryMode))
    }

    pub fn set_redelivered(&mut self, _redelivered: bool) -> Result<()> {
        Err(provider_assigned(HeaderName::Redelivered))
    }

    pub fn set_jms_type(&mut self, _ty: &str) -> Result<()> {
        Err(provider_assigned(HeaderName::Type))
    }

    pub fn set_expiration(&mut self, _expiration: i64) -> Result<()> {
        Err(provider_assigned(HeaderName::Expiration))
    }

    pub fn set_priority(&mut self, _priority: i32) -> Result<()> {
        Err(provider_assigned(HeaderName::Priority))
    }

    pub fn set_delivery_time(&mut self, _delivery_time: i64) -> Result<()> {
        Err(JmsError::NotImplemented("delivery time"))
    }

    /// Acknowledgement happens out of band in the consumer.
    pub fn acknowledge(&self) -> Result<()> {
        Err(JmsError::UnsupportedOperation(
            "acknowledge is not supported on this message".into(),
        ))
    }

    // ---------------------------------------------------------------------
    // Properties
    // ---------------------------------------------------------------------

    pub fn property_exists(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn clear_properties(&mut self) {
        self.properties.clear();
    }

    /// Read a property as `T`, or `T::zero()` when absent.
    pub fn get_property<T: FromProperty>(&self, name: &str) -> Result<T> {
        match self.properties.get(name) {
            Some(value) => property::coerce(name, value),
            None => Ok(T::zero()),
        }
    }

    /// Like `get_property::<String>` but distinguishes an absent property.
    pub fn get_string_property(&self, name: &str) -> Option<String> {
        self.properties.get(name).map(ToString::to_string)
    }

    pub fn get_object_property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(name.into(), value.into());
    }

    /// Dynamically typed setter; rejects anything but booleans, numbers and
    /// strings.
    pub fn set_object_property(&mut self, name: impl Into<String>, value: &Value) -> Result<()> {
        let value = PropertyValue::from_json(value)?;
        self.properties.insert(name.into(), value);
        Ok(())
    }

    /// Snapshot of the property names at call time.
    pub fn property_names(&self) -> PropertyNames {
        let names: Vec<String> = self.properties.keys().cloned().collect();
        PropertyNames {
            inner: names.into_iter(),
        }
    }

    // ---------------------------------------------------------------------
    // Body
    // ---------------------------------------------------------------------

    pub fn get_body<T: FromBody>(&self) -> Result<T> {
        self.body
            .as_ref()
            .and_then(T::from_body)
            .ok_or_else(|| {
                JmsError::InvalidArgument(format!(
                    "the type {} is unknown to this message body",
                    T::TYPE_NAME
                ))
            })
    }

    pub fn is_body_assignable_to<T: FromBody>(&self) -> bool {
        self.body.as_ref().and_then(T::from_body).is_some()
    }

    pub fn set_body(&mut self, body: Body) -> Result<()> {
        self.check_is_write_only()?;
        self.body = Some(body);
        Ok(())
    }

    pub fn set_object_body<T: Serialize>(&mut self, value: &T) -> Result<()> {
        self.check_is_write_only()?;
        self.body = Some(Body::Object(to_object(value)?));
        Ok(())
    }

    /// Drop the body and make the message writable again.
    pub fn clear_body(&mut self) {
        self.body = None;
        self.write_only = true;
    }

    pub fn check_is_write_only(&self) -> Result<()> {
        if self.write_only {
            Ok(())
        } else {
            Err(JmsError::NotWritable)
        }
    }
}

fn provider_assigned(name: HeaderName) -> JmsError {
    JmsError::UnsupportedOperation(format!("{name} is assigned by the provider"))
}

fn to_object<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|e| JmsError::InvalidArgument(format!("object body not serializable: {e}")))
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut headers: Vec<_> = self.headers.iter().collect();
        headers.sort_by_key(|(k, _)| **k);
        let mut properties: Vec<_> = self.properties.iter().collect();
        properties.sort_by(|a, b| a.0.cmp(b.0));

        f.debug_struct("Message")
            .field("headers", &headers)
            .field("properties", &properties)
            .field("body", &self.body.as_ref().map(|b| b.kind()))
            .field("write_only", &self.write_only)
            .finish()
    }
}

/// Forward-only iterator over a snapshot of property names.
#[derive(Debug)]
pub struct PropertyNames {
    inner: std::vec::IntoIter<String>,
}

impl Iterator for PropertyNames {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for PropertyNames {}

impl FusedIterator for PropertyNames {}
