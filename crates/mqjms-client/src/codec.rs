//! Envelope <-> vendor message mapping.
//!
//! - type -> `tags`, correlation id -> `keys`, message id -> `msg_id`,
//!   timestamp -> `born_timestamp`, redelivered <- `reconsume_times > 0`
//! - destination, reply-to, delivery mode, priority and expiration travel as
//!   system properties keyed by their header names
//! - user properties travel as strings; reads coerce them back on demand
//! - the body kind travels as a system property next to the payload bytes
//!
//! Decoding never fails: a payload that does not match its declared kind is
//! delivered as raw bytes, so a consumer never loses a polled message.

use std::collections::HashMap;

use bytes::Bytes;

use mqjms_core::error::{JmsError, Result};
use mqjms_core::message::{Body, BodyKind, MapBody};
use mqjms_core::{Destination, HeaderName, Message, PropertyValue};

use crate::vendor::VendorMessage;

/// System property holding the body kind.
pub const BODY_KIND_KEY: &str = "MQJMS_BODY_KIND";

const SYSTEM_HEADERS: [HeaderName; 4] = [
    HeaderName::ReplyTo,
    HeaderName::DeliveryMode,
    HeaderName::Priority,
    HeaderName::Expiration,
];

/// Map an outgoing envelope onto a vendor message for `dest`.
pub fn encode(msg: &Message, dest: &Destination) -> Result<VendorMessage> {
    let mut system_properties = HashMap::new();
    system_properties.insert(HeaderName::Destination.as_str().to_owned(), dest.to_string());
    for name in SYSTEM_HEADERS {
        if let Some(s) = msg.header(name).and_then(|v| v.as_string()) {
            system_properties.insert(name.as_str().to_owned(), s);
        }
    }

    let body = match msg.body() {
        Some(body) => {
            system_properties.insert(BODY_KIND_KEY.to_owned(), body.kind().as_str().to_owned());
            encode_body(body)?
        }
        None => Bytes::new(),
    };

    let user_properties = msg
        .properties()
        .iter()
        .map(|(k, v)| (k.clone(), v.to_string()))
        .collect();

    Ok(VendorMessage {
        topic: dest.name().to_owned(),
        tags: msg.jms_type(),
        keys: msg.correlation_id(),
        user_properties,
        system_properties,
        body,
        msg_id: msg.message_id(),
        born_timestamp: msg.timestamp(),
        reconsume_times: 0,
    })
}

/// Materialize a received vendor message as a read-only envelope.
pub fn decode(vm: VendorMessage) -> Message {
    let mut msg = Message::new();

    if let Some(id) = vm.msg_id {
        msg.set_header(HeaderName::MessageId, id);
    }
    msg.set_header(HeaderName::Timestamp, vm.born_timestamp);

    let destination = match vm.system_properties.get(HeaderName::Destination.as_str()) {
        Some(s) => s.parse::<Destination>().unwrap_or_else(|e| {
            tracing::warn!(destination = %s, error = %e, "invalid destination, using topic");
            Destination::queue(vm.topic.clone())
        }),
        None => Destination::queue(vm.topic.clone()),
    };
    msg.set_header(HeaderName::Destination, destination);

    if let Some(tags) = vm.tags {
        msg.set_header(HeaderName::Type, tags);
    }
    if let Some(keys) = vm.keys {
        msg.set_header(HeaderName::CorrelationId, keys);
    }
    for name in SYSTEM_HEADERS {
        if let Some(s) = vm.system_properties.get(name.as_str()) {
            msg.set_header(name, s.as_str());
        }
    }
    msg.set_header(HeaderName::Redelivered, vm.reconsume_times > 0);

    let properties = vm
        .user_properties
        .into_iter()
        .map(|(k, v)| (k, PropertyValue::String(v)))
        .collect();
    msg.set_properties(properties);

    let body = match vm.system_properties.get(BODY_KIND_KEY) {
        Some(kind) => Some(decode_body(kind, vm.body)),
        None if vm.body.is_empty() => None,
        None => Some(Body::Bytes(vm.body)),
    };
    msg.deliver_body(body);

    msg
}

fn encode_body(body: &Body) -> Result<Bytes> {
    match body {
        Body::Text(s) => Ok(Bytes::from(s.clone().into_bytes())),
        Body::Bytes(b) => Ok(b.clone()),
        Body::Map(m) => {
            check_finite(m)?;
            serde_json::to_vec(m)
                .map(Bytes::from)
                .map_err(|e| JmsError::Internal(format!("map body encode failed: {e}")))
        }
        Body::Object(v) => serde_json::to_vec(v)
            .map(Bytes::from)
            .map_err(|e| JmsError::Internal(format!("object body encode failed: {e}"))),
    }
}

// JSON has no NaN or infinity; serde_json would write them as null.
fn check_finite(m: &MapBody) -> Result<()> {
    for (k, v) in m {
        let finite = match v {
            PropertyValue::Float(f) => f.is_finite(),
            PropertyValue::Double(f) => f.is_finite(),
            _ => true,
        };
        if !finite {
            return Err(JmsError::InvalidArgument(format!(
                "map body entry {k} is not a finite number: {v}"
            )));
        }
    }
    Ok(())
}

fn decode_body(kind: &str, payload: Bytes) -> Body {
    let kind: BodyKind = match kind.parse() {
        Ok(k) => k,
        Err(_) => {
            tracing::warn!(kind = %kind, "unknown body kind, delivering raw bytes");
            return Body::Bytes(payload);
        }
    };

    let decoded = match kind {
        BodyKind::Text => std::str::from_utf8(&payload)
            .map(|s| Body::Text(s.to_owned()))
            .map_err(|e| e.to_string()),
        BodyKind::Bytes => return Body::Bytes(payload),
        BodyKind::Map => serde_json::from_slice::<MapBody>(&payload)
            .map(Body::Map)
            .map_err(|e| e.to_string()),
        BodyKind::Object => serde_json::from_slice(&payload)
            .map(Body::Object)
            .map_err(|e| e.to_string()),
    };

    decoded.unwrap_or_else(|error| {
        tracing::warn!(kind = %kind, %error, "undecodable body, delivering raw bytes");
        Body::Bytes(payload)
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn headers_and_properties_survive_mapping() {
        let dest = Destination::topic("orders");
        let mut msg = Message::text("payload");
        msg.set_header(HeaderName::MessageId, "ID:1");
        msg.set_header(HeaderName::Timestamp, 42i64);
        msg.set_header(HeaderName::Priority, 8i32);
        msg.set_header(HeaderName::Type, "created");
        msg.set_header(HeaderName::ReplyTo, Destination::queue("replies"));
        msg.set_correlation_id_as_bytes(b"corr");
        msg.set_property("qty", 3i32);

        let vm = encode(&msg, &dest).unwrap();
        assert_eq!(vm.topic, "orders");
        assert_eq!(vm.tags.as_deref(), Some("created"));
        assert_eq!(vm.user_properties["qty"], "3");

        let got = decode(vm);
        assert!(!got.is_write_only());
        assert_eq!(got.message_id().as_deref(), Some("ID:1"));
        assert_eq!(got.timestamp(), 42);
        assert_eq!(got.priority(), 8);
        assert_eq!(got.destination(), Some(dest));
        assert_eq!(got.reply_to(), Some(Destination::queue("replies")));
        assert_eq!(got.correlation_id_as_bytes().unwrap(), b"corr");
        assert_eq!(got.get_property::<i32>("qty").unwrap(), 3);
        assert_eq!(got.get_body::<String>().unwrap(), "payload");
        assert!(!got.redelivered());
    }

    #[test]
    fn map_body_keeps_entry_kinds() {
        let mut entries = MapBody::new();
        entries.insert("n".into(), PropertyValue::Short(2));
        entries.insert("s".into(), PropertyValue::String("x".into()));
        let msg = Message::map(entries.clone());

        let got = decode(encode(&msg, &Destination::queue("q")).unwrap());
        assert_eq!(got.get_body::<MapBody>().unwrap(), entries);
    }

    #[test]
    fn non_finite_map_entries_are_rejected() {
        for bad in [
            PropertyValue::Double(f64::NAN),
            PropertyValue::Double(f64::INFINITY),
            PropertyValue::Float(f32::NEG_INFINITY),
        ] {
            let mut entries = MapBody::new();
            entries.insert("x".into(), bad);
            let err = encode(&Message::map(entries), &Destination::queue("q")).unwrap_err();
            assert_eq!(err.code().as_str(), "INVALID_ARGUMENT");
        }
    }

    #[test]
    fn undecodable_payloads_deliver_bytes() {
        for kind in ["text", "map", "object"] {
            let mut vm = VendorMessage {
                topic: "q".into(),
                body: Bytes::from_static(b"\xff\xfe"),
                ..Default::default()
            };
            vm.system_properties.insert(BODY_KIND_KEY.into(), kind.into());
            let got = decode(vm);
            assert_eq!(got.get_body::<Vec<u8>>().unwrap(), vec![0xff, 0xfe], "kind={kind}");
            assert!(!got.is_write_only());
        }
    }

    #[test]
    fn invalid_destination_falls_back_to_topic() {
        let mut vm = VendorMessage {
            topic: "q".into(),
            ..Default::default()
        };
        vm.system_properties
            .insert(HeaderName::Destination.as_str().into(), "nowhere".into());
        assert_eq!(decode(vm).destination(), Some(Destination::queue("q")));
    }

    #[test]
    fn unknown_body_kind_delivers_bytes() {
        let mut vm = VendorMessage {
            topic: "q".into(),
            body: Bytes::from_static(b"\x01\x02"),
            ..Default::default()
        };
        vm.system_properties.insert(BODY_KIND_KEY.into(), "stream".into());
        let got = decode(vm);
        assert_eq!(got.get_body::<Vec<u8>>().unwrap(), vec![1, 2]);
        assert_eq!(got.destination(), Some(Destination::queue("q")));
    }

    #[test]
    fn empty_payload_without_kind_has_no_body() {
        let vm = VendorMessage {
            topic: "q".into(),
            reconsume_times: 2,
            ..Default::default()
        };
        let got = decode(vm);
        assert!(got.body().is_none());
        assert!(got.redelivered());
    }
}
