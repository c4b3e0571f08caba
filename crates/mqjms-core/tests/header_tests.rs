//! Reserved header behaviour.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use mqjms_core::{Destination, ErrorCode, HeaderName, HeaderValue, Message};

#[test]
fn fresh_message_reports_defaults() {
    let msg = Message::new();
    assert_eq!(msg.priority(), 5);
    assert!(!msg.redelivered());
    assert_eq!(msg.timestamp(), 0);
    assert_eq!(msg.expiration(), 0);
    assert_eq!(msg.delivery_mode(), 0);
    assert!(msg.message_id().is_none());
    assert!(msg.destination().is_none());
    assert!(msg.reply_to().is_none());
    assert!(msg.jms_type().is_none());

    assert_eq!(msg.get_header(HeaderName::Priority), HeaderValue::Int(5));
    assert_eq!(msg.get_header(HeaderName::Redelivered), HeaderValue::Bool(false));
    assert_eq!(msg.get_header(HeaderName::Timestamp), HeaderValue::Long(0));
    assert_eq!(msg.get_header(HeaderName::MessageId), HeaderValue::Null);
}

#[test]
fn every_user_header_setter_is_unsupported() {
    let mut msg = Message::new();
    let results = [
        msg.set_message_id("ID:1"),
        msg.set_timestamp(1),
        msg.set_correlation_id("c"),
        msg.set_reply_to(Destination::queue("replies")),
        msg.set_destination(Destination::topic("t")),
        msg.set_delivery_mode(2),
        msg.set_redelivered(true),
        msg.set_jms_type("t"),
        msg.set_expiration(10),
        msg.set_priority(9),
    ];
    for r in results {
        assert_eq!(r.unwrap_err().code(), ErrorCode::UnsupportedOperation);
    }
    assert!(msg.headers().is_empty());
}

#[test]
fn delivery_time_is_not_implemented() {
    let mut msg = Message::new();
    assert_eq!(msg.delivery_time().unwrap_err().code(), ErrorCode::NotImplemented);
    assert_eq!(
        msg.set_delivery_time(5).unwrap_err().code(),
        ErrorCode::NotImplemented
    );
}

#[test]
fn acknowledge_is_unsupported() {
    let msg = Message::new();
    assert_eq!(msg.acknowledge().unwrap_err().code(), ErrorCode::UnsupportedOperation);
}

#[test]
fn transport_headers_are_coerced() {
    let mut msg = Message::new();
    msg.set_header(HeaderName::MessageId, "ID:0A1B");
    msg.set_header(HeaderName::Timestamp, "1700000000000");
    msg.set_header(HeaderName::Priority, 7i64);
    msg.set_header(HeaderName::DeliveryMode, "2");
    msg.set_header(HeaderName::Redelivered, "True");
    msg.set_header(HeaderName::Destination, "topic://orders");
    msg.set_header(HeaderName::ReplyTo, Destination::queue("replies"));
    msg.set_header(HeaderName::Type, "order.created");

    assert_eq!(msg.message_id().as_deref(), Some("ID:0A1B"));
    assert_eq!(msg.timestamp(), 1_700_000_000_000);
    assert_eq!(msg.priority(), 7);
    assert_eq!(msg.delivery_mode(), 2);
    assert!(msg.redelivered());
    assert_eq!(msg.destination(), Some(Destination::topic("orders")));
    assert_eq!(msg.reply_to(), Some(Destination::queue("replies")));
    assert_eq!(msg.jms_type().as_deref(), Some("order.created"));
    assert!(msg.header_exists(HeaderName::Type));
}

#[test]
fn uncoercible_header_falls_back_to_default() {
    let mut msg = Message::new();
    msg.set_header(HeaderName::Priority, "high");
    msg.set_header(HeaderName::Timestamp, true);
    msg.set_header(HeaderName::Destination, "nowhere");
    assert_eq!(msg.priority(), 5);
    assert_eq!(msg.timestamp(), 0);
    assert!(msg.destination().is_none());
}

#[test]
fn header_names_round_trip_through_keys() {
    for name in HeaderName::ALL {
        let parsed: HeaderName = name.as_str().parse().unwrap();
        assert_eq!(parsed, name);
    }
    let err = "JMSBogus".parse::<HeaderName>().unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidArgument);
}
