//! Correlation id byte vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use mqjms_core::{HeaderName, Message};

use vector_loader::{decode_hex, load, CorrelationVector};

#[test]
fn correlation_id_vectors() {
    let vectors: Vec<CorrelationVector> = load("correlation_ids.json");

    for v in vectors {
        let mut msg = Message::new();
        match (&v.bytes_hex, &v.stored) {
            (Some(h), None) => msg.set_correlation_id_as_bytes(&decode_hex(h)),
            (None, Some(s)) => msg.set_header(HeaderName::CorrelationId, s.as_str()),
            _ => panic!("vector must set exactly one of bytes_hex/stored: {}", v.description),
        }

        let got = msg.correlation_id_as_bytes().expect("correlation id present");
        assert_eq!(got, decode_hex(&v.expect_hex), "vector={}", v.description);
    }
}

#[test]
fn bytes_are_stored_base64_encoded() {
    let mut msg = Message::new();
    msg.set_correlation_id_as_bytes(&[1, 2, 3]);
    assert_eq!(msg.correlation_id().as_deref(), Some("AQID"));
}

#[test]
fn absent_correlation_id_has_no_bytes() {
    let msg = Message::new();
    assert!(msg.correlation_id().is_none());
    assert!(msg.correlation_id_as_bytes().is_none());
}
