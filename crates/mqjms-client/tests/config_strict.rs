#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use mqjms_client::config::{self, DestinationKind};
use mqjms_core::Destination;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
producer:
  priorty: 3 # typo should fail
destinations:
  - name: "orders"
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "INVALID_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
destinations:
  - name: "orders"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.client.group, "mqjms");
    assert_eq!(cfg.producer.delivery_mode, 2);
    assert_eq!(cfg.producer.priority, 4);
    assert_eq!(cfg.producer.time_to_live_ms, 0);
    assert_eq!(cfg.destinations[0].kind, DestinationKind::Queue);
    assert_eq!(cfg.destinations[0].to_destination(), Destination::queue("orders"));
}

#[test]
fn topic_kind_parses() {
    let ok = r#"
version: 1
destinations:
  - name: "audit"
    kind: topic
"#;
    let cfg = config::load_from_str(ok).unwrap();
    assert_eq!(cfg.destinations[0].to_destination(), Destination::topic("audit"));
}

#[test]
fn rejects_invalid_values() {
    let cases = [
        "version: 2\ndestinations:\n  - name: q\n",
        "version: 1\ndestinations: []\n",
        "version: 1\ndestinations:\n  - name: q\n  - name: q\n",
        "version: 1\ndestinations:\n  - name: \"\"\n",
        "version: 1\nproducer:\n  delivery_mode: 3\ndestinations:\n  - name: q\n",
        "version: 1\nproducer:\n  priority: 10\ndestinations:\n  - name: q\n",
        "version: 1\nclient:\n  group: \" \"\ndestinations:\n  - name: q\n",
    ];
    for c in cases {
        let err = config::load_from_str(c).expect_err(c);
        assert_eq!(err.code().as_str(), "INVALID_CONFIG", "case={c}");
    }
}

#[test]
fn missing_file_is_internal() {
    let err = config::load_from_file("does/not/exist.yaml").unwrap_err();
    assert_eq!(err.code().as_str(), "INTERNAL");
}
