//! mqjms client library entry.
//!
//! This crate is the transport layer around the core message envelope: it
//! loads the client config, maps envelopes onto the queue client's message
//! representation, and wires producers and consumers onto a `Transport`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod client;
pub mod codec;
pub mod config;
pub mod consumer;
pub mod producer;
pub mod transport;
pub mod vendor;

pub use client::Client;
pub use consumer::Consumer;
pub use producer::{Producer, SendOptions};
pub use transport::{InMemoryTransport, Transport};
pub use vendor::VendorMessage;
