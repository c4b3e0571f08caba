//! mqjms core: the message envelope exposed through the standard messaging API.
//!
//! This crate defines the header, property and body model of a message and
//! the write-only/read-only lifecycle that guards it. It carries no transport
//! or runtime dependencies; the client crate maps envelopes onto the queue
//! client's own message representation.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here.
//! All fallible paths surface as `JmsError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod message;

/// Shared result type.
pub use error::{ErrorCode, JmsError, Result};
pub use message::{Body, Destination, HeaderName, HeaderValue, Message, PropertyValue};
