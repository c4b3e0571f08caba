//! Message model (headers + properties + body).
//!
//! - `header`: reserved, provider-assigned fields and their loose values.
//! - `property`: user properties as a closed tagged union with explicit
//!   string round-trip coercion.
//! - `body`: typed payload variants (text, bytes, map, object).
//! - `envelope`: the `Message` itself and its write-only/read-only lifecycle.

pub mod body;
pub mod destination;
pub mod envelope;
pub mod header;
pub mod property;

pub use body::{Body, BodyKind, FromBody, MapBody};
pub use destination::Destination;
pub use envelope::{Message, PropertyNames};
pub use header::{HeaderName, HeaderValue};
pub use property::{FromProperty, PropertyValue};
