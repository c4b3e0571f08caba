//! Transport seam between producers/consumers and a broker client.
//!
//! The trait is async so a networked client can slot in; the bundled
//! `InMemoryTransport` completes immediately.

mod memory;

use async_trait::async_trait;

use mqjms_core::error::Result;

use crate::vendor::VendorMessage;

pub use memory::InMemoryTransport;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Hand a message to the broker.
    async fn send(&self, msg: VendorMessage) -> Result<()>;

    /// Next message for `topic`, if any.
    async fn poll(&self, topic: &str) -> Result<Option<VendorMessage>>;

    /// Return a consumed message for redelivery, bumping its reconsume count.
    async fn requeue(&self, msg: VendorMessage) -> Result<()>;
}
