//! Message consumer bound to one destination.

use std::sync::Arc;

use mqjms_core::error::Result;
use mqjms_core::{Destination, Message};

use crate::codec;
use crate::producer::now_millis;
use crate::transport::Transport;

pub struct Consumer {
    transport: Arc<dyn Transport>,
    destination: Destination,
}

impl Consumer {
    pub(crate) fn new(transport: Arc<dyn Transport>, destination: Destination) -> Self {
        Self {
            transport,
            destination,
        }
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    /// Next unexpired message, read-only, or `None` when the destination is
    /// drained. Expired messages are discarded.
    pub async fn receive(&self) -> Result<Option<Message>> {
        loop {
            let Some(vm) = self.transport.poll(self.destination.name()).await? else {
                return Ok(None);
            };
            let msg = codec::decode(vm);

            let expiration = msg.expiration();
            if expiration != 0 && expiration <= now_millis() {
                tracing::debug!(
                    destination = %self.destination,
                    msg_id = ?msg.message_id(),
                    expiration,
                    "dropping expired message"
                );
                continue;
            }

            tracing::debug!(
                destination = %self.destination,
                msg_id = ?msg.message_id(),
                redelivered = msg.redelivered(),
                "message received"
            );
            return Ok(Some(msg));
        }
    }

    /// Hand a received message back for redelivery.
    pub async fn recover(&self, msg: &Message) -> Result<()> {
        let vm = codec::encode(msg, &self.destination)?;
        self.transport.requeue(vm).await
    }
}
