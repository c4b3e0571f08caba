//! Message producer: stamps provider-assigned headers and hands the message
//! to the transport.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use mqjms_core::error::{JmsError, Result};
use mqjms_core::{Destination, HeaderName, Message};

use crate::codec;
use crate::config::ProducerSection;
use crate::transport::Transport;

/// Per-send overrides of the configured producer defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct SendOptions {
    pub delivery_mode: Option<i32>,
    pub priority: Option<i32>,
    pub time_to_live_ms: Option<u64>,
}

pub struct Producer {
    transport: Arc<dyn Transport>,
    destination: Destination,
    defaults: ProducerSection,
    group: String,
    seq: Arc<AtomicU64>,
}

impl Producer {
    pub(crate) fn new(
        transport: Arc<dyn Transport>,
        destination: Destination,
        defaults: ProducerSection,
        group: String,
        seq: Arc<AtomicU64>,
    ) -> Self {
        Self {
            transport,
            destination,
            defaults,
            group,
            seq,
        }
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub async fn send(&self, msg: &mut Message) -> Result<()> {
        self.send_with(msg, SendOptions::default()).await
    }

    /// Send `msg`. On success the provider-assigned headers are written back
    /// onto it and it becomes read-only; on failure it is left untouched.
    pub async fn send_with(&self, msg: &mut Message, opts: SendOptions) -> Result<()> {
        let delivery_mode = opts
            .delivery_mode
            .unwrap_or(i32::from(self.defaults.delivery_mode));
        if !matches!(delivery_mode, 1 | 2) {
            return Err(JmsError::InvalidArgument(format!(
                "delivery mode must be 1 or 2, got {delivery_mode}"
            )));
        }
        let priority = opts.priority.unwrap_or(i32::from(self.defaults.priority));
        if !(0..=9).contains(&priority) {
            return Err(JmsError::InvalidArgument(format!(
                "priority must be between 0 and 9, got {priority}"
            )));
        }
        let ttl = opts.time_to_live_ms.unwrap_or(self.defaults.time_to_live_ms);
        let ttl = i64::try_from(ttl)
            .map_err(|_| JmsError::InvalidArgument(format!("time to live too large: {ttl}")))?;

        let timestamp = now_millis();
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        let msg_id = format!("ID:{}-{:X}-{}", self.group, timestamp, seq);

        let mut stamped = msg.clone();
        stamped.set_header(HeaderName::MessageId, msg_id.as_str());
        stamped.set_header(HeaderName::Timestamp, timestamp);
        stamped.set_header(HeaderName::Destination, self.destination.clone());
        stamped.set_header(HeaderName::DeliveryMode, delivery_mode);
        stamped.set_header(HeaderName::Priority, priority);
        let expiration = if ttl > 0 { timestamp.saturating_add(ttl) } else { 0 };
        stamped.set_header(HeaderName::Expiration, expiration);

        let vm = codec::encode(&stamped, &self.destination)?;
        self.transport.send(vm).await?;

        stamped.set_read_only();
        *msg = stamped;

        tracing::debug!(
            destination = %self.destination,
            msg_id = %msg_id,
            priority,
            "message sent"
        );
        Ok(())
    }
}

pub(crate) fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}
