use std::collections::VecDeque;

use async_trait::async_trait;
use dashmap::DashMap;

use mqjms_core::error::{JmsError, Result};

use super::Transport;
use crate::vendor::VendorMessage;

/// Per-topic FIFO queues held in process. Every topic behaves point-to-point:
/// each message is polled once.
#[derive(Default)]
pub struct InMemoryTransport {
    queues: DashMap<String, VecDeque<VendorMessage>>,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self {
            queues: DashMap::new(),
        }
    }

    /// Number of messages waiting on `topic`.
    pub fn pending(&self, topic: &str) -> usize {
        self.queues.get(topic).map(|q| q.len()).unwrap_or(0)
    }

    /// Number of topics currently holding messages.
    pub fn topic_count(&self) -> usize {
        self.queues.len()
    }

    fn push(&self, msg: VendorMessage) -> Result<()> {
        if msg.topic.is_empty() {
            return Err(JmsError::Transport("message has no topic".into()));
        }
        self.queues
            .entry(msg.topic.clone())
            .or_default()
            .push_back(msg);
        Ok(())
    }
}

#[async_trait]
impl Transport for InMemoryTransport {
    async fn send(&self, msg: VendorMessage) -> Result<()> {
        self.push(msg)
    }

    async fn poll(&self, topic: &str) -> Result<Option<VendorMessage>> {
        let msg = self.queues.get_mut(topic).and_then(|mut q| q.pop_front());
        // The shard guard above is released before this takes its own.
        self.queues.remove_if(topic, |_, q| q.is_empty());
        Ok(msg)
    }

    async fn requeue(&self, mut msg: VendorMessage) -> Result<()> {
        msg.reconsume_times = msg.reconsume_times.saturating_add(1);
        self.push(msg)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn vm(topic: &str) -> VendorMessage {
        VendorMessage {
            topic: topic.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn drained_topics_are_dropped() {
        let t = InMemoryTransport::new();
        t.send(vm("a")).await.unwrap();
        t.send(vm("a")).await.unwrap();
        t.send(vm("b")).await.unwrap();
        assert_eq!(t.topic_count(), 2);

        assert!(t.poll("a").await.unwrap().is_some());
        assert_eq!(t.topic_count(), 2);
        assert!(t.poll("a").await.unwrap().is_some());
        assert_eq!(t.topic_count(), 1);
        assert_eq!(t.pending("a"), 0);

        assert!(t.poll("a").await.unwrap().is_none());
        assert!(t.poll("missing").await.unwrap().is_none());
        assert_eq!(t.topic_count(), 1);
    }

    #[tokio::test]
    async fn requeue_counts_redeliveries() {
        let t = InMemoryTransport::new();
        t.requeue(vm("a")).await.unwrap();
        assert_eq!(t.poll("a").await.unwrap().unwrap().reconsume_times, 1);
        assert!(t.send(vm("")).await.is_err());
    }
}
