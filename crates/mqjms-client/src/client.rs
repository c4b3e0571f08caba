//! Client assembly: config + transport -> producers and consumers.

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use mqjms_core::error::{JmsError, Result};
use mqjms_core::Destination;

use crate::config::ClientConfig;
use crate::consumer::Consumer;
use crate::producer::Producer;
use crate::transport::Transport;

#[derive(Clone)]
pub struct Client {
    cfg: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
    seq: Arc<AtomicU64>,
}

impl Client {
    /// `cfg` is expected to be validated (see `config::load_from_str`).
    pub fn new(cfg: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            cfg: Arc::new(cfg),
            transport,
            seq: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.cfg
    }

    /// Resolve a configured destination by name.
    pub fn destination(&self, name: &str) -> Result<Destination> {
        self.cfg
            .find_destination(name)
            .map(|d| d.to_destination())
            .ok_or_else(|| JmsError::InvalidArgument(format!("unknown destination: {name}")))
    }

    pub fn create_producer(&self, name: &str) -> Result<Producer> {
        let destination = self.destination(name)?;
        Ok(Producer::new(
            Arc::clone(&self.transport),
            destination,
            self.cfg.producer.clone(),
            self.cfg.client.group.clone(),
            Arc::clone(&self.seq),
        ))
    }

    pub fn create_consumer(&self, name: &str) -> Result<Consumer> {
        let destination = self.destination(name)?;
        Ok(Consumer::new(Arc::clone(&self.transport), destination))
    }
}
