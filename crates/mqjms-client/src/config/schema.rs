use std::collections::HashSet;

use serde::Deserialize;
use mqjms_core::error::{JmsError, Result};
use mqjms_core::Destination;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default)]
    pub client: ClientSection,

    #[serde(default)]
    pub producer: ProducerSection,

    #[serde(default)]
    pub destinations: Vec<DestinationConfig>,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(JmsError::InvalidConfig(format!(
                "unsupported config version: {}",
                self.version
            )));
        }
        if self.destinations.is_empty() {
            return Err(JmsError::InvalidConfig("destinations must not be empty".into()));
        }

        let mut seen = HashSet::new();
        for d in &self.destinations {
            if d.name.trim().is_empty() {
                return Err(JmsError::InvalidConfig("destination name must not be empty".into()));
            }
            if !seen.insert(d.name.as_str()) {
                return Err(JmsError::InvalidConfig(format!(
                    "duplicate destination: {}",
                    d.name
                )));
            }
        }

        self.client.validate()?;
        self.producer.validate()?;

        Ok(())
    }

    pub fn find_destination(&self, name: &str) -> Option<&DestinationConfig> {
        self.destinations.iter().find(|d| d.name == name)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    /// Producer/consumer group; prefixes generated message ids.
    #[serde(default = "default_group")]
    pub group: String,
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            group: default_group(),
        }
    }
}

impl ClientSection {
    pub fn validate(&self) -> Result<()> {
        if self.group.trim().is_empty() {
            return Err(JmsError::InvalidConfig("client.group must not be empty".into()));
        }
        Ok(())
    }
}

fn default_group() -> String {
    "mqjms".into()
}

/// Defaults stamped on every sent message unless overridden per send.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProducerSection {
    /// 1 = non-persistent, 2 = persistent.
    #[serde(default = "default_delivery_mode")]
    pub delivery_mode: u8,

    #[serde(default = "default_priority")]
    pub priority: u8,

    /// 0 = never expires.
    #[serde(default)]
    pub time_to_live_ms: u64,
}

impl Default for ProducerSection {
    fn default() -> Self {
        Self {
            delivery_mode: default_delivery_mode(),
            priority: default_priority(),
            time_to_live_ms: 0,
        }
    }
}

impl ProducerSection {
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.delivery_mode, 1 | 2) {
            return Err(JmsError::InvalidConfig(
                "producer.delivery_mode must be 1 (non-persistent) or 2 (persistent)".into(),
            ));
        }
        if self.priority > 9 {
            return Err(JmsError::InvalidConfig(
                "producer.priority must be between 0 and 9".into(),
            ));
        }
        Ok(())
    }
}

fn default_delivery_mode() -> u8 {
    2
}
fn default_priority() -> u8 {
    4
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationKind {
    #[default]
    Queue,
    Topic,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DestinationConfig {
    pub name: String,
    #[serde(default)]
    pub kind: DestinationKind,
}

impl DestinationConfig {
    pub fn to_destination(&self) -> Destination {
        match self.kind {
            DestinationKind::Queue => Destination::queue(self.name.clone()),
            DestinationKind::Topic => Destination::topic(self.name.clone()),
        }
    }
}
