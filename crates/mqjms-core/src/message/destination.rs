//! Message destinations (point-to-point queues and pub/sub topics).

use std::fmt;
use std::str::FromStr;

use crate::error::{JmsError, Result};

const QUEUE_SCHEME: &str = "queue://";
const TOPIC_SCHEME: &str = "topic://";

/// Where a message is sent to, or where replies should go.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Destination {
    Queue(String),
    Topic(String),
}

impl Destination {
    pub fn queue(name: impl Into<String>) -> Self {
        Destination::Queue(name.into())
    }

    pub fn topic(name: impl Into<String>) -> Self {
        Destination::Topic(name.into())
    }

    /// Bare destination name (the vendor topic).
    pub fn name(&self) -> &str {
        match self {
            Destination::Queue(n) | Destination::Topic(n) => n,
        }
    }

    pub fn is_topic(&self) -> bool {
        matches!(self, Destination::Topic(_))
    }
}

/// Rendered as `queue://name` or `topic://name`.
impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Queue(n) => write!(f, "{QUEUE_SCHEME}{n}"),
            Destination::Topic(n) => write!(f, "{TOPIC_SCHEME}{n}"),
        }
    }
}

impl FromStr for Destination {
    type Err = JmsError;

    fn from_str(s: &str) -> Result<Self> {
        let parsed = if let Some(n) = s.strip_prefix(QUEUE_SCHEME) {
            Destination::queue(n)
        } else if let Some(n) = s.strip_prefix(TOPIC_SCHEME) {
            Destination::topic(n)
        } else {
            return Err(JmsError::InvalidArgument(format!(
                "invalid destination: {s} (expected queue://name or topic://name)"
            )));
        };
        if parsed.name().is_empty() {
            return Err(JmsError::InvalidArgument(format!("empty destination name: {s}")));
        }
        Ok(parsed)
    }
}
