//! Client config loader (strict parsing).

pub mod schema;

use std::fs;

use mqjms_core::error::{JmsError, Result};

pub use schema::{ClientConfig, ClientSection, DestinationConfig, DestinationKind, ProducerSection};

pub fn load_from_file(path: &str) -> Result<ClientConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| JmsError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ClientConfig> {
    let cfg: ClientConfig = serde_yaml::from_str(s)
        .map_err(|e| JmsError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
