//! mqjms demo: send one message through the in-memory transport and read it
//! back.
//!
//! Usage: `mqjms-client [config.yaml]` (defaults to `mqjms.yaml`).
//! Set `RUST_LOG=debug` to see the send/receive trace.

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use mqjms_client::{config, Client, InMemoryTransport};
use mqjms_core::error::{JmsError, Result};
use mqjms_core::Message;

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "mqjms.yaml".into());
    let cfg = config::load_from_file(&path)?;
    let name = cfg
        .destinations
        .first()
        .map(|d| d.name.clone())
        .ok_or_else(|| JmsError::InvalidConfig("no destinations".into()))?;

    let client = Client::new(cfg, Arc::new(InMemoryTransport::new()));
    let producer = client.create_producer(&name)?;
    let consumer = client.create_consumer(&name)?;

    let mut msg = Message::text("hello from mqjms");
    msg.set_property("origin", "demo");
    producer.send(&mut msg).await?;
    tracing::info!(destination = %producer.destination(), msg_id = ?msg.message_id(), "sent");

    while let Some(received) = consumer.receive().await? {
        tracing::info!(
            msg_id = ?received.message_id(),
            priority = received.priority(),
            origin = ?received.get_string_property("origin"),
            body = ?received.get_body::<String>().ok(),
            "received"
        );
    }
    Ok(())
}
