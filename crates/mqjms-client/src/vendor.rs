//! The queue client's own message representation.
//!
//! Everything a broker carries is either a string map entry or raw bytes;
//! `codec` maps envelopes onto this shape and back.

use std::collections::HashMap;

use bytes::Bytes;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VendorMessage {
    pub topic: String,
    /// Carries the message type.
    pub tags: Option<String>,
    /// Carries the correlation id.
    pub keys: Option<String>,
    pub user_properties: HashMap<String, String>,
    pub system_properties: HashMap<String, String>,
    pub body: Bytes,
    pub msg_id: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub born_timestamp: i64,
    pub reconsume_times: u32,
}
