//! Top-level facade crate for mqjms.
//!
//! Re-exports the message envelope and the client library so users can depend on a single crate.

pub mod core {
    pub use mqjms_core::*;
}

pub mod client {
    pub use mqjms_client::*;
}
