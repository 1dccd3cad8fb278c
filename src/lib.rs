//! Keyword Relay Library
//!
//! A keyword-watching relay: inbound chat messages are tested against a
//! live, hot-reloadable keyword list, and matches become alert payloads.
//!
//! ```text
//! inbound message ──▶ relay ──▶ matching ──▶ zero or one AlertPayload
//!                       │
//!                       ▼
//!                   keywords (store + source + parse, hot reload)
//!
//! cross-cutting: config, http/admin surface, observability
//! ```

pub mod admin;
pub mod config;
pub mod http;
pub mod keywords;
pub mod matching;
pub mod observability;
pub mod relay;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use keywords::{KeywordSource, KeywordStore};
