//! HTTP service surface.
//!
//! # Data Flow
//! ```text
//! POST /v1/messages
//!     → server.rs ingest handler
//!     → relay::evaluate (store + engine)
//!     → optional webhook dispatch
//!     → JSON decision in the response
//!
//! /admin/* routes are merged in from the admin module when enabled.
//! ```

pub mod server;

pub use server::{AppState, HttpServer};
