//! Relay subsystem: from inbound message to outbound alert.
//!
//! # Data Flow
//! ```text
//! transport delivers {text, origin, sender}
//!     → ingest.rs Relay::evaluate
//!         → KeywordStore::current() (may run one gated reload)
//!         → MatchEngine::decide
//!     → zero or one AlertPayload
//!     → dispatch.rs posts it to the configured webhook (optional)
//! ```
//!
//! # Design Decisions
//! - The relay knows nothing about how messages are received; it consumes
//!   message events and produces alert payloads
//! - Alert delivery failures are logged, never propagated back to ingest

pub mod dispatch;
pub mod ingest;

pub use dispatch::AlertDispatcher;
pub use ingest::{InboundMessage, Relay};
