//! Matching subsystem.
//!
//! # Data Flow
//! ```text
//! inbound message text + Arc<KeywordSet>
//!     → engine.rs decide (case-insensitive containment, first-match order)
//!     → on a hit: engine.rs alert_for builds the outbound AlertPayload
//! ```
//!
//! # Design Decisions
//! - `decide` is pure and does no I/O; determinism is a tested property
//! - First match in keyword-set order wins, not longest match and not
//!   all matches, so overlapping keywords resolve deterministically
//! - Exactly one alert payload per matching message

pub mod engine;

pub use engine::{AlertPayload, MatchEngine};
