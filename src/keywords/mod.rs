//! Keyword subsystem: the hot-reloadable keyword set.
//!
//! # Data Flow
//! ```text
//! keyword source (file XOR remote URL)
//!     → source.rs (read / conditional fetch)
//!     → parse.rs (line + comma format, comments stripped, lowercased)
//!     → store.rs (atomic whole-set swap, refresh gating)
//!     → readers observe Arc<KeywordSet> via current()
//! ```
//!
//! # Design Decisions
//! - The keyword set is replaced wholesale, never mutated in place;
//!   concurrent readers see either the full old set or the full new one
//! - Reload failures never propagate to readers; the previous set stays
//!   authoritative and the failure is logged
//! - An empty parse result is a failure, not an empty set: an accidentally
//!   emptied source must never silently disable all matching

pub mod parse;
pub mod source;
pub mod store;

pub use source::{CacheMeta, FetchOutcome, KeywordSource, ReloadError};
pub use store::{KeywordSet, KeywordStore, ReloadOutcome};
