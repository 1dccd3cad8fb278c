//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → shared by value with all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; only the keyword set itself is
//!   hot-reloadable, through the keyword store's own refresh machinery
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::AdminConfig;
pub use schema::AlertConfig;
pub use schema::KeywordConfig;
pub use schema::ListenerConfig;
pub use schema::RelayConfig;
