//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, NASA_API_KEY env override)
//!     → validation.rs (semantic checks, all errors collected)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc to all handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - The NEO credential comes from config or environment, never the source

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{default_config, load_config, ConfigError, NASA_API_KEY_ENV};
pub use schema::ProxyConfig;
pub use schema::UpstreamConfig;
