//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain in-flight requests → Exit
//!
//! Signals (signals.rs):
//!     Ctrl+C / SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - One broadcast channel fans the signal out to every subscriber
//! - Axum drains in-flight requests before the serve future resolves

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
