//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, route dispatch)
//!     → request.rs (request IDs, query string parsing)
//!     → sources::* (fetch upstream, normalize)
//!     → response.rs (envelope, CORS headers)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, QueryParams, X_REQUEST_ID};
pub use server::HttpServer;
