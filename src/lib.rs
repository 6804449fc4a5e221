//! Space Data Proxy Library

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod sources;
pub mod upstream;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
