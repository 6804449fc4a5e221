//! Rust client for the Space Data Proxy.

pub mod client;

pub use client::{DashboardClient, Envelope};
