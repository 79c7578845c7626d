// rentdesk-api: Async Rust client for the Rentdesk backend API.

pub mod client;
pub mod error;
pub mod metrics;
pub mod models;
pub mod operators;
pub mod overrides;
pub mod requests;
pub mod transport;

pub use client::ConsoleClient;
pub use error::Error;
