//! Access to the remote scoring backend.

pub mod client;
pub mod types;
pub mod workflow;

pub use client::{BackendClient, SentimentBackend};
