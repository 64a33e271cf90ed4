// Core data types
pub mod core;

// Pure transformation pipeline
pub mod pipeline;

// Collaborators and state
pub mod config;
pub mod feed;
pub mod monitor;
pub mod notify;
pub mod store;

// Re-export commonly used types for convenience
pub use crate::core::{AirdropEvent, Bucket, Snapshot};
pub use crate::monitor::AlphaMonitor;
