// Core data types shared across the pipeline
pub mod types;

pub use types::*;
