//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like the OpenAI API and the filesystem.

pub mod config;
pub mod oracle;

// Re-export adapters
pub use config::XdgConfigStore;
pub use oracle::OpenAiOracle;
