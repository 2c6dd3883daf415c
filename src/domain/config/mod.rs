//! Configuration domain module

mod app_config;
mod validation_mode;

pub use app_config::{AppConfig, ModelsConfig, DEFAULT_API_BASE_URL, DEFAULT_HOST, DEFAULT_PORT};
pub use validation_mode::ValidationMode;
