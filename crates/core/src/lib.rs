pub mod config;
pub mod config_loader;
pub mod metrics;

pub use config::{AppConfig, DatabaseConfig, ServerConfig};
pub use config_loader::ConfigLoader;
pub use metrics::{compute_metrics, RoiMetrics};
