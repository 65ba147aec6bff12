//! REST API layer for the agent ROI analytics service.

pub mod error;
pub mod handlers;
pub mod server;

pub use handlers::AppState;
pub use server::ApiServer;
