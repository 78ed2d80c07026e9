//! The status HTTP API and the Mini App page (axum).

pub mod api;
pub mod error;
pub mod page;

pub use api::{create_api_router, run_web_server, ApiState};
pub use error::ApiError;
