//! Handler types and dependencies

use std::sync::Arc;

use url::Url;

use crate::telegram::api::StatusApi;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by command handlers
#[derive(Clone)]
pub struct HandlerDeps {
    /// Client for the status API
    pub api: Arc<StatusApi>,
    /// Deep link opening the Mini App, used in buttons
    pub miniapp_url: Url,
}

impl HandlerDeps {
    pub fn new(api: Arc<StatusApi>, miniapp_url: Url) -> Self {
        Self { api, miniapp_url }
    }
}
