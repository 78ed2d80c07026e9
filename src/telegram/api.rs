//! HTTP client for the status API.
//!
//! The bot never touches the store directly; every command goes through this
//! thin REST client. The base URL is injected at construction, there is no
//! module-level endpoint constant.

use serde::Deserialize;
use url::Url;

use crate::core::error::AppResult;

/// A status record as returned by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub status: String,
    pub created_at: String,
}

/// Client for the status API.
pub struct StatusApi {
    client: reqwest::Client,
    base_url: Url,
}

impl StatusApi {
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> AppResult<Url> {
        // Url::join would resolve against the last path segment, so make sure
        // the base ends with a slash before joining.
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        base.join(path)
            .map_err(|e| crate::core::error::AppError::Validation(format!("Invalid API path {path:?}: {e}")))
    }

    /// GET /latest — the most recent statuses across all users.
    pub async fn latest(&self) -> AppResult<Vec<Status>> {
        let url = self.endpoint("latest")?;
        let statuses = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Status>>()
            .await?;
        Ok(statuses)
    }

    /// POST /mystatus — the recent statuses of one user.
    pub async fn my_statuses(&self, user_id: &str) -> AppResult<Vec<Status>> {
        let url = self.endpoint("mystatus")?;
        let statuses = self
            .client
            .post(url)
            .json(&serde_json::json!({ "userId": user_id }))
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Status>>()
            .await?;
        Ok(statuses)
    }
}
