use crate::utils::error::Result;
use async_trait::async_trait;

/// A query string parameter; `None` values are dropped before sending.
pub type QueryParam = (&'static str, Option<String>);

/// Read-only access to the AIC REST API.
#[async_trait]
pub trait ArtApi: Send + Sync {
    /// GET `endpoint` (relative to the API base URL) and return the decoded JSON body.
    async fn fetch(&self, endpoint: &str, params: &[QueryParam]) -> Result<serde_json::Value>;
}
