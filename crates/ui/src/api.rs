//! Client side of the `/tests` resource.

use api_shared::{DeleteTestRes, ErrorRes, TestReq, TestRes};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Errors returned by a [`TestsApi`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded {status}: {message}")]
    Status { status: u16, message: String },
}

/// The operations the test list view needs from the backend.
///
/// One call per user action; nothing is retried or cancelled.
#[async_trait]
pub trait TestsApi: Send + Sync {
    async fn list(&self) -> Result<Vec<TestRes>, ApiClientError>;
    async fn create(&self, req: &TestReq) -> Result<TestRes, ApiClientError>;
    async fn update(&self, id: &str, req: &TestReq) -> Result<TestRes, ApiClientError>;
    async fn delete(&self, id: &str) -> Result<DeleteTestRes, ApiClientError>;
}

/// [`TestsApi`] over HTTP, against a running labtrack REST server.
#[derive(Debug, Clone)]
pub struct HttpTestsApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTestsApi {
    /// Create a client for the server at `base_url` (for example `http://localhost:3000`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiClientError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("labtrack/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/tests", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/tests/{}", self.base_url, id)
    }
}

#[async_trait]
impl TestsApi for HttpTestsApi {
    async fn list(&self) -> Result<Vec<TestRes>, ApiClientError> {
        let response = self.client.get(self.collection_url()).send().await?;
        decode(response).await
    }

    async fn create(&self, req: &TestReq) -> Result<TestRes, ApiClientError> {
        let response = self
            .client
            .post(self.collection_url())
            .json(req)
            .send()
            .await?;
        decode(response).await
    }

    async fn update(&self, id: &str, req: &TestReq) -> Result<TestRes, ApiClientError> {
        let response = self.client.put(self.item_url(id)).json(req).send().await?;
        decode(response).await
    }

    async fn delete(&self, id: &str) -> Result<DeleteTestRes, ApiClientError> {
        let response = self.client.delete(self.item_url(id)).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let message = match response.json::<ErrorRes>().await {
        Ok(body) if body.details.is_empty() => body.error,
        Ok(body) => {
            let details: Vec<String> = body
                .details
                .iter()
                .map(|d| format!("{}: {}", d.field, d.message))
                .collect();
            format!("{} ({})", body.error, details.join("; "))
        }
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unexpected response")
            .to_string(),
    };

    Err(ApiClientError::Status {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_ignore_trailing_slash() {
        let api = HttpTestsApi::new("http://localhost:3000/").unwrap();

        assert_eq!(api.base_url(), "http://localhost:3000");
        assert_eq!(api.collection_url(), "http://localhost:3000/tests");
        assert_eq!(
            api.item_url("550e8400e29b41d4a716446655440000"),
            "http://localhost:3000/tests/550e8400e29b41d4a716446655440000"
        );
    }
}
