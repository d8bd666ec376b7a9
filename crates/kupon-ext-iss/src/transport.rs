//! HTTP transport to the ISS API.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use kupon_traits::error::{SourceError, SourceResult};

use crate::config::IssConfig;

/// Query string pairs of one request.
pub type Query = [(&'static str, String)];

/// A source of ISS JSON documents.
///
/// All fetchers go through this seam so tests can serve canned documents.
#[async_trait]
pub trait IssTransport: Send + Sync {
    /// GETs `path` (relative to the API root) and returns the decoded body.
    async fn get_json(&self, path: &str, query: &Query) -> SourceResult<Value>;
}

/// `reqwest`-backed transport.
///
/// Every request is bounded by the configured deadline; an expired deadline
/// cancels that request only.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport for the configured API root.
    pub fn new(config: &IssConfig) -> SourceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| SourceError::Fetch(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn request_error(url: &str, err: reqwest::Error) -> SourceError {
    if err.is_timeout() {
        SourceError::Timeout(url.to_string())
    } else {
        SourceError::Fetch(format!("{url}: {err}"))
    }
}

#[async_trait]
impl IssTransport for HttpTransport {
    async fn get_json(&self, path: &str, query: &Query) -> SourceResult<Value> {
        let url = self.url(path);
        debug!(%url, ?query, "ISS request");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| request_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "ISS returned an error status");
            return Err(SourceError::Status {
                status: status.as_u16(),
                url,
            });
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout(url.clone())
            } else {
                SourceError::Decode(format!("{url}: {e}"))
            }
        })
    }
}
