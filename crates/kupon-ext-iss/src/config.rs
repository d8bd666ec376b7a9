//! ISS connection settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// ISS provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssConfig {
    /// API root, without a trailing slash
    pub base_url: String,
    /// Deadline of every single request, in seconds
    pub request_timeout: u64,
    /// Trading engine path segment
    pub engine: String,
    /// Market path segment
    pub market: String,
}

impl Default for IssConfig {
    fn default() -> Self {
        Self {
            base_url: "https://iss.moex.com/iss".to_string(),
            request_timeout: 10,
            engine: "stock".to_string(),
            market: "bonds".to_string(),
        }
    }
}

impl IssConfig {
    /// Per-request deadline.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Sets the API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub(crate) fn security_path(&self, isin: &str) -> String {
        format!(
            "engines/{}/markets/{}/securities/{}.json",
            self.engine, self.market, isin
        )
    }
}
