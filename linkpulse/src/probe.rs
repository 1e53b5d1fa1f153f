//! HTTP health check used by the probers.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

/// A single health check against a URL.
///
/// `Ok` means a response arrived, whatever its status. Any failure to get a
/// response is an `Err`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Probe: Send + Sync {
    async fn check(&self, url: &str) -> Result<()>;
}

pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    pub fn new(request_timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::ClientBuilder::new()
            .pool_max_idle_per_host(0)
            .pool_idle_timeout(Duration::from_secs(0));
        if let Some(request_timeout) = request_timeout {
            builder = builder.timeout(request_timeout);
        }

        Ok(Self {
            client: builder.build().context("Failed to build reqwest client")?,
        })
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn check(&self, url: &str) -> Result<()> {
        let response = self.client.get(url).send().await?;
        tracing::trace!("{} answered {}", url, response.status());
        Ok(())
    }
}
