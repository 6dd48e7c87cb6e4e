// src/ingest/fetch.rs
use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::config::HttpConfig;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("GET {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("GET {url} returned {status}")]
    Status { url: String, status: StatusCode },
    #[error("body of {url} is not valid UTF-8")]
    Decode {
        url: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Shared GET client: browser-like User-Agent, bounded timeout.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(cfg: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("building http client")?;
        Ok(Self { client })
    }

    /// GET `url` with `query` and return the body decoded as UTF-8.
    pub async fn get_html<Q>(&self, url: &str, query: &Q) -> Result<String, FetchError>
    where
        Q: serde::Serialize + ?Sized,
    {
        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let bytes = resp.bytes().await.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;
        String::from_utf8(bytes.to_vec()).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
