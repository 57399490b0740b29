//! [`HttpService`] based on `reqwest`.

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use log::info;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::Response;
use tokio::fs::File;

use crate::error::KiwiError;
use crate::platform::HttpService;

/// Sends requests with a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestHttpService {
    http_client: reqwest::Client,
}

impl ReqwestHttpService {
    /// Creates a new service sending the given user agent.
    pub fn new(user_agent: &str) -> Result<Self, KiwiError> {
        let http_client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { http_client })
    }

    async fn check_status(url: &str, response: Response) -> Result<Response, KiwiError> {
        let status = response.status();
        if !status.is_success() {
            info!(
                "Failed to load {url}: {}, {:?}",
                status,
                response.text().await
            );
            return Err(KiwiError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl HttpService for ReqwestHttpService {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Bytes, KiwiError> {
        let response = self.http_client.get(url).query(query).send().await?;
        let response = Self::check_status(url, response).await?;

        Ok(response.bytes().await?)
    }

    async fn put_file(&self, url: &str, path: &Path) -> Result<(), KiwiError> {
        let file = File::open(path).await?;
        // Presigned urls reject chunked uploads, so the length is sent up front.
        let length = file.metadata().await?.len();
        let response = self
            .http_client
            .put(url)
            .header(CONTENT_TYPE, "")
            .header(CONTENT_LENGTH, length)
            .body(file)
            .send()
            .await?;
        Self::check_status(url, response).await?;

        Ok(())
    }
}
