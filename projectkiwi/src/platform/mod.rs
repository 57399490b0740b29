//! [`HttpService`] abstracts the transport used by the [`Connector`](crate::Connector).

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::KiwiError;

pub mod native;

/// Service performing HTTP requests in a generic way.
///
/// The connector is written against this trait, so it can be used with a custom client (or with
/// a test double) instead of the default [`ReqwestHttpService`](native::ReqwestHttpService).
#[async_trait]
pub trait HttpService: Send + Sync {
    /// Sends a GET request with the given query parameters and returns the response body.
    ///
    /// A non-success status is reported as [`KiwiError::Status`].
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Bytes, KiwiError>;

    /// Uploads the file at `path` with a PUT request and an empty content type, as expected by
    /// presigned upload urls. The file is streamed from disk, not loaded into memory.
    async fn put_file(&self, url: &str, path: &Path) -> Result<(), KiwiError>;
}

/// Default implementation of the [`HttpService`].
pub type HttpServiceImpl = native::ReqwestHttpService;
