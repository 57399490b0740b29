use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};
use parking_lot::Mutex;

use crate::error::KiwiError;
use crate::platform::HttpService;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Bytes>,
}

impl RecordedRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Serves canned responses by url (query is ignored) and records all requests.
#[derive(Debug, Default)]
pub struct MockHttpService {
    responses: HashMap<String, Result<Bytes, u16>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockHttpService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, body: impl Into<Bytes>) -> Self {
        self.responses.insert(url.to_owned(), Ok(body.into()));
        self
    }

    pub fn fail(mut self, url: &str, status: u16) -> Self {
        self.responses.insert(url.to_owned(), Err(status));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    fn serve(&self, request: RecordedRequest) -> Result<Bytes, KiwiError> {
        let url = request.url.clone();
        self.requests.lock().push(request);
        match self.responses.get(&url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(KiwiError::Status {
                url,
                status: *status,
            }),
            None => Err(KiwiError::Status { url, status: 404 }),
        }
    }
}

#[async_trait]
impl HttpService for MockHttpService {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Bytes, KiwiError> {
        self.serve(RecordedRequest {
            method: "GET",
            url: url.to_owned(),
            query: query
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
            body: None,
        })
    }

    async fn put_file(&self, url: &str, path: &Path) -> Result<(), KiwiError> {
        let body = tokio::fs::read(path).await?;
        self.serve(RecordedRequest {
            method: "PUT",
            url: url.to_owned(),
            query: vec![],
            body: Some(body.into()),
        })
        .map(|_| ())
    }
}

/// Encodes a single-colour square PNG.
pub fn png_tile(color: [u8; 4], size: u32) -> Bytes {
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(size, size, Rgba(color)));
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageOutputFormat::Png)
        .expect("failed to encode png");
    buffer.into_inner().into()
}
