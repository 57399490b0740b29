//! [`Connector`] is the entry point to the Project Kiwi API.

use std::collections::HashMap;
use std::path::Path;

use bytes::Bytes;
use log::{debug, info};
use projectkiwi_types::{OverlapFilter, TileIndex};
use serde::de::DeserializeOwned;

use crate::config::ConnectorConfig;
use crate::decoded_image::DecodedImage;
use crate::error::KiwiError;
use crate::model::imagery::{UploadTicket, STATUS_AWAITING_PROCESSING};
use crate::model::{
    filter_annotations_for_tile, Annotation, Imagery, ProjectsResponse, StatusResponse, Task,
    TileRecord,
};
use crate::platform::native::ReqwestHttpService;
use crate::platform::{HttpService, HttpServiceImpl};
use crate::super_tile::{SuperTileLayout, UrlSource};

/// Client of the Project Kiwi API.
///
/// All requests are authenticated with the API key of the [`ConnectorConfig`]. The connector
/// holds no mutable state, so a single instance can be shared between tasks.
///
/// # Example
///
/// ```no_run
/// use projectkiwi::{Connector, ConnectorConfig};
///
/// # tokio_test::block_on(async {
/// let connector = Connector::new(ConnectorConfig::new("my-api-key")).expect("failed to create connector");
/// let projects = connector.get_projects().await.expect("failed to load projects");
/// # });
/// ```
#[derive(Debug)]
pub struct Connector<S = HttpServiceImpl> {
    config: ConnectorConfig,
    http: S,
}

impl Connector<HttpServiceImpl> {
    /// Creates a connector sending requests with `reqwest`.
    pub fn new(config: ConnectorConfig) -> Result<Self, KiwiError> {
        let http = ReqwestHttpService::new(&config.user_agent)?;
        Self::with_service(config, http)
    }

    /// Creates a connector configured from the environment, see [`ConnectorConfig::from_env`].
    pub fn from_env() -> Result<Self, KiwiError> {
        Self::new(ConnectorConfig::from_env().ok_or(KiwiError::MissingApiKey)?)
    }
}

impl<S: HttpService> Connector<S> {
    /// Creates a connector using the given HTTP service.
    pub fn with_service(config: ConnectorConfig, http: S) -> Result<Self, KiwiError> {
        if config.api_key.is_empty() {
            return Err(KiwiError::MissingApiKey);
        }

        Ok(Self { config, http })
    }

    /// Configuration of the connector.
    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    async fn request(&self, route: &str, params: &[(&str, &str)]) -> Result<Bytes, KiwiError> {
        let url = self.config.route_url(route);
        let mut query = Vec::with_capacity(params.len() + 1);
        query.push(("key", self.config.api_key.as_str()));
        query.extend_from_slice(params);

        info!("Requesting {route}");
        self.http.get(&url, &query).await
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        route: &str,
        params: &[(&str, &str)],
    ) -> Result<T, KiwiError> {
        let body = self.request(route, params).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Ids of the projects the API key has access to.
    ///
    /// Fails with [`KiwiError::NoProjects`] if there are none.
    pub async fn get_projects(&self) -> Result<Vec<String>, KiwiError> {
        let projects = self
            .request_json::<ProjectsResponse>("get_projects", &[])
            .await?
            .into_ids();

        if projects.is_empty() {
            return Err(KiwiError::NoProjects);
        }

        Ok(projects)
    }

    /// Returns the given project, or the only project of the account if none is given.
    async fn resolve_project(&self, project: Option<&str>) -> Result<String, KiwiError> {
        if let Some(project) = project {
            return Ok(project.to_owned());
        }

        match <[String; 1]>::try_from(self.get_projects().await?) {
            Ok([project]) => Ok(project),
            Err(_) => Err(KiwiError::AmbiguousProject),
        }
    }

    /// Imagery of the project. Without a project, the account must have exactly one.
    pub async fn get_imagery(&self, project: Option<&str>) -> Result<Vec<Imagery>, KiwiError> {
        let project = self.resolve_project(project).await?;
        self.request_json("get_imagery", &[("project", project.as_str())])
            .await
    }

    /// Tiles of the imagery.
    pub async fn get_tiles(&self, imagery_id: &str) -> Result<Vec<TileRecord>, KiwiError> {
        self.request_json("get_tile_list", &[("imagery_id", imagery_id)])
            .await
    }

    /// Tile urls of the imagery by tile index.
    pub async fn get_tile_dict(
        &self,
        imagery_id: &str,
    ) -> Result<HashMap<TileIndex, String>, KiwiError> {
        self.get_tiles(imagery_id)
            .await?
            .into_iter()
            .map(|tile| -> Result<_, KiwiError> { Ok((tile.index()?, tile.url)) })
            .collect()
    }

    /// Downloads and decodes a tile image.
    pub async fn get_tile(&self, url: &str) -> Result<DecodedImage, KiwiError> {
        debug!("Loading tile {url}");
        let bytes = self.http.get(url, &[]).await?;
        DecodedImage::decode(&bytes)
    }

    /// Processing status of the imagery.
    pub async fn get_imagery_status(&self, imagery_id: &str) -> Result<String, KiwiError> {
        let response: StatusResponse = self
            .request_json("get_imagery_status", &[("imagery_id", imagery_id)])
            .await?;
        Ok(response.status)
    }

    /// Sets the status of the imagery, e.g. to start processing once its upload is complete.
    pub async fn set_imagery_status(&self, imagery_id: &str, status: &str) -> Result<(), KiwiError> {
        self.request(
            "set_imagery_status",
            &[("imagery_id", imagery_id), ("status", status)],
        )
        .await?;
        Ok(())
    }

    /// Uploads an image file as new imagery and queues it for processing. Returns the id of the
    /// new imagery.
    pub async fn add_imagery(&self, path: impl AsRef<Path>, name: &str) -> Result<String, KiwiError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .unwrap_or(path.as_os_str())
            .to_string_lossy()
            .into_owned();
        let size = tokio::fs::metadata(path).await?.len();

        let ticket: UploadTicket = self
            .request_json(
                "get_imagery_upload_url",
                &[("filename", file_name.as_str()), ("name", name)],
            )
            .await?;

        info!("Uploading {size} bytes of {path:?} as imagery {}", ticket.imagery_id);
        self.http.put_file(&ticket.url, path).await?;

        self.set_imagery_status(&ticket.imagery_id, STATUS_AWAITING_PROCESSING)
            .await?;
        Ok(ticket.imagery_id)
    }

    /// Builds an image of `tile` at the resolution of `max_zoom` by stitching the `max_zoom`
    /// tiles it consists of.
    ///
    /// See [`imagery_url_source`](crate::super_tile::imagery_url_source) and
    /// [`template_url_source`](crate::super_tile::template_url_source) to construct the url source.
    pub async fn get_super_tile(
        &self,
        tile: TileIndex,
        url_source: &dyn UrlSource,
        max_zoom: u32,
    ) -> Result<DecodedImage, KiwiError> {
        SuperTileLayout::new(tile, max_zoom)?
            .assemble(&self.http, url_source)
            .await
    }

    /// All annotations of the project, sorted by id. Without a project, the account must have
    /// exactly one.
    pub async fn get_annotations(&self, project: Option<&str>) -> Result<Vec<Annotation>, KiwiError> {
        let project = self.resolve_project(project).await?;
        let body = self.request("get_annotations", &[("project", project.as_str())]).await?;
        Annotation::parse_collection(&body)
    }

    /// Annotations of the project that overlap the tile by at least `threshold`, optionally
    /// limited to those drawn on the given imagery. See [`filter_annotations_for_tile`].
    pub async fn get_annotations_for_tile(
        &self,
        project: Option<&str>,
        tile: TileIndex,
        threshold: f64,
        imagery_id: Option<&str>,
    ) -> Result<Vec<Annotation>, KiwiError> {
        let annotations = self.get_annotations(project).await?;
        let filter = OverlapFilter::new(tile).with_threshold(threshold);
        Ok(filter_annotations_for_tile(annotations, &filter, imagery_id))
    }

    /// Tasks of the labelling queue.
    pub async fn get_tasks(&self, queue_id: u64) -> Result<Vec<Task>, KiwiError> {
        let queue_id = queue_id.to_string();
        self.request_json("get_tasks", &[("queue_id", queue_id.as_str())])
            .await
    }
}
