//! Annotations drawn over imagery, and their selection by tile.

use std::collections::HashMap;

use log::{debug, warn};
use projectkiwi_types::{
    geographic_bounding_box, tile_overlap_ratio, tile_relative_bounding_box, GeoBoundingBox,
    GeometryError, OverlapFilter, TileBoundingBox, TileIndex,
};
use serde::{Deserialize, Serialize};

use crate::error::KiwiError;
use crate::model::{coordinates, number_or_string, string_or_number};

/// A labelled shape drawn by a user of the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Annotation id.
    pub id: u64,
    /// Kind of the shape, e.g. `Polygon` or `Point`.
    pub shape: String,
    /// Id of the label.
    pub label_id: i64,
    /// Name of the label.
    pub label_name: String,
    /// Display colour of the label.
    pub label_color: String,
    /// Vertices as `[lon, lat]` pairs.
    pub coordinates: Vec<[f64; 2]>,
    /// what3words address of the annotation.
    pub what3words: Option<String>,
    /// Link to the annotation in the web application.
    pub url: Option<String>,
    /// Imagery the annotation was drawn on.
    pub imagery_id: Option<String>,
}

#[derive(Deserialize)]
struct AnnotationRecord {
    shape: String,
    #[serde(deserialize_with = "number_or_string")]
    label_id: i64,
    label_name: String,
    label_color: String,
    #[serde(rename = "coordinate", deserialize_with = "coordinates")]
    coordinates: Vec<[f64; 2]>,
    #[serde(default)]
    what3words: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default, deserialize_with = "optional_id")]
    imagery_id: Option<String>,
}

fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "string_or_number")] String);

    Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|Wrapper(id)| id))
}

// The API marks missing values with these strings instead of null.
const NO_WHAT3WORDS: &str = "none";
const NO_IMAGERY: &str = "NULL";

impl Annotation {
    fn from_record(id: u64, record: AnnotationRecord) -> Self {
        Self {
            id,
            shape: record.shape,
            label_id: record.label_id,
            label_name: record.label_name,
            label_color: record.label_color,
            coordinates: record.coordinates,
            what3words: record.what3words.filter(|v| v != NO_WHAT3WORDS),
            url: record.url,
            imagery_id: record.imagery_id.filter(|v| v != NO_IMAGERY),
        }
    }

    /// Parses the `get_annotations` response: a JSON object mapping annotation ids to records.
    /// Annotations are returned sorted by id.
    pub fn parse_collection(json: &[u8]) -> Result<Vec<Self>, KiwiError> {
        let records: HashMap<String, AnnotationRecord> = serde_json::from_slice(json)?;
        let mut annotations = records
            .into_iter()
            .map(|(key, record)| {
                let id = key
                    .trim()
                    .parse()
                    .map_err(|_| KiwiError::InvalidRecord(format!("annotation id {key:?}")))?;
                Ok(Self::from_record(id, record))
            })
            .collect::<Result<Vec<_>, KiwiError>>()?;

        annotations.sort_by_key(|annotation| annotation.id);
        Ok(annotations)
    }

    /// Geographic bounding box of the annotation.
    pub fn bounding_box(&self) -> Result<GeoBoundingBox, GeometryError> {
        geographic_bounding_box(&self.coordinates)
    }

    /// Bounding box of the annotation relative to the given tile, in tile units.
    pub fn tile_bounding_box(&self, tile: &TileIndex) -> Result<TileBoundingBox, GeometryError> {
        tile_relative_bounding_box(&self.coordinates, tile)
    }

    /// Fraction of the annotation's bounding box inside the given tile.
    pub fn overlap_ratio(&self, tile: &TileIndex) -> Result<f64, GeometryError> {
        tile_overlap_ratio(&self.coordinates, tile)
    }
}

/// Selects the annotations belonging to a tile.
///
/// An annotation is kept if it was drawn on `imagery_id` (when given) and passes the overlap
/// `filter`. Annotations whose geometry cannot be evaluated are logged and skipped.
pub fn filter_annotations_for_tile(
    annotations: impl IntoIterator<Item = Annotation>,
    filter: &OverlapFilter,
    imagery_id: Option<&str>,
) -> Vec<Annotation> {
    annotations
        .into_iter()
        .filter(|annotation| match imagery_id {
            Some(id) => annotation.imagery_id.as_deref() == Some(id),
            None => true,
        })
        .filter(|annotation| match filter.matches(&annotation.coordinates) {
            Ok(matches) => {
                debug!(
                    "Annotation {} {} tile {}",
                    annotation.id,
                    if matches { "is in" } else { "is not in" },
                    filter.tile()
                );
                matches
            }
            Err(err) => {
                warn!("Skipping annotation {}: {err}", annotation.id);
                false
            }
        })
        .collect()
}
