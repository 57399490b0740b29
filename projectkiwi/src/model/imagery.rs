//! Imagery uploaded to the platform and the tiles it was cut into.

use projectkiwi_types::{GeometryError, TileIndex};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::string_or_number;

/// Status that triggers processing of uploaded imagery.
pub const STATUS_AWAITING_PROCESSING: &str = "awaiting processing";

/// Imagery record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Imagery {
    /// Imagery id.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Name given on upload.
    pub name: String,
    /// Other fields of the record.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One tile of processed imagery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileRecord {
    /// Tile address in `z/x/y` form.
    pub zxy: String,
    /// Url of the tile image.
    pub url: String,
    /// Other fields of the record.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TileRecord {
    /// Parsed tile address.
    pub fn index(&self) -> Result<TileIndex, GeometryError> {
        self.zxy.parse()
    }
}

/// Presigned upload url issued for a new imagery.
#[derive(Debug, Deserialize)]
pub(crate) struct UploadTicket {
    pub url: String,
    #[serde(deserialize_with = "string_or_number")]
    pub imagery_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_imagery() {
        let list: Vec<Imagery> = serde_json::from_str(
            r#"[{"id": "ab12", "name": "pytest", "project": 3}, {"id": 5, "name": "other"}]"#,
        )
        .unwrap();
        assert_eq!(list[0].id, "ab12");
        assert_eq!(list[0].name, "pytest");
        assert_eq!(list[0].extra.get("project"), Some(&Value::from(3)));
        assert_eq!(list[1].id, "5");
    }

    #[test]
    fn tile_index() {
        let tile: TileRecord = serde_json::from_str(
            r#"{"zxy": "12/1051/1522", "url": "https://tiles.example/12/1051/1522"}"#,
        )
        .unwrap();
        assert_eq!(tile.index(), Ok(TileIndex::new(12, 1051, 1522)));

        let tile = TileRecord {
            zxy: "12/1051".into(),
            ..tile
        };
        assert!(tile.index().is_err());
    }
}
