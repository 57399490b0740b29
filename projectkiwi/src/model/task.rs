//! Tasks of labelling queues.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::string_or_number;

/// Task of a labelling queue.
///
/// Only the id is interpreted by the client, everything else is kept as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Task id.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Other fields of the record.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Task {
    /// Returns a field of the task record.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}
