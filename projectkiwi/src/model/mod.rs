//! Records returned by the Project Kiwi API.
//!
//! The API is not strict about JSON types: identifiers come as strings or numbers, and
//! coordinates are sometimes sent as numeric strings. The helpers below accept both forms.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

pub mod annotation;
pub mod imagery;
pub mod task;

pub use annotation::{filter_annotations_for_tile, Annotation};
pub use imagery::{Imagery, TileRecord};
pub use task::Task;

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum RawId {
    String(String),
    Unsigned(u64),
    Signed(i64),
}

impl From<RawId> for String {
    fn from(value: RawId) -> Self {
        match value {
            RawId::String(v) => v,
            RawId::Unsigned(v) => v.to_string(),
            RawId::Signed(v) => v.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString<T> {
    Number(T),
    String(String),
}

impl<T> NumberOrString<T>
where
    T: FromStr,
    T::Err: Display,
{
    fn into_value<E: serde::de::Error>(self) -> Result<T, E> {
        match self {
            NumberOrString::Number(v) => Ok(v),
            NumberOrString::String(s) => s.trim().parse().map_err(E::custom),
        }
    }
}

/// Identifier sent either as a JSON string or as a number.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

/// Numeric value sent either as a JSON number or as a string.
pub(crate) fn number_or_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Deserialize<'de>,
    T::Err: Display,
{
    NumberOrString::<T>::deserialize(deserializer)?.into_value()
}

/// List of `[x, y]` pairs, each value sent either as a JSON number or as a string.
pub(crate) fn coordinates<'de, D>(deserializer: D) -> Result<Vec<[f64; 2]>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<[NumberOrString<f64>; 2]>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|[x, y]| Ok([x.into_value::<D::Error>()?, y.into_value::<D::Error>()?]))
        .collect()
}

#[derive(Deserialize)]
pub(crate) struct ProjectsResponse {
    pub projects: Vec<RawId>,
}

impl ProjectsResponse {
    pub fn into_ids(self) -> Vec<String> {
        self.projects.into_iter().map(String::from).collect()
    }
}

#[derive(Deserialize)]
pub(crate) struct StatusResponse {
    pub status: String,
}
