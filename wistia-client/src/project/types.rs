//! Project wire types

use serde::{Deserialize, Serialize};

use crate::serde_helpers::null_as_default;

/// A Wistia project.
///
/// The API publishes the two anonymous-access flags under both a snake_case
/// and a legacy camelCase name, and only the legacy name is reliable on
/// read. The entity keeps a single value per flag; the wire form writes it
/// under both names and reads the legacy name first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ProjectWire", from = "ProjectWire")]
pub struct Project {
    pub name: String,
    pub description: String,
    pub media_count: u64,
    pub created: String,
    pub updated: String,
    /// Server-assigned primary key.
    pub hashed_id: String,
    pub anonymous_can_upload: bool,
    pub anonymous_can_download: bool,
    pub public: bool,
    /// Only populated while `public` is set.
    pub public_id: String,
}

impl Project {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ProjectWire {
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    media_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    created: String,
    #[serde(default, deserialize_with = "null_as_default")]
    updated: String,
    #[serde(rename = "hashedId", default, deserialize_with = "null_as_default")]
    hashed_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    anonymous_can_upload: bool,
    #[serde(rename = "anonymousCanUpload", default)]
    anonymous_can_upload_legacy: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    anonymous_can_download: bool,
    #[serde(rename = "anonymousCanDownload", default)]
    anonymous_can_download_legacy: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    public: bool,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    public_id: String,
}

impl From<Project> for ProjectWire {
    fn from(p: Project) -> Self {
        Self {
            name: p.name,
            description: p.description,
            media_count: p.media_count,
            created: p.created,
            updated: p.updated,
            hashed_id: p.hashed_id,
            anonymous_can_upload: p.anonymous_can_upload,
            anonymous_can_upload_legacy: Some(p.anonymous_can_upload),
            anonymous_can_download: p.anonymous_can_download,
            anonymous_can_download_legacy: Some(p.anonymous_can_download),
            public: p.public,
            public_id: p.public_id,
        }
    }
}

impl From<ProjectWire> for Project {
    fn from(w: ProjectWire) -> Self {
        Self {
            name: w.name,
            description: w.description,
            media_count: w.media_count,
            created: w.created,
            updated: w.updated,
            hashed_id: w.hashed_id,
            // A missing legacy key deliberately falls back to the snake_case
            // value instead of reading as false.
            anonymous_can_upload: w
                .anonymous_can_upload_legacy
                .unwrap_or(w.anonymous_can_upload),
            anonymous_can_download: w
                .anonymous_can_download_legacy
                .unwrap_or(w.anonymous_can_download),
            public: w.public,
            public_id: w.public_id,
        }
    }
}
