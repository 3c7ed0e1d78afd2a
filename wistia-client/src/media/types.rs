//! Media wire types

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WistiaError;
use crate::serde_helpers::null_as_default;

/// Server-side classification of an uploaded asset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    Video,
    Audio,
    Image,
    PdfDocument,
    MicrosoftOfficeDocument,
    Swf,
    #[default]
    #[serde(other)]
    UnknownType,
}

impl MediaType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Image => "Image",
            Self::PdfDocument => "PdfDocument",
            Self::MicrosoftOfficeDocument => "MicrosoftOfficeDocument",
            Self::Swf => "Swf",
            Self::UnknownType => "UnknownType",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = Infallible;

    /// Unrecognised names parse as [`MediaType::UnknownType`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Video" => Self::Video,
            "Audio" => Self::Audio,
            "Image" => Self::Image,
            "PdfDocument" => Self::PdfDocument,
            "MicrosoftOfficeDocument" => Self::MicrosoftOfficeDocument,
            "Swf" => Self::Swf,
            _ => Self::UnknownType,
        })
    }
}

/// Processing state of a media.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaStatus {
    #[default]
    Queued,
    Processing,
    Ready,
    Failed,
}

impl MediaStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Processing => "processing",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for MediaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaStatus {
    type Err = WistiaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(Self::Queued),
            "processing" => Ok(Self::Processing),
            "ready" => Ok(Self::Ready),
            "failed" => Ok(Self::Failed),
            other => Err(WistiaError::Decode(format!("unknown media status '{other}'"))),
        }
    }
}

/// The project a media belongs to, referenced by hashed id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    #[serde(alias = "hashedId", default, deserialize_with = "null_as_default")]
    pub hashed_id: String,
}

impl ProjectRef {
    #[must_use]
    pub fn new(hashed_id: impl Into<String>) -> Self {
        Self {
            hashed_id: hashed_id.into(),
        }
    }
}

/// A Wistia media (video, audio, image, document, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Media {
    /// Numeric id, server assigned.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub project: ProjectRef,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub media_type: MediaType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: MediaStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Seconds; zero for media without a timeline.
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Server-assigned primary key.
    #[serde(default, deserialize_with = "null_as_default")]
    pub hashed_id: String,
}

impl Media {
    /// A media to be created in `project_hashed_id`.
    #[must_use]
    pub fn new(name: impl Into<String>, project_hashed_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            project: ProjectRef::new(project_hashed_id),
            ..Self::default()
        }
    }
}
