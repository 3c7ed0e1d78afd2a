use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use wistia_client::{Media, ProjectRef, WistiaClient};

use super::{non_empty, Resource};
use crate::error::{Action, ProviderError, Result};
use crate::schema::{Attribute, AttributeType, ResourceSchema};

const RESOURCE: &str = "media";
const SOURCE_GROUP: &[&str] = &["file", "url"];

/// Attribute state of a `wistia_media`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaState {
    /// Resource id, the media's hashed id.
    pub id: String,
    /// Local file to upload.
    pub file: Option<String>,
    /// Remote URL for Wistia to fetch.
    pub url: Option<String>,
    /// Numeric media id.
    pub media_id: u64,
    pub name: String,
    pub project_id: String,
    #[serde(rename = "type")]
    pub media_type: String,
    pub status: String,
    pub section: Option<String>,
    pub duration: f64,
    pub created: String,
    pub updated: String,
    pub description: String,
    pub hashed_id: String,
}

impl MediaState {
    fn resource_id(&self) -> &str {
        if self.hashed_id.is_empty() {
            &self.id
        } else {
            &self.hashed_id
        }
    }

    fn to_entity(&self) -> Media {
        Media {
            id: self.media_id,
            name: self.name.clone(),
            project: ProjectRef::new(self.project_id.clone()),
            media_type: self.media_type.parse().unwrap_or_default(),
            status: self.status.parse().unwrap_or_default(),
            section: self.section.clone(),
            duration: self.duration,
            created: self.created.clone(),
            updated: self.updated.clone(),
            description: self.description.clone(),
            hashed_id: self.resource_id().to_string(),
        }
    }

    /// State after a call returned `media`. The upload source and the
    /// project id are inputs and stay as the caller set them.
    fn apply(&self, media: Media) -> Self {
        let project_id = if self.project_id.is_empty() {
            media.project.hashed_id
        } else {
            self.project_id.clone()
        };
        Self {
            id: media.hashed_id.clone(),
            file: self.file.clone(),
            url: self.url.clone(),
            media_id: media.id,
            name: media.name,
            project_id,
            media_type: media.media_type.to_string(),
            status: media.status.to_string(),
            section: media.section,
            duration: media.duration,
            created: media.created,
            updated: media.updated,
            description: media.description,
            hashed_id: media.hashed_id,
        }
    }
}

/// Where the content of a new media comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaSource<'a> {
    File(&'a Path),
    Url(&'a str),
}

impl<'a> MediaSource<'a> {
    /// Exactly one of `file` and `url` must be set; empty strings count as
    /// unset.
    pub fn from_state(state: &'a MediaState) -> Result<Self> {
        match (non_empty(state.file.as_deref()), non_empty(state.url.as_deref())) {
            (Some(file), None) => Ok(Self::File(Path::new(file))),
            (None, Some(url)) => Ok(Self::Url(url)),
            (Some(_), Some(_)) => Err(ProviderError::InvalidAttributes(
                "wistia_media: only one of \"file\" or \"url\" may be set".to_string(),
            )),
            (None, None) => Err(ProviderError::InvalidAttributes(
                "wistia_media: one of \"file\" or \"url\" must be set".to_string(),
            )),
        }
    }
}

/// `wistia_media`
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaResource;

#[async_trait]
impl Resource for MediaResource {
    type State = MediaState;

    fn type_name(&self) -> &'static str {
        "wistia_media"
    }

    fn schema(&self) -> ResourceSchema {
        use AttributeType::{Float, Int, String};

        ResourceSchema {
            type_name: "wistia_media",
            description: "A media uploaded to Wistia from a local file or a URL.",
            attributes: vec![
                Attribute::optional("file", String, "Path of a local file to upload.")
                    .exactly_one_of(SOURCE_GROUP),
                Attribute::optional("url", String, "URL Wistia fetches the media from.")
                    .exactly_one_of(SOURCE_GROUP),
                Attribute::required("project_id", String, "Hashed id of the owning project."),
                Attribute::optional("name", String, "Display name of the media."),
                Attribute::computed("media_id", Int, "Numeric id of the media."),
                Attribute::computed("type", String, "Kind of media, e.g. Video or Image."),
                Attribute::computed("status", String, "Processing status."),
                Attribute::computed("section", String, "Section of the project holding the media."),
                Attribute::computed("duration", Float, "Length in seconds."),
                Attribute::computed("created", String, "Upload time."),
                Attribute::computed("updated", String, "Last modification time."),
                Attribute::computed("description", String, "Media description."),
                Attribute::computed("hashed_id", String, "Unique hashed id of the media."),
            ],
        }
    }

    async fn create(&self, client: &WistiaClient, desired: &MediaState) -> Result<MediaState> {
        let source = MediaSource::from_state(desired)?;
        let mut media = Media::new(desired.name.clone(), desired.project_id.clone());
        media.description = desired.description.clone();

        let created = match source {
            MediaSource::File(path) => {
                let file = tokio::fs::File::open(path)
                    .await
                    .map_err(|source| ProviderError::File {
                        path: path.display().to_string(),
                        source,
                    })?;
                let filename = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or_default();
                debug!(path = %path.display(), "Uploading media from file");
                client
                    .medias()
                    .create_from_reader(&media, file, filename)
                    .await
            }
            MediaSource::Url(url) => client.medias().create_from_url(&media, url).await,
        }
        .map_err(ProviderError::operation(Action::Create, RESOURCE))?;

        info!(hashed_id = %created.hashed_id, status = %created.status, "Created Wistia media");
        Ok(desired.apply(created))
    }

    async fn read(&self, client: &WistiaClient, current: &MediaState) -> Result<MediaState> {
        let media = client
            .medias()
            .get(current.resource_id())
            .await
            .map_err(ProviderError::operation(Action::Read, RESOURCE))?;
        Ok(current.apply(media))
    }

    async fn update(&self, client: &WistiaClient, desired: &MediaState) -> Result<MediaState> {
        let media = client
            .medias()
            .update(&desired.to_entity())
            .await
            .map_err(ProviderError::operation(Action::Update, RESOURCE))?;
        Ok(desired.apply(media))
    }

    async fn delete(&self, client: &WistiaClient, current: &MediaState) -> Result<()> {
        client
            .medias()
            .delete(current.resource_id())
            .await
            .map_err(ProviderError::operation(Action::Delete, RESOURCE))
    }
}
