use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;
use wistia_client::{Project, WistiaClient};

use super::Resource;
use crate::error::{Action, ProviderError, Result};
use crate::schema::{Attribute, AttributeType, ResourceSchema};

const RESOURCE: &str = "project";

/// Attribute state of a `wistia_project`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectState {
    /// Resource id, the project's hashed id.
    pub id: String,
    pub name: String,
    pub description: String,
    pub media_count: u64,
    pub created: String,
    pub updated: String,
    pub hashed_id: String,
    pub anonymous_can_upload: bool,
    pub anonymous_can_download: bool,
    pub public: bool,
    pub public_id: String,
}

impl ProjectState {
    /// Hashed id addressing this project, falling back to `id` for states
    /// imported with only a resource id.
    fn resource_id(&self) -> &str {
        if self.hashed_id.is_empty() {
            &self.id
        } else {
            &self.hashed_id
        }
    }
}

impl From<&ProjectState> for Project {
    fn from(state: &ProjectState) -> Self {
        Self {
            name: state.name.clone(),
            description: state.description.clone(),
            media_count: state.media_count,
            created: state.created.clone(),
            updated: state.updated.clone(),
            hashed_id: state.resource_id().to_string(),
            anonymous_can_upload: state.anonymous_can_upload,
            anonymous_can_download: state.anonymous_can_download,
            public: state.public,
            public_id: state.public_id.clone(),
        }
    }
}

impl From<Project> for ProjectState {
    fn from(project: Project) -> Self {
        Self {
            id: project.hashed_id.clone(),
            name: project.name,
            description: project.description,
            media_count: project.media_count,
            created: project.created,
            updated: project.updated,
            hashed_id: project.hashed_id,
            anonymous_can_upload: project.anonymous_can_upload,
            anonymous_can_download: project.anonymous_can_download,
            public: project.public,
            public_id: project.public_id,
        }
    }
}

/// `wistia_project`
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectResource;

#[async_trait]
impl Resource for ProjectResource {
    type State = ProjectState;

    fn type_name(&self) -> &'static str {
        "wistia_project"
    }

    fn schema(&self) -> ResourceSchema {
        use AttributeType::{Bool, Int, String};

        ResourceSchema {
            type_name: "wistia_project",
            description: "A Wistia project, a folder of media.",
            attributes: vec![
                Attribute::required("name", String, "Display name of the project."),
                Attribute::computed("description", String, "Project description."),
                Attribute::computed("media_count", Int, "Number of media in the project."),
                Attribute::computed("created", String, "Creation time."),
                Attribute::computed("updated", String, "Last modification time."),
                Attribute::computed("hashed_id", String, "Unique hashed id of the project."),
                Attribute::optional(
                    "anonymous_can_upload",
                    Bool,
                    "Whether anyone may upload media to the project.",
                ),
                Attribute::optional(
                    "anonymous_can_download",
                    Bool,
                    "Whether anyone may download media from the project.",
                ),
                Attribute::optional("public", Bool, "Whether the project is publicly reachable."),
                Attribute::computed("public_id", String, "Public id, set while the project is public."),
            ],
        }
    }

    async fn create(&self, client: &WistiaClient, desired: &ProjectState) -> Result<ProjectState> {
        let project = client
            .projects()
            .create(&Project::from(desired))
            .await
            .map_err(ProviderError::operation(Action::Create, RESOURCE))?;
        info!(hashed_id = %project.hashed_id, "Created Wistia project");
        Ok(project.into())
    }

    async fn read(&self, client: &WistiaClient, current: &ProjectState) -> Result<ProjectState> {
        let project = client
            .projects()
            .get(current.resource_id())
            .await
            .map_err(ProviderError::operation(Action::Read, RESOURCE))?;
        Ok(project.into())
    }

    async fn update(&self, client: &WistiaClient, desired: &ProjectState) -> Result<ProjectState> {
        let project = client
            .projects()
            .update(&Project::from(desired))
            .await
            .map_err(ProviderError::operation(Action::Update, RESOURCE))?;
        Ok(project.into())
    }

    async fn delete(&self, client: &WistiaClient, current: &ProjectState) -> Result<()> {
        client
            .projects()
            .delete(current.resource_id())
            .await
            .map_err(ProviderError::operation(Action::Delete, RESOURCE))?;
        info!(hashed_id = %current.resource_id(), "Deleted Wistia project");
        Ok(())
    }
}
