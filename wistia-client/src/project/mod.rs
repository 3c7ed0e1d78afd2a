//! Project resource
//!
//! # Example
//!
//! ```no_run
//! use wistia_client::{Project, WistiaClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = WistiaClient::new("access-token")?;
//! let created = client.projects().create(&Project::new("Marketing")).await?;
//! let fetched = client.projects().get(&created.hashed_id).await?;
//! # Ok(())
//! # }
//! ```

mod types;

pub use types::Project;

use reqwest::Method;

use crate::client::{path_segment, WistiaClient};
use crate::error::WistiaError;

/// Operations on projects.
#[derive(Debug, Clone, Copy)]
pub struct Projects<'c> {
    client: &'c WistiaClient,
}

impl<'c> Projects<'c> {
    pub(crate) const fn new(client: &'c WistiaClient) -> Self {
        Self { client }
    }

    fn project_url(&self, hashed_id: &str) -> String {
        self.client
            .api_url(&format!("projects/{}.json", path_segment(hashed_id)))
    }

    /// Create a project. The server assigns the hashed id and timestamps.
    pub async fn create(&self, project: &Project) -> Result<Project, WistiaError> {
        let url = self.client.api_url("projects.json");
        self.client.request(Method::POST, &url, Some(project)).await
    }

    pub async fn get(&self, hashed_id: &str) -> Result<Project, WistiaError> {
        let url = self.project_url(hashed_id);
        self.client.request(Method::GET, &url, None::<&()>).await
    }

    /// Full-replace update keyed by `project.hashed_id`.
    pub async fn update(&self, project: &Project) -> Result<Project, WistiaError> {
        let url = self.project_url(&project.hashed_id);
        self.client.request(Method::PUT, &url, Some(project)).await
    }

    pub async fn delete(&self, hashed_id: &str) -> Result<(), WistiaError> {
        let url = self.project_url(hashed_id);
        self.client
            .request_empty(Method::DELETE, &url, None::<&()>)
            .await
    }
}
