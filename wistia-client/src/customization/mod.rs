//! Customization resource
//!
//! All four operations address `medias/{hashed_id}/customizations.json`.

mod types;

pub use types::Customization;

use reqwest::Method;

use crate::client::{path_segment, WistiaClient};
use crate::error::WistiaError;

/// Operations on per-media player customizations.
#[derive(Debug, Clone, Copy)]
pub struct Customizations<'c> {
    client: &'c WistiaClient,
}

impl<'c> Customizations<'c> {
    pub(crate) const fn new(client: &'c WistiaClient) -> Self {
        Self { client }
    }

    fn customizations_url(&self, media_id: &str) -> String {
        self.client.api_url(&format!(
            "medias/{}/customizations.json",
            path_segment(media_id)
        ))
    }

    pub async fn create(&self, customization: &Customization) -> Result<Customization, WistiaError> {
        self.send(Method::POST, customization).await
    }

    pub async fn get(&self, media_id: &str) -> Result<Customization, WistiaError> {
        let url = self.customizations_url(media_id);
        let mut fetched: Customization =
            self.client.request(Method::GET, &url, None::<&()>).await?;
        fetched.media_id = media_id.to_string();
        Ok(fetched)
    }

    /// Full-replace update; unset options are not sent.
    pub async fn update(&self, customization: &Customization) -> Result<Customization, WistiaError> {
        self.send(Method::PUT, customization).await
    }

    pub async fn delete(&self, media_id: &str) -> Result<(), WistiaError> {
        let url = self.customizations_url(media_id);
        self.client
            .request_empty(Method::DELETE, &url, None::<&()>)
            .await
    }

    async fn send(
        &self,
        method: Method,
        customization: &Customization,
    ) -> Result<Customization, WistiaError> {
        let url = self.customizations_url(&customization.media_id);
        let mut saved: Customization = self
            .client
            .request(method, &url, Some(customization))
            .await?;
        saved.media_id.clone_from(&customization.media_id);
        Ok(saved)
    }
}
