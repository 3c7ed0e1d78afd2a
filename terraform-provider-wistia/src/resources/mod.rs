// Resource adapters
//
// Each adapter maps a flat attribute state to a Wistia entity, calls the
// client, and maps the answer back. The host only ever sees JSON states, so
// typed adapters are erased behind `DynResource` and looked up by type name
// in a `ResourceRegistry`.

mod customization;
mod media;
mod project;

pub use customization::{CustomizationResource, CustomizationState};
pub use media::{MediaResource, MediaSource, MediaState};
pub use project::{ProjectResource, ProjectState};

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::debug;
use wistia_client::WistiaClient;

use crate::error::{Action, ProviderError, Result};
use crate::schema::ResourceSchema;

/// A Wistia object managed as a declarative resource.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Flat attribute state exchanged with the host.
    type State: Serialize + DeserializeOwned + Send + Sync;

    fn type_name(&self) -> &'static str;

    fn schema(&self) -> ResourceSchema;

    async fn create(&self, client: &WistiaClient, desired: &Self::State) -> Result<Self::State>;

    /// Refresh `current` from the API, keyed by its resource id.
    async fn read(&self, client: &WistiaClient, current: &Self::State) -> Result<Self::State>;

    async fn update(&self, client: &WistiaClient, desired: &Self::State) -> Result<Self::State>;

    async fn delete(&self, client: &WistiaClient, current: &Self::State) -> Result<()>;
}

/// Object-safe view of a [`Resource`] working on JSON states.
#[async_trait]
pub trait DynResource: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> ResourceSchema;

    /// Run `action` on `state`. Returns the new state, or `None` after a
    /// delete.
    async fn apply(&self, client: &WistiaClient, action: Action, state: Value)
        -> Result<Option<Value>>;
}

#[async_trait]
impl<R: Resource> DynResource for R {
    fn type_name(&self) -> &'static str {
        Resource::type_name(self)
    }

    fn schema(&self) -> ResourceSchema {
        Resource::schema(self)
    }

    async fn apply(
        &self,
        client: &WistiaClient,
        action: Action,
        state: Value,
    ) -> Result<Option<Value>> {
        if matches!(action, Action::Create | Action::Update) {
            Resource::schema(self).check_desired(&state)?;
        }
        let typed: R::State = serde_json::from_value(state)?;
        debug!(resource = Resource::type_name(self), %action, "Applying resource action");

        let next = match action {
            Action::Create => Some(self.create(client, &typed).await?),
            Action::Read => Some(self.read(client, &typed).await?),
            Action::Update => Some(self.update(client, &typed).await?),
            Action::Delete => {
                self.delete(client, &typed).await?;
                None
            }
        };
        next.map(|s| serde_json::to_value(s).map_err(ProviderError::from))
            .transpose()
    }
}

/// Resources served by this provider, by type name.
#[derive(Clone, Default)]
pub struct ResourceRegistry {
    resources: BTreeMap<&'static str, Arc<dyn DynResource>>,
}

impl ResourceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every Wistia resource.
    #[must_use]
    pub fn wistia() -> Self {
        let mut registry = Self::new();
        registry.register(ProjectResource);
        registry.register(MediaResource);
        registry.register(CustomizationResource);
        registry
    }

    pub fn register<R: DynResource + 'static>(&mut self, resource: R) {
        self.resources
            .insert(DynResource::type_name(&resource), Arc::new(resource));
    }

    pub fn get(&self, type_name: &str) -> Result<&dyn DynResource> {
        self.resources
            .get(type_name)
            .map(AsRef::as_ref)
            .ok_or_else(|| ProviderError::UnknownResource(type_name.to_string()))
    }

    /// Schemas of all registered resources, sorted by type name.
    #[must_use]
    pub fn schemas(&self) -> Vec<ResourceSchema> {
        self.resources.values().map(|r| r.schema()).collect()
    }
}

/// `Some` only for non-empty strings.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
