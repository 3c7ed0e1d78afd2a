// Wistia Data API Client
//
// Pure HTTP client for the Wistia projects, medias and customizations
// endpoints. It has no knowledge of the resource adapters built on top of it
// and can be used standalone.
//
// Architecture:
// - client: configuration, endpoints and the JSON transport
// - project / media / customization: one resource view each (CRUD + wire types)

pub mod client;
pub mod customization;
pub mod error;
pub mod media;
pub mod project;
mod serde_helpers;

// Re-export client types for convenience
pub use client::{ClientBuilder, ClientConfig, Environment, WistiaClient, USER_AGENT_VALUE};
pub use customization::{Customization, Customizations};
pub use error::WistiaError;
pub use media::{Media, MediaStatus, MediaType, Medias, ProjectRef};
pub use project::{Project, Projects};
