// Wistia resource provider
//
// Adapts the Wistia client to a declarative-infrastructure host: resource
// schemas, CRUD adapters mapping attribute states to API entities, and the
// line-delimited JSON loop the host talks to.

pub mod config;
pub mod error;
pub mod logging;
pub mod resources;
pub mod schema;
pub mod server;

pub use config::{LoggingConfig, ProviderConfig};
pub use error::{Action, ProviderError};
pub use resources::{DynResource, Resource, ResourceRegistry};
pub use server::ProviderServer;
