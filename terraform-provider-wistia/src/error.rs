// Provider Error Types

use std::fmt;

use wistia_client::WistiaError;

/// Lifecycle operation a resource error happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Read => "get",
            Self::Update => "update",
            Self::Delete => "delete",
        })
    }
}

/// Resource adapter errors
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("couldn't {action} Wistia {resource}: {source}")]
    Operation {
        action: Action,
        resource: &'static str,
        #[source]
        source: WistiaError,
    },

    #[error("Invalid attributes: {0}")]
    InvalidAttributes(String),

    #[error("couldn't open file '{path}': {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown resource type: {0}")]
    UnknownResource(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid resource state: {0}")]
    State(#[from] serde_json::Error),
}

impl ProviderError {
    /// Wrap a client error with the operation and resource it came from.
    pub fn operation(action: Action, resource: &'static str) -> impl FnOnce(WistiaError) -> Self {
        move |source| Self::Operation {
            action,
            resource,
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;
