//! Error type for every Fabric client operation.
//!
//! # Design
//! Local precondition failures (`MissingAgentId`) are distinct from remote
//! failures (`Api`) so callers can tell "never sent" from "server said no".
//! Transport failures keep the underlying client's error as their source.

use thiserror::Error;

/// Errors returned by `Fabric`, `FabricAsync` and `FabricClient`.
#[derive(Debug, Error)]
pub enum FabricError {
    /// No agent id was passed and the client has no default agent id.
    #[error("{operation}: agent id is required")]
    MissingAgentId { operation: &'static str },

    /// The client was constructed with an empty API key.
    #[error("api key is required")]
    MissingApiKey,

    /// A numeric argument was NaN or infinite; JSON cannot carry it.
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    /// The configured base URL could not be parsed.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// The server returned a non-2xx status.
    #[error("{code} (HTTP {status}): {message}")]
    Api {
        code: String,
        message: String,
        status: u16,
    },

    /// A response lacked a field a follow-up request depends on.
    #[error("response is missing `{field}`")]
    MissingField { field: &'static str },

    /// The handle was closed before this call.
    #[error("client is closed")]
    Closed,

    /// The request payload could not be serialized to JSON.
    #[error("failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A response body (success or error) was not JSON.
    #[error("failed to decode response body (HTTP {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// Transport failure in the blocking client.
    #[error("transport error: {0}")]
    Transport(#[from] ureq::Error),

    /// Transport failure in the async client.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl FabricError {
    /// True when the failure came back from the Fabric API itself.
    pub fn is_api_error(&self) -> bool {
        matches!(self, FabricError::Api { .. })
    }

    /// HTTP status of a remote failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            FabricError::Api { status, .. } | FabricError::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Machine-readable code of a remote failure.
    pub fn code(&self) -> Option<&str> {
        match self {
            FabricError::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}
