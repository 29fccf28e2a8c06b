//! Wire envelopes for the hosted connector API.

use serde::{Deserialize, Serialize};

/// Every response is wrapped as `{"data": ..., "error": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<RemoteError>,
}

/// Error object carried in an envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RemoteError {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

/// Capability listing payload.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Capabilities {
    #[serde(default)]
    pub operations: Vec<String>,
}

/// Body of a session creation request.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateSessionBody<'a> {
    pub connection: SessionConnection<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionConnection<'a> {
    pub connector_id: &'a str,
    pub owner_id: &'a str,
    #[serde(skip_serializing_if = "no_operations")]
    pub operations: &'a [String],
}

fn no_operations(operations: &&[String]) -> bool {
    operations.is_empty()
}
