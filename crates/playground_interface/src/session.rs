//! Session and connection types.

use serde::{Deserialize, Serialize};

/// Public/secret key pair identifying the calling application.
///
/// The secret key is only needed server-side, to create sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct KeyPair {
    /// Publishable key
    public_key: String,
    /// Secret key, absent on the client side
    #[serde(default, skip_serializing)]
    secret_key: Option<String>,
}

impl KeyPair {
    /// Creates a key pair.
    pub fn new(public_key: impl Into<String>, secret_key: Option<String>) -> Self {
        Self {
            public_key: public_key.into(),
            secret_key,
        }
    }
}

/// Parameters for creating a session token.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct SessionRequest {
    /// Tenant identity the connection belongs to
    owner_id: String,
    /// Connector to connect
    connector_id: String,
    /// Keys used to authenticate the request
    keys: KeyPair,
    /// Operations the session is scoped to (empty means connector default)
    #[builder(default)]
    operations: Vec<String>,
}

impl SessionRequest {
    /// Returns a builder for constructing a SessionRequest.
    pub fn builder() -> SessionRequestBuilder {
        SessionRequestBuilder::default()
    }
}

/// A created session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Opaque session token
    pub session_token: String,
}

/// What every per-connection call needs: the session token and public key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_getters::Getters)]
pub struct SessionCredentials {
    session_token: String,
    public_key: String,
}

impl SessionCredentials {
    /// Creates credentials from a session token and public key.
    pub fn new(session_token: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            session_token: session_token.into(),
            public_key: public_key.into(),
        }
    }
}

/// Authorization status of a connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(from = "String", into = "String")]
pub enum ConnectionStatus {
    /// The owner has authorized the connector.
    #[display("authorized")]
    Authorized,
    /// Any other status reported by the service.
    #[display("{_0}")]
    Other(String),
}

impl ConnectionStatus {
    /// Whether the connection can be used to browse records.
    pub fn is_authorized(&self) -> bool {
        matches!(self, ConnectionStatus::Authorized)
    }
}

impl From<String> for ConnectionStatus {
    fn from(status: String) -> Self {
        if status == "authorized" {
            ConnectionStatus::Authorized
        } else {
            ConnectionStatus::Other(status)
        }
    }
}

impl From<ConnectionStatus> for String {
    fn from(status: ConnectionStatus) -> Self {
        status.to_string()
    }
}

/// A retrieved connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Authorization status
    pub status: ConnectionStatus,
}
