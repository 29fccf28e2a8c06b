//! Session setup and connection status for the browsing page.

use crate::ResourceBrowser;
use playground_error::{ApiError, SessionError, SessionErrorKind};
use playground_interface::{ConnectorApi, KeyPair, SessionCredentials, SessionRequest};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Owns the session for one (owner, connector) pair and tracks whether the
/// connection is usable.
///
/// Session creation failures are page-level: [`Self::establish`] returns an
/// error and no browser is created. Later connection problems only flip the
/// connected flag and record a message.
#[derive(Debug)]
pub struct ConnectionHost<A: ?Sized> {
    api: Arc<A>,
    owner_id: String,
    connector_id: String,
    credentials: SessionCredentials,
    available: bool,
    connected: bool,
    error: Option<String>,
}

impl<A> ConnectionHost<A>
where
    A: ConnectorApi + ?Sized,
{
    /// Creates a session token for `owner_id` on `connector_id`.
    ///
    /// `available` says whether the connector is fully configured; when it
    /// is not, `keys` are expected to be the demo pair.
    #[instrument(skip(api, keys))]
    pub async fn establish(
        api: Arc<A>,
        owner_id: &str,
        connector_id: &str,
        keys: KeyPair,
        available: bool,
    ) -> Result<Self, SessionError> {
        let public_key = keys.public_key().clone();
        let request = SessionRequest::builder()
            .owner_id(owner_id)
            .connector_id(connector_id)
            .keys(keys)
            .build()
            .map_err(|e| SessionError::new(SessionErrorKind::Create(e.to_string())))?;

        let session = api.create_session(&request).await.map_err(|e| {
            error!(error = %e, "Session creation failed");
            SessionError::new(SessionErrorKind::Create(describe(&e)))
        })?;
        info!("Session created");

        if !available {
            warn!("Connector is not fully configured, using demo keys");
        }

        Ok(Self {
            api,
            owner_id: owner_id.to_string(),
            connector_id: connector_id.to_string(),
            credentials: SessionCredentials::new(session.session_token, public_key),
            available,
            connected: false,
            error: None,
        })
    }

    /// Retrieves the connection and records whether it is authorized.
    ///
    /// Failures are logged and count as not connected.
    #[instrument(skip(self), fields(connector = %self.connector_id))]
    pub async fn check_connection(&mut self) -> bool {
        match self.api.retrieve_connection(&self.credentials).await {
            Ok(connection) => {
                debug!(status = %connection.status, "Connection retrieved");
                self.connected = connection.status.is_authorized();
                if self.connected {
                    self.error = None;
                }
            }
            Err(e) => {
                warn!(error = %e, "Connection check failed");
                self.connected = false;
            }
        }
        self.connected
    }

    /// Like [`Self::check_connection`], but an unauthorized or unreachable
    /// connection is an error.
    pub async fn require_connection(&mut self) -> Result<(), SessionError> {
        match self.api.retrieve_connection(&self.credentials).await {
            Ok(connection) if connection.status.is_authorized() => {
                self.authorized();
                Ok(())
            }
            Ok(connection) => {
                self.connected = false;
                Err(SessionError::new(SessionErrorKind::NotAuthorized(
                    connection.status.to_string(),
                )))
            }
            Err(e) => {
                self.connected = false;
                Err(SessionError::new(SessionErrorKind::Retrieve(describe(&e))))
            }
        }
    }

    /// The connect flow reported success.
    pub fn authorized(&mut self) {
        info!(connector = %self.connector_id, "Connection authorized");
        self.connected = true;
        self.error = None;
    }

    /// The connect flow reported a failure.
    pub fn on_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        error!(connector = %self.connector_id, %message, "Connection error");
        self.error = Some(message);
    }

    /// Notice shown for connectors that run on demo keys with mocked data.
    pub fn unavailable_notice(&self) -> Option<String> {
        (!self.available).then(|| {
            format!(
                "{} is using mocked data in the playground as it requires a private client id and secret.",
                self.connector_id
            )
        })
    }

    /// Creates a browser bound to this session with the given page size.
    pub fn browser(&self, limit: u32) -> ResourceBrowser<A> {
        ResourceBrowser::new(
            Arc::clone(&self.api),
            self.connector_id.clone(),
            self.credentials.clone(),
        )
        .with_limit(limit)
    }

    /// Pushes the current connection state to `browser`.
    pub async fn sync(&self, browser: &ResourceBrowser<A>) {
        browser.set_connected(self.connected).await;
    }

    /// Whether the connection is authorized.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Last error reported by the connect flow.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Session credentials for per-connection calls.
    pub fn credentials(&self) -> &SessionCredentials {
        &self.credentials
    }

    /// Tenant identity of the session.
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// Connector of the session.
    pub fn connector_id(&self) -> &str {
        &self.connector_id
    }
}

fn describe(err: &ApiError) -> String {
    err.user_message()
        .map(str::to_string)
        .unwrap_or_else(|| err.kind().to_string())
}
