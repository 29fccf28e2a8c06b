//! reqwest-backed implementation of [`ConnectorApi`].

use crate::dto::{Capabilities, CreateSessionBody, Envelope, SessionConnection};
use async_trait::async_trait;
use playground_core::{FieldDescriptor, Record};
use playground_error::{ApiError, ApiErrorKind, ApiResult};
use playground_interface::{
    Connection, ConnectorApi, FieldUpdate, ListRecordsOptions, Session, SessionCredentials,
    SessionRequest,
};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

const PUBLIC_KEY_HEADER: &str = "x-api-key";
const SECRET_KEY_HEADER: &str = "x-secret-key";

/// Client for the hosted connector API.
///
/// Routes, relative to the base URL:
///
/// | Operation | Route |
/// |---|---|
/// | create session | `POST sessions` |
/// | retrieve connection | `GET connection` |
/// | list capabilities | `GET connection/operations` |
/// | list fields | `GET connection/models/{model}/fields` |
/// | list records | `GET connection/resources/{model}?limit=&fields=` |
/// | update record | `PATCH connection/resources/{model}/{id}` |
#[derive(Debug, Clone)]
pub struct HttpConnectorApi {
    client: Client,
    base_url: Url,
}

impl HttpConnectorApi {
    /// Creates a client for the API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL that can carry a path.
    #[instrument]
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::new(ApiErrorKind::Builder(format!("Invalid base URL: {}", e))))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::new(ApiErrorKind::Builder(format!(
                "Base URL cannot carry a path: {}",
                base_url
            ))));
        }
        debug!(url = %base_url, "Created connector API client");
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::new(ApiErrorKind::Builder("Base URL cannot carry a path".into())))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder, credentials: &SessionCredentials) -> RequestBuilder {
        request
            .bearer_auth(credentials.session_token())
            .header(PUBLIC_KEY_HEADER, credentials.public_key())
    }

    /// Sends a request and unwraps the response envelope.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<Option<T>> {
        let response = request.send().await.map_err(|e| {
            error!(error = ?e, "HTTP request failed");
            ApiError::new(ApiErrorKind::Http(format!("Request failed: {}", e)))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!(error = ?e, "Failed to read response body");
            ApiError::new(ApiErrorKind::Http(format!("Failed to read body: {}", e)))
        })?;

        if !status.is_success() {
            // Prefer the service's own message when the body is an envelope.
            let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.error)
                .and_then(|e| e.message)
                .unwrap_or(body);
            error!(status = %status, error = %message, "API error");
            return Err(ApiError::new(ApiErrorKind::Status {
                status: status.as_u16(),
                message,
            }));
        }

        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
            error!(error = ?e, "Failed to parse response");
            ApiError::new(ApiErrorKind::Decode(format!("Failed to parse JSON: {}", e)))
        })?;

        if let Some(remote) = envelope.error {
            error!(code = ?remote.code, message = ?remote.message, "Remote error");
            return Err(ApiError::new(ApiErrorKind::Remote(
                remote.message.unwrap_or_default(),
            )));
        }

        Ok(envelope.data)
    }
}

fn missing_data(operation: &str) -> ApiError {
    ApiError::new(ApiErrorKind::Decode(format!("{} response has no data", operation)))
}

#[async_trait]
impl ConnectorApi for HttpConnectorApi {
    #[instrument(skip(self, request), fields(owner = %request.owner_id(), connector = %request.connector_id()))]
    async fn create_session(&self, request: &SessionRequest) -> ApiResult<Session> {
        let body = CreateSessionBody {
            connection: SessionConnection {
                connector_id: request.connector_id(),
                owner_id: request.owner_id(),
                operations: request.operations(),
            },
        };
        let mut builder = self
            .client
            .post(self.url(&["sessions"])?)
            .header(PUBLIC_KEY_HEADER, request.keys().public_key())
            .json(&body);
        if let Some(secret) = request.keys().secret_key() {
            builder = builder.header(SECRET_KEY_HEADER, secret);
        }

        let session: Session = self
            .send(builder)
            .await?
            .ok_or_else(|| missing_data("Create session"))?;
        debug!("Session created");
        Ok(session)
    }

    #[instrument(skip(self, credentials))]
    async fn retrieve_connection(&self, credentials: &SessionCredentials) -> ApiResult<Connection> {
        let request = self.authorized(self.client.get(self.url(&["connection"])?), credentials);
        let connection: Connection = self
            .send(request)
            .await?
            .ok_or_else(|| missing_data("Retrieve connection"))?;
        debug!(status = %connection.status, "Connection retrieved");
        Ok(connection)
    }

    #[instrument(skip(self, credentials))]
    async fn list_capabilities(&self, credentials: &SessionCredentials) -> ApiResult<Vec<String>> {
        let request = self.authorized(
            self.client.get(self.url(&["connection", "operations"])?),
            credentials,
        );
        let capabilities: Option<Capabilities> = self.send(request).await?;
        let operations = capabilities.map(|c| c.operations).unwrap_or_default();
        debug!(count = operations.len(), "Capabilities listed");
        Ok(operations)
    }

    #[instrument(skip(self, credentials))]
    async fn list_fields(
        &self,
        credentials: &SessionCredentials,
        model: &str,
    ) -> ApiResult<Vec<FieldDescriptor>> {
        let request = self.authorized(
            self.client
                .get(self.url(&["connection", "models", model, "fields"])?),
            credentials,
        );
        let fields: Vec<FieldDescriptor> = self.send(request).await?.unwrap_or_default();
        debug!(count = fields.len(), "Fields listed");
        Ok(fields)
    }

    #[instrument(skip(self, credentials, options), fields(limit = options.limit(), projected = options.fields().is_some()))]
    async fn list_records(
        &self,
        credentials: &SessionCredentials,
        model: &str,
        options: &ListRecordsOptions,
    ) -> ApiResult<Vec<Record>> {
        let mut query = vec![("limit", options.limit().to_string())];
        if let Some(fields) = options.fields() {
            query.push(("fields", fields.join(",")));
        }
        let request = self.authorized(
            self.client
                .get(self.url(&["connection", "resources", model])?)
                .query(&query),
            credentials,
        );
        let records: Vec<Record> = self.send(request).await?.unwrap_or_default();
        debug!(count = records.len(), "Records listed");
        Ok(records)
    }

    #[instrument(skip(self, credentials, update), fields(field = %update.field()))]
    async fn update_record_field(
        &self,
        credentials: &SessionCredentials,
        model: &str,
        record_id: &str,
        update: &FieldUpdate,
    ) -> ApiResult<()> {
        let request = self.authorized(
            self.client
                .patch(self.url(&["connection", "resources", model, record_id])?)
                .json(&update.to_body()),
            credentials,
        );
        let _: Option<serde_json::Value> = self.send(request).await?;
        debug!("Record updated");
        Ok(())
    }
}
