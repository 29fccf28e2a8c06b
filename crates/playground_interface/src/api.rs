//! The remote connector API seam.

use crate::{Connection, FieldUpdate, ListRecordsOptions, Session, SessionCredentials, SessionRequest};
use async_trait::async_trait;
use playground_core::{FieldDescriptor, Record};
use playground_error::ApiResult;
use std::sync::Arc;

/// Operations offered by the hosted connector service.
///
/// Implementations must not retry or cache on their own; the browser decides
/// what to cache and how failures surface.
#[async_trait]
pub trait ConnectorApi: Send + Sync {
    /// Creates a session token for `owner_id` on `connector_id`.
    async fn create_session(&self, request: &SessionRequest) -> ApiResult<Session>;

    /// Retrieves the authorization status of the session's connection.
    async fn retrieve_connection(&self, credentials: &SessionCredentials) -> ApiResult<Connection>;

    /// Lists the connector's operations as `<model>::<verb>` strings.
    async fn list_capabilities(&self, credentials: &SessionCredentials) -> ApiResult<Vec<String>>;

    /// Lists the field descriptors of `model`.
    async fn list_fields(
        &self,
        credentials: &SessionCredentials,
        model: &str,
    ) -> ApiResult<Vec<FieldDescriptor>>;

    /// Lists records of `model`.
    async fn list_records(
        &self,
        credentials: &SessionCredentials,
        model: &str,
        options: &ListRecordsOptions,
    ) -> ApiResult<Vec<Record>>;

    /// Sets a single field of one record.
    async fn update_record_field(
        &self,
        credentials: &SessionCredentials,
        model: &str,
        record_id: &str,
        update: &FieldUpdate,
    ) -> ApiResult<()>;
}

#[async_trait]
impl<T> ConnectorApi for Arc<T>
where
    T: ConnectorApi + ?Sized,
{
    async fn create_session(&self, request: &SessionRequest) -> ApiResult<Session> {
        (**self).create_session(request).await
    }

    async fn retrieve_connection(&self, credentials: &SessionCredentials) -> ApiResult<Connection> {
        (**self).retrieve_connection(credentials).await
    }

    async fn list_capabilities(&self, credentials: &SessionCredentials) -> ApiResult<Vec<String>> {
        (**self).list_capabilities(credentials).await
    }

    async fn list_fields(
        &self,
        credentials: &SessionCredentials,
        model: &str,
    ) -> ApiResult<Vec<FieldDescriptor>> {
        (**self).list_fields(credentials, model).await
    }

    async fn list_records(
        &self,
        credentials: &SessionCredentials,
        model: &str,
        options: &ListRecordsOptions,
    ) -> ApiResult<Vec<Record>> {
        (**self).list_records(credentials, model, options).await
    }

    async fn update_record_field(
        &self,
        credentials: &SessionCredentials,
        model: &str,
        record_id: &str,
        update: &FieldUpdate,
    ) -> ApiResult<()> {
        (**self).update_record_field(credentials, model, record_id, update).await
    }
}
