//! In-memory `ConnectorApi` with call counting and gated responses.

use async_trait::async_trait;
use playground_core::{FieldDescriptor, Record};
use playground_error::{ApiError, ApiErrorKind, ApiResult};
use playground_interface::{
    Connection, ConnectionStatus, ConnectorApi, FieldUpdate, ListRecordsOptions, Session,
    SessionCredentials, SessionRequest,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

#[derive(Debug, Default)]
struct MockState {
    session_error: Option<String>,
    status: Option<String>,
    connection_error: Option<String>,
    operations: Vec<String>,
    operations_error: Option<String>,
    fields: HashMap<String, Vec<FieldDescriptor>>,
    field_errors: HashMap<String, String>,
    records: HashMap<String, Vec<Record>>,
    record_errors: HashMap<String, String>,
    update_error: Option<String>,
    gates: HashMap<String, Arc<Notify>>,
    field_gates: HashMap<String, Arc<Notify>>,
    capability_gate: Option<Arc<Notify>>,
    session_requests: Vec<SessionRequest>,
    list_requests: Vec<(String, ListRecordsOptions)>,
    updates: Vec<(String, String, FieldUpdate)>,
}

/// Mock connector service.
///
/// Records are served from memory, trimmed to the requested limit and to the
/// requested projection. Accepted updates are applied to the stored records
/// so a refresh sees them.
#[derive(Debug, Default)]
pub struct MockConnectorApi {
    state: Mutex<MockState>,
    capability_calls: AtomicUsize,
    field_calls: AtomicUsize,
    record_calls: AtomicUsize,
    update_calls: AtomicUsize,
}

#[allow(dead_code)]
impl MockConnectorApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().expect("mock state poisoned")
    }

    pub fn with_operations(self, operations: &[&str]) -> Self {
        self.state().operations = operations.iter().map(|o| o.to_string()).collect();
        self
    }

    pub fn with_fields(self, model: &str, fields: Vec<FieldDescriptor>) -> Self {
        self.state().fields.insert(model.to_string(), fields);
        self
    }

    pub fn with_records(self, model: &str, records: Vec<Record>) -> Self {
        self.state().records.insert(model.to_string(), records);
        self
    }

    pub fn with_status(self, status: &str) -> Self {
        self.state().status = Some(status.to_string());
        self
    }

    pub fn fail_sessions(&self, message: &str) {
        self.state().session_error = Some(message.to_string());
    }

    pub fn fail_connection(&self, message: &str) {
        self.state().connection_error = Some(message.to_string());
    }

    pub fn fail_operations(&self, message: &str) {
        self.state().operations_error = Some(message.to_string());
    }

    pub fn fail_fields(&self, model: &str, message: &str) {
        self.state()
            .field_errors
            .insert(model.to_string(), message.to_string());
    }

    pub fn fail_records(&self, model: &str, message: &str) {
        self.state()
            .record_errors
            .insert(model.to_string(), message.to_string());
    }

    pub fn clear_record_failure(&self, model: &str) {
        self.state().record_errors.remove(model);
    }

    pub fn fail_updates(&self, message: &str) {
        self.state().update_error = Some(message.to_string());
    }

    /// Holds record listings for `model` until the returned gate is notified.
    pub fn gate_records(&self, model: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state()
            .gates
            .insert(model.to_string(), Arc::clone(&gate));
        gate
    }

    pub fn ungate_records(&self, model: &str) {
        self.state().gates.remove(model);
    }

    /// Holds field metadata requests for `model` until the returned gate is notified.
    pub fn gate_fields(&self, model: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state()
            .field_gates
            .insert(model.to_string(), Arc::clone(&gate));
        gate
    }

    /// Holds capability discovery until the returned gate is notified.
    pub fn gate_capabilities(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state().capability_gate = Some(Arc::clone(&gate));
        gate
    }

    pub fn capability_calls(&self) -> usize {
        self.capability_calls.load(Ordering::SeqCst)
    }

    pub fn field_calls(&self) -> usize {
        self.field_calls.load(Ordering::SeqCst)
    }

    pub fn record_calls(&self) -> usize {
        self.record_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn session_requests(&self) -> Vec<SessionRequest> {
        self.state().session_requests.clone()
    }

    pub fn list_requests(&self) -> Vec<(String, ListRecordsOptions)> {
        self.state().list_requests.clone()
    }

    pub fn updates(&self) -> Vec<(String, String, FieldUpdate)> {
        self.state().updates.clone()
    }
}

fn remote(message: &str) -> ApiError {
    ApiError::new(ApiErrorKind::Remote(message.to_string()))
}

#[async_trait]
impl ConnectorApi for MockConnectorApi {
    async fn create_session(&self, request: &SessionRequest) -> ApiResult<Session> {
        let mut state = self.state();
        state.session_requests.push(request.clone());
        if let Some(message) = &state.session_error {
            return Err(remote(message));
        }
        Ok(Session {
            session_token: format!("tok-{}", request.owner_id()),
        })
    }

    async fn retrieve_connection(&self, _credentials: &SessionCredentials) -> ApiResult<Connection> {
        let state = self.state();
        if let Some(message) = &state.connection_error {
            return Err(remote(message));
        }
        let status = state.status.clone().unwrap_or_else(|| "authorized".to_string());
        Ok(Connection {
            status: ConnectionStatus::from(status),
        })
    }

    async fn list_capabilities(&self, _credentials: &SessionCredentials) -> ApiResult<Vec<String>> {
        self.capability_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.state().capability_gate.clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let state = self.state();
        match &state.operations_error {
            Some(message) => Err(remote(message)),
            None => Ok(state.operations.clone()),
        }
    }

    async fn list_fields(
        &self,
        _credentials: &SessionCredentials,
        model: &str,
    ) -> ApiResult<Vec<FieldDescriptor>> {
        self.field_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.state().field_gates.get(model).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let state = self.state();
        if let Some(message) = state.field_errors.get(model) {
            return Err(remote(message));
        }
        Ok(state.fields.get(model).cloned().unwrap_or_default())
    }

    async fn list_records(
        &self,
        _credentials: &SessionCredentials,
        model: &str,
        options: &ListRecordsOptions,
    ) -> ApiResult<Vec<Record>> {
        self.record_calls.fetch_add(1, Ordering::SeqCst);
        let gate = {
            let mut state = self.state();
            state
                .list_requests
                .push((model.to_string(), options.clone()));
            state.gates.get(model).cloned()
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let state = self.state();
        if let Some(message) = state.record_errors.get(model) {
            return Err(remote(message));
        }
        let records = state.records.get(model).cloned().unwrap_or_default();
        Ok(records
            .into_iter()
            .take(*options.limit() as usize)
            .map(|record| match options.fields() {
                Some(projection) => {
                    let mut projected = Record::new(record.id().clone());
                    for field in projection {
                        if let Some(value) = record.field(field) {
                            projected = projected.with_field(field.clone(), value.clone());
                        }
                    }
                    projected
                }
                None => record,
            })
            .collect())
    }

    async fn update_record_field(
        &self,
        _credentials: &SessionCredentials,
        model: &str,
        record_id: &str,
        update: &FieldUpdate,
    ) -> ApiResult<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state();
        state
            .updates
            .push((model.to_string(), record_id.to_string(), update.clone()));
        if let Some(message) = &state.update_error {
            return Err(remote(message));
        }
        if let Some(records) = state.records.get_mut(model) {
            for record in records.iter_mut().filter(|r| r.id() == record_id) {
                *record = record
                    .clone()
                    .with_field(update.field().clone(), update.value().clone());
            }
        }
        Ok(())
    }
}
