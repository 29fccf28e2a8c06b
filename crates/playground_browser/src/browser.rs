//! The resource browser.

use crate::{
    CellEditor, CommitAction, FieldGroups, Generation, PinnedFields, discover_models,
    group_unpinned_fields, project_columns,
};
use playground_cache::FieldMetadataCache;
use playground_core::{FieldDescriptor, Record, format_column_name};
use playground_error::{ApiError, EditError};
use playground_interface::{ConnectorApi, ListRecordsOptions, SessionCredentials};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument};

/// Page size used until the user changes it.
const DEFAULT_PAGE_SIZE: u32 = 3;

/// What the browser can show at the top level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIs)]
pub enum BrowserStatus {
    /// No live connection.
    #[strum(to_string = "Connect to load resources")]
    Disconnected,
    /// Connected, capabilities not yet known.
    #[strum(to_string = "Loading models")]
    LoadingModels,
    /// Connected, but no model supports listing.
    #[strum(to_string = "No list operations available")]
    NoModels,
    /// At least one model can be browsed.
    #[strum(to_string = "Ready")]
    Ready,
}

/// Progress of the record load for the selected model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIs)]
#[strum(serialize_all = "lowercase")]
pub enum LoadPhase {
    /// No load in flight.
    #[default]
    Idle,
    /// First load for the model; nothing to show yet.
    Loading,
    /// Reload while earlier records stay on screen.
    Refreshing,
}

/// Result of committing a cell edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The draft matched the stored value and nothing was sent.
    Unchanged,
    /// The service accepted the update and records were reloaded.
    Saved,
    /// The service rejected the update with this message.
    Failed(String),
}

/// Snapshot of everything the browser displays.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct BrowserView {
    /// Top-level status
    status: BrowserStatus,
    /// Listable models, in discovery order
    models: Vec<String>,
    /// Currently selected model
    selected_model: Option<String>,
    /// Field metadata for the selected model
    model_fields: Vec<FieldDescriptor>,
    /// Pinned fields, in pin order
    pinned: Vec<String>,
    /// Records of the last successful load
    records: Vec<Record>,
    /// Columns derived from the records and pins
    columns: Vec<String>,
    /// Page size
    limit: u32,
    /// Record load progress
    phase: LoadPhase,
    /// Message from the last failed record load
    error: Option<String>,
}

#[derive(Debug)]
struct BrowserState {
    connected: bool,
    torn_down: bool,
    models: Vec<String>,
    models_loading: bool,
    selected_model: Option<String>,
    model_fields: Vec<FieldDescriptor>,
    pinned: PinnedFields,
    records: Vec<Record>,
    columns: Vec<String>,
    limit: u32,
    phase: LoadPhase,
    error: Option<String>,
    cache: FieldMetadataCache,
    models_generation: Generation,
    fields_generation: Generation,
    records_generation: Generation,
}

impl BrowserState {
    fn new() -> Self {
        Self {
            connected: false,
            torn_down: false,
            models: Vec::new(),
            models_loading: false,
            selected_model: None,
            model_fields: Vec::new(),
            pinned: PinnedFields::new(),
            records: Vec::new(),
            columns: Vec::new(),
            limit: DEFAULT_PAGE_SIZE,
            phase: LoadPhase::Idle,
            error: None,
            cache: FieldMetadataCache::default(),
            models_generation: Generation::default(),
            fields_generation: Generation::default(),
            records_generation: Generation::default(),
        }
    }

    fn is_live(&self) -> bool {
        self.connected && !self.torn_down
    }

    fn status(&self) -> BrowserStatus {
        if !self.connected {
            BrowserStatus::Disconnected
        } else if self.models.is_empty() && self.models_loading {
            BrowserStatus::LoadingModels
        } else if self.models.is_empty() {
            BrowserStatus::NoModels
        } else {
            BrowserStatus::Ready
        }
    }

    /// Drops everything tied to the selected model and supersedes its loads.
    fn reset_model_data(&mut self) {
        self.pinned.clear();
        self.columns.clear();
        self.records.clear();
        self.model_fields.clear();
        self.error = None;
        self.phase = LoadPhase::Idle;
        self.fields_generation.invalidate();
        self.records_generation.invalidate();
    }

    fn view(&self) -> BrowserView {
        BrowserView {
            status: self.status(),
            models: self.models.clone(),
            selected_model: self.selected_model.clone(),
            model_fields: self.model_fields.clone(),
            pinned: self.pinned.to_vec(),
            records: self.records.clone(),
            columns: self.columns.clone(),
            limit: self.limit,
            phase: self.phase,
            error: self.error.clone(),
        }
    }
}

/// Browses the records of one connection.
///
/// All operations take `&self` and may run concurrently. Each load records a
/// generation ticket before awaiting the service and applies its result only
/// if the ticket is still current, so a slow response for a model the user
/// already left never overwrites newer state. After [`Self::teardown`] every
/// in-flight result is discarded.
///
/// # Examples
///
/// ```no_run
/// # async fn demo(api: std::sync::Arc<impl playground_interface::ConnectorApi>) {
/// use playground_browser::ResourceBrowser;
/// use playground_interface::SessionCredentials;
///
/// let browser = ResourceBrowser::new(api, "hubspot", SessionCredentials::new("tok", "pk"));
/// browser.set_connected(true).await;
/// let view = browser.view().await;
/// println!("{} models, columns {:?}", view.models().len(), view.columns());
/// # }
/// ```
pub struct ResourceBrowser<A: ?Sized> {
    api: Arc<A>,
    connector_id: String,
    credentials: SessionCredentials,
    state: Mutex<BrowserState>,
}

impl<A> ResourceBrowser<A>
where
    A: ConnectorApi + ?Sized,
{
    /// Creates a disconnected browser for `connector_id`.
    pub fn new(
        api: Arc<A>,
        connector_id: impl Into<String>,
        credentials: SessionCredentials,
    ) -> Self {
        Self {
            api,
            connector_id: connector_id.into(),
            credentials,
            state: Mutex::new(BrowserState::new()),
        }
    }

    /// Sets the initial page size (at least 1).
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.state.get_mut().limit = limit.max(1);
        self
    }

    /// Uses `cache` for field metadata instead of a fresh wall-clock cache.
    pub fn with_field_cache(mut self, cache: FieldMetadataCache) -> Self {
        self.state.get_mut().cache = cache;
        self
    }

    /// Connector being browsed.
    pub fn connector_id(&self) -> &str {
        &self.connector_id
    }

    /// Current display snapshot.
    pub async fn view(&self) -> BrowserView {
        self.state.lock().await.view()
    }

    /// Current top-level status.
    pub async fn status(&self) -> BrowserStatus {
        self.state.lock().await.status()
    }

    /// Informs the browser whether a live connection exists.
    ///
    /// Connecting loads models and selects the first one. Disconnecting
    /// clears everything shown and supersedes every in-flight load.
    #[instrument(skip(self), fields(connector = %self.connector_id))]
    pub async fn set_connected(&self, connected: bool) {
        {
            let mut state = self.state.lock().await;
            if state.torn_down {
                return;
            }
            state.connected = connected;
            if !connected {
                state.models_generation.invalidate();
                state.models.clear();
                state.models_loading = false;
                state.selected_model = None;
                state.reset_model_data();
                info!("Browser disconnected");
                return;
            }
        }
        self.load_models().await;
    }

    /// Discovers listable models and selects the first one.
    #[instrument(skip(self), fields(connector = %self.connector_id))]
    pub async fn load_models(&self) {
        let ticket = {
            let mut state = self.state.lock().await;
            if !state.is_live() {
                return;
            }
            state.models_loading = true;
            state.models_generation.begin()
        };

        let models = discover_models(self.api.as_ref(), &self.credentials).await;

        let first = {
            let mut state = self.state.lock().await;
            if state.torn_down || !state.models_generation.is_current(ticket) {
                debug!("Discarding superseded model discovery");
                return;
            }
            state.models = models;
            state.models_loading = false;
            state.models.first().cloned()
        };

        match first {
            Some(model) => self.select_model(&model).await,
            None => info!("No listable models on this connection"),
        }
    }

    /// Switches to `model` and loads its fields and records together.
    ///
    /// Pins, columns, records, field metadata and the error are cleared
    /// before anything is awaited.
    #[instrument(skip(self), fields(connector = %self.connector_id))]
    pub async fn select_model(&self, model: &str) {
        {
            let mut state = self.state.lock().await;
            if !state.is_live() {
                return;
            }
            state.selected_model = Some(model.to_string());
            state.reset_model_data();
        }
        tokio::join!(self.load_fields(true), self.load_records());
    }

    /// Reloads field metadata for the selected model, bypassing the cache.
    pub async fn refresh_fields(&self) {
        self.load_fields(false).await;
    }

    /// Reloads records for the selected model with the current limit and pins.
    pub async fn refresh_records(&self) {
        self.load_records().await;
    }

    /// Field descriptors for `model`, served from the cache when fresh.
    ///
    /// Fetch failures are logged and yield an empty list; they are never
    /// cached, so the next call tries the service again.
    #[instrument(skip(self), fields(connector = %self.connector_id))]
    pub async fn get_fields(&self, model: &str, use_cache: bool) -> Vec<FieldDescriptor> {
        if use_cache {
            let state = self.state.lock().await;
            if let Some(fields) = state.cache.get(&self.connector_id, model) {
                return fields.to_vec();
            }
        }

        match self.api.list_fields(&self.credentials, model).await {
            Ok(fields) => {
                debug!(count = fields.len(), "Fetched field metadata");
                let mut state = self.state.lock().await;
                state
                    .cache
                    .insert(&self.connector_id, model, fields.clone());
                fields
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch field metadata");
                Vec::new()
            }
        }
    }

    async fn load_fields(&self, use_cache: bool) {
        let (ticket, model) = {
            let mut state = self.state.lock().await;
            if !state.is_live() {
                return;
            }
            let Some(model) = state.selected_model.clone() else {
                state.model_fields.clear();
                return;
            };
            (state.fields_generation.begin(), model)
        };

        let fields = self.get_fields(&model, use_cache).await;

        let mut state = self.state.lock().await;
        if state.torn_down || !state.fields_generation.is_current(ticket) {
            debug!(%model, "Discarding superseded field metadata");
            return;
        }
        state.model_fields = fields;
    }

    async fn load_records(&self) {
        let (ticket, model, options) = {
            let mut state = self.state.lock().await;
            if !state.is_live() {
                return;
            }
            let Some(model) = state.selected_model.clone() else {
                state.records.clear();
                state.columns.clear();
                return;
            };
            state.phase = if state.records.is_empty() {
                LoadPhase::Loading
            } else {
                LoadPhase::Refreshing
            };
            state.error = None;
            let options = ListRecordsOptions::new(state.limit).with_fields(state.pinned.to_vec());
            (state.records_generation.begin(), model, options)
        };

        let result = self
            .api
            .list_records(&self.credentials, &model, &options)
            .await;

        let mut state = self.state.lock().await;
        if state.torn_down || !state.records_generation.is_current(ticket) {
            debug!(%model, "Discarding superseded records");
            return;
        }
        state.phase = LoadPhase::Idle;
        match result {
            Ok(records) => {
                debug!(%model, count = records.len(), "Loaded records");
                let columns = project_columns(&records, &state.pinned);
                state.columns = columns;
                state.records = records;
            }
            Err(e) => {
                error!(%model, error = %e, "Failed to load records");
                state.error = Some(failure_message(&e, || format!("Failed to load {}", model)));
            }
        }
    }

    /// Sets the page size (at least 1) and reloads records.
    pub async fn set_limit(&self, limit: u32) {
        self.state.lock().await.limit = limit.max(1);
        self.load_records().await;
    }

    /// Shows one more record per page.
    pub async fn increment_limit(&self) {
        {
            let mut state = self.state.lock().await;
            state.limit = state.limit.saturating_add(1);
        }
        self.load_records().await;
    }

    /// Shows one fewer record per page, never fewer than one.
    pub async fn decrement_limit(&self) {
        {
            let mut state = self.state.lock().await;
            if state.limit <= 1 {
                return;
            }
            state.limit -= 1;
        }
        self.load_records().await;
    }

    /// Pins or unpins `field` and reloads records with the new projection.
    #[instrument(skip(self))]
    pub async fn toggle_field(&self, field: &str) {
        self.state.lock().await.pinned.toggle(field);
        self.load_records().await;
    }

    /// Pins `field`; a field that is already pinned changes nothing.
    #[instrument(skip(self))]
    pub async fn add_field(&self, field: &str) {
        let added = self.state.lock().await.pinned.add(field);
        if added {
            self.load_records().await;
        }
    }

    /// Unpins `field`; a field that is not pinned changes nothing.
    #[instrument(skip(self))]
    pub async fn remove_field(&self, field: &str) {
        let removed = self.state.lock().await.pinned.remove(field);
        if removed {
            self.load_records().await;
        }
    }

    /// Pins several fields at once with a single reload.
    #[instrument(skip(self))]
    pub async fn pin_fields(&self, fields: &[String]) {
        let added = {
            let mut state = self.state.lock().await;
            fields
                .iter()
                .fold(false, |added, field| state.pinned.add(field.as_str()) || added)
        };
        if added {
            self.load_records().await;
        }
    }

    /// Fields of the selected model that can still be pinned.
    pub async fn available_fields(&self) -> FieldGroups {
        let state = self.state.lock().await;
        group_unpinned_fields(&state.model_fields, &state.pinned)
    }

    /// Header text for `column`: the field's name, then its display name,
    /// then the identifier split into capitalised words.
    pub async fn column_label(&self, column: &str) -> String {
        let state = self.state.lock().await;
        state
            .model_fields
            .iter()
            .find(|f| f.id() == column)
            .and_then(FieldDescriptor::label)
            .map(str::to_string)
            .unwrap_or_else(|| format_column_name(column))
    }

    /// Opens an editor for one cell of a loaded record.
    ///
    /// Returns `None` when no model is selected or the record is not loaded.
    pub async fn edit_cell(&self, record_id: &str, field: &str) -> Option<CellEditor> {
        let state = self.state.lock().await;
        let model = state.selected_model.as_ref()?;
        let record = state.records.iter().find(|r| r.id() == record_id)?;
        Some(CellEditor::new(
            model.clone(),
            record_id,
            field,
            record.field(field),
        ))
    }

    /// Commits `editor`'s draft, sending an update when it changed.
    ///
    /// A successful update reloads the records. A rejected one leaves the
    /// editor showing the service's message.
    #[instrument(
        skip(self, editor),
        fields(model = %editor.model(), record = %editor.record_id(), field = %editor.field())
    )]
    pub async fn commit_edit(&self, editor: &mut CellEditor) -> Result<EditOutcome, EditError> {
        let update = match editor.commit()? {
            CommitAction::Unchanged => return Ok(EditOutcome::Unchanged),
            CommitAction::Submit(update) => update,
        };

        let result = self
            .api
            .update_record_field(&self.credentials, editor.model(), editor.record_id(), &update)
            .await;

        match result {
            Ok(()) => {
                info!("Field updated");
                editor.resolve(Ok(()));
                self.load_records().await;
                Ok(EditOutcome::Saved)
            }
            Err(e) => {
                error!(error = %e, "Field update rejected");
                let message = failure_message(&e, || "Failed to update field".to_string());
                editor.resolve(Err(message.clone()));
                Ok(EditOutcome::Failed(message))
            }
        }
    }

    /// Stops the browser; results of loads still in flight are discarded.
    #[instrument(skip(self), fields(connector = %self.connector_id))]
    pub async fn teardown(&self) {
        let mut state = self.state.lock().await;
        state.torn_down = true;
        state.models_generation.invalidate();
        state.fields_generation.invalidate();
        state.records_generation.invalidate();
        debug!("Browser torn down");
    }
}

/// The service's message when it gave one, otherwise `fallback`.
fn failure_message(err: &ApiError, fallback: impl FnOnce() -> String) -> String {
    err.user_message()
        .map(str::to_string)
        .unwrap_or_else(fallback)
}
