//! Tests for ResourceBrowser against a mock connector service.

mod test_utils;

use chrono::TimeDelta;
use playground_browser::{BrowserStatus, CellState, EditOutcome, LoadPhase, ResourceBrowser};
use playground_cache::{FieldCacheConfig, FieldMetadataCache, ManualClock};
use playground_core::{FieldDescriptor, Record, Value};
use playground_interface::SessionCredentials;
use std::sync::Arc;
use test_utils::{MockConnectorApi, wait_until};

const CONTACTS: &str = "crmContact";
const DEALS: &str = "crmDeal";

fn contacts() -> Vec<Record> {
    vec![
        Record::new("r1").with_field("name", "Ada").with_field("age", 36),
        Record::new("r2")
            .with_field("name", "Grace")
            .with_field("age", Value::Null),
        Record::new("r3").with_field("name", "Linus").with_field("age", 54),
        Record::new("r4").with_field("name", "Barbara").with_field("age", 81),
    ]
}

fn deals() -> Vec<Record> {
    vec![Record::new("d1").with_field("amount", 1200).with_field("stage", "won")]
}

fn mock() -> MockConnectorApi {
    MockConnectorApi::new()
        .with_operations(&[
            "crmContact::list",
            "crmContact::update",
            "crmDeal::list",
            "crmAccount::get",
        ])
        .with_records(CONTACTS, contacts())
        .with_records(DEALS, deals())
        .with_fields(
            CONTACTS,
            vec![
                FieldDescriptor::new("name", "text"),
                FieldDescriptor::builder()
                    .id("age")
                    .field_type("number")
                    .display_name(Some("Age (years)".to_string()))
                    .build()
                    .expect("Valid descriptor"),
                FieldDescriptor::new("phone", "text"),
                FieldDescriptor::new("score__c", "number").custom(),
            ],
        )
}

fn browser(api: &Arc<MockConnectorApi>) -> ResourceBrowser<MockConnectorApi> {
    ResourceBrowser::new(
        Arc::clone(api),
        "hubspot",
        SessionCredentials::new("tok-owner", "pk_test"),
    )
}

#[tokio::test]
async fn test_disconnected_browser_shows_nothing() {
    let api = Arc::new(mock());
    let browser = browser(&api);

    let view = browser.view().await;
    assert_eq!(*view.status(), BrowserStatus::Disconnected);
    assert_eq!(view.status().to_string(), "Connect to load resources");
    assert!(view.models().is_empty());

    browser.load_models().await;
    assert_eq!(api.capability_calls(), 0);
}

#[tokio::test]
async fn test_connect_discovers_models_and_selects_first() {
    let api = Arc::new(mock());
    let browser = browser(&api);

    browser.set_connected(true).await;

    let view = browser.view().await;
    assert_eq!(*view.status(), BrowserStatus::Ready);
    assert_eq!(view.models(), &vec![CONTACTS.to_string(), DEALS.to_string()]);
    assert_eq!(view.selected_model().as_deref(), Some(CONTACTS));
    assert_eq!(view.records().len(), 3);
    assert_eq!(view.columns(), &vec!["age".to_string(), "name".to_string()]);
    assert_eq!(view.model_fields().len(), 4);
    assert_eq!(*view.phase(), LoadPhase::Idle);
    assert_eq!(*view.error(), None);
}

#[tokio::test]
async fn test_discovery_failure_means_no_models() {
    let api = Arc::new(mock());
    api.fail_operations("Forbidden");
    let browser = browser(&api);

    browser.set_connected(true).await;

    let view = browser.view().await;
    assert_eq!(*view.status(), BrowserStatus::NoModels);
    assert_eq!(view.status().to_string(), "No list operations available");
    assert_eq!(*view.error(), None);
    assert_eq!(api.record_calls(), 0);
}

#[tokio::test]
async fn test_scenario_null_age_column_and_empty_cell() {
    let api = Arc::new(
        MockConnectorApi::new()
            .with_operations(&["crmContact::list"])
            .with_records(
                CONTACTS,
                vec![
                    Record::new("r1").with_field("name", "Ada").with_field("age", 36),
                    Record::new("r2")
                        .with_field("name", "Grace")
                        .with_field("age", Value::Null),
                ],
            ),
    );
    let browser = browser(&api);
    browser.set_connected(true).await;

    let view = browser.view().await;
    assert_eq!(view.columns(), &vec!["age".to_string(), "name".to_string()]);

    let cell = browser.edit_cell("r2", "age").await.expect("record loaded");
    assert!(cell.is_empty());
    assert!(cell.is_editable());
}

#[tokio::test]
async fn test_pinned_field_without_data_is_a_column() {
    let api = Arc::new(mock());
    let browser = browser(&api);
    browser.set_connected(true).await;

    browser.add_field("phone").await;

    let view = browser.view().await;
    assert_eq!(view.pinned(), &vec!["phone".to_string()]);
    assert_eq!(view.columns().first().map(String::as_str), Some("phone"));
    assert!(view.records().iter().all(|r| !r.has_value("phone")));

    let (model, options) = api.list_requests().last().cloned().expect("records requested");
    assert_eq!(model, CONTACTS);
    assert_eq!(options.fields().as_deref(), Some(&["phone".to_string()][..]));
}

#[tokio::test]
async fn test_pin_operations_refetch_only_on_change() {
    let api = Arc::new(mock());
    let browser = browser(&api);
    browser.set_connected(true).await;
    let baseline = api.record_calls();

    browser.add_field("name").await;
    browser.add_field("name").await;
    assert_eq!(api.record_calls(), baseline + 1);

    browser.remove_field("phone").await;
    assert_eq!(api.record_calls(), baseline + 1);

    browser.toggle_field("name").await;
    assert_eq!(api.record_calls(), baseline + 2);
    assert!(browser.view().await.pinned().is_empty());

    let (_, options) = api.list_requests().last().cloned().expect("records requested");
    assert_eq!(*options.fields(), None);
}

#[tokio::test]
async fn test_pin_fields_reloads_once() {
    let api = Arc::new(mock());
    let browser = browser(&api);
    browser.set_connected(true).await;
    let baseline = api.record_calls();

    browser
        .pin_fields(&["name".to_string(), "age".to_string(), "name".to_string()])
        .await;
    assert_eq!(api.record_calls(), baseline + 1);
    assert_eq!(
        browser.view().await.pinned(),
        &vec!["name".to_string(), "age".to_string()]
    );
    assert_eq!(
        browser.view().await.columns(),
        &vec!["age".to_string(), "name".to_string()]
    );

    browser.pin_fields(&["age".to_string()]).await;
    assert_eq!(api.record_calls(), baseline + 1);
}

#[tokio::test]
async fn test_model_switch_resets_pins_and_columns() {
    let api = Arc::new(mock());
    let browser = browser(&api);
    browser.set_connected(true).await;
    browser.add_field("phone").await;

    browser.select_model(DEALS).await;

    let view = browser.view().await;
    assert_eq!(view.selected_model().as_deref(), Some(DEALS));
    assert!(view.pinned().is_empty());
    assert_eq!(view.columns(), &vec!["amount".to_string(), "stage".to_string()]);
    assert!(view.model_fields().is_empty());
}

#[tokio::test]
async fn test_late_results_for_previous_model_are_discarded() {
    let api = Arc::new(mock());
    let gate = api.gate_records(CONTACTS);
    let browser = Arc::new(browser(&api));

    let connecting = {
        let browser = Arc::clone(&browser);
        tokio::spawn(async move { browser.set_connected(true).await })
    };
    wait_until(|| api.record_calls() >= 1).await;
    assert_eq!(*browser.view().await.phase(), LoadPhase::Loading);

    browser.select_model(DEALS).await;
    gate.notify_one();
    connecting.await.expect("connect task");

    let view = browser.view().await;
    assert_eq!(view.selected_model().as_deref(), Some(DEALS));
    assert_eq!(view.records().len(), 1);
    assert_eq!(view.records()[0].id(), "d1");
    assert_eq!(view.columns(), &vec!["amount".to_string(), "stage".to_string()]);
    assert_eq!(*view.phase(), LoadPhase::Idle);
}

#[tokio::test]
async fn test_late_fields_for_previous_model_are_discarded() {
    let api = Arc::new(mock().with_fields(DEALS, vec![FieldDescriptor::new("amount", "number")]));
    let gate = api.gate_fields(CONTACTS);
    let browser = Arc::new(browser(&api));

    let connecting = {
        let browser = Arc::clone(&browser);
        tokio::spawn(async move { browser.set_connected(true).await })
    };
    wait_until(|| api.field_calls() >= 1).await;

    browser.select_model(DEALS).await;
    gate.notify_one();
    connecting.await.expect("connect task");

    let view = browser.view().await;
    assert_eq!(view.selected_model().as_deref(), Some(DEALS));
    let ids: Vec<&str> = view.model_fields().iter().map(|f| f.id().as_str()).collect();
    assert_eq!(ids, vec!["amount"]);
    assert_eq!(view.records().len(), 1);
    assert_eq!(api.field_calls(), 2);
}

#[tokio::test]
async fn test_late_discovery_after_disconnect_is_discarded() {
    let api = Arc::new(mock());
    let gate = api.gate_capabilities();
    let browser = Arc::new(browser(&api));

    let connecting = {
        let browser = Arc::clone(&browser);
        tokio::spawn(async move { browser.set_connected(true).await })
    };
    wait_until(|| api.capability_calls() >= 1).await;

    browser.set_connected(false).await;
    gate.notify_one();
    connecting.await.expect("connect task");

    let view = browser.view().await;
    assert_eq!(*view.status(), BrowserStatus::Disconnected);
    assert!(view.models().is_empty());
    assert_eq!(*view.selected_model(), None);
    assert!(view.model_fields().is_empty());
    assert_eq!(api.field_calls(), 0);
    assert_eq!(api.record_calls(), 0);
}

#[tokio::test]
async fn test_teardown_discards_in_flight_results() {
    let api = Arc::new(mock());
    let gate = api.gate_records(CONTACTS);
    let browser = Arc::new(browser(&api));

    let connecting = {
        let browser = Arc::clone(&browser);
        tokio::spawn(async move { browser.set_connected(true).await })
    };
    wait_until(|| api.record_calls() >= 1).await;

    browser.teardown().await;
    gate.notify_one();
    connecting.await.expect("connect task");

    assert!(browser.view().await.records().is_empty());

    browser.refresh_records().await;
    assert_eq!(api.record_calls(), 1);
}

#[tokio::test]
async fn test_refresh_keeps_rows_visible() {
    let api = Arc::new(mock());
    let browser = Arc::new(browser(&api));
    browser.set_connected(true).await;
    let calls = api.record_calls();

    let gate = api.gate_records(CONTACTS);
    let refreshing = {
        let browser = Arc::clone(&browser);
        tokio::spawn(async move { browser.increment_limit().await })
    };
    wait_until(|| api.record_calls() > calls).await;

    let view = browser.view().await;
    assert_eq!(*view.phase(), LoadPhase::Refreshing);
    assert_eq!(view.records().len(), 3);

    gate.notify_one();
    refreshing.await.expect("refresh task");

    let view = browser.view().await;
    assert_eq!(*view.phase(), LoadPhase::Idle);
    assert_eq!(*view.limit(), 4);
    assert_eq!(view.records().len(), 4);
}

#[tokio::test]
async fn test_record_error_keeps_previous_rows() {
    let api = Arc::new(mock());
    let browser = browser(&api);
    browser.set_connected(true).await;

    api.fail_records(CONTACTS, "Upstream connector unavailable");
    browser.refresh_records().await;

    let view = browser.view().await;
    assert_eq!(view.error().as_deref(), Some("Upstream connector unavailable"));
    assert_eq!(view.records().len(), 3);
    assert_eq!(*view.phase(), LoadPhase::Idle);

    api.clear_record_failure(CONTACTS);
    browser.refresh_records().await;
    assert_eq!(*browser.view().await.error(), None);
}

#[tokio::test]
async fn test_record_error_without_message_uses_fallback() {
    let api = Arc::new(mock());
    api.fail_records(DEALS, "");
    let browser = browser(&api);
    browser.set_connected(true).await;

    browser.select_model(DEALS).await;

    let view = browser.view().await;
    assert_eq!(view.error().as_deref(), Some("Failed to load crmDeal"));
    assert!(view.records().is_empty());
}

#[tokio::test]
async fn test_limit_controls_clamp_at_one() {
    let api = Arc::new(mock());
    let browser = browser(&api).with_limit(0);
    browser.set_connected(true).await;
    assert_eq!(*browser.view().await.limit(), 1);

    let calls = api.record_calls();
    browser.decrement_limit().await;
    assert_eq!(api.record_calls(), calls);

    browser.set_limit(2).await;
    let (_, options) = api.list_requests().last().cloned().expect("records requested");
    assert_eq!(*options.limit(), 2);
    assert_eq!(browser.view().await.records().len(), 2);

    browser.decrement_limit().await;
    assert_eq!(*browser.view().await.limit(), 1);
    assert_eq!(browser.view().await.records().len(), 1);
}

#[tokio::test]
async fn test_fields_served_from_cache_within_a_day() {
    let api = Arc::new(mock());
    let clock = ManualClock::default();
    let cache =
        FieldMetadataCache::with_clock(FieldCacheConfig::default(), Arc::new(clock.clone()));
    let browser = browser(&api).with_field_cache(cache);

    assert_eq!(browser.get_fields(CONTACTS, true).await.len(), 4);
    assert_eq!(api.field_calls(), 1);

    clock.advance(TimeDelta::hours(24) - TimeDelta::milliseconds(1));
    browser.get_fields(CONTACTS, true).await;
    assert_eq!(api.field_calls(), 1);

    clock.advance(TimeDelta::milliseconds(1));
    browser.get_fields(CONTACTS, true).await;
    assert_eq!(api.field_calls(), 2);

    browser.get_fields(CONTACTS, false).await;
    assert_eq!(api.field_calls(), 3);
}

#[tokio::test]
async fn test_field_errors_are_not_cached() {
    let api = Arc::new(mock());
    api.fail_fields(CONTACTS, "Unknown model");
    let browser = browser(&api);

    assert!(browser.get_fields(CONTACTS, true).await.is_empty());
    assert!(browser.get_fields(CONTACTS, true).await.is_empty());
    assert_eq!(api.field_calls(), 2);
}

#[tokio::test]
async fn test_reselecting_model_uses_cached_fields() {
    let api = Arc::new(mock());
    let browser = browser(&api);
    browser.set_connected(true).await;

    browser.select_model(DEALS).await;
    browser.select_model(CONTACTS).await;
    assert_eq!(api.field_calls(), 2);
    assert_eq!(browser.view().await.model_fields().len(), 4);

    browser.refresh_fields().await;
    assert_eq!(api.field_calls(), 3);
}

#[tokio::test]
async fn test_available_fields_and_labels() {
    let api = Arc::new(mock());
    let browser = browser(&api);
    browser.set_connected(true).await;
    browser.add_field("phone").await;

    let groups = browser.available_fields().await;
    assert!(groups.has_available());
    assert_eq!(groups.custom().len(), 1);
    assert_eq!(groups.system().len(), 2);
    assert!(groups.system().iter().all(|f| f.id() != "phone"));

    assert_eq!(browser.column_label("age").await, "Age (years)");
    assert_eq!(browser.column_label("name").await, "Name");
    assert_eq!(browser.column_label("createdAt").await, "Created At");
}

#[tokio::test]
async fn test_numeric_edit_submits_number_and_refreshes() {
    let api = Arc::new(mock());
    let browser = browser(&api);
    browser.set_connected(true).await;
    let calls = api.record_calls();

    let mut cell = browser.edit_cell("r1", "age").await.expect("record loaded");
    cell.begin_edit().expect("editable");
    cell.set_draft("37").expect("draft");
    let outcome = browser.commit_edit(&mut cell).await.expect("commit");

    assert_eq!(outcome, EditOutcome::Saved);
    assert_eq!(cell.state(), &CellState::Viewing);
    let updates = api.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, CONTACTS);
    assert_eq!(updates[0].1, "r1");
    assert_eq!(updates[0].2.value(), &Value::from(37));

    assert_eq!(api.record_calls(), calls + 1);
    let view = browser.view().await;
    let ada = view.records().iter().find(|r| r.id() == "r1").expect("r1");
    assert_eq!(ada.field("age"), Some(&Value::from(37)));
}

#[tokio::test]
async fn test_unchanged_edit_sends_nothing() {
    let api = Arc::new(mock());
    let browser = browser(&api);
    browser.set_connected(true).await;
    let calls = api.record_calls();

    let mut cell = browser.edit_cell("r1", "name").await.expect("record loaded");
    cell.begin_edit().expect("editable");
    let outcome = browser.commit_edit(&mut cell).await.expect("commit");

    assert_eq!(outcome, EditOutcome::Unchanged);
    assert_eq!(api.update_calls(), 0);
    assert_eq!(api.record_calls(), calls);
    assert_eq!(cell.state(), &CellState::Viewing);
}

#[tokio::test]
async fn test_rejected_edit_is_local_to_the_cell() {
    let api = Arc::new(mock());
    api.fail_updates("Permission denied");
    let browser = browser(&api);
    browser.set_connected(true).await;
    let calls = api.record_calls();

    let mut cell = browser.edit_cell("r1", "name").await.expect("record loaded");
    cell.begin_edit().expect("editable");
    cell.set_draft("Augusta").expect("draft");
    let outcome = browser.commit_edit(&mut cell).await.expect("commit");

    assert_eq!(outcome, EditOutcome::Failed("Permission denied".to_string()));
    assert_eq!(cell.error(), Some("Permission denied"));
    assert_eq!(cell.display_text(), "Ada");
    assert_eq!(api.record_calls(), calls);
    assert_eq!(*browser.view().await.error(), None);
}

#[tokio::test]
async fn test_disconnect_clears_view() {
    let api = Arc::new(mock());
    let browser = browser(&api);
    browser.set_connected(true).await;

    browser.set_connected(false).await;

    let view = browser.view().await;
    assert_eq!(*view.status(), BrowserStatus::Disconnected);
    assert!(view.models().is_empty());
    assert!(view.records().is_empty());
    assert!(view.columns().is_empty());
    assert_eq!(*view.selected_model(), None);
}
