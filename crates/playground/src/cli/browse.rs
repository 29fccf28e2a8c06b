//! Browse and edit command handlers.

use super::Target;
use super::table::{record_row, render};
use anyhow::{Context, bail};
use playground_browser::{BrowserStatus, ConnectionHost, EditOutcome, ResourceBrowser};
use playground_client::{HttpConnectorApi, PlaygroundConfig};
use playground_error::PlaygroundResult;
use std::sync::Arc;
use tracing::{info, instrument};

type Browser = ResourceBrowser<HttpConnectorApi>;

/// Creates a session, checks the connection and returns a connected browser.
async fn connect(
    config: &PlaygroundConfig,
    target: &Target,
    limit: Option<u32>,
) -> PlaygroundResult<Browser> {
    let api = Arc::new(HttpConnectorApi::new(config.api_base_url())?);
    let keys = config.keys_for(&target.connector);
    let available = config.is_available(&target.connector);

    let mut host =
        ConnectionHost::establish(api, &target.owner, &target.connector, keys, available).await?;
    if let Some(notice) = host.unavailable_notice() {
        eprintln!("{}", notice);
    }
    host.require_connection().await?;

    let browser = host.browser(limit.unwrap_or(*config.default_limit()));
    host.sync(&browser).await;
    Ok(browser)
}

/// Connects and fails unless at least one model can be browsed.
async fn open(
    config: &PlaygroundConfig,
    target: &Target,
    limit: Option<u32>,
) -> anyhow::Result<Browser> {
    let browser = connect(config, target, limit).await?;
    match browser.status().await {
        BrowserStatus::Ready => Ok(browser),
        status => bail!("{}", status),
    }
}

/// Switches to `model` unless it is already selected.
async fn select(browser: &Browser, model: Option<&str>) -> anyhow::Result<String> {
    let view = browser.view().await;
    match model {
        Some(model) if view.selected_model().as_deref() == Some(model) => Ok(model.to_string()),
        Some(model) => {
            if !view.models().iter().any(|m| m == model) {
                bail!(
                    "Model {} has no list operation (available: {})",
                    model,
                    view.models().join(", ")
                );
            }
            browser.select_model(model).await;
            Ok(model.to_string())
        }
        None => view
            .selected_model()
            .clone()
            .context("No model selected"),
    }
}

/// Handles the models command.
#[instrument(skip_all, fields(connector = %target.connector))]
pub async fn handle_models(config: &PlaygroundConfig, target: &Target) -> anyhow::Result<()> {
    let browser = open(config, target, None).await?;
    for model in browser.view().await.models() {
        println!("{}", model);
    }
    browser.teardown().await;
    Ok(())
}

/// Handles the fields command.
#[instrument(skip_all, fields(connector = %target.connector))]
pub async fn handle_fields(
    config: &PlaygroundConfig,
    target: &Target,
    model: Option<&str>,
    refresh: bool,
) -> anyhow::Result<()> {
    let browser = open(config, target, None).await?;
    let model = select(&browser, model).await?;

    let fields = browser.get_fields(&model, !refresh).await;
    let headers: Vec<String> = ["Id", "Label", "Type", "Required", "Custom"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    let rows: Vec<Vec<String>> = fields
        .iter()
        .map(|f| {
            vec![
                f.id().clone(),
                f.label().unwrap_or_default().to_string(),
                f.field_type().clone(),
                f.required().map(|r| r.to_string()).unwrap_or_default(),
                f.is_custom().to_string(),
            ]
        })
        .collect();
    print!("{}", render(&headers, &rows));

    browser.teardown().await;
    Ok(())
}

/// Handles the list command.
#[instrument(skip_all, fields(connector = %target.connector))]
pub async fn handle_list(
    config: &PlaygroundConfig,
    target: &Target,
    model: Option<&str>,
    limit: Option<u32>,
    pins: &[String],
) -> anyhow::Result<()> {
    let browser = open(config, target, limit).await?;
    let model = select(&browser, model).await?;
    browser.pin_fields(pins).await;

    let view = browser.view().await;
    if let Some(error) = view.error() {
        bail!("{}", error);
    }
    info!(%model, records = view.records().len(), "Records loaded");

    let mut headers = vec!["Id".to_string()];
    for column in view.columns() {
        headers.push(browser.column_label(column).await);
    }
    let rows: Vec<Vec<String>> = view
        .records()
        .iter()
        .map(|record| record_row(record, view.columns()))
        .collect();
    print!("{}", render(&headers, &rows));

    let groups = browser.available_fields().await;
    if groups.has_available() {
        let names: Vec<&str> = groups
            .custom()
            .iter()
            .chain(groups.system())
            .map(|f| f.id().as_str())
            .collect();
        println!("\nMore fields: {}", names.join(", "));
    }

    browser.teardown().await;
    Ok(())
}

/// Handles the edit command.
#[instrument(skip_all, fields(connector = %target.connector, record = %record, field = %field))]
pub async fn handle_edit(
    config: &PlaygroundConfig,
    target: &Target,
    model: Option<&str>,
    limit: Option<u32>,
    record: &str,
    field: &str,
    value: &str,
) -> anyhow::Result<()> {
    let browser = open(config, target, limit).await?;
    let model = select(&browser, model).await?;

    let Some(mut cell) = browser.edit_cell(record, field).await else {
        bail!(
            "Record {} is not among the loaded {} records; try a larger --limit",
            record,
            model
        );
    };
    cell.begin_edit()?;
    cell.set_draft(value)?;

    let outcome = browser.commit_edit(&mut cell).await?;
    browser.teardown().await;
    match outcome {
        EditOutcome::Unchanged => println!("{}.{} unchanged", record, field),
        EditOutcome::Saved => println!("{}.{} = {}", record, field, value),
        EditOutcome::Failed(message) => bail!("{}", message),
    }
    Ok(())
}
