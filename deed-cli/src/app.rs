//! What each `deedctl` subcommand does, kept apart from argument parsing so
//! it can be driven from tests with in-memory collaborators.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use deed_core::forms::{FormData, FormType, WorkflowSubmission};
use deed_core::store::{ACCESS_TOKEN_KEY, KeyValueStore, StoreConfig, StoreRegistry, draft_key};
use deed_core::workflow::{GatewayHandoff, WorkflowController, WorkflowError};
use deed_data::CircleRateSchedule;
use deed_store_sqlite::SqliteStoreFactory;
use serde::Deserialize;
use tracing::{debug, info};

use crate::input::{RateSource, ValuationInput};
use crate::report::render_valuation;
use crate::utils::format_rupees;

/// Every store backend `deedctl` can open.
pub fn build_store_registry() -> StoreRegistry {
    let mut registry = StoreRegistry::with_memory();
    registry.register(Box::new(SqliteStoreFactory));
    registry
}

pub async fn open_store(config: &StoreConfig) -> Result<Box<dyn KeyValueStore>> {
    debug!(backend = %config.backend, "opening store");
    build_store_registry()
        .create(config)
        .await
        .with_context(|| format!("cannot open {} store '{}'", config.backend, config.connection_string))
}

/// Runs the valuation in `input_path` and renders it as text, or as JSON
/// when `json` is set.
pub fn run_valuate(
    input_path: &Path,
    rates_path: Option<&Path>,
    source: RateSource<'_>,
    json: bool,
) -> Result<String> {
    let input = ValuationInput::from_path(input_path)?;

    let schedule = rates_path
        .map(|path| {
            CircleRateSchedule::from_path(path)
                .with_context(|| format!("cannot load circle rates from '{}'", path.display()))
        })
        .transpose()?;
    let source = RateSource {
        schedule: schedule.as_ref().or(source.schedule),
        ..source
    };

    let result = input.valuate(source)?;
    info!(final_payable = %result.final_payable_amount, "valuation complete");

    if json {
        Ok(serde_json::to_string_pretty(&result)? + "\n")
    } else {
        Ok(render_valuation(&result))
    }
}

/// Lists the localities in a circle-rate schedule.
pub fn run_rates(rates_path: &Path) -> Result<String> {
    let schedule = CircleRateSchedule::from_path(rates_path)
        .with_context(|| format!("cannot load circle rates from '{}'", rates_path.display()))?;
    let mut out = String::new();
    for locality in schedule.localities() {
        out.push_str(locality);
        out.push('\n');
    }
    Ok(out)
}

/// Service fee for every document type.
pub fn run_forms() -> String {
    FormType::ALL
        .iter()
        .map(|t| format!("{:<28}{:<28}{:>12}\n", t.slug(), t.title(), format_rupees(t.service_fee())))
        .collect()
}

/// A submission file may carry its own `amount`, or just the form and let
/// the document type's service fee apply.
#[derive(Deserialize)]
#[serde(untagged)]
enum SubmissionFile {
    Full(WorkflowSubmission),
    Bare(FormData),
}

pub fn parse_submission(text: &str) -> Result<WorkflowSubmission> {
    let file: SubmissionFile =
        serde_json::from_str(text).context("not a recognised deed submission")?;
    Ok(match file {
        SubmissionFile::Full(submission) => submission,
        SubmissionFile::Bare(data) => WorkflowSubmission::new(data),
    })
}

pub fn read_submission(path: &Path) -> Result<WorkflowSubmission> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read '{}'", path.display()))?;
    parse_submission(&text).with_context(|| format!("in '{}'", path.display()))
}

/// Which document to send: one read from a file, or the saved draft.
pub enum SubmitSource {
    Submission(WorkflowSubmission),
    Draft(FormType),
}

fn describe_failure(error: WorkflowError) -> anyhow::Error {
    match error {
        WorkflowError::Validation(errors) => {
            let lines: Vec<String> = errors
                .iter()
                .map(|e| format!("  {}: {}", e.field, e.message))
                .collect();
            anyhow::anyhow!("the document is incomplete:\n{}", lines.join("\n"))
        }
        other => other.into(),
    }
}

/// Takes one document through the whole workflow: form, preview, backend
/// submission, and payment initialisation. The preview and progress are
/// written to `out`.
pub async fn run_submit<W: Write>(
    controller: &mut WorkflowController,
    source: SubmitSource,
    out: &mut W,
) -> Result<GatewayHandoff> {
    let submission = match source {
        SubmitSource::Submission(submission) => submission,
        SubmitSource::Draft(form_type) => {
            if !controller.restore_draft(form_type).await? {
                bail!("no saved draft for {form_type}");
            }
            match controller.submission() {
                Some(submission) => submission.clone(),
                None => bail!("no saved draft for {form_type}"),
            }
        }
    };

    controller
        .submit_form(submission)
        .await
        .map_err(describe_failure)?;

    if let Some(preview) = controller.preview() {
        writeln!(out, "{preview}")?;
    }

    let request = controller.confirm().await.map_err(describe_failure)?;
    writeln!(
        out,
        "Submitted {} as {} ({} due)",
        request.form_type().title(),
        request.form_id,
        format_rupees(request.amount)
    )?;

    let handoff = controller.initialize_payment().await?;
    writeln!(out, "Payment gateway: {}", handoff.action)?;
    if let Some(txnid) = handoff.field("txnid") {
        writeln!(out, "Transaction: {txnid}")?;
    }
    Ok(handoff)
}

pub fn write_handoff(
    handoff: &GatewayHandoff,
    path: &Path,
) -> Result<()> {
    std::fs::write(path, handoff.to_html())
        .with_context(|| format!("cannot write '{}'", path.display()))?;
    info!(path = %path.display(), "payment page written");
    Ok(())
}

/// The saved draft of `form_type`, rendered as its preview.
pub async fn show_draft(
    store: &dyn KeyValueStore,
    form_type: FormType,
) -> Result<Option<String>> {
    let Some(raw) = store.get(&draft_key(form_type)).await? else {
        return Ok(None);
    };
    let submission: WorkflowSubmission =
        serde_json::from_str(&raw).with_context(|| format!("saved {form_type} draft is unreadable"))?;
    Ok(Some(submission.to_string()))
}

pub async fn clear_draft(
    store: &dyn KeyValueStore,
    form_type: FormType,
) -> Result<()> {
    store.remove(&draft_key(form_type)).await?;
    Ok(())
}

pub async fn set_token(
    store: &dyn KeyValueStore,
    token: &str,
) -> Result<()> {
    let token = token.trim();
    if token.is_empty() {
        bail!("access token is empty");
    }
    store.set(ACCESS_TOKEN_KEY, token).await?;
    Ok(())
}

pub async fn clear_token(store: &dyn KeyValueStore) -> Result<()> {
    store.remove(ACCESS_TOKEN_KEY).await?;
    Ok(())
}
