use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use deed_cli::app::{self, SubmitSource};
use deed_cli::config::AppConfig;
use deed_cli::input::RateSource;
use deed_cli::logging;
use deed_cli::utils::parse_decimal;
use deed_core::forms::FormType;
use deed_core::remote::{MemoryBackend, MemoryGateway};
use deed_core::workflow::WorkflowController;
use deed_http::{API_BASE_ENV, HttpBackend};
use rust_decimal::Decimal;
use tracing::{debug, info};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Deed drafting and stamp-duty valuation.
///
/// Values property transfers, and takes deed documents through preview,
/// submission and payment against the deed service backend.
#[derive(Debug, Parser)]
#[command(name = "deedctl", version)]
struct Cli {
    /// Configuration file. Defaults to `deedctl.toml` when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `deed_core=trace`. Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Store backend for drafts and the access token (`sqlite` or `memory`).
    #[arg(long, global = true)]
    store: Option<String>,

    /// Store connection string. For SQLite a file path or `:memory:`.
    #[arg(long, global = true)]
    db: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute stamp duty and registration charges for a property.
    Valuate {
        /// Valuation input (TOML).
        input: PathBuf,

        /// Circle-rate schedule (CSV) to look the rate up in.
        #[arg(long)]
        rates: Option<PathBuf>,

        /// Locality to look up in the schedule.
        #[arg(long, requires = "rates")]
        locality: Option<String>,

        /// Circle rate per unit area, overriding the input and the schedule.
        #[arg(long, value_parser = parse_amount)]
        circle_rate: Option<Decimal>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the localities in a circle-rate schedule.
    Rates {
        schedule: PathBuf,
    },

    /// List document types and their service fees.
    Forms,

    /// Preview, submit and start payment for a deed document.
    Submit {
        /// Submission (JSON) with `formType` and `formData`.
        #[arg(required_unless_present = "draft", conflicts_with = "draft")]
        file: Option<PathBuf>,

        /// Submit the saved draft of this document type instead.
        #[arg(long, value_parser = parse_form_type)]
        draft: Option<FormType>,

        /// Use in-process stand-ins instead of the backend.
        #[arg(long)]
        dry_run: bool,

        /// Backend base URL.
        #[arg(long)]
        api_base: Option<String>,

        /// Write the self-submitting payment page here.
        #[arg(long)]
        handoff_out: Option<PathBuf>,
    },

    /// Inspect or discard saved drafts.
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },

    /// Manage the backend access token.
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

#[derive(Debug, Subcommand)]
enum DraftAction {
    Show {
        #[arg(value_parser = parse_form_type)]
        form_type: FormType,
    },
    Clear {
        #[arg(value_parser = parse_form_type)]
        form_type: FormType,
    },
}

#[derive(Debug, Subcommand)]
enum TokenAction {
    Set { token: String },
    Clear,
}

fn parse_form_type(s: &str) -> Result<FormType, String> {
    FormType::parse(s).ok_or_else(|| {
        let known: Vec<&str> = FormType::ALL.iter().map(FormType::slug).collect();
        format!("unknown document type '{s}'; expected one of {}", known.join(", "))
    })
}

fn parse_amount(s: &str) -> Result<Decimal, String> {
    parse_decimal(s).map_err(|e| e.to_string())
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level.as_deref());

    let config = AppConfig::load(cli.config.as_deref())?;
    if let (None, Some(level)) = (&cli.log_level, &config.logging.level) {
        logging::set_log_level(level)?;
    }
    if let Some(path) = cli.log_file.as_ref().or(config.logging.file.as_ref()) {
        logging::enable_file_logging(path)?;
    }

    let store_config = config.store_config(cli.store.as_deref(), cli.db.as_deref());

    match cli.command {
        Command::Valuate {
            input,
            rates,
            locality,
            circle_rate,
            json,
        } => {
            let source = RateSource {
                explicit: circle_rate,
                schedule: None,
                locality: locality.as_deref(),
            };
            print!("{}", app::run_valuate(&input, rates.as_deref(), source, json)?);
        }

        Command::Rates { schedule } => print!("{}", app::run_rates(&schedule)?),

        Command::Forms => print!("{}", app::run_forms()),

        Command::Submit {
            file,
            draft,
            dry_run,
            api_base,
            handoff_out,
        } => {
            let source = match (file, draft) {
                (Some(path), _) => SubmitSource::Submission(app::read_submission(&path)?),
                (None, Some(form_type)) => SubmitSource::Draft(form_type),
                (None, None) => anyhow::bail!("give a submission file or --draft"),
            };

            let store = app::open_store(&store_config).await?;
            let controller = if dry_run {
                info!("dry run: nothing leaves this process");
                WorkflowController::new(
                    Box::new(MemoryBackend::new()),
                    Box::new(MemoryGateway::default()),
                    store,
                )
            } else {
                let env = std::env::var(API_BASE_ENV).ok();
                let base = config.api_base(api_base.as_deref(), env.as_deref());
                debug!(api_base = %base, "using backend");
                let http = HttpBackend::new(base);
                WorkflowController::new(Box::new(http.clone()), Box::new(http), store)
            };
            let mut controller = controller.with_config(config.workflow_config());

            let handoff = app::run_submit(&mut controller, source, &mut std::io::stdout()).await?;
            if let Some(path) = handoff_out {
                app::write_handoff(&handoff, &path)?;
                println!("Open {} to continue to payment.", path.display());
            }
        }

        Command::Draft { action } => {
            let store = app::open_store(&store_config).await?;
            match action {
                DraftAction::Show { form_type } => {
                    match app::show_draft(&*store, form_type).await? {
                        Some(preview) => println!("{preview}"),
                        None => println!("No saved {form_type} draft."),
                    }
                }
                DraftAction::Clear { form_type } => {
                    app::clear_draft(&*store, form_type)
                        .await
                        .with_context(|| format!("cannot clear the {form_type} draft"))?;
                }
            }
        }

        Command::Token { action } => {
            let store = app::open_store(&store_config).await?;
            match action {
                TokenAction::Set { token } => app::set_token(&*store, &token).await?,
                TokenAction::Clear => app::clear_token(&*store).await?,
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn submit_needs_a_file_or_a_draft() {
        assert!(Cli::try_parse_from(["deedctl", "submit"]).is_err());
        assert!(Cli::try_parse_from(["deedctl", "submit", "--draft", "will-deed"]).is_ok());
        assert!(Cli::try_parse_from(["deedctl", "submit", "--draft", "lease"]).is_err());
    }

    #[test]
    fn circle_rate_accepts_grouping() {
        let cli = Cli::try_parse_from(["deedctl", "valuate", "in.toml", "--circle-rate", "45,000"])
            .unwrap();

        match cli.command {
            Command::Valuate { circle_rate, .. } => {
                assert_eq!(circle_rate, Some(Decimal::from(45000)))
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
