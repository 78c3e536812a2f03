//! `deedctl.toml` and the precedence rules that sit on top of it.
//!
//! ```toml
//! [api]
//! base_url = "https://api.example.in"
//!
//! [store]
//! backend = "sqlite"
//! connection_string = "deeds.db"
//!
//! [workflow]
//! return_to_form_delay_secs = 4
//!
//! [logging]
//! level = "debug"
//! file = "deedctl.log"
//! ```
//!
//! Every section and key is optional. A value given on the command line wins
//! over the environment, which wins over the file, which wins over the
//! built-in default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use deed_core::store::StoreConfig;
use deed_core::workflow::{DEFAULT_RETURN_TO_FORM_DELAY, WorkflowConfig};
use deed_http::DEFAULT_API_BASE;
use serde::Deserialize;
use tracing::debug;

/// Looked for in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "deedctl.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub api: ApiSection,
    pub store: StoreSection,
    pub workflow: WorkflowSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiSection {
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSection {
    pub backend: Option<String>,
    pub connection_string: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkflowSection {
    pub return_to_form_delay_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid configuration")
    }

    /// Reads `path` when given (it must exist), otherwise
    /// [`DEFAULT_CONFIG_FILE`] if present, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !required && !path.is_file() {
            debug!("no {} found, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read config file '{}'", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in '{}'", path.display()))
    }

    /// Backend base URL: `cli`, then `env` (the value of
    /// `NEXT_PUBLIC_API_BASE`), then the file, then the default.
    pub fn api_base(
        &self,
        cli: Option<&str>,
        env: Option<&str>,
    ) -> String {
        [cli, env, self.api.base_url.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_BASE)
            .to_string()
    }

    /// Store selection with CLI overrides applied.
    pub fn store_config(
        &self,
        backend: Option<&str>,
        connection_string: Option<&str>,
    ) -> StoreConfig {
        let defaults = StoreConfig::default();
        StoreConfig {
            backend: backend
                .map(str::to_string)
                .or_else(|| self.store.backend.clone())
                .unwrap_or(defaults.backend),
            connection_string: connection_string
                .map(str::to_string)
                .or_else(|| self.store.connection_string.clone())
                .unwrap_or(defaults.connection_string),
        }
    }

    pub fn workflow_config(&self) -> WorkflowConfig {
        WorkflowConfig {
            return_to_form_delay: self
                .workflow
                .return_to_form_delay_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_RETURN_TO_FORM_DELAY),
        }
    }
}
