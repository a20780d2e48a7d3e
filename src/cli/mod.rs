//! Command-line surface of the `kcic-cms` binary.

use crate::actions::{parse_kind, ActionResult, ContentActions};
use crate::config::{CmsConfig, StoreBackend, StoreConfig};
use crate::error::ContentError;
use crate::logging::{parse_rotation, LogConfig};
use crate::ordering::{ReorderItem, ReorderPolicy};
use crate::revalidate::TracingRevalidator;
use crate::slug::normalize;
use crate::store::{InMemoryStore, JsonFileStore, Store, StoreError};
use crate::validation::{from_serde_error, ValidationErrors};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn, Level};

/// KCIC CMS - manage the ordered and slug-addressed content of the KCIC site
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Config file (default: ~/.kcic/config.toml)
    #[arg(long, env = "KCIC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the JSON tables
    #[arg(long, env = "KCIC_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Store backend: json, or memory (starts empty and is discarded when the
    /// command exits, so nothing carries over between invocations)
    #[arg(long, env = "KCIC_STORE")]
    pub store: Option<StoreBackend>,

    /// Reorder policy: strict or trusting
    #[arg(long, env = "KCIC_REORDER_POLICY")]
    pub reorder_policy: Option<ReorderPolicy>,

    /// Enable JSON log format
    #[arg(long, env = "KCIC_LOG_JSON", default_value = "false")]
    pub log_json: bool,

    /// Log level for kcic_cms targets when RUST_LOG is unset
    #[arg(long, env = "KCIC_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Custom log directory (default: ~/.kcic/logs)
    #[arg(long, env = "KCIC_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log rotation period: daily, hourly, or never
    #[arg(long, env = "KCIC_LOG_ROTATION")]
    pub log_rotation: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List every record of a kind
    List { kind: String },
    /// Show one record
    Get { kind: String, id: String },
    /// Show a news article or opportunity by slug
    Find { kind: String, slug: String },
    /// Create a record from a JSON object
    Create {
        kind: String,
        #[arg(long)]
        json: String,
    },
    /// Replace a record's fields from a JSON object
    Update {
        kind: String,
        id: String,
        #[arg(long)]
        json: String,
    },
    /// Delete a record
    Remove { kind: String, id: String },
    /// Set display positions, given as id=order pairs
    Reorder {
        kind: String,
        #[arg(required = true)]
        pairs: Vec<String>,
    },
    /// Print the slug a title normalizes to
    Slug { title: String },
}

impl Args {
    /// Store settings with flags applied over the config file.
    #[must_use]
    pub fn store_config(&self, config: &CmsConfig) -> StoreConfig {
        StoreConfig {
            backend: self.store.unwrap_or(config.store.backend),
            data_dir: self
                .data_dir
                .clone()
                .unwrap_or_else(|| config.store.data_dir.clone()),
        }
    }

    #[must_use]
    pub fn reorder_policy(&self, config: &CmsConfig) -> ReorderPolicy {
        self.reorder_policy
            .unwrap_or(config.ordering.reorder_policy)
    }

    /// Logging settings with flags applied over the config file.
    pub fn log_config(&self, config: &CmsConfig) -> Result<LogConfig, String> {
        let defaults = LogConfig::default();
        let level = match self.log_level.as_ref().or(config.logging.level.as_ref()) {
            Some(level) => level
                .parse::<Level>()
                .map_err(|_| format!("Invalid log level: {level}"))?,
            None => defaults.log_level,
        };
        let rotation = self
            .log_rotation
            .as_deref()
            .or(config.logging.rotation.as_deref())
            .map_or(defaults.rotation, parse_rotation);
        Ok(LogConfig {
            log_dir: self
                .log_dir
                .clone()
                .or_else(|| config.logging.dir.clone())
                .unwrap_or(defaults.log_dir),
            log_level: level,
            json_format: self.log_json || config.logging.json.unwrap_or(false),
            rotation,
        })
    }
}

/// Open the configured store backend.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn Store>, StoreError> {
    match config.backend {
        StoreBackend::Json => {
            let store = JsonFileStore::open(&config.data_dir).await?;
            info!(data_dir = %config.data_dir.display(), "Opened JSON store");
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            warn!("Using in-memory store; changes are discarded when this command exits");
            Ok(Arc::new(InMemoryStore::new()))
        }
    }
}

/// Parse `id=order` pairs into a reorder request.
pub fn parse_reorder_pairs(pairs: &[String]) -> Result<Vec<ReorderItem>, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let mut items = Vec::with_capacity(pairs.len());
    for (index, pair) in pairs.iter().enumerate() {
        let parsed = pair
            .split_once('=')
            .and_then(|(id, order)| Some((id.trim(), order.trim().parse::<u32>().ok()?)));
        match parsed {
            Some((id, order)) if !id.is_empty() => items.push(ReorderItem::new(id, order)),
            _ => errors.add(
                format!("items[{index}]"),
                format!("expected <id>=<order>, got {pair:?}"),
            ),
        }
    }
    errors.into_result().map(|()| items)
}

fn parse_json(raw: &str) -> Result<Value, ContentError> {
    serde_json::from_str(raw).map_err(|e| ContentError::Validation(from_serde_error(&e)))
}

/// Run one command against the actions.
pub async fn run(actions: &ContentActions, command: Command) -> ActionResult {
    let outcome = async {
        let result = match command {
            Command::List { kind } => actions.list(parse_kind(&kind)?).await,
            Command::Get { kind, id } => actions.get(parse_kind(&kind)?, &id).await,
            Command::Find { kind, slug } => actions.get_by_slug(parse_kind(&kind)?, &slug).await,
            Command::Create { kind, json } => {
                let kind = parse_kind(&kind)?;
                actions.create(kind, parse_json(&json)?).await
            }
            Command::Update { kind, id, json } => {
                let kind = parse_kind(&kind)?;
                actions.update(kind, &id, parse_json(&json)?).await
            }
            Command::Remove { kind, id } => actions.remove(parse_kind(&kind)?, &id).await,
            Command::Reorder { kind, pairs } => {
                let kind = parse_kind(&kind)?;
                let items = parse_reorder_pairs(&pairs)?;
                let input = serde_json::to_value(items).map_err(StoreError::from)?;
                actions.reorder(kind, input).await
            }
            Command::Slug { title } => ActionResult::ok(Some(json!({ "slug": normalize(&title) }))),
        };
        Ok::<_, ContentError>(result)
    };
    outcome.await.unwrap_or_else(|e| ActionResult::failed(&e))
}

/// Build the actions for a loaded config.
pub async fn build_actions(args: &Args, config: &CmsConfig) -> Result<ContentActions, StoreError> {
    let store = open_store(&args.store_config(config)).await?;
    Ok(ContentActions::new(store, Arc::new(TracingRevalidator))
        .with_reorder_policy(args.reorder_policy(config)))
}
