//! Shared command plumbing: the API client, snapshot store and output
//! rendering used by every data command.

use std::time::Duration;

use crate::{
    analysis::QueryTable,
    config::{AppConfig, API_KEY_ENV_VAR},
    core::{RequestCache, SnapshotStore},
    cricbuzz::CricbuzzClient,
    Result,
};

const REQUEST_CACHE_CAPACITY: usize = 256;
const REQUEST_CACHE_TTL: Duration = Duration::from_secs(300);

/// Context containing common resources needed by the data commands
pub struct CommandContext {
    pub config: AppConfig,
    pub client: CricbuzzClient,
    pub store: SnapshotStore,
}

impl CommandContext {
    pub fn new(config: AppConfig) -> Result<Self> {
        if !config.has_api_key() {
            log::warn!(
                "{} is not set; relying on snapshots under {}",
                API_KEY_ENV_VAR,
                config.data_dir.display()
            );
        }

        let client = CricbuzzClient::new(&config)?
            .with_request_cache(RequestCache::new(REQUEST_CACHE_CAPACITY, REQUEST_CACHE_TTL));
        let store = SnapshotStore::new(&config.data_dir);
        log::debug!("snapshot directory: {}", store.root().display());

        Ok(Self {
            config,
            client,
            store,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    /// `--json` wins over `--csv`.
    pub fn from_flags(json: bool, csv: bool) -> Self {
        match (json, csv) {
            (true, _) => OutputFormat::Json,
            (false, true) => OutputFormat::Csv,
            _ => OutputFormat::Text,
        }
    }
}

pub fn render_table(table: &QueryTable, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(table.render_text()),
        OutputFormat::Json => table.to_json(),
        OutputFormat::Csv => table.to_csv(),
    }
}

pub fn print_table(table: &QueryTable, format: OutputFormat) -> Result<()> {
    let rendered = render_table(table, format)?;
    if rendered.ends_with('\n') {
        print!("{}", rendered);
    } else {
        println!("{}", rendered);
    }
    Ok(())
}
