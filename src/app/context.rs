use std::path::Path;
use std::sync::Arc;

use crate::app::Result;
use crate::config::Config;
use crate::domain::ReciterRegistry;
use crate::fetcher::{HttpFetcher, VerseSource};

pub struct AppContext {
    pub config: Arc<Config>,
    pub source: Arc<dyn VerseSource + Send + Sync>,
    pub reciters: ReciterRegistry,
}

impl AppContext {
    /// Load configuration (default path unless `config_path` is given) and
    /// build the HTTP client.
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        Self::with_config(config)
    }

    pub fn with_config(config: Config) -> Result<Self> {
        let source: Arc<dyn VerseSource + Send + Sync> = Arc::new(HttpFetcher::new(&config.api)?);
        Ok(Self::with_source(config, source))
    }

    /// Context around an arbitrary verse source.
    pub fn with_source(config: Config, source: Arc<dyn VerseSource + Send + Sync>) -> Self {
        let reciters = ReciterRegistry::new(config.reciter.default_id);
        Self {
            config: Arc::new(config),
            source,
            reciters,
        }
    }
}
