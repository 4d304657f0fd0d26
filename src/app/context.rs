use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::app::error::Result;
use crate::config::Config;
use crate::resolver::{ParallelResolver, TitleResolver};

pub struct AppContext {
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub resolver: Arc<TitleResolver>,
}

impl AppContext {
    /// Load configuration from `config_path`, or the default location, and
    /// wire up the resolver. `workers` overrides the configured pool size.
    pub fn new(config_path: Option<PathBuf>, workers: Option<usize>) -> Result<Self> {
        let (mut config, config_path) = match config_path {
            Some(path) => (Config::load_from(&path)?, Some(path)),
            None => (Config::load()?, Config::default_config_path().ok()),
        };
        if let Some(workers) = workers {
            config.resolver.workers = workers;
        }

        let mut ctx = Self::with_config(config)?;
        ctx.config_path = config_path;
        Ok(ctx)
    }

    pub fn with_config(config: Config) -> Result<Self> {
        let resolver = Arc::new(TitleResolver::from_config(&config)?);

        Ok(Self {
            config,
            config_path: None,
            resolver,
        })
    }

    /// Batch resolver sized by the configured worker count.
    pub fn parallel_resolver(&self, deadline: Option<Duration>) -> ParallelResolver {
        ParallelResolver::with_workers(self.resolver.clone(), self.config.resolver.workers)
            .with_deadline(deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_default_config() {
        let ctx = AppContext::with_config(Config::default()).unwrap();
        assert_eq!(ctx.config.resolver.workers, 10);
        assert!(ctx.config_path.is_none());
    }

    #[test]
    fn test_with_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[resolver]\nworkers = 3\n").unwrap();

        let ctx = AppContext::new(Some(path.clone()), None).unwrap();
        assert_eq!(ctx.config.resolver.workers, 3);
        assert_eq!(ctx.config_path, Some(path));
    }

    #[test]
    fn test_workers_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[resolver]\nworkers = 3\n").unwrap();

        let ctx = AppContext::new(Some(path), Some(7)).unwrap();
        assert_eq!(ctx.config.resolver.workers, 7);
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppContext::new(Some(dir.path().join("nope.toml")), None).is_err());
    }
}
