use std::path::PathBuf;

use tracing::{error, info};

use crate::{
    config::Config,
    crawler::{self, HttpFetcher},
    storage::{json_file, postgres::Storage},
};

enum Sink {
    Postgres(Storage),
    JsonFile(PathBuf),
}

pub struct ScrapingService {
    cfg: Config,
    sink: Sink,
}

impl ScrapingService {
    pub async fn new(cfg: Config) -> anyhow::Result<Self> {
        let sink = match &cfg.json_output {
            Some(path) => Sink::JsonFile(path.clone()),
            None => Sink::Postgres(Storage::new(&cfg).await?),
        };
        Ok(Self { cfg, sink })
    }

    /// Collects every page, then persists the whole batch. A persistence
    /// failure is reported and the run ends cleanly; only collection errors
    /// propagate.
    pub async fn run(&self) -> anyhow::Result<()> {
        let fetcher = HttpFetcher::new()?;
        let estates = crawler::collect_all(&fetcher, self.cfg.max_pages).await?;

        if estates.is_empty() {
            info!("no estates collected, nothing to persist");
            return Ok(());
        }

        match &self.sink {
            Sink::Postgres(storage) => match storage.save_estates_batch(&estates).await {
                Ok(saved) => info!(saved, "estates upserted into postgres"),
                Err(e) => {
                    error!(error = %e, "failed to save estates batch");
                    eprintln!("failed to save estates to postgres: {e}");
                }
            },
            Sink::JsonFile(path) => match json_file::save_to_json(&estates, path).await {
                Ok(()) => info!(path = %path.display(), count = estates.len(), "estates written to file"),
                Err(e) => {
                    error!(error = %e, path = %path.display(), "failed to write estates file");
                    eprintln!("failed to write estates file: {e}");
                }
            },
        }

        Ok(())
    }
}
