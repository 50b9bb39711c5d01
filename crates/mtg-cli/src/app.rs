use anyhow::Context;
use chrono::TimeDelta;
use mtg_core::config::Config;
use mtg_core::{FileBlob, Store};
use std::path::{Path, PathBuf};

/// Everything a command needs, built once per invocation.
pub struct App {
    pub config: Config,
    pub store: Store<FileBlob>,
}

impl App {
    pub fn open(config: Config, blob_path: PathBuf) -> anyhow::Result<Self> {
        let store = Store::open(FileBlob::new(&blob_path), config.on_corrupt_blob)
            .with_context(|| format!("failed to load appointments from {}", blob_path.display()))?;
        Ok(Self { config, store })
    }

    pub fn blob_path(&self) -> &Path {
        self.store.persistence().path()
    }

    pub fn radius(&self) -> TimeDelta {
        self.config.nowish_radius()
    }
}
