use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;

/// Key the anime caption override is stored under.
pub const ANIME_TEMPLATE_KEY: &str = "ANIME_TEMPLATE";

/// Keyed storage for caption templates.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn find(&self, key: &str) -> Result<Option<String>>;
    async fn save(&self, key: &str, template: &str) -> Result<()>;
    /// Returns whether something was removed.
    async fn delete(&self, key: &str) -> Result<bool>;
}

/// Templates kept in a single JSON object on disk. A missing file is an empty store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load(&self) -> Result<BTreeMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a JSON object of templates", self.path.display())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err).with_context(|| format!("Unable to read {}", self.path.display())),
        }
    }

    async fn store(&self, templates: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let raw = serde_json::to_string_pretty(templates)?;
        tokio::fs::write(&self.path, raw)
            .await
            .with_context(|| format!("Unable to write {}", self.path.display()))
    }
}

#[async_trait]
impl TemplateStore for JsonFileStore {
    async fn find(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load().await?.remove(key))
    }

    async fn save(&self, key: &str, template: &str) -> Result<()> {
        let mut templates = self.load().await?;
        templates.insert(key.to_string(), template.to_string());
        self.store(&templates).await
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut templates = self.load().await?;
        if templates.remove(key).is_none() {
            return Ok(false);
        }
        self.store(&templates).await?;
        Ok(true)
    }
}
