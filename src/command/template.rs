use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::format::anime::DEFAULT_TEMPLATE;
use crate::store::{TemplateStore, ANIME_TEMPLATE_KEY};

#[derive(Subcommand, Debug)]
pub enum TemplateCommand {
    /// Print the anime template in use
    Show,
    /// Store the template read from FILE as the anime template
    Set { file: PathBuf },
    /// Go back to the built-in anime template
    Reset,
}

impl TemplateCommand {
    pub async fn run(&self, store: &dyn TemplateStore) -> Result<()> {
        match self {
            TemplateCommand::Show => {
                let template = store.find(ANIME_TEMPLATE_KEY).await?;
                println!("{}", template.as_deref().unwrap_or(DEFAULT_TEMPLATE));
            }
            TemplateCommand::Set { file } => {
                let template = tokio::fs::read_to_string(file)
                    .await
                    .with_context(|| format!("Unable to read template {}", file.display()))?;
                store.save(ANIME_TEMPLATE_KEY, template.trim_end()).await?;
                tracing::info!(file = %file.display(), "stored anime template");
            }
            TemplateCommand::Reset => {
                if store.delete(ANIME_TEMPLATE_KEY).await? {
                    tracing::info!("removed stored anime template");
                } else {
                    tracing::info!("no stored anime template, already using the default");
                }
            }
        }
        Ok(())
    }
}
