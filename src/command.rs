use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::anilist::api::{constants, AniListClient, AniListError};
use crate::delivery::{Chat, ConsoleChat};
use crate::format::anime::DEFAULT_TEMPLATE;
use crate::store::{JsonFileStore, TemplateStore, ANIME_TEMPLATE_KEY};
use crate::telegraph::{PagePublisher, TelegraphClient, TELEGRAPH_API};

mod airing;
mod anime;
mod character;
mod template;

pub use airing::AiringSearch;
pub use anime::AnimeSearch;
pub use character::CharacterSearch;
pub use template::TemplateCommand;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub options: Options,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug)]
pub struct Options {
    /// AniList GraphQL endpoint
    #[arg(long, global = true, env = "ANILIST_ENDPOINT", default_value = constants::ENDPOINT)]
    pub endpoint: String,

    /// Telegraph API base URL
    #[arg(long, global = true, env = "TELEGRAPH_URL", default_value = TELEGRAPH_API)]
    pub telegraph_url: String,

    /// Telegraph access token. An anonymous account is created when unset
    #[arg(long, global = true, env = "TELEGRAPH_TOKEN", hide_env_values = true)]
    pub telegraph_token: Option<String>,

    /// JSON file holding caption template overrides
    #[arg(long, global = true, env = "ANILIST_TEMPLATES", default_value = "templates.json")]
    pub templates: PathBuf,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search for anime using the AniList API
    #[command(visible_alias = "anime")]
    Ani(AnimeSearch),
    /// Get info about a character and where they appear
    #[command(visible_alias = "character")]
    Char(CharacterSearch),
    /// Upcoming episodes of an airing anime
    Airing(AiringSearch),
    /// Manage the stored anime caption template
    #[command(subcommand)]
    Template(TemplateCommand),
}

/// What every lookup command needs, built once per run.
pub struct Bot {
    pub anilist: AniListClient,
    pub publisher: Box<dyn PagePublisher>,
    pub anime_template: String,
}

impl Bot {
    /// Reads the anime template override once; falls back to the built-in one.
    pub async fn load(options: &Options, store: &dyn TemplateStore) -> Result<Self> {
        let anime_template = match store.find(ANIME_TEMPLATE_KEY).await? {
            Some(template) => {
                tracing::info!("using stored anime template");
                template
            }
            None => DEFAULT_TEMPLATE.to_string(),
        };

        Ok(Self {
            anilist: AniListClient::new(&options.endpoint),
            publisher: Box::new(TelegraphClient::new(
                &options.telegraph_url,
                options.telegraph_token.clone(),
            )),
            anime_template,
        })
    }
}

/// Reports an AniList error to the user as `[message]`; other errors propagate.
/// `None` means the command should stop quietly.
async fn reported<T>(chat: &dyn Chat, result: Result<T, AniListError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(AniListError::Api { message, .. }) => {
            chat.err(&format!("[{message}]")).await?;
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let store = JsonFileStore::new(&self.options.templates);

        if let Command::Template(command) = &self.command {
            return command.run(&store).await;
        }

        let bot = Bot::load(&self.options, &store).await?;
        let chat = ConsoleChat::new("Querying AniList...")?;
        match &self.command {
            Command::Ani(search) => search.run(&bot, &chat).await,
            Command::Char(search) => search.run(&bot, &chat).await,
            Command::Airing(search) => search.run(&bot, &chat).await,
            Command::Template(_) => Ok(()),
        }
    }
}
