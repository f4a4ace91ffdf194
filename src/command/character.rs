use anyhow::{Context, Result};
use clap::Args;

use super::{reported, Bot};
use crate::anilist::query::character_variables;
use crate::delivery::{Chat, Delivery};
use crate::format::character;

/// Example: `char Subaru Natsuki`
#[derive(Args, Debug)]
pub struct CharacterSearch {
    /// Name of the character
    #[arg(allow_hyphen_values = true)]
    pub query: Vec<String>,
}

impl CharacterSearch {
    pub async fn run(&self, bot: &Bot, chat: &dyn Chat) -> Result<()> {
        let variables = match character_variables(&self.query.join(" ")) {
            Ok(variables) => variables,
            Err(err) => return chat.err(&err.to_string()).await,
        };

        let Some(found) = reported(chat, bot.anilist.character(&variables).await).await? else {
            return Ok(());
        };

        let page_url = bot
            .publisher
            .publish(&character::page_title(&found), &character::page_html(&found))
            .await
            .with_context(|| format!("Publishing the page for character {}", found.id))?;

        Delivery::choose(character::caption(&found, &page_url), found.image(), false)
            .send(chat)
            .await
    }
}
