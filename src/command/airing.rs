use anyhow::Result;
use chrono::Utc;
use clap::Args;

use super::{reported, Bot};
use crate::anilist::query::airing_variables;
use crate::delivery::{Chat, Delivery};
use crate::format::airing;

/// Example: `airing 98444`
#[derive(Args, Debug)]
pub struct AiringSearch {
    /// AniList ID of the anime
    pub id: Option<String>,
}

impl AiringSearch {
    pub async fn run(&self, bot: &Bot, chat: &dyn Chat) -> Result<()> {
        let input = self.id.as_deref().unwrap_or_default();
        let variables = match airing_variables(input) {
            Ok(variables) => variables,
            Err(err) => return chat.err(&err.to_string()).await,
        };

        let Some(schedules) = reported(chat, bot.anilist.airing(&variables).await).await? else {
            return Ok(());
        };

        let Some(caption) = airing::caption(&schedules, Utc::now()) else {
            return chat.err("[No upcoming episodes]").await;
        };
        Delivery::choose(caption, airing::image(&schedules), false)
            .send(chat)
            .await
    }
}
