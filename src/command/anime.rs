use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;

use super::{reported, Bot};
use crate::anilist::query::MediaLookup;
use crate::delivery::{Chat, Delivery};
use crate::format::{anime, render};

/// Examples: `ani 98444`, `ani --mid 39576`, `ani Asterisk war`
#[derive(Args, Debug)]
pub struct AnimeSearch {
    /// Treat a numeric query as a MyAnimeList ID
    #[arg(long = "mid")]
    pub mal_id: bool,

    /// Reply with a web page preview instead of a photo
    #[arg(long = "wp")]
    pub preview: bool,

    /// Anime name or ID
    pub query: Vec<String>,
}

impl AnimeSearch {
    pub async fn run(&self, bot: &Bot, chat: &dyn Chat) -> Result<()> {
        let lookup = match MediaLookup::from_input(&self.query.join(" "), self.mal_id) {
            Ok(lookup) => lookup,
            Err(err) => return chat.err(&err.to_string()).await,
        };
        tracing::debug!(?lookup, "searching anime");

        let Some(media) = reported(chat, bot.anilist.media(&lookup.variables()).await).await?
        else {
            return Ok(());
        };

        let synopsis_link = bot
            .publisher
            .publish(&anime::page_title(&media), &anime::page_html(&media))
            .await
            .with_context(|| format!("Publishing the synopsis page for media {}", media.id))?;

        let fields = anime::fields(&media, &synopsis_link, Utc::now().date_naive());
        let text = match render(&bot.anime_template, &fields) {
            Ok(text) => text,
            Err(err) => return chat.err(&err.to_string()).await,
        };

        Delivery::choose(text, media.title_image(), self.preview)
            .send(chat)
            .await
    }
}
