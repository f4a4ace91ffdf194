use chrono::{DateTime, Utc};

use super::anime::NO_ENGLISH_TITLE;
use super::humanize::{natural_date, natural_time};
use super::NOT_AVAILABLE;
use crate::anilist::model::{AiringMedia, AiringSchedule};

const MAX_EPISODES: usize = 5;

/// Cover (or banner) of the media the schedules belong to.
pub fn image(schedules: &[AiringSchedule]) -> Option<&str> {
    let media = schedules.first()?.media.as_ref()?;
    media
        .cover_image
        .as_ref()
        .and_then(|cover| cover.extra_large.as_deref())
        .or(media.banner_image.as_deref())
}

/// Caption for upcoming episodes; `None` when nothing is scheduled.
pub fn caption(schedules: &[AiringSchedule], now: DateTime<Utc>) -> Option<String> {
    let first = schedules.first()?;
    let fallback = AiringMedia::default();
    let media = first.media.as_ref().unwrap_or(&fallback);
    let today = now.date_naive();

    let mut upcoming: Vec<&AiringSchedule> = schedules.iter().collect();
    upcoming.sort_by_key(|schedule| schedule.airing_at);

    let episodes: Vec<String> = upcoming
        .iter()
        .take(MAX_EPISODES)
        .map(|schedule| {
            format!(
                "    • Episode {}: `{}` ({})",
                schedule.episode,
                natural_date(schedule.airing_at, today),
                // The API's own countdown is relative to when it answered.
                natural_time(now.timestamp().saturating_add(schedule.time_until_airing), now)
            )
        })
        .collect();

    let url = media
        .site_url
        .clone()
        .unwrap_or_else(|| format!("https://anilist.co/anime/{}", first.media_id));

    let duration = media
        .duration
        .map_or_else(|| NOT_AVAILABLE.to_string(), |d| format!("{d} min/ep"));
    let score = media
        .average_score
        .map_or_else(|| NOT_AVAILABLE.to_string(), |s| format!("{s}/100"));

    Some(format!(
        "**{romaji}**
        __{english}__
        {native}

📺 **UPCOMING EPISODES:**
{episodes}

🕓 **DURATION:** `{duration}`
💯 **SCORE:** `{score}`
🔗 [View on anilist.co]({url})",
        romaji = media.title.romaji.as_deref().unwrap_or(NOT_AVAILABLE),
        english = media.title.english.as_deref().unwrap_or(NO_ENGLISH_TITLE),
        native = media.title.native.as_deref().unwrap_or(NOT_AVAILABLE),
        episodes = episodes.join("\n"),
    ))
}
