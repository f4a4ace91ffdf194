use chrono::NaiveDate;

use super::humanize::{natural_date, ordinal};
use super::{country_flag, yes_no, Fields, NOT_AVAILABLE};
use crate::anilist::model::{FuzzyDate, Media};

pub const DEFAULT_TEMPLATE: &str = "[{c_flag}]**{romaji}**
        __{english}__
        {native}

**ID | MAL ID:** `{idm}` | `{idmal}`
**SOURCE:** `{source}`
🆎 **TYPE:** `{formats}`
🎭 **GENRES:** `{genre}`
🎋 **SEASON:** `{season}`
🔢 **EPISODES:** `{episodes}`
🕓 **DURATION:** `{duration} min/ep`
➤ **CHARACTERS:** `{chrctrs}`
📡 **STATUS:** `{status}`
📺 **NEXT AIRING:** `{air_on}`
💯 **SCORE:** `{score}/100`
🔞 **ADULT RATED:** `{adult}`
🎬 {trailer_link}
📖 [Synopsis & More]({synopsis_link})";

/// Stands in for a missing english title.
pub const NO_ENGLISH_TITLE: &str = "--------";

const MAX_CHARACTERS: usize = 10;

fn flag(media: &Media) -> String {
    media
        .country_of_origin
        .as_deref()
        .map(country_flag)
        .unwrap_or_default()
}

/// Title used for the published page: english, else romaji.
pub fn page_title(media: &Media) -> String {
    media
        .title
        .preferred()
        .map(str::to_string)
        .unwrap_or_else(|| media.id.to_string())
}

fn trailer_link(media: &Media) -> String {
    match &media.trailer {
        Some(trailer) if trailer.site.as_deref() == Some("youtube") => match &trailer.id {
            Some(id) => format!("[Trailer](https://youtu.be/{id})"),
            None => NOT_AVAILABLE.to_string(),
        },
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn next_airing(media: &Media, today: NaiveDate) -> Option<String> {
    media.next_airing_episode.as_ref().map(|next| {
        format!(
            "{} | {} eps",
            natural_date(next.airing_at, today),
            ordinal(next.episode)
        )
    })
}

fn start_date(date: Option<&FuzzyDate>) -> String {
    fn part<T: ToString>(value: Option<T>) -> String {
        value.map_or_else(|| "?".to_string(), |v| v.to_string())
    }
    let date = date.cloned().unwrap_or_default();
    format!("{}/{}/{}", part(date.day), part(date.month), part(date.year))
}

fn studios_html(media: &Media) -> String {
    media
        .studios
        .nodes
        .iter()
        .map(|studio| {
            format!(
                "<a href='{}'>• {}</a> ",
                studio.site_url.as_deref().unwrap_or("#"),
                studio.name
            )
        })
        .collect()
}

fn characters_html(media: &Media, flag: &str) -> String {
    let mut html = String::new();
    for character in &media.characters.nodes {
        let image = character.image.as_ref().and_then(|i| i.large.as_deref());
        html.push_str("<br>");
        html.push_str(&format!(
            "<a href=\"{}\"><img src=\"{}\"/></a>",
            character.site_url.as_deref().unwrap_or_default(),
            image.unwrap_or_default()
        ));
        html.push_str("<br>");
        html.push_str(&format!(
            "<h3>{}</h3>",
            character.name.full.as_deref().unwrap_or_default()
        ));
        html.push_str(&format!(
            "<em>{} {}</em><br>",
            flag,
            character.name.native.as_deref().unwrap_or_default()
        ));
        html.push_str(&format!("<b>Character ID</b>: {}<br>", character.id));
        html.push_str(&format!(
            "<h4>About Character and Role:</h4>{}",
            character.description.as_deref().unwrap_or(NOT_AVAILABLE)
        ));
        html.push_str("<br><br>");
    }
    html
}

/// The long-form page: synopsis, main characters and links.
pub fn page_html(media: &Media) -> String {
    let flag = flag(media);
    let romaji = media.title.romaji.as_deref().unwrap_or_default();
    let mut html = String::new();

    if let Some(image) = media.title_image() {
        html.push_str(&format!("<img src='{image}' title='{romaji}'/>"));
    }
    html.push_str(&format!(
        "<h1>[{flag}] {}</h1>",
        media.title.native.as_deref().unwrap_or(romaji)
    ));
    html.push_str("<h3>Synopsis:</h3>");
    html.push_str(media.description.as_deref().unwrap_or(NOT_AVAILABLE));
    html.push_str("<br>");

    let characters = characters_html(media, &flag);
    if !characters.is_empty() {
        html.push_str("<h2>Main Characters:</h2>");
        html.push_str(&characters);
        html.push_str("<br><br>");
    }

    html.push_str("<h3>More Info:</h3>");
    html.push_str(&format!(
        "<b>Started On:</b> {}",
        start_date(media.start_date.as_ref())
    ));
    html.push_str(&format!("<br><b>Studios:</b> {}<br>", studios_html(media)));
    if let Some(id_mal) = media.id_mal {
        html.push_str(&format!(
            "<a href='https://myanimelist.net/anime/{id_mal}'>View on MAL</a>"
        ));
    }
    if let Some(url) = &media.site_url {
        html.push_str(&format!("<a href='{url}'> View on anilist.co</a>"));
    }
    if let Some(banner) = &media.banner_image {
        html.push_str(&format!("<img src='{banner}'/>"));
    }
    html
}

/// Everything an anime caption template may reference.
pub fn fields(media: &Media, synopsis_link: &str, today: NaiveDate) -> Fields {
    let mut fields = Fields::default();
    let title = &media.title;

    let genre = media.genres.join(", ");
    let characters: String = media
        .characters
        .nodes
        .iter()
        .take(MAX_CHARACTERS)
        .map(|c| format!("    •{}", c.name.full.as_deref().unwrap_or(NOT_AVAILABLE)))
        .collect::<Vec<_>>()
        .join("\n");

    fields
        .set("c_flag", flag(media))
        .set("country", media.country_of_origin.as_deref().unwrap_or(NOT_AVAILABLE))
        .set_opt("romaji", title.romaji.as_deref())
        .set("english", title.english.as_deref().unwrap_or(NO_ENGLISH_TITLE))
        .set_opt("native", title.native.as_deref())
        .set("idm", media.id)
        .set_opt("idmal", media.id_mal)
        .set_opt("source", media.source.as_deref())
        .set_opt("formats", media.format.as_deref())
        .set_opt("status", media.status.as_deref())
        .set_opt("season", media.season.as_deref())
        .set_opt("episodes", media.episodes)
        .set_opt("duration", media.duration)
        .set("genre", if genre.is_empty() { NOT_AVAILABLE } else { genre.as_str() })
        .set("genres", &genre)
        .set("chrctrs", format!("\n{characters}"))
        .set_opt("score", media.average_score)
        .set_opt("air_on", next_airing(media, today))
        .set("adult", yes_no(media.is_adult))
        .set("trailer_link", trailer_link(media))
        .set_opt("synopsis", media.description.as_deref())
        .set("synopsis_link", synopsis_link)
        .set_opt("cover_img", media.cover())
        .set_opt("banner_img", media.banner_image.as_deref())
        .set_opt("title_img", media.title_image())
        .set("title_h", page_title(media))
        .set("studios", studios_html(media))
        .set_opt("url", media.site_url.as_deref())
        .set("s_date", start_date(media.start_date.as_ref()));
    fields
}
