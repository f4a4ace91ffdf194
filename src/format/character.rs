use super::NOT_AVAILABLE;
use crate::anilist::model::{Character, FeaturedMedia};

/// How many featured media make it onto the published page.
const PAGE_MEDIA_LIMIT: usize = 6;

fn media_title(media: &FeaturedMedia) -> &str {
    media.title.preferred().unwrap_or(NOT_AVAILABLE)
}

pub fn page_title(character: &Character) -> String {
    character
        .name
        .full
        .clone()
        .unwrap_or_else(|| character.id.to_string())
}

/// Caption for the reply, linking the published page at `page_url`.
pub fn caption(character: &Character, page_url: &str) -> String {
    let featured: String = character
        .media
        .nodes
        .iter()
        .map(|media| {
            format!(
                "    • {} `[{}]` \n",
                media_title(media),
                media.kind.as_deref().unwrap_or(NOT_AVAILABLE)
            )
        })
        .collect();

    format!(
        "[🇯🇵] __{native}__
    (`{name}`)
**ID:** {id}

**Featured in:** __\n{featured}__

[About Character]({page_url})
[Visit Website]({site_url})",
        native = character.name.native.as_deref().unwrap_or(NOT_AVAILABLE),
        name = character.name.full.as_deref().unwrap_or(NOT_AVAILABLE),
        id = character.id,
        site_url = character.site_url.as_deref().unwrap_or(NOT_AVAILABLE),
    )
}

fn featured_html(media: &FeaturedMedia) -> String {
    let mut html = String::from("<br>");
    let cover = media
        .cover_image
        .as_ref()
        .and_then(|c| c.extra_large.as_deref())
        .or(media.banner_image.as_deref());
    if let Some(cover) = cover {
        html.push_str(&format!("<img src=\"{cover}\"/>"));
    }
    html.push_str("<br>");
    html.push_str(&format!("<h3>{}</h3>", media_title(media)));
    html.push_str(&format!(
        "<em>[🇯🇵] {}</em><br>",
        media.title.native.as_deref().unwrap_or_default()
    ));
    html.push_str(&format!(
        "<a href=\"{}\">{}</a><br>",
        media.site_url.as_deref().unwrap_or_default(),
        media.kind.as_deref().unwrap_or(NOT_AVAILABLE)
    ));
    html.push_str(&format!("<b>Media ID:</b> {}<br>", media.id));
    if let Some(id_mal) = media.id_mal {
        html.push_str(&format!("<b>MAL ID:</b> {id_mal}<br>"));
    }
    match media.average_score {
        Some(score) => html.push_str(&format!("<b>SCORE:</b> {score}/100<br>")),
        None => html.push_str(&format!("<b>SCORE:</b> {NOT_AVAILABLE}<br>")),
    }
    html.push_str(media.description.as_deref().unwrap_or(NOT_AVAILABLE));
    html.push_str("<br>");
    html
}

/// The long-form page: portrait, biography and the first few featured media.
pub fn page_html(character: &Character) -> String {
    let name = character.name.full.as_deref().unwrap_or_default();
    let mut html = String::new();

    if let Some(image) = character.image() {
        html.push_str(&format!("<img src='{image}' title='{name}'/>"));
    }
    html.push_str(&format!(
        "<h1>[🇯🇵] {}</h1>",
        character.name.native.as_deref().unwrap_or(name)
    ));
    html.push_str("<h3>About Character:</h3>");
    html.push_str(character.description.as_deref().unwrap_or(NOT_AVAILABLE));
    html.push_str("<br>");

    let featured: String = character
        .media
        .nodes
        .iter()
        .take(PAGE_MEDIA_LIMIT)
        .map(featured_html)
        .collect();
    if !featured.is_empty() {
        html.push_str("<h2>Top Featured Anime</h2>");
        html.push_str(&featured);
        html.push_str("<br><br>");
    }
    html
}
