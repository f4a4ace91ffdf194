//! Response shapes for the three AniList queries.
//!
//! Everything the API may send back as `null` is an `Option` (or a collection
//! that reads `null` as empty) so a sparse entry never fails to decode.

use serde::{Deserialize, Deserializer};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Title {
    pub romaji: Option<String>,
    pub english: Option<String>,
    pub native: Option<String>,
}

impl Title {
    /// English title, falling back to romaji.
    pub fn preferred(&self) -> Option<&str> {
        self.english.as_deref().or(self.romaji.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FuzzyDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Trailer {
    pub id: Option<String>,
    pub site: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverImage {
    pub extra_large: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Image {
    pub large: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiringEpisode {
    pub airing_at: i64,
    pub episode: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Name {
    pub full: Option<String>,
    pub native: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Connection<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterNode {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: Name,
    pub image: Option<Image>,
    pub description: Option<String>,
    pub site_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Studio {
    pub name: String,
    pub site_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: i64,
    pub id_mal: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: Title,
    pub format: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<FuzzyDate>,
    pub season: Option<String>,
    pub episodes: Option<u32>,
    pub duration: Option<u32>,
    pub country_of_origin: Option<String>,
    pub source: Option<String>,
    pub trailer: Option<Trailer>,
    pub cover_image: Option<CoverImage>,
    pub banner_image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    pub average_score: Option<u32>,
    pub next_airing_episode: Option<AiringEpisode>,
    pub is_adult: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub characters: Connection<CharacterNode>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub studios: Connection<Studio>,
    pub site_url: Option<String>,
}

impl Media {
    pub fn cover(&self) -> Option<&str> {
        self.cover_image
            .as_ref()
            .and_then(|cover| cover.extra_large.as_deref())
    }

    /// Cover image, or the banner when there is no cover.
    pub fn title_image(&self) -> Option<&str> {
        self.cover().or(self.banner_image.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedMedia {
    pub id: i64,
    pub id_mal: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: Title,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub site_url: Option<String>,
    pub cover_image: Option<CoverImage>,
    pub banner_image: Option<String>,
    pub average_score: Option<u32>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: Name,
    pub image: Option<Image>,
    pub description: Option<String>,
    pub site_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub media: Connection<FeaturedMedia>,
}

impl Character {
    pub fn image(&self) -> Option<&str> {
        self.image.as_ref().and_then(|image| image.large.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiringMedia {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: Title,
    pub duration: Option<u32>,
    pub cover_image: Option<CoverImage>,
    pub banner_image: Option<String>,
    pub average_score: Option<u32>,
    pub site_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiringSchedule {
    pub airing_at: i64,
    pub time_until_airing: i64,
    pub episode: u32,
    pub media_id: i64,
    pub media: Option<AiringMedia>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MediaData {
    #[serde(rename = "Media")]
    pub media: Option<Media>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CharacterData {
    #[serde(rename = "Character")]
    pub character: Option<Character>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AiringPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub airing_schedules: Vec<AiringSchedule>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AiringData {
    #[serde(rename = "Page")]
    pub page: Option<AiringPage>,
}
