use serde_json::{json, Value};
use thiserror::Error;

/// Input problems shown to the user as-is.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("NameError: 'query' not defined")]
    Undefined,
    #[error("ValueError: airing lookup needs a numeric AniList ID, got {0:?}")]
    NotNumeric(String),
}

/// How an `ani` invocation finds its media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaLookup {
    Id(i32),
    MalId(i32),
    Search(String),
}

fn as_id(input: &str) -> Option<i32> {
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    // Digits that overflow a GraphQL Int fall back to a text search.
    input.parse().ok()
}

fn required(input: &str) -> Result<&str, QueryError> {
    match input.trim() {
        "" => Err(QueryError::Undefined),
        trimmed => Ok(trimmed),
    }
}

impl MediaLookup {
    /// Digits look up by AniList ID, or by MyAnimeList ID when `mal_id` is set.
    /// Anything else is a title search.
    pub fn from_input(input: &str, mal_id: bool) -> Result<Self, QueryError> {
        let input = required(input)?;
        Ok(match as_id(input) {
            Some(id) if mal_id => MediaLookup::MalId(id),
            Some(id) => MediaLookup::Id(id),
            None => MediaLookup::Search(input.to_string()),
        })
    }

    pub fn variables(&self) -> Value {
        match self {
            MediaLookup::Id(id) => json!({"id": id, "asHtml": true, "type": "ANIME"}),
            MediaLookup::MalId(id) => json!({"idMal": id, "asHtml": true, "type": "ANIME"}),
            MediaLookup::Search(search) => {
                json!({"search": search, "asHtml": true, "type": "ANIME"})
            }
        }
    }
}

pub fn character_variables(input: &str) -> Result<Value, QueryError> {
    let search = required(input)?;
    Ok(json!({"search": search, "asHtml": true}))
}

pub fn airing_variables(input: &str) -> Result<Value, QueryError> {
    let input = required(input)?;
    let media_id = as_id(input).ok_or_else(|| QueryError::NotNumeric(input.to_string()))?;
    Ok(json!({"mediaId": media_id, "notYetAired": true}))
}
