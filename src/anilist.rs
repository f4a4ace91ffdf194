pub mod model;
pub mod query;

pub mod api {
    use reqwest::Client;
    use serde::{de::DeserializeOwned, Deserialize, Serialize};
    use serde_json::{json, Value};
    use thiserror::Error;

    use super::model::{AiringData, AiringSchedule, Character, CharacterData, Media, MediaData};

    pub mod constants {
        pub const ENDPOINT: &str = "https://graphql.anilist.co";

        pub const ANIME_QUERY: &str = "
query ($id: Int, $idMal: Int, $search: String, $type: MediaType, $asHtml: Boolean) {
  Media (id: $id, idMal: $idMal, search: $search, type: $type) {
    id
    idMal
    title {
      romaji
      english
      native
    }
    format
    status
    description (asHtml: $asHtml)
    startDate {
      year
      month
      day
    }
    season
    episodes
    duration
    countryOfOrigin
    source (version: 2)
    trailer {
      id
      site
      thumbnail
    }
    coverImage {
      extraLarge
    }
    bannerImage
    genres
    averageScore
    nextAiringEpisode {
      airingAt
      timeUntilAiring
      episode
    }
    isAdult
    characters (role: MAIN, page: 1, perPage: 10) {
      nodes {
        id
        name {
          full
          native
        }
        image {
          large
        }
        description (asHtml: $asHtml)
        siteUrl
      }
    }
    studios (isMain: true) {
      nodes {
        name
        siteUrl
      }
    }
    siteUrl
  }
}
";

        pub const AIRING_QUERY: &str = "
query ($id: Int, $mediaId: Int, $notYetAired: Boolean) {
  Page (page: 1, perPage: 50) {
    airingSchedules (id: $id, mediaId: $mediaId, notYetAired: $notYetAired) {
      id
      airingAt
      timeUntilAiring
      episode
      mediaId
      media {
        title {
          romaji
          english
          native
        }
        duration
        coverImage {
          extraLarge
        }
        nextAiringEpisode {
          airingAt
          timeUntilAiring
          episode
        }
        bannerImage
        averageScore
        siteUrl
      }
    }
  }
}
";

        pub const CHARACTER_QUERY: &str = "
query ($search: String, $asHtml: Boolean) {
  Character (search: $search) {
    id
    name {
      full
      native
    }
    image {
      large
    }
    description (asHtml: $asHtml)
    siteUrl
    media (page: 1, perPage: 25) {
      nodes {
        id
        idMal
        title {
          romaji
          english
          native
        }
        type
        siteUrl
        coverImage {
          extraLarge
        }
        bannerImage
        averageScore
        description (asHtml: $asHtml)
      }
    }
  }
}
";
    }

    /// One entry of the `errors` array AniList returns next to (or instead of) `data`.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct GraphQlError {
        pub message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub status: Option<u16>,
        #[serde(flatten)]
        pub extra: serde_json::Map<String, Value>,
    }

    #[derive(Debug, Deserialize)]
    struct GraphQlResponse {
        data: Option<Value>,
        errors: Option<Vec<GraphQlError>>,
    }

    #[derive(Debug, Error)]
    pub enum AniListError {
        /// The API answered with an `errors` array. `message` is the first error's message.
        #[error("{message}")]
        Api {
            message: String,
            errors: Vec<GraphQlError>,
        },
        #[error("AniList returned no {0}")]
        Missing(&'static str),
        #[error("request to AniList failed")]
        Http(#[from] reqwest::Error),
        #[error("unexpected AniList response shape")]
        Decode(#[from] serde_json::Error),
    }

    #[derive(Debug, Clone)]
    pub struct AniListClient {
        http: Client,
        endpoint: String,
    }

    impl Default for AniListClient {
        fn default() -> Self {
            Self::new(constants::ENDPOINT)
        }
    }

    impl AniListClient {
        pub fn new(endpoint: impl Into<String>) -> Self {
            Self {
                http: Client::new(),
                endpoint: endpoint.into(),
            }
        }

        /// Sends `{query, variables}` to the GraphQL endpoint and decodes `data` as `T`.
        ///
        /// A non-empty `errors` array wins over whatever `data` holds, because AniList
        /// reports a failed lookup as `{"data": {"Media": null}, "errors": [...]}`.
        pub async fn post<T: DeserializeOwned>(
            &self,
            query: &str,
            variables: &Value,
        ) -> Result<T, AniListError> {
            let body = json!({"query": query, "variables": variables});
            tracing::debug!(endpoint = %self.endpoint, %variables, "querying AniList");

            let response: GraphQlResponse = self
                .http
                .post(&self.endpoint)
                .header("Accept", "application/json")
                .json(&body)
                .send()
                .await?
                .json()
                .await?;

            if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
                tracing::error!(
                    errors = %serde_json::to_string(&errors).unwrap_or_default(),
                    "ANILIST RETURNED FOLLOWING ERROR"
                );
                return Err(AniListError::Api {
                    message: errors[0].message.clone(),
                    errors,
                });
            }

            let data = response.data.ok_or(AniListError::Missing("data"))?;
            Ok(serde_json::from_value(data)?)
        }

        pub async fn media(&self, variables: &Value) -> Result<Media, AniListError> {
            let data: MediaData = self.post(constants::ANIME_QUERY, variables).await?;
            data.media.ok_or(AniListError::Missing("Media"))
        }

        pub async fn character(&self, variables: &Value) -> Result<Character, AniListError> {
            let data: CharacterData = self.post(constants::CHARACTER_QUERY, variables).await?;
            data.character.ok_or(AniListError::Missing("Character"))
        }

        pub async fn airing(&self, variables: &Value) -> Result<Vec<AiringSchedule>, AniListError> {
            let data: AiringData = self.post(constants::AIRING_QUERY, variables).await?;
            Ok(data.page.map(|page| page.airing_schedules).unwrap_or_default())
        }
    }

}
