//! Fixtures and collaborator doubles shared by the unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::delivery::Chat;
use crate::telegraph::{PagePublisher, TelegraphError};

pub mod fixtures {
    use serde_json::{json, Value};

    /// 2026-10-18 15:00:00 UTC
    pub const NEXT_AIRING_AT: i64 = 1_792_335_600;

    pub fn media() -> Value {
        json!({
            "id": 98444,
            "idMal": 31338,
            "title": {
                "romaji": "Gakusen Toshi Asterisk",
                "english": "The Asterisk War",
                "native": "学戦都市アスタリスク"
            },
            "format": "TV",
            "status": "RELEASING",
            "description": "Rikka, also known as Asterisk, is a city on water.<br><br><i>(Source: Crunchyroll)</i>",
            "startDate": {"year": 2015, "month": 10, "day": 3},
            "season": "FALL",
            "episodes": 12,
            "duration": 24,
            "countryOfOrigin": "JP",
            "source": "LIGHT_NOVEL",
            "trailer": {"id": "dQw4w9WgXcQ", "site": "youtube", "thumbnail": "https://i.ytimg.com/vi/x/hqdefault.jpg"},
            "coverImage": {"extraLarge": "https://img.example/cover.jpg"},
            "bannerImage": "https://img.example/banner.jpg",
            "genres": ["Action", "Romance"],
            "averageScore": 68,
            "nextAiringEpisode": {"airingAt": NEXT_AIRING_AT, "timeUntilAiring": 97200, "episode": 3},
            "isAdult": false,
            "characters": {"nodes": [
                {
                    "id": 120021,
                    "name": {"full": "Ayato Amagiri", "native": "天霧綾斗"},
                    "image": {"large": "https://img.example/ayato.png"},
                    "description": "Transfer student.",
                    "siteUrl": "https://anilist.co/character/120021"
                },
                {
                    "id": 120023,
                    "name": {"full": "Julis-Alexia von Riessfeld", "native": "ユリス"},
                    "image": {"large": "https://img.example/julis.png"},
                    "description": null,
                    "siteUrl": "https://anilist.co/character/120023"
                }
            ]},
            "studios": {"nodes": [{"name": "A-1 Pictures", "siteUrl": "https://anilist.co/studio/7"}]},
            "siteUrl": "https://anilist.co/anime/98444"
        })
    }

    pub fn character() -> Value {
        let mut nodes = vec![json!({
            "id": 21355,
            "idMal": 31240,
            "title": {"romaji": "Re:Zero kara Hajimeru Isekai Seikatsu", "english": "Re:ZERO -Starting Life in Another World-", "native": "Re:ゼロから始める異世界生活"},
            "type": "ANIME",
            "siteUrl": "https://anilist.co/anime/21355",
            "coverImage": {"extraLarge": "https://img.example/rezero.jpg"},
            "bannerImage": null,
            "averageScore": null,
            "description": "Subaru is summoned."
        })];
        nodes.extend((2..=8).map(|n| {
            json!({
                "id": 21355 + n,
                "idMal": null,
                "title": {"romaji": format!("Re:Zero kara Hajimeru Isekai Seikatsu {n}"), "english": null, "native": null},
                "type": "MANGA",
                "siteUrl": format!("https://anilist.co/manga/{}", 21355 + n),
                "coverImage": null,
                "bannerImage": null,
                "averageScore": 80,
                "description": null
            })
        }));

        json!({
            "id": 88750,
            "name": {"full": "Subaru Natsuki", "native": "ナツキ・スバル"},
            "image": {"large": "https://img.example/subaru.png"},
            "description": "<p>Protagonist.</p>",
            "siteUrl": "https://anilist.co/character/88750",
            "media": {"nodes": nodes}
        })
    }

    /// Two upcoming episodes, deliberately out of order.
    pub fn airing_schedules() -> Value {
        let media = json!({
            "title": {"romaji": "Gakusen Toshi Asterisk", "english": "The Asterisk War", "native": "学戦都市アスタリスク"},
            "duration": 24,
            "coverImage": {"extraLarge": "https://img.example/cover.jpg"},
            "nextAiringEpisode": {"airingAt": NEXT_AIRING_AT, "timeUntilAiring": 97200, "episode": 3},
            "bannerImage": null,
            "averageScore": null,
            "siteUrl": "https://anilist.co/anime/98444"
        });
        json!([
            {
                "id": 2,
                "airingAt": NEXT_AIRING_AT + 7 * 86400,
                "timeUntilAiring": 97200 + 7 * 86400,
                "episode": 4,
                "mediaId": 98444,
                "media": media.clone()
            },
            {
                "id": 1,
                "airingAt": NEXT_AIRING_AT,
                "timeUntilAiring": 97200,
                "episode": 3,
                "mediaId": 98444,
                "media": media
            }
        ])
    }
}

/// What a command did with the chat, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Photo { photo: String, caption: String },
    Reply(String),
    Edit(String),
    Err(String),
    Delete,
}

#[derive(Debug, Default)]
pub struct RecordingChat {
    pub sent: Mutex<Vec<Sent>>,
}

impl RecordingChat {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    fn push(&self, sent: Sent) {
        if let Ok(mut log) = self.sent.lock() {
            log.push(sent);
        }
    }
}

#[async_trait]
impl Chat for RecordingChat {
    async fn reply_photo(&self, photo: &str, caption: &str) -> anyhow::Result<()> {
        self.push(Sent::Photo {
            photo: photo.to_string(),
            caption: caption.to_string(),
        });
        Ok(())
    }

    async fn reply(&self, text: &str) -> anyhow::Result<()> {
        self.push(Sent::Reply(text.to_string()));
        Ok(())
    }

    async fn edit(&self, text: &str) -> anyhow::Result<()> {
        self.push(Sent::Edit(text.to_string()));
        Ok(())
    }

    async fn err(&self, text: &str) -> anyhow::Result<()> {
        self.push(Sent::Err(text.to_string()));
        Ok(())
    }

    async fn delete(&self) -> anyhow::Result<()> {
        self.push(Sent::Delete);
        Ok(())
    }
}

/// Publishes nowhere; remembers what it was given and hands back a fixed URL.
/// Clones share the same record.
#[derive(Debug, Default, Clone)]
pub struct StaticPublisher {
    pages: Arc<Mutex<Vec<(String, String)>>>,
}

impl StaticPublisher {
    pub const URL: &'static str = "https://telegra.ph/Static-10-17";

    /// `(title, html)` of every page published so far.
    pub fn pages(&self) -> Vec<(String, String)> {
        self.pages.lock().map(|pages| pages.clone()).unwrap_or_default()
    }

    pub fn titles(&self) -> Vec<String> {
        self.pages().into_iter().map(|(title, _)| title).collect()
    }
}

#[async_trait]
impl PagePublisher for StaticPublisher {
    async fn publish(&self, title: &str, html: &str) -> Result<String, TelegraphError> {
        if let Ok(mut pages) = self.pages.lock() {
            pages.push((title.to_string(), html.to_string()));
        }
        Ok(Self::URL.to_string())
    }
}
