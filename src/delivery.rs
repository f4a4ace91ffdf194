use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};

/// Longest text Telegram accepts as a photo caption.
pub const CAPTION_LIMIT: usize = 1023;

/// The chat a command was issued from.
///
/// `edit` and `delete` act on the message that carried the command.
#[async_trait]
pub trait Chat: Send + Sync {
    async fn reply_photo(&self, photo: &str, caption: &str) -> Result<()>;
    async fn reply(&self, text: &str) -> Result<()>;
    async fn edit(&self, text: &str) -> Result<()>;
    async fn err(&self, text: &str) -> Result<()>;
    async fn delete(&self) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Edit the command message in place, letting the client build a link preview.
    Preview(String),
    Photo { photo: String, caption: String },
    Message(String),
}

impl Delivery {
    /// Picks a channel for `text`: a preview edit when asked for, a captioned
    /// photo when the text fits, otherwise a plain message.
    pub fn choose(text: String, photo: Option<&str>, preview: bool) -> Self {
        if preview {
            return match photo {
                Some(photo) => Delivery::Preview(format!("[\u{200b}]({photo}) {text}")),
                None => Delivery::Preview(text),
            };
        }
        match photo {
            Some(photo) if text.chars().count() <= CAPTION_LIMIT => Delivery::Photo {
                photo: photo.to_string(),
                caption: text,
            },
            _ => Delivery::Message(text),
        }
    }

    pub async fn send(self, chat: &dyn Chat) -> Result<()> {
        match self {
            Delivery::Preview(text) => return chat.edit(&text).await,
            Delivery::Photo { photo, caption } => chat.reply_photo(&photo, &caption).await?,
            Delivery::Message(text) => chat.reply(&text).await?,
        }
        chat.delete().await
    }
}

/// Terminal stand-in for a chat: replies go to stdout, errors to stderr, and a
/// spinner plays the part of the command message until it is deleted.
pub struct ConsoleChat {
    spinner: ProgressBar,
}

impl ConsoleChat {
    pub fn new(status: &str) -> Result<Self> {
        let spinner = ProgressBar::new_spinner().with_message(status.to_string());
        spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
        spinner.enable_steady_tick(Duration::from_millis(100));
        Ok(Self { spinner })
    }

    fn print(&self, text: &str) {
        self.spinner.suspend(|| println!("{text}"));
    }
}

#[async_trait]
impl Chat for ConsoleChat {
    async fn reply_photo(&self, photo: &str, caption: &str) -> Result<()> {
        self.print(&format!("[photo] {photo}\n{caption}"));
        Ok(())
    }

    async fn reply(&self, text: &str) -> Result<()> {
        self.print(text);
        Ok(())
    }

    async fn edit(&self, text: &str) -> Result<()> {
        self.spinner.finish_and_clear();
        println!("{text}");
        Ok(())
    }

    async fn err(&self, text: &str) -> Result<()> {
        self.spinner.finish_and_clear();
        eprintln!("ERROR: {text}");
        Ok(())
    }

    async fn delete(&self) -> Result<()> {
        self.spinner.finish_and_clear();
        Ok(())
    }
}

impl Drop for ConsoleChat {
    fn drop(&mut self) {
        self.spinner.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingChat, Sent};

    const COVER: &str = "https://img.example/cover.jpg";

    #[test]
    fn short_text_goes_out_as_a_caption() {
        let text = "a".repeat(CAPTION_LIMIT);
        assert_eq!(
            Delivery::choose(text.clone(), Some(COVER), false),
            Delivery::Photo {
                photo: COVER.into(),
                caption: text
            }
        );
    }

    #[test]
    fn long_text_goes_out_as_a_message() {
        let text = "a".repeat(CAPTION_LIMIT + 1);
        assert_eq!(
            Delivery::choose(text.clone(), Some(COVER), false),
            Delivery::Message(text)
        );
    }

    #[test]
    fn limit_counts_characters_not_bytes() {
        // 1000 three-byte characters are well over 1023 bytes.
        let text = "学".repeat(1000);
        assert!(matches!(
            Delivery::choose(text, Some(COVER), false),
            Delivery::Photo { .. }
        ));
    }

    #[test]
    fn no_image_means_a_plain_message() {
        assert_eq!(
            Delivery::choose("hi".into(), None, false),
            Delivery::Message("hi".into())
        );
    }

    #[test]
    fn preview_hides_the_image_link() {
        assert_eq!(
            Delivery::choose("body".into(), Some(COVER), true),
            Delivery::Preview(format!("[\u{200b}]({COVER}) body"))
        );
        assert_eq!(
            Delivery::choose("body".into(), None, true),
            Delivery::Preview("body".into())
        );
    }

    #[tokio::test]
    async fn replies_then_deletes_the_command() -> anyhow::Result<()> {
        let chat = RecordingChat::default();
        Delivery::choose("caption".into(), Some(COVER), false)
            .send(&chat)
            .await?;
        assert_eq!(
            chat.sent(),
            vec![
                Sent::Photo {
                    photo: COVER.into(),
                    caption: "caption".into()
                },
                Sent::Delete
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn preview_edits_without_deleting() -> anyhow::Result<()> {
        let chat = RecordingChat::default();
        Delivery::Preview("text".into()).send(&chat).await?;
        assert_eq!(chat.sent(), vec![Sent::Edit("text".into())]);
        Ok(())
    }
}
