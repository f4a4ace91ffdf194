use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use thiserror::Error;
use tokio::sync::OnceCell;

pub mod nodes;

pub const TELEGRAPH_API: &str = "https://api.telegra.ph";

/// Telegraph rejects titles longer than this.
const TITLE_LIMIT: usize = 256;
const SHORT_NAME: &str = "anilist-info";

#[derive(Debug, Error)]
pub enum TelegraphError {
    #[error("Telegraph refused {method}: {message}")]
    Api {
        method: &'static str,
        message: String,
    },
    #[error("Telegraph answered {0} without a result")]
    Empty(&'static str),
    #[error("request to Telegraph failed")]
    Http(#[from] reqwest::Error),
}

/// Somewhere long-form HTML can be published under a shareable URL.
#[async_trait]
pub trait PagePublisher: Send + Sync {
    async fn publish(&self, title: &str, html: &str) -> Result<String, TelegraphError>;
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    ok: bool,
    result: Option<T>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Account {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct Page {
    url: String,
}

pub struct TelegraphClient {
    http: Client,
    api_url: String,
    token: OnceCell<String>,
}

impl TelegraphClient {
    /// A client for `api_url`. Without `access_token` an anonymous account is
    /// created the first time a page is published.
    pub fn new(api_url: impl Into<String>, access_token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: OnceCell::new_with(access_token),
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &'static str,
        body: &Value,
    ) -> Result<T, TelegraphError> {
        let envelope: Envelope<T> = self
            .http
            .post(format!("{}/{method}", self.api_url))
            .json(body)
            .send()
            .await?
            .json()
            .await?;

        if !envelope.ok {
            return Err(TelegraphError::Api {
                method,
                message: envelope.error.unwrap_or_else(|| "unknown error".into()),
            });
        }
        envelope.result.ok_or(TelegraphError::Empty(method))
    }

    async fn token(&self) -> Result<&str, TelegraphError> {
        let token = self
            .token
            .get_or_try_init(|| async {
                tracing::info!("creating a Telegraph account");
                let account: Account = self
                    .call("createAccount", &json!({"short_name": SHORT_NAME}))
                    .await?;
                Ok::<_, TelegraphError>(account.access_token)
            })
            .await?;
        Ok(token.as_str())
    }
}

#[async_trait]
impl PagePublisher for TelegraphClient {
    async fn publish(&self, title: &str, html: &str) -> Result<String, TelegraphError> {
        let token = self.token().await?;
        let title: String = match title.trim() {
            "" => SHORT_NAME.to_string(),
            title => title.chars().take(TITLE_LIMIT).collect(),
        };
        let content = nodes::html_to_nodes(html);

        let page: Page = self
            .call(
                "createPage",
                &json!({
                    "access_token": token,
                    "title": title,
                    "author_name": SHORT_NAME,
                    "content": content,
                    "return_content": false,
                }),
            )
            .await?;
        tracing::debug!(url = %page.url, "published page");
        Ok(page.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn creates_an_account_once_then_publishes() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/createAccount"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": {"short_name": SHORT_NAME, "access_token": "tok123"}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/createPage"))
            .and(body_partial_json(json!({
                "access_token": "tok123",
                "title": "The Asterisk War",
                "content": [{"tag": "h3", "children": ["Synopsis"]}, "text"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": {"path": "The-Asterisk-War-10-17", "url": "https://telegra.ph/The-Asterisk-War-10-17"}
            })))
            .expect(2)
            .mount(&server)
            .await;

        let client = TelegraphClient::new(server.uri(), None);
        for _ in 0..2 {
            let url = client
                .publish("The Asterisk War", "<h1>Synopsis</h1>text")
                .await?;
            assert_eq!(url, "https://telegra.ph/The-Asterisk-War-10-17");
        }
        Ok(())
    }

    #[tokio::test]
    async fn configured_token_skips_account_creation() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/createPage"))
            .and(body_partial_json(json!({"access_token": "mine"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": {"url": "https://telegra.ph/x"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = TelegraphClient::new(format!("{}/", server.uri()), Some("mine".into()));
        assert_eq!(client.publish("x", "x").await?, "https://telegra.ph/x");
        Ok(())
    }

    #[tokio::test]
    async fn refusals_are_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/createPage"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"ok": false, "error": "CONTENT_TOO_BIG"})),
            )
            .mount(&server)
            .await;

        let client = TelegraphClient::new(server.uri(), Some("tok".into()));
        match client.publish("t", "x").await {
            Err(TelegraphError::Api { method, message }) => {
                assert_eq!(method, "createPage");
                assert_eq!(message, "CONTENT_TOO_BIG");
            }
            other => panic!("expected a refusal, got {other:?}"),
        }
    }
}
