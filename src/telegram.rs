//! Minimal Telegram Bot API client: long-polled updates in, text and
//! document messages out. Only the handful of fields this bot reads are
//! modeled; everything else in the payload is ignored.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::chart::ChartImage;
use crate::dispatch::{Channel, Inbound};
use crate::errors::Error;
use crate::menu::Keyboard;

/// How long the server may hold a getUpdates call before answering.
pub const POLL_TIMEOUT_SECS: u64 = 30;

/// Bot API code for a second poller on the same token.
const CONFLICT_CODE: i64 = 409;

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

impl Update {
    /// Extract a dispatchable press. `None` for anything without text or a
    /// sender: stickers, photos, channel posts, edits.
    pub fn inbound(&self) -> Option<Inbound> {
        let message = self.message.as_ref()?;
        let from = message.from.as_ref()?;
        let text = message.text.as_ref()?;
        Some(Inbound {
            chat_id: message.chat.id,
            user_id: from.id,
            username: from.username.clone(),
            first_name: from.first_name.clone(),
            text: text.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub chat: Chat,
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: String,
}

/// Standard Bot API response wrapper. Missing `Option` fields decode as
/// `None` without a `default` attribute; one on `result` would put a
/// `T: Default` bound on the derived impl.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
    error_code: Option<i64>,
}

#[derive(Debug, Serialize)]
struct GetUpdatesBody {
    offset: i64,
    timeout: u64,
    allowed_updates: &'static [&'static str],
}

#[derive(Debug, Serialize)]
struct SendMessageBody<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<ReplyMarkup>,
}

#[derive(Debug, Serialize)]
struct ReplyMarkup {
    keyboard: Vec<Vec<KeyboardButton>>,
    resize_keyboard: bool,
}

#[derive(Debug, Serialize)]
struct KeyboardButton {
    text: &'static str,
}

fn markup(keyboard: Keyboard) -> ReplyMarkup {
    ReplyMarkup {
        keyboard: keyboard
            .rows
            .iter()
            .map(|row| row.iter().map(|&text| KeyboardButton { text }).collect())
            .collect(),
        resize_keyboard: true,
    }
}

#[derive(Clone)]
pub struct TelegramApi {
    http: reqwest::Client,
    base_url: String,
}

impl TelegramApi {
    pub fn new(token: &str, api_base: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(POLL_TIMEOUT_SECS + 10))
            .build()?;
        Ok(Self {
            http,
            base_url: format!("{}/bot{token}", api_base.trim_end_matches('/')),
        })
    }

    fn url(&self, method: &str) -> String {
        format!("{}/{method}", self.base_url)
    }

    /// Long-poll for updates with ids at or above `offset`.
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, Error> {
        let response = self
            .http
            .post(self.url("getUpdates"))
            .json(&GetUpdatesBody {
                offset,
                timeout: POLL_TIMEOUT_SECS,
                allowed_updates: &["message"],
            })
            .send()
            .await?;
        decode(response).await
    }

    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<(), Error> {
        let response = self
            .http
            .post(self.url("sendMessage"))
            .json(&SendMessageBody {
                chat_id,
                text,
                reply_markup: keyboard.map(markup),
            })
            .send()
            .await?;
        decode::<serde_json::Value>(response).await.map(|_| ())
    }

    pub async fn send_document(
        &self,
        chat_id: i64,
        document: &ChartImage,
        caption: &str,
    ) -> Result<(), Error> {
        let part = Part::bytes(document.bytes.clone())
            .file_name(document.filename)
            .mime_str(document.mime)?;
        let form = Form::new()
            .text("chat_id", chat_id.to_string())
            .text("caption", caption.to_string())
            .part("document", part);

        let response = self
            .http
            .post(self.url("sendDocument"))
            .multipart(form)
            .send()
            .await?;
        decode::<serde_json::Value>(response).await.map(|_| ())
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, Error> {
    let envelope: Envelope<T> = response.json().await?;
    if !envelope.ok {
        let code = envelope.error_code.unwrap_or(0);
        if code == CONFLICT_CODE {
            return Err(Error::Conflict);
        }
        return Err(Error::Telegram {
            code,
            description: envelope.description.unwrap_or_default(),
        });
    }
    envelope.result.ok_or_else(|| Error::Telegram {
        code: 0,
        description: "ok response without result".into(),
    })
}

#[async_trait]
impl Channel for TelegramApi {
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<(), Error> {
        self.send_message(chat_id, text, keyboard).await
    }

    async fn send_chart(
        &self,
        chat_id: i64,
        chart: &ChartImage,
        caption: &str,
    ) -> Result<(), Error> {
        self.send_document(chat_id, chart, caption).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Same bound as `decode`: the envelope must deserialize for any payload
    // type that itself deserializes, with no extra requirements on T.
    fn parse<T: DeserializeOwned>(raw: &str) -> Envelope<T> {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn envelope_with_a_result_parses() {
        let envelope: Envelope<Vec<Update>> =
            parse(r#"{"ok":true,"result":[{"update_id":5}]}"#);
        assert!(envelope.ok);
        let updates = envelope.result.unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].update_id, 5);
    }

    #[test]
    fn error_envelope_without_a_result_parses() {
        let envelope: Envelope<Vec<Update>> =
            parse(r#"{"ok":false,"error_code":409,"description":"Conflict"}"#);
        assert!(!envelope.ok);
        assert!(envelope.result.is_none());
        assert_eq!(envelope.error_code, Some(409));
        assert_eq!(envelope.description.as_deref(), Some("Conflict"));
    }
}
