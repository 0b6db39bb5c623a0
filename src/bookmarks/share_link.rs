use crate::bookmarks::{
    region::{JsNumber, RegionRecord},
    session::SessionSnapshot,
};
use crate::utils::{crypto, url_safe_b64::from_url_safe_b64, Result};
use crossbeam_channel::{bounded, select, Receiver, Sender};
use serde::Deserialize;
use serde_json::Value;
use std::{thread, time::Duration};

pub const DEFAULT_SHARE_URL: &str = "https://share.jbrowse.org/api/v1/";

const SESSION_MARKER: &str = "&session";
const PASSWORD_MARKER: &str = "&password";
const PASSWORD_PARAM: &str = "&password=";
const SHARE_PREFIX: &str = "share-";

/// Session id and password embedded in a share link such as
/// `https://host/?config=...&session=share-abc123&password=xyz`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareLink {
    pub session_id: String,
    pub password: String,
}

/// Text between the first and second occurrence of `marker`, like
/// `text.split(marker)[1]` in JavaScript.
fn second_segment<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    text.split(marker).nth(1)
}

impl ShareLink {
    pub fn parse(link: &str) -> Result<Self> {
        let invalid = |what: &str| format!("Invalid share link: missing {}", what);

        let descriptor = second_segment(link, SESSION_MARKER)
            .ok_or_else(|| invalid("session"))?
            .split(PASSWORD_MARKER)
            .next()
            .unwrap_or_default();
        let password = second_segment(link, PASSWORD_PARAM).ok_or_else(|| invalid("password"))?;
        let session_id =
            second_segment(descriptor, SHARE_PREFIX).ok_or_else(|| invalid("share- session id"))?;

        Ok(Self {
            session_id: session_id.to_string(),
            password: password.to_string(),
        })
    }
}

/// Lets a caller cancel an in-flight share-link request.
///
/// Calling [`AbortController::abort`] or dropping the controller releases every
/// [`AbortSignal`] it handed out.
pub struct AbortController {
    sender: Option<Sender<()>>,
    receiver: Receiver<()>,
}

#[derive(Clone)]
pub struct AbortSignal {
    receiver: Receiver<()>,
}

impl Default for AbortController {
    fn default() -> Self {
        Self::new()
    }
}

impl AbortController {
    pub fn new() -> Self {
        let (sender, receiver) = bounded(0);
        Self {
            sender: Some(sender),
            receiver,
        }
    }

    pub fn signal(&self) -> AbortSignal {
        AbortSignal {
            receiver: self.receiver.clone(),
        }
    }

    pub fn abort(&mut self) {
        self.sender.take();
    }
}

#[derive(Deserialize)]
struct StoredSession {
    session: String,
}

/// Best-effort human readable message from an error response body.
///
/// Mirrors `String(JSON.parse(body).message)`: the raw body is only used when
/// the body is not JSON or is JSON `null`, and a JSON body without a message
/// yields an empty string.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Null) | Err(_) => body.to_string(),
        Ok(Value::Object(obj)) => obj.get("message").map(js_string).unwrap_or_default(),
        Ok(_) => String::new(),
    }
}

/// JavaScript `String(value)` for a JSON value.
fn js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number
            .as_f64()
            .map(|n| JsNumber(n).to_string())
            .unwrap_or_else(|| number.to_string()),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                item => js_string(item),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Fetches, decrypts and decodes sessions saved on a share service.
pub struct ShareLinkResolver {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl ShareLinkResolver {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::build(base_url, None)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        Self::build(base_url, Some(timeout))
    }

    fn build(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| format!("Could not create HTTP client: {}", e))?;
        Ok(Self {
            base_url: base_url.to_string(),
            client,
        })
    }

    /// Bookmarks stored in the `GridBookmark` widget of the linked session.
    pub fn resolve(&self, link: &str, signal: Option<&AbortSignal>) -> Result<Vec<RegionRecord>> {
        let share_link = ShareLink::parse(link)?;
        let mut session =
            self.read_session(&share_link.session_id, &share_link.password, signal)?;
        let store = session
            .widgets
            .take_bookmarks()
            .ok_or_else(|| "Shared session does not contain a GridBookmark widget".to_string())?;
        log::info!(
            "Shared session {} holds {} bookmarks",
            share_link.session_id,
            store.len()
        );
        Ok(store.into_regions())
    }

    pub fn read_session(
        &self,
        session_id: &str,
        password: &str,
        signal: Option<&AbortSignal>,
    ) -> Result<SessionSnapshot> {
        let url = format!("{}load", self.base_url);
        log::debug!("Loading shared session {} from {}", session_id, url);

        let (ok, body) = match signal {
            Some(signal) => self.fetch_abortable(&url, session_id, signal)?,
            None => fetch(&self.client, &url, session_id)?,
        };
        if !ok {
            return Err(error_message(&body));
        }

        let stored: StoredSession = serde_json::from_str(&body)
            .map_err(|e| format!("Could not decode shared session: {}", e))?;
        let decrypted = crypto::decrypt(&stored.session, password)?;
        let json = from_url_safe_b64(&decrypted)?;
        SessionSnapshot::from_json(&json)
    }

    fn fetch_abortable(
        &self,
        url: &str,
        session_id: &str,
        signal: &AbortSignal,
    ) -> Result<(bool, String)> {
        let (tx, rx) = bounded(1);
        let client = self.client.clone();
        let url = url.to_string();
        let session_id = session_id.to_string();
        thread::spawn(move || {
            // the receiver is gone if the request was aborted
            let _ = tx.send(fetch(&client, &url, &session_id));
        });

        select! {
            recv(rx) -> response => response.map_err(|e| e.to_string())?,
            recv(signal.receiver) -> _ => {
                log::debug!("Shared session request aborted");
                Err("Request aborted".to_string())
            }
        }
    }
}

fn fetch(client: &reqwest::blocking::Client, url: &str, session_id: &str) -> Result<(bool, String)> {
    let response = client
        .get(url)
        .query(&[("sessionId", session_id)])
        .send()
        .map_err(|e| format!("Could not fetch shared session: {}", e))?;
    let ok = response.status().is_success();
    let body = response
        .text()
        .map_err(|e| format!("Could not fetch shared session: {}", e))?;
    Ok((ok, body))
}
