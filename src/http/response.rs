//! Classification of raw transport outcomes into success or [`HttpError`].

use crate::error::{HttpError, TransportError};
use crate::http::transport::RawResponse;
use serde::Deserialize;
use std::collections::HashMap;

/// Raw response body bytes.
pub type ResponseBody = Vec<u8>;

/// A successful (status 200..=399) response with a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub headers: HashMap<String, String>,
    pub body: ResponseBody,
}

/// Error envelope returned by the exchange API on failure.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorResponse {
    /// The first non-empty of `error` and `message`.
    fn into_message(self) -> Option<String> {
        self.error
            .filter(|m| !m.is_empty())
            .or_else(|| self.message.filter(|m| !m.is_empty()))
    }
}

/// Elements whose content is never rendered as page text.
const HIDDEN_ELEMENTS: [&str; 4] = ["head", "script", "style", "title"];

/// Map one transport outcome onto the gateway's result space.
pub fn classify(outcome: Result<RawResponse, TransportError>) -> Result<HttpResponse, HttpError> {
    let raw = outcome.map_err(HttpError::from)?;

    match raw.status {
        200..=399 => match raw.body {
            Some(body) => Ok(HttpResponse {
                headers: raw.headers,
                body,
            }),
            None => Err(HttpError::MissingResponseBody),
        },
        400..=499 => Err(HttpError::Client {
            status: raw.status,
            message: error_message(raw.body.as_deref()),
        }),
        500..=599 => Err(HttpError::Server {
            status: raw.status,
            message: error_message(raw.body.as_deref()),
        }),
        status => Err(HttpError::Other { status }),
    }
}

/// Human-readable message from an error body: the API's `error`/`message`
/// field when the body is JSON, otherwise the body rendered as plain text.
///
/// Proxies answer with HTML pages; only their visible text is kept, with
/// whitespace collapsed.
pub fn error_message(body: Option<&[u8]>) -> Option<String> {
    let body = body?;
    if let Ok(parsed) = serde_json::from_slice::<ErrorResponse>(body) {
        if let Some(message) = parsed.into_message() {
            return Some(message);
        }
    }
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    let text = if looks_like_markup(text) {
        html_to_text(text)
    } else {
        text.to_string()
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn looks_like_markup(text: &str) -> bool {
    text.starts_with('<') && text.contains('>')
}

/// Visible text of an HTML document: tags and comments dropped, hidden
/// elements skipped, common entities decoded, whitespace collapsed.
fn html_to_text(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        if let Some(comment) = after_open.strip_prefix("!--") {
            rest = comment.find("-->").map_or("", |end| &comment[end + 3..]);
            text.push(' ');
            continue;
        }

        let Some(close) = after_open.find('>') else {
            // Unterminated tag: keep the remainder verbatim.
            text.push_str(&rest[open..]);
            rest = "";
            break;
        };
        let tag = &after_open[..close];
        rest = &after_open[close + 1..];

        let name = tag_name(tag);
        let opening = !tag.starts_with('/') && !tag.ends_with('/');
        if opening && HIDDEN_ELEMENTS.contains(&name.as_str()) {
            rest = skip_element(rest, &name);
        }
        text.push(' ');
    }
    text.push_str(rest);

    decode_entities(&text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn tag_name(tag: &str) -> String {
    tag.trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Everything after the closing tag of `name`, or nothing if it never closes.
fn skip_element<'a>(rest: &'a str, name: &str) -> &'a str {
    // ASCII lowercasing keeps byte offsets aligned with `rest`.
    let lowered = rest.to_ascii_lowercase();
    let Some(start) = lowered.find(&format!("</{name}")) else {
        return "";
    };
    match rest[start..].find('>') {
        Some(end) => &rest[start + end + 1..],
        None => "",
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
