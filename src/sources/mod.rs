//! Source client and shared HTTP utilities for the openFDA API.

use std::borrow::Cow;
use std::sync::OnceLock;
use std::time::Duration;

use crate::error::{DrugLabelError, RequestFailure};

pub mod openfda;

const ERROR_BODY_MAX_BYTES: usize = 2048;
pub(crate) const DEFAULT_MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

static HTTP_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Base URL from `env_var`, or `default` when unset or blank.
pub(crate) fn env_base(default: &'static str, env_var: &str) -> Cow<'static, str> {
    resolve_base(std::env::var(env_var).ok(), default)
}

fn resolve_base(configured: Option<String>, default: &'static str) -> Cow<'static, str> {
    match configured.as_deref().map(str::trim) {
        Some(base) if !base.is_empty() => Cow::Owned(base.to_string()),
        _ => Cow::Borrowed(default),
    }
}

/// Returns the process-wide HTTP client.
///
/// No retry or cache middleware: a failed request surfaces to the caller as-is.
pub(crate) fn shared_client() -> Result<reqwest::Client, DrugLabelError> {
    if let Some(client) = HTTP_CLIENT.get() {
        return Ok(client.clone());
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(concat!("openfda-drug-label/", env!("CARGO_PKG_VERSION")))
        .build()?;

    // A racing initializer may win; either client is equivalent.
    Ok(HTTP_CLIENT.get_or_init(|| client).clone())
}

/// Single-line excerpt of an error body: whitespace runs become one space and
/// the text is cut at `ERROR_BODY_MAX_BYTES`.
pub(crate) fn body_excerpt(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let cut = text
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|end| *end <= ERROR_BODY_MAX_BYTES)
        .last()
        .unwrap_or(0);

    let mut excerpt = text[..cut].split_whitespace().collect::<Vec<_>>().join(" ");
    if cut < text.len() {
        excerpt.push_str(" …");
    }
    excerpt
}

/// Reads the whole body, failing once it grows past `DEFAULT_MAX_BODY_BYTES`.
pub(crate) async fn read_limited_body(
    mut resp: reqwest::Response,
) -> Result<Vec<u8>, DrugLabelError> {
    let too_large = || RequestFailure::BodyTooLarge {
        limit: DEFAULT_MAX_BODY_BYTES,
    };
    if resp
        .content_length()
        .is_some_and(|len| len > DEFAULT_MAX_BODY_BYTES as u64)
    {
        return Err(too_large().into());
    }

    let mut body: Vec<u8> = Vec::new();
    while let Some(chunk) = resp.chunk().await? {
        if body.len() + chunk.len() > DEFAULT_MAX_BODY_BYTES {
            return Err(too_large().into());
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}
