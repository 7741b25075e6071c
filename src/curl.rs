//! Command translator: one collection request to one cURL invocation

use crate::constants::{DEFAULT_PROTOCOL, FILE_PLACEHOLDER_DIR};
use crate::error::SkipReason;
use crate::models::{value_kind, BodySpec, FormFieldKind, RequestSpec, StructuredUrl, UrlSpec};

/// Separator between arguments: a line continuation
const CONTINUATION: &str = " \\\n";

/// Format request as cURL command
///
/// Every argument after the URL goes on its own continued line. Only the
/// URL shape can make this fail.
pub fn to_curl(request: &RequestSpec) -> Result<String, SkipReason> {
    let url = resolve_url(&request.url)?;

    let mut parts = vec![format!(
        "curl --location --request {} {}",
        shell_word(&request.method()),
        quote(&url)
    )];

    // Headers
    for (key, value) in request.headers.iter().filter_map(|h| h.active()) {
        parts.push(format!("--header {}", quote(&format!("{}: {}", key, value))));
    }

    // Body
    match &request.body {
        BodySpec::Raw(raw) => {
            if !raw.is_empty() {
                parts.push(format!("--data-raw {}", quote(raw)));
            }
        }
        BodySpec::FormData(fields) => {
            for field in fields {
                let Some((key, value)) = field.active() else {
                    continue;
                };
                let part = match field.kind() {
                    // The source file is not part of the export; the operator fills in the path
                    FormFieldKind::File => {
                        format!("{}=@\"{}{}\"", key, FILE_PLACEHOLDER_DIR, value)
                    }
                    FormFieldKind::Text => format!("{}={}", key, value),
                };
                parts.push(format!("--form {}", quote(&part)));
            }
        }
        BodySpec::UrlEncoded(fields) => {
            for (key, value) in fields.iter().filter_map(|f| f.active()) {
                parts.push(format!("--data-urlencode {}", quote(&format!("{}={}", key, value))));
            }
        }
        BodySpec::None => {}
    }

    Ok(parts.join(CONTINUATION))
}

/// Resolve any URL shape to the literal URL string
pub fn resolve_url(url: &UrlSpec) -> Result<String, SkipReason> {
    match url {
        UrlSpec::Raw(raw) => Ok(raw.clone()),
        UrlSpec::Structured(parts) => Ok(compose_url(parts)),
        UrlSpec::Unsupported(value) => Err(SkipReason::UnsupportedUrl(format!(
            "expected a string or an object, got {}",
            value_kind(value)
        ))),
    }
}

/// Rebuild a URL from its parts. The `raw` field is only consulted when
/// both host and path are empty.
fn compose_url(parts: &StructuredUrl) -> String {
    let protocol = parts.protocol.as_deref().unwrap_or(DEFAULT_PROTOCOL);
    let host = parts.host.as_ref().map(|h| h.join(".")).unwrap_or_default();
    let mut path = parts.path.as_ref().map(|p| p.join("/")).unwrap_or_default();

    if host.is_empty() && path.is_empty() {
        if let Some(raw) = parts.raw.as_deref().filter(|r| !r.is_empty()) {
            return raw.to_string();
        }
    }

    if !host.is_empty() && !path.is_empty() && !path.starts_with('/') {
        path.insert(0, '/');
    }

    let query: Vec<String> = parts
        .query
        .iter()
        .filter_map(|q| q.active())
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();
    let query = if query.is_empty() {
        String::new()
    } else {
        format!("?{}", query.join("&"))
    };

    format!("{}://{}{}{}", protocol, host, path, query)
}

/// Escape single quotes so the text can sit inside a single-quoted word
pub fn shell_escape(s: &str) -> String {
    s.replace('\'', "'\\''")
}

/// Wrap in single quotes, escaping as needed
fn quote(s: &str) -> String {
    format!("'{}'", shell_escape(s))
}

/// Leave plain tokens like `GET` bare, quote anything else
fn shell_word(s: &str) -> String {
    if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        s.to_string()
    } else {
        quote(s)
    }
}
