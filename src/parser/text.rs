use std::sync::LazyLock;

use regex::Regex;
use url::Url;

static HTML_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static ESCAPED_QUOTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\'").unwrap());
static SPEAKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(\w+: (.*)\)").unwrap());

/// Turn a correct-response string into plain text: strip markup tags, then
/// replace backslash-escaped quotes with a plain apostrophe.
pub fn normalize_response(raw: &str) -> String {
    let stripped = HTML_TAG_RE.replace_all(raw, "");
    ESCAPED_QUOTE_RE.replace_all(&stripped, "'").into_owned()
}

/// Rewrite a category note of the form `(Speaker: rest)` to just `rest`.
/// Notes that don't match the pattern pass through verbatim.
pub fn strip_speaker(note: &str) -> String {
    SPEAKER_RE.replace(note, "$1").into_owned()
}

/// Validate and canonicalize an embedded image URL. Only absolute http/https
/// URLs are accepted; everything else comes back as an error message.
pub fn sanitize_url(raw: &str) -> Result<String, String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url.to_string()),
        scheme => Err(format!("invalid protocol {}:", scheme)),
    }
}

// ── Tests ──
