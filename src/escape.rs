//! String helpers shared by the renderers: HTML escaping, display-URL
//! normalisation and `encodeURIComponent`-compatible path encoding.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left as-is by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Escape a value for HTML text or a double-quoted attribute.
///
/// Absent and empty input both escape to `""`. `&` is replaced first so the
/// entities produced by the later substitutions are left intact.
pub fn escape_html<'a>(value: impl Into<Option<&'a str>>) -> String {
    let Some(s) = value.into() else {
        return String::new();
    };
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Strip a leading `http://`/`https://` and one trailing slash for display.
///
/// The result is not escaped.
pub fn normalize_url<'a>(value: impl Into<Option<&'a str>>) -> String {
    let Some(url) = value.into() else {
        return String::new();
    };
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    rest.strip_suffix('/').unwrap_or(rest).to_string()
}

/// Percent-encode a path segment the way `encodeURIComponent` does.
pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}
