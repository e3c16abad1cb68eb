// SPDX-License-Identifier: MPL-2.0
//! URL building helpers for the file manager's routes.
//!
//! The server is mounted under a configurable root prefix (`/`, `/flfm/`, ...)
//! and routes are written with a leading slash, so naive concatenation easily
//! produces `//` or a doubled prefix. Everything here joins those parts into a
//! single well-formed URL.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::HashMap;

/// Characters escaped in query values. Path separators are kept readable.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Joins an optional origin, a root prefix and a URI.
///
/// If `uri` already begins with `root`, the root is collapsed rather than
/// prefixed twice. Adjacent slashes at the joins are merged.
///
/// ```
/// use flfm_viewer::routing::make_url;
///
/// assert_eq!(make_url(None, "/flfm/", "/shell"), "/flfm/shell");
/// assert_eq!(make_url(None, "/", "/flfm/shell"), "/flfm/shell");
/// assert_eq!(make_url(Some("http://h"), "/flfm/", "/flfm/serve"), "http://h/flfm/serve");
/// ```
pub fn make_url(base: Option<&str>, root: &str, uri: &str) -> String {
    let path = if starts_with_root(uri, root) {
        uri.to_string()
    } else {
        join_slash(root, uri)
    };

    match base.filter(|b| !b.is_empty()) {
        Some(base) => join_slash(base, &path),
        None => path,
    }
}

fn starts_with_root(uri: &str, root: &str) -> bool {
    let trimmed = root.trim_end_matches('/');
    if trimmed.is_empty() {
        return uri.starts_with('/');
    }
    match uri.strip_prefix(trimmed) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn join_slash(left: &str, right: &str) -> String {
    match (left.ends_with('/'), right.starts_with('/')) {
        (true, true) => format!("{}{}", left, &right[1..]),
        _ => format!("{}{}", left, right),
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// Appends the download query for the serving route: `?f=<file>&dl=1`.
///
/// `dl=1` makes the server send the bytes instead of redirecting to the viewer.
pub fn serve_params(serve_url: &str, file: &str) -> String {
    format!("{}?f={}&dl=1", serve_url, encode(file))
}

/// Appends the viewer query: `?f=<file>&mt=<mimetype>`.
pub fn viewer_params(viewer_url: &str, file: &str, mimetype: &str) -> String {
    format!("{}?f={}&mt={}", viewer_url, encode(file), encode(mimetype))
}

/// Parses the query string of `url` into a map of decoded values.
///
/// Later duplicates win. Keys without `=` map to an empty string.
pub fn query_vars(url: &str) -> HashMap<String, String> {
    let Some((_, query)) = url.split_once('?') else {
        return HashMap::new();
    };
    let query = query.split('#').next().unwrap_or_default();

    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key), decode(value))
        })
        .collect()
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Absolute serving and viewer URLs for one server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    serve_url: String,
    viewer_url: String,
}

impl Endpoints {
    pub fn new(serve_url: impl Into<String>, viewer_url: impl Into<String>) -> Self {
        Self {
            serve_url: serve_url.into(),
            viewer_url: viewer_url.into(),
        }
    }

    pub fn serve_url(&self) -> &str {
        &self.serve_url
    }

    pub fn viewer_url(&self) -> &str {
        &self.viewer_url
    }

    /// Download URL of `file`.
    #[must_use]
    pub fn serve(&self, file: &str) -> String {
        serve_params(&self.serve_url, file)
    }

    /// Viewer page URL of `file`.
    #[must_use]
    pub fn viewer(&self, file: &str, mimetype: &str) -> String {
        viewer_params(&self.viewer_url, file, mimetype)
    }
}

/// Parent directory of a `/`-separated identifier.
///
/// Follows the server's path handling: `a.jpg` has the empty directory,
/// `/a.jpg` lives in `/` and a trailing slash names the directory itself.
pub fn dirname(file: &str) -> &str {
    let head = file.rfind('/').map_or("", |end| &file[..=end]);
    if head.bytes().all(|b| b == b'/') {
        head
    } else {
        head.trim_end_matches('/')
    }
}

/// Length of the `&name;` entity at the start of `s`, if there is one.
fn entity_len(s: &str) -> Option<usize> {
    let name = s.strip_prefix('&')?;
    let end = name.find(';')?;
    let is_word = name[..end]
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_');
    (end > 0 && is_word).then_some(end + 2)
}

/// Cleans a URL that was rendered into an HTML template.
///
/// Templates escape `&` as `&amp;`; the first such entity is turned back into
/// a bare `&` and surrounding whitespace is dropped.
pub fn clean_template_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let entity = trimmed
        .match_indices('&')
        .find_map(|(start, _)| entity_len(&trimmed[start..]).map(|len| (start, len)));

    match entity {
        Some((start, len)) => format!("{}&{}", &trimmed[..start], &trimmed[start + len..]),
        None => trimmed.to_string(),
    }
}
