//! Internet shortcut (`.url`) parsing and URL typing

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::ItemType;
use crate::error::Result;
use crate::metadata::read_text_lossy;

static URL_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^url\s*=\s*(.*)$").expect("valid regex"));
static BARE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://\S+$").expect("valid regex"));

const VIDEO_HOSTS: &[&str] = &["youtube.com", "youtu.be", "youtube-nocookie.com"];
const CODE_HOST: &str = "github.com";

/// Read a shortcut file and return its target URL, if it has one.
pub(crate) fn read_shortcut(path: &Path) -> Result<Option<String>> {
    Ok(read_text_lossy(path)?.and_then(|text| parse_shortcut(&text)))
}

/// Extract the target URL from shortcut text.
///
/// Blank lines and `[Section]` headers are skipped. A non-empty `url=` value
/// wins; failing that, the first line that is a bare http(s) URL is used.
///
/// ```
/// use fsmanifest::classify::parse_shortcut;
///
/// let text = "[InternetShortcut]\nURL=https://example.com/page\n";
/// assert_eq!(parse_shortcut(text).as_deref(), Some("https://example.com/page"));
/// assert_eq!(parse_shortcut("[InternetShortcut]\nIconIndex=0\n"), None);
/// ```
pub fn parse_shortcut(text: &str) -> Option<String> {
    let mut bare = None;
    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('[') {
            continue;
        }
        if let Some(caps) = URL_KEY.captures(line) {
            let value = caps[1].trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
            continue;
        }
        if bare.is_none() && BARE_URL.is_match(line) {
            bare = Some(line.to_string());
        }
    }
    bare
}

/// Lowercased host of an absolute URL, without user info or port.
///
/// ```
/// use fsmanifest::classify::url_host;
///
/// assert_eq!(url_host("https://user@WWW.Example.com:8080/a?b").as_deref(), Some("www.example.com"));
/// assert_eq!(url_host("not a url"), None);
/// ```
pub fn url_host(url: &str) -> Option<String> {
    let (_, rest) = url.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    let host = if let Some(v6) = host_port.strip_prefix('[') {
        v6.split(']').next().unwrap_or_default()
    } else {
        host_port.split(':').next().unwrap_or_default()
    };
    if host.is_empty() {
        None
    } else {
        Some(host.to_lowercase())
    }
}

/// Type a shortcut target by its host.
pub fn classify_url(url: &str) -> ItemType {
    let Some(host) = url_host(url) else {
        return ItemType::Html;
    };
    if host.contains(CODE_HOST) {
        ItemType::Github
    } else if VIDEO_HOSTS
        .iter()
        .any(|v| host == *v || host.ends_with(&format!(".{v}")))
    {
        ItemType::Youtube
    } else {
        ItemType::Html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_key_any_case() {
        let text = "[InternetShortcut]\nurl = https://github.com/acme/repo\nIDList=\n";
        assert_eq!(
            parse_shortcut(text).as_deref(),
            Some("https://github.com/acme/repo")
        );
    }

    #[test]
    fn test_url_key_beats_earlier_bare_line() {
        let text = "https://first.example.com\n[InternetShortcut]\nURL=https://second.example.com\n";
        assert_eq!(
            parse_shortcut(text).as_deref(),
            Some("https://second.example.com")
        );
    }

    #[test]
    fn test_empty_url_key_falls_back_to_bare_line() {
        let text = "[InternetShortcut]\nURL=\n\nhttps://youtu.be/dQw4w9WgXcQ\n";
        assert_eq!(
            parse_shortcut(text).as_deref(),
            Some("https://youtu.be/dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_no_usable_target() {
        assert_eq!(parse_shortcut(""), None);
        assert_eq!(parse_shortcut("[InternetShortcut]\nURL=\n"), None);
        assert_eq!(parse_shortcut("just some notes\nftp://old.example.com\n"), None);
    }

    #[test]
    fn test_section_lines_are_skipped() {
        assert_eq!(parse_shortcut("[https://not.a.target]\n"), None);
    }

    #[test]
    fn test_url_host() {
        assert_eq!(url_host("https://github.com/acme").as_deref(), Some("github.com"));
        assert_eq!(url_host("http://[::1]:3000/").as_deref(), Some("::1"));
        assert_eq!(url_host("https://example.com?q=1").as_deref(), Some("example.com"));
        assert_eq!(url_host("https:///path"), None);
    }

    #[test]
    fn test_classify_url() {
        assert_eq!(classify_url("https://github.com/acme/repo"), ItemType::Github);
        assert_eq!(classify_url("https://gist.github.com/x"), ItemType::Github);
        assert_eq!(
            classify_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            ItemType::Youtube
        );
        assert_eq!(classify_url("https://youtu.be/dQw4w9WgXcQ"), ItemType::Youtube);
        assert_eq!(classify_url("https://notyoutube.com/watch"), ItemType::Html);
        assert_eq!(classify_url("https://example.com/article"), ItemType::Html);
        assert_eq!(classify_url("example.com"), ItemType::Html);
    }
}
