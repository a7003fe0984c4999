//! Fail-closed guardrails around the scrape.
//!
//! [`validate_source_url`] runs before any network call;
//! [`ensure_content_matches`] runs after the scrape and is the primary
//! defense against importing the wrong item when the upstream scrape is
//! blocked or redirected to a generic page.

use reqwest::Url;

use crate::error::ScrapeError;

/// Validates that the input parses as an absolute http/https URL.
///
/// # Errors
///
/// Returns [`ScrapeError::InvalidUrl`] on a relative URL, a non-URL string,
/// or any scheme other than `http`/`https`.
pub fn validate_source_url(url: &str) -> Result<Url, ScrapeError> {
    let parsed = Url::parse(url).map_err(|e| ScrapeError::InvalidUrl {
        url: url.to_owned(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(ScrapeError::InvalidUrl {
            url: url.to_owned(),
            reason: format!("unsupported scheme \"{other}\""),
        }),
    }
}

/// Extracts the source-specific numeric item id from a catalog URL, if any.
///
/// Catalog item pages embed a numeric id in the path
/// (e.g. `/boardgame/266192/wingspan`); the first all-digit path segment is
/// taken as the id. URLs without one return `None` and skip the content
/// check.
#[must_use]
pub fn extract_item_id(url: &Url) -> Option<String> {
    url.path_segments()?
        .find(|segment| !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()))
        .map(str::to_owned)
}

/// Requires the scraped markdown to actually pertain to the requested item.
///
/// When the URL carries an item id, the markdown must contain either that id
/// or the literal URL. Absence fails closed with
/// [`ScrapeError::ContentMismatch`] rather than importing whatever page the
/// scrape actually returned. URLs without a derivable id skip the check
/// (best-effort only).
///
/// # Errors
///
/// Returns [`ScrapeError::ContentMismatch`] when the id is present in the
/// URL but absent from the markdown.
pub fn ensure_content_matches(url: &Url, markdown: &str) -> Result<(), ScrapeError> {
    let Some(item_id) = extract_item_id(url) else {
        tracing::debug!(url = %url, "no item id in URL, skipping content match check");
        return Ok(());
    };

    if markdown.contains(&item_id) || markdown.contains(url.as_str()) {
        return Ok(());
    }

    tracing::warn!(url = %url, item_id = %item_id, "scraped content does not match requested item");
    Err(ScrapeError::ContentMismatch {
        url: url.to_string(),
        item_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_http_and_https() {
        assert!(validate_source_url("https://boardgamegeek.com/boardgame/266192/wingspan").is_ok());
        assert!(validate_source_url("http://example.com/item/1").is_ok());
    }

    #[test]
    fn validate_rejects_relative_and_non_http() {
        assert!(matches!(
            validate_source_url("/boardgame/266192/wingspan"),
            Err(ScrapeError::InvalidUrl { .. })
        ));
        assert!(matches!(
            validate_source_url("ftp://example.com/item/1"),
            Err(ScrapeError::InvalidUrl { .. })
        ));
        assert!(matches!(
            validate_source_url("not a url"),
            Err(ScrapeError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn extract_item_id_finds_first_numeric_segment() {
        let url = Url::parse("https://boardgamegeek.com/boardgame/266192/wingspan").unwrap();
        assert_eq!(extract_item_id(&url), Some("266192".to_string()));
    }

    #[test]
    fn extract_item_id_none_without_numeric_segment() {
        let url = Url::parse("https://example.com/games/wingspan").unwrap();
        assert_eq!(extract_item_id(&url), None);
    }

    #[test]
    fn content_match_passes_when_id_present() {
        let url = Url::parse("https://source.example/item/42/foo").unwrap();
        assert!(ensure_content_matches(&url, "Catalog entry #42: Foo").is_ok());
    }

    #[test]
    fn content_match_passes_when_literal_url_present() {
        let url = Url::parse("https://source.example/item/42/foo").unwrap();
        let markdown = "See https://source.example/item/42/foo for details";
        assert!(ensure_content_matches(&url, markdown).is_ok());
    }

    #[test]
    fn content_match_fails_closed_when_id_absent() {
        let url = Url::parse("https://source.example/item/42/foo").unwrap();
        let result = ensure_content_matches(&url, "Trending games this week");
        assert!(matches!(
            result,
            Err(ScrapeError::ContentMismatch { ref item_id, .. }) if item_id == "42"
        ));
    }

    #[test]
    fn content_match_skipped_without_item_id() {
        let url = Url::parse("https://example.com/games/wingspan").unwrap();
        assert!(ensure_content_matches(&url, "totally unrelated").is_ok());
    }
}
