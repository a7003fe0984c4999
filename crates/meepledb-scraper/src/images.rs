//! Image candidate extraction from raw page markup.
//!
//! Candidates are restricted to the source's trusted image CDN and ranked by
//! a filename-pattern quality heuristic. Validation is purely structural:
//! the origin CDN rejects server-side fetches that succeed in a browser, so
//! no bytes are ever fetched here.

use regex::Regex;

/// Quality tier derived from URL-pattern heuristics.
///
/// Ordering is the ranking: box art first, thumbnails last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageQuality {
    /// Official cover-art representation of the item.
    BoxArt,
    /// Full-quality/original/large gallery rendition.
    FullSize,
    /// No recognizable pattern.
    Other,
    /// Small-dimension or thumbnail rendition; deprioritized unless nothing
    /// better exists.
    Thumbnail,
}

impl ImageQuality {
    fn rank(self) -> u8 {
        match self {
            ImageQuality::BoxArt => 0,
            ImageQuality::FullSize => 1,
            ImageQuality::Other => 2,
            ImageQuality::Thumbnail => 3,
        }
    }
}

/// An absolute image URL found in the scraped markup, with its derived tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    pub url: String,
    pub quality: ImageQuality,
}

/// Classifies an image URL by filename-pattern tokens.
#[must_use]
pub fn classify(url: &str) -> ImageQuality {
    let lower = url.to_ascii_lowercase();
    let thumbish = ["thumb", "micro", "square", "avatar"]
        .iter()
        .any(|token| lower.contains(token));

    if !thumbish
        && ["itemrep", "box", "cover"]
            .iter()
            .any(|token| lower.contains(token))
    {
        return ImageQuality::BoxArt;
    }
    if thumbish {
        return ImageQuality::Thumbnail;
    }
    if ["original", "imagepage", "large"]
        .iter()
        .any(|token| lower.contains(token))
    {
        return ImageQuality::FullSize;
    }
    ImageQuality::Other
}

/// Scans raw HTML for trusted-CDN image URLs and returns them ranked.
///
/// Exact-string duplicates are dropped; ordering is by quality tier, stable
/// within a tier (document order), so the head of the list is the best
/// box-art candidate. Pure function; an empty list is a valid result, not an
/// error.
#[must_use]
pub fn extract_candidates(raw_html: &str) -> Vec<ImageCandidate> {
    let re = Regex::new(r#"https://cf\.geekdo-images\.com/[^\s"'<>]+?\.(?:jpg|jpeg|png|webp)"#)
        .expect("valid image URL regex");

    let mut seen = std::collections::HashSet::new();
    let mut candidates: Vec<ImageCandidate> = re
        .find_iter(raw_html)
        .map(|m| m.as_str().to_owned())
        .filter(|url| seen.insert(url.clone()))
        .map(|url| {
            let quality = classify(&url);
            ImageCandidate { url, quality }
        })
        .collect();

    candidates.sort_by_key(|c| c.quality.rank());
    candidates
}
