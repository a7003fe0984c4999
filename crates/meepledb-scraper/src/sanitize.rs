//! Structural sanitization of the image URLs chosen for persistence.
//!
//! The trusted CDN's delivery layer chokes on literal parentheses (common in
//! its own `filters:strip_icc()` path segments), so those are percent-encoded
//! before a URL is stored. Filtering is purely structural; no image bytes are
//! fetched.

use std::collections::HashSet;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::images::{classify, ImageCandidate, ImageQuality};

/// Characters known to break the CDN's content-delivery layer when left raw.
const IMAGE_URL_ENCODE_SET: &AsciiSet = &CONTROLS.add(b' ').add(b'(').add(b')');

/// Maximum number of secondary (gameplay/component) images persisted.
const MAX_GALLERY_IMAGES: usize = 2;

/// The final image selection for a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedImages {
    pub main: Option<String>,
    pub gallery: Vec<String>,
}

/// Percent-encodes characters the image CDN cannot serve raw.
#[must_use]
pub fn encode_image_url(url: &str) -> String {
    utf8_percent_encode(url, IMAGE_URL_ENCODE_SET).to_string()
}

/// Sanitizes the extractor's chosen main/secondary image URLs.
///
/// The main image falls back to the head of the ranked candidate list when
/// the extractor supplied none. Secondary images must be gameplay/component
/// photos: thumbnail-pattern and box-art-pattern URLs are dropped, the main
/// image is never repeated, duplicates are removed, and the list is capped
/// at [`MAX_GALLERY_IMAGES`]. When the extractor supplied no secondary
/// images at all, the ranked candidate list is re-filtered under the same
/// rules. Always succeeds; an empty gallery is a valid outcome.
#[must_use]
pub fn sanitize_images(
    main: Option<&str>,
    gameplay: &[String],
    candidates: &[ImageCandidate],
) -> SanitizedImages {
    let main: Option<String> = main
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_owned)
        .or_else(|| candidates.first().map(|c| c.url.clone()));

    let fallback: Vec<String>;
    let pool: &[String] = if gameplay.is_empty() {
        fallback = candidates.iter().map(|c| c.url.clone()).collect();
        &fallback
    } else {
        gameplay
    };

    let mut seen = HashSet::new();
    let mut gallery = Vec::new();
    for url in pool {
        let url = url.trim();
        if url.is_empty() {
            continue;
        }
        match classify(url) {
            ImageQuality::Thumbnail | ImageQuality::BoxArt => continue,
            ImageQuality::FullSize | ImageQuality::Other => {}
        }
        if main.as_deref() == Some(url) {
            continue;
        }
        if !seen.insert(url.to_owned()) {
            continue;
        }
        gallery.push(encode_image_url(url));
        if gallery.len() == MAX_GALLERY_IMAGES {
            break;
        }
    }

    SanitizedImages {
        main: main.as_deref().map(encode_image_url),
        gallery,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::extract_candidates;

    #[test]
    fn encode_escapes_parens_and_spaces() {
        let url = "https://cf.geekdo-images.com/A/filters:strip_icc()/pic 1.jpg";
        let encoded = encode_image_url(url);
        assert_eq!(
            encoded,
            "https://cf.geekdo-images.com/A/filters:strip_icc%28%29/pic%201.jpg"
        );
        assert!(!encoded.contains('('));
        assert!(!encoded.contains(')'));
    }

    #[test]
    fn encode_leaves_clean_urls_untouched() {
        let url = "https://cf.geekdo-images.com/A__original/img/pic1.jpg";
        assert_eq!(encode_image_url(url), url);
    }

    #[test]
    fn gallery_drops_thumbnails_and_box_art() {
        let gameplay = vec![
            "https://cf.geekdo-images.com/A__thumb/img/pic1.jpg".to_string(),
            "https://cf.geekdo-images.com/B__itemrep/img/pic2.jpg".to_string(),
            "https://cf.geekdo-images.com/C__original/img/pic3.jpg".to_string(),
        ];
        let result = sanitize_images(None, &gameplay, &[]);
        assert_eq!(
            result.gallery,
            vec!["https://cf.geekdo-images.com/C__original/img/pic3.jpg".to_string()]
        );
    }

    #[test]
    fn gallery_never_repeats_main_and_caps_at_two() {
        let main = "https://cf.geekdo-images.com/M__original/img/main.jpg";
        let gameplay = vec![
            main.to_string(),
            "https://cf.geekdo-images.com/A__original/img/pic1.jpg".to_string(),
            "https://cf.geekdo-images.com/A__original/img/pic1.jpg".to_string(),
            "https://cf.geekdo-images.com/B__original/img/pic2.jpg".to_string(),
            "https://cf.geekdo-images.com/C__original/img/pic3.jpg".to_string(),
        ];
        let result = sanitize_images(Some(main), &gameplay, &[]);
        assert_eq!(result.main.as_deref(), Some(main));
        assert_eq!(result.gallery.len(), 2);
        assert!(!result.gallery.contains(&main.to_string()));
    }

    #[test]
    fn main_falls_back_to_best_candidate() {
        let html = concat!(
            r#"<img src="https://cf.geekdo-images.com/T__thumb/img/t.jpg">"#,
            r#"<img src="https://cf.geekdo-images.com/R__itemrep/img/rep.jpg">"#,
        );
        let candidates = extract_candidates(html);
        let result = sanitize_images(None, &[], &candidates);
        assert_eq!(
            result.main.as_deref(),
            Some("https://cf.geekdo-images.com/R__itemrep/img/rep.jpg")
        );
    }

    #[test]
    fn gallery_falls_back_to_candidates_when_extractor_supplied_none() {
        let html = concat!(
            r#"<img src="https://cf.geekdo-images.com/R__itemrep/img/rep.jpg">"#,
            r#"<img src="https://cf.geekdo-images.com/G__original/img/play1.jpg">"#,
            r#"<img src="https://cf.geekdo-images.com/H__original/img/play2.jpg">"#,
            r#"<img src="https://cf.geekdo-images.com/T__thumb/img/t.jpg">"#,
        );
        let candidates = extract_candidates(html);
        let result = sanitize_images(None, &[], &candidates);
        // Main takes the box art; the gallery re-filters to gameplay shots.
        assert_eq!(result.gallery.len(), 2);
        assert!(result.gallery[0].contains("play1"));
        assert!(result.gallery[1].contains("play2"));
    }

    #[test]
    fn empty_inputs_produce_empty_selection() {
        let result = sanitize_images(None, &[], &[]);
        assert!(result.main.is_none());
        assert!(result.gallery.is_empty());
    }
}
