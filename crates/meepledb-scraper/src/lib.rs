//! Scrape-side half of the import pipeline: URL guardrails, the scrape
//! service client, and image candidate extraction/sanitization.

mod client;
mod error;
mod guard;
mod images;
mod sanitize;
mod types;

pub use client::ScrapeClient;
pub use error::ScrapeError;
pub use guard::{ensure_content_matches, extract_item_id, validate_source_url};
pub use images::{extract_candidates, ImageCandidate, ImageQuality};
pub use sanitize::{encode_image_url, sanitize_images, SanitizedImages};
pub use types::ScrapeResult;
