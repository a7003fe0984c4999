//! The import pipeline's error taxonomy.
//!
//! Every stage failure maps onto one of these variants; nothing is queued or
//! retried automatically, and partial progress (mechanics or publishers
//! created before a later stage failed) is intentionally left in place —
//! they are idempotent-safe to leave orphaned since a later successful
//! import reuses them by name.

use thiserror::Error;

use meepledb_extractor::ExtractorError;
use meepledb_scraper::ScrapeError;

#[derive(Debug, Error)]
pub enum ImportError {
    /// The request URL is not an absolute http/https URL. Client input,
    /// never retried.
    #[error("invalid source URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The scrape service failed (non-2xx, network failure, or timeout).
    #[error("scrape service unavailable: {reason}")]
    ScrapeUnavailable { reason: String },

    /// The scrape succeeded but carried no usable body.
    #[error("scrape returned no content for {url}")]
    NoContent { url: String },

    /// The scraped content does not pertain to the requested item; the
    /// pipeline fails closed rather than importing the wrong record.
    #[error("scraped content does not mention item {item_id} from {url}")]
    ContentMismatch { url: String, item_id: String },

    /// The extraction service returned a malformed or unusable response.
    #[error("structured extraction failed: {reason}")]
    ExtractionFailed { reason: String },

    /// The extracted record has no title; the page does not describe an
    /// importable item.
    #[error("no title found in extracted record")]
    NoTitleFound,

    /// The extraction service is rate-limited or over quota; transient,
    /// worth retrying later.
    #[error("extraction service is over capacity")]
    UpstreamBusy { retry_after_secs: Option<u64> },

    /// A database write failed.
    #[error(transparent)]
    Persistence(#[from] meepledb_db::DbError),
}

impl From<ScrapeError> for ImportError {
    fn from(err: ScrapeError) -> Self {
        match err {
            ScrapeError::InvalidUrl { url, reason } => ImportError::InvalidUrl { url, reason },
            ScrapeError::NoContent { url } => ImportError::NoContent { url },
            ScrapeError::ContentMismatch { url, item_id } => {
                ImportError::ContentMismatch { url, item_id }
            }
            ScrapeError::UnexpectedStatus { status, url } => ImportError::ScrapeUnavailable {
                reason: format!("unexpected HTTP status {status} for {url}"),
            },
            // Network failures and timeouts both read as "the scrape service
            // is unavailable" to the caller.
            ScrapeError::Http(e) => ImportError::ScrapeUnavailable {
                reason: e.to_string(),
            },
            ScrapeError::Deserialize { context, source } => ImportError::ScrapeUnavailable {
                reason: format!("malformed response for {context}: {source}"),
            },
        }
    }
}

impl From<ExtractorError> for ImportError {
    fn from(err: ExtractorError) -> Self {
        match err {
            ExtractorError::UpstreamBusy {
                retry_after_secs, ..
            } => ImportError::UpstreamBusy { retry_after_secs },
            ExtractorError::NoTitleFound => ImportError::NoTitleFound,
            ExtractorError::ExtractionFailed { reason } => ImportError::ExtractionFailed { reason },
            // A timeout against the completion service is a capacity
            // problem, not a malformed response.
            ExtractorError::Http(e) if e.is_timeout() => ImportError::UpstreamBusy {
                retry_after_secs: None,
            },
            ExtractorError::Http(e) => ImportError::ExtractionFailed {
                reason: e.to_string(),
            },
            ExtractorError::Deserialize { context, source } => ImportError::ExtractionFailed {
                reason: format!("malformed response for {context}: {source}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrape_status_maps_to_unavailable() {
        let err = ImportError::from(ScrapeError::UnexpectedStatus {
            status: 500,
            url: "https://example.com/item/1".to_string(),
        });
        assert!(matches!(err, ImportError::ScrapeUnavailable { .. }));
    }

    #[test]
    fn content_mismatch_survives_conversion() {
        let err = ImportError::from(ScrapeError::ContentMismatch {
            url: "https://example.com/item/42/foo".to_string(),
            item_id: "42".to_string(),
        });
        assert!(matches!(
            err,
            ImportError::ContentMismatch { ref item_id, .. } if item_id == "42"
        ));
    }

    #[test]
    fn extractor_busy_maps_to_upstream_busy() {
        let err = ImportError::from(ExtractorError::UpstreamBusy {
            status: 429,
            retry_after_secs: Some(30),
        });
        assert!(matches!(
            err,
            ImportError::UpstreamBusy {
                retry_after_secs: Some(30)
            }
        ));
    }
}
