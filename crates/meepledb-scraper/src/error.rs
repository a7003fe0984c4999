use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid source URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from scrape service for {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("scrape returned no content for {url}")]
    NoContent { url: String },

    #[error("scraped content does not mention item {item_id} from {url}")]
    ContentMismatch { url: String, item_id: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
