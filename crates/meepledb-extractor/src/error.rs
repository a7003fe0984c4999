use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractorError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Quota or rate-limit failure from the completion service; transient,
    /// distinct from a malformed response so callers can tell "try again
    /// later" from "this will never work".
    #[error("extraction service is over capacity (status {status})")]
    UpstreamBusy {
        status: u16,
        retry_after_secs: Option<u64>,
    },

    /// The completion service returned a response without a usable
    /// function-call payload.
    #[error("extraction failed: {reason}")]
    ExtractionFailed { reason: String },

    /// The extracted record lacks a non-empty title.
    #[error("extracted record has no title")]
    NoTitleFound,

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
