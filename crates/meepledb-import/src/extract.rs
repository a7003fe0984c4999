//! The extraction seam.
//!
//! The pipeline only needs "markdown plus candidate URLs in, validated
//! record out"; the concrete prompt and schema stay behind this trait so
//! tests can drive the pipeline with a canned extractor.

use std::future::Future;

use meepledb_core::ExtractedGame;
use meepledb_extractor::{ExtractionClient, ExtractorError};

/// Structured extraction of a catalog record from scraped page content.
pub trait StructuredExtract {
    /// Extracts a validated record from `markdown`, selecting images from
    /// the ranked `image_candidates` list.
    fn extract(
        &self,
        markdown: &str,
        image_candidates: &[String],
    ) -> impl Future<Output = Result<ExtractedGame, ExtractorError>> + Send;
}

impl StructuredExtract for ExtractionClient {
    fn extract(
        &self,
        markdown: &str,
        image_candidates: &[String],
    ) -> impl Future<Output = Result<ExtractedGame, ExtractorError>> + Send {
        ExtractionClient::extract(self, markdown, image_candidates)
    }
}
