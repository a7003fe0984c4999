/// A successful scrape of a catalog page.
///
/// `markdown` feeds the content-match guardrail and the structured
/// extractor; `raw_html` is only scanned for image candidates. Neither is
/// persisted.
#[derive(Debug, Clone)]
pub struct ScrapeResult {
    pub markdown: String,
    pub raw_html: String,
}
