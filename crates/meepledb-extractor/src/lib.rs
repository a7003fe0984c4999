//! Structured extraction from scraped page content via an external AI
//! completion service, using a single forced function call with a strict,
//! enum-constrained JSON schema.

mod client;
mod error;
mod schema;
mod types;

pub use client::ExtractionClient;
pub use error::ExtractorError;
