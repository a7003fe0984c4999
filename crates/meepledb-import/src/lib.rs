//! The catalog import pipeline: scrape, verify, extract, resolve, sanitize,
//! upsert — composed strictly forward, each stage short-circuiting with a
//! typed error.

mod error;
mod extract;
mod pipeline;

pub use error::ImportError;
pub use extract::StructuredExtract;
pub use pipeline::{run_import, ImportedGame};
