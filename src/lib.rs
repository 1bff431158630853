// src/lib.rs
// =============================================================================
// md-links as a library: find the links in Markdown files and optionally
// check that they are reachable.
//
// The binary in main.rs is a thin layer over `pipeline::md_links`.
// =============================================================================

pub mod checker; // src/checker/ - link records, extraction, HTTP checks, stats
pub mod error; // src/error.rs - errors that abort a scan
pub mod files; // src/files/ - which Markdown files to scan
pub mod pipeline; // src/pipeline.rs - resolve -> extract -> validate

pub use error::{Error, Result};
pub use pipeline::{md_links, Options, Report};
