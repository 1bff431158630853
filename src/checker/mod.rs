// src/checker/mod.rs
// =============================================================================
// This module contains all link logic.
//
// Submodules:
// - link: The Link record and its validation result
// - markdown: Extracts links from markdown text
// - http: Makes HTTP requests to check if links are reachable
// - stats: Total / unique / broken counts
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

mod http;
mod link;
mod markdown;
mod stats;

// Re-export public items from submodules
// This lets users write `checker::validate_links()` instead of
// `checker::http::validate_links()`
pub use http::{
    validate_link, validate_links, HeadProbe, ProbeConfig, ProbeError, ProbeResponse, ReqwestProbe,
};
pub use link::{HttpStatus, Link, Validation};
pub use markdown::{extract, render, LinkCollector, LinkHandler};
pub use stats::{summarize, Stats};
