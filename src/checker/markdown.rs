// src/checker/markdown.rs
// =============================================================================
// This module extracts links from Markdown text.
//
// We use the `pulldown-cmark` crate which:
// - Parses Markdown into events (heading, paragraph, link, etc.)
// - Follows the CommonMark specification
// - Is fast and memory-efficient (it's a streaming parser)
//
// The parser is hidden behind a small visitor: `render` walks the document
// and calls `LinkHandler::on_link` once per link, in document order. The
// extractor is just one handler (`LinkCollector`) that turns each callback
// into a `Link` record.
//
// Every link is kept: relative paths, mailto:, anchors and broken URLs all
// pass through untouched. Deciding what is reachable is the http module's job.
// =============================================================================

use pulldown_cmark::{Event, Parser, Tag};
use std::path::{Path, PathBuf};

use super::link::Link;

/// Receives one callback per link found by [`render`].
pub trait LinkHandler {
    fn on_link(&mut self, href: &str, text: &str);
}

/// Parses `markdown` and reports every link to `handler`.
///
/// Covers inline links, reference links whose definition exists, and
/// autolinks (`<https://...>`). Images are not links and are skipped.
pub fn render<H: LinkHandler + ?Sized>(markdown: &str, handler: &mut H) {
    // (href, text collected so far) while we are inside a link.
    // CommonMark forbids links inside links, so one slot is enough.
    let mut current: Option<(String, String)> = None;

    for event in Parser::new(markdown) {
        match event {
            // In pulldown-cmark 0.9, Link is Tag::Link(link_type, dest_url, title)
            Event::Start(Tag::Link(_link_type, dest_url, _title)) => {
                current = Some((dest_url.to_string(), String::new()));
            }

            Event::Text(text) | Event::Code(text) => {
                if let Some((_, buf)) = current.as_mut() {
                    buf.push_str(&text);
                }
            }

            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, buf)) = current.as_mut() {
                    buf.push(' ');
                }
            }

            Event::End(Tag::Link(..)) => {
                if let Some((href, text)) = current.take() {
                    handler.on_link(&href, &text);
                }
            }

            _ => {}
        }
    }
}

/// Collects links into records tagged with their source file.
#[derive(Debug)]
pub struct LinkCollector {
    file: PathBuf,
    links: Vec<Link>,
}

impl LinkCollector {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        LinkCollector {
            file: file.into(),
            links: Vec::new(),
        }
    }

    pub fn into_links(self) -> Vec<Link> {
        self.links
    }
}

impl LinkHandler for LinkCollector {
    fn on_link(&mut self, href: &str, text: &str) {
        self.links.push(Link::new(href, text, self.file.clone()));
    }
}

/// Extracts every link in `content`, in the order they appear.
///
/// Example input:
///   "Check out [Rust](https://www.rust-lang.org)!"
///
/// Example output:
///   [Link { href: "https://www.rust-lang.org", text: "Rust", file, .. }]
pub fn extract(content: &str, file: &Path) -> Vec<Link> {
    // A fresh collector per call, so nothing leaks between files
    let mut collector = LinkCollector::new(file);
    render(content, &mut collector);
    collector.into_links()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a trait for the callback?
//    - The extractor doesn't care HOW links are found, only that it is told
//    - Tests can plug in their own handler to see the raw callbacks
//    - Swapping the Markdown parser only touches render()
//
// 2. What does `H: LinkHandler + ?Sized` mean?
//    - H can be any type implementing LinkHandler
//    - ?Sized also allows trait objects like `&mut dyn LinkHandler`
//
// 3. Why do we collect text between Start and End?
//    - pulldown-cmark reports a link as several events:
//      Start(Link) -> Text("Rust") -> End(Link)
//    - Link text can contain `code` or line breaks, so we glue the pieces
// -----------------------------------------------------------------------------
