// src/files/mod.rs
// =============================================================================
// This module finds the Markdown files we should scan.
//
// Submodules:
// - resolve: turns the path given on the command line into a list of .md files
// =============================================================================

mod resolve;

pub use resolve::{check_file, is_markdown, list_markdown_files, resolve, FileCheck};
