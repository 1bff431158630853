// src/files/resolve.rs
// =============================================================================
// This module turns the user's path into the list of Markdown files to scan.
//
// Rules:
// - A single .md file        -> just that file
// - A single non-.md file    -> nothing (silently skipped, not an error)
// - A directory              -> every .md file below it, at any depth
// - A path that doesn't exist -> Error::NotFound
//
// Ordering: entries are visited by file name at each level and
// subdirectories are expanded where they appear (depth-first), so the same
// tree always produces the same list.
//
// Rust concepts:
// - Enums with data: FileCheck carries the io::Error when stat fails
// - Iterators: walkdir hands us directory entries one by one
// =============================================================================

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Outcome of asking "is there a regular file at this path?".
///
/// Stat failures are kept as data instead of being thrown, and callers
/// decide how to collapse them (see [`FileCheck::is_file`]).
#[derive(Debug)]
pub enum FileCheck {
    /// A regular file exists at the path.
    Exists,
    /// Something exists but it is not a regular file (e.g. a directory).
    NotAFile,
    /// Nothing exists at the path.
    NotExists,
    /// The path could not be inspected (permission denied, ...).
    Error(io::Error),
}

impl FileCheck {
    /// Collapses the check to a boolean: only `Exists` counts as a file.
    pub fn is_file(&self) -> bool {
        matches!(self, FileCheck::Exists)
    }
}

/// Inspects `path`, following symlinks.
pub fn check_file(path: &Path) -> FileCheck {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => FileCheck::Exists,
        Ok(_) => FileCheck::NotAFile,
        Err(e) if e.kind() == io::ErrorKind::NotFound => FileCheck::NotExists,
        Err(e) => FileCheck::Error(e),
    }
}

/// Returns true when the path ends in `.md`, ignoring case.
pub fn is_markdown(path: &Path) -> bool {
    path.to_string_lossy().to_lowercase().ends_with(".md")
}

/// Resolves a file or directory into the Markdown files it contains.
pub fn resolve(path: &Path) -> Result<Vec<PathBuf>> {
    let check = check_file(path);
    if let FileCheck::Error(e) = &check {
        // Not fatal here: listing the directory below reports it properly
        debug!(path = %path.display(), error = %e, "stat failed, treating as not a file");
    }

    if check.is_file() {
        if is_markdown(path) {
            return Ok(vec![path.to_path_buf()]);
        }
        debug!(path = %path.display(), "skipping non-markdown file");
        return Ok(Vec::new());
    }

    list_markdown_files(path)
}

/// Recursively lists every Markdown file under `dir`.
pub fn list_markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            if e.depth() == 0 && e.io_error().map(io::Error::kind) == Some(io::ErrorKind::NotFound) {
                Error::not_found(dir)
            } else {
                Error::Walk(e)
            }
        })?;

        if entry.file_type().is_file() && is_markdown(entry.path()) {
            files.push(entry.into_path());
        }
    }

    debug!(dir = %dir.display(), count = files.len(), "listed markdown files");
    Ok(files)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why FileCheck instead of a plain bool?
//    - std::fs::metadata can fail for many reasons
//    - Keeping the error around lets us log it instead of losing it
//    - is_file() gives callers the simple yes/no answer when that's enough
//
// 2. What does follow_links(true) do?
//    - Symlinked files and directories are scanned like real ones
//    - walkdir detects symlink loops and reports them as errors
//
// 3. What is e.depth() == 0?
//    - Depth 0 is the root path itself
//    - A missing root means the user typed a bad path -> NotFound
//    - Errors deeper in the tree are reported as Walk errors
// -----------------------------------------------------------------------------
