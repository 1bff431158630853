// src/error.rs
// =============================================================================
// Errors that can stop a scan.
//
// Only filesystem and extraction problems live here. A link that cannot be
// reached is NOT an error: it is recorded on the link itself (see
// checker::http) and the scan keeps going.
//
// main.rs still uses anyhow for its own plumbing; this enum is what the
// pipeline modules return so callers can match on what went wrong.
// =============================================================================

use std::path::PathBuf;

/// Things that abort the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input path does not exist.
    #[error("no such file or directory: {}", path.display())]
    NotFound { path: PathBuf },

    /// Enumerating a directory below the input path failed
    /// (permission denied, symlink loop, ...).
    #[error("failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// A Markdown file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A Markdown file could not be handed to the parser.
    #[error("failed to extract links from {}: {message}", path.display())]
    Extraction { path: PathBuf, message: String },

    /// The background file listing panicked or was cancelled.
    #[error("file listing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl Error {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// The file the error is about, if there is one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::NotFound { path } | Self::Read { path, .. } | Self::Extraction { path, .. } => {
                Some(path.as_path())
            }
            Self::Walk(e) => e.path(),
            Self::Task(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
