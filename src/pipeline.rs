// src/pipeline.rs
// =============================================================================
// This module wires the pieces together:
//
//   path --files::resolve (blocking pool)--> [.md files]
//        --read + checker::extract (all files at once)--> [links, in order]
//        --checker::validate_links (only with --validate)--> [checked links]
//
// The result is a Report; stats are computed from it on demand.
//
// Errors:
// - Missing path, unreadable file, non-UTF-8 file -> the whole scan fails
// - Unreachable link -> recorded on the link, the scan keeps going
// =============================================================================

use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::checker::{self, HeadProbe, Link, Stats};
use crate::error::{Error, Result};
use crate::files;

/// What the pipeline should do besides extracting.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Check every link over HTTP
    pub validate: bool,
    /// Max checks in flight; None starts them all at once
    pub concurrency: Option<usize>,
}

/// Everything one run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// File order, then order inside each file
    pub links: Vec<Link>,
    pub validated: bool,
}

impl Report {
    pub fn stats(&self) -> Stats {
        checker::summarize(&self.links, self.validated)
    }

    /// True when validation ran and at least one link failed it.
    pub fn has_broken_links(&self) -> bool {
        self.stats().broken.is_some_and(|broken| broken > 0)
    }
}

/// Reads one Markdown file and extracts its links.
pub async fn read_links(file: &Path) -> Result<Vec<Link>> {
    let bytes = tokio::fs::read(file)
        .await
        .map_err(|e| Error::read(file, e))?;

    // The parser needs text; anything else can't be scanned
    let content = String::from_utf8(bytes).map_err(|e| Error::Extraction {
        path: file.to_path_buf(),
        message: e.to_string(),
    })?;

    let links = checker::extract(&content, file);
    debug!(file = %file.display(), count = links.len(), "extracted links");
    Ok(links)
}

/// Makes `path` absolute. An empty path means the current directory.
pub fn absolute_root(path: &Path) -> Result<PathBuf> {
    let root = if path.as_os_str().is_empty() {
        std::env::current_dir()
    } else {
        std::path::absolute(path)
    };
    root.map_err(|_| Error::not_found(path))
}

/// Lists the Markdown files under `root` on the blocking thread pool,
/// since walkdir does synchronous I/O.
pub async fn resolve_files(root: PathBuf) -> Result<Vec<PathBuf>> {
    tokio::task::spawn_blocking(move || files::resolve(&root)).await?
}

/// Runs the whole scan for `path`.
///
/// `probe` is only used when `options.validate` is set.
pub async fn md_links<P: HeadProbe + ?Sized>(
    path: &Path,
    options: &Options,
    probe: &P,
) -> Result<Report> {
    let root = absolute_root(path)?;

    let files = resolve_files(root.clone()).await?;
    info!(root = %root.display(), files = files.len(), "resolved markdown files");

    // Files are independent, so read them all at once; try_join_all keeps order
    let per_file = try_join_all(files.iter().map(|file| read_links(file))).await?;
    let links: Vec<Link> = per_file.into_iter().flatten().collect();
    info!(links = links.len(), "extracted links");

    if !options.validate {
        return Ok(Report {
            links,
            validated: false,
        });
    }

    let links = checker::validate_links(probe, &links, options.concurrency).await;
    info!(links = links.len(), "validated links");

    Ok(Report {
        links,
        validated: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{HttpStatus, ProbeError, ProbeResponse};
    use async_trait::async_trait;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    /// 200 for example.com, connection failure for everything else.
    #[derive(Default)]
    struct FakeProbe {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl HeadProbe for FakeProbe {
        async fn head(&self, url: &str) -> std::result::Result<ProbeResponse, ProbeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if url.starts_with("https://example.com") {
                Ok(ProbeResponse { status: 200 })
            } else {
                Err(ProbeError::Connect("refused".to_string()))
            }
        }
    }

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.md", "[Home](https://example.com) and [Dead](https://dead.example)");
        write(&dir, "notes.txt", "[Ignored](https://ignored.example)");
        write(&dir, "sub/b.md", "# B\n\n[Home again](https://example.com)");
        dir
    }

    #[tokio::test]
    async fn test_extracts_in_file_then_link_order() {
        let dir = fixture();
        let probe = FakeProbe::default();

        let report = md_links(dir.path(), &Options::default(), &probe).await.unwrap();

        let got: Vec<_> = report
            .links
            .iter()
            .map(|l| (l.file.file_name().unwrap().to_str().unwrap(), l.href.as_str()))
            .collect();
        assert_eq!(
            got,
            vec![
                ("a.md", "https://example.com"),
                ("a.md", "https://dead.example"),
                ("b.md", "https://example.com"),
            ]
        );
        assert!(report.links.iter().all(|l| l.file.is_absolute()));
        assert!(report.links.iter().all(|l| l.validation.is_none()));
        assert_eq!(probe.calls.load(Ordering::SeqCst), 0);

        let stats = report.stats();
        assert_eq!((stats.total, stats.unique, stats.broken), (3, 2, None));
        assert!(!report.has_broken_links());
    }

    #[tokio::test]
    async fn test_validate_annotates_every_link() {
        let dir = fixture();
        let probe = FakeProbe::default();
        let options = Options {
            validate: true,
            concurrency: None,
        };

        let report = md_links(dir.path(), &options, &probe).await.unwrap();

        let statuses: Vec<_> = report.links.iter().map(|l| l.status()).collect();
        assert_eq!(
            statuses,
            vec![
                Some(HttpStatus::Code(200)),
                Some(HttpStatus::Unreachable),
                Some(HttpStatus::Code(200)),
            ]
        );
        assert_eq!(probe.calls.load(Ordering::SeqCst), 3);
        assert_eq!(report.stats().broken, Some(1));
        assert!(report.has_broken_links());
    }

    #[tokio::test]
    async fn test_single_file() {
        let dir = fixture();
        let file = dir.path().join("sub/b.md");

        let report = md_links(&file, &Options::default(), &FakeProbe::default())
            .await
            .unwrap();

        assert_eq!(report.links, vec![Link::new("https://example.com", "Home again", file)]);
    }

    #[tokio::test]
    async fn test_non_markdown_file_yields_nothing() {
        let dir = fixture();
        let report = md_links(&dir.path().join("notes.txt"), &Options::default(), &FakeProbe::default())
            .await
            .unwrap();
        assert!(report.links.is_empty());
        assert_eq!(report.stats().total, 0);
    }

    #[test]
    fn test_empty_path_means_current_dir() {
        let root = absolute_root(Path::new("")).unwrap();
        assert_eq!(root, std::env::current_dir().unwrap());
    }

    #[test]
    fn test_relative_path_is_made_absolute() {
        let root = absolute_root(Path::new("docs/a.md")).unwrap();
        assert!(root.is_absolute());
        assert!(root.ends_with("docs/a.md"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_resolve_files_off_the_runtime() {
        let dir = fixture();

        let files = resolve_files(dir.path().to_path_buf()).await.unwrap();
        assert_eq!(files, vec![dir.path().join("a.md"), dir.path().join("sub/b.md")]);

        let err = resolve_files(dir.path().join("nope")).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_missing_path_fails() {
        let dir = TempDir::new().unwrap();
        let err = md_links(&dir.path().join("nope"), &Options::default(), &FakeProbe::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_non_utf8_file_fails_extraction() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.md"), [0xff, 0xfe, 0x00, 0x5b]).unwrap();

        let err = md_links(dir.path(), &Options::default(), &FakeProbe::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Extraction { .. }));
    }
}
