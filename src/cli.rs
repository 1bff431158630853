// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Usage:
//   md-links README.md
//   md-links docs/ --validate --stats
//   md-links docs/ --validate --json --no-follow-redirects
// =============================================================================

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use md_links::checker::ProbeConfig;
use md_links::Options;

#[derive(Parser, Debug)]
#[command(
    name = "md-links",
    version,
    about = "List the links in Markdown files and check whether they are reachable",
    long_about = "md-links reads a Markdown file, or every .md file under a directory, \
                  and lists the links it contains. With --validate each link gets a HEAD \
                  request and is reported as ok or fail."
)]
pub struct Cli {
    /// Markdown file or directory to scan
    ///
    /// Directories are scanned recursively; files not ending in .md are skipped
    pub path: PathBuf,

    /// Check every link with an HTTP HEAD request
    #[arg(long)]
    pub validate: bool,

    /// Print total / unique (and broken, with --validate) counts
    #[arg(long)]
    pub stats: bool,

    /// Output results in JSON format instead of a table
    #[arg(long)]
    pub json: bool,

    /// Seconds to wait for each link before giving up
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Report 3xx answers as-is instead of following them
    ///
    /// A redirect then counts as a failed link
    #[arg(long)]
    pub no_follow_redirects: bool,

    /// How many redirects to follow before giving up
    #[arg(long, default_value_t = 5)]
    pub max_redirects: usize,

    /// Max links checked at the same time (default: all at once)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Log what the scan is doing to stderr (RUST_LOG overrides this)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn options(&self) -> Options {
        Options {
            validate: self.validate,
            concurrency: self.concurrency,
        }
    }

    pub fn probe_config(&self) -> ProbeConfig {
        ProbeConfig {
            timeout: Duration::from_secs(self.timeout),
            follow_redirects: !self.no_follow_redirects,
            max_redirects: self.max_redirects,
            ..ProbeConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["md-links", "docs"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("docs"));
        assert!(!cli.validate && !cli.stats && !cli.json);

        let config = cli.probe_config();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.follow_redirects);
        assert_eq!(config.max_redirects, 5);
        assert_eq!(cli.options().concurrency, None);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "md-links",
            "README.md",
            "--validate",
            "--stats",
            "--no-follow-redirects",
            "--timeout",
            "3",
            "--concurrency",
            "8",
        ])
        .unwrap();

        let options = cli.options();
        assert!(options.validate);
        assert_eq!(options.concurrency, Some(8));
        assert!(cli.stats);

        let config = cli.probe_config();
        assert!(!config.follow_redirects);
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_path_is_required() {
        assert!(Cli::try_parse_from(["md-links"]).is_err());
    }
}
