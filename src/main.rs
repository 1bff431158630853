// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Run the md_links pipeline (resolve files -> extract links -> validate)
// 3. Print the links (plain list, table or JSON) and optional stats
// 4. Exit with proper code (0 = success, 1 = broken links, 2 = error)
// =============================================================================

mod cli; // src/cli.rs - command-line parsing

use anyhow::{Context, Result};
use clap::Parser; // Parser trait enables the parse() method
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use md_links::checker::{Link, ReqwestProbe, Stats};
use md_links::Report;

// Longest link text shown in the plain and table outputs
const TEXT_WIDTH: usize = 50;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            // One line for the user; the chain has the underlying cause
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so --json output on stdout stays parseable
fn init_tracing(verbose: bool) {
    let default = if verbose { "md_links=debug" } else { "md_links=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// Returns:
//   Ok(0) = no broken links (or nothing was validated)
//   Ok(1) = broken links found
//   Err   = the scan itself failed
async fn run(cli: &Cli) -> Result<i32> {
    let probe = ReqwestProbe::new(&cli.probe_config()).context("failed to create HTTP client")?;

    let report = md_links::md_links(&cli.path, &cli.options(), &probe)
        .await
        .with_context(|| format!("failed to scan {}", cli.path.display()))?;

    print_report(&report, cli.stats, cli.json)?;

    Ok(if report.has_broken_links() { 1 } else { 0 })
}

#[derive(Serialize)]
struct JsonReport<'a> {
    links: &'a [Link],
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<Stats>,
}

fn print_report(report: &Report, stats: bool, json: bool) -> Result<()> {
    if json {
        let output = JsonReport {
            links: &report.links,
            stats: stats.then(|| report.stats()),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if report.validated {
        print_table(&report.links);
    } else if !stats {
        print_list(&report.links);
    }

    if stats {
        print_stats(&report.stats());
    }
    Ok(())
}

// One line per link: file, href, text
fn print_list(links: &[Link]) {
    for link in links {
        println!(
            "{} {} {}",
            link.file.display(),
            link.href,
            truncate(&link.text, TEXT_WIDTH)
        );
    }
}

// Validated links as a table
fn print_table(links: &[Link]) {
    println!(
        "{:<50} {:<40} {:<6} {:<6} {}",
        "FILE", "HREF", "OK", "STATUS", "TEXT"
    );
    println!("{}", "=".repeat(140));

    for link in links {
        let ok = match link.is_ok() {
            Some(true) => "ok",
            _ => "fail",
        };
        let status = link
            .status()
            .map(|s| s.to_string())
            .unwrap_or_default();

        println!(
            "{:<50} {:<40} {:<6} {:<6} {}",
            truncate(&link.file.display().to_string(), 50),
            truncate(&link.href, 40),
            ok,
            status,
            truncate(&link.text, TEXT_WIDTH)
        );
    }

    println!();
}

fn print_stats(stats: &Stats) {
    println!("📊 Stats:");
    println!("   Total: {}", stats.total);
    println!("   Unique: {}", stats.unique);
    if let Some(broken) = stats.broken {
        println!("   Broken: {}", broken);
    }
}

// Cuts on a char boundary and marks the cut with "..."
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}
