// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (RUST_LOG, default "info")
// 3. Ask for the target URL if it wasn't given
// 4. Crawl the site and print the collected pages
// 5. Exit with proper code (0 = success, 2 = error)
//
// Rust concepts used:
// - async/await: reqwest is an async HTTP client
// - Result<T, E>: For error handling (T = success type, E = error type)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;   // src/cli.rs - command-line parsing
mod crawl; // src/crawl/ - the crawl loop, link rules, filenames, persistence
mod page;  // src/page/ - fetching one page and reading its HTML

use anyhow::{anyhow, Context, Result};
use clap::Parser; // Parser trait enables the parse() method
use cli::Cli;
use log::info;
use std::io::{self, BufRead, Write};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let env = env_logger::Env::default()
        .filter_or("RUST_LOG", if cli.trace { "trace" } else { "info" });
    env_logger::Builder::from_env(env).init();

    // std::process::exit() terminates the program with the given code
    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<()> {
    info!("bulk-scrape {}", env!("CARGO_PKG_VERSION"));
    if cli.shallow {
        info!("Shallow mode activated");
    }
    if cli.persist {
        info!("Persisting raw text files under {}", cli.output_dir.display());
    }

    let url = match &cli.url {
        Some(url) => url.clone(),
        None => prompt_for_url()?,
    };
    info!("Target URL: {}", url);

    let records = crawl::crawl(&url, &cli.crawl_options()).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        print_table(&records);
    }

    Ok(())
}

// Reads the target URL from stdin
fn prompt_for_url() -> Result<String> {
    print!("Enter your target URL: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read target URL")?;

    let url = line.trim();
    if url.is_empty() {
        return Err(anyhow!("no target URL given"));
    }
    Ok(url.to_string())
}

// Prints results as a human-readable table in the terminal
fn print_table(records: &[crawl::PageRecord]) {
    println!("{:<6} {:<50} {:<50}", "", "FNAME", "TEXT");
    println!("{}", "=".repeat(107));

    for (index, record) in records.iter().enumerate() {
        println!(
            "{:<6} {:<50} {:<50}",
            index,
            truncate(&record.filename, 50),
            truncate(record.text.trim(), 50)
        );
    }

    println!();
    println!("📄 Crawled {} page(s)", records.len());
}

// Shortens a string for display, counting characters rather than bytes
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
