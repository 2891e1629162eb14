// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - From: Converting our CLI types into the crawler's own types
// =============================================================================

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::crawl::{CrawlOptions, CrawlOrder};

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "bulk-scrape",
    version = "0.1.0",
    about = "Crawl a website and collect the text of every page",
    long_about = "bulk-scrape starts from one URL, follows every link that stays on the same host, \
                  and collects the visible text of each page it finds. \
                  With --persist the text is also saved under text/ and processed/scraped.csv."
)]
pub struct Cli {
    /// Target URL to be crawled (you will be asked for it if omitted)
    #[arg(long)]
    pub url: Option<String>,

    /// Crawl only the target page
    #[arg(long)]
    pub shallow: bool,

    /// Save raw text as .txt files and the results as processed/scraped.csv
    #[arg(long)]
    pub persist: bool,

    /// Which pending page to crawl next
    #[arg(long, value_enum, default_value_t = Order::Lifo)]
    pub order: Order,

    /// Directory that text/ and processed/ are created in
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Output results in JSON format instead of a table
    #[arg(long)]
    pub json: bool,

    /// Enable trace level logging
    #[arg(long)]
    pub trace: bool,
}

/// Frontier discipline as spelled on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    /// Most recently discovered page first
    Lifo,
    /// Earliest discovered page first
    Fifo,
}

impl From<Order> for CrawlOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Lifo => CrawlOrder::DepthFirst,
            Order::Fifo => CrawlOrder::BreadthFirst,
        }
    }
}

impl Cli {
    // Collects the flags the crawler cares about
    pub fn crawl_options(&self) -> CrawlOptions {
        CrawlOptions {
            persist: self.persist,
            shallow: self.shallow,
            order: self.order.into(),
            output_dir: self.output_dir.clone(),
        }
    }
}
