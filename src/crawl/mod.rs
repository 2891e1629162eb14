// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Crawls every page reachable from the seed on the same host[:port]
// - Visits each URL exactly once
// - Keeps going when a page fails, recording the failure as its text
// - Optionally saves each page's text and a CSV of everything
//
// Submodules:
// - engine: The crawl loop and the frontier
// - links: Which hrefs we follow and how they are rewritten
// - filename: Where each page's text is saved
// - persist: Directory, page and CSV writing
// =============================================================================

mod engine;
mod filename;
mod links;
mod persist;

use serde::Serialize;
use std::path::PathBuf;

// Re-export the main crawling function
pub use engine::crawl;

/// The order in which pending URLs are taken off the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrawlOrder {
    /// Newest URL first (a stack)
    #[default]
    DepthFirst,
    /// Oldest URL first (a queue)
    BreadthFirst,
}

/// What the crawler should do besides collecting text
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Create text/ and processed/, save every page and the final CSV
    pub persist: bool,
    /// Only crawl the seed page
    pub shallow: bool,
    pub order: CrawlOrder,
    /// Where text/ and processed/ are created
    pub output_dir: PathBuf,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            persist: false,
            shallow: false,
            order: CrawlOrder::default(),
            output_dir: PathBuf::from("."),
        }
    }
}

/// One crawled page: where its text goes and what the text is
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRecord {
    #[serde(rename = "fname")]
    pub filename: String,
    pub text: String,
}
