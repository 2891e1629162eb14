// src/page/mod.rs
// =============================================================================
// This module deals with single pages.
//
// Submodules:
// - http: Downloads a page (or explains why it couldn't)
// - html: Pulls hrefs and visible text out of downloaded HTML
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

mod html;
mod http;

pub use html::{extract_hrefs, extract_text};
pub use http::{Fetch, FetchError, FetchedPage, HttpFetcher};
