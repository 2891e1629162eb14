// src/page/html.rs
// =============================================================================
// This module reads the two things we need out of an HTML page:
// - The raw href values of every <a> tag (for discovering more pages)
// - The visible text of the page (what we actually store)
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
// - Never fails on broken markup, it just does its best
//
// Rust concepts:
// - Iterators: For walking the elements and text nodes of the DOM
// - let-else: For bailing out early when something is missing
// =============================================================================

use scraper::{Html, Selector};

// Collects the href attribute of every <a> tag, exactly as written
//
// Parameters:
//   html: the HTML content to parse (borrowed as &str)
//
// Returns: Vec<String> of raw hrefs, in document order
//
// Nothing is resolved or validated here. That is the job of
// crawl::links::normalize_link.
//
// Example:
//   html = "<a href='/docs'>Docs</a><a>no href</a>"
//   result = ["/docs"]
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    // "a[href]" means "all <a> tags that have an href attribute"
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

// Extracts the visible text of a page
//
// Every text node under the root element is concatenated in document
// order, except text inside <script>, <style> and <template>. Comments
// are skipped, tags are dropped, and whitespace is left untouched (the
// crawler normalizes it once at the very end).
//
// <noscript> text is kept: it is what client-side rendered apps show
// when scripts don't run, and the crawler looks for it.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();

    for node in document.root_element().descendants() {
        let Some(chunk) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| HIDDEN_TAGS.contains(&element.name()))
        });
        if !hidden {
            text.push_str(chunk);
        }
    }

    text
}

// Elements whose text is never shown to a reader
const HIDDEN_TAGS: [&str; 3] = ["script", "style", "template"];
